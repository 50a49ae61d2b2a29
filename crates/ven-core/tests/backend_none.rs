//! Exercises the widened back-end. Kept as a single test: the rounding
//! back-end is process-wide state and this binary owns its process.

use ven_core::{
    configure, current_config, ng_intrinsic, Config, Round, RoundedOps, RoundingBackend,
};

#[test]
fn widened_backend_pads_every_result_and_raises_ng() {
    let mut config = Config::default();
    assert_eq!(config.rounding, RoundingBackend::Correct);
    assert!(!ng_intrinsic());
    assert_eq!(1.0f64.add_dir(2.0, Round::Up), 3.0);

    config.rounding = RoundingBackend::None;
    configure(&config);
    assert_eq!(current_config().rounding, RoundingBackend::None);
    assert!(ng_intrinsic());

    // Even exact sums are widened one ULP in the requested direction.
    assert_eq!(1.0f64.add_dir(2.0, Round::Up), 3.0f64.next_up());
    assert_eq!(1.0f64.add_dir(2.0, Round::Down), 3.0f64.next_down());
    assert_eq!(1.0f64.add_dir(2.0, Round::Nearest), 3.0);
    assert_eq!(2.0f64.mul_dir(2.0, Round::Up), 4.0f64.next_up());
    // The widened results still bracket the exact value.
    assert!(1.0f64.add_dir(2.0, Round::Down) < 3.0 + 1e-12);

    config.rounding = RoundingBackend::Correct;
    configure(&config);
    assert!(!ng_intrinsic());
    assert_eq!(1.0f64.add_dir(2.0, Round::Up), 3.0);
}
