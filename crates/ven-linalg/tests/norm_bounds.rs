use ven_linalg::{norm_inf, norm_one, ComplexInterval, Interval, IntervalMatrix, Mat};

fn iv(lo: f64, hi: f64) -> Interval {
    Interval::from_bounds(lo, hi).unwrap()
}

#[test]
fn hand_computed_norms_of_a_small_matrix() {
    let a = Mat::from_rows(vec![
        vec![iv(1.0, 1.0), iv(-2.0, -2.0)],
        vec![iv(3.0, 3.0), iv(0.5, 0.5)],
    ])
    .unwrap();
    let one = norm_one(&a);
    let inf = norm_inf(&a);
    assert_eq!(one.value, 4.0);
    assert_eq!(inf.value, 3.5);
    assert!(!one.ng && !inf.ng);
}

#[test]
fn interval_entries_use_the_magnitude() {
    let a = Mat::from_rows(vec![vec![iv(-3.0, 1.0), iv(0.0, 2.0)]]).unwrap();
    let inf = norm_inf(&a);
    assert_eq!(inf.value, 5.0);
    let one = norm_one(&a);
    assert_eq!(one.value, 3.0);
}

#[test]
fn norms_are_upper_bounds_under_rounding() {
    let a = Mat::from_rows(vec![vec![iv(0.1, 0.1), iv(0.2, 0.2), iv(0.3, 0.3)]]).unwrap();
    let inf = norm_inf(&a);
    assert!(inf.value >= 0.1 + 0.2 + 0.3);
}

#[test]
fn ng_flag_of_the_argument_is_preserved() {
    let mut a = IntervalMatrix::from_elem(2, 2, iv(1.0, 2.0));
    assert!(!norm_one(&a).ng);
    a[(1, 1)] = a[(1, 1)].mark_not_guaranteed();
    assert!(norm_one(&a).ng);
    assert!(norm_inf(&a).ng);
}

#[test]
fn nai_entries_make_the_bound_unusable() {
    let mut a = IntervalMatrix::from_elem(2, 2, iv(1.0, 2.0));
    a[(0, 0)] = Interval::nai();
    assert!(norm_inf(&a).value.is_nan());
}

#[test]
fn complex_norms_bound_the_modulus() {
    let z = ComplexInterval::new(iv(3.0, 3.0), iv(4.0, 4.0));
    let a = Mat::from_elem(1, 1, z);
    let inf = norm_inf(&a);
    assert!(inf.value >= 5.0);
    assert!(inf.value < 5.0 + 1e-9);
}
