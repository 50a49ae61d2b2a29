use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ven_linalg::{
    cinverse, cproduct, inverse, product, ComplexInterval, ComplexIntervalMatrix, Interval,
    IntervalMatrix, InvOpts, MatMulOpts,
};

fn iv(lo: f64, hi: f64) -> Interval {
    Interval::from_bounds(lo, hi).unwrap()
}

fn contains_identity(p: &IntervalMatrix) -> bool {
    let n = p.rows();
    (0..n).all(|i| (0..n).all(|j| p[(i, j)].contains(if i == j { 1.0 } else { 0.0 })))
}

#[test]
fn identity_inverts_to_exact_identity() {
    let a: IntervalMatrix = IntervalMatrix::identity(2);
    let x = inverse(&a, &InvOpts::default()).unwrap();
    assert!(!x.any_nai());
    assert!(!x.any_ng());
    for i in 0..2 {
        for j in 0..2 {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert_eq!(x[(i, j)].inf(), expected);
            assert_eq!(x[(i, j)].sup(), expected);
        }
    }
    assert!(contains_identity(&product(&a, &x, &MatMulOpts::default()).unwrap()));
}

#[test]
fn diagonally_dominant_interval_matrix_is_invertible() {
    let mut rng = StdRng::seed_from_u64(71);
    for _ in 0..10 {
        let n = rng.gen_range(2..5);
        let a = IntervalMatrix::from_fn(n, n, |i, j| {
            let base: f64 = rng.gen_range(-0.2..0.2);
            let mid = if i == j { 4.0 + base } else { base };
            iv(mid - 1e-6, mid + 1e-6)
        });
        let x = inverse(&a, &InvOpts::default()).unwrap();
        assert!(!x.any_nai(), "verification must succeed for n = {n}");
        let opts = MatMulOpts::default();
        assert!(contains_identity(&product(&a, &x, &opts).unwrap()));
        assert!(contains_identity(&product(&x, &a, &opts).unwrap()));
    }
}

#[test]
fn singular_midpoint_degrades_to_all_nai() {
    let a: IntervalMatrix = IntervalMatrix::zeros(3, 3);
    let x = inverse(&a, &InvOpts::default()).unwrap();
    assert!(x.iter().all(Interval::is_nai));
}

#[test]
fn overly_wide_radii_degrade_to_all_nai() {
    // The midpoint is invertible but the residual norm exceeds one.
    let a = IntervalMatrix::from_fn(2, 2, |i, j| {
        if i == j {
            iv(-10.0, 12.0)
        } else {
            iv(-10.0, 10.0)
        }
    });
    let x = inverse(&a, &InvOpts::default()).unwrap();
    assert!(x.iter().all(Interval::is_nai));
}

#[test]
fn ng_of_the_input_marks_the_enclosure() {
    let mut a: IntervalMatrix = IntervalMatrix::identity(2);
    a[(0, 0)] = a[(0, 0)].mark_not_guaranteed();
    let x = inverse(&a, &InvOpts::default()).unwrap();
    assert!(!x.any_nai());
    assert!(x.any_ng());
}

#[test]
fn non_square_input_is_a_shape_error() {
    let a: IntervalMatrix = IntervalMatrix::zeros(2, 3);
    let err = inverse(&a, &InvOpts::default()).unwrap_err();
    assert_eq!(err.code(), "inverse_square");
}

#[test]
fn complex_identity_inverts_exactly() {
    let a = ComplexIntervalMatrix::identity(2);
    let x = cinverse(&a, &InvOpts::default()).unwrap();
    assert!(!x.any_nai());
    let p = cproduct(&a, &x, &MatMulOpts::default()).unwrap();
    for i in 0..2 {
        for j in 0..2 {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert!(p[(i, j)].contains(expected, 0.0));
        }
    }
}

#[test]
fn complex_rotation_matrix_inverts_verifiably() {
    // [[0, -1], [1, 0]] has inverse [[0, 1], [-1, 0]].
    let a = ComplexIntervalMatrix::from_fn(2, 2, |i, j| {
        let v = match (i, j) {
            (0, 1) => -1.0,
            (1, 0) => 1.0,
            _ => 0.0,
        };
        ComplexInterval::new(iv(v, v), Interval::zero())
    });
    let x = cinverse(&a, &InvOpts::default()).unwrap();
    assert!(!x.any_nai());
    assert!(x[(0, 1)].contains(1.0, 0.0));
    assert!(x[(1, 0)].contains(-1.0, 0.0));
}
