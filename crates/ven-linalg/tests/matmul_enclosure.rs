use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ven_linalg::{
    cproduct, complexify, matmul, multiply, product, product_ip, product_pi, ComplexInterval,
    ComplexIntervalMatrix, Interval, IntervalMatrix, MatMulMode, MatMulOpts, Operand,
    PointMatrix, ProductValue,
};

fn iv(lo: f64, hi: f64) -> Interval {
    Interval::from_bounds(lo, hi).unwrap()
}

fn slow() -> MatMulOpts {
    MatMulOpts {
        mode: MatMulMode::Slow,
        threads: 0,
    }
}

fn fast() -> MatMulOpts {
    MatMulOpts {
        mode: MatMulMode::Fast,
        threads: 0,
    }
}

/// Integer-valued interval matrix plus a sampled integer point matrix
/// contained in it; integer data keeps the float reference product exact.
fn random_pair(
    rng: &mut StdRng,
    rows: usize,
    cols: usize,
) -> (IntervalMatrix, PointMatrix) {
    let mut a = IntervalMatrix::zeros(rows, cols);
    let mut m = PointMatrix::from_elem(rows, cols, 0.0f64);
    for i in 0..rows {
        for j in 0..cols {
            let mid: i64 = rng.gen_range(-8..=8);
            let rad: i64 = rng.gen_range(0..=3);
            let pick: i64 = rng.gen_range(-rad..=rad);
            a[(i, j)] = iv((mid - rad) as f64, (mid + rad) as f64);
            m[(i, j)] = (mid + pick) as f64;
        }
    }
    (a, m)
}

fn exact_product(m: &PointMatrix, n: &PointMatrix) -> PointMatrix {
    let k = m.cols();
    PointMatrix::from_fn(m.rows(), n.cols(), |i, j| {
        (0..k).map(|l| m[(i, l)] * n[(l, j)]).sum()
    })
}

#[test]
fn ones_matrix_squared_is_exact_in_rump_mode() {
    let a = IntervalMatrix::from_elem(2, 2, iv(1.0, 1.0));
    let c = product(&a, &a, &fast()).unwrap();
    for i in 0..2 {
        for j in 0..2 {
            assert_eq!(c[(i, j)].inf(), 2.0);
            assert_eq!(c[(i, j)].sup(), 2.0);
            assert!(!c[(i, j)].is_ng());
        }
    }
}

#[test]
fn both_kernels_enclose_sampled_float_products() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..25 {
        let rows = rng.gen_range(1..5);
        let inner = rng.gen_range(1..5);
        let cols = rng.gen_range(1..5);
        let (a, m) = random_pair(&mut rng, rows, inner);
        let (b, n) = random_pair(&mut rng, inner, cols);
        let exact = exact_product(&m, &n);
        for opts in [slow(), fast()] {
            let c = product(&a, &b, &opts).unwrap();
            for i in 0..rows {
                for j in 0..cols {
                    assert!(
                        c[(i, j)].contains(exact[(i, j)]),
                        "cell ({i}, {j}) mode {:?}",
                        opts.mode
                    );
                }
            }
        }
    }
}

#[test]
fn naive_result_is_contained_in_rump_result_for_point_inputs() {
    let mut rng = StdRng::seed_from_u64(19);
    let (_, m) = random_pair(&mut rng, 3, 3);
    let (_, n) = random_pair(&mut rng, 3, 3);
    let tight = product_pi(&m, &n.lift(), &slow()).unwrap();
    let rump = product_pi(&m, &n.lift(), &fast()).unwrap();
    for i in 0..3 {
        for j in 0..3 {
            assert!(tight[(i, j)].subset_of(&rump[(i, j)]));
        }
    }
}

#[test]
fn mixed_point_variants_agree_with_the_lifted_product() {
    let mut rng = StdRng::seed_from_u64(23);
    let (a, m) = random_pair(&mut rng, 3, 4);
    let (b, n) = random_pair(&mut rng, 4, 2);
    let via_ip = product_ip(&a, &n, &fast()).unwrap();
    let lifted = product(&a, &n.lift(), &fast()).unwrap();
    assert_eq!(via_ip, lifted);
    let via_pi = product_pi(&m, &b, &fast()).unwrap();
    assert_eq!(via_pi, product(&m.lift(), &b, &fast()).unwrap());
}

#[test]
fn scaled_update_applies_alpha_and_beta() {
    let mut rng = StdRng::seed_from_u64(29);
    let (a, _) = random_pair(&mut rng, 2, 2);
    let (b, _) = random_pair(&mut rng, 2, 2);
    let p = product(&a, &b, &slow()).unwrap();

    // alpha = 1, beta = 0 reduces to the plain product.
    let mut c = IntervalMatrix::zeros(2, 2);
    matmul(&Interval::one(), &a, &b, &Interval::zero(), &mut c, &slow()).unwrap();
    assert_eq!(c, p);

    // alpha = 2 doubles every cell.
    let two = iv(2.0, 2.0);
    let mut c2 = IntervalMatrix::zeros(2, 2);
    matmul(&two, &a, &b, &Interval::zero(), &mut c2, &slow()).unwrap();
    for i in 0..2 {
        for j in 0..2 {
            assert_eq!(c2[(i, j)], two * p[(i, j)]);
        }
    }

    // beta = 1 accumulates onto the previous contents.
    let prev = iv(10.0, 11.0);
    let mut c3 = IntervalMatrix::from_elem(2, 2, prev);
    matmul(&Interval::one(), &a, &b, &Interval::one(), &mut c3, &slow()).unwrap();
    for i in 0..2 {
        for j in 0..2 {
            assert_eq!(c3[(i, j)], p[(i, j)] + prev);
        }
    }
}

#[test]
fn scaling_interval_ng_reaches_every_cell() {
    let a = IntervalMatrix::from_elem(2, 2, iv(1.0, 2.0));
    let alpha = iv(1.0, 1.0).mark_not_guaranteed();
    let mut c = IntervalMatrix::zeros(2, 2);
    matmul(&alpha, &a, &a, &Interval::zero(), &mut c, &fast()).unwrap();
    assert!(c.iter().all(Interval::is_ng));
}

#[test]
fn input_ng_propagates_through_both_kernels() {
    let mut a = IntervalMatrix::from_elem(2, 2, iv(0.0, 1.0));
    a[(0, 1)] = a[(0, 1)].mark_not_guaranteed();
    let b = IntervalMatrix::from_elem(2, 2, iv(1.0, 1.0));
    for opts in [slow(), fast()] {
        let c = product(&a, &b, &opts).unwrap();
        assert!(c[(0, 0)].is_ng(), "row of the tainted cell");
        assert!(c[(0, 1)].is_ng());
        assert!(!c[(1, 0)].is_ng(), "untainted row stays clean");
    }
}

#[test]
fn nai_cells_poison_their_row_and_column() {
    let mut a = IntervalMatrix::from_elem(2, 2, iv(0.0, 1.0));
    a[(0, 0)] = Interval::nai();
    let b = IntervalMatrix::from_elem(2, 2, iv(1.0, 1.0));
    for opts in [slow(), fast()] {
        let c = product(&a, &b, &opts).unwrap();
        assert!(c[(0, 0)].is_nai());
        assert!(c[(0, 1)].is_nai());
        assert!(!c[(1, 1)].is_nai());
    }
}

#[test]
fn complex_product_against_the_identity() {
    let a = ComplexIntervalMatrix::from_fn(2, 2, |i, j| {
        ComplexInterval::new(
            iv(i as f64, i as f64 + 1.0),
            iv(-(j as f64), j as f64 + 0.5),
        )
    });
    let ident = ComplexIntervalMatrix::identity(2);
    let c = cproduct(&a, &ident, &slow()).unwrap();
    assert_eq!(c, a);
    let c_rump = cproduct(&a, &ident, &fast()).unwrap();
    for i in 0..2 {
        for j in 0..2 {
            assert!(a[(i, j)].re().subset_of(c_rump[(i, j)].re()));
            assert!(a[(i, j)].im().subset_of(c_rump[(i, j)].im()));
        }
    }
}

#[test]
fn complex_product_encloses_sampled_complex_points() {
    let a = ComplexIntervalMatrix::from_fn(2, 2, |i, j| {
        ComplexInterval::new(iv(1.0, 2.0), iv(i as f64, j as f64 + 1.0))
    });
    let b = ComplexIntervalMatrix::from_fn(2, 2, |i, j| {
        ComplexInterval::new(iv(-1.0, 1.0), iv(j as f64, i as f64 + 2.0))
    });
    let c = cproduct(&a, &b, &fast()).unwrap();
    // Midpoint sample: multiply the midpoint matrices exactly in f64.
    for i in 0..2 {
        for j in 0..2 {
            let mut re = 0.0;
            let mut im = 0.0;
            for l in 0..2 {
                let (ar, ai) = (a[(i, l)].re().mid(), a[(i, l)].im().mid());
                let (br, bi) = (b[(l, j)].re().mid(), b[(l, j)].im().mid());
                re += ar * br - ai * bi;
                im += ar * bi + ai * br;
            }
            assert!(c[(i, j)].contains(re, im), "cell ({i}, {j})");
        }
    }
}

#[test]
fn umbrella_dispatch_branches_on_operand_kinds() {
    let mut rng = StdRng::seed_from_u64(31);
    let (a, m) = random_pair(&mut rng, 2, 2);
    let az = complexify(&a);
    let real = multiply(&Operand::RealInterval(&a), &Operand::RealPoint(&m), &fast()).unwrap();
    match real {
        ProductValue::Real(c) => assert_eq!(c, product_ip(&a, &m, &fast()).unwrap()),
        ProductValue::Complex(_) => panic!("real operands must stay real"),
    }
    let mixed = multiply(
        &Operand::RealPoint(&m),
        &Operand::ComplexInterval(&az),
        &fast(),
    )
    .unwrap();
    match mixed {
        ProductValue::Complex(c) => assert_eq!(c.shape(), (2, 2)),
        ProductValue::Real(_) => panic!("complex operand must promote the product"),
    }
}

#[test]
fn shape_mismatches_are_reported() {
    let a: IntervalMatrix = IntervalMatrix::zeros(2, 3);
    let b = IntervalMatrix::zeros(2, 3);
    let err = product(&a, &b, &fast()).unwrap_err();
    assert_eq!(err.code(), "matmul_inner");
    let mut c = IntervalMatrix::zeros(3, 3);
    let b_ok = IntervalMatrix::zeros(3, 2);
    let err = matmul(&Interval::one(), &a, &b_ok, &Interval::zero(), &mut c, &fast()).unwrap_err();
    assert_eq!(err.code(), "matmul_output");
}
