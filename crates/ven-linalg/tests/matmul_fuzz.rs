use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ven_linalg::{product, Interval, IntervalMatrix, MatMulMode, MatMulOpts, PointMatrix};

/// Integer-valued data keeps the reference float product exact, so the
/// containment check is airtight.
fn build(
    rng: &mut StdRng,
    rows: usize,
    cols: usize,
) -> (IntervalMatrix, PointMatrix) {
    let mut a = IntervalMatrix::zeros(rows, cols);
    let mut m = PointMatrix::from_elem(rows, cols, 0.0f64);
    for i in 0..rows {
        for j in 0..cols {
            let mid: i64 = rng.gen_range(-16..=16);
            let rad: i64 = rng.gen_range(0..=4);
            let pick: i64 = rng.gen_range(-rad..=rad);
            a[(i, j)] = Interval::from_bounds((mid - rad) as f64, (mid + rad) as f64).unwrap();
            m[(i, j)] = (mid + pick) as f64;
        }
    }
    (a, m)
}

proptest! {
    #[test]
    fn random_products_enclose_their_members(
        seed in any::<u64>(),
        rows in 1usize..5,
        inner in 1usize..5,
        cols in 1usize..5,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let (a, m) = build(&mut rng, rows, inner);
        let (b, n) = build(&mut rng, inner, cols);
        for mode in [MatMulMode::Slow, MatMulMode::Fast] {
            let opts = MatMulOpts { mode, threads: 0 };
            let c = product(&a, &b, &opts).unwrap();
            for i in 0..rows {
                for j in 0..cols {
                    let exact: f64 = (0..inner).map(|l| m[(i, l)] * n[(l, j)]).sum();
                    prop_assert!(c[(i, j)].contains(exact));
                    prop_assert!(!c[(i, j)].is_ng());
                }
            }
        }
    }

    #[test]
    fn rump_and_naive_overlap_on_every_cell(
        seed in any::<u64>(),
        n in 1usize..5,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let (a, _) = build(&mut rng, n, n);
        let (b, _) = build(&mut rng, n, n);
        let tight = product(&a, &b, &MatMulOpts { mode: MatMulMode::Slow, threads: 0 }).unwrap();
        let wide = product(&a, &b, &MatMulOpts { mode: MatMulMode::Fast, threads: 0 }).unwrap();
        for i in 0..n {
            for j in 0..n {
                prop_assert!(!tight[(i, j)].disjoint_from(&wide[(i, j)]));
            }
        }
    }
}
