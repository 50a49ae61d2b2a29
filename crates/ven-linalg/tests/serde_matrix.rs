use ven_linalg::{EigOpts, Interval, IntervalMatrix, InvOpts, Mat, MatMulOpts};

fn iv(lo: f64, hi: f64) -> Interval {
    Interval::from_bounds(lo, hi).unwrap()
}

#[test]
fn interval_matrix_roundtrips_through_json() {
    let a = Mat::from_rows(vec![
        vec![iv(1.0, 2.0), iv(-0.5, 0.5)],
        vec![Interval::zero(), iv(3.0, 3.0).mark_not_guaranteed()],
    ])
    .unwrap();
    let json = serde_json::to_string(&a).unwrap();
    let back: IntervalMatrix = serde_json::from_str(&json).unwrap();
    assert_eq!(a, back);
    assert!(back.any_ng());
}

#[test]
fn option_structs_deserialize_with_defaults() {
    let opts: MatMulOpts = serde_json::from_str(r#"{"mode": "slow"}"#).unwrap();
    assert_eq!(opts.threads, 0);
    let inv: InvOpts = serde_json::from_str("{}").unwrap();
    assert_eq!(inv.matmul.threads, 0);
    let eig: EigOpts = serde_json::from_str("{}").unwrap();
    assert_eq!(eig.refine_iters, 1);
    assert!(eig.real_collapse_factor > 0.0);
}

#[test]
fn option_structs_roundtrip() {
    let opts = EigOpts {
        refine_iters: 3,
        ..EigOpts::default()
    };
    let json = serde_json::to_string(&opts).unwrap();
    let back: EigOpts = serde_json::from_str(&json).unwrap();
    assert_eq!(opts, back);
}
