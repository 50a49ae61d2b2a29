//! Interval matrix multiplication.
//!
//! Two kernels: a naive triple loop over interval fused multiply-adds, and
//! Rump's midpoint-radius decomposition running three directed float
//! multiplications. The float kernels are data-parallel across the outer
//! column axis: each task owns whole output columns and reduces the inner
//! index strictly in ascending order, so results are deterministic
//! regardless of worker count.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use ven_core::errors::{ErrorInfo, VenError};
use ven_core::round::{Round, RoundedOps};
use ven_core::{matmul_mode, ng_intrinsic, MatMulMode};
use ven_interval::{ComplexInterval, Decoration, Interval};

use crate::matrix::{
    complexify, shape_error, ComplexIntervalMatrix, ComplexPointMatrix, IntervalMatrix, Mat,
    PointMatrix,
};

fn default_threads() -> usize {
    0
}

/// Options governing a matrix multiplication call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatMulOpts {
    /// Kernel selection; defaults to the process-wide policy.
    pub mode: MatMulMode,
    /// Worker threads for the float kernels; 0 uses the global rayon pool.
    #[serde(default = "default_threads")]
    pub threads: usize,
}

impl Default for MatMulOpts {
    fn default() -> Self {
        Self {
            mode: matmul_mode(),
            threads: 0,
        }
    }
}

fn check_product_shapes<T, U>(a: &Mat<T>, b: &Mat<U>) -> Result<(), VenError> {
    if a.cols() != b.rows() {
        return Err(shape_error(
            "matmul_inner",
            format!("{:?} * {:?}", a.shape(), b.shape()),
        ));
    }
    Ok(())
}

/// Verified product of two interval matrices.
///
/// Contract: for every real `M in A`, `N in B`, `(M*N)[i,j]` lies in the
/// returned cell `[i,j]`.
pub fn product<F: RoundedOps>(
    a: &IntervalMatrix<F>,
    b: &IntervalMatrix<F>,
    opts: &MatMulOpts,
) -> Result<IntervalMatrix<F>, VenError> {
    check_product_shapes(a, b)?;
    if F::EXACT || opts.mode == MatMulMode::Slow {
        return Ok(naive(a, b));
    }
    pooled(opts.threads, || rump(a, b))
}

/// Verified product of an interval matrix and a point matrix.
pub fn product_ip<F: RoundedOps>(
    a: &IntervalMatrix<F>,
    b: &PointMatrix<F>,
    opts: &MatMulOpts,
) -> Result<IntervalMatrix<F>, VenError> {
    product(a, &b.lift(), opts)
}

/// Verified product of a point matrix and an interval matrix.
pub fn product_pi<F: RoundedOps>(
    a: &PointMatrix<F>,
    b: &IntervalMatrix<F>,
    opts: &MatMulOpts,
) -> Result<IntervalMatrix<F>, VenError> {
    product(&a.lift(), b, opts)
}

/// Scaled update `C := alpha * (A * B) + beta * C_prev`.
///
/// The NG flag of every output cell is the OR over the participating cells
/// of `A`, `B`, the previous `C` and the scaling intervals.
pub fn matmul<F: RoundedOps>(
    alpha: &Interval<F>,
    a: &IntervalMatrix<F>,
    b: &IntervalMatrix<F>,
    beta: &Interval<F>,
    c: &mut IntervalMatrix<F>,
    opts: &MatMulOpts,
) -> Result<(), VenError> {
    check_product_shapes(a, b)?;
    if c.shape() != (a.rows(), b.cols()) {
        return Err(shape_error(
            "matmul_output",
            format!("expected {:?}, got {:?}", (a.rows(), b.cols()), c.shape()),
        ));
    }
    let p = product(a, b, opts)?;
    for i in 0..c.rows() {
        for j in 0..c.cols() {
            c[(i, j)] = scale_cell(alpha, &p[(i, j)], beta, &c[(i, j)]);
        }
    }
    Ok(())
}

/// Verified product of two complex interval matrices via real-imaginary
/// split: four real products and two combining sums.
pub fn cproduct<F: RoundedOps>(
    a: &ComplexIntervalMatrix<F>,
    b: &ComplexIntervalMatrix<F>,
    opts: &MatMulOpts,
) -> Result<ComplexIntervalMatrix<F>, VenError> {
    check_product_shapes(a, b)?;
    let (are, aim) = a.re_im_parts();
    let (bre, bim) = b.re_im_parts();
    let rr = product(&are, &bre, opts)?;
    let ii = product(&aim, &bim, opts)?;
    let ri = product(&are, &bim, opts)?;
    let ir = product(&aim, &bre, opts)?;
    let re = rr.zip_map(&ii, |x, y| *x - *y)?;
    let im = ri.zip_map(&ir, |x, y| *x + *y)?;
    ComplexIntervalMatrix::from_re_im(&re, &im)
}

/// Complex interval times complex point product.
pub fn cproduct_cp<F: RoundedOps>(
    a: &ComplexIntervalMatrix<F>,
    b: &ComplexPointMatrix<F>,
    opts: &MatMulOpts,
) -> Result<ComplexIntervalMatrix<F>, VenError> {
    cproduct(a, &b.lift_complex(), opts)
}

/// Complex point times complex interval product.
pub fn cproduct_pc<F: RoundedOps>(
    a: &ComplexPointMatrix<F>,
    b: &ComplexIntervalMatrix<F>,
    opts: &MatMulOpts,
) -> Result<ComplexIntervalMatrix<F>, VenError> {
    cproduct(&a.lift_complex(), b, opts)
}

/// Scaled complex update `C := alpha * (A * B) + beta * C_prev`.
pub fn cmatmul<F: RoundedOps>(
    alpha: &ComplexInterval<F>,
    a: &ComplexIntervalMatrix<F>,
    b: &ComplexIntervalMatrix<F>,
    beta: &ComplexInterval<F>,
    c: &mut ComplexIntervalMatrix<F>,
    opts: &MatMulOpts,
) -> Result<(), VenError> {
    check_product_shapes(a, b)?;
    if c.shape() != (a.rows(), b.cols()) {
        return Err(shape_error(
            "matmul_output",
            format!("expected {:?}, got {:?}", (a.rows(), b.cols()), c.shape()),
        ));
    }
    let p = cproduct(a, b, opts)?;
    for i in 0..c.rows() {
        for j in 0..c.cols() {
            c[(i, j)] = cscale_cell(alpha, &p[(i, j)], beta, &c[(i, j)]);
        }
    }
    Ok(())
}

/// Operand-kind tag for the umbrella dispatcher: the variants a call can
/// mix are resolved once here, the kernels underneath stay monomorphic.
#[derive(Debug)]
pub enum Operand<'a, F: RoundedOps> {
    /// Real point matrix.
    RealPoint(&'a PointMatrix<F>),
    /// Real interval matrix.
    RealInterval(&'a IntervalMatrix<F>),
    /// Complex point matrix.
    ComplexPoint(&'a ComplexPointMatrix<F>),
    /// Complex interval matrix.
    ComplexInterval(&'a ComplexIntervalMatrix<F>),
}

/// Result of the umbrella dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductValue<F: RoundedOps> {
    /// Real interval product.
    Real(IntervalMatrix<F>),
    /// Complex interval product.
    Complex(ComplexIntervalMatrix<F>),
}

/// Multiplies two operands of any supported kind, branching once on the
/// operand mix: points are promoted to exact singletons, and a real operand
/// meeting a complex one is promoted into the complex plane.
pub fn multiply<F: RoundedOps>(
    a: &Operand<'_, F>,
    b: &Operand<'_, F>,
    opts: &MatMulOpts,
) -> Result<ProductValue<F>, VenError> {
    match (promote(a), promote(b)) {
        (Promoted::Real(x), Promoted::Real(y)) => {
            Ok(ProductValue::Real(product(&x, &y, opts)?))
        }
        (x, y) => {
            let xc = x.into_complex();
            let yc = y.into_complex();
            Ok(ProductValue::Complex(cproduct(&xc, &yc, opts)?))
        }
    }
}

enum Promoted<F: RoundedOps> {
    Real(IntervalMatrix<F>),
    Complex(ComplexIntervalMatrix<F>),
}

impl<F: RoundedOps> Promoted<F> {
    fn into_complex(self) -> ComplexIntervalMatrix<F> {
        match self {
            Promoted::Real(m) => complexify(&m),
            Promoted::Complex(m) => m,
        }
    }
}

fn promote<F: RoundedOps>(op: &Operand<'_, F>) -> Promoted<F> {
    match op {
        Operand::RealPoint(m) => Promoted::Real(m.lift()),
        Operand::RealInterval(m) => Promoted::Real((*m).clone()),
        Operand::ComplexPoint(m) => Promoted::Complex(m.lift_complex()),
        Operand::ComplexInterval(m) => Promoted::Complex((*m).clone()),
    }
}

fn exactly<F: RoundedOps>(iv: &Interval<F>, v: F) -> bool {
    iv.thin_value() == Some(v) && iv.decoration() == Decoration::Com && !iv.is_ng()
}

fn scale_cell<F: RoundedOps>(
    alpha: &Interval<F>,
    p: &Interval<F>,
    beta: &Interval<F>,
    prev: &Interval<F>,
) -> Interval<F> {
    let scaled = if exactly(alpha, F::ONE) {
        *p
    } else if exactly(alpha, F::ZERO) {
        Interval::zero()
    } else {
        *alpha * *p
    };
    if exactly(beta, F::ZERO) {
        scaled
    } else if exactly(beta, F::ONE) {
        scaled + *prev
    } else {
        scaled + *beta * *prev
    }
}

fn cscale_cell<F: RoundedOps>(
    alpha: &ComplexInterval<F>,
    p: &ComplexInterval<F>,
    beta: &ComplexInterval<F>,
    prev: &ComplexInterval<F>,
) -> ComplexInterval<F> {
    let cexact = |z: &ComplexInterval<F>, v: F| {
        exactly(z.re(), v) && exactly(z.im(), F::ZERO)
    };
    let scaled = if cexact(alpha, F::ONE) {
        *p
    } else if cexact(alpha, F::ZERO) {
        ComplexInterval::zero()
    } else {
        *alpha * *p
    };
    if cexact(beta, F::ZERO) {
        scaled
    } else if cexact(beta, F::ONE) {
        scaled + *prev
    } else {
        scaled + *beta * *prev
    }
}

/// Naive kernel: interval fused multiply-add accumulators, inner index
/// strictly ascending.
fn naive<F: RoundedOps>(a: &IntervalMatrix<F>, b: &IntervalMatrix<F>) -> IntervalMatrix<F> {
    let k = a.cols();
    Mat::from_fn(a.rows(), b.cols(), |i, j| {
        let mut acc = Interval::zero();
        for l in 0..k {
            acc = a[(i, l)].mul_add(&b[(l, j)], &acc);
        }
        acc
    })
}

/// Rump kernel: `C.mid` from two directed products of the midpoints,
/// `C.rad` from one round-up product of `|mA|*rB + rA*(|mB| + rB)`.
fn rump<F: RoundedOps>(
    a: &IntervalMatrix<F>,
    b: &IntervalMatrix<F>,
) -> Result<IntervalMatrix<F>, VenError> {
    let (ma, ra) = a.rump_split();
    let (mb, rb) = b.rump_split();
    let down = gemm(&ma, &mb, Round::Down);
    let up = gemm(&ma, &mb, Round::Up);
    let rad = rad_gemm(&ma, &ra, &mb, &rb);

    let k = a.cols();
    let row_dec: Vec<Decoration> = (0..a.rows())
        .map(|i| {
            (0..k).fold(Decoration::Com, |d, l| d.min(a[(i, l)].decoration()))
        })
        .collect();
    let col_dec: Vec<Decoration> = (0..b.cols())
        .map(|j| {
            (0..k).fold(Decoration::Com, |d, l| d.min(b[(l, j)].decoration()))
        })
        .collect();
    let row_ng: Vec<bool> = (0..a.rows())
        .map(|i| (0..k).any(|l| a[(i, l)].is_ng()))
        .collect();
    let col_ng: Vec<bool> = (0..b.cols())
        .map(|j| (0..k).any(|l| b[(l, j)].is_ng()))
        .collect();

    let intrinsic = ng_intrinsic();
    let mut out = IntervalMatrix::zeros(a.rows(), b.cols());
    for i in 0..a.rows() {
        for j in 0..b.cols() {
            if row_dec[i] == Decoration::Ill || col_dec[j] == Decoration::Ill {
                out[(i, j)] = Interval::nai();
                continue;
            }
            let lo = down[(i, j)].sub_dir(rad[(i, j)], Round::Down);
            let hi = up[(i, j)].add_dir(rad[(i, j)], Round::Up);
            let iv = Interval::from_bounds(lo, hi).unwrap_or_else(|_| Interval::entire());
            let mut iv = iv.cap_decoration(row_dec[i].min(col_dec[j]));
            if row_ng[i] || col_ng[j] || intrinsic {
                iv = iv.mark_not_guaranteed();
            }
            out[(i, j)] = iv;
        }
    }
    Ok(out)
}

/// Directed float product, column-parallel and row-sequential.
fn gemm<F: RoundedOps>(a: &PointMatrix<F>, b: &PointMatrix<F>, dir: Round) -> PointMatrix<F> {
    let m = a.rows();
    let k = a.cols();
    let cols: Vec<Vec<F>> = (0..b.cols())
        .into_par_iter()
        .map(|j| {
            let mut col = Vec::with_capacity(m);
            for i in 0..m {
                let mut s = F::ZERO;
                for l in 0..k {
                    s = a[(i, l)].fma_dir(b[(l, j)], s, dir);
                }
                col.push(s);
            }
            col
        })
        .collect();
    Mat::from_columns(m, cols)
}

/// Round-up radius kernel accumulating `|mA|*rB + rA*(|mB| + rB)`.
fn rad_gemm<F: RoundedOps>(
    ma: &PointMatrix<F>,
    ra: &PointMatrix<F>,
    mb: &PointMatrix<F>,
    rb: &PointMatrix<F>,
) -> PointMatrix<F> {
    let m = ma.rows();
    let k = ma.cols();
    let cols: Vec<Vec<F>> = (0..mb.cols())
        .into_par_iter()
        .map(|j| {
            let mut col = Vec::with_capacity(m);
            for i in 0..m {
                let mut s = F::ZERO;
                for l in 0..k {
                    s = ma[(i, l)].abs().fma_dir(rb[(l, j)], s, Round::Up);
                    s = ra[(i, l)].fma_dir(
                        mb[(l, j)].abs().add_dir(rb[(l, j)], Round::Up),
                        s,
                        Round::Up,
                    );
                }
                col.push(s);
            }
            col
        })
        .collect();
    Mat::from_columns(m, cols)
}

fn pooled<F: RoundedOps>(
    threads: usize,
    f: impl FnOnce() -> Result<IntervalMatrix<F>, VenError> + Send,
) -> Result<IntervalMatrix<F>, VenError> {
    if threads == 0 {
        return f();
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|err| VenError::Domain(ErrorInfo::new("thread_pool", err.to_string())))?;
    pool.install(f)
}
