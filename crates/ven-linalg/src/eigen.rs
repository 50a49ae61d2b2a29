//! Verified eigenvalue enclosures.
//!
//! The midpoint matrix is diagonalised with non-verified float arithmetic
//! (Schur eigenvalues, inverse-iteration eigenvectors, one Newton-style
//! refinement of the eigenvalues). The approximate similarity is then
//! applied in verified complex interval arithmetic, producing a nearly
//! block-diagonal matrix to which Gershgorin's theorem applies column by
//! column. Real inputs get a final conjugate-folding pass.

use nalgebra::{DMatrix, DVector};
use num_complex::Complex;
use serde::{Deserialize, Serialize};
use ven_core::errors::VenError;
use ven_core::round::{Round, RoundedOps};
use ven_interval::{ComplexInterval, Interval};

use crate::inverse::{cinverse, InvOpts};
use crate::matmul::{cproduct, MatMulOpts};
use crate::matrix::{complexify, shape_error, ComplexIntervalMatrix, IntervalMatrix};

type C64 = Complex<f64>;

fn default_refine_iters() -> usize {
    1
}

fn default_real_collapse_factor() -> f64 {
    // sqrt of the binary64 machine epsilon
    1.490_116_119_384_765_6e-8
}

/// Options for the eigenvalue solver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EigOpts {
    /// Verified similarity refinement passes.
    #[serde(default = "default_refine_iters")]
    pub refine_iters: usize,
    /// An eigenvalue pair collapses to real only when its imaginary radius
    /// is below this factor times the spectral magnitude.
    #[serde(default = "default_real_collapse_factor")]
    pub real_collapse_factor: f64,
    /// Multiplication options for the verified products.
    #[serde(default)]
    pub matmul: MatMulOpts,
}

impl Default for EigOpts {
    fn default() -> Self {
        Self {
            refine_iters: default_refine_iters(),
            real_collapse_factor: default_real_collapse_factor(),
            matmul: MatMulOpts::default(),
        }
    }
}

/// One verified eigenvalue enclosure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Eigenvalue<F: RoundedOps> {
    /// Enclosure collapsed onto the real axis.
    Real(Interval<F>),
    /// Genuinely complex (or unclassifiable) enclosure.
    Complex(ComplexInterval<F>),
}

impl<F: RoundedOps> Eigenvalue<F> {
    /// True for the NaI sentinel in either representation.
    pub fn is_nai(&self) -> bool {
        match self {
            Eigenvalue::Real(iv) => iv.is_nai(),
            Eigenvalue::Complex(z) => z.is_nai(),
        }
    }

    /// View as a complex box regardless of classification.
    pub fn as_complex(&self) -> ComplexInterval<F> {
        match self {
            Eigenvalue::Real(iv) => ComplexInterval::from_real(*iv),
            Eigenvalue::Complex(z) => *z,
        }
    }
}

fn all_nai_vec<F: RoundedOps>(n: usize) -> Vec<ComplexInterval<F>> {
    vec![ComplexInterval::nai(); n]
}

/// Verified eigenvalue enclosures of a real interval matrix, with
/// conjugate pairs folded back onto the real axis where justified.
///
/// Overlapping Gershgorin discs report their union; per-eigenvalue
/// identification is not guaranteed.
pub fn eigenvalues<F: RoundedOps>(
    a: &IntervalMatrix<F>,
    opts: &EigOpts,
) -> Result<Vec<Eigenvalue<F>>, VenError> {
    if !a.is_square() {
        return Err(shape_error("eigen_square", format!("{:?}", a.shape())));
    }
    let n = a.rows();
    if n == 0 {
        return Ok(Vec::new());
    }
    let mid = a.mid_f64();
    if mid.iter().any(|v| !v.is_finite()) {
        return Ok(fold_nai(all_nai_vec(n)));
    }
    let lams: Vec<C64> = mid.complex_eigenvalues().iter().copied().collect();
    let mc = mid.map(|x| C64::new(x, 0.0));
    let discs = enclose_spectrum(&complexify(a), &mc, lams, opts)?;
    Ok(fold_conjugate(discs, opts.real_collapse_factor))
}

/// Verified eigenvalue enclosures of a complex interval matrix.
pub fn ceigenvalues<F: RoundedOps>(
    a: &ComplexIntervalMatrix<F>,
    opts: &EigOpts,
) -> Result<Vec<ComplexInterval<F>>, VenError> {
    if !a.is_square() {
        return Err(shape_error("eigen_square", format!("{:?}", a.shape())));
    }
    let n = a.rows();
    if n == 0 {
        return Ok(Vec::new());
    }
    let mc = a.mid_c64();
    if mc.iter().any(|v| !v.re.is_finite() || !v.im.is_finite()) {
        return Ok(all_nai_vec(n));
    }
    let Some(lams) = mc.clone().eigenvalues() else {
        return Ok(all_nai_vec(n));
    };
    enclose_spectrum(a, &mc, lams.iter().copied().collect(), opts)
}

/// Shared verified body over the complex lift of the input.
fn enclose_spectrum<F: RoundedOps>(
    av: &ComplexIntervalMatrix<F>,
    mc: &DMatrix<C64>,
    mut lams: Vec<C64>,
    opts: &EigOpts,
) -> Result<Vec<ComplexInterval<F>>, VenError> {
    let n = mc.nrows();
    let v = eigenvectors(mc, &lams);
    refine_floats(mc, &v, &mut lams);

    let vi = ComplexIntervalMatrix::<F>::enclose_c64(&v)?;
    let mut li = diag_from_points::<F>(&lams)?;
    let inv_opts = InvOpts {
        matmul: opts.matmul.clone(),
    };

    let mut b: Option<ComplexIntervalMatrix<F>> = None;
    for _ in 0..opts.refine_iters.max(1) {
        if let Some(prev) = &b {
            li = diag_of(prev);
        }
        let vinv = cinverse(&vi, &inv_opts)?;
        if vinv.any_nai() {
            return Ok(all_nai_vec(n));
        }
        let t1 = cproduct(av, &vi, &opts.matmul)?;
        let t2 = cproduct(&vi, &li, &opts.matmul)?;
        let t = t1.zip_map(&t2, |x, y| *x - *y)?;
        let corr = cproduct(&vinv, &t, &opts.matmul)?;
        b = Some(li.zip_map(&corr, |x, y| *x + *y)?);
    }
    let b = b.unwrap_or(li);

    let mut discs = Vec::with_capacity(n);
    for i in 0..n {
        let center = b[(i, i)];
        if center.is_nai() {
            discs.push(ComplexInterval::nai());
            continue;
        }
        let mut r = F::ZERO;
        for j in 0..n {
            if j != i {
                r = r.add_dir(b[(j, i)].mag_upper(), Round::Up);
            }
        }
        if r.is_nan() {
            discs.push(ComplexInterval::nai());
            continue;
        }
        let band =
            Interval::from_bounds(r.neg(), r).unwrap_or_else(|_| Interval::entire());
        discs.push(ComplexInterval::new(
            *center.re() + band,
            *center.im() + band,
        ));
    }
    Ok(discs)
}

/// Eigenvectors of the midpoint by shifted inverse iteration.
fn eigenvectors(mc: &DMatrix<C64>, lams: &[C64]) -> DMatrix<C64> {
    let n = mc.nrows();
    let mut v = DMatrix::<C64>::zeros(n, n);
    for (idx, lam) in lams.iter().enumerate() {
        let col = inverse_iteration(mc, *lam, idx);
        v.set_column(idx, &col);
    }
    v
}

fn inverse_iteration(mc: &DMatrix<C64>, lam: C64, idx: usize) -> DVector<C64> {
    let n = mc.nrows();
    let scale = lam.norm().max(1.0);
    let mut shift_eps = 1e-10;
    for _ in 0..4 {
        let shift = lam + C64::new(scale * shift_eps, scale * shift_eps * 0.5);
        let mut shifted = mc.clone();
        for i in 0..n {
            shifted[(i, i)] -= shift;
        }
        let lu = shifted.lu();
        let mut w = DVector::from_element(n, C64::new(1.0, 0.0));
        w[idx] += C64::new(1.0, 0.0);
        let mut ok = true;
        for _ in 0..2 {
            match lu.solve(&w) {
                Some(sol) => {
                    let norm = sol.norm();
                    if !norm.is_finite() || norm == 0.0 {
                        ok = false;
                        break;
                    }
                    w = sol.unscale(norm);
                }
                None => {
                    ok = false;
                    break;
                }
            }
        }
        if ok {
            return w;
        }
        shift_eps *= 100.0;
    }
    let mut e = DVector::<C64>::zeros(n);
    e[idx] = C64::new(1.0, 0.0);
    e
}

/// Newton-style float refinement `lam += diag(V \ (M*V - V*Lam))`.
fn refine_floats(mc: &DMatrix<C64>, v: &DMatrix<C64>, lams: &mut [C64]) {
    let n = mc.nrows();
    let ldiag = DMatrix::from_fn(n, n, |i, j| {
        if i == j {
            lams[i]
        } else {
            C64::new(0.0, 0.0)
        }
    });
    let resid = mc * v - v * &ldiag;
    if let Some(x) = v.clone().lu().solve(&resid) {
        if x.iter().all(|z| z.re.is_finite() && z.im.is_finite()) {
            for i in 0..n {
                lams[i] += x[(i, i)];
            }
        }
    }
}

fn diag_from_points<F: RoundedOps>(lams: &[C64]) -> Result<ComplexIntervalMatrix<F>, VenError> {
    let n = lams.len();
    let mut m = ComplexIntervalMatrix::zeros(n, n);
    for (i, lam) in lams.iter().enumerate() {
        m[(i, i)] = ComplexInterval::from_f64_point(lam.re, lam.im)?;
    }
    Ok(m)
}

fn diag_of<F: RoundedOps>(b: &ComplexIntervalMatrix<F>) -> ComplexIntervalMatrix<F> {
    let n = b.rows();
    let mut m = ComplexIntervalMatrix::zeros(n, n);
    for i in 0..n {
        m[(i, i)] = b[(i, i)];
    }
    m
}

fn fold_nai<F: RoundedOps>(discs: Vec<ComplexInterval<F>>) -> Vec<Eigenvalue<F>> {
    discs.into_iter().map(Eigenvalue::Complex).collect()
}

/// Collapses near-conjugate enclosures of a real spectrum onto the real
/// axis: each value is intersected with every non-disjoint conjugate and
/// classified real only when the resulting imaginary part contains zero
/// with a radius below `factor` times the spectral magnitude.
fn fold_conjugate<F: RoundedOps>(
    discs: Vec<ComplexInterval<F>>,
    factor: f64,
) -> Vec<Eigenvalue<F>> {
    let scale = discs
        .iter()
        .filter(|d| !d.is_nai())
        .map(|d| d.mag_upper().to_f64())
        .filter(|m| m.is_finite())
        .fold(0.0f64, f64::max);
    let threshold = factor * scale;
    let mut out = Vec::with_capacity(discs.len());
    for (i, v) in discs.iter().enumerate() {
        if v.is_nai() {
            out.push(Eigenvalue::Complex(*v));
            continue;
        }
        let mut w = *v;
        for (j, u) in discs.iter().enumerate() {
            if j == i || u.is_nai() {
                continue;
            }
            let cj = u.conj();
            if !w.disjoint_from(&cj) {
                w = w.intersection(&cj);
            }
        }
        if w.is_empty() {
            w = *v;
        }
        let im_rad = w.im().rad().to_f64();
        if w.im().contains(F::ZERO) && im_rad.is_finite() && im_rad <= threshold {
            out.push(Eigenvalue::Real(*w.re()));
        } else {
            out.push(Eigenvalue::Complex(w));
        }
    }
    out
}
