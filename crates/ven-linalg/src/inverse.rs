//! Verified matrix inversion.
//!
//! A non-verified LU inverse of the midpoint matrix is validated by a
//! contraction-mapping argument: with `R` the approximate inverse and
//! `E = A*R - I`, the Neumann series `R*(I + E + E^2 + ...)` converges to
//! the true inverse whenever `||E|| < 1`, and its tail is bounded by
//! `||R*E|| / (1 - ||E||)`. When the bound cannot be established the result
//! degrades to the all-NaI matrix rather than an error.

use num_complex::Complex;
use serde::{Deserialize, Serialize};
use ven_core::errors::VenError;
use ven_core::ng_intrinsic;
use ven_core::round::{Round, RoundedOps};
use ven_interval::{ComplexInterval, Interval};

use crate::matmul::{cproduct, product, MatMulOpts};
use crate::matrix::{shape_error, ComplexIntervalMatrix, IntervalMatrix};
use crate::norm::norm_inf;

/// Options for verified inversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvOpts {
    /// Multiplication options used for the residual products.
    #[serde(default)]
    pub matmul: MatMulOpts,
}

/// Shared verification arithmetic: the entrywise inflation radius, or None
/// when the contraction cannot be established.
fn inflation_radius<F: RoundedOps>(y: F, z: F) -> Option<F> {
    if !y.is_finite() || !(z < F::ONE) {
        return None;
    }
    let denom = F::ONE.sub_dir(z, Round::Down);
    if !(denom > F::ZERO) {
        return None;
    }
    let eps = y.div_dir(denom, Round::Up);
    if !eps.is_finite() {
        return None;
    }
    Some(eps)
}

/// Verified inverse of a square real interval matrix. Returns the all-NaI
/// matrix when the midpoint is singular or the enclosure cannot be proven.
pub fn inverse<F: RoundedOps>(
    a: &IntervalMatrix<F>,
    opts: &InvOpts,
) -> Result<IntervalMatrix<F>, VenError> {
    if !a.is_square() {
        return Err(shape_error("inverse_square", format!("{:?}", a.shape())));
    }
    let n = a.rows();
    if n == 0 {
        return Ok(IntervalMatrix::zeros(0, 0));
    }
    let mid = a.mid_f64();
    if mid.iter().any(|v| !v.is_finite()) {
        return Ok(IntervalMatrix::all_nai(n, n));
    }
    let Some(approx) = mid.try_inverse() else {
        return Ok(IntervalMatrix::all_nai(n, n));
    };
    if approx.iter().any(|v| !v.is_finite()) {
        return Ok(IntervalMatrix::all_nai(n, n));
    }
    // Centers representable in F, so the singleton lift below is exact.
    let centers = crate::matrix::PointMatrix::<F>::from_fn(n, n, |i, j| {
        F::from_f64_dir(approx[(i, j)], Round::Nearest)
    });
    let r = centers.lift();
    let prod = product(a, &r, &opts.matmul)?;
    let ident = IntervalMatrix::<F>::identity(n);
    let resid = prod.zip_map(&ident, |p, e| *p - *e)?;
    let y = norm_inf(&product(&r, &resid, &opts.matmul)?);
    let z = norm_inf(&resid);
    let Some(eps) = inflation_radius(y.value, z.value) else {
        return Ok(IntervalMatrix::all_nai(n, n));
    };
    let ng = a.any_ng() || y.ng || z.ng || ng_intrinsic();
    let mut out = IntervalMatrix::zeros(n, n);
    for i in 0..n {
        for j in 0..n {
            let mut iv = Interval::from_mid_rad(centers[(i, j)], eps)?;
            if ng {
                iv = iv.mark_not_guaranteed();
            }
            out[(i, j)] = iv;
        }
    }
    Ok(out)
}

/// Verified inverse of a square complex interval matrix.
pub fn cinverse<F: RoundedOps>(
    a: &ComplexIntervalMatrix<F>,
    opts: &InvOpts,
) -> Result<ComplexIntervalMatrix<F>, VenError> {
    if !a.is_square() {
        return Err(shape_error("inverse_square", format!("{:?}", a.shape())));
    }
    let n = a.rows();
    if n == 0 {
        return Ok(ComplexIntervalMatrix::zeros(0, 0));
    }
    let mid = a.mid_c64();
    if mid.iter().any(|v| !v.re.is_finite() || !v.im.is_finite()) {
        return Ok(ComplexIntervalMatrix::all_nai(n, n));
    }
    let Some(approx) = mid.try_inverse() else {
        return Ok(ComplexIntervalMatrix::all_nai(n, n));
    };
    if approx.iter().any(|v| !v.re.is_finite() || !v.im.is_finite()) {
        return Ok(ComplexIntervalMatrix::all_nai(n, n));
    }
    let centers = crate::matrix::ComplexPointMatrix::<F>::from_fn(n, n, |i, j| {
        Complex::new(
            F::from_f64_dir(approx[(i, j)].re, Round::Nearest),
            F::from_f64_dir(approx[(i, j)].im, Round::Nearest),
        )
    });
    let r = centers.lift_complex();
    let prod = cproduct(a, &r, &opts.matmul)?;
    let ident = ComplexIntervalMatrix::<F>::identity(n);
    let resid = prod.zip_map(&ident, |p, e| *p - *e)?;
    let y = norm_inf(&cproduct(&r, &resid, &opts.matmul)?);
    let z = norm_inf(&resid);
    let Some(eps) = inflation_radius(y.value, z.value) else {
        return Ok(ComplexIntervalMatrix::all_nai(n, n));
    };
    let ng = a.any_ng() || y.ng || z.ng || ng_intrinsic();
    let mut out = ComplexIntervalMatrix::zeros(n, n);
    for i in 0..n {
        for j in 0..n {
            let c = centers[(i, j)];
            let mut iv = ComplexInterval::from_mid_rad(c.re, c.im, eps)?;
            if ng {
                iv = ComplexInterval::new(
                    iv.re().mark_not_guaranteed(),
                    iv.im().mark_not_guaranteed(),
                );
            }
            out[(i, j)] = iv;
        }
    }
    Ok(out)
}
