//! Operator norms with round-up accumulation.

use serde::{Deserialize, Serialize};
use ven_core::round::{Round, RoundedOps};
use ven_interval::{ComplexInterval, Interval};

use crate::matrix::Mat;

/// A verified upper bound together with the preserved NG flag of the
/// argument. The bound is NaN when the argument contained empty or NaI
/// elements; callers treat a non-finite bound as unverifiable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormBound<F: RoundedOps> {
    /// Round-up accumulated norm value.
    pub value: F,
    /// OR of the element NG flags.
    pub ng: bool,
}

/// Element with an upward-rounded magnitude bound, shared by the real and
/// complex norms.
pub trait MagElement<F: RoundedOps> {
    /// Round-up bound on `max |x|` over the element.
    fn mag_up(&self) -> F;
    /// NG flag of the element.
    fn element_ng(&self) -> bool;
}

impl<F: RoundedOps> MagElement<F> for Interval<F> {
    fn mag_up(&self) -> F {
        self.mag()
    }
    fn element_ng(&self) -> bool {
        self.is_ng()
    }
}

impl<F: RoundedOps> MagElement<F> for ComplexInterval<F> {
    fn mag_up(&self) -> F {
        self.mag_upper()
    }
    fn element_ng(&self) -> bool {
        self.is_ng()
    }
}

/// Column-sum norm `max_j sum_i |A[i,j]|`, accumulated with round-up so the
/// result is a valid upper bound.
pub fn norm_one<F: RoundedOps, T: MagElement<F>>(a: &Mat<T>) -> NormBound<F> {
    let ng = a.iter().any(|e| e.element_ng());
    let mut best = F::ZERO;
    for j in 0..a.cols() {
        let mut sum = F::ZERO;
        for i in 0..a.rows() {
            sum = sum.add_dir(a[(i, j)].mag_up(), Round::Up);
        }
        if sum.is_nan() {
            return NormBound { value: F::NAN, ng };
        }
        best = best.max_val(sum);
    }
    NormBound { value: best, ng }
}

/// Row-sum norm `max_i sum_j |A[i,j]|`.
pub fn norm_inf<F: RoundedOps, T: MagElement<F>>(a: &Mat<T>) -> NormBound<F> {
    let ng = a.iter().any(|e| e.element_ng());
    let mut best = F::ZERO;
    for i in 0..a.rows() {
        let mut sum = F::ZERO;
        for j in 0..a.cols() {
            sum = sum.add_dir(a[(i, j)].mag_up(), Round::Up);
        }
        if sum.is_nan() {
            return NormBound { value: F::NAN, ng };
        }
        best = best.max_val(sum);
    }
    NormBound { value: best, ng }
}
