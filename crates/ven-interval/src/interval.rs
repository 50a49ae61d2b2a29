//! Decorated intervals with the not-guaranteed provenance flag.

use core::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};
use ven_core::ng_intrinsic;
use ven_core::round::{Round, RoundedOps};
use ven_core::VenError;

use crate::bare::BareInterval;
use crate::decoration::Decoration;
use crate::elementary;

/// Full IEEE-1788 interval: bare bounds, decoration and the NG flag.
///
/// `ng = false` promises the enclosure was produced by guaranteed directed
/// arithmetic all the way from construction; `true` means some step of the
/// provenance is unverified (widened back-end, inexact conversion). No
/// operation ever clears the flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval<F: RoundedOps = f64> {
    bare: BareInterval<F>,
    dec: Decoration,
    ng: bool,
}

fn decorate<F: RoundedOps>(bare: BareInterval<F>) -> Decoration {
    if bare.is_empty() {
        Decoration::Trv
    } else if bare.is_bounded() {
        Decoration::Com
    } else {
        Decoration::Dac
    }
}

impl<F: RoundedOps> Interval<F> {
    /// Not-an-Interval: the error sentinel absorbed by all arithmetic.
    pub fn nai() -> Self {
        Self {
            bare: BareInterval::empty(),
            dec: Decoration::Ill,
            ng: true,
        }
    }

    /// The empty interval.
    pub fn empty() -> Self {
        Self::from_parts(BareInterval::empty(), Decoration::Trv, false)
    }

    /// The whole real line.
    pub fn entire() -> Self {
        Self::from_parts(BareInterval::entire(), Decoration::Dac, false)
    }

    /// Thin zero.
    pub fn zero() -> Self {
        Self::singleton(F::ZERO)
    }

    /// Thin one.
    pub fn one() -> Self {
        Self::singleton(F::ONE)
    }

    /// Decorated `[a, b]` from representable bounds; never raises NG.
    pub fn from_bounds(a: F, b: F) -> Result<Self, VenError> {
        let bare = BareInterval::from_bounds(a, b)?;
        Ok(Self::new(bare))
    }

    /// Thin interval around a representable point.
    pub fn singleton(x: F) -> Self {
        Self::new(BareInterval::singleton(x))
    }

    /// Midpoint-radius enclosure from representable values.
    pub fn from_mid_rad(m: F, r: F) -> Result<Self, VenError> {
        Ok(Self::new(BareInterval::from_mid_rad(m, r)?))
    }

    /// Enclosure of binary64 bounds in the bound type `F`, rounding outward.
    /// Raises NG exactly when a bound was not representable.
    pub fn from_f64_bounds(a: f64, b: f64) -> Result<Self, VenError> {
        let lo = F::from_f64_dir(a, Round::Down);
        let hi = F::from_f64_dir(b, Round::Up);
        let mut iv = Self::new(BareInterval::from_bounds(lo, hi)?);
        if lo.to_f64() != a || hi.to_f64() != b {
            iv.ng = true;
        }
        Ok(iv)
    }

    /// Wraps a bare interval with its natural decoration.
    pub fn new(bare: BareInterval<F>) -> Self {
        Self::from_parts(bare, decorate(bare), false)
    }

    pub(crate) fn from_parts(bare: BareInterval<F>, dec: Decoration, ng: bool) -> Self {
        Self { bare, dec, ng }
    }

    /// Bare bounds.
    pub fn bare(&self) -> &BareInterval<F> {
        &self.bare
    }

    /// Lower bound.
    pub fn inf(&self) -> F {
        self.bare.inf()
    }

    /// Upper bound.
    pub fn sup(&self) -> F {
        self.bare.sup()
    }

    /// Decoration of the value.
    pub fn decoration(&self) -> Decoration {
        self.dec
    }

    /// Not-guaranteed provenance flag.
    pub fn is_ng(&self) -> bool {
        self.ng
    }

    /// True for the NaI sentinel.
    pub fn is_nai(&self) -> bool {
        self.dec == Decoration::Ill
    }

    /// True for the empty interval (NaI included).
    pub fn is_empty(&self) -> bool {
        self.bare.is_empty()
    }

    /// True for the whole real line.
    pub fn is_entire(&self) -> bool {
        self.bare.is_entire()
    }

    /// True when both bounds are finite.
    pub fn is_bounded(&self) -> bool {
        self.bare.is_bounded()
    }

    /// True when the finite point `x` lies in the interval.
    pub fn contains(&self, x: F) -> bool {
        !self.is_nai() && self.bare.contains(x)
    }

    /// Set inclusion on the bare parts.
    pub fn subset_of(&self, other: &Self) -> bool {
        self.bare.subset_of(&other.bare)
    }

    /// Disjointness on the bare parts.
    pub fn disjoint_from(&self, other: &Self) -> bool {
        self.bare.disjoint_from(&other.bare)
    }

    /// Thin-interval value, if the interval is a singleton.
    pub fn thin_value(&self) -> Option<F> {
        if !self.is_empty() && self.inf() == self.sup() {
            Some(self.inf())
        } else {
            None
        }
    }

    /// Midpoint (see [`BareInterval::mid`]).
    pub fn mid(&self) -> F {
        self.bare.mid()
    }

    /// Radius rounded up.
    pub fn rad(&self) -> F {
        self.bare.rad()
    }

    /// Rump midpoint-radius decomposition.
    pub fn rump_mid_rad(&self) -> (F, F) {
        self.bare.rump_mid_rad()
    }

    /// Magnitude.
    pub fn mag(&self) -> F {
        self.bare.mag()
    }

    /// Mignitude.
    pub fn mig(&self) -> F {
        self.bare.mig()
    }

    /// Width rounded up.
    pub fn width(&self) -> F {
        self.bare.width()
    }

    /// Returns the interval with the NG flag raised.
    pub fn mark_not_guaranteed(mut self) -> Self {
        self.ng = true;
        self
    }

    /// Lowers the decoration to at most `cap` (lattice meet).
    pub fn cap_decoration(mut self, cap: Decoration) -> Self {
        self.dec = self.dec.min(cap);
        self
    }

    /// Convex hull. A set operation: the decoration drops to `trv`.
    pub fn hull(&self, other: &Self) -> Self {
        if self.is_nai() || other.is_nai() {
            return Self::nai();
        }
        Self::from_parts(
            self.bare.hull(&other.bare),
            Decoration::Trv,
            self.ng || other.ng,
        )
    }

    /// Set intersection; decoration drops to `trv`.
    pub fn intersection(&self, other: &Self) -> Self {
        if self.is_nai() || other.is_nai() {
            return Self::nai();
        }
        Self::from_parts(
            self.bare.intersection(&other.bare),
            Decoration::Trv,
            self.ng || other.ng,
        )
    }

    fn finish(bare: BareInterval<F>, dec_in: Decoration, cap: Decoration, ng_in: bool) -> Self {
        let mut dec = dec_in.min(cap);
        if bare.is_empty() {
            dec = dec.min(Decoration::Trv);
        } else if !bare.is_bounded() {
            dec = dec.min(Decoration::Dac);
        }
        Self::from_parts(bare, dec, ng_in || ng_intrinsic())
    }

    fn binary(
        &self,
        rhs: &Self,
        f: impl FnOnce(&BareInterval<F>, &BareInterval<F>) -> (BareInterval<F>, Decoration),
    ) -> Self {
        if self.is_nai() || rhs.is_nai() {
            return Self::nai();
        }
        let (bare, cap) = f(&self.bare, &rhs.bare);
        Self::finish(bare, self.dec.min(rhs.dec), cap, self.ng || rhs.ng)
    }

    fn unary(
        &self,
        f: impl FnOnce(&BareInterval<F>) -> (BareInterval<F>, Decoration),
    ) -> Self {
        if self.is_nai() {
            return Self::nai();
        }
        let (bare, cap) = f(&self.bare);
        Self::finish(bare, self.dec, cap, self.ng)
    }

    /// Exact negation.
    pub fn negated(&self) -> Self {
        self.unary(|a| (a.neg(), Decoration::Com))
    }

    /// Absolute value.
    pub fn abs(&self) -> Self {
        self.unary(|a| (a.abs(), Decoration::Com))
    }

    /// Square root.
    pub fn sqrt(&self) -> Self {
        self.unary(|a| a.sqrt())
    }

    /// Reciprocal.
    pub fn recip(&self) -> Self {
        Self::one() / *self
    }

    /// Integer power.
    pub fn pown(&self, n: i32) -> Self {
        self.unary(|a| a.pown(n))
    }

    /// Real interval power.
    pub fn pow(&self, x: &Self) -> Self {
        self.binary(x, |a, b| a.pow(b))
    }

    /// n-th root.
    pub fn rootn(&self, n: u32) -> Self {
        self.unary(|a| a.rootn(n))
    }

    /// Exponential.
    pub fn exp(&self) -> Self {
        self.unary(elementary::exp)
    }

    /// Base-2 exponential.
    pub fn exp2(&self) -> Self {
        self.unary(elementary::exp2)
    }

    /// Base-10 exponential.
    pub fn exp10(&self) -> Self {
        self.unary(elementary::exp10)
    }

    /// `exp(x) - 1`.
    pub fn expm1(&self) -> Self {
        self.unary(elementary::expm1)
    }

    /// Natural logarithm.
    pub fn log(&self) -> Self {
        self.unary(elementary::log)
    }

    /// Base-2 logarithm.
    pub fn log2(&self) -> Self {
        self.unary(elementary::log2)
    }

    /// Base-10 logarithm.
    pub fn log10(&self) -> Self {
        self.unary(elementary::log10)
    }

    /// `log(1 + x)`.
    pub fn log1p(&self) -> Self {
        self.unary(elementary::log1p)
    }

    /// Sine.
    pub fn sin(&self) -> Self {
        self.unary(elementary::sin)
    }

    /// Cosine.
    pub fn cos(&self) -> Self {
        self.unary(elementary::cos)
    }

    /// Tangent.
    pub fn tan(&self) -> Self {
        self.unary(elementary::tan)
    }

    /// Arcsine.
    pub fn asin(&self) -> Self {
        self.unary(elementary::asin)
    }

    /// Arccosine.
    pub fn acos(&self) -> Self {
        self.unary(elementary::acos)
    }

    /// Arctangent.
    pub fn atan(&self) -> Self {
        self.unary(elementary::atan)
    }

    /// Two-argument arctangent, `self` being the ordinate.
    pub fn atan2(&self, x: &Self) -> Self {
        self.binary(x, elementary::atan2)
    }

    /// Hyperbolic sine.
    pub fn sinh(&self) -> Self {
        self.unary(elementary::sinh)
    }

    /// Hyperbolic cosine.
    pub fn cosh(&self) -> Self {
        self.unary(elementary::cosh)
    }

    /// Hyperbolic tangent.
    pub fn tanh(&self) -> Self {
        self.unary(elementary::tanh)
    }

    /// Inverse hyperbolic sine.
    pub fn asinh(&self) -> Self {
        self.unary(elementary::asinh)
    }

    /// Inverse hyperbolic cosine.
    pub fn acosh(&self) -> Self {
        self.unary(elementary::acosh)
    }

    /// Inverse hyperbolic tangent.
    pub fn atanh(&self) -> Self {
        self.unary(elementary::atanh)
    }

    /// Fused multiply-add `self * b + c` in interval arithmetic.
    pub fn mul_add(&self, b: &Self, c: &Self) -> Self {
        (*self * *b) + *c
    }
}

impl<F: RoundedOps> Add for Interval<F> {
    type Output = Interval<F>;
    fn add(self, rhs: Self) -> Self {
        self.binary(&rhs, |a, b| (a.add(b), Decoration::Com))
    }
}

impl<F: RoundedOps> Sub for Interval<F> {
    type Output = Interval<F>;
    fn sub(self, rhs: Self) -> Self {
        self.binary(&rhs, |a, b| (a.sub(b), Decoration::Com))
    }
}

impl<F: RoundedOps> Mul for Interval<F> {
    type Output = Interval<F>;
    fn mul(self, rhs: Self) -> Self {
        self.binary(&rhs, |a, b| (a.mul(b), Decoration::Com))
    }
}

impl<F: RoundedOps> Div for Interval<F> {
    type Output = Interval<F>;
    fn div(self, rhs: Self) -> Self {
        self.binary(&rhs, |a, b| a.div(b))
    }
}

impl<F: RoundedOps> Neg for Interval<F> {
    type Output = Interval<F>;
    fn neg(self) -> Self {
        self.negated()
    }
}
