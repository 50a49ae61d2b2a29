//! Rectangular complex intervals.
//!
//! Invariant: after every operation both components carry the same
//! decoration (the minimum) and the same NG flag (the or). A NaI component
//! makes the whole value NaI.

use core::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};
use ven_core::round::{Round, RoundedOps};
use ven_core::VenError;

use crate::decoration::Decoration;
use crate::interval::Interval;

/// Pair of real intervals enclosing a set of complex numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexInterval<F: RoundedOps = f64> {
    re: Interval<F>,
    im: Interval<F>,
}

impl<F: RoundedOps> ComplexInterval<F> {
    /// Builds a complex interval, harmonising decoration and NG across the
    /// components.
    pub fn new(re: Interval<F>, im: Interval<F>) -> Self {
        Self { re, im }.normalized()
    }

    /// Purely real complex interval.
    pub fn from_real(re: Interval<F>) -> Self {
        Self::new(re, Interval::zero())
    }

    /// The complex NaI sentinel.
    pub fn nai() -> Self {
        Self {
            re: Interval::nai(),
            im: Interval::nai(),
        }
    }

    /// Thin zero.
    pub fn zero() -> Self {
        Self::from_real(Interval::zero())
    }

    /// Thin one.
    pub fn one() -> Self {
        Self::from_real(Interval::one())
    }

    /// Enclosure of a binary64 complex point, rounding outward into `F` and
    /// raising NG when a component is not representable.
    pub fn from_f64_point(re: f64, im: f64) -> Result<Self, VenError> {
        Ok(Self::new(
            Interval::from_f64_bounds(re, re)?,
            Interval::from_f64_bounds(im, im)?,
        ))
    }

    /// Midpoint-radius box `m ± r` in both components.
    pub fn from_mid_rad(re: F, im: F, r: F) -> Result<Self, VenError> {
        Ok(Self::new(
            Interval::from_mid_rad(re, r)?,
            Interval::from_mid_rad(im, r)?,
        ))
    }

    fn normalized(self) -> Self {
        if self.re.is_nai() || self.im.is_nai() {
            return Self::nai();
        }
        let dec = self.re.decoration().min(self.im.decoration());
        let ng = self.re.is_ng() || self.im.is_ng();
        Self {
            re: Interval::from_parts(*self.re.bare(), dec, ng),
            im: Interval::from_parts(*self.im.bare(), dec, ng),
        }
    }

    /// Real component.
    pub fn re(&self) -> &Interval<F> {
        &self.re
    }

    /// Imaginary component.
    pub fn im(&self) -> &Interval<F> {
        &self.im
    }

    /// Shared decoration of the value.
    pub fn decoration(&self) -> Decoration {
        self.re.decoration()
    }

    /// Shared NG flag.
    pub fn is_ng(&self) -> bool {
        self.re.is_ng()
    }

    /// True for the NaI sentinel.
    pub fn is_nai(&self) -> bool {
        self.re.is_nai() || self.im.is_nai()
    }

    /// True when either component is empty.
    pub fn is_empty(&self) -> bool {
        self.re.is_empty() || self.im.is_empty()
    }

    /// Complex conjugate.
    pub fn conj(&self) -> Self {
        Self::new(self.re, self.im.negated())
    }

    /// True when the complex point `(re, im)` lies in the box.
    pub fn contains(&self, re: F, im: F) -> bool {
        self.re.contains(re) && self.im.contains(im)
    }

    /// Componentwise intersection; decoration drops to `trv`.
    pub fn intersection(&self, other: &Self) -> Self {
        Self::new(
            self.re.intersection(&other.re),
            self.im.intersection(&other.im),
        )
    }

    /// True when the boxes share no point.
    pub fn disjoint_from(&self, other: &Self) -> bool {
        self.re.disjoint_from(&other.re) || self.im.disjoint_from(&other.im)
    }

    /// Round-up bound on `max |z|` over the box: `sqrt(mag_re^2 + mag_im^2)`
    /// accumulated upward.
    pub fn mag_upper(&self) -> F {
        if self.is_empty() {
            return F::NAN;
        }
        let mr = self.re.mag();
        let mi = self.im.mag();
        mr.mul_dir(mr, Round::Up)
            .add_dir(mi.mul_dir(mi, Round::Up), Round::Up)
            .sqrt_dir(Round::Up)
    }
}

impl<F: RoundedOps> Add for ComplexInterval<F> {
    type Output = ComplexInterval<F>;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl<F: RoundedOps> Sub for ComplexInterval<F> {
    type Output = ComplexInterval<F>;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl<F: RoundedOps> Mul for ComplexInterval<F> {
    type Output = ComplexInterval<F>;
    fn mul(self, rhs: Self) -> Self {
        // Four interval products, two combining sums, all outward rounded.
        let re = self.re * rhs.re - self.im * rhs.im;
        let im = self.re * rhs.im + self.im * rhs.re;
        Self::new(re, im)
    }
}

impl<F: RoundedOps> Div for ComplexInterval<F> {
    type Output = ComplexInterval<F>;
    fn div(self, rhs: Self) -> Self {
        // Conjugate multiplication over |rhs|^2 with set-based zero rules.
        let den = rhs.re.pown(2) + rhs.im.pown(2);
        let re = (self.re * rhs.re + self.im * rhs.im) / den;
        let im = (self.im * rhs.re - self.re * rhs.im) / den;
        Self::new(re, im)
    }
}

impl<F: RoundedOps> Neg for ComplexInterval<F> {
    type Output = ComplexInterval<F>;
    fn neg(self) -> Self {
        Self::new(self.re.negated(), self.im.negated())
    }
}
