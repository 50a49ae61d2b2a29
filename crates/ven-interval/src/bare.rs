//! Undecorated closed intervals with outward-rounded arithmetic.
//!
//! A `BareInterval` is the pair `[lo, hi]` with `lo <= hi`, `lo != +inf`,
//! `hi != -inf`. The canonical empty interval is `(+inf, -inf)`. Every
//! operation encloses the exact image of the represented set: for all
//! `x in a`, `y in b`, `op(x, y)` lies in `op(a, b)`.

use serde::{Deserialize, Serialize};
use ven_core::errors::{ErrorInfo, VenError};
use ven_core::round::{Round, RoundedOps};
use ven_core::{power_mode, PowerMode};

use crate::decoration::Decoration;

/// Closed real interval without decoration or provenance flags.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BareInterval<F: RoundedOps = f64> {
    pub(crate) lo: F,
    pub(crate) hi: F,
}

fn invalid(code: &str, message: String) -> VenError {
    VenError::InvalidBounds(ErrorInfo::new(code, message))
}

impl<F: RoundedOps> BareInterval<F> {
    /// The empty interval, canonically `(+inf, -inf)`.
    pub fn empty() -> Self {
        Self {
            lo: F::INFINITY,
            hi: F::NEG_INFINITY,
        }
    }

    /// The whole real line.
    pub fn entire() -> Self {
        Self {
            lo: F::NEG_INFINITY,
            hi: F::INFINITY,
        }
    }

    /// Builds `[a, b]`. The canonical empty pair is accepted; NaN bounds
    /// produce the empty interval; any other violation of `a <= b`,
    /// `a != +inf`, `b != -inf` is an error.
    pub fn from_bounds(a: F, b: F) -> Result<Self, VenError> {
        if a.is_nan() || b.is_nan() {
            return Ok(Self::empty());
        }
        if a == F::INFINITY && b == F::NEG_INFINITY {
            return Ok(Self::empty());
        }
        if a > b {
            return Err(invalid("bounds_reversed", format!("{a} > {b}")));
        }
        if a == F::INFINITY {
            return Err(invalid("lower_bound_positive_infinity", format!("[{a}, {b}]")));
        }
        if b == F::NEG_INFINITY {
            return Err(invalid("upper_bound_negative_infinity", format!("[{a}, {b}]")));
        }
        Ok(Self { lo: a, hi: b })
    }

    /// Thin interval `[x, x]`. NaN and infinite points have no real to
    /// enclose and produce the empty interval.
    pub fn singleton(x: F) -> Self {
        if x.is_nan() || x.is_infinite() {
            return Self::empty();
        }
        Self { lo: x, hi: x }
    }

    /// Midpoint-radius constructor `[m - r down, m + r up]`.
    pub fn from_mid_rad(m: F, r: F) -> Result<Self, VenError> {
        if m.is_nan() || r.is_nan() {
            return Ok(Self::empty());
        }
        if r < F::ZERO {
            return Err(invalid("negative_radius", format!("{r}")));
        }
        Ok(Self {
            lo: m.sub_dir(r, Round::Down),
            hi: m.add_dir(r, Round::Up),
        })
    }

    pub(crate) fn raw(lo: F, hi: F) -> Self {
        Self { lo, hi }
    }

    /// Lower bound. `+inf` for the empty interval.
    pub fn inf(&self) -> F {
        self.lo
    }

    /// Upper bound. `-inf` for the empty interval.
    pub fn sup(&self) -> F {
        self.hi
    }

    /// True for the empty interval.
    pub fn is_empty(&self) -> bool {
        self.lo > self.hi
    }

    /// True for the whole real line.
    pub fn is_entire(&self) -> bool {
        self.lo == F::NEG_INFINITY && self.hi == F::INFINITY
    }

    /// True when both bounds are finite (the empty interval counts as
    /// bounded).
    pub fn is_bounded(&self) -> bool {
        self.is_empty() || (self.lo.is_finite() && self.hi.is_finite())
    }

    /// True when the finite point `x` lies in the interval.
    pub fn contains(&self, x: F) -> bool {
        x.is_finite() && self.lo <= x && x <= self.hi
    }

    /// True when zero lies in the interval.
    pub fn contains_zero(&self) -> bool {
        self.contains(F::ZERO)
    }

    /// Set inclusion.
    pub fn subset_of(&self, other: &Self) -> bool {
        if self.is_empty() {
            return true;
        }
        if other.is_empty() {
            return false;
        }
        other.lo <= self.lo && self.hi <= other.hi
    }

    /// True when the two intervals share no point.
    pub fn disjoint_from(&self, other: &Self) -> bool {
        self.is_empty() || other.is_empty() || self.hi < other.lo || other.hi < self.lo
    }

    /// Smallest interval containing both arguments.
    pub fn hull(&self, other: &Self) -> Self {
        Self {
            lo: self.lo.min_val(other.lo),
            hi: self.hi.max_val(other.hi),
        }
    }

    /// Set intersection.
    pub fn intersection(&self, other: &Self) -> Self {
        let lo = self.lo.max_val(other.lo);
        let hi = self.hi.min_val(other.hi);
        if lo > hi {
            return Self::empty();
        }
        Self { lo, hi }
    }

    /// Magnitude `max |x|` over the interval; NaN for the empty interval.
    pub fn mag(&self) -> F {
        if self.is_empty() {
            return F::NAN;
        }
        self.lo.abs().max_val(self.hi.abs())
    }

    /// Mignitude `min |x|`; zero when the interval contains zero.
    pub fn mig(&self) -> F {
        if self.is_empty() {
            return F::NAN;
        }
        if self.contains_zero() {
            return F::ZERO;
        }
        self.lo.abs().min_val(self.hi.abs())
    }

    /// Width `hi - lo` rounded up; NaN for the empty interval.
    pub fn width(&self) -> F {
        if self.is_empty() {
            return F::NAN;
        }
        self.hi.sub_dir(self.lo, Round::Up)
    }

    /// Finite midpoint: 0 for entire, clamped `±MAX` for half-infinite
    /// intervals, the clamped nearest midpoint otherwise.
    pub fn mid(&self) -> F {
        if self.is_empty() {
            return F::NAN;
        }
        if self.is_entire() {
            return F::ZERO;
        }
        if self.lo == F::NEG_INFINITY {
            return F::MAX_FINITE.neg();
        }
        if self.hi == F::INFINITY {
            return F::MAX_FINITE;
        }
        let half = F::ONE.div_dir(F::ONE.add_dir(F::ONE, Round::Nearest), Round::Nearest);
        let s = self.lo.add_dir(self.hi, Round::Nearest);
        let m = if s.is_finite() {
            s.mul_dir(half, Round::Nearest)
        } else {
            self.lo
                .mul_dir(half, Round::Nearest)
                .add_dir(self.hi.mul_dir(half, Round::Nearest), Round::Nearest)
        };
        m.max_val(self.lo).min_val(self.hi)
    }

    /// Radius: smallest `r` with `[mid - r, mid + r]` containing the
    /// interval, rounded up. Infinite for unbounded intervals.
    pub fn rad(&self) -> F {
        if self.is_empty() {
            return F::NAN;
        }
        let m = self.mid();
        let left = m.sub_dir(self.lo, Round::Up);
        let right = self.hi.sub_dir(m, Round::Up);
        left.max_val(right)
    }

    /// Rump decomposition: midpoint `(lo + hi)/2` rounded up and the valid
    /// radius overestimate `mid - lo` rounded up.
    pub fn rump_mid_rad(&self) -> (F, F) {
        if self.is_empty() {
            return (F::NAN, F::NAN);
        }
        if !self.is_bounded() {
            return (self.mid(), F::INFINITY);
        }
        let half = F::ONE.div_dir(F::ONE.add_dir(F::ONE, Round::Nearest), Round::Nearest);
        let s = self.lo.add_dir(self.hi, Round::Up);
        let m = if s.is_finite() {
            s.mul_dir(half, Round::Nearest)
        } else {
            self.lo
                .mul_dir(half, Round::Nearest)
                .add_dir(self.hi.mul_dir(half, Round::Nearest), Round::Up)
        };
        (m, m.sub_dir(self.lo, Round::Up))
    }

    /// Exact negation.
    pub fn neg(&self) -> Self {
        if self.is_empty() {
            return Self::empty();
        }
        Self {
            lo: self.hi.neg(),
            hi: self.lo.neg(),
        }
    }

    /// Absolute value.
    pub fn abs(&self) -> Self {
        if self.is_empty() {
            return Self::empty();
        }
        Self {
            lo: self.mig(),
            hi: self.mag(),
        }
    }

    /// Outward-rounded addition.
    pub fn add(&self, rhs: &Self) -> Self {
        if self.is_empty() || rhs.is_empty() {
            return Self::empty();
        }
        Self {
            lo: self.lo.add_dir(rhs.lo, Round::Down),
            hi: self.hi.add_dir(rhs.hi, Round::Up),
        }
    }

    /// Outward-rounded subtraction.
    pub fn sub(&self, rhs: &Self) -> Self {
        if self.is_empty() || rhs.is_empty() {
            return Self::empty();
        }
        Self {
            lo: self.lo.sub_dir(rhs.hi, Round::Down),
            hi: self.hi.sub_dir(rhs.lo, Round::Up),
        }
    }

    /// Outward-rounded multiplication: the nine-case sign table collapsed to
    /// directed corner products, with `0 * inf` contributing zero.
    pub fn mul(&self, rhs: &Self) -> Self {
        if self.is_empty() || rhs.is_empty() {
            return Self::empty();
        }
        let corners = [
            (self.lo, rhs.lo),
            (self.lo, rhs.hi),
            (self.hi, rhs.lo),
            (self.hi, rhs.hi),
        ];
        let mut lo = F::INFINITY;
        let mut hi = F::NEG_INFINITY;
        for (x, y) in corners {
            lo = lo.min_val(mul_corner(x, y, Round::Down));
            hi = hi.max_val(mul_corner(x, y, Round::Up));
        }
        Self { lo, hi }
    }

    /// Set-based division. Returns the enclosure and the decoration cap of
    /// the operation (`Trv` whenever the denominator reaches zero).
    pub fn div(&self, rhs: &Self) -> (Self, Decoration) {
        if self.is_empty() || rhs.is_empty() {
            return (Self::empty(), Decoration::Trv);
        }
        let den_thin_zero = rhs.lo == F::ZERO && rhs.hi == F::ZERO;
        if den_thin_zero {
            return (Self::empty(), Decoration::Trv);
        }
        let zin_den = rhs.contains_zero();
        if !zin_den {
            let corners = [
                (self.lo, rhs.lo),
                (self.lo, rhs.hi),
                (self.hi, rhs.lo),
                (self.hi, rhs.hi),
            ];
            let mut lo = F::INFINITY;
            let mut hi = F::NEG_INFINITY;
            for (x, y) in corners {
                if let Some(q) = div_corner(x, y, Round::Down) {
                    lo = lo.min_val(q);
                }
                if let Some(q) = div_corner(x, y, Round::Up) {
                    hi = hi.max_val(q);
                }
            }
            return (Self { lo, hi }, Decoration::Com);
        }
        // Denominator reaches zero: semi-infinite pieces, hull reported.
        let num_thin_zero = self.lo == F::ZERO && self.hi == F::ZERO;
        if num_thin_zero {
            return (Self::singleton(F::ZERO), Decoration::Trv);
        }
        if self.lo < F::ZERO && self.hi > F::ZERO {
            return (Self::entire(), Decoration::Trv);
        }
        if rhs.lo < F::ZERO && rhs.hi > F::ZERO {
            return (Self::entire(), Decoration::Trv);
        }
        let out = if rhs.lo == F::ZERO {
            // rhs = [0, d], d > 0
            if self.lo >= F::ZERO {
                Self {
                    lo: self.lo.div_dir(rhs.hi, Round::Down),
                    hi: F::INFINITY,
                }
            } else {
                Self {
                    lo: F::NEG_INFINITY,
                    hi: self.hi.div_dir(rhs.hi, Round::Up),
                }
            }
        } else {
            // rhs = [c, 0], c < 0
            if self.lo >= F::ZERO {
                Self {
                    lo: F::NEG_INFINITY,
                    hi: self.lo.div_dir(rhs.lo, Round::Up),
                }
            } else {
                Self {
                    lo: self.hi.div_dir(rhs.lo, Round::Down),
                    hi: F::INFINITY,
                }
            }
        };
        (out, Decoration::Trv)
    }

    /// Square root over the clipped domain `[max(lo, 0), hi]`.
    pub fn sqrt(&self) -> (Self, Decoration) {
        if self.is_empty() {
            return (Self::empty(), Decoration::Trv);
        }
        if self.hi < F::ZERO {
            return (Self::empty(), Decoration::Trv);
        }
        let cap = if self.lo < F::ZERO {
            Decoration::Trv
        } else {
            Decoration::Com
        };
        let lo = self.lo.max_val(F::ZERO);
        (
            Self {
                lo: lo.sqrt_dir(Round::Down),
                hi: self.hi.sqrt_dir(Round::Up),
            },
            cap,
        )
    }

    /// Integer power with odd/even handling. Negative exponents go through
    /// the reciprocal of the positive power, never `inv(a)^n`.
    pub fn pown(&self, n: i32) -> (Self, Decoration) {
        if self.is_empty() {
            return (Self::empty(), Decoration::Trv);
        }
        if n == 0 {
            return (Self::singleton(F::ONE), Decoration::Com);
        }
        if n < 0 {
            let p = self.pown_pos(n.unsigned_abs());
            return Self::singleton(F::ONE).div(&p);
        }
        (self.pown_pos(n as u32), Decoration::Com)
    }

    fn pown_pos(&self, n: u32) -> Self {
        if n % 2 == 1 {
            Self {
                lo: powi_dir(self.lo, n, Round::Down),
                hi: powi_dir(self.hi, n, Round::Up),
            }
        } else {
            let lo = if self.contains_zero() {
                F::ZERO
            } else {
                powi_dir(self.mig(), n, Round::Down)
            };
            Self {
                lo,
                hi: powi_dir(self.mag(), n, Round::Up),
            }
        }
    }

    /// Real power: base clipped to `[0, inf)`, four directed corner
    /// evaluations hulled. Thin integer exponents delegate to [`Self::pown`],
    /// the exponent one half to [`Self::sqrt`]. A corner blowing up in the
    /// direction that would shrink the result yields entire.
    pub fn pow(&self, x: &Self) -> (Self, Decoration) {
        if self.is_empty() || x.is_empty() {
            return (Self::empty(), Decoration::Trv);
        }
        if let Some(n) = thin_integer(x) {
            return self.pown(n);
        }
        let half = F::ONE.div_dir(F::ONE.add_dir(F::ONE, Round::Nearest), Round::Nearest);
        if x.lo == x.hi && x.lo == half {
            return self.sqrt();
        }
        if self.hi < F::ZERO {
            return (Self::empty(), Decoration::Trv);
        }
        let mut cap = Decoration::Com;
        if self.lo < F::ZERO {
            cap = Decoration::Trv;
        }
        if self.contains_zero() && x.lo < F::ZERO {
            cap = Decoration::Trv;
        }
        let base_lo = self.lo.max_val(F::ZERO);
        let base_hi = self.hi;
        let corners = [
            (base_lo, x.lo),
            (base_lo, x.hi),
            (base_hi, x.lo),
            (base_hi, x.hi),
        ];
        let mut lo = F::INFINITY;
        let mut hi = F::NEG_INFINITY;
        for (b, e) in corners {
            let down = b.pow_dir(e, Round::Down);
            let up = b.pow_dir(e, Round::Up);
            if down.is_nan() || up.is_nan() {
                return (Self::entire(), Decoration::Trv);
            }
            lo = lo.min_val(down);
            hi = hi.max_val(up);
        }
        if lo == F::INFINITY || hi == F::NEG_INFINITY {
            // Every corner exploded in the wrong direction.
            return (Self::entire(), Decoration::Trv);
        }
        (Self { lo, hi }, cap)
    }

    /// n-th root: odd roots are defined on the whole line, even roots on the
    /// clipped non-negative part.
    pub fn rootn(&self, n: u32) -> (Self, Decoration) {
        if self.is_empty() || n == 0 {
            return (Self::empty(), Decoration::Trv);
        }
        if n % 2 == 1 {
            return (
                Self {
                    lo: self.lo.rootn_dir(n, Round::Down),
                    hi: self.hi.rootn_dir(n, Round::Up),
                },
                Decoration::Com,
            );
        }
        if self.hi < F::ZERO {
            return (Self::empty(), Decoration::Trv);
        }
        let cap = if self.lo < F::ZERO {
            Decoration::Trv
        } else {
            Decoration::Com
        };
        let lo = self.lo.max_val(F::ZERO);
        (
            Self {
                lo: lo.rootn_dir(n, Round::Down),
                hi: self.hi.rootn_dir(n, Round::Up),
            },
            cap,
        )
    }
}

/// Directed corner product with the `0 * inf = 0` convention of extended
/// interval arithmetic.
fn mul_corner<F: RoundedOps>(a: F, b: F, dir: Round) -> F {
    if a == F::ZERO || b == F::ZERO {
        return F::ZERO;
    }
    a.mul_dir(b, dir)
}

/// Directed corner quotient for sign-definite denominators. `inf / inf`
/// corners carry no boundary information and are skipped.
fn div_corner<F: RoundedOps>(a: F, b: F, dir: Round) -> Option<F> {
    if a == F::ZERO {
        return Some(F::ZERO);
    }
    if a.is_infinite() && b.is_infinite() {
        return None;
    }
    Some(a.div_dir(b, dir))
}

/// Integer endpoint power honouring the configured [`PowerMode`].
fn powi_dir<F: RoundedOps>(x: F, n: u32, dir: Round) -> F {
    match power_mode() {
        PowerMode::Fast => x.pow_int_dir(n, dir),
        PowerMode::Slow => {
            let e = F::from_f64_dir(f64::from(n), Round::Nearest);
            if x < F::ZERO {
                if n % 2 == 0 {
                    x.neg().pow_dir(e, dir)
                } else {
                    x.neg().pow_dir(e, dir.flip()).neg()
                }
            } else {
                x.pow_dir(e, dir)
            }
        }
    }
}

/// Recognises a thin interval holding an exactly representable `i32`.
fn thin_integer<F: RoundedOps>(x: &BareInterval<F>) -> Option<i32> {
    if x.lo != x.hi || !x.lo.is_finite() {
        return None;
    }
    let v = x.lo.to_f64();
    if v.fract() != 0.0 || v.abs() > i32::MAX as f64 {
        return None;
    }
    Some(v as i32)
}
