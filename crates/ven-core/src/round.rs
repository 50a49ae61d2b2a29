//! Directed-rounding scalar kernels.
//!
//! Every interval bound in the workspace is produced by one of these
//! operations. Under the `correct` back-end the arithmetic core
//! (add/sub/mul/div/sqrt/fma) is exactly correctly rounded: the nearest
//! result is computed natively, the exact residual is recovered with an
//! error-free transformation, and the sign of the residual decides a one-ULP
//! bump. Transcendentals fall under the external-library contract: the
//! platform libm is assumed faithful (error below one ULP) and the result is
//! widened one ULP in the requested direction, which preserves enclosure
//! unconditionally and correct rounding whenever libm is exact.
//!
//! Under the `none` back-end every result is the native nearest value widened
//! one ULP; callers must raise NG on everything they build from it.

use serde::{Deserialize, Serialize};

use crate::config::{rounding_backend, RoundingBackend};

/// Rounding direction requested from a scalar kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Round {
    /// Toward negative infinity.
    Down,
    /// Toward positive infinity.
    Up,
    /// To nearest, ties to even.
    Nearest,
    /// Toward zero.
    ToZero,
}

impl Round {
    /// Returns the opposite directed rounding. Nearest and toward-zero are
    /// their own opposites for the purposes of reciprocal-style rewrites.
    pub fn flip(self) -> Self {
        match self {
            Round::Down => Round::Up,
            Round::Up => Round::Down,
            Round::Nearest => Round::Nearest,
            Round::ToZero => Round::ToZero,
        }
    }
}

/// Bound type contract: a floating-point scalar with directed operations.
///
/// Implemented for `f64` (natively) and `f32` (by widening to `f64`,
/// operating there, and rounding back out in the requested direction). An
/// exact bound type would set [`RoundedOps::EXACT`], which forces the naive
/// matrix-multiply path since no rounding error exists to compensate for.
pub trait RoundedOps:
    Copy + PartialEq + PartialOrd + core::fmt::Debug + core::fmt::Display + Send + Sync + 'static
{
    /// True when arithmetic on this type is exact (no directed rounding).
    const EXACT: bool;
    /// Additive identity.
    const ZERO: Self;
    /// Multiplicative identity.
    const ONE: Self;
    /// Positive infinity.
    const INFINITY: Self;
    /// Negative infinity.
    const NEG_INFINITY: Self;
    /// Quiet NaN.
    const NAN: Self;
    /// Largest finite value.
    const MAX_FINITE: Self;
    /// Largest representable value strictly below pi.
    const PI_LO: Self;
    /// Smallest representable value strictly above pi.
    const PI_HI: Self;
    /// Largest representable value strictly below pi/2.
    const HALF_PI_LO: Self;
    /// Smallest representable value strictly above pi/2.
    const HALF_PI_HI: Self;
    /// Largest representable value strictly below 2*pi.
    const TWO_PI_LO: Self;
    /// Smallest representable value strictly above 2*pi.
    const TWO_PI_HI: Self;

    /// True for NaN.
    fn is_nan(self) -> bool;
    /// True for finite values.
    fn is_finite(self) -> bool;
    /// True for either infinity.
    fn is_infinite(self) -> bool;
    /// Sign test including negative zero.
    fn is_sign_negative(self) -> bool;
    /// Exact negation.
    fn neg(self) -> Self;
    /// Exact absolute value.
    fn abs(self) -> Self;
    /// Minimum ignoring NaN payload questions.
    fn min_val(self, other: Self) -> Self;
    /// Maximum ignoring NaN payload questions.
    fn max_val(self, other: Self) -> Self;
    /// Next representable value toward positive infinity.
    fn next_up(self) -> Self;
    /// Next representable value toward negative infinity.
    fn next_down(self) -> Self;
    /// Exact widening conversion to binary64.
    fn to_f64(self) -> f64;
    /// Directed narrowing conversion from binary64.
    fn from_f64_dir(value: f64, dir: Round) -> Self;

    /// Directed addition.
    fn add_dir(self, rhs: Self, dir: Round) -> Self;
    /// Directed subtraction.
    fn sub_dir(self, rhs: Self, dir: Round) -> Self;
    /// Directed multiplication.
    fn mul_dir(self, rhs: Self, dir: Round) -> Self;
    /// Directed division.
    fn div_dir(self, rhs: Self, dir: Round) -> Self;
    /// Directed fused multiply-add `self * b + c`.
    fn fma_dir(self, b: Self, c: Self, dir: Round) -> Self;
    /// Directed square root.
    fn sqrt_dir(self, dir: Round) -> Self;
    /// Directed reciprocal.
    fn recip_dir(self, dir: Round) -> Self {
        Self::ONE.div_dir(self, dir)
    }
    /// Directed power with a real exponent.
    fn pow_dir(self, y: Self, dir: Round) -> Self;
    /// Directed power with a non-negative integer exponent, evaluated by
    /// binary exponentiation with a directed rounding per multiply.
    fn pow_int_dir(self, n: u32, dir: Round) -> Self;
    /// Directed n-th root.
    fn rootn_dir(self, n: u32, dir: Round) -> Self;
    /// Directed two-argument arctangent, `self` being the ordinate.
    fn atan2_dir(self, x: Self, dir: Round) -> Self;

    /// Directed exponential.
    fn exp_dir(self, dir: Round) -> Self;
    /// Directed base-2 exponential.
    fn exp2_dir(self, dir: Round) -> Self;
    /// Directed base-10 exponential.
    fn exp10_dir(self, dir: Round) -> Self;
    /// Directed `exp(x) - 1`.
    fn expm1_dir(self, dir: Round) -> Self;
    /// Directed natural logarithm.
    fn log_dir(self, dir: Round) -> Self;
    /// Directed base-2 logarithm.
    fn log2_dir(self, dir: Round) -> Self;
    /// Directed base-10 logarithm.
    fn log10_dir(self, dir: Round) -> Self;
    /// Directed `log(1 + x)`.
    fn log1p_dir(self, dir: Round) -> Self;
    /// Directed sine.
    fn sin_dir(self, dir: Round) -> Self;
    /// Directed cosine.
    fn cos_dir(self, dir: Round) -> Self;
    /// Directed tangent.
    fn tan_dir(self, dir: Round) -> Self;
    /// Directed arcsine.
    fn asin_dir(self, dir: Round) -> Self;
    /// Directed arccosine.
    fn acos_dir(self, dir: Round) -> Self;
    /// Directed arctangent.
    fn atan_dir(self, dir: Round) -> Self;
    /// Directed hyperbolic sine.
    fn sinh_dir(self, dir: Round) -> Self;
    /// Directed hyperbolic cosine.
    fn cosh_dir(self, dir: Round) -> Self;
    /// Directed hyperbolic tangent.
    fn tanh_dir(self, dir: Round) -> Self;
    /// Directed inverse hyperbolic sine.
    fn asinh_dir(self, dir: Round) -> Self;
    /// Directed inverse hyperbolic cosine.
    fn acosh_dir(self, dir: Round) -> Self;
    /// Directed inverse hyperbolic tangent.
    fn atanh_dir(self, dir: Round) -> Self;
}

/// Knuth two-sum residual: the exact value of `a + b - fl(a + b)`.
fn two_sum_err(a: f64, b: f64) -> f64 {
    let s = a + b;
    let bb = s - a;
    (a - (s - bb)) + (b - bb)
}

/// Splits `a + b` into the rounded sum and the exact residual.
fn two_sum(a: f64, b: f64) -> (f64, f64) {
    (a + b, two_sum_err(a, b))
}

/// Splits `a * b` into the rounded product and the exact residual.
fn two_prod(a: f64, b: f64) -> (f64, f64) {
    let p = a * b;
    (p, a.mul_add(b, -p))
}

/// Moves one ULP in the requested direction. Nearest is the identity.
fn nudge(v: f64, dir: Round) -> f64 {
    if v.is_nan() {
        return v;
    }
    match dir {
        Round::Nearest => v,
        Round::Up => v.next_up(),
        Round::Down => v.next_down(),
        Round::ToZero => {
            if v > 0.0 {
                v.next_down()
            } else if v < 0.0 {
                v.next_up()
            } else {
                v
            }
        }
    }
}

/// Replaces an overflowed nearest result by the finite bound the direction
/// must not overshoot: rounding a finite real down cannot yield +inf.
fn clamp_overflow(s: f64, dir: Round) -> f64 {
    debug_assert!(s.is_infinite());
    match dir {
        Round::Nearest => s,
        Round::Up => {
            if s > 0.0 {
                s
            } else {
                f64::MIN
            }
        }
        Round::Down => {
            if s > 0.0 {
                f64::MAX
            } else {
                s
            }
        }
        Round::ToZero => {
            if s > 0.0 {
                f64::MAX
            } else {
                f64::MIN
            }
        }
    }
}

/// Applies the direction to a nearest result given the sign of the exact
/// residual `true - nearest` (positive means the true value is above).
fn directed(nearest: f64, err_sign: f64, dir: Round) -> f64 {
    match dir {
        Round::Nearest => nearest,
        Round::Up => {
            if err_sign > 0.0 {
                nearest.next_up()
            } else {
                nearest
            }
        }
        Round::Down => {
            if err_sign < 0.0 {
                nearest.next_down()
            } else {
                nearest
            }
        }
        Round::ToZero => {
            if nearest > 0.0 {
                directed(nearest, err_sign, Round::Down)
            } else if nearest < 0.0 {
                directed(nearest, err_sign, Round::Up)
            } else {
                nearest
            }
        }
    }
}

fn widened() -> bool {
    rounding_backend() == RoundingBackend::None
}

/// Faithful-contract wrapper: widens a nearest libm result one ULP in the
/// requested direction, clamping overflow artefacts of finite inputs.
fn faithful(nearest: f64, input_finite: bool, dir: Round) -> f64 {
    if nearest.is_nan() {
        return nearest;
    }
    if nearest.is_infinite() && input_finite {
        return clamp_overflow(nearest, dir);
    }
    if nearest.is_infinite() {
        return nearest;
    }
    nudge(nearest, dir)
}

impl RoundedOps for f64 {
    const EXACT: bool = false;
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const INFINITY: Self = f64::INFINITY;
    const NEG_INFINITY: Self = f64::NEG_INFINITY;
    const NAN: Self = f64::NAN;
    const MAX_FINITE: Self = f64::MAX;
    const PI_LO: Self = core::f64::consts::PI;
    const PI_HI: Self = 3.141_592_653_589_793_6;
    const HALF_PI_LO: Self = core::f64::consts::FRAC_PI_2;
    const HALF_PI_HI: Self = 1.570_796_326_794_896_8;
    const TWO_PI_LO: Self = 6.283_185_307_179_586;
    const TWO_PI_HI: Self = 6.283_185_307_179_587;

    fn is_nan(self) -> bool {
        f64::is_nan(self)
    }
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }
    fn is_infinite(self) -> bool {
        f64::is_infinite(self)
    }
    fn is_sign_negative(self) -> bool {
        f64::is_sign_negative(self)
    }
    fn neg(self) -> Self {
        -self
    }
    fn abs(self) -> Self {
        f64::abs(self)
    }
    fn min_val(self, other: Self) -> Self {
        f64::min(self, other)
    }
    fn max_val(self, other: Self) -> Self {
        f64::max(self, other)
    }
    fn next_up(self) -> Self {
        f64::next_up(self)
    }
    fn next_down(self) -> Self {
        f64::next_down(self)
    }
    fn to_f64(self) -> f64 {
        self
    }
    fn from_f64_dir(value: f64, _dir: Round) -> Self {
        value
    }

    fn add_dir(self, rhs: Self, dir: Round) -> Self {
        let s = self + rhs;
        if s.is_nan() {
            return s;
        }
        if s.is_infinite() {
            if self.is_infinite() || rhs.is_infinite() {
                return s;
            }
            return clamp_overflow(s, dir);
        }
        if widened() {
            return nudge(s, dir);
        }
        directed(s, two_sum_err(self, rhs), dir)
    }

    fn sub_dir(self, rhs: Self, dir: Round) -> Self {
        self.add_dir(-rhs, dir)
    }

    fn mul_dir(self, rhs: Self, dir: Round) -> Self {
        let p = self * rhs;
        if p.is_nan() {
            return p;
        }
        if p.is_infinite() {
            if self.is_infinite() || rhs.is_infinite() {
                return p;
            }
            return clamp_overflow(p, dir);
        }
        if widened() {
            return nudge(p, dir);
        }
        if self == 0.0 || rhs == 0.0 {
            return p;
        }
        if p == 0.0 || p.is_subnormal() {
            // The product residual is no longer exact near underflow.
            return nudge(p, dir);
        }
        directed(p, self.mul_add(rhs, -p), dir)
    }

    fn div_dir(self, rhs: Self, dir: Round) -> Self {
        let q = self / rhs;
        if q.is_nan() {
            return q;
        }
        if rhs.is_infinite() || rhs == 0.0 {
            return q;
        }
        if q.is_infinite() {
            if self.is_infinite() {
                return q;
            }
            return clamp_overflow(q, dir);
        }
        if widened() {
            return nudge(q, dir);
        }
        if self == 0.0 {
            return q;
        }
        if q == 0.0 || q.is_subnormal() {
            return nudge(q, dir);
        }
        let r = q.mul_add(rhs, -self);
        if r == 0.0 {
            return q;
        }
        let above = (r < 0.0) == (rhs > 0.0);
        directed(q, if above { 1.0 } else { -1.0 }, dir)
    }

    fn fma_dir(self, b: Self, c: Self, dir: Round) -> Self {
        let r = self.mul_add(b, c);
        if r.is_nan() {
            return r;
        }
        if r.is_infinite() {
            if self.is_infinite() || b.is_infinite() || c.is_infinite() {
                return r;
            }
            return clamp_overflow(r, dir);
        }
        if widened() {
            return nudge(r, dir);
        }
        if r == 0.0 || r.is_subnormal() {
            if (self == 0.0 || b == 0.0) && c == 0.0 {
                return r;
            }
            return nudge(r, dir);
        }
        // Boldo-Muller exact fma residual.
        let (u1, u2) = two_prod(self, b);
        if !u1.is_finite() {
            return nudge(r, dir);
        }
        let (a1, a2) = two_sum(c, u2);
        let (b1, b2) = two_sum(u1, a1);
        let g = (b1 - r) + b2;
        let (r2, r3) = two_sum(g, a2);
        let err = if r2 != 0.0 { r2 } else { r3 };
        directed(r, err, dir)
    }

    fn sqrt_dir(self, dir: Round) -> Self {
        if self < 0.0 {
            return f64::NAN;
        }
        let s = self.sqrt();
        if s.is_nan() || s.is_infinite() || self == 0.0 {
            return s;
        }
        if widened() {
            return nudge(s, dir);
        }
        // true - s has the sign of a - s^2.
        directed(s, -s.mul_add(s, -self), dir)
    }

    fn pow_dir(self, y: Self, dir: Round) -> Self {
        if y == 0.0 || self == 1.0 {
            return 1.0;
        }
        if self.is_nan() || y.is_nan() {
            return f64::NAN;
        }
        if y == 1.0 {
            return self;
        }
        if self == 0.0 {
            return if y > 0.0 { 0.0 } else { f64::INFINITY };
        }
        faithful(self.powf(y), self.is_finite() && y.is_finite(), dir)
    }

    fn pow_int_dir(self, n: u32, dir: Round) -> Self {
        match n {
            0 => return 1.0,
            1 => return self,
            _ => {}
        }
        if self < 0.0 {
            return if n % 2 == 0 {
                (-self).pow_int_dir(n, dir)
            } else {
                (-self).pow_int_dir(n, dir.flip()).neg()
            };
        }
        // Non-negative base: directed multiplies compose monotonically.
        let mut acc = 1.0f64;
        let mut base = self;
        let mut exp = n;
        loop {
            if exp & 1 == 1 {
                acc = acc.mul_dir(base, dir);
            }
            exp >>= 1;
            if exp == 0 {
                break;
            }
            base = base.mul_dir(base, dir);
        }
        acc
    }

    fn rootn_dir(self, n: u32, dir: Round) -> Self {
        match n {
            0 => return f64::NAN,
            1 => return self,
            2 => return self.sqrt_dir(dir),
            _ => {}
        }
        if self < 0.0 {
            if n % 2 == 0 {
                return f64::NAN;
            }
            return (-self).rootn_dir(n, dir.flip()).neg();
        }
        if self == 0.0 || self == 1.0 || self.is_infinite() {
            return self;
        }
        // exp(log(x) / n) with every step directed keeps the chain sound.
        self.log_dir(dir).div_dir(n as f64, dir).exp_dir(dir)
    }

    fn atan2_dir(self, x: Self, dir: Round) -> Self {
        if self == 0.0 && x > 0.0 {
            return 0.0;
        }
        faithful(self.atan2(x), true, dir)
    }

    fn exp_dir(self, dir: Round) -> Self {
        if self == 0.0 {
            return 1.0;
        }
        faithful(self.exp(), self.is_finite(), dir)
    }
    fn exp2_dir(self, dir: Round) -> Self {
        if self == 0.0 {
            return 1.0;
        }
        faithful(self.exp2(), self.is_finite(), dir)
    }
    fn exp10_dir(self, dir: Round) -> Self {
        if self == 0.0 {
            return 1.0;
        }
        faithful(10.0f64.powf(self), self.is_finite(), dir)
    }
    fn expm1_dir(self, dir: Round) -> Self {
        if self == 0.0 {
            return 0.0;
        }
        faithful(self.exp_m1(), self.is_finite(), dir)
    }
    fn log_dir(self, dir: Round) -> Self {
        if self == 1.0 {
            return 0.0;
        }
        faithful(self.ln(), true, dir)
    }
    fn log2_dir(self, dir: Round) -> Self {
        if self == 1.0 {
            return 0.0;
        }
        faithful(self.log2(), true, dir)
    }
    fn log10_dir(self, dir: Round) -> Self {
        if self == 1.0 {
            return 0.0;
        }
        faithful(self.log10(), true, dir)
    }
    fn log1p_dir(self, dir: Round) -> Self {
        if self == 0.0 {
            return 0.0;
        }
        faithful(self.ln_1p(), true, dir)
    }
    fn sin_dir(self, dir: Round) -> Self {
        if self == 0.0 {
            return 0.0;
        }
        faithful(self.sin(), true, dir)
    }
    fn cos_dir(self, dir: Round) -> Self {
        if self == 0.0 {
            return 1.0;
        }
        faithful(self.cos(), true, dir)
    }
    fn tan_dir(self, dir: Round) -> Self {
        if self == 0.0 {
            return 0.0;
        }
        faithful(self.tan(), true, dir)
    }
    fn asin_dir(self, dir: Round) -> Self {
        if self == 0.0 {
            return 0.0;
        }
        faithful(self.asin(), true, dir)
    }
    fn acos_dir(self, dir: Round) -> Self {
        if self == 1.0 {
            return 0.0;
        }
        faithful(self.acos(), true, dir)
    }
    fn atan_dir(self, dir: Round) -> Self {
        if self == 0.0 {
            return 0.0;
        }
        faithful(self.atan(), true, dir)
    }
    fn sinh_dir(self, dir: Round) -> Self {
        if self == 0.0 {
            return 0.0;
        }
        faithful(self.sinh(), self.is_finite(), dir)
    }
    fn cosh_dir(self, dir: Round) -> Self {
        if self == 0.0 {
            return 1.0;
        }
        faithful(self.cosh(), self.is_finite(), dir)
    }
    fn tanh_dir(self, dir: Round) -> Self {
        if self == 0.0 {
            return 0.0;
        }
        faithful(self.tanh(), true, dir)
    }
    fn asinh_dir(self, dir: Round) -> Self {
        if self == 0.0 {
            return 0.0;
        }
        faithful(self.asinh(), true, dir)
    }
    fn acosh_dir(self, dir: Round) -> Self {
        if self == 1.0 {
            return 0.0;
        }
        faithful(self.acosh(), true, dir)
    }
    fn atanh_dir(self, dir: Round) -> Self {
        if self == 0.0 {
            return 0.0;
        }
        faithful(self.atanh(), true, dir)
    }
}

/// Directed narrowing of a binary64 value to binary32.
fn narrow(value: f64, dir: Round) -> f32 {
    if value.is_nan() {
        return f32::NAN;
    }
    let c = value as f32;
    if f64::from(c) == value {
        return c;
    }
    match dir {
        Round::Nearest => c,
        Round::Up => {
            if f64::from(c) < value {
                c.next_up()
            } else {
                c
            }
        }
        Round::Down => {
            if f64::from(c) > value {
                c.next_down()
            } else {
                c
            }
        }
        Round::ToZero => {
            if value > 0.0 {
                narrow(value, Round::Down)
            } else {
                narrow(value, Round::Up)
            }
        }
    }
}

impl RoundedOps for f32 {
    const EXACT: bool = false;
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;
    const INFINITY: Self = f32::INFINITY;
    const NEG_INFINITY: Self = f32::NEG_INFINITY;
    const NAN: Self = f32::NAN;
    const MAX_FINITE: Self = f32::MAX;
    const PI_LO: Self = 3.141_592_5;
    const PI_HI: Self = core::f32::consts::PI;
    const HALF_PI_LO: Self = 1.570_796_3;
    const HALF_PI_HI: Self = core::f32::consts::FRAC_PI_2;
    const TWO_PI_LO: Self = 6.283_185;
    const TWO_PI_HI: Self = 6.283_185_5;

    fn is_nan(self) -> bool {
        f32::is_nan(self)
    }
    fn is_finite(self) -> bool {
        f32::is_finite(self)
    }
    fn is_infinite(self) -> bool {
        f32::is_infinite(self)
    }
    fn is_sign_negative(self) -> bool {
        f32::is_sign_negative(self)
    }
    fn neg(self) -> Self {
        -self
    }
    fn abs(self) -> Self {
        f32::abs(self)
    }
    fn min_val(self, other: Self) -> Self {
        f32::min(self, other)
    }
    fn max_val(self, other: Self) -> Self {
        f32::max(self, other)
    }
    fn next_up(self) -> Self {
        f32::next_up(self)
    }
    fn next_down(self) -> Self {
        f32::next_down(self)
    }
    fn to_f64(self) -> f64 {
        f64::from(self)
    }
    fn from_f64_dir(value: f64, dir: Round) -> Self {
        narrow(value, dir)
    }

    fn add_dir(self, rhs: Self, dir: Round) -> Self {
        narrow(self.to_f64().add_dir(rhs.to_f64(), dir), dir)
    }
    fn sub_dir(self, rhs: Self, dir: Round) -> Self {
        narrow(self.to_f64().sub_dir(rhs.to_f64(), dir), dir)
    }
    fn mul_dir(self, rhs: Self, dir: Round) -> Self {
        narrow(self.to_f64().mul_dir(rhs.to_f64(), dir), dir)
    }
    fn div_dir(self, rhs: Self, dir: Round) -> Self {
        narrow(self.to_f64().div_dir(rhs.to_f64(), dir), dir)
    }
    fn fma_dir(self, b: Self, c: Self, dir: Round) -> Self {
        narrow(self.to_f64().fma_dir(b.to_f64(), c.to_f64(), dir), dir)
    }
    fn sqrt_dir(self, dir: Round) -> Self {
        narrow(self.to_f64().sqrt_dir(dir), dir)
    }
    fn pow_dir(self, y: Self, dir: Round) -> Self {
        narrow(self.to_f64().pow_dir(y.to_f64(), dir), dir)
    }
    fn pow_int_dir(self, n: u32, dir: Round) -> Self {
        narrow(self.to_f64().pow_int_dir(n, dir), dir)
    }
    fn rootn_dir(self, n: u32, dir: Round) -> Self {
        narrow(self.to_f64().rootn_dir(n, dir), dir)
    }
    fn atan2_dir(self, x: Self, dir: Round) -> Self {
        narrow(self.to_f64().atan2_dir(x.to_f64(), dir), dir)
    }
    fn exp_dir(self, dir: Round) -> Self {
        narrow(self.to_f64().exp_dir(dir), dir)
    }
    fn exp2_dir(self, dir: Round) -> Self {
        narrow(self.to_f64().exp2_dir(dir), dir)
    }
    fn exp10_dir(self, dir: Round) -> Self {
        narrow(self.to_f64().exp10_dir(dir), dir)
    }
    fn expm1_dir(self, dir: Round) -> Self {
        narrow(self.to_f64().expm1_dir(dir), dir)
    }
    fn log_dir(self, dir: Round) -> Self {
        narrow(self.to_f64().log_dir(dir), dir)
    }
    fn log2_dir(self, dir: Round) -> Self {
        narrow(self.to_f64().log2_dir(dir), dir)
    }
    fn log10_dir(self, dir: Round) -> Self {
        narrow(self.to_f64().log10_dir(dir), dir)
    }
    fn log1p_dir(self, dir: Round) -> Self {
        narrow(self.to_f64().log1p_dir(dir), dir)
    }
    fn sin_dir(self, dir: Round) -> Self {
        narrow(self.to_f64().sin_dir(dir), dir)
    }
    fn cos_dir(self, dir: Round) -> Self {
        narrow(self.to_f64().cos_dir(dir), dir)
    }
    fn tan_dir(self, dir: Round) -> Self {
        narrow(self.to_f64().tan_dir(dir), dir)
    }
    fn asin_dir(self, dir: Round) -> Self {
        narrow(self.to_f64().asin_dir(dir), dir)
    }
    fn acos_dir(self, dir: Round) -> Self {
        narrow(self.to_f64().acos_dir(dir), dir)
    }
    fn atan_dir(self, dir: Round) -> Self {
        narrow(self.to_f64().atan_dir(dir), dir)
    }
    fn sinh_dir(self, dir: Round) -> Self {
        narrow(self.to_f64().sinh_dir(dir), dir)
    }
    fn cosh_dir(self, dir: Round) -> Self {
        narrow(self.to_f64().cosh_dir(dir), dir)
    }
    fn tanh_dir(self, dir: Round) -> Self {
        narrow(self.to_f64().tanh_dir(dir), dir)
    }
    fn asinh_dir(self, dir: Round) -> Self {
        narrow(self.to_f64().asinh_dir(dir), dir)
    }
    fn acosh_dir(self, dir: Round) -> Self {
        narrow(self.to_f64().acosh_dir(dir), dir)
    }
    fn atanh_dir(self, dir: Round) -> Self {
        narrow(self.to_f64().atanh_dir(dir), dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pi_enclosures_are_one_ulp() {
        assert_eq!(f64::PI_HI, f64::PI_LO.next_up());
        assert_eq!(f64::HALF_PI_HI, f64::HALF_PI_LO.next_up());
        assert_eq!(f64::TWO_PI_HI, f64::TWO_PI_LO.next_up());
        assert_eq!(f32::PI_HI, f32::PI_LO.next_up());
        assert_eq!(f32::HALF_PI_HI, f32::HALF_PI_LO.next_up());
        assert_eq!(f32::TWO_PI_HI, f32::TWO_PI_LO.next_up());
    }

    #[test]
    fn directed_add_brackets_nearest() {
        let pairs = [(0.1, 0.2), (1e300, 1e300), (-3.5, 7.25), (1.0, 1e-30)];
        for (a, b) in pairs {
            let down = a.add_dir(b, Round::Down);
            let up = a.add_dir(b, Round::Up);
            assert!(down <= a + b || !(a + b).is_finite());
            assert!(up >= a + b || !(a + b).is_finite());
            assert!(up == down || up == down.next_up());
        }
    }

    #[test]
    fn exact_operations_stay_exact() {
        assert_eq!(1.0f64.add_dir(2.0, Round::Up), 3.0);
        assert_eq!(1.0f64.add_dir(2.0, Round::Down), 3.0);
        assert_eq!(3.0f64.mul_dir(3.0, Round::Up), 9.0);
        assert_eq!(4.0f64.sqrt_dir(Round::Down), 2.0);
        assert_eq!(1.0f64.div_dir(4.0, Round::Up), 0.25);
    }

    #[test]
    fn overflow_clamps_to_the_sound_side() {
        assert_eq!(f64::MAX.add_dir(f64::MAX, Round::Down), f64::MAX);
        assert_eq!(f64::MAX.add_dir(f64::MAX, Round::Up), f64::INFINITY);
        assert_eq!((-f64::MAX).add_dir(-f64::MAX, Round::Up), f64::MIN);
    }

    #[test]
    fn division_rounds_toward_the_requested_side() {
        let down = 1.0f64.div_dir(3.0, Round::Down);
        let up = 1.0f64.div_dir(3.0, Round::Up);
        assert!(down < up);
        assert_eq!(up, down.next_up());
        assert!(down * 3.0 <= 1.0);
        assert!(up * 3.0 >= 1.0);
    }

    #[test]
    fn integer_powers_bracket_the_true_value() {
        let down = 3.0f64.pow_int_dir(5, Round::Down);
        let up = 3.0f64.pow_int_dir(5, Round::Up);
        assert!(down <= 243.0 && 243.0 <= up);
        let down = (-3.0f64).pow_int_dir(3, Round::Down);
        assert!(down <= -27.0);
    }

    #[test]
    fn narrowing_is_outward() {
        let v = 0.1f64;
        let down = f32::from_f64_dir(v, Round::Down);
        let up = f32::from_f64_dir(v, Round::Up);
        assert!(f64::from(down) <= v && v <= f64::from(up));
        assert_eq!(up, down.next_up());
    }
}
