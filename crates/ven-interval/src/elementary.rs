//! Elementary functions over bare intervals.
//!
//! Monotone functions evaluate directed endpoints. The periodic ones locate
//! interior extrema by testing whether an enclosure of the relevant
//! half-period point meets the input; the test may overestimate containment
//! (widening the result) but never underestimates it.

use ven_core::round::{Round, RoundedOps};

use crate::bare::BareInterval;
use crate::decoration::Decoration;

type Out<F> = (BareInterval<F>, Decoration);

fn empty_out<F: RoundedOps>() -> Out<F> {
    (BareInterval::empty(), Decoration::Trv)
}

/// Directed-endpoint evaluation of a monotonically increasing function.
fn monotone_inc<F: RoundedOps>(a: &BareInterval<F>, f: impl Fn(F, Round) -> F) -> BareInterval<F> {
    BareInterval::raw(f(a.inf(), Round::Down), f(a.sup(), Round::Up))
}

/// Exponential, lower bound clamped to the range floor.
pub fn exp<F: RoundedOps>(a: &BareInterval<F>) -> Out<F> {
    exp_like(a, |x, d| x.exp_dir(d))
}

/// Base-2 exponential.
pub fn exp2<F: RoundedOps>(a: &BareInterval<F>) -> Out<F> {
    exp_like(a, |x, d| x.exp2_dir(d))
}

/// Base-10 exponential.
pub fn exp10<F: RoundedOps>(a: &BareInterval<F>) -> Out<F> {
    exp_like(a, |x, d| x.exp10_dir(d))
}

fn exp_like<F: RoundedOps>(a: &BareInterval<F>, f: impl Fn(F, Round) -> F) -> Out<F> {
    if a.is_empty() {
        return empty_out();
    }
    let raw = monotone_inc(a, f);
    (
        BareInterval::raw(raw.inf().max_val(F::ZERO), raw.sup()),
        Decoration::Com,
    )
}

/// `exp(x) - 1`, lower bound clamped to -1.
pub fn expm1<F: RoundedOps>(a: &BareInterval<F>) -> Out<F> {
    if a.is_empty() {
        return empty_out();
    }
    let raw = monotone_inc(a, |x, d| x.expm1_dir(d));
    (
        BareInterval::raw(raw.inf().max_val(F::ONE.neg()), raw.sup()),
        Decoration::Com,
    )
}

/// Natural logarithm over the clipped domain `(0, inf)`.
pub fn log<F: RoundedOps>(a: &BareInterval<F>) -> Out<F> {
    log_like(a, F::ZERO, |x, d| x.log_dir(d))
}

/// Base-2 logarithm.
pub fn log2<F: RoundedOps>(a: &BareInterval<F>) -> Out<F> {
    log_like(a, F::ZERO, |x, d| x.log2_dir(d))
}

/// Base-10 logarithm.
pub fn log10<F: RoundedOps>(a: &BareInterval<F>) -> Out<F> {
    log_like(a, F::ZERO, |x, d| x.log10_dir(d))
}

/// `log(1 + x)` over the clipped domain `(-1, inf)`.
pub fn log1p<F: RoundedOps>(a: &BareInterval<F>) -> Out<F> {
    log_like(a, F::ONE.neg(), |x, d| x.log1p_dir(d))
}

/// Shared shape of the logarithm family: open domain `(edge, inf)`, the
/// image diverging to `-inf` at the edge.
fn log_like<F: RoundedOps>(
    a: &BareInterval<F>,
    edge: F,
    f: impl Fn(F, Round) -> F,
) -> Out<F> {
    if a.is_empty() {
        return empty_out();
    }
    if a.sup() <= edge {
        return empty_out();
    }
    let cap = if a.inf() <= edge {
        Decoration::Trv
    } else {
        Decoration::Com
    };
    let lo = if a.inf() <= edge {
        F::NEG_INFINITY
    } else {
        f(a.inf(), Round::Down)
    };
    (BareInterval::raw(lo, f(a.sup(), Round::Up)), cap)
}

/// Interval for the full range of sine and cosine.
fn unit_range<F: RoundedOps>() -> BareInterval<F> {
    BareInterval::raw(F::ONE.neg(), F::ONE)
}

/// True when the input is unusable for period arithmetic: unbounded or so
/// large that consecutive floats are further apart than a period.
fn period_blind(alo: f64, ahi: f64) -> bool {
    const LIMIT: f64 = 9.007_199_254_740_992e15; // 2^53
    !alo.is_finite() || !ahi.is_finite() || alo.abs() > LIMIT || ahi.abs() > LIMIT
}

/// Tests whether `k*period + offset` may fall inside `[alo, ahi]`, with the
/// period and offset given as f64 enclosures.
fn hits_point(
    alo: f64,
    ahi: f64,
    k: i64,
    per_lo: f64,
    per_hi: f64,
    off_lo: f64,
    off_hi: f64,
) -> bool {
    let kf = k as f64;
    let (mut p_lo, mut p_hi) = if k >= 0 {
        (kf.mul_dir(per_lo, Round::Down), kf.mul_dir(per_hi, Round::Up))
    } else {
        (kf.mul_dir(per_hi, Round::Down), kf.mul_dir(per_lo, Round::Up))
    };
    p_lo = p_lo.add_dir(off_lo, Round::Down);
    p_hi = p_hi.add_dir(off_hi, Round::Up);
    p_hi >= alo && p_lo <= ahi
}

/// Candidate multiplier range for a given period length.
fn k_range(alo: f64, ahi: f64, period: f64) -> core::ops::RangeInclusive<i64> {
    let k_lo = (alo / period).floor() as i64 - 1;
    let k_hi = (ahi / period).floor() as i64 + 1;
    k_lo..=k_hi
}

/// Sine with interior extrema located modulo the period.
pub fn sin<F: RoundedOps>(a: &BareInterval<F>) -> Out<F> {
    trig(a, |x, d| x.sin_dir(d), f64::HALF_PI_LO, f64::HALF_PI_HI)
}

/// Cosine: a sine with shifted extremum offsets.
pub fn cos<F: RoundedOps>(a: &BareInterval<F>) -> Out<F> {
    if a.is_empty() {
        return empty_out();
    }
    let alo = a.inf().to_f64();
    let ahi = a.sup().to_f64();
    if period_blind(alo, ahi) || ahi.sub_dir(alo, Round::Down) >= f64::TWO_PI_HI {
        return (unit_range(), Decoration::Com);
    }
    let mut has_max = false;
    let mut has_min = false;
    for k in k_range(alo, ahi, f64::TWO_PI_LO) {
        if !has_max && hits_point(alo, ahi, k, f64::TWO_PI_LO, f64::TWO_PI_HI, 0.0, 0.0) {
            has_max = true;
        }
        if !has_min
            && hits_point(alo, ahi, k, f64::TWO_PI_LO, f64::TWO_PI_HI, f64::PI_LO, f64::PI_HI)
        {
            has_min = true;
        }
    }
    let f = |x: F, d: Round| x.cos_dir(d);
    finish_trig(a, f, has_min, has_max)
}

/// Shared sine-shaped body: extrema at `±offset + 2k*pi`.
fn trig<F: RoundedOps>(
    a: &BareInterval<F>,
    f: impl Fn(F, Round) -> F,
    off_lo: f64,
    off_hi: f64,
) -> Out<F> {
    if a.is_empty() {
        return empty_out();
    }
    let alo = a.inf().to_f64();
    let ahi = a.sup().to_f64();
    if period_blind(alo, ahi) || ahi.sub_dir(alo, Round::Down) >= f64::TWO_PI_HI {
        return (unit_range(), Decoration::Com);
    }
    let mut has_max = false;
    let mut has_min = false;
    for k in k_range(alo, ahi, f64::TWO_PI_LO) {
        if !has_max && hits_point(alo, ahi, k, f64::TWO_PI_LO, f64::TWO_PI_HI, off_lo, off_hi) {
            has_max = true;
        }
        if !has_min
            && hits_point(alo, ahi, k, f64::TWO_PI_LO, f64::TWO_PI_HI, -off_hi, -off_lo)
        {
            has_min = true;
        }
    }
    finish_trig(a, f, has_min, has_max)
}

fn finish_trig<F: RoundedOps>(
    a: &BareInterval<F>,
    f: impl Fn(F, Round) -> F,
    has_min: bool,
    has_max: bool,
) -> Out<F> {
    let lo = if has_min {
        F::ONE.neg()
    } else {
        f(a.inf(), Round::Down)
            .min_val(f(a.sup(), Round::Down))
            .max_val(F::ONE.neg())
    };
    let hi = if has_max {
        F::ONE
    } else {
        f(a.inf(), Round::Up)
            .max_val(f(a.sup(), Round::Up))
            .min_val(F::ONE)
    };
    (BareInterval::raw(lo, hi), Decoration::Com)
}

/// Tangent: entire with a trivial decoration whenever a pole enclosure meets
/// the input.
pub fn tan<F: RoundedOps>(a: &BareInterval<F>) -> Out<F> {
    if a.is_empty() {
        return empty_out();
    }
    let alo = a.inf().to_f64();
    let ahi = a.sup().to_f64();
    if period_blind(alo, ahi) || ahi.sub_dir(alo, Round::Down) >= f64::PI_HI {
        return (BareInterval::entire(), Decoration::Trv);
    }
    for k in k_range(alo, ahi, f64::PI_LO) {
        if hits_point(
            alo,
            ahi,
            k,
            f64::PI_LO,
            f64::PI_HI,
            f64::HALF_PI_LO,
            f64::HALF_PI_HI,
        ) {
            return (BareInterval::entire(), Decoration::Trv);
        }
    }
    (
        monotone_inc(a, |x, d| x.tan_dir(d)),
        Decoration::Com,
    )
}

/// Arcsine over the clipped domain `[-1, 1]`.
pub fn asin<F: RoundedOps>(a: &BareInterval<F>) -> Out<F> {
    let (d, cap) = clip_sym_domain(a);
    match d {
        None => empty_out(),
        Some(d) => (monotone_inc(&d, |x, dir| x.asin_dir(dir)), cap),
    }
}

/// Arccosine over the clipped domain `[-1, 1]` (decreasing).
pub fn acos<F: RoundedOps>(a: &BareInterval<F>) -> Out<F> {
    let (d, cap) = clip_sym_domain(a);
    match d {
        None => empty_out(),
        Some(d) => (
            BareInterval::raw(
                d.sup().acos_dir(Round::Down).max_val(F::ZERO),
                d.inf().acos_dir(Round::Up),
            ),
            cap,
        ),
    }
}

fn clip_sym_domain<F: RoundedOps>(a: &BareInterval<F>) -> (Option<BareInterval<F>>, Decoration) {
    if a.is_empty() {
        return (None, Decoration::Trv);
    }
    let dom = BareInterval::raw(F::ONE.neg(), F::ONE);
    let d = a.intersection(&dom);
    if d.is_empty() {
        return (None, Decoration::Trv);
    }
    let cap = if a.subset_of(&dom) {
        Decoration::Com
    } else {
        Decoration::Trv
    };
    (Some(d), cap)
}

/// Arctangent.
pub fn atan<F: RoundedOps>(a: &BareInterval<F>) -> Out<F> {
    if a.is_empty() {
        return empty_out();
    }
    (monotone_inc(a, |x, d| x.atan_dir(d)), Decoration::Com)
}

/// Hyperbolic sine.
pub fn sinh<F: RoundedOps>(a: &BareInterval<F>) -> Out<F> {
    if a.is_empty() {
        return empty_out();
    }
    (monotone_inc(a, |x, d| x.sinh_dir(d)), Decoration::Com)
}

/// Hyperbolic cosine, minimised at zero.
pub fn cosh<F: RoundedOps>(a: &BareInterval<F>) -> Out<F> {
    if a.is_empty() {
        return empty_out();
    }
    let out = if a.contains_zero() {
        BareInterval::raw(F::ONE, a.mag().cosh_dir(Round::Up))
    } else {
        BareInterval::raw(
            a.mig().cosh_dir(Round::Down),
            a.mag().cosh_dir(Round::Up),
        )
    };
    (out, Decoration::Com)
}

/// Hyperbolic tangent, clamped to `(-1, 1)` closure.
pub fn tanh<F: RoundedOps>(a: &BareInterval<F>) -> Out<F> {
    if a.is_empty() {
        return empty_out();
    }
    let raw = monotone_inc(a, |x, d| x.tanh_dir(d));
    (
        BareInterval::raw(
            raw.inf().max_val(F::ONE.neg()),
            raw.sup().min_val(F::ONE),
        ),
        Decoration::Com,
    )
}

/// Inverse hyperbolic sine.
pub fn asinh<F: RoundedOps>(a: &BareInterval<F>) -> Out<F> {
    if a.is_empty() {
        return empty_out();
    }
    (monotone_inc(a, |x, d| x.asinh_dir(d)), Decoration::Com)
}

/// Inverse hyperbolic cosine over the clipped domain `[1, inf)`.
pub fn acosh<F: RoundedOps>(a: &BareInterval<F>) -> Out<F> {
    if a.is_empty() {
        return empty_out();
    }
    if a.sup() < F::ONE {
        return empty_out();
    }
    let cap = if a.inf() < F::ONE {
        Decoration::Trv
    } else {
        Decoration::Com
    };
    let lo = a.inf().max_val(F::ONE);
    (
        BareInterval::raw(
            lo.acosh_dir(Round::Down).max_val(F::ZERO),
            a.sup().acosh_dir(Round::Up),
        ),
        cap,
    )
}

/// Inverse hyperbolic tangent over the open domain `(-1, 1)`.
pub fn atanh<F: RoundedOps>(a: &BareInterval<F>) -> Out<F> {
    if a.is_empty() {
        return empty_out();
    }
    if a.sup() <= F::ONE.neg() || a.inf() >= F::ONE {
        return empty_out();
    }
    let cap = if a.inf() <= F::ONE.neg() || a.sup() >= F::ONE {
        Decoration::Trv
    } else {
        Decoration::Com
    };
    let lo = if a.inf() <= F::ONE.neg() {
        F::NEG_INFINITY
    } else {
        a.inf().atanh_dir(Round::Down)
    };
    let hi = if a.sup() >= F::ONE {
        F::INFINITY
    } else {
        a.sup().atanh_dir(Round::Up)
    };
    (BareInterval::raw(lo, hi), cap)
}

/// Two-argument arctangent by quadrant analysis. Boxes meeting the branch
/// cut or the origin fall back to `[-pi, pi]` with a trivial decoration.
pub fn atan2<F: RoundedOps>(y: &BareInterval<F>, x: &BareInterval<F>) -> Out<F> {
    if y.is_empty() || x.is_empty() {
        return empty_out();
    }
    if x.inf() > F::ZERO {
        let corners = [
            (y.inf(), x.inf()),
            (y.inf(), x.sup()),
            (y.sup(), x.inf()),
            (y.sup(), x.sup()),
        ];
        let mut lo = F::INFINITY;
        let mut hi = F::NEG_INFINITY;
        for (yy, xx) in corners {
            lo = lo.min_val(yy.atan2_dir(xx, Round::Down));
            hi = hi.max_val(yy.atan2_dir(xx, Round::Up));
        }
        return (BareInterval::raw(lo, hi), Decoration::Com);
    }
    if y.inf() > F::ZERO {
        // Upper half plane: decreasing in x, monotone in y per sign of x.
        let top = if x.inf() >= F::ZERO { y.sup() } else { y.inf() };
        let bottom = if x.sup() >= F::ZERO { y.inf() } else { y.sup() };
        return (
            BareInterval::raw(
                bottom.atan2_dir(x.sup(), Round::Down),
                top.atan2_dir(x.inf(), Round::Up),
            ),
            Decoration::Com,
        );
    }
    if y.sup() < F::ZERO {
        let (r, cap) = atan2(&y.neg(), x);
        return (r.neg(), cap);
    }
    // The box meets the non-positive x axis.
    (
        BareInterval::raw(F::PI_HI.neg(), F::PI_HI),
        Decoration::Trv,
    )
}
