//! Textual rendering of intervals.

use serde::{Deserialize, Serialize};
use ven_core::round::RoundedOps;

use crate::bare::BareInterval;
use crate::complex::ComplexInterval;
use crate::interval::Interval;

/// Rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FmtStyle {
    /// `[lo, hi]`.
    #[default]
    InfSup,
    /// `m ± r`.
    Midpoint,
    /// Every field spelled out.
    Full,
}

/// Rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FmtOptions {
    /// Rendering style.
    pub style: FmtStyle,
    /// Append the decoration suffix (`_com`, ...).
    pub decorations: bool,
    /// Append a trailing underscore when the NG flag is raised.
    pub ng: bool,
    /// Significant digits per bound.
    pub sig_digits: usize,
}

impl Default for FmtOptions {
    fn default() -> Self {
        Self {
            style: FmtStyle::InfSup,
            decorations: true,
            ng: true,
            sig_digits: 6,
        }
    }
}

fn sig<F: RoundedOps>(v: F, digits: usize) -> String {
    let v = v.to_f64();
    if v == 0.0 {
        return "0".to_string();
    }
    if !v.is_finite() {
        return format!("{v}");
    }
    let exp = v.abs().log10().floor() as i32;
    if exp.abs() > 8 {
        return format!("{:.*e}", digits.saturating_sub(1), v);
    }
    let decimals = (digits as i32 - 1 - exp).max(0) as usize;
    format!("{v:.decimals$}")
}

/// Renders a decorated interval.
pub fn render<F: RoundedOps>(iv: &Interval<F>, opts: &FmtOptions) -> String {
    if iv.is_nai() {
        return "[nai]".to_string();
    }
    let body = match opts.style {
        FmtStyle::InfSup => {
            if iv.is_empty() {
                "[empty]".to_string()
            } else {
                format!(
                    "[{}, {}]",
                    sig(iv.inf(), opts.sig_digits),
                    sig(iv.sup(), opts.sig_digits)
                )
            }
        }
        FmtStyle::Midpoint => {
            if iv.is_empty() {
                "[empty]".to_string()
            } else {
                format!(
                    "{} ± {}",
                    sig(iv.mid(), opts.sig_digits),
                    sig(iv.rad(), opts.sig_digits)
                )
            }
        }
        FmtStyle::Full => {
            return format!(
                "Interval(lo={}, hi={}, dec={}, ng={})",
                sig(iv.inf(), opts.sig_digits),
                sig(iv.sup(), opts.sig_digits),
                iv.decoration(),
                iv.is_ng()
            );
        }
    };
    let mut out = body;
    if opts.decorations {
        out.push('_');
        out.push_str(iv.decoration().as_str());
    }
    if opts.ng && iv.is_ng() {
        out.push('_');
    }
    out
}

impl<F: RoundedOps> core::fmt::Display for BareInterval<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_empty() {
            return f.write_str("[empty]");
        }
        write!(f, "[{}, {}]", self.inf(), self.sup())
    }
}

impl<F: RoundedOps> core::fmt::Display for Interval<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&render(self, &FmtOptions::default()))
    }
}

impl<F: RoundedOps> core::fmt::Display for ComplexInterval<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_nai() {
            return f.write_str("[nai]");
        }
        let opts = FmtOptions {
            decorations: false,
            ng: false,
            ..FmtOptions::default()
        };
        write!(f, "{} + {}i", render(self.re(), &opts), render(self.im(), &opts))?;
        write!(f, "_{}", self.decoration())?;
        if self.is_ng() {
            f.write_str("_")?;
        }
        Ok(())
    }
}
