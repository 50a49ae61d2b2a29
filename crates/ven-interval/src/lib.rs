#![deny(missing_docs)]
#![doc = "IEEE Std 1788-2015 set-based intervals with decorations and the not-guaranteed flag, plus rectangular complex intervals."]

/// Undecorated closed intervals and their outward-rounded arithmetic.
pub mod bare;
/// Rectangular complex intervals.
pub mod complex;
/// The decoration lattice.
pub mod decoration;
/// Elementary functions over bare intervals.
pub mod elementary;
/// Textual rendering.
pub mod fmt;
/// Decorated intervals with NG propagation.
pub mod interval;

pub use bare::BareInterval;
pub use complex::ComplexInterval;
pub use decoration::Decoration;
pub use fmt::{render, FmtOptions, FmtStyle};
pub use interval::Interval;

pub use ven_core::{Round, RoundedOps, VenError};
