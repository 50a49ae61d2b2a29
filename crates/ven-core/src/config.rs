//! Process-wide numeric policy.
//!
//! The configuration is a plain value that is snapshotted into atomics by
//! [`configure`]. Scalar kernels read the snapshot with relaxed loads, so the
//! policy must be set before any computation starts; reconfiguring while a
//! matrix operation is in flight is undefined (the kernels may mix policies
//! within one result).

use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

/// Numeric bound type the process defaults to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BoundSel {
    /// IEEE-754 binary64, the default.
    #[default]
    Binary64,
    /// IEEE-754 binary32.
    Binary32,
}

/// IEEE-1788 flavor. Only the set-based flavor is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Flavor {
    /// Set-based flavor of IEEE Std 1788-2015.
    #[default]
    SetBased,
}

/// Which directed-rounding back-end the scalar kernels use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoundingBackend {
    /// Correctly rounded arithmetic core, faithful transcendental contract.
    #[default]
    Correct,
    /// Native nearest results widened one ULP. Raises NG on every result.
    None,
}

/// Exponentiation algorithm for integer powers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PowerMode {
    /// Directed `pow` endpoint evaluation. Tighter, slower.
    Slow,
    /// Binary exponentiation with a directed rounding per multiply.
    #[default]
    Fast,
}

/// Matrix multiplication algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatMulMode {
    /// Naive triple loop over interval fused multiply-adds.
    Slow,
    /// Rump midpoint-radius decomposition over directed float kernels.
    #[default]
    Fast,
}

/// Process-wide numeric policy snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Default element bound type.
    #[serde(default)]
    pub boundtype: BoundSel,
    /// IEEE-1788 flavor.
    #[serde(default)]
    pub flavor: Flavor,
    /// Directed-rounding back-end.
    #[serde(default)]
    pub rounding: RoundingBackend,
    /// Integer power algorithm.
    #[serde(default)]
    pub power: PowerMode,
    /// Matrix multiply algorithm.
    #[serde(default)]
    pub matmul: MatMulMode,
}

static BOUNDTYPE: AtomicU8 = AtomicU8::new(0);
static ROUNDING: AtomicU8 = AtomicU8::new(0);
static POWER: AtomicU8 = AtomicU8::new(1);
static MATMUL: AtomicU8 = AtomicU8::new(1);

/// Installs `config` as the process-wide policy.
pub fn configure(config: &Config) {
    BOUNDTYPE.store(config.boundtype as u8, Ordering::Relaxed);
    ROUNDING.store(config.rounding as u8, Ordering::Relaxed);
    POWER.store(config.power as u8, Ordering::Relaxed);
    MATMUL.store(config.matmul as u8, Ordering::Relaxed);
}

/// Returns the current process-wide policy.
pub fn current_config() -> Config {
    Config {
        boundtype: match BOUNDTYPE.load(Ordering::Relaxed) {
            1 => BoundSel::Binary32,
            _ => BoundSel::Binary64,
        },
        flavor: Flavor::SetBased,
        rounding: rounding_backend(),
        power: power_mode(),
        matmul: matmul_mode(),
    }
}

/// Returns the active directed-rounding back-end.
pub fn rounding_backend() -> RoundingBackend {
    match ROUNDING.load(Ordering::Relaxed) {
        1 => RoundingBackend::None,
        _ => RoundingBackend::Correct,
    }
}

/// Returns the active integer power algorithm.
pub fn power_mode() -> PowerMode {
    match POWER.load(Ordering::Relaxed) {
        0 => PowerMode::Slow,
        _ => PowerMode::Fast,
    }
}

/// Returns the active matrix multiply algorithm.
pub fn matmul_mode() -> MatMulMode {
    match MATMUL.load(Ordering::Relaxed) {
        0 => MatMulMode::Slow,
        _ => MatMulMode::Fast,
    }
}

/// True when the active back-end cannot guarantee enclosure of the exact
/// result, in which case every arithmetic result must raise NG.
pub fn ng_intrinsic() -> bool {
    rounding_backend() == RoundingBackend::None
}
