#![deny(missing_docs)]
#![doc = "Foundation of the ven validated-numerics workspace: structured errors, process-wide numeric policy and directed-rounding scalar kernels."]

pub mod config;
pub mod errors;
pub mod round;

pub use config::{
    configure, current_config, matmul_mode, ng_intrinsic, power_mode, rounding_backend, BoundSel,
    Config, Flavor, MatMulMode, PowerMode, RoundingBackend,
};
pub use errors::{ErrorInfo, VenError};
pub use round::{Round, RoundedOps};
