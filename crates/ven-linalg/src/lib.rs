#![deny(missing_docs)]
#![doc = "Verified linear algebra over interval matrices: Rump midpoint-radius multiplication, validated inversion and Gershgorin eigenvalue enclosures."]

/// Verified eigenvalue enclosures.
pub mod eigen;
/// Verified matrix inversion.
pub mod inverse;
/// Interval matrix multiplication kernels.
pub mod matmul;
/// Dense row-major matrix containers.
pub mod matrix;
/// Operator norms.
pub mod norm;

pub use eigen::{ceigenvalues, eigenvalues, EigOpts, Eigenvalue};
pub use inverse::{cinverse, inverse, InvOpts};
pub use matmul::{
    cmatmul, cproduct, cproduct_cp, cproduct_pc, matmul, multiply, product, product_ip,
    product_pi, MatMulOpts, Operand, ProductValue,
};
pub use matrix::{
    complexify, ComplexIntervalMatrix, ComplexPointMatrix, IntervalMatrix, Mat, PointMatrix,
};
pub use norm::{norm_inf, norm_one, MagElement, NormBound};

pub use ven_core::{MatMulMode, VenError};
pub use ven_interval::{ComplexInterval, Decoration, Interval};
