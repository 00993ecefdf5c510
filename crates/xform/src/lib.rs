//! Double-precision affine and projective transform matrices.
//!
//! Two value types carry the algebra: [`AffineMatrix2D`] (3x2, optionally
//! projective 3x3) and [`AffineMatrix3D`] (4x4 homogeneous). Both follow the
//! row-vector convention `v' = v·M`, so `a * b` applies `a` first.
//!
//! Failure policy
//! - `invert` and `decompose` are expected to fail on some inputs and report
//!   it in-band (`Option`, `Decomposition::success`).
//! - Bad indices, projection parameters and coefficient lists are caller
//!   errors and surface as [`MatrixError`].
//!
//! Every operation is pure; matrices are `Copy` and `Send + Sync`.

pub mod affine2;
pub mod affine3;
pub mod api;
pub(crate) mod cfg;
pub mod error;
pub mod quat;
pub mod vector;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use affine2::AffineMatrix2D;
pub use affine3::{AffineMatrix3D, Decomposition, Plane};
pub use error::MatrixError;
pub use quat::RotationQuat;
pub use vector::{Vec2, Vec3, Vec4};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::affine2::AffineMatrix2D;
    pub use crate::affine3::{AffineMatrix3D, Decomposition, Plane};
    pub use crate::error::MatrixError;
    pub use crate::quat::RotationQuat;
    pub use crate::vector::{cross2, lerp2, lerp3, lerp4, Vec2, Vec3, Vec4};
    pub use nalgebra::Quaternion;
}
