//! 3D homogeneous transforms (4x4, row-vector convention).
//!
//! Purpose
//! - One value type, `AffineMatrix3D`, with composition, closed-form
//!   determinant and inverse, projection/view/billboard/viewport factories,
//!   and SRT decomposition.
//!
//! Conventions
//! - Vectors are rows: `v' = v·M`, and `a * b` applies `a` first.
//! - Angles are radians; rotations are counterclockwise looking down the
//!   axis toward the origin.
//! - Every operation is pure. Expected failures (`invert`, `decompose`) are
//!   reported in-band; precondition violations return `MatrixError`.
//!
//! Code cross-refs: `crate::quat::RotationQuat`, `crate::cfg`.

mod decompose;
mod factories;
mod matrix;
mod plane;
mod projection;
mod transform;

pub use decompose::Decomposition;
pub use matrix::AffineMatrix3D;
pub use plane::Plane;
