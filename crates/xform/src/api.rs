//! Flat helpers for the CLI and the Python bindings.
//!
//! Matrices cross these boundaries as coefficient lists with the instance
//! transform meaning of [`AffineMatrix3D::from_instance_transform`] (3, 12
//! or 16 values). Results go back as plain arrays.

use crate::affine3::{AffineMatrix3D, Decomposition};
use crate::error::MatrixError;
use crate::quat::RotationQuat;
use crate::vector::Vec3;

/// Decomposition flattened to arrays; rotation as `(x, y, z, w)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecomposedParts {
    pub scale: [f64; 3],
    pub rotation: [f64; 4],
    pub translation: [f64; 3],
    pub success: bool,
}

impl From<Decomposition> for DecomposedParts {
    fn from(d: Decomposition) -> Self {
        let (x, y, z, w) = d.rotation.components();
        Self {
            scale: d.scale.into(),
            rotation: [x, y, z, w],
            translation: d.translation.into(),
            success: d.success,
        }
    }
}

pub fn matrix_from_coeffs(coeffs: &[f64]) -> Result<AffineMatrix3D, MatrixError> {
    AffineMatrix3D::from_instance_transform(coeffs)
}

/// All sixteen coefficients, row-major.
pub fn matrix_to_coeffs(m: &AffineMatrix3D) -> [f64; 16] {
    let mut out = [0.0; 16];
    for (chunk, row) in out.chunks_exact_mut(4).zip(m.rows()) {
        chunk.copy_from_slice(row.as_slice());
    }
    out
}

pub fn decompose_coeffs(coeffs: &[f64]) -> Result<DecomposedParts, MatrixError> {
    Ok(matrix_from_coeffs(coeffs)?.decompose().into())
}

/// Inverse coefficients, or `None` for a singular matrix.
pub fn invert_coeffs(coeffs: &[f64]) -> Result<Option<[f64; 16]>, MatrixError> {
    Ok(matrix_from_coeffs(coeffs)?.invert().map(|inv| matrix_to_coeffs(&inv)))
}

/// Transform `(x, y, z)` points in place.
pub fn transform_xyz(m: &AffineMatrix3D, points: &mut [[f64; 3]]) {
    for p in points.iter_mut() {
        *p = m.transform_vector3(Vec3::from(*p)).into();
    }
}
