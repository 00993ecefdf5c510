//! Tolerance defaults for matrix algorithms (internal).
//!
//! Policy
//! - Defaults are fixed constants to avoid "tolerance juggling" at call sites.
//!   Every predicate that needs a threshold reads it from here so construction
//!   and round-trip checks agree.

/// Singularity threshold for `invert`: the smallest positive subnormal.
/// Only an exactly-zero (or subnormal-underflowed) determinant is singular.
pub(crate) const DET_EPS: f64 = 5e-324;

/// Half-width of the snap window around 0°, 90°, 180° and 270° (0.001°).
pub(crate) const ANGLE_SNAP_EPS: f64 = 0.001 * std::f64::consts::PI / 180.0;

/// Degeneracy threshold shared by every step of `decompose`.
pub(crate) const DECOMPOSE_EPS: f64 = 1e-4;

/// Squared object-to-camera distance below which a billboard falls back to
/// the camera forward vector.
pub(crate) const BILLBOARD_EPS: f64 = 1e-4;

/// `|dot|` above which a billboard direction counts as parallel to the
/// rotate axis: cos(0.1°).
pub(crate) const BILLBOARD_MIN_ANGLE: f64 = 0.999_998_476_913_287_7;

/// Absolute tolerance for "negligible" and "practically the same" when
/// collapsing projective terms of a 2D matrix.
pub(crate) const PROJECTIVE_EPS: f64 = 1e-9;

/// A plane normal whose squared length is within this of 1 is left as is.
pub(crate) const PLANE_NORMALIZE_EPS: f64 = 1.192_092_9e-7;

#[inline]
pub(crate) fn is_negligible(v: f64) -> bool {
    v.abs() < PROJECTIVE_EPS
}

#[inline]
pub(crate) fn practically_same(a: f64, b: f64) -> bool {
    (a - b).abs() < PROJECTIVE_EPS
}
