//! Vector primitives on top of nalgebra.
//!
//! nalgebra already provides componentwise arithmetic, `dot`, `cross`, `norm`,
//! `norm_squared` and `normalize` for `Vector2/3/4<f64>`. Normalizing a zero
//! vector yields NaN components; nothing here special-cases that.
//!
//! This module adds the few primitives whose exact form matters to the matrix
//! code: the scalar 2D cross product, `a + (b - a)·t` interpolation, and
//! NaN-aware float equality.

use nalgebra::{Vector2, Vector3, Vector4};

pub type Vec2 = Vector2<f64>;
pub type Vec3 = Vector3<f64>;
pub type Vec4 = Vector4<f64>;

/// z component of the 3D cross product of `(a, 0)` and `(b, 0)`.
#[inline]
pub fn cross2(a: Vec2, b: Vec2) -> f64 {
    a.x * b.y - a.y * b.x
}

#[inline]
pub fn lerp2(a: Vec2, b: Vec2, t: f64) -> Vec2 {
    a + (b - a) * t
}

#[inline]
pub fn lerp3(a: Vec3, b: Vec3, t: f64) -> Vec3 {
    a + (b - a) * t
}

/// Componentwise `a + (b - a)·t`; `t` is not clamped.
#[inline]
pub fn lerp4(a: Vec4, b: Vec4, t: f64) -> Vec4 {
    a + (b - a) * t
}

/// Value equality: IEEE `==`, except NaN equals NaN.
#[inline]
pub fn same_value(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

#[inline]
pub(crate) fn same_vec2(a: &Vec2, b: &Vec2) -> bool {
    same_value(a.x, b.x) && same_value(a.y, b.y)
}

#[inline]
pub(crate) fn same_vec4(a: &Vec4, b: &Vec4) -> bool {
    a.iter().zip(b.iter()).all(|(&p, &q)| same_value(p, q))
}

#[inline]
pub(crate) fn extend(v: Vec3, w: f64) -> Vec4 {
    Vec4::new(v.x, v.y, v.z, w)
}
