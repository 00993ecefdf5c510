//! Applying a matrix to vectors (row-vector convention, `v' = v·M`).
//!
//! `transform_normal*` drop the translation row. That is only the correct
//! normal transport for rigid/uniform-scale matrices; for general linear parts
//! the caller passes the inverse-transpose.

use crate::quat::RotationQuat;
use crate::vector::{Vec2, Vec3, Vec4};

use super::AffineMatrix3D;

impl AffineMatrix3D {
    /// `v·M` for a full homogeneous row vector.
    #[inline]
    pub fn transform_vector4(&self, v: Vec4) -> Vec4 {
        self.x * v.x + self.y * v.y + self.z * v.z + self.w * v.w
    }

    /// Point transform, implicit `w = 1`; the output `w` is discarded.
    #[inline]
    pub fn transform_vector3(&self, v: Vec3) -> Vec3 {
        (self.x * v.x + self.y * v.y + self.z * v.z + self.w).xyz()
    }

    #[inline]
    pub fn transform_vector3_to_4(&self, v: Vec3) -> Vec4 {
        self.x * v.x + self.y * v.y + self.z * v.z + self.w
    }

    /// Point transform, implicit `z = 0, w = 1`.
    #[inline]
    pub fn transform_vector2(&self, v: Vec2) -> Vec2 {
        (self.x * v.x + self.y * v.y + self.w).xy()
    }

    #[inline]
    pub fn transform_vector2_to_4(&self, v: Vec2) -> Vec4 {
        self.x * v.x + self.y * v.y + self.w
    }

    /// Direction transform: linear part only.
    #[inline]
    pub fn transform_normal3(&self, v: Vec3) -> Vec3 {
        (self.x * v.x + self.y * v.y + self.z * v.z).xyz()
    }

    #[inline]
    pub fn transform_normal2(&self, v: Vec2) -> Vec2 {
        (self.x * v.x + self.y * v.y).xy()
    }

    /// In-place bulk point transform. Elements are independent, so callers
    /// may split `points` across threads freely.
    pub fn transform_points(&self, points: &mut [Vec3]) {
        for p in points.iter_mut() {
            *p = self.transform_vector3(*p);
        }
    }

    /// Right-multiply the `xyz` of every row by the rotation matrix of `q`;
    /// each row's `w` component is kept.
    pub fn transform_by_rotation<Q: RotationQuat>(&self, q: &Q) -> Self {
        let (x, y, z, w) = q.components();
        let (x2, y2, z2) = (x + x, y + y, z + z);
        let (wx2, wy2, wz2) = (w * x2, w * y2, w * z2);
        let (xx2, xy2, xz2) = (x * x2, x * y2, x * z2);
        let (yy2, yz2, zz2) = (y * y2, y * z2, z * z2);

        let q11 = 1.0 - yy2 - zz2;
        let q21 = xy2 - wz2;
        let q31 = xz2 + wy2;

        let q12 = xy2 + wz2;
        let q22 = 1.0 - xx2 - zz2;
        let q32 = yz2 - wx2;

        let q13 = xz2 - wy2;
        let q23 = yz2 + wx2;
        let q33 = 1.0 - xx2 - yy2;

        let rotate = |r: Vec4| {
            Vec4::new(
                r.x * q11 + r.y * q21 + r.z * q31,
                r.x * q12 + r.y * q22 + r.z * q32,
                r.x * q13 + r.y * q23 + r.z * q33,
                r.w,
            )
        };
        Self::from_rows(rotate(self.x), rotate(self.y), rotate(self.z), rotate(self.w))
    }
}
