//! Quaternion contract consumed by the 3D matrix code.
//!
//! The matrix algorithms only need a handful of unit-quaternion capabilities,
//! captured by `RotationQuat`. Composition order is part of the contract:
//! `p.concatenate(&q)` means "rotate by `p`, then by `q`" (Hamilton product
//! `q·p`), and rotating a vector `v` by `r` is
//! `concatenate(concatenate(conjugate(r), v), r)`, i.e. `r·v·r*`.
//! Implementations that swap the order silently invert rotation direction.
//!
//! `nalgebra::Quaternion<f64>` implements the contract.

use nalgebra::Quaternion;

use crate::affine3::AffineMatrix3D;
use crate::vector::Vec3;

pub trait RotationQuat: Copy {
    fn identity() -> Self;

    /// Rotation of `angle` radians about the unit vector `axis`.
    fn from_axis_angle(axis: &Vec3, angle: f64) -> Self;

    /// Yaw about Y, pitch about X, roll about Z; roll is applied first.
    fn from_yaw_pitch_roll(yaw: f64, pitch: f64, roll: f64) -> Self;

    /// Unit quaternion of the orthonormal upper-left 3x3 block of `m`
    /// (row-vector convention).
    fn from_rotation_matrix(m: &AffineMatrix3D) -> Self;

    /// Lift a vector to a pure quaternion (zero scalar part).
    fn from_vector(v: &Vec3) -> Self;

    fn conjugate(&self) -> Self;

    /// `self` followed by `then`.
    fn concatenate(&self, then: &Self) -> Self;

    /// `(x, y, z, w)` with `w` the scalar part.
    fn components(&self) -> (f64, f64, f64, f64);

    fn rotate(&self, v: &Vec3) -> Vec3 {
        let lifted = Self::from_vector(v);
        let (x, y, z, _) = self
            .conjugate()
            .concatenate(&lifted)
            .concatenate(self)
            .components();
        Vec3::new(x, y, z)
    }
}

impl RotationQuat for Quaternion<f64> {
    #[inline]
    fn identity() -> Self {
        Quaternion::new(1.0, 0.0, 0.0, 0.0)
    }

    fn from_axis_angle(axis: &Vec3, angle: f64) -> Self {
        let (s, c) = (angle * 0.5).sin_cos();
        Quaternion::new(c, axis.x * s, axis.y * s, axis.z * s)
    }

    fn from_yaw_pitch_roll(yaw: f64, pitch: f64, roll: f64) -> Self {
        let (sr, cr) = (roll * 0.5).sin_cos();
        let (sp, cp) = (pitch * 0.5).sin_cos();
        let (sy, cy) = (yaw * 0.5).sin_cos();
        Quaternion::new(
            cy * cp * cr + sy * sp * sr,
            cy * sp * cr + sy * cp * sr,
            sy * cp * cr - cy * sp * sr,
            cy * cp * sr - sy * sp * cr,
        )
    }

    fn from_rotation_matrix(m: &AffineMatrix3D) -> Self {
        let (m11, m12, m13) = (m.x.x, m.x.y, m.x.z);
        let (m21, m22, m23) = (m.y.x, m.y.y, m.y.z);
        let (m31, m32, m33) = (m.z.x, m.z.y, m.z.z);
        let trace = m11 + m22 + m33;
        if trace > 0.0 {
            let s = (trace + 1.0).sqrt();
            let inv_s = 0.5 / s;
            Quaternion::new(
                s * 0.5,
                (m23 - m32) * inv_s,
                (m31 - m13) * inv_s,
                (m12 - m21) * inv_s,
            )
        } else if m11 >= m22 && m11 >= m33 {
            let s = (1.0 + m11 - m22 - m33).sqrt();
            let inv_s = 0.5 / s;
            Quaternion::new(
                (m23 - m32) * inv_s,
                0.5 * s,
                (m12 + m21) * inv_s,
                (m13 + m31) * inv_s,
            )
        } else if m22 > m33 {
            let s = (1.0 + m22 - m11 - m33).sqrt();
            let inv_s = 0.5 / s;
            Quaternion::new(
                (m31 - m13) * inv_s,
                (m21 + m12) * inv_s,
                0.5 * s,
                (m32 + m23) * inv_s,
            )
        } else {
            let s = (1.0 + m33 - m11 - m22).sqrt();
            let inv_s = 0.5 / s;
            Quaternion::new(
                (m12 - m21) * inv_s,
                (m31 + m13) * inv_s,
                (m32 + m23) * inv_s,
                0.5 * s,
            )
        }
    }

    #[inline]
    fn from_vector(v: &Vec3) -> Self {
        Quaternion::new(0.0, v.x, v.y, v.z)
    }

    #[inline]
    fn conjugate(&self) -> Self {
        Quaternion::new(self.w, -self.i, -self.j, -self.k)
    }

    #[inline]
    fn concatenate(&self, then: &Self) -> Self {
        then * self
    }

    #[inline]
    fn components(&self) -> (f64, f64, f64, f64) {
        (self.i, self.j, self.k, self.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{UnitQuaternion, Vector3};
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_3};

    type Q = Quaternion<f64>;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).amax() < 1e-12
    }

    #[test]
    fn rotate_about_z_is_counterclockwise() {
        let r = <Q as RotationQuat>::from_axis_angle(&Vec3::z(), FRAC_PI_2);
        assert!(close(r.rotate(&Vec3::x()), Vec3::y()));
    }

    #[test]
    fn rotate_agrees_with_nalgebra_unit_quaternion() {
        let axis = Vector3::new(1.0, -2.0, 0.5).normalize();
        let r = <Q as RotationQuat>::from_axis_angle(&axis, 0.7);
        let reference = UnitQuaternion::from_axis_angle(&nalgebra::Unit::new_normalize(axis), 0.7);
        let v = Vec3::new(0.3, 1.1, -2.4);
        assert!(close(r.rotate(&v), reference.transform_vector(&v)));
    }

    #[test]
    fn concatenate_applies_left_operand_first() {
        let p = <Q as RotationQuat>::from_axis_angle(&Vec3::z(), FRAC_PI_2);
        let q = <Q as RotationQuat>::from_axis_angle(&Vec3::x(), FRAC_PI_2);
        let pq = p.concatenate(&q);
        let v = Vec3::x();
        assert!(close(pq.rotate(&v), q.rotate(&p.rotate(&v))));
        // x -> y under p, then y -> z under q.
        assert!(close(pq.rotate(&v), Vec3::z()));
    }

    #[test]
    fn yaw_pitch_roll_single_axes() {
        let v = Vec3::new(0.2, 0.4, 0.9);
        let yaw = <Q as RotationQuat>::from_yaw_pitch_roll(FRAC_PI_3, 0.0, 0.0);
        let about_y = <Q as RotationQuat>::from_axis_angle(&Vec3::y(), FRAC_PI_3);
        assert!(close(yaw.rotate(&v), about_y.rotate(&v)));
        let pitch = <Q as RotationQuat>::from_yaw_pitch_roll(0.0, FRAC_PI_3, 0.0);
        let about_x = <Q as RotationQuat>::from_axis_angle(&Vec3::x(), FRAC_PI_3);
        assert!(close(pitch.rotate(&v), about_x.rotate(&v)));
        let roll = <Q as RotationQuat>::from_yaw_pitch_roll(0.0, 0.0, FRAC_PI_3);
        let about_z = <Q as RotationQuat>::from_axis_angle(&Vec3::z(), FRAC_PI_3);
        assert!(close(roll.rotate(&v), about_z.rotate(&v)));
    }

    #[test]
    fn yaw_pitch_roll_applies_roll_then_pitch_then_yaw() {
        let (yaw, pitch, roll) = (0.3, -0.8, 1.1);
        let combined = <Q as RotationQuat>::from_yaw_pitch_roll(yaw, pitch, roll);
        let qy = <Q as RotationQuat>::from_axis_angle(&Vec3::y(), yaw);
        let qx = <Q as RotationQuat>::from_axis_angle(&Vec3::x(), pitch);
        let qz = <Q as RotationQuat>::from_axis_angle(&Vec3::z(), roll);
        let chained = qz.concatenate(&qx).concatenate(&qy);
        let v = Vec3::new(-0.5, 0.25, 2.0);
        assert!(close(combined.rotate(&v), chained.rotate(&v)));
    }

    #[test]
    fn rotation_matrix_round_trip_covers_all_branches() {
        // Angles chosen so the trace is positive, and so each diagonal entry
        // dominates in turn when the trace is negative.
        let cases = [
            (Vec3::z(), 0.4),
            (Vec3::x(), 3.0),
            (Vec3::y(), 3.0),
            (Vec3::z(), 3.0),
        ];
        for (axis, angle) in cases {
            let q = <Q as RotationQuat>::from_axis_angle(&axis, angle);
            let m = AffineMatrix3D::from_quaternion(&q);
            let back = <Q as RotationQuat>::from_rotation_matrix(&m);
            let v = Vec3::new(1.0, 2.0, 3.0);
            assert!(close(q.rotate(&v), back.rotate(&v)), "axis {axis:?} angle {angle}");
        }
    }
}
