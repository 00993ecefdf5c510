//! Factory constructors: rotations, scale, translation, camera/world bases,
//! billboards, reflection and planar shadow.
//!
//! Pivot variants (`*_about`) fold the "move centre to origin, transform,
//! move back" sequence into the translation row directly.

use crate::cfg::{BILLBOARD_EPS, BILLBOARD_MIN_ANGLE};
use crate::quat::RotationQuat;
use crate::vector::{extend, Vec3, Vec4};

use super::{AffineMatrix3D, Plane};

impl AffineMatrix3D {
    #[inline]
    pub fn create_translation(x: f64, y: f64, z: f64) -> Self {
        Self::create_translation_vec(Vec3::new(x, y, z))
    }

    pub fn create_translation_vec(position: Vec3) -> Self {
        Self {
            w: extend(position, 1.0),
            ..Self::IDENTITY
        }
    }

    #[inline]
    pub fn create_scale(x: f64, y: f64, z: f64) -> Self {
        Self::create_scale_vec(Vec3::new(x, y, z))
    }

    pub fn create_scale_vec(scales: Vec3) -> Self {
        Self::create_scale_about(scales, Vec3::zeros())
    }

    #[inline]
    pub fn create_scale_uniform(scale: f64) -> Self {
        Self::create_scale(scale, scale, scale)
    }

    /// Scale with `center` held fixed: translation `center·(1 - scale)`.
    pub fn create_scale_about(scales: Vec3, center: Vec3) -> Self {
        let t = center.component_mul(&(Vec3::repeat(1.0) - scales));
        Self::new(
            scales.x, 0.0, 0.0, 0.0, //
            0.0, scales.y, 0.0, 0.0, //
            0.0, 0.0, scales.z, 0.0, //
            t.x, t.y, t.z, 1.0,
        )
    }

    #[inline]
    pub fn create_scale_xyz_about(x: f64, y: f64, z: f64, center: Vec3) -> Self {
        Self::create_scale_about(Vec3::new(x, y, z), center)
    }

    #[inline]
    pub fn create_scale_uniform_about(scale: f64, center: Vec3) -> Self {
        Self::create_scale_about(Vec3::repeat(scale), center)
    }

    #[inline]
    pub fn create_rotation_x(radians: f64) -> Self {
        Self::create_rotation_x_about(radians, Vec3::zeros())
    }

    pub fn create_rotation_x_about(radians: f64, center: Vec3) -> Self {
        let (s, c) = radians.sin_cos();
        let y = center.y * (1.0 - c) + center.z * s;
        let z = center.z * (1.0 - c) - center.y * s;
        Self::new(
            1.0, 0.0, 0.0, 0.0, //
            0.0, c, s, 0.0, //
            0.0, -s, c, 0.0, //
            0.0, y, z, 1.0,
        )
    }

    #[inline]
    pub fn create_rotation_y(radians: f64) -> Self {
        Self::create_rotation_y_about(radians, Vec3::zeros())
    }

    pub fn create_rotation_y_about(radians: f64, center: Vec3) -> Self {
        let (s, c) = radians.sin_cos();
        let x = center.x * (1.0 - c) - center.z * s;
        let z = center.z * (1.0 - c) + center.x * s;
        Self::new(
            c, 0.0, -s, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            s, 0.0, c, 0.0, //
            x, 0.0, z, 1.0,
        )
    }

    #[inline]
    pub fn create_rotation_z(radians: f64) -> Self {
        Self::create_rotation_z_about(radians, Vec3::zeros())
    }

    pub fn create_rotation_z_about(radians: f64, center: Vec3) -> Self {
        let (s, c) = radians.sin_cos();
        let x = center.x * (1.0 - c) + center.y * s;
        let y = center.y * (1.0 - c) - center.x * s;
        Self::new(
            c, s, 0.0, 0.0, //
            -s, c, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            x, y, 0.0, 1.0,
        )
    }

    /// Rotation of `angle` radians about the unit vector `axis`.
    pub fn create_from_axis_angle(axis: Vec3, angle: f64) -> Self {
        let (x, y, z) = (axis.x, axis.y, axis.z);
        let (sa, ca) = angle.sin_cos();
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        Self::new(
            xx + ca * (1.0 - xx),
            xy - ca * xy + sa * z,
            xz - ca * xz - sa * y,
            0.0,
            //
            xy - ca * xy - sa * z,
            yy + ca * (1.0 - yy),
            yz - ca * yz + sa * x,
            0.0,
            //
            xz - ca * xz + sa * y,
            yz - ca * yz - sa * x,
            zz + ca * (1.0 - zz),
            0.0,
            //
            0.0,
            0.0,
            0.0,
            1.0,
        )
    }

    /// Rotation matrix of a unit quaternion (row-vector orientation).
    pub fn from_quaternion<Q: RotationQuat>(q: &Q) -> Self {
        let (x, y, z, w) = q.components();
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, wz, xz) = (x * y, z * w, z * x);
        let (wy, yz, wx) = (y * w, y * z, x * w);
        Self::new(
            1.0 - 2.0 * (yy + zz),
            2.0 * (xy + wz),
            2.0 * (xz - wy),
            0.0,
            //
            2.0 * (xy - wz),
            1.0 - 2.0 * (zz + xx),
            2.0 * (yz + wx),
            0.0,
            //
            2.0 * (xz + wy),
            2.0 * (yz - wx),
            1.0 - 2.0 * (yy + xx),
            0.0,
            //
            0.0,
            0.0,
            0.0,
            1.0,
        )
    }

    pub fn create_from_yaw_pitch_roll(yaw: f64, pitch: f64, roll: f64) -> Self {
        let q = <nalgebra::Quaternion<f64> as RotationQuat>::from_yaw_pitch_roll(yaw, pitch, roll);
        Self::from_quaternion(&q)
    }

    /// World matrix placing an object at `position` facing `forward`.
    /// Unlike the view matrices this basis is already row-oriented.
    pub fn create_world(position: Vec3, forward: Vec3, up: Vec3) -> Self {
        let axis_z = (-forward).normalize();
        let axis_x = up.cross(&axis_z).normalize();
        let axis_y = axis_z.cross(&axis_x);
        Self::from_basis(axis_x, axis_y, axis_z, position)
    }

    /// Right-handed view matrix looking along `direction`.
    #[inline]
    pub fn create_look_to(position: Vec3, direction: Vec3, up: Vec3) -> Self {
        Self::create_look_to_left_handed(position, -direction, up)
    }

    pub fn create_look_to_left_handed(position: Vec3, direction: Vec3, up: Vec3) -> Self {
        let axis_z = direction.normalize();
        let axis_x = up.cross(&axis_z).normalize();
        let axis_y = axis_z.cross(&axis_x);
        let neg_pos = -position;
        // Basis assembled column-wise; transposed into row-vector form.
        Self::from_rows(
            extend(axis_x, axis_x.dot(&neg_pos)),
            extend(axis_y, axis_y.dot(&neg_pos)),
            extend(axis_z, axis_z.dot(&neg_pos)),
            Vec4::w(),
        )
        .transpose()
    }

    #[inline]
    pub fn create_look_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        Self::create_look_to(position, target - position, up)
    }

    #[inline]
    pub fn create_look_at_left_handed(position: Vec3, target: Vec3, up: Vec3) -> Self {
        Self::create_look_to_left_handed(position, target - position, up)
    }

    /// Spherical billboard at `object` turned to face `camera`.
    pub fn create_billboard(object: Vec3, camera: Vec3, camera_up: Vec3, camera_forward: Vec3) -> Self {
        let axis_z = facing_direction(object, camera, camera_forward);
        let axis_x = camera_up.cross(&axis_z).normalize();
        let axis_y = axis_z.cross(&axis_x);
        Self::from_basis(axis_x, axis_y, axis_z, object)
    }

    /// Cylindrical billboard at `object` that may only spin about `rotate_axis`.
    pub fn create_constrained_billboard(
        object: Vec3,
        camera: Vec3,
        rotate_axis: Vec3,
        camera_forward: Vec3,
        object_forward: Vec3,
    ) -> Self {
        let face_dir = facing_direction(object, camera, camera_forward);
        let axis_y = rotate_axis;
        let (axis_x, axis_z) = if rotate_axis.dot(&face_dir).abs() > BILLBOARD_MIN_ANGLE {
            let mut axis_z = object_forward;
            if rotate_axis.dot(&axis_z).abs() > BILLBOARD_MIN_ANGLE {
                axis_z = if rotate_axis.z.abs() > BILLBOARD_MIN_ANGLE {
                    Vec3::x()
                } else {
                    -Vec3::z()
                };
            }
            let axis_x = rotate_axis.cross(&axis_z).normalize();
            (axis_x, axis_x.cross(&rotate_axis).normalize())
        } else {
            let axis_x = rotate_axis.cross(&face_dir).normalize();
            (axis_x, axis_x.cross(&axis_y).normalize())
        };
        Self::from_basis(axis_x, axis_y, axis_z, object)
    }

    /// Reflection through `plane` (normalized first).
    pub fn create_reflection(plane: &Plane) -> Self {
        let p = plane.normalize();
        let (a, b, c, d) = (p.normal.x, p.normal.y, p.normal.z, p.d);
        let (fa, fb, fc) = (-2.0 * a, -2.0 * b, -2.0 * c);
        Self::new(
            fa * a + 1.0, fb * a, fc * a, 0.0, //
            fa * b, fb * b + 1.0, fc * b, 0.0, //
            fa * c, fb * c, fc * c + 1.0, 0.0, //
            fa * d, fb * d, fc * d, 1.0,
        )
    }

    /// Flattens geometry onto `plane` along `light_direction`.
    pub fn create_shadow(light_direction: Vec3, plane: &Plane) -> Self {
        let p = plane.normalize();
        let l = light_direction;
        let dot = p.normal.dot(&l);
        let (a, b, c, d) = (-p.normal.x, -p.normal.y, -p.normal.z, -p.d);
        Self::new(
            a * l.x + dot, a * l.y, a * l.z, 0.0, //
            b * l.x, b * l.y + dot, b * l.z, 0.0, //
            c * l.x, c * l.y, c * l.z + dot, 0.0, //
            d * l.x, d * l.y, d * l.z, dot,
        )
    }
}

/// Unit vector from `camera` to `object`, or `-camera_forward` when the two
/// nearly coincide.
fn facing_direction(object: Vec3, camera: Vec3, camera_forward: Vec3) -> Vec3 {
    let dir = object - camera;
    let norm = dir.norm_squared();
    if norm < BILLBOARD_EPS {
        -camera_forward
    } else {
        dir * (1.0 / norm.sqrt())
    }
}
