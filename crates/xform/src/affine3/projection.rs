//! Projection and viewport matrices.
//!
//! Conventions
//! - Right-handed variants look down `-z` and emit `w = -z` (`M34 = -1`);
//!   left-handed variants look down `+z` (`M34 = 1`).
//! - Depth maps to `[0, 1]`.
//! - Perspective preconditions: `0 < near < far`; `far = +inf` is legal and
//!   yields the limiting `range` of `-1` (right-handed) or `1` (left-handed).
//!   Field-of-view variants also need `0 < fov < pi`.
//! - Orthographic variants share the perspective plane checks and also need
//!   a finite far plane.

use std::f64::consts::PI;

use crate::error::MatrixError;

use super::AffineMatrix3D;

// Negated comparisons: NaN fails every check.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
fn check_perspective_planes(near: f64, far: f64) -> Result<(), MatrixError> {
    if !(near > 0.0) {
        return Err(MatrixError::invalid("near_plane_distance", near, "must be positive"));
    }
    if !(far > 0.0) {
        return Err(MatrixError::invalid("far_plane_distance", far, "must be positive"));
    }
    if !(near < far) {
        return Err(MatrixError::invalid(
            "near_plane_distance",
            near,
            "must be less than the far plane distance",
        ));
    }
    Ok(())
}

#[allow(clippy::neg_cmp_op_on_partial_ord)]
fn check_field_of_view(fov: f64) -> Result<(), MatrixError> {
    if !(fov > 0.0 && fov < PI) {
        return Err(MatrixError::invalid("field_of_view", fov, "must lie in (0, pi)"));
    }
    Ok(())
}

fn check_orthographic_planes(near: f64, far: f64) -> Result<(), MatrixError> {
    check_perspective_planes(near, far)?;
    if !far.is_finite() {
        return Err(MatrixError::invalid("far_plane_distance", far, "must be finite"));
    }
    Ok(())
}

/// Depth scale for right-handed perspective.
#[inline]
fn range_rh(near: f64, far: f64) -> f64 {
    if far == f64::INFINITY {
        -1.0
    } else {
        far / (near - far)
    }
}

#[inline]
fn range_lh(near: f64, far: f64) -> f64 {
    if far == f64::INFINITY {
        1.0
    } else {
        far / (far - near)
    }
}

impl AffineMatrix3D {
    pub fn create_orthographic(width: f64, height: f64, near: f64, far: f64) -> Result<Self, MatrixError> {
        check_orthographic_planes(near, far)?;
        let range = 1.0 / (near - far);
        Ok(Self::new(
            2.0 / width, 0.0, 0.0, 0.0, //
            0.0, 2.0 / height, 0.0, 0.0, //
            0.0, 0.0, range, 0.0, //
            0.0, 0.0, range * near, 1.0,
        ))
    }

    pub fn create_orthographic_left_handed(
        width: f64,
        height: f64,
        near: f64,
        far: f64,
    ) -> Result<Self, MatrixError> {
        check_orthographic_planes(near, far)?;
        let range = 1.0 / (far - near);
        Ok(Self::new(
            2.0 / width, 0.0, 0.0, 0.0, //
            0.0, 2.0 / height, 0.0, 0.0, //
            0.0, 0.0, range, 0.0, //
            0.0, 0.0, -range * near, 1.0,
        ))
    }

    pub fn create_orthographic_off_center(
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near: f64,
        far: f64,
    ) -> Result<Self, MatrixError> {
        check_orthographic_planes(near, far)?;
        let range = 1.0 / (near - far);
        Ok(Self::new(
            2.0 / (right - left), 0.0, 0.0, 0.0, //
            0.0, 2.0 / (top - bottom), 0.0, 0.0, //
            0.0, 0.0, range, 0.0, //
            (left + right) / (left - right),
            (top + bottom) / (bottom - top),
            range * near,
            1.0,
        ))
    }

    pub fn create_orthographic_off_center_left_handed(
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near: f64,
        far: f64,
    ) -> Result<Self, MatrixError> {
        check_orthographic_planes(near, far)?;
        let range = 1.0 / (far - near);
        Ok(Self::new(
            2.0 / (right - left), 0.0, 0.0, 0.0, //
            0.0, 2.0 / (top - bottom), 0.0, 0.0, //
            0.0, 0.0, range, 0.0, //
            (left + right) / (left - right),
            (top + bottom) / (bottom - top),
            -range * near,
            1.0,
        ))
    }

    /// Perspective from the view-volume width and height at the near plane.
    pub fn create_perspective(width: f64, height: f64, near: f64, far: f64) -> Result<Self, MatrixError> {
        check_perspective_planes(near, far)?;
        let range = range_rh(near, far);
        Ok(Self::new(
            2.0 * near / width, 0.0, 0.0, 0.0, //
            0.0, 2.0 * near / height, 0.0, 0.0, //
            0.0, 0.0, range, -1.0, //
            0.0, 0.0, range * near, 0.0,
        ))
    }

    pub fn create_perspective_left_handed(
        width: f64,
        height: f64,
        near: f64,
        far: f64,
    ) -> Result<Self, MatrixError> {
        check_perspective_planes(near, far)?;
        let range = range_lh(near, far);
        Ok(Self::new(
            2.0 * near / width, 0.0, 0.0, 0.0, //
            0.0, 2.0 * near / height, 0.0, 0.0, //
            0.0, 0.0, range, 1.0, //
            0.0, 0.0, -range * near, 0.0,
        ))
    }

    /// Perspective from a vertical field of view (radians) and aspect ratio.
    pub fn create_perspective_field_of_view(
        field_of_view: f64,
        aspect_ratio: f64,
        near: f64,
        far: f64,
    ) -> Result<Self, MatrixError> {
        check_field_of_view(field_of_view)?;
        check_perspective_planes(near, far)?;
        let height = 1.0 / (field_of_view * 0.5).tan();
        let width = height / aspect_ratio;
        let range = range_rh(near, far);
        Ok(Self::new(
            width, 0.0, 0.0, 0.0, //
            0.0, height, 0.0, 0.0, //
            0.0, 0.0, range, -1.0, //
            0.0, 0.0, range * near, 0.0,
        ))
    }

    pub fn create_perspective_field_of_view_left_handed(
        field_of_view: f64,
        aspect_ratio: f64,
        near: f64,
        far: f64,
    ) -> Result<Self, MatrixError> {
        check_field_of_view(field_of_view)?;
        check_perspective_planes(near, far)?;
        let height = 1.0 / (field_of_view * 0.5).tan();
        let width = height / aspect_ratio;
        let range = range_lh(near, far);
        Ok(Self::new(
            width, 0.0, 0.0, 0.0, //
            0.0, height, 0.0, 0.0, //
            0.0, 0.0, range, 1.0, //
            0.0, 0.0, -range * near, 0.0,
        ))
    }

    pub fn create_perspective_off_center(
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near: f64,
        far: f64,
    ) -> Result<Self, MatrixError> {
        check_perspective_planes(near, far)?;
        let range = range_rh(near, far);
        Ok(Self::new(
            2.0 * near / (right - left), 0.0, 0.0, 0.0, //
            0.0, 2.0 * near / (top - bottom), 0.0, 0.0, //
            (left + right) / (right - left),
            (top + bottom) / (top - bottom),
            range,
            -1.0,
            //
            0.0, 0.0, range * near, 0.0,
        ))
    }

    pub fn create_perspective_off_center_left_handed(
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near: f64,
        far: f64,
    ) -> Result<Self, MatrixError> {
        check_perspective_planes(near, far)?;
        let range = range_lh(near, far);
        Ok(Self::new(
            2.0 * near / (right - left), 0.0, 0.0, 0.0, //
            0.0, 2.0 * near / (top - bottom), 0.0, 0.0, //
            (left + right) / (left - right),
            (top + bottom) / (bottom - top),
            range,
            1.0,
            //
            0.0, 0.0, -range * near, 0.0,
        ))
    }

    /// Maps clip space to a `width x height` screen rectangle at `(x, y)`,
    /// flipping Y and sending depth `[0, 1]` to `[min_depth, max_depth]`
    /// reversed (right-handed).
    pub fn create_viewport(x: f64, y: f64, width: f64, height: f64, min_depth: f64, max_depth: f64) -> Self {
        let (hw, hh) = (width * 0.5, height * 0.5);
        Self::new(
            hw, 0.0, 0.0, 0.0, //
            0.0, -hh, 0.0, 0.0, //
            0.0, 0.0, min_depth - max_depth, 0.0, //
            x + hw, y + hh, min_depth, 1.0,
        )
    }

    pub fn create_viewport_left_handed(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        min_depth: f64,
        max_depth: f64,
    ) -> Self {
        let (hw, hh) = (width * 0.5, height * 0.5);
        Self::new(
            hw, 0.0, 0.0, 0.0, //
            0.0, -hh, 0.0, 0.0, //
            0.0, 0.0, max_depth - min_depth, 0.0, //
            x + hw, y + hh, min_depth, 1.0,
        )
    }
}
