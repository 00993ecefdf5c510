//! Rotation, scale, skew and translation factories.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::cfg::ANGLE_SNAP_EPS;
use crate::vector::Vec2;

use super::AffineMatrix2D;

/// IEEE 754 remainder: `x - y·n` with `n = x / y` rounded half to even.
/// The result lies in `[-y/2, y/2]`.
#[inline]
fn ieee_remainder(x: f64, y: f64) -> f64 {
    x - y * (x / y).round_ties_even()
}

/// `(sin, cos)` of `radians`, exact at 0°, 90°, 180° and 270° (±0.001°).
pub(crate) fn snapped_sin_cos(radians: f64) -> (f64, f64) {
    let r = ieee_remainder(radians, TAU);
    let eps = ANGLE_SNAP_EPS;
    if r > -eps && r < eps {
        (0.0, 1.0)
    } else if r > FRAC_PI_2 - eps && r < FRAC_PI_2 + eps {
        (1.0, 0.0)
    } else if r < -PI + eps || r > PI - eps {
        (0.0, -1.0)
    } else if r > -FRAC_PI_2 - eps && r < -FRAC_PI_2 + eps {
        (-1.0, 0.0)
    } else {
        r.sin_cos()
    }
}

impl AffineMatrix2D {
    #[inline]
    pub fn create_translation(x: f64, y: f64) -> Self {
        Self::create_translation_vec(Vec2::new(x, y))
    }

    pub fn create_translation_vec(position: Vec2) -> Self {
        Self::IDENTITY.with_translation(position)
    }

    #[inline]
    pub fn create_rotation(radians: f64) -> Self {
        Self::create_rotation_about(radians, Vec2::zeros())
    }

    /// Counterclockwise rotation pivoting about `center`.
    pub fn create_rotation_about(radians: f64, center: Vec2) -> Self {
        let (s, c) = snapped_sin_cos(radians);
        let x = center.x * (1.0 - c) + center.y * s;
        let y = center.y * (1.0 - c) - center.x * s;
        Self::new(c, s, -s, c, x, y)
    }

    #[inline]
    pub fn create_scale(x: f64, y: f64) -> Self {
        Self::create_scale_vec(Vec2::new(x, y))
    }

    #[inline]
    pub fn create_scale_vec(scales: Vec2) -> Self {
        Self::create_scale_vec_about(scales, Vec2::zeros())
    }

    #[inline]
    pub fn create_scale_uniform(scale: f64) -> Self {
        Self::create_scale(scale, scale)
    }

    #[inline]
    pub fn create_scale_about(x: f64, y: f64, center: Vec2) -> Self {
        Self::create_scale_vec_about(Vec2::new(x, y), center)
    }

    /// Scale with `center` held fixed: translation `center·(1 - scale)`.
    pub fn create_scale_vec_about(scales: Vec2, center: Vec2) -> Self {
        let t = center.component_mul(&(Vec2::repeat(1.0) - scales));
        Self::new(scales.x, 0.0, 0.0, scales.y, t.x, t.y)
    }

    #[inline]
    pub fn create_scale_uniform_about(scale: f64, center: Vec2) -> Self {
        Self::create_scale_vec_about(Vec2::repeat(scale), center)
    }

    #[inline]
    pub fn create_skew(radians_x: f64, radians_y: f64) -> Self {
        Self::create_skew_about(radians_x, radians_y, Vec2::zeros())
    }

    /// Shear by `tan(radians_x)` along x and `tan(radians_y)` along y, with
    /// `center` held fixed.
    pub fn create_skew_about(radians_x: f64, radians_y: f64, center: Vec2) -> Self {
        let x_tan = radians_x.tan();
        let y_tan = radians_y.tan();
        Self::new(1.0, y_tan, x_tan, 1.0, -center.y * x_tan, -center.x * y_tan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remainder_is_centered() {
        assert_eq!(ieee_remainder(0.0, TAU), 0.0);
        assert!((ieee_remainder(TAU + 0.5, TAU) - 0.5).abs() < 1e-15);
        assert!((ieee_remainder(3.0 * FRAC_PI_2, TAU) + FRAC_PI_2).abs() < 1e-15);
        assert!((ieee_remainder(-TAU - 0.5, TAU) + 0.5).abs() < 1e-15);
    }

    #[test]
    fn canonical_angles_snap_exactly() {
        assert_eq!(snapped_sin_cos(0.0), (0.0, 1.0));
        assert_eq!(snapped_sin_cos(FRAC_PI_2), (1.0, 0.0));
        assert_eq!(snapped_sin_cos(PI), (0.0, -1.0));
        assert_eq!(snapped_sin_cos(-PI), (0.0, -1.0));
        assert_eq!(snapped_sin_cos(3.0 * FRAC_PI_2), (-1.0, 0.0));
        assert_eq!(snapped_sin_cos(-FRAC_PI_2), (-1.0, 0.0));
        assert_eq!(snapped_sin_cos(TAU), (0.0, 1.0));
        assert_eq!(snapped_sin_cos(FRAC_PI_2 + 0.5 * ANGLE_SNAP_EPS), (1.0, 0.0));
    }

    #[test]
    fn outside_the_window_uses_trig() {
        let r = 2.0 * ANGLE_SNAP_EPS;
        let (s, c) = snapped_sin_cos(r);
        assert_eq!((s, c), r.sin_cos());
        assert!(s > 0.0 && c < 1.0);
    }
}
