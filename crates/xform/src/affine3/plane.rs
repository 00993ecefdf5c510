//! Plane `normal · p + d = 0`, used by reflection and shadow matrices.

use crate::cfg::PLANE_NORMALIZE_EPS;
use crate::vector::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub d: f64,
}

impl Plane {
    #[inline]
    pub fn new(normal: Vec3, d: f64) -> Self {
        Self { normal, d }
    }

    /// Plane through three points, normal by the right-hand rule `a→b→c`.
    pub fn from_points(a: Vec3, b: Vec3, c: Vec3) -> Self {
        let normal = (b - a).cross(&(c - a)).normalize();
        Self::new(normal, -normal.dot(&a))
    }

    /// Rescale so `|normal| = 1`; near-unit normals are returned unchanged.
    pub fn normalize(&self) -> Self {
        let f = self.normal.norm_squared();
        if (f - 1.0).abs() < PLANE_NORMALIZE_EPS {
            return *self;
        }
        let inv = 1.0 / f.sqrt();
        Self::new(self.normal * inv, self.d * inv)
    }

    #[inline]
    pub fn signed_distance(&self, p: Vec3) -> f64 {
        self.normal.dot(&p) + self.d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_orients_by_right_hand_rule() {
        let p = Plane::from_points(
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(1.0, 0.0, 2.0),
            Vec3::new(0.0, 1.0, 2.0),
        );
        assert!((p.normal - Vec3::z()).norm() < 1e-12);
        assert!((p.d + 2.0).abs() < 1e-12);
        assert!(p.signed_distance(Vec3::new(5.0, -3.0, 2.0)).abs() < 1e-12);
    }

    #[test]
    fn normalize_scales_normal_and_offset() {
        let p = Plane::new(Vec3::new(0.0, 3.0, 4.0), 10.0).normalize();
        assert!((p.normal.norm() - 1.0).abs() < 1e-12);
        assert!((p.d - 2.0).abs() < 1e-12);
        let unit = Plane::new(Vec3::x(), 1.5);
        assert_eq!(unit.normalize(), unit);
    }
}
