//! Scale / rotation / translation decomposition.
//!
//! Algorithm
//! 1. Translation is read from the `w` row, unconditionally.
//! 2. The `x`, `y`, `z` rows are candidate basis vectors; their lengths are
//!    candidate scales.
//! 3. The scales are ranked largest/middle/smallest by a fixed comparison
//!    tree. Ties resolve the same way every time, and the ranking decides
//!    which axis is repaired first, so it is not replaced by a sort.
//! 4. Degenerate axes (scale below `DECOMPOSE_EPS`) are rebuilt: the largest
//!    from its canonical axis, the middle by crossing with the canonical axis
//!    least aligned with the largest, the smallest as the cross of the other
//!    two. Every axis is then normalized.
//! 5. A negative determinant is a mirror: the largest axis and its scale flip.
//! 6. `(det - 1)^2 > DECOMPOSE_EPS` means shear or another non-SRT component;
//!    rotation falls back to identity and `success` is false, scale and
//!    translation are still reported.
//!
//! The steps are strictly sequential.

use nalgebra::Quaternion;

use crate::cfg::DECOMPOSE_EPS;
use crate::quat::RotationQuat;
use crate::vector::{extend, Vec3, Vec4};

use super::AffineMatrix3D;

/// Result of [`AffineMatrix3D::decompose`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decomposition<Q = Quaternion<f64>> {
    /// Per-axis scale in the original x/y/z order; one component is negative
    /// for mirrored inputs.
    pub scale: Vec3,
    pub rotation: Q,
    pub translation: Vec3,
    /// False when the linear part is not scale·rotation.
    pub success: bool,
}

const CANONICAL_BASIS: [Vec3; 3] = [
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(0.0, 1.0, 0.0),
    Vec3::new(0.0, 0.0, 1.0),
];

/// Indices of `(largest, middle, smallest)`.
fn rank_descending(x: f64, y: f64, z: f64) -> (usize, usize, usize) {
    if x < y {
        if y < z {
            (2, 1, 0)
        } else if x < z {
            (1, 2, 0)
        } else {
            (1, 0, 2)
        }
    } else if x < z {
        (2, 0, 1)
    } else if y < z {
        (0, 2, 1)
    } else {
        (0, 1, 2)
    }
}

/// Index of the smallest of `|x|, |y|, |z|`: the canonical axis least
/// aligned with `v`.
fn least_aligned_axis(v: &Vec3) -> usize {
    let (ax, ay, az) = (v.x.abs(), v.y.abs(), v.z.abs());
    if ax < ay {
        if ay < az || ax < az {
            0
        } else {
            2
        }
    } else if ax < az || ay < az {
        1
    } else {
        2
    }
}

impl AffineMatrix3D {
    /// Decompose into scale, rotation and translation using the crate's
    /// default quaternion type.
    pub fn decompose(&self) -> Decomposition {
        self.decompose_with::<Quaternion<f64>>()
    }

    pub fn decompose_with<Q: RotationQuat>(&self) -> Decomposition<Q> {
        let translation = self.w.xyz();
        let mut basis = [self.x.xyz(), self.y.xyz(), self.z.xyz()];
        let mut scale = [basis[0].norm(), basis[1].norm(), basis[2].norm()];

        let (a, b, c) = rank_descending(scale[0], scale[1], scale[2]);

        if scale[a] < DECOMPOSE_EPS {
            basis[a] = CANONICAL_BASIS[a];
        }
        basis[a] = basis[a].normalize();

        if scale[b] < DECOMPOSE_EPS {
            let cc = least_aligned_axis(&basis[a]);
            basis[b] = basis[a].cross(&CANONICAL_BASIS[cc]);
        }
        basis[b] = basis[b].normalize();

        if scale[c] < DECOMPOSE_EPS {
            basis[c] = basis[a].cross(&basis[b]);
        }
        basis[c] = basis[c].normalize();

        let mut rotation_matrix =
            Self::from_rows(extend(basis[0], 0.0), extend(basis[1], 0.0), extend(basis[2], 0.0), Vec4::w());
        let mut det = rotation_matrix.determinant();
        if det < 0.0 {
            scale[a] = -scale[a];
            basis[a] = -basis[a];
            det = -det;
            rotation_matrix =
                Self::from_rows(extend(basis[0], 0.0), extend(basis[1], 0.0), extend(basis[2], 0.0), Vec4::w());
        }

        let scale = Vec3::new(scale[0], scale[1], scale[2]);
        let deviation = (det - 1.0) * (det - 1.0);
        if deviation > DECOMPOSE_EPS {
            tracing::debug!(det, "matrix is not scale-rotate-translate");
            return Decomposition {
                scale,
                rotation: Q::identity(),
                translation,
                success: false,
            };
        }

        Decomposition {
            scale,
            rotation: Q::from_rotation_matrix(&rotation_matrix),
            translation,
            success: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranking_tree_tie_breaks() {
        assert_eq!(rank_descending(1.0, 2.0, 3.0), (2, 1, 0));
        assert_eq!(rank_descending(3.0, 2.0, 1.0), (0, 1, 2));
        assert_eq!(rank_descending(1.0, 3.0, 2.0), (1, 2, 0));
        assert_eq!(rank_descending(2.0, 3.0, 1.0), (1, 0, 2));
        assert_eq!(rank_descending(2.0, 1.0, 3.0), (2, 0, 1));
        assert_eq!(rank_descending(3.0, 1.0, 2.0), (0, 2, 1));
        // All equal: x is treated as largest, then y.
        assert_eq!(rank_descending(1.0, 1.0, 1.0), (0, 1, 2));
        // x == y < z
        assert_eq!(rank_descending(1.0, 1.0, 2.0), (2, 0, 1));
        // x < y == z: y wins the tie for largest, z takes middle
        assert_eq!(rank_descending(1.0, 2.0, 2.0), (1, 2, 0));
        // x == z > y
        assert_eq!(rank_descending(2.0, 1.0, 2.0), (0, 2, 1));
    }

    #[test]
    fn least_aligned_axis_picks_smallest_component() {
        assert_eq!(least_aligned_axis(&Vec3::new(0.1, 0.5, 0.9)), 0);
        assert_eq!(least_aligned_axis(&Vec3::new(0.5, -0.1, 0.9)), 1);
        assert_eq!(least_aligned_axis(&Vec3::new(0.5, 0.9, -0.1)), 2);
        assert_eq!(least_aligned_axis(&Vec3::new(1.0, 0.0, 0.0)), 2);
        assert_eq!(least_aligned_axis(&Vec3::new(0.0, 0.0, 1.0)), 1);
    }

    #[test]
    fn collapsed_axes_are_rebuilt() {
        let flat = AffineMatrix3D::create_scale(2.0, 0.0, 0.0) * AffineMatrix3D::create_translation(1.0, 2.0, 3.0);
        let d = flat.decompose();
        assert!(d.success);
        assert!((d.scale - Vec3::new(2.0, 0.0, 0.0)).amax() < 1e-12);
        assert!((d.translation - Vec3::new(1.0, 2.0, 3.0)).amax() < 1e-12);
        assert!((d.rotation.norm() - 1.0).abs() < 1e-12);

        let zero = AffineMatrix3D::create_scale_uniform(0.0).decompose();
        assert!(zero.success);
        assert_eq!(zero.scale, Vec3::zeros());
    }
}
