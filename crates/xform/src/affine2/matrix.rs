//! `AffineMatrix2D`: storage, projective normalization, algebra and inverse.

use std::fmt;
use std::ops::{Add, Index, Mul, Neg, Sub};

use nalgebra::Matrix3;

use crate::cfg::{is_negligible, practically_same, DET_EPS};
use crate::error::MatrixError;
use crate::vector::{lerp2, same_value, same_vec2, Vec2};

/// 3x2 transform in the row-vector convention, optionally extended to a
/// projective 3x3.
///
/// The projective column is private so the "collapsed when negligible"
/// invariant holds for every value: a matrix reports
/// [`is_projective`](Self::is_projective) only when its third column differs
/// measurably from `(0, 0, 1)`.
#[derive(Clone, Copy, Debug)]
pub struct AffineMatrix2D {
    pub x: Vec2,
    pub y: Vec2,
    /// Translation row.
    pub z: Vec2,
    m13: f64,
    m23: f64,
    m33: f64,
    projective: bool,
}

impl Default for AffineMatrix2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineMatrix2D {
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    /// Failure value of [`inverted_or_nan`](Self::inverted_or_nan) for affine
    /// inputs.
    pub const NAN: Self = Self::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN, f64::NAN, f64::NAN);

    const NAN_PROJECTIVE: Self = Self {
        m13: f64::NAN,
        m23: f64::NAN,
        m33: f64::NAN,
        projective: true,
        ..Self::NAN
    };

    /// Affine constructor, coefficients in row-major order.
    pub const fn new(m11: f64, m12: f64, m21: f64, m22: f64, m31: f64, m32: f64) -> Self {
        Self::from_rows(Vec2::new(m11, m12), Vec2::new(m21, m22), Vec2::new(m31, m32))
    }

    #[inline]
    pub const fn from_rows(x: Vec2, y: Vec2, z: Vec2) -> Self {
        Self {
            x,
            y,
            z,
            m13: 0.0,
            m23: 0.0,
            m33: 1.0,
            projective: false,
        }
    }

    /// Projective constructor. When `m13`, `m23` are negligible and `m33` is
    /// practically 1, the result is the plain affine matrix with the third
    /// column exactly `(0, 0, 1)`.
    #[allow(clippy::too_many_arguments)]
    #[rustfmt::skip]
    pub fn new_projective(
        m11: f64, m12: f64, m13: f64,
        m21: f64, m22: f64, m23: f64,
        m31: f64, m32: f64, m33: f64,
    ) -> Self {
        let affine = Self::new(m11, m12, m21, m22, m31, m32);
        if is_negligible(m13) && is_negligible(m23) && practically_same(m33, 1.0) {
            return affine;
        }
        Self {
            m13,
            m23,
            m33,
            projective: true,
            ..affine
        }
    }

    #[inline]
    pub fn is_projective(&self) -> bool {
        self.projective
    }

    #[inline]
    pub fn m13(&self) -> f64 {
        self.m13
    }

    #[inline]
    pub fn m23(&self) -> f64 {
        self.m23
    }

    #[inline]
    pub fn m33(&self) -> f64 {
        self.m33
    }

    #[inline]
    pub fn rows(&self) -> [Vec2; 3] {
        [self.x, self.y, self.z]
    }

    /// Checked `(row, col)` access. Rows are `0..3`; columns are `0..3`,
    /// column 2 reading the projective column (`(0, 0, 1)` when affine).
    pub fn get(&self, row: usize, col: usize) -> Result<f64, MatrixError> {
        self.entry(row, col).copied().ok_or(MatrixError::IndexOutOfRange {
            row,
            col,
            rows: 3,
            cols: 3,
        })
    }

    fn entry(&self, row: usize, col: usize) -> Option<&f64> {
        let r = match row {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => return None,
        };
        match col {
            0 | 1 => Some(&r[col]),
            2 => Some(match row {
                0 => &self.m13,
                1 => &self.m23,
                _ => &self.m33,
            }),
            _ => None,
        }
    }

    /// Rows exactly `(1, 0), (0, 1), (0, 0)` and not projective.
    pub fn is_identity(&self) -> bool {
        self.ieee_eq(&Self::IDENTITY)
    }

    #[inline]
    pub fn translation(&self) -> Vec2 {
        self.z
    }

    pub fn with_translation(&self, t: Vec2) -> Self {
        Self { z: t, ..*self }
    }

    /// IEEE componentwise `==` over all nine coefficients.
    pub fn ieee_eq(&self, other: &Self) -> bool {
        self.x == other.x
            && self.y == other.y
            && self.z == other.z
            && self.m13 == other.m13
            && self.m23 == other.m23
            && self.m33 == other.m33
    }

    /// Row-major 3x3 form, `(m13, m23, m33)` as the third column.
    pub fn to_matrix3(&self) -> Matrix3<f64> {
        Matrix3::new(
            self.x.x, self.x.y, self.m13, //
            self.y.x, self.y.y, self.m23, //
            self.z.x, self.z.y, self.m33,
        )
    }

    /// Inverse of [`to_matrix3`](Self::to_matrix3), renormalizing the
    /// projective column.
    pub fn from_matrix3(m: &Matrix3<f64>) -> Self {
        Self::new_projective(
            m[(0, 0)], m[(0, 1)], m[(0, 2)], //
            m[(1, 0)], m[(1, 1)], m[(1, 2)], //
            m[(2, 0)], m[(2, 1)], m[(2, 2)],
        )
    }

    pub fn determinant(&self) -> f64 {
        if self.projective {
            return self.to_matrix3().determinant();
        }
        self.x.x * self.y.y - self.y.x * self.x.y
    }

    /// Closed-form inverse; `None` when `|det|` is below the smallest
    /// subnormal.
    pub fn invert(&self) -> Option<Self> {
        if self.projective {
            return self.invert_projective();
        }
        let det = self.determinant();
        if det.abs() < DET_EPS {
            tracing::trace!(det, "singular 3x2 matrix");
            return None;
        }
        let inv_det = 1.0 / det;
        let (m11, m12) = (self.x.x, self.x.y);
        let (m21, m22) = (self.y.x, self.y.y);
        let (m31, m32) = (self.z.x, self.z.y);
        Some(Self::new(
            m22 * inv_det,
            -m12 * inv_det,
            -m21 * inv_det,
            m11 * inv_det,
            (m21 * m32 - m31 * m22) * inv_det,
            (m31 * m12 - m11 * m32) * inv_det,
        ))
    }

    fn invert_projective(&self) -> Option<Self> {
        let m = self.to_matrix3();
        let det = m.determinant();
        if det.abs() < DET_EPS {
            tracing::trace!(det, "singular projective 3x3 matrix");
            return None;
        }
        m.try_inverse().map(|inv| Self::from_matrix3(&inv))
    }

    /// Inverse, or the all-NaN failure value when singular. A projective
    /// input yields NaN in all nine coefficients.
    pub fn inverted_or_nan(&self) -> Self {
        self.invert().unwrap_or(if self.projective {
            Self::NAN_PROJECTIVE
        } else {
            Self::NAN
        })
    }

    /// Solve `p·M = b` for `p`; NaN components when `M` is singular.
    pub fn solve(&self, b: Vec2) -> Vec2 {
        match self.invert() {
            Some(inv) => inv.transform_point(b),
            None => Vec2::repeat(f64::NAN),
        }
    }

    /// Componentwise `a + (b - a)·t`; `t` is not clamped.
    pub fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        if a.projective || b.projective {
            let (ma, mb) = (a.to_matrix3(), b.to_matrix3());
            return Self::from_matrix3(&(ma + (mb - ma) * t));
        }
        Self::from_rows(lerp2(a.x, b.x, t), lerp2(a.y, b.y, t), lerp2(a.z, b.z, t))
    }

    /// `v·M`, dividing by the homogeneous weight when projective.
    pub fn transform_point(&self, v: Vec2) -> Vec2 {
        let p = self.x * v.x + self.y * v.y + self.z;
        if !self.projective {
            return p;
        }
        let w = v.x * self.m13 + v.y * self.m23 + self.m33;
        p / w
    }

    /// Linear part only; the translation row is ignored.
    #[inline]
    pub fn transform_normal(&self, v: Vec2) -> Vec2 {
        self.x * v.x + self.y * v.y
    }

    /// Apply `f` to the six affine coefficients, or to all nine (then
    /// renormalize) when either operand is projective.
    fn zip_with(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Self {
        if self.projective || other.projective {
            let m = self.to_matrix3().zip_map(&other.to_matrix3(), f);
            return Self::from_matrix3(&m);
        }
        Self::from_rows(
            self.x.zip_map(&other.x, &f),
            self.y.zip_map(&other.y, &f),
            self.z.zip_map(&other.z, &f),
        )
    }
}

impl PartialEq for AffineMatrix2D {
    fn eq(&self, other: &Self) -> bool {
        same_vec2(&self.x, &other.x)
            && same_vec2(&self.y, &other.y)
            && same_vec2(&self.z, &other.z)
            && same_value(self.m13, other.m13)
            && same_value(self.m23, other.m23)
            && same_value(self.m33, other.m33)
    }
}

impl Eq for AffineMatrix2D {}

impl Index<(usize, usize)> for AffineMatrix2D {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        match self.entry(row, col) {
            Some(v) => v,
            None => panic!("matrix index ({row}, {col}) out of range for 3x3"),
        }
    }
}

impl Add for AffineMatrix2D {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        self.zip_with(&rhs, |a, b| a + b)
    }
}

impl Sub for AffineMatrix2D {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self.zip_with(&rhs, |a, b| a - b)
    }
}

impl Neg for AffineMatrix2D {
    type Output = Self;
    fn neg(self) -> Self {
        if self.projective {
            return Self::from_matrix3(&-self.to_matrix3());
        }
        Self::from_rows(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for AffineMatrix2D {
    type Output = Self;
    fn mul(self, s: f64) -> Self {
        if self.projective {
            return Self::from_matrix3(&(self.to_matrix3() * s));
        }
        Self::from_rows(self.x * s, self.y * s, self.z * s)
    }
}

/// Composition: `a * b` applies `a` first, then `b`.
impl Mul for AffineMatrix2D {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        if self.projective || rhs.projective {
            return Self::from_matrix3(&(self.to_matrix3() * rhs.to_matrix3()));
        }
        Self::from_rows(
            rhs.transform_normal(self.x),
            rhs.transform_normal(self.y),
            rhs.transform_normal(self.z) + rhs.z,
        )
    }
}

impl fmt::Display for AffineMatrix2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;
        let third = [self.m13, self.m23, self.m33];
        for (i, (r, m3)) in self.rows().iter().zip(third).enumerate() {
            let n = i + 1;
            if self.projective {
                write!(f, "{{M{n}1:{} M{n}2:{} M{n}3:{}}} ", r.x, r.y, m3)?;
            } else {
                write!(f, "{{M{n}1:{} M{n}2:{}}} ", r.x, r.y)?;
            }
        }
        write!(f, "}}")
    }
}
