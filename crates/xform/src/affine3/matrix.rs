//! `AffineMatrix3D`: storage, algebra, determinant and closed-form inverse.

use std::fmt;
use std::ops::{Add, Index, Mul, Neg, Sub};
use std::str::FromStr;

use crate::cfg::DET_EPS;
use crate::error::MatrixError;
use crate::vector::{lerp4, same_vec4, Vec3, Vec4};

/// 4x4 homogeneous transform in the row-vector convention (`v' = v·M`).
///
/// Rows `x`, `y`, `z` hold the linear part (plus the projective column in
/// their fourth component); `w` holds the translation in `xyz` and the
/// homogeneous weight in `w`.
///
/// Equality is value equality where NaN equals NaN; use [`ieee_eq`] for the
/// IEEE comparison.
///
/// [`ieee_eq`]: AffineMatrix3D::ieee_eq
#[derive(Clone, Copy, Debug)]
pub struct AffineMatrix3D {
    pub x: Vec4,
    pub y: Vec4,
    pub z: Vec4,
    pub w: Vec4,
}

impl Default for AffineMatrix3D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineMatrix3D {
    pub const IDENTITY: Self = Self::from_rows(
        Vec4::new(1.0, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 1.0, 0.0, 0.0),
        Vec4::new(0.0, 0.0, 1.0, 0.0),
        Vec4::new(0.0, 0.0, 0.0, 1.0),
    );

    /// Failure value of [`inverted_or_nan`](Self::inverted_or_nan).
    pub const NAN: Self = Self::from_rows(
        Vec4::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN),
        Vec4::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN),
        Vec4::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN),
        Vec4::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN),
    );

    #[inline]
    pub const fn from_rows(x: Vec4, y: Vec4, z: Vec4, w: Vec4) -> Self {
        Self { x, y, z, w }
    }

    /// Raw constructor, coefficients in row-major order.
    #[allow(clippy::too_many_arguments)]
    #[rustfmt::skip]
    pub const fn new(
        m11: f64, m12: f64, m13: f64, m14: f64,
        m21: f64, m22: f64, m23: f64, m24: f64,
        m31: f64, m32: f64, m33: f64, m34: f64,
        m41: f64, m42: f64, m43: f64, m44: f64,
    ) -> Self {
        Self::from_rows(
            Vec4::new(m11, m12, m13, m14),
            Vec4::new(m21, m22, m23, m24),
            Vec4::new(m31, m32, m33, m34),
            Vec4::new(m41, m42, m43, m44),
        )
    }

    /// Linear part from three basis rows, translation from `w`.
    pub fn from_basis(x: Vec3, y: Vec3, z: Vec3, translation: Vec3) -> Self {
        Self::new(
            x.x, x.y, x.z, 0.0, //
            y.x, y.y, y.z, 0.0, //
            z.x, z.y, z.z, 0.0, //
            translation.x, translation.y, translation.z, 1.0,
        )
    }

    /// Instance transform from a coefficient array:
    /// - 3 values: a pure translation;
    /// - 12 values: `m11 m12 m13 m21 m22 m23 m31 m32 m33 m41 m42 m43`, the
    ///   projective column fixed to `(0, 0, 0, 1)`;
    /// - 16 values: the full matrix, row-major.
    pub fn from_instance_transform(values: &[f64]) -> Result<Self, MatrixError> {
        match *values {
            [tx, ty, tz] => Ok(Self::create_translation(tx, ty, tz)),
            [m11, m12, m13, m21, m22, m23, m31, m32, m33, m41, m42, m43] => Ok(Self::new(
                m11, m12, m13, 0.0, //
                m21, m22, m23, 0.0, //
                m31, m32, m33, 0.0, //
                m41, m42, m43, 1.0,
            )),
            [m11, m12, m13, m14, m21, m22, m23, m24, m31, m32, m33, m34, m41, m42, m43, m44] => {
                Ok(Self::new(
                    m11, m12, m13, m14, //
                    m21, m22, m23, m24, //
                    m31, m32, m33, m34, //
                    m41, m42, m43, m44,
                ))
            }
            _ => Err(MatrixError::CoefficientCount { got: values.len() }),
        }
    }

    #[inline]
    pub fn rows(&self) -> [Vec4; 4] {
        [self.x, self.y, self.z, self.w]
    }

    #[inline]
    fn row(&self, i: usize) -> Option<&Vec4> {
        match i {
            0 => Some(&self.x),
            1 => Some(&self.y),
            2 => Some(&self.z),
            3 => Some(&self.w),
            _ => None,
        }
    }

    /// Checked `(row, col)` access; both indices must be in `0..4`.
    pub fn get(&self, row: usize, col: usize) -> Result<f64, MatrixError> {
        self.row(row)
            .filter(|_| col < 4)
            .map(|r| r[col])
            .ok_or(MatrixError::IndexOutOfRange {
                row,
                col,
                rows: 4,
                cols: 4,
            })
    }

    /// Exact comparison against the identity, no tolerance.
    pub fn is_identity(&self) -> bool {
        self.ieee_eq(&Self::IDENTITY)
    }

    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.w.xyz()
    }

    pub fn with_translation(&self, t: Vec3) -> Self {
        Self {
            w: Vec4::new(t.x, t.y, t.z, self.w.w),
            ..*self
        }
    }

    /// IEEE componentwise `==` (NaN is unequal to everything).
    pub fn ieee_eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y && self.z == other.z && self.w == other.w
    }

    pub fn transpose(&self) -> Self {
        let (x, y, z, w) = (self.x, self.y, self.z, self.w);
        Self::new(
            x.x, y.x, z.x, w.x, //
            x.y, y.y, z.y, w.y, //
            x.z, y.z, z.z, w.z, //
            x.w, y.w, z.w, w.w,
        )
    }

    /// Componentwise `a + (b - a)·t` over all sixteen entries.
    pub fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self::from_rows(
            lerp4(a.x, b.x, t),
            lerp4(a.y, b.y, t),
            lerp4(a.z, b.z, t),
            lerp4(a.w, b.w, t),
        )
    }

    /// Laplace expansion along the first row, sharing the lower 2x2 minors
    /// with [`invert`](Self::invert).
    pub fn determinant(&self) -> f64 {
        let (a, b, c, d) = (self.x.x, self.x.y, self.x.z, self.x.w);
        let (e, f, g, h) = (self.y.x, self.y.y, self.y.z, self.y.w);
        let (i, j, k, l) = (self.z.x, self.z.y, self.z.z, self.z.w);
        let (m, n, o, p) = (self.w.x, self.w.y, self.w.z, self.w.w);

        let kp_lo = k * p - l * o;
        let jp_ln = j * p - l * n;
        let jo_kn = j * o - k * n;
        let ip_lm = i * p - l * m;
        let io_km = i * o - k * m;
        let in_jm = i * n - j * m;

        a * (f * kp_lo - g * jp_ln + h * jo_kn) - b * (e * kp_lo - g * ip_lm + h * io_km)
            + c * (e * jp_ln - f * ip_lm + h * in_jm)
            - d * (e * jo_kn - f * io_km + g * in_jm)
    }

    /// Closed-form cofactor inverse; `None` when `|det|` is below the
    /// smallest subnormal.
    pub fn invert(&self) -> Option<Self> {
        let (a, b, c, d) = (self.x.x, self.x.y, self.x.z, self.x.w);
        let (e, f, g, h) = (self.y.x, self.y.y, self.y.z, self.y.w);
        let (i, j, k, l) = (self.z.x, self.z.y, self.z.z, self.z.w);
        let (m, n, o, p) = (self.w.x, self.w.y, self.w.z, self.w.w);

        let kp_lo = k * p - l * o;
        let jp_ln = j * p - l * n;
        let jo_kn = j * o - k * n;
        let ip_lm = i * p - l * m;
        let io_km = i * o - k * m;
        let in_jm = i * n - j * m;

        let a11 = f * kp_lo - g * jp_ln + h * jo_kn;
        let a12 = -(e * kp_lo - g * ip_lm + h * io_km);
        let a13 = e * jp_ln - f * ip_lm + h * in_jm;
        let a14 = -(e * jo_kn - f * io_km + g * in_jm);

        let det = a * a11 + b * a12 + c * a13 + d * a14;
        if det.abs() < DET_EPS {
            tracing::trace!(det, "singular 4x4 matrix");
            return None;
        }
        let inv_det = 1.0 / det;

        let gp_ho = g * p - h * o;
        let fp_hn = f * p - h * n;
        let fo_gn = f * o - g * n;
        let ep_hm = e * p - h * m;
        let eo_gm = e * o - g * m;
        let en_fm = e * n - f * m;

        let gl_hk = g * l - h * k;
        let fl_hj = f * l - h * j;
        let fk_gj = f * k - g * j;
        let el_hi = e * l - h * i;
        let ek_gi = e * k - g * i;
        let ej_fi = e * j - f * i;

        Some(Self::new(
            a11 * inv_det,
            -(b * kp_lo - c * jp_ln + d * jo_kn) * inv_det,
            (b * gp_ho - c * fp_hn + d * fo_gn) * inv_det,
            -(b * gl_hk - c * fl_hj + d * fk_gj) * inv_det,
            //
            a12 * inv_det,
            (a * kp_lo - c * ip_lm + d * io_km) * inv_det,
            -(a * gp_ho - c * ep_hm + d * eo_gm) * inv_det,
            (a * gl_hk - c * el_hi + d * ek_gi) * inv_det,
            //
            a13 * inv_det,
            -(a * jp_ln - b * ip_lm + d * in_jm) * inv_det,
            (a * fp_hn - b * ep_hm + d * en_fm) * inv_det,
            -(a * fl_hj - b * el_hi + d * ej_fi) * inv_det,
            //
            a14 * inv_det,
            (a * jo_kn - b * io_km + c * in_jm) * inv_det,
            -(a * fo_gn - b * eo_gm + c * en_fm) * inv_det,
            (a * fk_gj - b * ek_gi + c * ej_fi) * inv_det,
        ))
    }

    /// Inverse, or [`AffineMatrix3D::NAN`] when singular.
    #[inline]
    pub fn inverted_or_nan(&self) -> Self {
        self.invert().unwrap_or(Self::NAN)
    }
}

impl PartialEq for AffineMatrix3D {
    fn eq(&self, other: &Self) -> bool {
        same_vec4(&self.x, &other.x)
            && same_vec4(&self.y, &other.y)
            && same_vec4(&self.z, &other.z)
            && same_vec4(&self.w, &other.w)
    }
}

impl Eq for AffineMatrix3D {}

impl Index<(usize, usize)> for AffineMatrix3D {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        match self.row(row) {
            Some(r) if col < 4 => &r[col],
            _ => panic!("matrix index ({row}, {col}) out of range for 4x4"),
        }
    }
}

impl Add for AffineMatrix3D {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::from_rows(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl Sub for AffineMatrix3D {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::from_rows(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.w - rhs.w)
    }
}

impl Neg for AffineMatrix3D {
    type Output = Self;
    fn neg(self) -> Self {
        Self::from_rows(-self.x, -self.y, -self.z, -self.w)
    }
}

impl Mul<f64> for AffineMatrix3D {
    type Output = Self;
    fn mul(self, s: f64) -> Self {
        Self::from_rows(self.x * s, self.y * s, self.z * s, self.w * s)
    }
}

/// Composition: `a * b` applies `a` first, then `b`.
impl Mul for AffineMatrix3D {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::from_rows(
            rhs.transform_vector4(self.x),
            rhs.transform_vector4(self.y),
            rhs.transform_vector4(self.z),
            rhs.transform_vector4(self.w),
        )
    }
}

impl fmt::Display for AffineMatrix3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;
        for (i, r) in self.rows().iter().enumerate() {
            let n = i + 1;
            write!(
                f,
                "{{M{n}1:{} M{n}2:{} M{n}3:{} M{n}4:{}}} ",
                r.x, r.y, r.z, r.w
            )?;
        }
        write!(f, "}}")
    }
}

/// Parses 3, 12 or 16 coefficients separated by whitespace and/or commas,
/// with the meaning of [`AffineMatrix3D::from_instance_transform`].
impl FromStr for AffineMatrix3D {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .map(|t| t.parse::<f64>().map_err(|_| MatrixError::Parse(t.to_string())))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_instance_transform(&values)
    }
}
