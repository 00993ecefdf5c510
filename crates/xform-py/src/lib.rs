//! PyO3 bindings for selected `xform` functions.
//!
//! Notes
//! - Keep bindings thin and predictable: matrices travel as flat coefficient
//!   lists (3, 12 or 16 values, row-vector convention), points as tuples.
//! - Precondition errors surface as `ValueError`; a singular inverse is
//!   `None`, not an exception.

use nalgebra::Vector2;
use pyo3::prelude::*;
use xform::api::{self, DecomposedParts};
use xform::AffineMatrix2D;

mod common;

use common::matrix_from_py;

type Triple = (f64, f64, f64);

/// Decompose into `(scale, rotation_xyzw, translation, success)`.
#[pyfunction]
fn decompose(coeffs: Vec<f64>) -> PyResult<(Triple, (f64, f64, f64, f64), Triple, bool)> {
    let m = matrix_from_py(coeffs)?;
    let DecomposedParts {
        scale: s,
        rotation: r,
        translation: t,
        success,
    } = m.decompose().into();
    Ok(((s[0], s[1], s[2]), (r[0], r[1], r[2], r[3]), (t[0], t[1], t[2]), success))
}

/// Sixteen row-major inverse coefficients, or `None` when singular.
#[pyfunction]
fn invert(coeffs: Vec<f64>) -> PyResult<Option<Vec<f64>>> {
    let m = matrix_from_py(coeffs)?;
    Ok(m.invert().map(|inv| api::matrix_to_coeffs(&inv).to_vec()))
}

#[pyfunction]
fn determinant(coeffs: Vec<f64>) -> PyResult<f64> {
    Ok(matrix_from_py(coeffs)?.determinant())
}

/// Transform points as rows: `p' = p·M`.
#[pyfunction]
fn transform_points(coeffs: Vec<f64>, points: Vec<Triple>) -> PyResult<Vec<Triple>> {
    let m = matrix_from_py(coeffs)?;
    let mut pts: Vec<[f64; 3]> = points.into_iter().map(|(x, y, z)| [x, y, z]).collect();
    api::transform_xyz(&m, &mut pts);
    Ok(pts.into_iter().map(|[x, y, z]| (x, y, z)).collect())
}

/// 2D rotation about `center` as six coefficients `m11 m12 m21 m22 m31 m32`.
#[pyfunction]
#[pyo3(signature = (radians, center=(0.0, 0.0)))]
fn rotation_2d(radians: f64, center: (f64, f64)) -> Vec<f64> {
    let m = AffineMatrix2D::create_rotation_about(radians, Vector2::new(center.0, center.1));
    m.rows().iter().flat_map(|r| [r.x, r.y]).collect()
}

#[pymodule]
fn xform_native(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add("__version__", xform::VERSION)?;
    m.add_function(wrap_pyfunction!(decompose, m)?)?;
    m.add_function(wrap_pyfunction!(invert, m)?)?;
    m.add_function(wrap_pyfunction!(determinant, m)?)?;
    m.add_function(wrap_pyfunction!(transform_points, m)?)?;
    m.add_function(wrap_pyfunction!(rotation_2d, m)?)?;
    Ok(())
}
