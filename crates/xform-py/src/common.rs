use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use xform::{AffineMatrix3D, MatrixError};

pub fn map_matrix_err(err: MatrixError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

pub fn matrix_from_py(coeffs: Vec<f64>) -> PyResult<AffineMatrix3D> {
    xform::api::matrix_from_coeffs(&coeffs).map_err(map_matrix_err)
}
