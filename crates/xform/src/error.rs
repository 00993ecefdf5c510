//! Error kinds for precondition violations.
//!
//! Expected failures (singular `invert`, non-SRT `decompose`) are not errors:
//! they are reported through `Option`/`Decomposition::success`. Everything in
//! `MatrixError` is a caller mistake that must not be retried unchanged.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    /// Indexed access outside the matrix shape.
    #[error("index ({row}, {col}) out of range for a {rows}x{cols} matrix")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    /// A factory argument outside its domain (projection planes, field of view).
    #[error("invalid argument `{name}` = {value}: {reason}")]
    InvalidArgument {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// Instance transforms carry 3, 12 or 16 coefficients.
    #[error("expected 3, 12 or 16 transform coefficients, got {got}")]
    CoefficientCount { got: usize },
    /// A coefficient in a textual transform did not parse as a number.
    #[error("cannot parse transform coefficient {0:?}")]
    Parse(String),
}

impl MatrixError {
    #[inline]
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        MatrixError::InvalidArgument {
            name,
            value,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let e = MatrixError::IndexOutOfRange {
            row: 4,
            col: 0,
            rows: 4,
            cols: 4,
        };
        assert_eq!(e.to_string(), "index (4, 0) out of range for a 4x4 matrix");
        let e = MatrixError::invalid("near_plane_distance", -1.0, "must be positive");
        assert_eq!(
            e.to_string(),
            "invalid argument `near_plane_distance` = -1: must be positive"
        );
        assert!(MatrixError::CoefficientCount { got: 5 }
            .to_string()
            .contains("got 5"));
    }
}
