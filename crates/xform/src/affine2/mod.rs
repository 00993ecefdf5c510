//! 2D transforms: a 3x2 affine matrix with an optional projective column.
//!
//! Purpose
//! - `AffineMatrix2D` carries rotation/scale/skew/translation in six
//!   coefficients. A third column `(m13, m23, m33)` is kept only when it
//!   carries information; the constructor collapses a negligible projective
//!   column back to `(0, 0, 1)` exactly.
//!
//! Conventions
//! - Row vectors, `v' = v·M`; `a * b` applies `a` first.
//! - Rows `x`, `y` are the linear part, row `z` is the translation.
//! - Affine inputs go through the closed 3x2 formulas. As soon as one operand
//!   is projective the full 3x3 form is used and the result renormalized.
//!
//! Code cross-refs: `crate::cfg::{is_negligible, practically_same}`.

mod factories;
mod matrix;

pub use matrix::AffineMatrix2D;

#[cfg(test)]
mod tests;
