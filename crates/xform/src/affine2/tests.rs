use super::*;
use crate::error::MatrixError;
use crate::vector::Vec2;
use nalgebra::vector;
use proptest::prelude::*;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

fn max_abs_diff(a: &AffineMatrix2D, b: &AffineMatrix2D) -> f64 {
    (a.to_matrix3() - b.to_matrix3()).amax()
}

fn assert_close(a: &AffineMatrix2D, b: &AffineMatrix2D, tol: f64) {
    let d = max_abs_diff(a, b);
    assert!(d < tol, "matrices differ by {d}:\n{a}\n{b}");
}

fn perspective_like() -> AffineMatrix2D {
    AffineMatrix2D::new_projective(
        2.0, 0.0, 0.5, //
        0.0, 1.0, 0.25, //
        1.0, -1.0, 2.0,
    )
}

#[test]
fn rotation_snaps_at_canonical_angles() {
    let r0 = AffineMatrix2D::create_rotation(0.0);
    assert!(r0.is_identity());
    let r90 = AffineMatrix2D::create_rotation(FRAC_PI_2);
    assert_eq!(r90.x, vector![0.0, 1.0]);
    assert_eq!(r90.y, vector![-1.0, 0.0]);
    assert_eq!(r90.transform_point(vector![1.0, 0.0]), vector![0.0, 1.0]);
    let r180 = AffineMatrix2D::create_rotation(PI);
    assert_eq!(r180.x, vector![-1.0, 0.0]);
    let r270 = AffineMatrix2D::create_rotation(-FRAC_PI_2);
    assert_eq!(r270.x, vector![0.0, -1.0]);
}

#[test]
fn rotation_about_center_fixes_it() {
    let c = vector![3.0, -2.0];
    let m = AffineMatrix2D::create_rotation_about(0.7, c);
    assert!((m.transform_point(c) - c).amax() < 1e-14);
    let explicit = AffineMatrix2D::create_translation_vec(-c)
        * AffineMatrix2D::create_rotation(0.7)
        * AffineMatrix2D::create_translation_vec(c);
    assert_close(&m, &explicit, 1e-14);
}

#[test]
fn scale_overloads_agree() {
    let c = vector![1.0, 4.0];
    assert_eq!(AffineMatrix2D::create_scale_uniform(3.0), AffineMatrix2D::create_scale(3.0, 3.0));
    assert_eq!(
        AffineMatrix2D::create_scale_vec(vector![2.0, 5.0]),
        AffineMatrix2D::create_scale(2.0, 5.0)
    );
    assert_eq!(
        AffineMatrix2D::create_scale_about(2.0, 5.0, c),
        AffineMatrix2D::create_scale_vec_about(vector![2.0, 5.0], c)
    );
    let m = AffineMatrix2D::create_scale_uniform_about(3.0, c);
    assert_eq!(m.translation(), vector![-2.0, -8.0]);
    assert_eq!(m.transform_point(c), c);
    assert_eq!(AffineMatrix2D::create_scale(2.0, 5.0).translation(), Vec2::zeros());
}

#[test]
fn skew_shears_and_pivots() {
    let m = AffineMatrix2D::create_skew(FRAC_PI_4, 0.0);
    let p = m.transform_point(vector![0.0, 2.0]);
    assert!((p - vector![2.0, 2.0]).amax() < 1e-15);

    let c = vector![1.0, 3.0];
    let about = AffineMatrix2D::create_skew_about(0.3, -0.2, c);
    assert!((about.transform_point(c) - c).amax() < 1e-15);
    assert_eq!(about.translation(), vector![-3.0 * 0.3f64.tan(), -(-0.2f64).tan()]);
}

#[test]
fn composition_follows_row_vector_order() {
    let r = AffineMatrix2D::create_rotation(FRAC_PI_2);
    let t = AffineMatrix2D::create_translation(10.0, 0.0);
    assert_eq!((r * t).transform_point(vector![1.0, 0.0]), vector![10.0, 1.0]);
    assert_eq!((t * r).transform_point(vector![1.0, 0.0]), vector![0.0, 11.0]);
    let m = r * t;
    assert_eq!(m.transform_normal(vector![1.0, 0.0]), vector![0.0, 1.0]);
}

#[test]
fn affine_inverse_and_determinant() {
    let m = AffineMatrix2D::new(2.0, 1.0, -1.0, 3.0, 4.0, 5.0);
    assert_eq!(m.determinant(), 7.0);
    let inv = m.invert().expect("det 7");
    assert_close(&(m * inv), &AffineMatrix2D::IDENTITY, 1e-14);
    assert_close(&(inv * m), &AffineMatrix2D::IDENTITY, 1e-14);
    assert_eq!(AffineMatrix2D::IDENTITY.determinant(), 1.0);
}

#[test]
fn singular_inverse_is_all_nan() {
    let m = AffineMatrix2D::create_scale(0.0, 1.0);
    assert!(m.invert().is_none());
    assert_eq!(m.inverted_or_nan(), AffineMatrix2D::NAN);
    assert!(m.solve(vector![1.0, 1.0]).iter().all(|c| c.is_nan()));

    let p = AffineMatrix2D::new_projective(
        1.0, 2.0, 0.5, //
        2.0, 4.0, 1.0, //
        0.0, 0.0, 1.0,
    );
    assert!(p.is_projective());
    let nan = p.inverted_or_nan();
    assert!(nan.is_projective());
    assert!(nan.to_matrix3().iter().all(|c| c.is_nan()));
}

#[test]
fn solve_undoes_transform_point() {
    let m = AffineMatrix2D::create_rotation(0.4) * AffineMatrix2D::create_translation(-2.0, 7.0);
    let p = vector![1.5, -0.5];
    let b = m.transform_point(p);
    assert!((m.solve(b) - p).amax() < 1e-13);
}

#[test]
fn projective_column_collapses_exactly() {
    let m = AffineMatrix2D::new_projective(
        1.0, 0.0, 1e-12, //
        0.0, 1.0, 1e-12, //
        0.0, 0.0, 0.9999999999,
    );
    assert!(!m.is_projective());
    assert_eq!(m.m13(), 0.0);
    assert_eq!(m.m23(), 0.0);
    assert_eq!(m.m33(), 1.0);
    assert!(m.is_identity());

    let p = perspective_like();
    assert!(p.is_projective());
    assert_eq!(p.m13(), 0.5);
}

#[test]
fn projective_algebra_uses_full_form() {
    let p = perspective_like();
    let t = AffineMatrix2D::create_translation(1.0, 2.0);
    let composed = p * t;
    assert_eq!(composed.to_matrix3(), p.to_matrix3() * t.to_matrix3());
    assert!((p.determinant() - p.to_matrix3().determinant()).abs() < 1e-15);

    let inv = p.invert().expect("non-singular");
    let product = p * inv;
    assert!(!product.is_projective());
    assert_close(&product, &AffineMatrix2D::IDENTITY, 1e-12);
}

#[test]
fn projective_transform_divides_by_weight() {
    let p = perspective_like();
    let v = vector![1.0, 2.0];
    // (x, y, 1)·M = (2 + 1, 2 - 1, 0.5 + 0.5 + 2)
    let expected = vector![3.0, 1.0] / 3.0;
    assert!((p.transform_point(v) - expected).amax() < 1e-15);
}

#[test]
fn lerp_endpoints_and_midpoint() {
    let a = AffineMatrix2D::create_scale(2.0, 4.0);
    let b = AffineMatrix2D::create_translation(6.0, -2.0);
    assert_eq!(AffineMatrix2D::lerp(&a, &b, 0.0), a);
    assert_eq!(AffineMatrix2D::lerp(&a, &b, 1.0), b);
    assert_eq!(
        AffineMatrix2D::lerp(&a, &b, 0.5),
        AffineMatrix2D::new(1.5, 0.0, 0.0, 2.5, 3.0, -1.0)
    );
    let p = perspective_like();
    assert_eq!(AffineMatrix2D::lerp(&AffineMatrix2D::IDENTITY, &p, 1.0), p);
}

#[test]
fn operators_act_on_coefficients() {
    let a = AffineMatrix2D::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
    let b = AffineMatrix2D::new(6.0, 5.0, 4.0, 3.0, 2.0, 1.0);
    assert_eq!(a + b, AffineMatrix2D::new(7.0, 7.0, 7.0, 7.0, 7.0, 7.0));
    assert_eq!(a - a, AffineMatrix2D::IDENTITY * 0.0);
    assert_eq!(-a, a * -1.0);
    assert_eq!((a * 2.0).m33(), 1.0);
}

#[test]
fn checked_index_covers_projective_column() {
    let m = AffineMatrix2D::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
    assert_eq!(m.get(2, 1), Ok(6.0));
    assert_eq!(m.get(2, 2), Ok(1.0));
    assert_eq!(m[(1, 0)], 3.0);
    assert_eq!(
        m.get(3, 0),
        Err(MatrixError::IndexOutOfRange {
            row: 3,
            col: 0,
            rows: 3,
            cols: 3
        })
    );
    assert!(m.get(0, 3).is_err());
}

#[test]
#[should_panic(expected = "out of range")]
fn index_panics_past_last_row() {
    let _ = AffineMatrix2D::IDENTITY[(3, 0)];
}

#[test]
fn nan_equality_is_value_equality() {
    assert_eq!(AffineMatrix2D::NAN, AffineMatrix2D::NAN);
    assert!(!AffineMatrix2D::NAN.ieee_eq(&AffineMatrix2D::NAN));
    assert!(AffineMatrix2D::IDENTITY.ieee_eq(&AffineMatrix2D::default()));
}

#[test]
fn display_lists_coefficients() {
    let m = AffineMatrix2D::create_translation(1.0, 2.0);
    assert_eq!(m.to_string(), "{ {M11:1 M12:0} {M21:0 M22:1} {M31:1 M32:2} }");
    let p = perspective_like();
    assert!(p.to_string().starts_with("{ {M11:2 M12:0 M13:0.5}"));
}

proptest! {
    #[test]
    fn rotation_round_trip(theta in -20.0f64..20.0) {
        let m = AffineMatrix2D::create_rotation(theta) * AffineMatrix2D::create_rotation(-theta);
        prop_assert!(max_abs_diff(&m, &AffineMatrix2D::IDENTITY) < 1e-9);
    }

    #[test]
    fn double_inverse(c in proptest::array::uniform6(-10.0f64..10.0)) {
        let m = AffineMatrix2D::new(c[0], c[1], c[2], c[3], c[4], c[5]);
        prop_assume!(m.determinant().abs() > 0.1);
        let back = m.inverted_or_nan().inverted_or_nan();
        prop_assert!(max_abs_diff(&back, &m) < 1e-8);
    }

    #[test]
    fn determinant_is_multiplicative(
        a in proptest::array::uniform6(-10.0f64..10.0),
        b in proptest::array::uniform6(-10.0f64..10.0),
    ) {
        let a = AffineMatrix2D::new(a[0], a[1], a[2], a[3], a[4], a[5]);
        let b = AffineMatrix2D::new(b[0], b[1], b[2], b[3], b[4], b[5]);
        let lhs = (a * b).determinant();
        let rhs = a.determinant() * b.determinant();
        prop_assert!((lhs - rhs).abs() < 1e-6, "{lhs} vs {rhs}");
    }
}
