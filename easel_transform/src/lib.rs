// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easel Transform: small helpers over [`kurbo::Affine`].
//!
//! Every other Easel crate represents 2D affine maps with [`kurbo::Affine`],
//! a six-coefficient `Copy` value. This crate adds the handful of operations
//! the editor needs on top of it:
//!
//! - [`compose`]: fold an ordered list of transforms where the **first** item
//!   is the outermost (last applied) transform, matching `a * b * c` in Kurbo.
//! - [`rotate_about_degrees`]: rotation about an arbitrary center expressed in
//!   degrees, the unit the viewport stores.
//! - [`rotate_vec`]: rotate a displacement (no translation involved).
//! - [`approx_eq`] and [`is_invertible`]: tolerant comparison and a guard for
//!   degenerate matrices.
//!
//! ## Composition order
//!
//! ```rust
//! use kurbo::{Affine, Point};
//! use easel_transform::compose;
//!
//! // Scale first, then translate: the translation is outermost.
//! let m = compose([Affine::translate((10.0, 0.0)), Affine::scale(2.0)]);
//! assert_eq!(m * Point::new(1.0, 1.0), Point::new(12.0, 2.0));
//! ```
//!
//! Because [`kurbo::Affine`] is a value type, capturing a matrix for later
//! restoration is a plain copy; later edits of the live matrix can never
//! reach back into a captured snapshot.
//!
//! This crate is `no_std`.

#![no_std]

use kurbo::{Affine, Point, Vec2};

/// Default coefficient tolerance used by [`approx_eq`] callers in Easel.
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Composes transforms so that the first item is applied **last**.
///
/// `compose([t1, t2, t3])` equals `t1 * t2 * t3`: a point is mapped by `t3`,
/// then `t2`, then `t1`. An empty input yields [`Affine::IDENTITY`].
#[must_use]
pub fn compose<I>(transforms: I) -> Affine
where
    I: IntoIterator<Item = Affine>,
{
    transforms
        .into_iter()
        .fold(Affine::IDENTITY, |acc, next| acc * next)
}

/// Rotation by `degrees` (clockwise in a y-down space) about `center`.
#[must_use]
pub fn rotate_about_degrees(degrees: f64, center: Point) -> Affine {
    Affine::rotate_about(degrees.to_radians(), center)
}

/// Rotates a displacement vector by `radians` about the origin.
#[must_use]
pub fn rotate_vec(v: Vec2, radians: f64) -> Vec2 {
    if radians == 0.0 {
        return v;
    }
    (Affine::rotate(radians) * v.to_point()).to_vec2()
}

/// Returns `true` when all six coefficients of `a` and `b` differ by at most `eps`.
#[must_use]
pub fn approx_eq(a: Affine, b: Affine, eps: f64) -> bool {
    a.as_coeffs()
        .iter()
        .zip(b.as_coeffs().iter())
        .all(|(x, y)| (x - y).abs() <= eps)
}

/// Returns `true` when `m` has a finite, non-zero determinant.
#[must_use]
pub fn is_invertible(m: Affine) -> bool {
    let det = m.determinant();
    det != 0.0 && det.is_finite()
}

#[cfg(test)]
mod tests {
    use core::f64::consts::FRAC_PI_2;

    use kurbo::{Affine, Point, Vec2};

    use super::{DEFAULT_EPSILON, approx_eq, compose, is_invertible, rotate_about_degrees, rotate_vec};

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn compose_applies_rightmost_first() {
        let m = compose([Affine::translate((5.0, 0.0)), Affine::rotate(FRAC_PI_2)]);
        // Rotate (1, 0) to (0, 1), then translate.
        assert!(close(m * Point::new(1.0, 0.0), Point::new(5.0, 1.0)));

        let swapped = compose([Affine::rotate(FRAC_PI_2), Affine::translate((5.0, 0.0))]);
        assert!(close(swapped * Point::new(1.0, 0.0), Point::new(0.0, 6.0)));
    }

    #[test]
    fn empty_compose_is_identity() {
        assert_eq!(compose([]), Affine::IDENTITY);
    }

    #[test]
    fn inverse_roundtrip_is_identity() {
        let m = compose([
            Affine::translate((12.5, -3.0)),
            rotate_about_degrees(33.0, Point::new(40.0, 20.0)),
            Affine::scale_non_uniform(2.0, 0.5),
        ]);
        assert!(is_invertible(m));
        let roundtrip = (m * m.inverse()).inverse();
        assert!(approx_eq(roundtrip, Affine::IDENTITY, DEFAULT_EPSILON));
    }

    #[test]
    fn rotate_about_keeps_center_fixed() {
        let center = Point::new(50.0, 30.0);
        let m = rotate_about_degrees(90.0, center);
        assert!(close(m * center, center));
        assert!(close(m * Point::new(60.0, 30.0), Point::new(50.0, 40.0)));
    }

    #[test]
    fn rotate_vec_ignores_translation() {
        let v = rotate_vec(Vec2::new(2.0, 0.0), FRAC_PI_2);
        assert!((v.x).abs() < 1e-12);
        assert!((v.y - 2.0).abs() < 1e-12);
        assert_eq!(rotate_vec(Vec2::new(3.0, 4.0), 0.0), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn degenerate_scale_is_not_invertible() {
        assert!(!is_invertible(Affine::scale(0.0)));
        assert!(!is_invertible(Affine::new([f64::NAN, 0.0, 0.0, 1.0, 0.0, 0.0])));
    }
}
