//! The transformation record animations write into.
//!
//! A [`Transformation`] holds the visual state produced for one tick: an alpha
//! multiplier and an affine matrix. The host allocates one per tick (or clears
//! and reuses one), hands it to an animation by `&mut`, and reads it back.

use crate::geometry::{Affine2D, Point};
use std::fmt;

/// Current alpha and transform matrix of an animated object
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transformation {
    /// Alpha multiplier. Not clamped here; consumers clamp when drawing.
    pub alpha: f32,
    /// Accumulated affine transform
    pub matrix: Affine2D,
}

impl Default for Transformation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transformation {
    pub const IDENTITY: Transformation = Transformation {
        alpha: 1.0,
        matrix: Affine2D::IDENTITY,
    };

    pub fn new() -> Self {
        Self::IDENTITY
    }

    /// Reset to fully opaque and identity matrix
    pub fn clear(&mut self) {
        *self = Self::IDENTITY;
    }

    /// Copy all fields from another transformation
    pub fn set(&mut self, other: &Transformation) {
        *self = *other;
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    /// Post-multiply the matrix by `op` (`matrix = matrix * op`)
    pub fn concat(&mut self, op: &Affine2D) {
        self.matrix = self.matrix.then(op);
    }

    /// Merge another transformation onto this one.
    ///
    /// Alpha values multiply and the other matrix is post-multiplied, so
    /// composing in declaration order never discards an earlier contribution.
    pub fn compose(&mut self, other: &Transformation) {
        self.compose_fields(other, true, true);
    }

    /// Like [`compose`](Self::compose), restricted to the fields a
    /// contributor actually changes.
    pub fn compose_fields(&mut self, other: &Transformation, alpha: bool, matrix: bool) {
        if alpha {
            self.alpha *= other.alpha;
        }
        if matrix && !other.matrix.is_identity() {
            self.concat(&other.matrix);
        }
    }

    pub fn transform_point(&self, point: Point) -> Point {
        self.matrix.transform_point(point)
    }

    /// Compact single-line form for logs
    pub fn to_short_string(&self) -> String {
        let [a, b, c, d, tx, ty] = self.matrix.elements;
        format!(
            "{{alpha={:.3} matrix=[{:.3}, {:.3}, {:.3}, {:.3}, {:.3}, {:.3}]}}",
            self.alpha, a, b, c, d, tx, ty
        )
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transformation{}", self.to_short_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_identity() {
        let t = Transformation::new();
        assert_eq!(t.alpha, 1.0);
        assert!(t.matrix.is_identity());
        assert_eq!(t, Transformation::default());
    }

    #[test]
    fn test_compose_multiplies_alpha() {
        let mut t = Transformation::new();
        t.set_alpha(0.5);
        let mut other = Transformation::new();
        other.set_alpha(0.5);
        t.compose(&other);
        assert!((t.alpha - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_compose_post_multiplies_matrix() {
        let mut t = Transformation::new();
        t.concat(&Affine2D::translation(10.0, 0.0));
        let mut other = Transformation::new();
        other.concat(&Affine2D::scale(2.0, 2.0));
        t.compose(&other);

        // Scale applies first, then the earlier translation.
        let p = t.transform_point(Point::new(1.0, 0.0));
        assert!((p.x - 12.0).abs() < 1e-5);
    }

    #[test]
    fn test_compose_fields_skips_untouched() {
        let mut t = Transformation::new();
        let mut other = Transformation::new();
        other.set_alpha(0.0);
        other.concat(&Affine2D::scale(3.0, 3.0));
        t.compose_fields(&other, false, true);
        assert_eq!(t.alpha, 1.0);
        assert_eq!(t.matrix, Affine2D::scale(3.0, 3.0));
    }

    #[test]
    fn test_clear_and_set() {
        let mut t = Transformation::new();
        t.set_alpha(0.2);
        t.concat(&Affine2D::translation(1.0, 2.0));

        let mut copy = Transformation::new();
        copy.set(&t);
        assert_eq!(copy, t);

        t.clear();
        assert_eq!(t, Transformation::IDENTITY);
        assert!(copy.to_short_string().starts_with("{alpha=0.200"));
    }
}
