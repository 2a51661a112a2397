//! Geometry primitives shared by the transformation record and the
//! property animations.

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 2D affine transformation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2D {
    /// Matrix elements [a, b, c, d, tx, ty]
    /// | a  c  tx |
    /// | b  d  ty |
    /// | 0  0   1 |
    pub elements: [f32; 6],
}

impl Default for Affine2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine2D {
    pub const IDENTITY: Affine2D = Affine2D {
        elements: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    pub fn translation(x: f32, y: f32) -> Self {
        Self {
            elements: [1.0, 0.0, 0.0, 1.0, x, y],
        }
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self {
            elements: [sx, 0.0, 0.0, sy, 0.0, 0.0],
        }
    }

    /// Rotation by `angle` radians (counter-clockwise in a y-up frame)
    pub fn rotation(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self {
            elements: [c, s, -s, c, 0.0, 0.0],
        }
    }

    /// Scale around a pivot point instead of the origin
    pub fn scale_about(sx: f32, sy: f32, pivot: Point) -> Self {
        if pivot == Point::ZERO {
            return Self::scale(sx, sy);
        }
        Self::translation(pivot.x, pivot.y)
            .then(&Self::scale(sx, sy))
            .then(&Self::translation(-pivot.x, -pivot.y))
    }

    /// Rotate by `degrees` around a pivot point
    pub fn rotation_degrees_about(degrees: f32, pivot: Point) -> Self {
        let rotation = Self::rotation(degrees.to_radians());
        if pivot == Point::ZERO {
            return rotation;
        }
        Self::translation(pivot.x, pivot.y)
            .then(&rotation)
            .then(&Self::translation(-pivot.x, -pivot.y))
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn transform_point(&self, point: Point) -> Point {
        let [a, b, c, d, tx, ty] = self.elements;
        Point::new(a * point.x + c * point.y + tx, b * point.x + d * point.y + ty)
    }

    /// Concatenate this transform with another (self * other)
    /// The resulting transform first applies `other`, then `self`.
    pub fn then(&self, other: &Affine2D) -> Affine2D {
        let [a1, b1, c1, d1, tx1, ty1] = self.elements;
        let [a2, b2, c2, d2, tx2, ty2] = other.elements;

        Affine2D {
            elements: [
                a1 * a2 + c1 * b2,
                b1 * a2 + d1 * b2,
                a1 * c2 + c1 * d2,
                b1 * c2 + d1 * d2,
                a1 * tx2 + c1 * ty2 + tx1,
                b1 * tx2 + d1 * ty2 + ty1,
            ],
        }
    }

    /// Determinant of the linear part; never zero for matrices built from
    /// non-zero scales, rotations and translations.
    pub fn determinant(&self) -> f32 {
        let [a, b, c, d, _, _] = self.elements;
        a * d - b * c
    }

    /// Element-wise comparison with a tolerance
    pub fn approx_eq(&self, other: &Affine2D, epsilon: f32) -> bool {
        self.elements
            .iter()
            .zip(other.elements.iter())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_then_applies_right_operand_first() {
        let m = Affine2D::translation(10.0, 0.0).then(&Affine2D::scale(2.0, 2.0));
        let p = m.transform_point(Point::new(1.0, 1.0));
        assert!((p.x - 12.0).abs() < EPS);
        assert!((p.y - 2.0).abs() < EPS);
    }

    #[test]
    fn test_scale_about_pivot_keeps_pivot_fixed() {
        let pivot = Point::new(50.0, 25.0);
        let m = Affine2D::scale_about(3.0, 0.5, pivot);
        let p = m.transform_point(pivot);
        assert!((p.x - pivot.x).abs() < EPS);
        assert!((p.y - pivot.y).abs() < EPS);
    }

    #[test]
    fn test_rotation_quarter_turn() {
        let m = Affine2D::rotation_degrees_about(90.0, Point::ZERO);
        let p = m.transform_point(Point::new(1.0, 0.0));
        assert!(p.x.abs() < EPS);
        assert!((p.y - 1.0).abs() < EPS);
    }

    #[test]
    fn test_rotation_about_pivot() {
        let pivot = Point::new(1.0, 1.0);
        let m = Affine2D::rotation_degrees_about(180.0, pivot);
        let p = m.transform_point(Point::new(2.0, 1.0));
        assert!(p.x.abs() < EPS);
        assert!((p.y - 1.0).abs() < EPS);
    }

    #[test]
    fn test_composed_transform_is_invertible() {
        let m = Affine2D::scale(2.0, 4.0)
            .then(&Affine2D::rotation(0.3))
            .then(&Affine2D::translation(5.0, -7.0));
        assert!((m.determinant() - 8.0).abs() < 1e-4);
        assert!(!m.is_identity());
        assert!(Affine2D::default().is_identity());
    }
}
