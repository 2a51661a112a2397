//! Property animations
//!
//! Each property turns an interpolated time into a concrete change on a
//! [`Transformation`]: alpha is written directly, while scale, rotate and
//! translate post-multiply the matrix so several of them compose in order.

use kinetic_core::{Affine2D, ConfigError, Point, Transformation};
use std::fmt;
use std::sync::Arc;

/// Per-property hook invoked with the interpolated time of each tick.
///
/// Implementations must be pure functions of `interpolated_time` and their own
/// fields. `interpolated_time` can leave `[0, 1]` when the interpolator
/// overshoots.
pub trait ApplyTransformation: fmt::Debug + Send + Sync {
    fn apply_transformation(&self, interpolated_time: f32, t: &mut Transformation);

    /// Whether this property writes the alpha channel
    fn changes_alpha(&self) -> bool {
        false
    }

    /// Whether this property writes the transform matrix
    fn changes_matrix(&self) -> bool {
        false
    }

    /// Reject parameters that would produce an unusable transformation.
    /// Called once when the owning animation is built.
    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }
}

#[inline]
fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Fades the alpha channel
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Alpha {
    /// Starting alpha, where 1.0 is fully opaque
    pub from: f32,
    /// Ending alpha
    pub to: f32,
}

impl Alpha {
    pub fn new(from: f32, to: f32) -> Self {
        Self { from, to }
    }
}

impl ApplyTransformation for Alpha {
    fn apply_transformation(&self, interpolated_time: f32, t: &mut Transformation) {
        t.set_alpha(lerp(self.from, self.to, interpolated_time));
    }

    fn changes_alpha(&self) -> bool {
        true
    }
}

/// Scales around a pivot point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scale {
    pub from_x: f32,
    pub to_x: f32,
    pub from_y: f32,
    pub to_y: f32,
    pub pivot: Point,
}

impl Scale {
    pub fn new(from_x: f32, to_x: f32, from_y: f32, to_y: f32) -> Self {
        Self {
            from_x,
            to_x,
            from_y,
            to_y,
            pivot: Point::ZERO,
        }
    }

    /// Same factor on both axes
    pub fn uniform(from: f32, to: f32) -> Self {
        Self::new(from, to, from, to)
    }

    pub fn with_pivot(mut self, x: f32, y: f32) -> Self {
        self.pivot = Point::new(x, y);
        self
    }
}

impl ApplyTransformation for Scale {
    fn apply_transformation(&self, interpolated_time: f32, t: &mut Transformation) {
        let sx = lerp(self.from_x, self.to_x, interpolated_time);
        let sy = lerp(self.from_y, self.to_y, interpolated_time);
        if sx != 1.0 || sy != 1.0 {
            t.concat(&Affine2D::scale_about(sx, sy, self.pivot));
        }
    }

    fn changes_matrix(&self) -> bool {
        true
    }

    /// Endpoint factors must be finite and non-zero so the matrix stays
    /// invertible at both ends of the animation.
    fn validate(&self) -> Result<(), ConfigError> {
        for factor in [self.from_x, self.to_x, self.from_y, self.to_y] {
            if !factor.is_finite() || factor == 0.0 {
                return Err(ConfigError::InvalidScale(factor));
            }
        }
        Ok(())
    }
}

/// Rotates around a pivot point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotate {
    pub from_degrees: f32,
    pub to_degrees: f32,
    pub pivot: Point,
}

impl Rotate {
    pub fn new(from_degrees: f32, to_degrees: f32) -> Self {
        Self {
            from_degrees,
            to_degrees,
            pivot: Point::ZERO,
        }
    }

    pub fn with_pivot(mut self, x: f32, y: f32) -> Self {
        self.pivot = Point::new(x, y);
        self
    }
}

impl ApplyTransformation for Rotate {
    fn apply_transformation(&self, interpolated_time: f32, t: &mut Transformation) {
        let degrees = lerp(self.from_degrees, self.to_degrees, interpolated_time);
        t.concat(&Affine2D::rotation_degrees_about(degrees, self.pivot));
    }

    fn changes_matrix(&self) -> bool {
        true
    }
}

/// Translates by a delta in pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Translate {
    pub from_x: f32,
    pub to_x: f32,
    pub from_y: f32,
    pub to_y: f32,
}

impl Translate {
    pub fn new(from_x: f32, to_x: f32, from_y: f32, to_y: f32) -> Self {
        Self {
            from_x,
            to_x,
            from_y,
            to_y,
        }
    }
}

impl ApplyTransformation for Translate {
    fn apply_transformation(&self, interpolated_time: f32, t: &mut Transformation) {
        let dx = lerp(self.from_x, self.to_x, interpolated_time);
        let dy = lerp(self.from_y, self.to_y, interpolated_time);
        t.concat(&Affine2D::translation(dx, dy));
    }

    fn changes_matrix(&self) -> bool {
        true
    }
}

/// The property an [`Animation`](crate::Animation) drives.
///
/// The built-in variants cover alpha and the three matrix operations;
/// `Custom` is the registration point for anything else.
#[derive(Clone, Debug)]
pub enum Property {
    Alpha(Alpha),
    Scale(Scale),
    Rotate(Rotate),
    Translate(Translate),
    Custom(Arc<dyn ApplyTransformation>),
}

impl Property {
    /// Wrap a user-defined property
    pub fn custom(property: impl ApplyTransformation + 'static) -> Self {
        Property::Custom(Arc::new(property))
    }

    fn as_dyn(&self) -> &dyn ApplyTransformation {
        match self {
            Property::Alpha(p) => p,
            Property::Scale(p) => p,
            Property::Rotate(p) => p,
            Property::Translate(p) => p,
            Property::Custom(p) => p.as_ref(),
        }
    }
}

impl ApplyTransformation for Property {
    fn apply_transformation(&self, interpolated_time: f32, t: &mut Transformation) {
        self.as_dyn().apply_transformation(interpolated_time, t);
    }

    fn changes_alpha(&self) -> bool {
        self.as_dyn().changes_alpha()
    }

    fn changes_matrix(&self) -> bool {
        self.as_dyn().changes_matrix()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.as_dyn().validate()
    }
}

impl From<Alpha> for Property {
    fn from(p: Alpha) -> Self {
        Property::Alpha(p)
    }
}

impl From<Scale> for Property {
    fn from(p: Scale) -> Self {
        Property::Scale(p)
    }
}

impl From<Rotate> for Property {
    fn from(p: Rotate) -> Self {
        Property::Rotate(p)
    }
}

impl From<Translate> for Property {
    fn from(p: Translate) -> Self {
        Property::Translate(p)
    }
}
