//! Animation presets for common entry/exit effects
//!
//! Pre-built animations that hosts can hand straight to an
//! [`AnimationScheduler`](crate::AnimationScheduler). Every preset validates
//! its duration, so a zero duration surfaces as a [`ConfigError`].

use crate::animation::Animation;
use crate::interpolator::Interpolator;
use crate::set::AnimationSet;
use crate::timing::RepeatMode;
use kinetic_core::ConfigError;

/// Starting factor for zoom presets; a zero scale would collapse the matrix
const ZOOM_START_SCALE: f32 = 0.01;

/// Pre-built animation presets for common patterns
pub struct AnimationPreset;

impl AnimationPreset {
    // ========================================================================
    // Fade animations
    // ========================================================================

    /// Fade in from transparent to opaque
    pub fn fade_in(duration_ms: u32) -> Result<Animation, ConfigError> {
        Animation::alpha(0.0, 1.0)
            .duration_ms(duration_ms)
            .interpolator(Interpolator::DECELERATE)
            .fill_before(true)
            .fill_after(true)
            .build()
    }

    /// Fade out from opaque to transparent
    pub fn fade_out(duration_ms: u32) -> Result<Animation, ConfigError> {
        Animation::alpha(1.0, 0.0)
            .duration_ms(duration_ms)
            .interpolator(Interpolator::ACCELERATE)
            .fill_after(true)
            .build()
    }

    // ========================================================================
    // Scale animations
    // ========================================================================

    /// Grow from a speck to full size while fading in, with a slight overshoot
    pub fn zoom_in(duration_ms: u32) -> Result<AnimationSet, ConfigError> {
        Ok(AnimationSet::concurrent()
            .with(
                Animation::scale(ZOOM_START_SCALE, 1.0)
                    .duration_ms(duration_ms)
                    .interpolator(Interpolator::Overshoot(1.5))
                    .fill_after(true)
                    .build()?,
            )
            .with(Self::fade_in(duration_ms)?))
    }

    /// Breathe between full size and 110% forever
    pub fn pulse(duration_ms: u32) -> Result<Animation, ConfigError> {
        Animation::scale(1.0, 1.1)
            .duration_ms(duration_ms)
            .interpolator(Interpolator::AccelerateDecelerate)
            .repeat_infinite()
            .repeat_mode(RepeatMode::Reverse)
            .build()
    }

    // ========================================================================
    // Motion animations
    // ========================================================================

    /// Full turn, repeated forever
    pub fn spin(duration_ms: u32) -> Result<Animation, ConfigError> {
        Animation::rotate(0.0, 360.0)
            .duration_ms(duration_ms)
            .repeat_infinite()
            .build()
    }

    /// Slide in horizontally from `distance` pixels away, then hold
    pub fn slide_in(duration_ms: u32, distance: f32) -> Result<Animation, ConfigError> {
        Animation::translate(distance, 0.0, 0.0, 0.0)
            .duration_ms(duration_ms)
            .interpolator(Interpolator::DECELERATE)
            .fill_before(true)
            .fill_after(true)
            .build()
    }

    /// Drop from above while fading in, bouncing on arrival
    pub fn drop_in(duration_ms: u32, distance: f32) -> Result<AnimationSet, ConfigError> {
        Ok(AnimationSet::concurrent()
            .with(
                Animation::translate(0.0, -distance, 0.0, 0.0)
                    .duration_ms(duration_ms)
                    .interpolator(Interpolator::Bounce)
                    .fill_after(true)
                    .build()?,
            )
            .with(Self::fade_in((duration_ms / 2).max(1))?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Animate;
    use kinetic_core::{Point, Transformation};

    #[test]
    fn test_presets_reject_zero_duration() {
        assert!(AnimationPreset::fade_in(0).is_err());
        assert!(AnimationPreset::zoom_in(0).is_err());
        assert!(AnimationPreset::spin(0).is_err());
    }

    #[test]
    fn test_fade_in_holds_opaque() {
        let mut fade = AnimationPreset::fade_in(200).unwrap();
        let mut t = Transformation::new();
        fade.advance(0, &mut t);
        fade.advance(200, &mut t);

        let mut t = Transformation::new();
        assert!(fade.get_transformation(1000, &mut t));
        assert_eq!(t.alpha, 1.0);
    }

    #[test]
    fn test_zoom_in_ends_at_identity_scale() {
        let mut zoom = AnimationPreset::zoom_in(300).unwrap();
        let mut t = Transformation::new();
        zoom.advance(0, &mut t);

        let mut t = Transformation::new();
        zoom.advance(300, &mut t);
        let p = t.transform_point(Point::new(5.0, 5.0));
        assert!((p.x - 5.0).abs() < 1e-4);
        assert!((t.alpha - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_in_matrix_invertible_from_first_tick() {
        let mut zoom = AnimationPreset::zoom_in(300).unwrap();
        for now_ms in [0, 1, 150, 300] {
            let mut t = Transformation::new();
            zoom.advance(now_ms, &mut t);
            assert!(t.matrix.determinant().abs() > 0.0, "singular at {now_ms}ms");
        }
    }

    #[test]
    fn test_drop_in_accepts_shortest_duration() {
        let landing = AnimationPreset::drop_in(1, 20.0).unwrap();
        assert_eq!(landing.compute_duration_hint(), Some(1));
    }

    #[test]
    fn test_spin_and_pulse_never_end() {
        assert_eq!(AnimationPreset::spin(1000).unwrap().compute_duration_hint(), None);
        assert_eq!(AnimationPreset::pulse(1000).unwrap().compute_duration_hint(), None);
    }

    #[test]
    fn test_drop_in_lands() {
        let mut landing = AnimationPreset::drop_in(400, 80.0).unwrap();
        let mut t = Transformation::new();
        landing.advance(0, &mut t);
        assert!((t.matrix.elements[5] + 80.0).abs() < 1e-4);

        let mut t = Transformation::new();
        landing.advance(400, &mut t);
        assert!(t.matrix.elements[5].abs() < 1e-2);
    }
}
