//! Animations
//!
//! An [`Animation`] is a timing state machine paired with a [`Property`].
//! Each call to [`Animate::advance`] converts the host's wall-clock time into
//! normalized time, runs it through the interpolator, and lets the property
//! write into the caller's [`Transformation`].
//!
//! # Example
//!
//! ```rust
//! use kinetic_animation::{Animate, Animation};
//! use kinetic_core::Transformation;
//!
//! let mut fade = Animation::alpha(0.0, 1.0).duration_ms(1000).build().unwrap();
//!
//! let mut t = Transformation::new();
//! fade.get_transformation(5_000, &mut t); // captures the start time
//!
//! t.clear();
//! assert!(fade.get_transformation(5_250, &mut t));
//! assert!((t.alpha - 0.25).abs() < 1e-6);
//! ```

use crate::interpolator::Interpolator;
use crate::property::{Alpha, ApplyTransformation, Property, Rotate, Scale, Translate};
use crate::timing::{Phase, RepeatMode, Timing, REPEAT_INFINITE};
use kinetic_core::{ConfigError, Transformation};

/// Lifecycle of an animation. Transitions only move forward until reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum AnimationState {
    #[default]
    NotStarted,
    Active,
    Ended,
}

/// Outcome of a single tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    /// State after this tick
    pub state: AnimationState,
    /// Whether the transformation was written on this tick
    pub applied: bool,
    /// Whether the host should keep ticking
    pub more: bool,
}

impl Frame {
    pub fn is_pending(&self) -> bool {
        self.state == AnimationState::NotStarted
    }

    pub fn is_active(&self) -> bool {
        self.state == AnimationState::Active
    }

    pub fn is_ended(&self) -> bool {
        self.state == AnimationState::Ended
    }
}

/// Anything that can be driven by a host tick: single animations and sets.
pub trait Animate: Send {
    /// Advance to `now_ms` and write this tick's contribution into `t`.
    ///
    /// The first call captures `now_ms` as the start time unless one was set.
    fn advance(&mut self, now_ms: u64, t: &mut Transformation) -> Frame;

    /// Boolean form of [`advance`](Self::advance): `false` once ended with no
    /// fill-after.
    fn get_transformation(&mut self, now_ms: u64, t: &mut Transformation) -> bool {
        self.advance(now_ms, t).more
    }

    /// Forget the captured start time and return to `NotStarted`
    fn reset(&mut self);

    /// Pin the start time instead of capturing it on the first tick
    fn set_start_time(&mut self, start_ms: u64);

    fn start_time(&self) -> Option<u64>;

    fn state(&self) -> AnimationState;

    /// Time from start until the last cycle ends, including start offsets.
    /// `None` when the animation repeats forever.
    fn compute_duration_hint(&self) -> Option<u64>;

    /// Whether the animation writes the alpha channel
    fn has_alpha(&self) -> bool;

    /// Whether the animation writes the transform matrix
    fn will_change_transformation_matrix(&self) -> bool;

    /// Whether the animated object's bounds can change
    fn will_change_bounds(&self) -> bool {
        self.will_change_transformation_matrix()
    }

    /// Whether the end value keeps being applied after the animation ends
    fn fill_after(&self) -> bool;

    fn has_started(&self) -> bool {
        self.state() != AnimationState::NotStarted
    }

    fn has_ended(&self) -> bool {
        self.state() == AnimationState::Ended
    }
}

/// A single property animation
#[derive(Clone, Debug)]
pub struct Animation {
    timing: Timing,
    property: Property,
    start_time: Option<u64>,
    state: AnimationState,
    last_now: Option<u64>,
}

impl Animation {
    /// Build from an already validated timing
    pub fn new(property: impl Into<Property>, timing: Timing) -> Self {
        Self {
            timing,
            property: property.into(),
            start_time: None,
            state: AnimationState::NotStarted,
            last_now: None,
        }
    }

    pub fn builder(property: impl Into<Property>) -> AnimationBuilder {
        AnimationBuilder::new(property.into())
    }

    /// Fade from `from` to `to` alpha
    pub fn alpha(from: f32, to: f32) -> AnimationBuilder {
        Self::builder(Alpha::new(from, to))
    }

    /// Uniform scale from `from` to `to`
    pub fn scale(from: f32, to: f32) -> AnimationBuilder {
        Self::builder(Scale::uniform(from, to))
    }

    /// Rotation in degrees
    pub fn rotate(from_degrees: f32, to_degrees: f32) -> AnimationBuilder {
        Self::builder(Rotate::new(from_degrees, to_degrees))
    }

    /// Translation from `(from_x, from_y)` to `(to_x, to_y)`
    pub fn translate(from_x: f32, from_y: f32, to_x: f32, to_y: f32) -> AnimationBuilder {
        Self::builder(Translate::new(from_x, to_x, from_y, to_y))
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    pub fn property(&self) -> &Property {
        &self.property
    }

    /// Alias for [`Animate::set_start_time`]
    pub fn start(&mut self, now_ms: u64) {
        self.set_start_time(now_ms);
    }

    /// Timing is frozen from the first observed tick until [`Animate::reset`],
    /// including ticks that land inside the start offset.
    fn is_frozen(&self) -> bool {
        self.last_now.is_some()
    }

    fn configure(&mut self, f: impl FnOnce(&mut Timing)) -> Result<(), ConfigError> {
        if self.is_frozen() {
            return Err(ConfigError::AlreadyStarted);
        }
        let mut timing = self.timing;
        f(&mut timing);
        timing.validate()?;
        self.timing = timing;
        Ok(())
    }

    pub fn set_duration_ms(&mut self, duration_ms: u32) -> Result<(), ConfigError> {
        self.configure(|t| t.duration_ms = duration_ms)
    }

    pub fn set_start_offset_ms(&mut self, start_offset_ms: u32) -> Result<(), ConfigError> {
        self.configure(|t| t.start_offset_ms = start_offset_ms)
    }

    pub fn set_repeat_count(&mut self, repeat_count: i32) -> Result<(), ConfigError> {
        self.configure(|t| t.repeat_count = repeat_count)
    }

    pub fn set_repeat_mode(&mut self, repeat_mode: RepeatMode) -> Result<(), ConfigError> {
        self.configure(|t| t.repeat_mode = repeat_mode)
    }

    pub fn set_fill_before(&mut self, fill_before: bool) -> Result<(), ConfigError> {
        self.configure(|t| t.fill_before = fill_before)
    }

    pub fn set_fill_after(&mut self, fill_after: bool) -> Result<(), ConfigError> {
        self.configure(|t| t.fill_after = fill_after)
    }

    pub fn set_interpolator(&mut self, interpolator: Interpolator) -> Result<(), ConfigError> {
        self.configure(|t| t.interpolator = interpolator)
    }

    /// Multiply duration and start offset by `factor`
    pub fn scale_current_duration(&mut self, factor: f32) -> Result<(), ConfigError> {
        if self.is_frozen() {
            return Err(ConfigError::AlreadyStarted);
        }
        self.timing = self.timing.scaled(factor)?;
        Ok(())
    }

    fn apply(&self, fraction: f32, t: &mut Transformation) -> f32 {
        let interpolated = self.timing.interpolator.map(fraction.clamp(0.0, 1.0));
        self.property.apply_transformation(interpolated, t);
        interpolated
    }

    fn elapsed_ms(&self, start: u64, now_ms: u64) -> i64 {
        let elapsed = now_ms as i128 - start as i128 - self.timing.start_offset_ms as i128;
        elapsed.clamp(i64::MIN as i128, i64::MAX as i128) as i64
    }
}

impl Animate for Animation {
    fn advance(&mut self, now_ms: u64, t: &mut Transformation) -> Frame {
        let start = match self.start_time {
            Some(start) => start,
            None => {
                tracing::trace!(now_ms, "animation start time captured");
                self.start_time = Some(now_ms);
                now_ms
            }
        };

        if let Some(last) = self.last_now {
            if now_ms < last {
                tracing::debug!(now_ms, last, "time moved backward");
            }
        }
        self.last_now = Some(now_ms);

        if self.state == AnimationState::Ended {
            let fill_after = self.timing.fill_after;
            if fill_after {
                self.apply(self.timing.end_fraction(), t);
            }
            return Frame {
                state: AnimationState::Ended,
                applied: fill_after,
                more: fill_after,
            };
        }

        match self.timing.resolve(self.elapsed_ms(start, now_ms)) {
            Phase::Before => {
                let fill_before = self.timing.fill_before;
                if fill_before {
                    self.apply(0.0, t);
                }
                Frame {
                    state: self.state,
                    applied: fill_before,
                    more: true,
                }
            }
            Phase::Running { cycle, fraction } => {
                if self.state == AnimationState::NotStarted {
                    tracing::debug!(now_ms, "animation active");
                    self.state = AnimationState::Active;
                }
                let interpolated = self.apply(fraction, t);
                tracing::trace!(now_ms, cycle, fraction, interpolated, "animation tick");
                Frame {
                    state: AnimationState::Active,
                    applied: true,
                    more: true,
                }
            }
            Phase::Finished { fraction } => {
                tracing::debug!(now_ms, fill_after = self.timing.fill_after, "animation ended");
                self.state = AnimationState::Ended;
                // The tick that observes the end always lands on the boundary value.
                self.apply(fraction, t);
                Frame {
                    state: AnimationState::Ended,
                    applied: true,
                    more: self.timing.fill_after,
                }
            }
        }
    }

    fn reset(&mut self) {
        self.start_time = None;
        self.last_now = None;
        self.state = AnimationState::NotStarted;
    }

    fn set_start_time(&mut self, start_ms: u64) {
        self.start_time = Some(start_ms);
    }

    fn start_time(&self) -> Option<u64> {
        self.start_time
    }

    fn state(&self) -> AnimationState {
        self.state
    }

    fn compute_duration_hint(&self) -> Option<u64> {
        self.timing.total_duration_ms()
    }

    fn has_alpha(&self) -> bool {
        self.property.changes_alpha()
    }

    fn will_change_transformation_matrix(&self) -> bool {
        self.property.changes_matrix()
    }

    fn fill_after(&self) -> bool {
        self.timing.fill_after
    }
}

/// Builder for [`Animation`]
///
/// # Example
///
/// ```ignore
/// let pulse = Animation::scale(1.0, 1.1)
///     .duration_ms(400)
///     .interpolator(Interpolator::AccelerateDecelerate)
///     .repeat_infinite()
///     .repeat_mode(RepeatMode::Reverse)
///     .build()?;
/// ```
#[derive(Clone, Debug)]
pub struct AnimationBuilder {
    property: Property,
    duration_ms: u32,
    start_offset_ms: u32,
    repeat_count: i32,
    repeat_mode: RepeatMode,
    fill_before: bool,
    fill_after: bool,
    interpolator: Interpolator,
    start_time: Option<u64>,
}

impl AnimationBuilder {
    pub fn new(property: Property) -> Self {
        Self {
            property,
            duration_ms: 0,
            start_offset_ms: 0,
            repeat_count: 0,
            repeat_mode: RepeatMode::Restart,
            fill_before: false,
            fill_after: false,
            interpolator: Interpolator::Linear,
            start_time: None,
        }
    }

    /// Duration of one cycle. Required; zero fails at [`build`](Self::build).
    pub fn duration_ms(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Delay between the start time and the first cycle
    pub fn start_offset_ms(mut self, start_offset_ms: u32) -> Self {
        self.start_offset_ms = start_offset_ms;
        self
    }

    /// Extra cycles after the first; [`REPEAT_INFINITE`] repeats forever
    pub fn repeat_count(mut self, repeat_count: i32) -> Self {
        self.repeat_count = repeat_count;
        self
    }

    pub fn repeat_infinite(self) -> Self {
        self.repeat_count(REPEAT_INFINITE)
    }

    pub fn repeat_mode(mut self, repeat_mode: RepeatMode) -> Self {
        self.repeat_mode = repeat_mode;
        self
    }

    /// Apply the start value while the start offset is still elapsing
    pub fn fill_before(mut self, fill_before: bool) -> Self {
        self.fill_before = fill_before;
        self
    }

    /// Keep applying the end value after the animation ends
    pub fn fill_after(mut self, fill_after: bool) -> Self {
        self.fill_after = fill_after;
        self
    }

    pub fn interpolator(mut self, interpolator: Interpolator) -> Self {
        self.interpolator = interpolator;
        self
    }

    /// Pin the start time instead of capturing it on the first tick
    pub fn start_time(mut self, start_ms: u64) -> Self {
        self.start_time = Some(start_ms);
        self
    }

    pub fn build(self) -> Result<Animation, ConfigError> {
        let timing = Timing {
            duration_ms: self.duration_ms,
            start_offset_ms: self.start_offset_ms,
            repeat_count: self.repeat_count,
            repeat_mode: self.repeat_mode,
            fill_before: self.fill_before,
            fill_after: self.fill_after,
            interpolator: self.interpolator,
        };
        timing.validate()?;
        self.property.validate()?;

        let mut animation = Animation::new(self.property, timing);
        animation.start_time = self.start_time;
        Ok(animation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn fade() -> AnimationBuilder {
        Animation::alpha(0.0, 1.0).duration_ms(1000).start_time(0)
    }

    fn alpha_at(animation: &mut Animation, now_ms: u64) -> (Frame, f32) {
        let mut t = Transformation::new();
        let frame = animation.advance(now_ms, &mut t);
        (frame, t.alpha)
    }

    #[test]
    fn test_build_rejects_missing_duration() {
        let err = Animation::alpha(0.0, 1.0).build().unwrap_err();
        assert_eq!(err, ConfigError::NonPositiveDuration);
    }

    #[test]
    fn test_build_rejects_collapsed_scale() {
        let err = Animation::scale(0.0, 1.0).duration_ms(100).build().unwrap_err();
        assert_eq!(err, ConfigError::InvalidScale(0.0));
    }

    #[test]
    fn test_build_rejects_bad_interpolator() {
        let err = fade()
            .interpolator(Interpolator::CubicBezier(1.5, 0.0, 0.5, 1.0))
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidInterpolator { .. }));
    }

    #[test]
    fn test_lazy_start_capture() {
        let mut a = Animation::alpha(0.0, 1.0).duration_ms(100).build().unwrap();
        assert_eq!(a.start_time(), None);
        let (frame, _) = alpha_at(&mut a, 42);
        assert_eq!(a.start_time(), Some(42));
        assert!(frame.is_active());
    }

    #[test]
    fn test_alpha_scenario() {
        let mut a = fade().build().unwrap();

        let (frame, alpha) = alpha_at(&mut a, 250);
        assert!(frame.more);
        assert!((alpha - 0.25).abs() < EPS);

        let (frame, alpha) = alpha_at(&mut a, 1000);
        assert!(frame.is_ended());
        assert!(!frame.more);
        assert!((alpha - 1.0).abs() < EPS);

        // Nothing more is written once ended without fill-after
        let mut t = Transformation::new();
        t.set_alpha(0.7);
        assert!(!a.get_transformation(1200, &mut t));
        assert_eq!(t.alpha, 0.7);
    }

    #[test]
    fn test_fill_after_holds_end_value() {
        let mut a = fade().fill_after(true).build().unwrap();
        alpha_at(&mut a, 1500);
        let (frame, alpha) = alpha_at(&mut a, 5000);
        assert!(frame.is_ended());
        assert!(frame.more);
        assert!(frame.applied);
        assert!((alpha - 1.0).abs() < EPS);
    }

    #[test]
    fn test_before_start_without_fill() {
        let mut a = fade().start_offset_ms(500).build().unwrap();
        let mut t = Transformation::new();
        t.set_alpha(0.9);
        let frame = a.advance(200, &mut t);
        assert!(frame.is_pending());
        assert!(!frame.applied);
        assert!(frame.more);
        assert_eq!(t.alpha, 0.9);
    }

    #[test]
    fn test_before_start_with_fill() {
        let mut a = Animation::alpha(0.3, 1.0)
            .duration_ms(1000)
            .start_time(0)
            .start_offset_ms(500)
            .fill_before(true)
            .build()
            .unwrap();
        let (frame, alpha) = alpha_at(&mut a, 200);
        assert!(frame.is_pending());
        assert!(frame.applied);
        assert!((alpha - 0.3).abs() < EPS);

        let (_, alpha) = alpha_at(&mut a, 750);
        assert!((alpha - 0.475).abs() < EPS);
    }

    #[test]
    fn test_same_tick_is_idempotent() {
        let mut a = fade()
            .interpolator(Interpolator::AccelerateDecelerate)
            .build()
            .unwrap();
        let (_, first) = alpha_at(&mut a, 333);
        let (_, second) = alpha_at(&mut a, 333);
        assert_eq!(first, second);
    }

    #[test]
    fn test_backward_time_uses_fill_before_branch() {
        let mut a = Animation::alpha(0.0, 1.0)
            .duration_ms(1000)
            .start_time(1000)
            .fill_before(true)
            .build()
            .unwrap();
        let (frame, _) = alpha_at(&mut a, 1500);
        assert!(frame.is_active());

        let (frame, alpha) = alpha_at(&mut a, 900);
        assert!(frame.is_active(), "state never regresses");
        assert!(frame.more);
        assert_eq!(alpha, 0.0);
    }

    #[test]
    fn test_reset_clears_start_and_state() {
        let mut a = fade().build().unwrap();
        alpha_at(&mut a, 2000);
        assert!(a.has_ended());

        a.reset();
        assert_eq!(a.state(), AnimationState::NotStarted);
        assert_eq!(a.start_time(), None);

        let (frame, alpha) = alpha_at(&mut a, 10_000);
        assert!(frame.is_active());
        assert_eq!(alpha, 0.0);
    }

    #[test]
    fn test_setters_frozen_after_start() {
        let mut a = fade().build().unwrap();
        a.set_repeat_count(3).unwrap();
        assert_eq!(a.timing().repeat_count(), 3);
        assert_eq!(a.set_duration_ms(0), Err(ConfigError::NonPositiveDuration));

        alpha_at(&mut a, 10);
        assert_eq!(a.set_fill_after(true), Err(ConfigError::AlreadyStarted));
        assert_eq!(
            a.scale_current_duration(2.0),
            Err(ConfigError::AlreadyStarted)
        );
    }

    #[test]
    fn test_setters_frozen_while_offset_pending() {
        let mut a = fade().start_offset_ms(500).build().unwrap();
        let (frame, _) = alpha_at(&mut a, 100);
        assert!(frame.is_pending());
        assert!(!a.has_started());
        assert_eq!(a.set_duration_ms(10), Err(ConfigError::AlreadyStarted));
        assert_eq!(a.timing().duration_ms(), 1000);

        a.reset();
        assert_eq!(a.set_duration_ms(10), Ok(()));
    }

    #[test]
    fn test_duration_hint_and_flags() {
        let a = fade().repeat_count(1).start_offset_ms(100).build().unwrap();
        assert_eq!(a.compute_duration_hint(), Some(2100));
        assert!(a.has_alpha());
        assert!(!a.will_change_transformation_matrix());
        assert!(!a.will_change_bounds());

        let spin = Animation::rotate(0.0, 360.0)
            .duration_ms(500)
            .repeat_infinite()
            .build()
            .unwrap();
        assert_eq!(spin.compute_duration_hint(), None);
        assert!(spin.will_change_bounds());
    }
}
