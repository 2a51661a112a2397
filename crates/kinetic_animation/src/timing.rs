//! Timing configuration and elapsed-time resolution
//!
//! [`Timing`] holds everything that decides *where* in its cycle an animation
//! is for a given elapsed time: duration, start offset, repeat policy, fill
//! policy and interpolator. Resolution is a pure function of elapsed time.

use crate::interpolator::Interpolator;
use kinetic_core::ConfigError;

/// Repeat count sentinel for an animation that never ends
pub const REPEAT_INFINITE: i32 = -1;

/// What happens when a cycle completes and repeats remain
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RepeatMode {
    /// Jump back to the start of the curve
    #[default]
    Restart,
    /// Play odd-numbered cycles backwards (cycle 0 forward, cycle 1 reversed, ...)
    Reverse,
}

/// Where an elapsed time falls relative to the animation's cycles
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    /// Start offset has not elapsed yet
    Before,
    /// Inside cycle `cycle` at normalized `fraction`, already reflected for
    /// reversed cycles
    Running { cycle: u64, fraction: f32 },
    /// Every cycle has completed; `fraction` is the final boundary value
    Finished { fraction: f32 },
}

/// Immutable timing parameters of one animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
    pub(crate) duration_ms: u32,
    pub(crate) start_offset_ms: u32,
    pub(crate) repeat_count: i32,
    pub(crate) repeat_mode: RepeatMode,
    pub(crate) fill_before: bool,
    pub(crate) fill_after: bool,
    pub(crate) interpolator: Interpolator,
}

impl Timing {
    /// Timing with the given duration and every other option at its default
    pub fn new(duration_ms: u32) -> Result<Self, ConfigError> {
        let timing = Self {
            duration_ms,
            start_offset_ms: 0,
            repeat_count: 0,
            repeat_mode: RepeatMode::Restart,
            fill_before: false,
            fill_after: false,
            interpolator: Interpolator::Linear,
        };
        timing.validate()?;
        Ok(timing)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.duration_ms == 0 {
            return Err(ConfigError::NonPositiveDuration);
        }
        if self.repeat_count < REPEAT_INFINITE {
            return Err(ConfigError::InvalidRepeatCount(self.repeat_count));
        }
        self.interpolator.validate()
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn start_offset_ms(&self) -> u32 {
        self.start_offset_ms
    }

    pub fn repeat_count(&self) -> i32 {
        self.repeat_count
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat_mode
    }

    pub fn fill_before(&self) -> bool {
        self.fill_before
    }

    pub fn fill_after(&self) -> bool {
        self.fill_after
    }

    pub fn interpolator(&self) -> Interpolator {
        self.interpolator
    }

    pub fn is_infinite(&self) -> bool {
        self.repeat_count == REPEAT_INFINITE
    }

    /// Number of cycles played, `None` when repeating forever
    pub fn cycle_count(&self) -> Option<u64> {
        if self.is_infinite() {
            None
        } else {
            Some(self.repeat_count as u64 + 1)
        }
    }

    /// Start offset plus every cycle, `None` when repeating forever
    pub fn total_duration_ms(&self) -> Option<u64> {
        self.cycle_count()
            .map(|cycles| {
                (self.duration_ms as u64)
                    .saturating_mul(cycles)
                    .saturating_add(self.start_offset_ms as u64)
            })
    }

    /// Normalized time the animation rests at once it has ended.
    ///
    /// With an odd number of repeats in reverse mode the last cycle plays
    /// backwards, so the animation ends where it began.
    pub fn end_fraction(&self) -> f32 {
        let odd_repeats = self.repeat_count > 0 && self.repeat_count % 2 == 1;
        if self.repeat_mode == RepeatMode::Reverse && odd_repeats {
            0.0
        } else {
            1.0
        }
    }

    /// Resolve an elapsed time (already net of start offset) to a phase.
    ///
    /// `elapsed_ms == duration` on the final cycle counts as finished.
    pub fn resolve(&self, elapsed_ms: i64) -> Phase {
        if elapsed_ms < 0 {
            return Phase::Before;
        }

        let duration = self.duration_ms as i64;
        let cycle = (elapsed_ms / duration) as u64;

        let has_cycle = match self.cycle_count() {
            None => true,
            Some(cycles) => cycle < cycles,
        };
        if !has_cycle {
            return Phase::Finished {
                fraction: self.end_fraction(),
            };
        }

        let fraction = (elapsed_ms % duration) as f32 / duration as f32;
        let fraction = if self.repeat_mode == RepeatMode::Reverse && cycle % 2 == 1 {
            1.0 - fraction
        } else {
            fraction
        };

        Phase::Running { cycle, fraction }
    }

    /// Scale duration and start offset, as when a host slows all animations
    /// down for debugging.
    pub fn scaled(&self, factor: f32) -> Result<Self, ConfigError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ConfigError::InvalidScale(factor));
        }
        let mut scaled = *self;
        scaled.duration_ms = ((self.duration_ms as f64 * factor as f64).round() as u32).max(1);
        scaled.start_offset_ms = (self.start_offset_ms as f64 * factor as f64).round() as u32;
        Ok(scaled)
    }
}
