//! `kinetic play`: drive a preset on a virtual clock and report each frame

use anyhow::{bail, Result};
use kinetic_animation::{Animate, AnimationPreset, AnimationScheduler, AnimationState};
use kinetic_core::Transformation;

/// Travel distance for the motion presets
const MOTION_DISTANCE: f32 = 100.0;

/// Names accepted by [`build_preset`]
pub const PRESETS: &[&str] = &[
    "fade-in", "fade-out", "zoom-in", "pulse", "spin", "slide-in", "drop-in",
];

/// Build the named preset with the given duration
pub fn build_preset(name: &str, duration_ms: u32) -> Result<Box<dyn Animate>> {
    let animation: Box<dyn Animate> = match name {
        "fade-in" => Box::new(AnimationPreset::fade_in(duration_ms)?),
        "fade-out" => Box::new(AnimationPreset::fade_out(duration_ms)?),
        "zoom-in" => Box::new(AnimationPreset::zoom_in(duration_ms)?),
        "pulse" => Box::new(AnimationPreset::pulse(duration_ms)?),
        "spin" => Box::new(AnimationPreset::spin(duration_ms)?),
        "slide-in" => Box::new(AnimationPreset::slide_in(duration_ms, MOTION_DISTANCE)?),
        "drop-in" => Box::new(AnimationPreset::drop_in(duration_ms, MOTION_DISTANCE)?),
        other => bail!(
            "Unknown preset '{}', expected one of: {}",
            other,
            PRESETS.join(", ")
        ),
    };
    Ok(animation)
}

/// One host frame as observed by `kinetic play`
#[derive(Clone, Debug, PartialEq)]
pub struct FrameReport {
    pub index: u32,
    pub now_ms: u64,
    pub state: AnimationState,
    pub transformation: Transformation,
}

impl FrameReport {
    pub fn render(&self) -> String {
        format!(
            "#{:<4} {:>6}ms {:<10} {}",
            self.index,
            self.now_ms,
            format!("{:?}", self.state),
            self.transformation.to_short_string()
        )
    }
}

/// Tick `animation` every `frame_ms` starting at time zero.
///
/// Stops on the first frame that ends the animation, or after `max_frames`
/// for animations that repeat forever.
pub fn play(animation: Box<dyn Animate>, frame_ms: u64, max_frames: u32) -> Vec<FrameReport> {
    let mut scheduler = AnimationScheduler::new();
    let id = scheduler.add_boxed(animation);
    let mut reports = Vec::new();

    for index in 0..max_frames {
        let now_ms = u64::from(index).saturating_mul(frame_ms);
        scheduler.tick(now_ms);

        let Some(frame) = scheduler.frame(id) else {
            break;
        };
        let transformation = scheduler
            .transformation(id)
            .copied()
            .unwrap_or(Transformation::IDENTITY);
        reports.push(FrameReport {
            index,
            now_ms,
            state: frame.state,
            transformation,
        });

        if frame.is_ended() {
            tracing::debug!(now_ms, holding = frame.more, "playback finished");
            break;
        }
    }

    if reports.len() as u32 == max_frames {
        tracing::info!(max_frames, "frame limit reached");
    }
    reports
}
