//! Kinetic Animation Engine
//!
//! Time-driven property animations, interpolators, and composition.
//!
//! # Features
//!
//! - **Timing state machine**: start offsets, repeat count and mode, fill-before/after
//! - **Interpolators**: accelerate, decelerate, bounce, overshoot, anticipate, bezier curves
//! - **Property animations**: alpha, scale, rotate, translate, plus custom properties
//! - **Animation sets**: concurrent and sequential composition into one transformation
//! - **Scheduler**: drive many animations from a single host tick

pub mod animation;
pub mod interpolator;
pub mod presets;
pub mod property;
pub mod scheduler;
pub mod set;
pub mod timing;

pub use animation::{Animate, Animation, AnimationBuilder, AnimationState, Frame};
pub use interpolator::Interpolator;
pub use presets::AnimationPreset;
pub use property::{Alpha, ApplyTransformation, Property, Rotate, Scale, Translate};
pub use scheduler::{AnimationId, AnimationScheduler};
pub use set::{AnimationSet, Composition};
pub use timing::{Phase, RepeatMode, Timing, REPEAT_INFINITE};
