//! Animation scheduler
//!
//! Owns a set of animations, each paired with its own [`Transformation`], and
//! advances all of them on every host tick. Entries that report no further
//! work stay readable for the rest of that tick and are retired on the next.

use crate::animation::{Animate, Frame};
use kinetic_core::Transformation;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct AnimationId;
}

struct Entry {
    animation: Box<dyn Animate>,
    transformation: Transformation,
    frame: Option<Frame>,
}

impl Entry {
    fn finished(&self) -> bool {
        matches!(self.frame, Some(frame) if !frame.more)
    }
}

/// The animation scheduler that ticks all registered animations
pub struct AnimationScheduler {
    entries: SlotMap<AnimationId, Entry>,
    last_tick: Option<u64>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            last_tick: None,
        }
    }

    pub fn add(&mut self, animation: impl Animate + 'static) -> AnimationId {
        self.add_boxed(Box::new(animation))
    }

    pub fn add_boxed(&mut self, animation: Box<dyn Animate>) -> AnimationId {
        self.entries.insert(Entry {
            animation,
            transformation: Transformation::IDENTITY,
            frame: None,
        })
    }

    pub fn remove(&mut self, id: AnimationId) -> Option<Box<dyn Animate>> {
        self.entries.remove(id).map(|entry| entry.animation)
    }

    pub fn contains(&self, id: AnimationId) -> bool {
        self.entries.contains_key(id)
    }

    /// Transformation produced for `id` by the latest tick
    pub fn transformation(&self, id: AnimationId) -> Option<&Transformation> {
        self.entries.get(id).map(|entry| &entry.transformation)
    }

    /// Frame reported for `id` by the latest tick
    pub fn frame(&self, id: AnimationId) -> Option<Frame> {
        self.entries.get(id).and_then(|entry| entry.frame)
    }

    pub fn animation(&self, id: AnimationId) -> Option<&dyn Animate> {
        self.entries.get(id).map(|entry| entry.animation.as_ref())
    }

    /// Advance every animation to `now_ms`.
    ///
    /// Returns the number of animations that still want ticks.
    pub fn tick(&mut self, now_ms: u64) -> usize {
        let retired = self.retire_finished();
        if retired > 0 {
            tracing::debug!(retired, "retired finished animations");
        }

        if let Some(last) = self.last_tick {
            if now_ms < last {
                tracing::debug!(now_ms, last, "scheduler tick moved backward");
            }
        }
        self.last_tick = Some(now_ms);

        let mut active = 0;
        for (_, entry) in self.entries.iter_mut() {
            entry.transformation.clear();
            let frame = entry.animation.advance(now_ms, &mut entry.transformation);
            if frame.more {
                active += 1;
            }
            entry.frame = Some(frame);
        }

        tracing::trace!(now_ms, active, total = self.entries.len(), "scheduler tick");
        active
    }

    /// Drop entries whose last frame reported no further work
    pub fn retire_finished(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.finished());
        before - self.entries.len()
    }

    /// Check if any animations still want ticks
    pub fn has_active_animations(&self) -> bool {
        self.entries
            .values()
            .any(|entry| entry.frame.map_or(true, |frame| frame.more))
    }

    /// Iterate over every animation's latest transformation
    pub fn iter(&self) -> impl Iterator<Item = (AnimationId, &Transformation)> {
        self.entries
            .iter()
            .map(|(id, entry)| (id, &entry.transformation))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}
