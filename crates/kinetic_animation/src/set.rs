//! Animation sets
//!
//! An [`AnimationSet`] drives several children against one host tick and
//! merges their contributions into a single [`Transformation`]. Each child
//! writes into its own scratch record, which is then composed onto the output
//! in declaration order: alpha values multiply, matrices post-multiply.

use crate::animation::{Animate, AnimationState, Frame};
use kinetic_core::{ConfigError, Transformation};
use smallvec::SmallVec;

/// How children share the set's timeline
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Composition {
    /// Every child starts together
    #[default]
    Concurrent,
    /// Each child starts once all previous children have finished
    Sequential,
}

/// A composition of animations
pub struct AnimationSet {
    composition: Composition,
    children: SmallVec<[Box<dyn Animate>; 4]>,
    start_offset_ms: u32,
    start_time: Option<u64>,
    state: AnimationState,
}

impl AnimationSet {
    pub fn new(composition: Composition) -> Self {
        Self {
            composition,
            children: SmallVec::new(),
            start_offset_ms: 0,
            start_time: None,
            state: AnimationState::NotStarted,
        }
    }

    pub fn concurrent() -> Self {
        Self::new(Composition::Concurrent)
    }

    pub fn sequential() -> Self {
        Self::new(Composition::Sequential)
    }

    /// Add a child (builder pattern)
    pub fn with(mut self, child: impl Animate + 'static) -> Self {
        self.push_child(Box::new(child));
        self
    }

    /// Delay applied before any child starts (builder pattern)
    pub fn with_start_offset_ms(mut self, start_offset_ms: u32) -> Self {
        self.start_offset_ms = start_offset_ms;
        self
    }

    /// Add a child to a set that has not started yet
    pub fn add(&mut self, child: impl Animate + 'static) -> Result<(), ConfigError> {
        if self.state != AnimationState::NotStarted {
            return Err(ConfigError::AlreadyStarted);
        }
        self.push_child(Box::new(child));
        Ok(())
    }

    /// Children added after the start time is known are placed on the
    /// set's timeline immediately.
    fn push_child(&mut self, child: Box<dyn Animate>) {
        self.children.push(child);
        if let Some(start_ms) = self.start_time {
            self.rebase_children(start_ms);
        }
    }

    pub fn composition(&self) -> Composition {
        self.composition
    }

    pub fn start_offset_ms(&self) -> u32 {
        self.start_offset_ms
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn children(&self) -> impl Iterator<Item = &dyn Animate> {
        self.children.iter().map(|c| -> &dyn Animate { c.as_ref() })
    }

    /// Derived duration: latest child end for concurrent sets, sum of child
    /// durations for sequential ones. `None` if any child repeats forever.
    pub fn duration_ms(&self) -> Option<u64> {
        let mut hints = self.children.iter().map(|c| c.compute_duration_hint());
        match self.composition {
            Composition::Concurrent => hints.try_fold(0u64, |max, hint| hint.map(|h| max.max(h))),
            Composition::Sequential => {
                hints.try_fold(0u64, |sum, hint| hint.map(|h| sum.saturating_add(h)))
            }
        }
    }

    /// Pin every child's start time relative to `start_ms`.
    ///
    /// Sequential children are shifted by the total duration of their
    /// predecessors; a child after an endless predecessor never starts.
    fn rebase_children(&mut self, start_ms: u64) {
        let base = start_ms.saturating_add(self.start_offset_ms as u64);
        let mut offset = Some(0u64);

        for child in self.children.iter_mut() {
            let child_start = match offset {
                Some(offset) => base.saturating_add(offset),
                None => u64::MAX,
            };
            child.set_start_time(child_start);

            if self.composition == Composition::Sequential {
                offset = match (offset, child.compute_duration_hint()) {
                    (Some(offset), Some(hint)) => Some(offset.saturating_add(hint)),
                    _ => None,
                };
            }
        }
    }
}

impl Default for AnimationSet {
    fn default() -> Self {
        Self::concurrent()
    }
}

impl std::fmt::Debug for AnimationSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationSet")
            .field("composition", &self.composition)
            .field("children", &self.children.len())
            .field("start_offset_ms", &self.start_offset_ms)
            .field("start_time", &self.start_time)
            .field("state", &self.state)
            .finish()
    }
}

impl Animate for AnimationSet {
    fn advance(&mut self, now_ms: u64, t: &mut Transformation) -> Frame {
        if self.start_time.is_none() {
            self.set_start_time(now_ms);
        }

        if self.children.is_empty() {
            self.state = AnimationState::Ended;
            return Frame {
                state: AnimationState::Ended,
                applied: false,
                more: false,
            };
        }

        let mut applied = false;
        let mut more = false;
        let mut all_ended = true;
        let mut any_started = false;

        for child in self.children.iter_mut() {
            let mut scratch = Transformation::IDENTITY;
            let frame = child.advance(now_ms, &mut scratch);

            if frame.applied {
                t.compose_fields(
                    &scratch,
                    child.has_alpha(),
                    child.will_change_transformation_matrix(),
                );
                applied = true;
            }
            more |= frame.more;
            all_ended &= frame.is_ended();
            any_started |= !frame.is_pending();
        }

        let derived = if all_ended {
            AnimationState::Ended
        } else if any_started {
            AnimationState::Active
        } else {
            AnimationState::NotStarted
        };
        if derived > self.state {
            tracing::debug!(now_ms, ?derived, "animation set state changed");
            self.state = derived;
        }

        Frame {
            state: self.state,
            applied,
            more,
        }
    }

    fn reset(&mut self) {
        self.start_time = None;
        self.state = AnimationState::NotStarted;
        for child in self.children.iter_mut() {
            child.reset();
        }
    }

    fn set_start_time(&mut self, start_ms: u64) {
        self.start_time = Some(start_ms);
        self.rebase_children(start_ms);
    }

    fn start_time(&self) -> Option<u64> {
        self.start_time
    }

    fn state(&self) -> AnimationState {
        self.state
    }

    fn compute_duration_hint(&self) -> Option<u64> {
        self.duration_ms()
            .map(|duration| (self.start_offset_ms as u64).saturating_add(duration))
    }

    fn has_alpha(&self) -> bool {
        self.children.iter().any(|c| c.has_alpha())
    }

    fn will_change_transformation_matrix(&self) -> bool {
        self.children
            .iter()
            .any(|c| c.will_change_transformation_matrix())
    }

    fn will_change_bounds(&self) -> bool {
        self.children.iter().any(|c| c.will_change_bounds())
    }

    fn fill_after(&self) -> bool {
        self.children.iter().any(|c| c.fill_after())
    }
}
