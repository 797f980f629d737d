use std::collections::BTreeMap;

use crate::{
    foundation::core::{AnimationId, SegmentHandle},
    render::backend::SegmentRenderer,
    segment::snapshot::AnimationSnapshot,
    timeline::continuation::{Continuation, take_matching},
    timing::offset::TimeOffsetClock,
};

/// One segment of the bar: its render handle plus whatever it persisted across a
/// background transition.
#[derive(Debug)]
pub struct SegmentState {
    index: usize,
    handle: SegmentHandle,
    persisted: Option<BTreeMap<String, AnimationSnapshot>>,
    persisted_speed: f64,
    restore: Option<Continuation>,
}

impl SegmentState {
    pub fn new(index: usize, handle: SegmentHandle) -> Self {
        Self {
            index,
            handle,
            persisted: None,
            persisted_speed: 0.0,
            restore: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn handle(&self) -> SegmentHandle {
        self.handle
    }

    /// Whether animations are held for restoration (between background and foreground).
    pub fn is_persisting(&self) -> bool {
        self.persisted.is_some()
    }

    pub fn persisted_speed(&self) -> f64 {
        self.persisted_speed
    }

    pub fn persisted_keys(&self) -> Vec<String> {
        self.persisted
            .as_ref()
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn has_restore_continuation(&self) -> bool {
        self.restore.is_some()
    }

    pub fn is_paused<R: SegmentRenderer + ?Sized>(&self, renderer: &R) -> bool {
        renderer
            .clock(self.handle)
            .is_some_and(|c| TimeOffsetClock::is_paused(c))
    }

    pub fn pause<R: SegmentRenderer + ?Sized>(&self, renderer: &mut R) -> bool {
        let now = renderer.current_time();
        match renderer.clock_mut(self.handle) {
            Some(clock) => TimeOffsetClock::pause(clock, now),
            None => false,
        }
    }

    pub fn resume<R: SegmentRenderer + ?Sized>(&self, renderer: &mut R) -> bool {
        let now = renderer.current_time();
        match renderer.clock_mut(self.handle) {
            Some(clock) => TimeOffsetClock::resume(clock, now),
            None => false,
        }
    }

    /// Capture every attached animation and freeze the clock before the host suspends
    /// animation clocks.
    ///
    /// A repeated background signal before the next foreground keeps the first capture.
    pub fn enter_background<R: SegmentRenderer + ?Sized>(&mut self, renderer: &mut R) {
        if self.persisted.is_some() {
            tracing::debug!(segment = self.index, "already persisted; keeping first capture");
            return;
        }
        let Some(clock) = renderer.clock_mut(self.handle) else {
            tracing::warn!(segment = self.index, "no clock for segment; nothing persisted");
            return;
        };
        self.persisted_speed = clock.speed();
        // A clock paused from outside still reports its animations at speed 1.
        clock.set_speed(1.0);

        let mut snapshots = BTreeMap::new();
        for key in renderer.animation_keys(self.handle) {
            if let Some(snapshot) = renderer.snapshot_animation(self.handle, &key) {
                snapshots.insert(key, snapshot);
            }
        }

        if let Some(clock) = renderer.clock_mut(self.handle) {
            clock.set_speed(self.persisted_speed);
        }
        self.pause(renderer);

        tracing::debug!(
            segment = self.index,
            speed = self.persisted_speed,
            animations = snapshots.len(),
            "segment persisted for background"
        );
        self.persisted = Some(snapshots);
    }

    /// Re-attach persisted animations and resume if the segment was playing.
    ///
    /// `continuation` is held until a restored animation carrying its id completes
    /// naturally; see [`SegmentState::settle_restored`]. Passing `None` keeps a
    /// continuation handed over by an earlier foreground transition.
    pub fn enter_foreground<R: SegmentRenderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        continuation: Option<Continuation>,
    ) {
        let restored = self.persisted.take().unwrap_or_default();
        let count = restored.len();
        for (key, snapshot) in restored {
            renderer.attach_animation(self.handle, &key, snapshot);
        }
        if continuation.is_some() {
            self.restore = continuation;
        }
        if self.persisted_speed == 1.0 {
            self.resume(renderer);
        }
        tracing::debug!(
            segment = self.index,
            restored = count,
            resumed = self.persisted_speed == 1.0,
            "segment restored from background"
        );
    }

    /// Short interruption: freeze without capturing anything.
    pub fn will_resign_active<R: SegmentRenderer + ?Sized>(&self, renderer: &mut R) {
        self.pause(renderer);
    }

    pub fn did_become_active<R: SegmentRenderer + ?Sized>(&self, renderer: &mut R) {
        if self.is_paused(renderer) {
            self.resume(renderer);
        }
    }

    /// Release the restore continuation if `id` is the animation it waits for.
    ///
    /// Only the first matching completion gets it back; later ones get `None`.
    pub fn settle_restored(&mut self, id: AnimationId) -> Option<Continuation> {
        take_matching(&mut self.restore, id)
    }

    pub fn awaits_restored(&self, id: AnimationId) -> bool {
        self.restore.as_ref().is_some_and(|c| c.matches(id))
    }

    /// Give up on the restore continuation after its animation was interrupted.
    pub fn drop_restore(&mut self) -> Option<Continuation> {
        self.restore.take()
    }

    /// Drop any persisted snapshots and pending restore continuation.
    pub fn discard_persisted(&mut self) {
        self.persisted = None;
        self.restore = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/segment/state.rs"]
mod tests;
