use std::rc::{Rc, Weak};

use crate::{
    foundation::core::{AnimationId, Fill, Point},
    foundation::error::StorybarResult,
    layout::bar::BarLayout,
    lifecycle::hub::LifecycleSubscription,
    render::backend::{FillAnimation, FillCompletion, SegmentRenderer},
    segment::state::SegmentState,
    timeline::config::{SegmentStyle, TimelineConfig},
    timeline::continuation::{Continuation, take_matching},
    timeline::observer::TimelineObserver,
    timing::ease::Timing,
};

/// Coarse playback state derived from the timeline flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "state", content = "index", rename_all = "snake_case")]
pub enum PlaybackState {
    /// Not auto-advancing and positioned on a segment (before `start`, after `reset` or a
    /// seek to a real segment).
    Idle,
    Running(usize),
    Paused(usize),
    /// Positioned past the last segment: a non-looping run completed, or a seek to the
    /// end sentinel.
    Finished,
}

/// State machine driving a row of segments that fill one after another.
///
/// The timeline never owns its renderer: every operation that touches visuals takes it
/// as a parameter. Natural completions come back through
/// [`Timeline::handle_completion`]; lifecycle signals through
/// [`Timeline::handle_lifecycle`] or a [`crate::LifecycleHub`] subscription.
#[derive(Debug)]
pub struct Timeline {
    pub(crate) segments: Vec<SegmentState>,
    duration: f64,
    timing: Timing,
    pub(crate) current_index: usize,
    is_animating: bool,
    pub(crate) is_paused: bool,
    looping: bool,
    laid_out: bool,
    style: SegmentStyle,
    touch_inset: f64,
    next_id: AnimationId,
    pub(crate) pending: Option<Continuation>,
    observer: Option<Weak<dyn TimelineObserver>>,
    pub(crate) lifecycle: Option<LifecycleSubscription>,
}

impl Timeline {
    pub fn new<R: SegmentRenderer + ?Sized>(
        config: &TimelineConfig,
        renderer: &mut R,
    ) -> StorybarResult<Self> {
        config.validate()?;
        let segments = (0..config.segment_count)
            .map(|index| SegmentState::new(index, renderer.create_segment()))
            .collect();
        renderer.apply_style(&config.style);

        Ok(Self {
            segments,
            duration: config.duration_secs,
            timing: config.timing,
            current_index: 0,
            is_animating: false,
            is_paused: false,
            looping: config.looping,
            laid_out: false,
            style: config.style,
            touch_inset: config.extra_vertical_touch_inset,
            next_id: AnimationId(1),
            pending: None,
            observer: None,
            lifecycle: None,
        })
    }

    /// Register the host's observer. Only a weak reference is kept.
    pub fn set_observer<O: TimelineObserver + 'static>(&mut self, observer: &Rc<O>) {
        let weak: Weak<O> = Rc::downgrade(observer);
        self.observer = Some(weak);
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Index of the active segment; equals `segment_count()` past the last one.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_animating(&self) -> bool {
        self.is_animating
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn style(&self) -> SegmentStyle {
        self.style
    }

    pub fn set_style<R: SegmentRenderer + ?Sized>(&mut self, style: SegmentStyle, renderer: &mut R) {
        self.style = style;
        renderer.apply_style(&style);
    }

    pub fn state(&self) -> PlaybackState {
        if self.is_animating {
            if self.is_paused {
                PlaybackState::Paused(self.current_index)
            } else {
                PlaybackState::Running(self.current_index)
            }
        } else if self.current_index >= self.segments.len() {
            PlaybackState::Finished
        } else {
            PlaybackState::Idle
        }
    }

    pub fn segment(&self, index: usize) -> Option<&SegmentState> {
        self.segments.get(index)
    }

    pub fn active_segment(&self) -> Option<&SegmentState> {
        self.segments.get(self.current_index)
    }

    /// Begin auto-advancing from the current segment.
    ///
    /// No-op while already animating, and when positioned past the last segment (call
    /// [`Timeline::reset`] first).
    #[tracing::instrument(skip(self, renderer))]
    pub fn start<R: SegmentRenderer + ?Sized>(&mut self, renderer: &mut R) {
        if !self.laid_out {
            renderer.prepare_layout();
            self.laid_out = true;
        }
        if self.is_animating {
            tracing::trace!("already animating");
            return;
        }
        if self.current_index >= self.segments.len() {
            tracing::debug!("nothing left to play; reset before starting again");
            return;
        }
        self.is_animating = true;
        self.animate(self.current_index, renderer);
    }

    fn animate<R: SegmentRenderer + ?Sized>(&mut self, index: usize, renderer: &mut R) {
        let Some(segment) = self.segments.get(index) else {
            tracing::warn!(index, "animate called past the last segment");
            return;
        };
        self.current_index = index;
        // A fresh fill must never inherit a frozen clock from an earlier pause.
        self.is_paused = false;
        segment.resume(renderer);

        let id = self.next_id;
        self.next_id = id.next();
        let handle = segment.handle();
        renderer.animate_fill(handle, FillAnimation::full(self.duration, self.timing), id);
        self.pending = Some(Continuation::new(id, handle));
        tracing::debug!(index, id = id.0, "segment fill started");
    }

    /// Feed a completion reported by the renderer.
    ///
    /// Only a natural completion of the live animation advances the timeline. Reports
    /// for cancelled or superseded animations are ignored, as is an interruption caused
    /// by the host stripping animations while this segment holds a background snapshot.
    pub fn handle_completion<R: SegmentRenderer + ?Sized>(
        &mut self,
        completion: FillCompletion,
        renderer: &mut R,
    ) {
        let id = completion.id;
        if !completion.finished {
            self.handle_interruption(id);
            return;
        }

        let continuation = take_matching(&mut self.pending, id).or_else(|| {
            self.segments
                .get_mut(self.current_index)
                .and_then(|s| s.settle_restored(id))
        });
        let Some(continuation) = continuation else {
            tracing::trace!(id = id.0, "stale completion ignored");
            return;
        };
        tracing::debug!(
            index = self.current_index,
            id = continuation.id().0,
            "segment fill completed"
        );
        self.advance_or_finish(renderer);
    }

    fn handle_interruption(&mut self, id: AnimationId) {
        let index = self.current_index;
        let Some(segment) = self.segments.get_mut(index) else {
            return;
        };
        let live = self.pending.as_ref().is_some_and(|c| c.matches(id));
        if !live && !segment.awaits_restored(id) {
            tracing::trace!(id = id.0, "stale interruption ignored");
            return;
        }
        if segment.is_persisting() {
            tracing::trace!(index, "fill removed while backgrounded; awaiting restore");
            return;
        }
        self.pending = None;
        segment.drop_restore();
        self.is_animating = false;
        self.is_paused = false;
        tracing::debug!(index, "fill interrupted; auto-advance stopped");
    }

    fn advance_or_finish<R: SegmentRenderer + ?Sized>(&mut self, renderer: &mut R) {
        let next = self.current_index + 1;
        if next < self.segments.len() {
            self.animate(next, renderer);
            self.notify_changed(next, true);
            return;
        }

        self.notify_finished();
        if self.looping {
            for segment in &mut self.segments {
                renderer.cancel_animation(segment.handle());
                segment.discard_persisted();
                renderer.set_fill_immediate(segment.handle(), Fill::Empty);
            }
            tracing::debug!("sequence finished; looping");
            self.animate(0, renderer);
        } else {
            self.current_index = self.segments.len();
            self.is_animating = false;
            self.is_paused = false;
            self.pending = None;
            tracing::debug!("sequence finished");
        }
    }

    /// Freeze every segment's clock, whichever is active.
    pub fn pause<R: SegmentRenderer + ?Sized>(&mut self, renderer: &mut R) {
        for segment in &self.segments {
            segment.pause(renderer);
        }
        self.is_paused = self.is_animating;
        tracing::debug!(index = self.current_index, "paused");
    }

    /// Thaw the active segment's clock. Other segments are never visually animating.
    pub fn resume_playing<R: SegmentRenderer + ?Sized>(&mut self, renderer: &mut R) {
        if let Some(segment) = self.segments.get(self.current_index) {
            segment.resume(renderer);
        }
        self.is_paused = false;
        tracing::debug!(index = self.current_index, "resumed");
    }

    pub fn set_paused<R: SegmentRenderer + ?Sized>(&mut self, paused: bool, renderer: &mut R) {
        if paused {
            self.pause(renderer);
        } else {
            self.resume_playing(renderer);
        }
    }

    /// Seek to `index`, clamped into `0..=segment_count()`.
    ///
    /// Segments up to and including `index` show full, the rest empty. Seeking always
    /// stops auto-advance; call [`Timeline::start`] to continue from the new position.
    #[tracing::instrument(skip(self, renderer))]
    pub fn goto<R: SegmentRenderer + ?Sized>(&mut self, index: i64, notify: bool, renderer: &mut R) {
        let len = self.segments.len();
        let index = index.clamp(0, len as i64) as usize;
        self.pending = None;
        for (i, segment) in self.segments.iter_mut().enumerate() {
            renderer.cancel_animation(segment.handle());
            segment.discard_persisted();
            renderer.set_fill_immediate(segment.handle(), Fill::from_reached(i <= index));
        }
        self.current_index = index;
        self.is_animating = false;
        self.is_paused = false;
        if notify {
            self.notify_changed(index, false);
        }
    }

    /// Back to segment 0 with every fill empty. Emits no notification.
    pub fn reset<R: SegmentRenderer + ?Sized>(&mut self, renderer: &mut R) {
        self.current_index = 0;
        self.is_animating = false;
        self.is_paused = false;
        self.pending = None;
        for segment in &mut self.segments {
            renderer.cancel_animation(segment.handle());
            segment.discard_persisted();
            renderer.set_fill_immediate(segment.handle(), Fill::Empty);
        }
        tracing::debug!("reset");
    }

    /// Seek to the segment under `point`, if the point is inside the touch area.
    pub fn tap<R: SegmentRenderer + ?Sized>(
        &mut self,
        layout: &BarLayout,
        point: Point,
        renderer: &mut R,
    ) -> Option<usize> {
        if !layout.contains(point, self.touch_inset) {
            return None;
        }
        let index = layout.segment_at(point.x)?;
        self.goto(index as i64, true, renderer);
        Some(index)
    }

    fn observer(&self) -> Option<Rc<dyn TimelineObserver>> {
        self.observer.as_ref().and_then(Weak::upgrade)
    }

    fn notify_changed(&self, index: usize, animated: bool) {
        if let Some(observer) = self.observer() {
            observer.changed_index(index, animated);
        }
    }

    fn notify_finished(&self) {
        if let Some(observer) = self.observer() {
            observer.finished();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/machine.rs"]
mod tests;
