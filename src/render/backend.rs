use crate::{
    foundation::core::{AnimationId, Fill, SegmentHandle},
    segment::snapshot::AnimationSnapshot,
    timeline::config::SegmentStyle,
    timing::{clock::LayerClock, ease::Timing},
};

/// Key under which a renderer stores the fill animation of a segment.
pub const FILL_ANIMATION_KEY: &str = "fill";

/// Request to animate a segment's fill from its current value to `to`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FillAnimation {
    pub to: f64,
    pub duration: f64,
    pub delay: f64,
    pub timing: Timing,
}

impl FillAnimation {
    /// Fill to 100% over `duration` seconds with no delay.
    pub fn full(duration: f64, timing: Timing) -> Self {
        Self {
            to: 1.0,
            duration,
            delay: 0.0,
            timing,
        }
    }
}

/// Completion report for a fill animation.
///
/// `finished` is `true` only for a natural completion; an animation removed before its
/// end (by the host system or an explicit removal) reports `false`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FillCompletion {
    pub segment: SegmentHandle,
    pub id: AnimationId,
    pub finished: bool,
}

/// The rendering collaborator a [`crate::Timeline`] drives.
///
/// Implementations own the visual elements and their animation clocks. All calls happen on
/// the thread that owns the timeline. Completions are not delivered through callbacks:
/// the host collects [`FillCompletion`] values from its renderer and feeds them to
/// [`crate::Timeline::handle_completion`].
pub trait SegmentRenderer {
    /// Create the visual element for one more segment.
    fn create_segment(&mut self) -> SegmentHandle;

    /// Lay segments out. Called once, on the first `start`.
    fn prepare_layout(&mut self) {}

    fn apply_style(&mut self, _style: &SegmentStyle) {}

    /// Current time of the global media clock, in seconds.
    fn current_time(&self) -> f64;

    /// Animate `segment`'s fill as described by `fill`, tagging the animation with `id`.
    fn animate_fill(&mut self, segment: SegmentHandle, fill: FillAnimation, id: AnimationId);

    /// Set the fill with no animation.
    fn set_fill_immediate(&mut self, segment: SegmentHandle, fill: Fill);

    /// Remove every in-flight animation of `segment` without reporting a completion.
    fn cancel_animation(&mut self, segment: SegmentHandle);

    fn clock(&self, segment: SegmentHandle) -> Option<&dyn LayerClock>;

    fn clock_mut(&mut self, segment: SegmentHandle) -> Option<&mut dyn LayerClock>;

    /// Keys of the animations currently attached to `segment`.
    fn animation_keys(&self, segment: SegmentHandle) -> Vec<String>;

    /// Copy of the animation attached under `key`, if any.
    fn snapshot_animation(&self, segment: SegmentHandle, key: &str) -> Option<AnimationSnapshot>;

    /// Attach `snapshot` under `key`, replacing whatever was there.
    fn attach_animation(&mut self, segment: SegmentHandle, key: &str, snapshot: AnimationSnapshot);
}
