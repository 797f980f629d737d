use std::collections::BTreeMap;

use crate::{
    foundation::core::{AnimationId, Fill, Rect, SegmentHandle},
    layout::bar::BarLayout,
    render::backend::{FILL_ANIMATION_KEY, FillAnimation, FillCompletion, SegmentRenderer},
    segment::snapshot::AnimationSnapshot,
    timeline::config::SegmentStyle,
    timing::clock::{LayerClock, LayerTiming},
};

#[derive(Clone, Debug, Default)]
struct SimSegment {
    clock: LayerTiming,
    model_fill: f64,
    animations: BTreeMap<String, AnimationSnapshot>,
    frame: Rect,
}

impl SimSegment {
    fn local_time(&self, now: f64) -> f64 {
        self.clock.local_time(now)
    }

    fn presentation_fill(&self, now: f64) -> f64 {
        let local = self.local_time(now);
        self.animations
            .get(FILL_ANIMATION_KEY)
            .or_else(|| self.animations.values().next())
            .map(|a| a.value_at(local))
            .unwrap_or(self.model_fill)
    }
}

/// Deterministic in-memory renderer driven by a virtual media clock.
///
/// It follows the layer-time model a compositor uses: every segment owns a
/// [`LayerTiming`], animations are scheduled in layer-local time, and starting an
/// animation sets the model value to its target immediately while the presentation value
/// interpolates. Time only moves when [`SimRenderer::advance`] is called.
#[derive(Clone, Debug)]
pub struct SimRenderer {
    now: f64,
    bounds: Rect,
    padding: f64,
    layout: Option<BarLayout>,
    style: Option<SegmentStyle>,
    segments: Vec<SimSegment>,
}

impl Default for SimRenderer {
    fn default() -> Self {
        Self::new(Rect::new(0.0, 0.0, 320.0, 4.0), 8.0)
    }
}

impl SimRenderer {
    pub fn new(bounds: Rect, padding: f64) -> Self {
        Self {
            now: 0.0,
            bounds,
            padding,
            layout: None,
            style: None,
            segments: Vec::new(),
        }
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    /// Move the media clock forward by `dt` seconds and collect natural completions.
    pub fn advance(&mut self, dt: f64) -> Vec<FillCompletion> {
        self.now += dt.max(0.0);
        let now = self.now;
        let mut done = Vec::new();
        for (idx, seg) in self.segments.iter_mut().enumerate() {
            let local = seg.local_time(now);
            let finished_keys: Vec<String> = seg
                .animations
                .iter()
                .filter(|(_, a)| a.is_complete_at(local))
                .map(|(k, _)| k.clone())
                .collect();
            for key in finished_keys {
                if let Some(anim) = seg.animations.remove(&key) {
                    done.push(FillCompletion {
                        segment: SegmentHandle(idx),
                        id: anim.id,
                        finished: true,
                    });
                }
            }
        }
        done
    }

    /// Strip every attached animation the way a host system does when the app is
    /// backgrounded. Each removal reports `finished == false`.
    pub fn suspend(&mut self) -> Vec<FillCompletion> {
        let mut removed = Vec::new();
        for (idx, seg) in self.segments.iter_mut().enumerate() {
            for (_, anim) in std::mem::take(&mut seg.animations) {
                removed.push(FillCompletion {
                    segment: SegmentHandle(idx),
                    id: anim.id,
                    finished: false,
                });
            }
        }
        if !removed.is_empty() {
            tracing::debug!(count = removed.len(), "host suspended animations");
        }
        removed
    }

    /// Fill fraction currently on screen for `segment`.
    pub fn presentation_fill(&self, segment: SegmentHandle) -> Option<f64> {
        self.segments
            .get(segment.0)
            .map(|s| s.presentation_fill(self.now))
    }

    pub fn presentation_fills(&self) -> Vec<f64> {
        self.segments
            .iter()
            .map(|s| s.presentation_fill(self.now))
            .collect()
    }

    /// Fill fraction the segment settles on once its animations are gone.
    pub fn model_fill(&self, segment: SegmentHandle) -> Option<f64> {
        self.segments.get(segment.0).map(|s| s.model_fill)
    }

    pub fn animation_count(&self, segment: SegmentHandle) -> usize {
        self.segments
            .get(segment.0)
            .map(|s| s.animations.len())
            .unwrap_or(0)
    }

    /// Number of segments with at least one attached animation.
    pub fn animating_segments(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| !s.animations.is_empty())
            .count()
    }

    pub fn frame(&self, segment: SegmentHandle) -> Option<Rect> {
        self.layout.as_ref()?;
        self.segments.get(segment.0).map(|s| s.frame)
    }

    pub fn layout(&self) -> Option<&BarLayout> {
        self.layout.as_ref()
    }

    pub fn style(&self) -> Option<&SegmentStyle> {
        self.style.as_ref()
    }

    fn segment_mut(&mut self, segment: SegmentHandle) -> Option<&mut SimSegment> {
        let seg = self.segments.get_mut(segment.0);
        if seg.is_none() {
            tracing::warn!(?segment, "unknown segment handle");
        }
        seg
    }
}

impl SegmentRenderer for SimRenderer {
    fn create_segment(&mut self) -> SegmentHandle {
        self.segments.push(SimSegment::default());
        SegmentHandle(self.segments.len() - 1)
    }

    fn prepare_layout(&mut self) {
        let layout = BarLayout::compute(self.bounds, self.segments.len(), self.padding);
        for (seg, frame) in self.segments.iter_mut().zip(&layout.frames) {
            seg.frame = *frame;
        }
        self.layout = Some(layout);
    }

    fn apply_style(&mut self, style: &SegmentStyle) {
        self.style = Some(*style);
    }

    fn current_time(&self) -> f64 {
        self.now
    }

    fn animate_fill(&mut self, segment: SegmentHandle, fill: FillAnimation, id: AnimationId) {
        let now = self.now;
        let Some(seg) = self.segment_mut(segment) else {
            return;
        };
        let local = seg.local_time(now);
        let from = seg.presentation_fill(now);
        seg.model_fill = fill.to;
        seg.animations.insert(
            FILL_ANIMATION_KEY.to_owned(),
            AnimationSnapshot {
                id,
                from,
                to: fill.to,
                duration: fill.duration,
                begin_time: local + fill.delay,
                timing: fill.timing,
            },
        );
    }

    fn set_fill_immediate(&mut self, segment: SegmentHandle, fill: Fill) {
        if let Some(seg) = self.segment_mut(segment) {
            seg.model_fill = fill.as_fraction();
        }
    }

    fn cancel_animation(&mut self, segment: SegmentHandle) {
        if let Some(seg) = self.segment_mut(segment) {
            seg.animations.clear();
        }
    }

    fn clock(&self, segment: SegmentHandle) -> Option<&dyn LayerClock> {
        self.segments
            .get(segment.0)
            .map(|s| &s.clock as &dyn LayerClock)
    }

    fn clock_mut(&mut self, segment: SegmentHandle) -> Option<&mut dyn LayerClock> {
        self.segment_mut(segment)
            .map(|s| &mut s.clock as &mut dyn LayerClock)
    }

    fn animation_keys(&self, segment: SegmentHandle) -> Vec<String> {
        self.segments
            .get(segment.0)
            .map(|s| s.animations.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn snapshot_animation(&self, segment: SegmentHandle, key: &str) -> Option<AnimationSnapshot> {
        self.segments.get(segment.0)?.animations.get(key).cloned()
    }

    fn attach_animation(&mut self, segment: SegmentHandle, key: &str, snapshot: AnimationSnapshot) {
        if let Some(seg) = self.segment_mut(segment) {
            seg.animations.insert(key.to_owned(), snapshot);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/sim.rs"]
mod tests;
