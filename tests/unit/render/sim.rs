use super::*;
use crate::timing::{ease::Timing, offset::TimeOffsetClock};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn one_segment() -> (SimRenderer, SegmentHandle) {
    let mut r = SimRenderer::default();
    let h = r.create_segment();
    (r, h)
}

#[test]
fn animation_interpolates_and_completes_naturally() {
    let (mut r, h) = one_segment();
    r.animate_fill(h, FillAnimation::full(2.0, Timing::Linear), AnimationId(1));
    assert_eq!(r.model_fill(h), Some(1.0));
    assert_eq!(r.presentation_fill(h), Some(0.0));

    assert!(r.advance(0.5).is_empty());
    assert!(approx(r.presentation_fill(h).unwrap(), 0.25));

    let done = r.advance(1.5);
    assert_eq!(
        done,
        vec![FillCompletion {
            segment: h,
            id: AnimationId(1),
            finished: true,
        }]
    );
    assert_eq!(r.animation_count(h), 0);
    assert_eq!(r.presentation_fill(h), Some(1.0));
}

#[test]
fn paused_clock_holds_presentation() {
    let (mut r, h) = one_segment();
    r.animate_fill(h, FillAnimation::full(2.0, Timing::Linear), AnimationId(1));
    r.advance(1.0);
    let now = r.now();
    TimeOffsetClock::pause(r.clock_mut(h).unwrap(), now);
    assert!(r.advance(10.0).is_empty());
    assert!(approx(r.presentation_fill(h).unwrap(), 0.5));
}

#[test]
fn suspend_strips_animations_and_reveals_model() {
    let (mut r, h) = one_segment();
    r.animate_fill(h, FillAnimation::full(2.0, Timing::Linear), AnimationId(4));
    r.advance(0.5);
    let removed = r.suspend();
    assert_eq!(removed.len(), 1);
    assert!(!removed[0].finished);
    assert_eq!(removed[0].id, AnimationId(4));
    assert_eq!(r.presentation_fill(h), Some(1.0));
}

#[test]
fn cancel_is_silent() {
    let (mut r, h) = one_segment();
    r.animate_fill(h, FillAnimation::full(1.0, Timing::Linear), AnimationId(1));
    r.cancel_animation(h);
    r.set_fill_immediate(h, Fill::Empty);
    assert!(r.advance(5.0).is_empty());
    assert_eq!(r.presentation_fill(h), Some(0.0));
}

#[test]
fn snapshots_are_independent_copies() {
    let (mut r, h) = one_segment();
    r.animate_fill(h, FillAnimation::full(2.0, Timing::Linear), AnimationId(9));
    let snap = r.snapshot_animation(h, FILL_ANIMATION_KEY).unwrap();
    r.cancel_animation(h);
    assert_eq!(r.animation_count(h), 0);
    assert_eq!(snap.id, AnimationId(9));

    r.attach_animation(h, FILL_ANIMATION_KEY, snap.clone());
    assert_eq!(r.animation_keys(h), vec![FILL_ANIMATION_KEY.to_owned()]);
    assert_eq!(r.snapshot_animation(h, FILL_ANIMATION_KEY), Some(snap));
}

#[test]
fn layout_and_style_are_recorded() {
    let mut r = SimRenderer::new(Rect::new(0.0, 0.0, 316.0, 4.0), 8.0);
    let hs: Vec<_> = (0..3).map(|_| r.create_segment()).collect();
    assert!(r.frame(hs[0]).is_none());
    r.prepare_layout();
    assert_eq!(r.frame(hs[1]), Some(Rect::new(108.0, 0.0, 208.0, 4.0)));

    let style = SegmentStyle::default();
    r.apply_style(&style);
    assert_eq!(r.style(), Some(&style));
}

#[test]
fn unknown_handles_are_ignored() {
    let mut r = SimRenderer::default();
    let ghost = SegmentHandle(3);
    r.animate_fill(ghost, FillAnimation::full(1.0, Timing::Linear), AnimationId(1));
    r.set_fill_immediate(ghost, Fill::Full);
    assert!(r.clock_mut(ghost).is_none());
    assert!(r.presentation_fill(ghost).is_none());
    assert!(r.animation_keys(ghost).is_empty());
}
