use std::rc::Rc;

use crate::foundation::core::SegmentHandle;
use crate::lifecycle::hub::{LifecycleEvent, LifecycleHub};
use crate::render::sim::SimRenderer;
use crate::timeline::config::TimelineConfig;
use crate::timeline::machine::{PlaybackState, Timeline};
use crate::timeline::observer::{EventLog, ObserverEvent};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn setup(n: usize, duration: f64) -> (SimRenderer, Timeline, Rc<EventLog>) {
    let mut r = SimRenderer::default();
    let mut t = Timeline::new(&TimelineConfig::new(n, duration).looping(false), &mut r).unwrap();
    let log = Rc::new(EventLog::new());
    t.set_observer(&log);
    (r, t, log)
}

fn step(t: &mut Timeline, r: &mut SimRenderer, dt: f64) {
    for completion in r.advance(dt) {
        t.handle_completion(completion, r);
    }
}

fn suspend(t: &mut Timeline, r: &mut SimRenderer) {
    for completion in r.suspend() {
        t.handle_completion(completion, r);
    }
}

fn fill0(r: &SimRenderer) -> f64 {
    r.presentation_fill(SegmentHandle(0)).unwrap()
}

#[test]
fn full_background_cycle_through_hub() {
    let (mut r, mut t, log) = setup(3, 5.0);
    let hub = LifecycleHub::new();
    t.subscribe_lifecycle(&hub);
    t.start(&mut r);
    step(&mut t, &mut r, 2.0);

    hub.emit(LifecycleEvent::WillResignActive);
    hub.emit(LifecycleEvent::DidEnterBackground);
    assert_eq!(t.pump_lifecycle(&mut r), 2);
    assert!(t.active_segment().unwrap().is_persisting());
    suspend(&mut t, &mut r);
    assert!(t.is_animating());
    step(&mut t, &mut r, 50.0);

    hub.emit(LifecycleEvent::WillEnterForeground);
    assert_eq!(t.pump_lifecycle(&mut r), 1);
    // frozen by the resign signal until the app is active again
    assert!(approx(fill0(&r), 0.4));
    step(&mut t, &mut r, 1.0);
    assert!(approx(fill0(&r), 0.4));

    hub.emit(LifecycleEvent::DidBecomeActive);
    assert_eq!(t.pump_lifecycle(&mut r), 1);
    step(&mut t, &mut r, 2.0);
    assert!(approx(fill0(&r), 0.8));
    assert!(log.events().is_empty());

    step(&mut t, &mut r, 1.0);
    assert_eq!(
        log.events(),
        vec![ObserverEvent::ChangedIndex {
            index: 1,
            animated: true
        }]
    );
    assert_eq!(t.pump_lifecycle(&mut r), 0);
}

#[test]
fn restore_continuation_survives_repeated_background_cycles() {
    let (mut r, mut t, log) = setup(2, 4.0);
    t.start(&mut r);
    step(&mut t, &mut r, 1.0);

    for _ in 0..2 {
        t.handle_lifecycle(LifecycleEvent::DidEnterBackground, &mut r);
        suspend(&mut t, &mut r);
        step(&mut t, &mut r, 30.0);
        t.handle_lifecycle(LifecycleEvent::WillEnterForeground, &mut r);
        assert!(approx(fill0(&r), 0.25));
        assert!(t.active_segment().unwrap().has_restore_continuation());
    }

    step(&mut t, &mut r, 3.0);
    assert_eq!(log.changed_count(), 1);
    assert_eq!(t.state(), PlaybackState::Running(1));
    assert!(!t.segment(0).unwrap().has_restore_continuation());
}

#[test]
fn user_pause_survives_lifecycle_round_trip() {
    let (mut r, mut t, log) = setup(2, 2.0);
    t.start(&mut r);
    step(&mut t, &mut r, 1.0);
    t.pause(&mut r);

    t.handle_lifecycle(LifecycleEvent::WillResignActive, &mut r);
    t.handle_lifecycle(LifecycleEvent::DidEnterBackground, &mut r);
    suspend(&mut t, &mut r);
    step(&mut t, &mut r, 10.0);
    t.handle_lifecycle(LifecycleEvent::WillEnterForeground, &mut r);
    t.handle_lifecycle(LifecycleEvent::DidBecomeActive, &mut r);

    step(&mut t, &mut r, 5.0);
    assert!(approx(fill0(&r), 0.5));
    assert_eq!(t.state(), PlaybackState::Paused(0));

    t.resume_playing(&mut r);
    step(&mut t, &mut r, 1.0);
    assert_eq!(log.changed_count(), 1);
}

#[test]
fn short_interruption_freezes_and_thaws() {
    let (mut r, mut t, _log) = setup(2, 2.0);
    t.start(&mut r);
    step(&mut t, &mut r, 0.5);
    t.handle_lifecycle(LifecycleEvent::WillResignActive, &mut r);
    assert!(t.active_segment().unwrap().is_paused(&r));
    assert!(!t.active_segment().unwrap().is_persisting());
    step(&mut t, &mut r, 3.0);
    assert!(approx(fill0(&r), 0.25));
    t.handle_lifecycle(LifecycleEvent::DidBecomeActive, &mut r);
    step(&mut t, &mut r, 0.5);
    assert!(approx(fill0(&r), 0.5));
}

#[test]
fn seek_while_backgrounded_drops_snapshots() {
    let (mut r, mut t, log) = setup(3, 5.0);
    t.start(&mut r);
    step(&mut t, &mut r, 2.0);
    t.handle_lifecycle(LifecycleEvent::DidEnterBackground, &mut r);
    suspend(&mut t, &mut r);

    t.goto(2, false, &mut r);
    assert!(!t.segment(0).unwrap().is_persisting());
    t.handle_lifecycle(LifecycleEvent::WillEnterForeground, &mut r);
    assert_eq!(r.animating_segments(), 0);
    step(&mut t, &mut r, 10.0);
    assert!(log.events().is_empty());
    assert_eq!(r.presentation_fills(), vec![1.0, 1.0, 1.0]);
}

#[test]
fn lifecycle_past_the_end_is_ignored() {
    let (mut r, mut t, _log) = setup(1, 1.0);
    t.start(&mut r);
    step(&mut t, &mut r, 1.0);
    assert_eq!(t.state(), PlaybackState::Finished);
    t.handle_lifecycle(LifecycleEvent::DidEnterBackground, &mut r);
    t.handle_lifecycle(LifecycleEvent::WillEnterForeground, &mut r);
    assert_eq!(t.state(), PlaybackState::Finished);
}

#[test]
fn dropping_timeline_releases_subscription() {
    let (mut r, mut t, _log) = setup(2, 1.0);
    let hub = LifecycleHub::new();
    t.subscribe_lifecycle(&hub);
    assert!(t.is_subscribed());
    assert_eq!(hub.subscriber_count(), 1);

    t.unsubscribe_lifecycle();
    assert_eq!(hub.subscriber_count(), 0);
    hub.emit(LifecycleEvent::DidEnterBackground);
    assert_eq!(t.pump_lifecycle(&mut r), 0);

    t.subscribe_lifecycle(&hub);
    drop(t);
    assert_eq!(hub.subscriber_count(), 0);
}

#[test]
fn repeated_background_keeps_first_capture() {
    let (mut r, mut t, log) = setup(3, 2.0);
    t.start(&mut r);
    step(&mut t, &mut r, 0.5);

    t.handle_lifecycle(LifecycleEvent::DidEnterBackground, &mut r);
    suspend(&mut t, &mut r);
    t.handle_lifecycle(LifecycleEvent::DidEnterBackground, &mut r);
    assert_eq!(t.active_segment().unwrap().persisted_speed(), 1.0);
    assert_eq!(t.active_segment().unwrap().persisted_keys().len(), 1);

    t.handle_lifecycle(LifecycleEvent::WillEnterForeground, &mut r);
    t.handle_lifecycle(LifecycleEvent::DidBecomeActive, &mut r);
    assert!(approx(fill0(&r), 0.25));

    step(&mut t, &mut r, 1.5);
    assert_eq!(t.current_index(), 1);
    step(&mut t, &mut r, 2.0);
    assert_eq!(t.current_index(), 2);
    assert_eq!(log.changed_count(), 2);
}
