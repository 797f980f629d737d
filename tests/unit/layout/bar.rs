use super::*;

fn bar() -> BarLayout {
    // 3 segments of width 100 with 8px gaps
    BarLayout::compute(Rect::new(0.0, 0.0, 316.0, 4.0), 3, 8.0)
}

#[test]
fn frames_are_equal_width_and_padded() {
    let layout = bar();
    assert_eq!(layout.frames.len(), 3);
    assert_eq!(layout.frames[0], Rect::new(0.0, 0.0, 100.0, 4.0));
    assert_eq!(layout.frames[1], Rect::new(108.0, 0.0, 208.0, 4.0));
    assert_eq!(layout.frames[2], Rect::new(216.0, 0.0, 316.0, 4.0));
    assert_eq!(layout.corner_radius, 2.0);
}

#[test]
fn frames_follow_bounds_origin() {
    let layout = BarLayout::compute(Rect::new(20.0, 200.0, 336.0, 210.0), 3, 8.0);
    assert_eq!(layout.frames[0].x0, 20.0);
    assert_eq!(layout.frames[2].x1, 336.0);
    assert_eq!(layout.frames[1].y0, 200.0);
    assert_eq!(layout.corner_radius, 5.0);
}

#[test]
fn hit_testing_maps_x_to_segment() {
    let layout = bar();
    assert_eq!(layout.segment_at(0.0), Some(0));
    assert_eq!(layout.segment_at(50.0), Some(0));
    assert_eq!(layout.segment_at(150.0), Some(1));
    assert_eq!(layout.segment_at(316.0), Some(2));
    assert_eq!(layout.segment_at(104.0), None);
    assert_eq!(layout.segment_at(-1.0), None);
    assert_eq!(layout.segment_at(400.0), None);
}

#[test]
fn negative_inset_grows_touch_area() {
    let layout = bar();
    assert!(layout.contains(Point::new(10.0, -6.0), -8.0));
    assert!(!layout.contains(Point::new(10.0, -6.0), 0.0));
    assert!(!layout.contains(Point::new(10.0, 13.0), -8.0));
}

#[test]
fn narrow_bounds_never_produce_negative_widths() {
    let layout = BarLayout::compute(Rect::new(0.0, 0.0, 10.0, 4.0), 4, 8.0);
    assert!(layout.frames.iter().all(|f| f.width() >= 0.0));
}
