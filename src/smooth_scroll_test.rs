use super::*;

#[test]
fn easing_hits_endpoints_and_midpoint() {
    assert_eq!(ease_in_out_cubic(0.0), 0.0);
    assert_eq!(ease_in_out_cubic(1.0), 1.0);
    assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-12);
}

#[test]
fn easing_is_monotonic() {
    let samples: Vec<f64> = (0..=20_i32).map(|i| ease_in_out_cubic(f64::from(i) / 20.0)).collect();
    assert!(samples.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn easing_clamps_out_of_range_input() {
    assert_eq!(ease_in_out_cubic(-1.0), 0.0);
    assert_eq!(ease_in_out_cubic(3.0), 1.0);
}

#[test]
fn first_frame_starts_at_origin() {
    let mut animation = ScrollAnimation::new(200.0, 1200.0, 600.0);
    let frame = animation.step(5_000.0);
    assert_eq!(frame, Frame { y: 200.0, done: false });
}

#[test]
fn halfway_frame_is_halfway_down() {
    let mut animation = ScrollAnimation::new(0.0, 1000.0, 600.0);
    animation.step(0.0);
    let frame = animation.step(300.0);
    assert!((frame.y - 500.0).abs() < 1e-9);
    assert!(!frame.done);
}

#[test]
fn animation_finishes_exactly_on_target() {
    let mut animation = ScrollAnimation::new(0.0, 1000.0, 600.0);
    animation.step(10.0);
    assert_eq!(animation.step(610.0), Frame { y: 1000.0, done: true });
    assert_eq!(animation.step(2_000.0), Frame { y: 1000.0, done: true });
}

#[test]
fn upward_scroll_moves_toward_target() {
    let mut animation = ScrollAnimation::new(900.0, 100.0, 600.0);
    animation.step(0.0);
    let frame = animation.step(150.0);
    assert!(frame.y < 900.0 && frame.y > 100.0);
}

#[test]
fn zero_duration_jumps() {
    let mut animation = ScrollAnimation::new(0.0, 400.0, 0.0);
    assert_eq!(animation.step(1.0), Frame { y: 400.0, done: true });
}

#[test]
fn path_follows_native_support() {
    assert_eq!(ScrollPath::detect(true), ScrollPath::Native);
    assert_eq!(ScrollPath::detect(false), ScrollPath::Animated);
}

#[test]
fn first_animation_starts_the_frame_loop() {
    let mut slot = ScrollSlot::new();
    assert!(!slot.is_running());
    assert!(slot.replace(ScrollAnimation::new(0.0, 800.0, 600.0)));
    assert!(slot.is_running());
}

#[test]
fn second_click_replaces_the_running_animation() {
    let mut slot = ScrollSlot::new();
    slot.replace(ScrollAnimation::new(0.0, 800.0, 600.0));
    slot.step(0.0);
    slot.step(200.0);

    // The loop is already running, so no second one is started.
    assert!(!slot.replace(ScrollAnimation::new(300.0, 2_000.0, 600.0)));
    assert_eq!(slot.step(250.0), Some(Frame { y: 300.0, done: false }));
    assert_eq!(slot.step(850.0), Some(Frame { y: 2_000.0, done: true }));
    assert_eq!(slot.step(900.0), None);
}

#[test]
fn finished_slot_needs_a_new_loop() {
    let mut slot = ScrollSlot::new();
    slot.replace(ScrollAnimation::new(0.0, 100.0, 0.0));
    assert_eq!(slot.step(1.0), Some(Frame { y: 100.0, done: true }));
    assert!(!slot.is_running());
    assert!(slot.replace(ScrollAnimation::new(100.0, 0.0, 600.0)));
}

#[test]
fn cancelled_slot_stops_stepping() {
    let mut slot = ScrollSlot::new();
    slot.replace(ScrollAnimation::new(0.0, 100.0, 600.0));
    slot.cancel();
    assert_eq!(slot.step(10.0), None);
}
