use super::*;

#[test]
fn frame_loop_fires_at_frame_cadence() {
    let s = Scheduler::new();
    let frames = s.frame_loop();
    let ticks = s.advance(Millis(50));
    assert_eq!(ticks.len(), 3);
    assert!(ticks.iter().all(|t| frames.owns(t) && t.kind == TimerKind::Frame));
    assert_eq!(ticks[0].at, Millis(16));
    assert_eq!(ticks[2].at, Millis(48));
    assert_eq!(s.now(), Millis(50));
    // The next frame is relative to the registration, not to the last advance.
    assert_eq!(s.advance(Millis(14))[0].at, Millis(64));
}

#[test]
fn ticks_interleave_in_time_order() {
    let s = Scheduler::new();
    let slow = s.interval(Millis(150));
    let fast = s.frame_loop();
    let ticks = s.advance(Millis(160));
    assert_eq!(ticks.len(), 11);
    let slow_pos = ticks.iter().position(|t| slow.owns(t)).unwrap();
    assert_eq!(ticks[slow_pos].at, Millis(150));
    assert!(ticks[..slow_pos].iter().all(|t| fast.owns(t)));
    for pair in ticks.windows(2) {
        assert!(pair[0].at <= pair[1].at);
    }
}

#[test]
fn dropping_a_handle_unregisters() {
    let s = Scheduler::new();
    let a = s.interval(Millis(100));
    let b = s.frame_loop();
    assert_eq!(s.active_count(), 2);
    let id = a.id();
    drop(a);
    assert!(!s.is_active(id));
    assert_eq!(s.active_count(), 1);
    assert!(s.advance(Millis(200)).iter().all(|t| b.owns(t)));
    drop(b);
    assert_eq!(s.active_count(), 0);
    assert!(s.advance(Millis(1000)).is_empty());
}

#[test]
fn zero_period_is_clamped() {
    let s = Scheduler::new();
    let _h = s.interval(Millis::ZERO);
    assert_eq!(s.advance(Millis(5)).len(), 5);
}

#[test]
fn handles_outliving_the_scheduler_are_harmless() {
    let handle = {
        let s = Scheduler::new();
        s.frame_loop()
    };
    drop(handle);
}
