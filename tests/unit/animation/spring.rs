use super::*;

#[test]
fn converges_to_target_and_rests() {
    let mut s = Spring::default();
    s.set_target(0.6);
    s.step(3000);
    assert!(s.is_at_rest());
    assert_eq!(s.value(), 0.6);
}

#[test]
fn lags_behind_raw_target() {
    let mut s = Spring::default();
    s.set_target(1.0);
    s.step(16);
    assert!(s.value() > 0.0);
    assert!(s.value() < 0.5);
}

#[test]
fn retargeting_mid_flight_settles_on_the_new_target() {
    let mut s = Spring::default();
    s.set_target(1.0);
    s.step(50);
    s.set_target(0.25);
    s.step(3000);
    assert!(s.is_at_rest());
    assert_eq!(s.value(), 0.25);
}
