use super::*;

fn viewport(scroll: f64) -> Rect {
    Rect::new(0.0, scroll, 1280.0, scroll + 800.0)
}

#[test]
fn margin_delays_visibility() {
    let mut obs = VisibilityObserver::default();
    let target = Rect::new(0.0, 750.0, 1280.0, 1100.0);
    // Top edge is only 50 px into the viewport; the margin needs 100.
    assert!(!obs.observe(target, viewport(0.0)));
    assert!(obs.observe(target, viewport(60.0)));
}

#[test]
fn fires_only_once() {
    let mut obs = VisibilityObserver::default();
    let target = Rect::new(0.0, 200.0, 1280.0, 400.0);
    assert!(obs.observe(target, viewport(0.0)));
    assert!(!obs.observe(target, viewport(5000.0)));
    assert!(!obs.observe(target, viewport(0.0)));
    assert!(obs.has_fired());
}

#[test]
fn tiny_viewports_see_nothing() {
    let obs = VisibilityObserver::default();
    let target = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert!(!obs.intersects(target, Rect::new(0.0, 0.0, 150.0, 150.0)));
    assert!(VisibilityObserver::new(0.0).intersects(target, Rect::new(0.0, 0.0, 150.0, 150.0)));
}
