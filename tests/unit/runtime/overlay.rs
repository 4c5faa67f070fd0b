use super::*;
use crate::{foundation::core::Point, scene::model::Shape};

fn dot(key: &str) -> Element {
    Element::new(
        key,
        Shape::Circle {
            center: Point::ORIGIN,
            radius: 1.0,
        },
    )
}

#[test]
fn guards_own_their_layers() {
    let overlay = OverlayLayer::new();
    let a = overlay.acquire(dot("a"));
    let b = overlay.acquire(dot("b"));
    assert_eq!(overlay.layer_count(), 2);
    let keys: Vec<_> = overlay.elements().into_iter().map(|e| e.key).collect();
    assert_eq!(keys, ["a", "b"]);
    drop(a);
    assert_eq!(overlay.layer_count(), 1);
    drop(b);
    assert_eq!(overlay.layer_count(), 0);
}

#[test]
fn update_replaces_content() {
    let overlay = OverlayLayer::new();
    let guard = overlay.acquire(dot("a"));
    guard.update(dot("c"));
    assert_eq!(overlay.elements()[0].key, "c");
    assert_eq!(overlay.layer_count(), 1);
}

#[test]
fn guard_may_outlive_the_layer() {
    let guard = {
        let overlay = OverlayLayer::new();
        overlay.acquire(dot("a"))
    };
    guard.update(dot("b"));
    drop(guard);
}
