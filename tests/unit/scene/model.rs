use super::*;
use crate::animation::ease::Ease;

fn linear(delay: u64, duration: u64) -> Timing {
    Timing::new(Millis(delay), Millis(duration), Ease::Linear)
}

#[test]
fn grow_width_anchors_left_edge() {
    let e = Element::new(
        "bar/0",
        Shape::Rect {
            rect: Rect::new(10.0, 0.0, 110.0, 20.0),
            corner_radius: 10.0,
        },
    )
    .enter(Effect::GrowWidth, linear(0, 100));

    match e.sample(Millis(50)).shape {
        Shape::Rect {
            rect,
            corner_radius,
        } => {
            assert_eq!(rect.x0, 10.0);
            assert_eq!(rect.x1, 60.0);
            assert_eq!(corner_radius, 10.0);
        }
        other => panic!("unexpected shape {other:?}"),
    }
    match e.sample(Millis(0)).shape {
        Shape::Rect { rect, .. } => assert_eq!(rect.width(), 0.0),
        other => panic!("unexpected shape {other:?}"),
    }
}

#[test]
fn fade_and_sweep_compose_on_one_element() {
    let arc = ArcSpec {
        center: Point::new(0.0, 0.0),
        inner_radius: 50.0,
        outer_radius: 100.0,
        start_angle: 1.0,
        end_angle: 2.0,
    };
    let e = Element::new("arc/0", Shape::Arc(arc))
        .enter(Effect::Sweep, linear(0, 100))
        .enter(Effect::Fade { from: 0.0 }, linear(0, 100));

    let mid = e.sample(Millis(50));
    assert!((mid.paint.opacity - 0.5).abs() < 1e-12);
    match mid.shape {
        Shape::Arc(a) => {
            assert!((a.start_angle - 0.5).abs() < 1e-12);
            assert!((a.end_angle - 1.0).abs() < 1e-12);
        }
        other => panic!("unexpected shape {other:?}"),
    }
    assert!(mid.entrances.is_empty());
}

#[test]
fn draw_on_sets_dash_until_complete() {
    let mut path = BezPath::new();
    path.move_to((0.0, 0.0));
    path.line_to((100.0, 0.0));
    let e = Element::new("line/0", Shape::Path(path))
        .paint(Paint::stroke(Color::WHITE, 2.0))
        .enter(Effect::DrawOn, linear(0, 1000));

    let start = e.sample(Millis(0));
    let dash = start.paint.dash.clone().unwrap();
    assert!((dash[0] - 100.0).abs() < 1e-6);
    assert!((start.paint.dash_offset - 100.0).abs() < 1e-6);

    let end = e.sample(Millis(1000));
    assert!(end.paint.dash.is_none());
}

#[test]
fn settle_time_covers_nested_children() {
    let child = Element::new(
        "dot",
        Shape::Circle {
            center: Point::ORIGIN,
            radius: 4.0,
        },
    )
    .enter(Effect::GrowRadius, linear(300, 700));
    let mut scene = Scene::new(Surface::new(10.0, 10.0));
    scene.push(Element::group("g", Affine::IDENTITY, vec![child]));
    assert_eq!(scene.settle_time(), Millis(1000));
    assert_eq!(scene.count_keyed("dot"), 1);
    assert!(scene.find("dot").is_some());
}

#[test]
fn arc_path_is_closed_and_empty_when_degenerate() {
    let mut arc = ArcSpec {
        center: Point::new(150.0, 150.0),
        inner_radius: 70.0,
        outer_radius: 140.0,
        start_angle: 0.0,
        end_angle: std::f64::consts::FRAC_PI_2,
    };
    let path = arc.to_path();
    assert!(path.elements().len() > 3);
    let first = path.elements()[0];
    assert_eq!(first, kurbo::PathEl::MoveTo(Point::new(150.0, 10.0)));

    arc.end_angle = 0.0;
    assert!(arc.to_path().elements().is_empty());
}
