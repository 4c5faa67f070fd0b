use super::*;
use crate::{
    foundation::core::{Color, Point, Rect, Surface},
    scene::model::{Element, TextStyle},
};

#[test]
fn numbers_are_trimmed() {
    assert_eq!(num(100.0), "100");
    assert_eq!(num(0.5), "0.5");
    assert_eq!(num(-0.001), "0");
    assert_eq!(num(1.236), "1.24");
    assert_eq!(num(f64::NAN), "0");
}

#[test]
fn writes_shapes_paint_and_escaped_text() {
    let mut scene = Scene::new(Surface::new(200.0, 100.0)).with_background(Color::BLACK);
    scene.push(
        Element::new(
            "bar/0",
            Shape::Rect {
                rect: Rect::new(0.0, 10.0, 50.0, 30.0),
                corner_radius: 10.0,
            },
        )
        .paint(Paint::fill(Color::hex(0x10b981)).with_opacity(0.9)),
    );
    scene.push(
        Element::new(
            "label/0",
            Shape::Text {
                at: Point::new(5.0, 5.0),
                content: "Health & <Care>".to_owned(),
                style: TextStyle::sized(12.0).anchor(TextAnchor::End),
            },
        )
        .paint(Paint::fill(Color::WHITE)),
    );

    let svg = to_svg(&scene);
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"width="200" height="100""#));
    assert!(svg.contains(r##"<rect width="200" height="100" fill="#000000"/>"##));
    assert!(svg.contains(r##"data-key="bar/0" x="0" y="10" width="50" height="20" rx="10" fill="#10b981" opacity="0.9""##));
    assert!(svg.contains("Health &amp; &lt;Care&gt;"));
    assert!(svg.contains(r#"text-anchor="end""#));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn groups_emit_matrix_transforms() {
    let mut scene = Scene::new(Surface::new(10.0, 10.0));
    scene.push(Element::group(
        "g",
        Affine::translate((70.0, 30.0)),
        vec![Element::new(
            "dot",
            Shape::Circle {
                center: Point::ORIGIN,
                radius: 2.0,
            },
        )],
    ));
    let svg = to_svg(&scene);
    assert!(svg.contains(r#"transform="matrix(1 0 0 1 70 30)""#));
    assert!(svg.contains("</g>"));
}
