use super::*;
use crate::{
    foundation::core::{Color, Rect, Surface},
    scene::model::{Element, Paint, Shape},
};

#[test]
fn unpremultiply_restores_straight_alpha() {
    let mut px = vec![64, 0, 128, 128, 10, 20, 30, 255, 0, 0, 0, 0];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[0..4], &[128, 0, 255, 128]);
    assert_eq!(&px[4..8], &[10, 20, 30, 255]);
    assert_eq!(&px[8..12], &[0, 0, 0, 0]);
}

#[test]
fn rasterizes_solid_rect() {
    let mut scene = Scene::new(Surface::new(8.0, 4.0)).with_background(Color::BLACK);
    scene.push(
        Element::new(
            "r",
            Shape::Rect {
                rect: Rect::new(0.0, 0.0, 4.0, 4.0),
                corner_radius: 0.0,
            },
        )
        .paint(Paint::fill(Color::hex(0xff0000))),
    );
    let frame = Rasterizer::new(None).rasterize(&scene).unwrap();
    assert_eq!((frame.width, frame.height), (8, 4));
    assert_eq!(&frame.rgba8[0..4], &[255, 0, 0, 255]);
    let right = ((8 * 2) + 7) * 4;
    assert_eq!(&frame.rgba8[right..right + 4], &[0, 0, 0, 255]);

    let png = frame.encode_png().unwrap();
    assert_eq!(&png[1..4], b"PNG");
}

#[test]
fn zero_surface_is_rejected() {
    let scene = Scene::new(Surface::new(0.0, 4.0));
    assert!(Rasterizer::new(None).rasterize(&scene).is_err());
}
