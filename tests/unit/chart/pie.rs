use super::*;
use crate::data::metrics::{BENEFITS, total_positive_benefits};

fn chart() -> PieChart {
    PieChart::benefits(
        BENEFITS,
        total_positive_benefits(),
        PieOptions::default(),
        Theme::default(),
    )
}

#[test]
fn extents_cover_the_full_circle_in_input_order() {
    let slices = pie_layout(&[3.0, 1.0, 0.0, 4.0]);
    assert_eq!(slices.len(), 4);
    assert_eq!(slices[0].start_angle, 0.0);
    let total: f64 = slices.iter().map(|s| s.end_angle - s.start_angle).sum();
    assert!((total - TAU).abs() < 1e-12);
    assert_eq!(slices[2].start_angle, slices[2].end_angle);
    for pair in slices.windows(2) {
        assert_eq!(pair[0].end_angle, pair[1].start_angle);
    }
    assert!((slices[3].end_angle - TAU).abs() < 1e-12);
}

#[test]
fn all_zero_values_give_empty_slices() {
    let slices = pie_layout(&[0.0, -2.0]);
    assert!(slices.iter().all(|s| s.start_angle == 0.0 && s.end_angle == 0.0));
}

#[test]
fn one_arc_per_datum_with_donut_hole() {
    let scene = chart().build(Surface::new(600.0, 300.0));
    assert_eq!(scene.surface, Surface::new(300.0, 300.0));
    assert_eq!(scene.count_keyed("arc-"), BENEFITS.len());
    let Shape::Arc(arc) = &scene.find("arc-0").unwrap().shape else {
        panic!("arc-0 is an arc");
    };
    assert_eq!(arc.outer_radius, 140.0);
    assert!((arc.inner_radius - 77.0).abs() < 1e-9);
    let sweep: f64 = chart().slices().iter().map(|s| s.end_angle - s.start_angle).sum();
    assert!((sweep - TAU).abs() < 1e-9);
}

#[test]
fn arcs_sweep_open_from_zero() {
    let scene = chart().build(Surface::new(300.0, 300.0));
    let first = scene.sample(Millis::ZERO);
    let Shape::Arc(arc) = &first.find("arc-2").unwrap().shape else {
        panic!("arc-2 is an arc");
    };
    assert_eq!(arc.start_angle, 0.0);
    assert_eq!(arc.end_angle, 0.0);
    assert_eq!(first.find("arc-2").unwrap().paint.opacity, 0.0);
    assert_eq!(scene.settle_time(), Millis(6 * 80 + 1000));
}

#[test]
fn center_label_shows_total() {
    let scene = chart().build(Surface::new(300.0, 300.0));
    let Shape::Text { content, .. } = &scene.find("center-value").unwrap().shape else {
        panic!("center-value is text");
    };
    assert_eq!(content, "£226.8B");
}

#[test]
fn tiny_surface_is_a_no_op() {
    assert!(chart().build(Surface::new(15.0, 300.0)).is_empty());
}
