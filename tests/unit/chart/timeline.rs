use kurbo::ParamCurve;

use super::*;

fn chart(year: u16, draw_on: bool) -> TimelineChart {
    TimelineChart::new(year, draw_on, TimelineOptions::default(), Theme::default())
}

fn sampled_ys(path: &BezPath) -> Vec<f64> {
    let mut ys = Vec::new();
    for seg in path.segments() {
        for step in 0..=10 {
            ys.push(seg.eval(f64::from(step) / 10.0).y);
        }
    }
    ys
}

#[test]
fn monotone_curve_never_overshoots() {
    let pts = [
        Point::new(0.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(2.0, 1.0),
        Point::new(3.0, 5.0),
    ];
    let path = monotone_x(&pts);
    let ys = sampled_ys(&path);
    for pair in ys.windows(2) {
        assert!(pair[1] >= pair[0] - 1e-12, "{pair:?}");
    }
    let flat = path.segments().nth(1).unwrap();
    for step in 0..=10 {
        assert!((flat.eval(f64::from(step) / 10.0).y - 1.0).abs() < 1e-12);
    }
}

#[test]
fn curve_passes_through_every_point() {
    let pts = [
        Point::new(0.0, 10.0),
        Point::new(50.0, 4.0),
        Point::new(100.0, 6.0),
        Point::new(150.0, 0.0),
    ];
    let path = monotone_x(&pts);
    let segs: Vec<_> = path.segments().collect();
    assert_eq!(segs.len(), 3);
    for (i, seg) in segs.iter().enumerate() {
        assert_eq!(seg.eval(0.0), pts[i]);
        assert_eq!(seg.eval(1.0), pts[i + 1]);
        let mid = seg.eval(0.5);
        assert!(mid.x > pts[i].x && mid.x < pts[i + 1].x);
    }
}

#[test]
fn short_inputs_degrade_gracefully() {
    assert_eq!(monotone_x(&[]).elements().len(), 0);
    assert_eq!(monotone_x(&[Point::new(1.0, 1.0)]).elements().len(), 1);
    assert_eq!(monotone_x(&[Point::ORIGIN, Point::new(1.0, 2.0)]).segments().count(), 1);
}

#[test]
fn five_series_with_grid_and_legend() {
    let scene = chart(YEAR_MIN, true).build(Surface::new(900.0, 400.0));
    assert_eq!(scene.count_keyed("line-"), 5);
    assert_eq!(scene.count_keyed("grid-"), 8);
    assert_eq!(scene.count_keyed("legend-label-"), 5);
    assert_eq!(scene.count_keyed("x-label-"), 6);
    let Shape::Text { content, .. } = &scene.find("y-label-14000").unwrap().shape else {
        panic!("tick label is text");
    };
    assert_eq!(content, "£14B");
}

#[test]
fn first_render_draws_lines_on() {
    let scene = chart(YEAR_MIN, true).build(Surface::new(900.0, 400.0));
    let start = scene.sample(Millis::ZERO);
    let line = start.find("line-0").unwrap();
    let dash = line.paint.dash.as_ref().unwrap();
    assert!((line.paint.dash_offset - dash[0]).abs() < 1e-9);
    assert_eq!(scene.settle_time(), Millis(4 * 200 + 2000));
    assert!(scene.settled().find("line-4").unwrap().paint.dash.is_none());
}

#[test]
fn rerenders_draw_without_animation() {
    let scene = chart(2030, false).build(Surface::new(900.0, 400.0));
    assert_eq!(scene.settle_time(), Millis::ZERO);
    assert!(scene.sample(Millis::ZERO).find("line-0").unwrap().paint.dash.is_none());
}

#[test]
fn indicator_only_after_the_first_year() {
    let at_start = chart(YEAR_MIN, false).build(Surface::new(900.0, 400.0));
    assert!(at_start.find("indicator").is_none());
    assert!(chart(YEAR_MIN, false).readout().is_none());

    let later = chart(2037, false);
    assert_eq!(later.readout().as_deref(), Some("£8.4B"));
    let scene = later.build(Surface::new(900.0, 400.0));
    let indicator = scene.find("indicator").unwrap();
    assert_eq!(indicator.paint.dash.as_deref(), Some(&[5.0, 5.0][..]));
    assert!(scene.find("readout").is_some());
}

#[test]
fn year_is_clamped_to_the_domain() {
    assert_eq!(chart(1990, false).year(), YEAR_MIN);
    assert_eq!(chart(2100, false).year(), YEAR_MAX);
}

#[test]
fn narrow_surface_is_a_no_op() {
    assert!(chart(2030, true).build(Surface::new(150.0, 400.0)).is_empty());
}
