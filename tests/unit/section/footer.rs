use super::*;
use crate::{
    chart::ChartKind,
    config::VizConfig,
    data::metrics::CUMULATIVE,
    foundation::core::Surface,
    scene::model::Scene,
};

fn mounted(width: f64) -> (FooterSection, f64) {
    let mut s = FooterSection::new(SectionContext::new(VizConfig::default(), None));
    let height = s.layout(2000.0, width, 800.0, Millis::ZERO);
    (s, height)
}

fn scene_at(s: &FooterSection, now: Millis) -> Scene {
    let mut scene = Scene::new(Surface::new(1280.0, 4000.0));
    scene.extend(s.elements(now));
    scene
}

#[test]
fn chart_triggers_fifty_pixels_inside_the_viewport() {
    let (mut s, _) = mounted(1280.0);
    let frame = s.chart().frame();
    assert_eq!(frame.height(), 180.0);

    let ending_at = |bottom: f64| Rect::new(0.0, bottom - 800.0, 1280.0, bottom);
    s.on_scroll(ending_at(frame.y0 + 40.0), Millis(10));
    assert!(!s.chart().is_triggered());

    s.on_scroll(ending_at(frame.y0 + 60.0), Millis(20));
    assert!(s.chart().is_triggered());
    assert_eq!(s.chart().host().started_at(), Millis(20));
    assert_eq!(
        s.chart().host().count_keyed(ChartKind::Cumulative.datum_prefix()),
        CUMULATIVE.len()
    );
}

#[test]
fn chart_is_absent_until_triggered() {
    let (mut s, height) = mounted(1280.0);
    assert!(scene_at(&s, Millis::ZERO).find("footer-chart").is_none());

    s.on_scroll(Rect::new(0.0, 2000.0, 1280.0, 2000.0 + height), Millis(100));
    let scene = scene_at(&s, Millis(100));
    assert!(scene.find("footer-chart").is_some());
    assert_eq!(s.reveal().revealed_at(), Some(Millis(100)));
    let Some(Shape::Circle { radius, .. }) = scene.find("circle-0").map(|e| &e.shape) else {
        panic!("first year is a circle");
    };
    assert_eq!(*radius, 0.0);
}

#[test]
fn heading_scales_down_on_narrow_pages() {
    let size = |width: f64| {
        let (s, _) = mounted(width);
        match scene_at(&s, Millis::ZERO).find("footer-title").map(|e| e.shape.clone()) {
            Some(Shape::Text { style, .. }) => style.size,
            other => panic!("title is text: {other:?}"),
        }
    };
    assert_eq!(size(1280.0), 72.0);
    assert_eq!(size(375.0), 48.0);
}

#[test]
fn chart_stays_inside_the_content_column() {
    let (s, height) = mounted(1280.0);
    let frame = s.chart().frame();
    assert_eq!(frame.width(), MAX_WIDTH - 2.0 * PADDING_X);
    assert!((frame.center().x - 640.0).abs() < 1e-9);
    assert!(frame.y1 < 2000.0 + height);
    assert_eq!(s.height(), height);
}

#[test]
fn notes_quote_the_dataset_coverage() {
    let [source, coverage] = FooterSection::source_notes();
    assert!(source.ends_with("2025-2050"), "{source}");
    assert_eq!(coverage, "46,426 small areas analyzed • 67.6M population covered");
    let s = FooterSection::new(SectionContext::new(VizConfig::default(), None));
    assert_eq!(s.anchor(), "footer");
    assert_eq!(s.copy().highlight, "We Create Together");
}
