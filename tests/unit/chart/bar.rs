use super::*;
use crate::data::metrics::{BENEFITS, REGIONS};

fn benefits() -> BarChart {
    BarChart::benefits(BENEFITS, BarOptions::benefits(), Theme::default())
}

#[test]
fn one_bar_label_and_value_per_datum() {
    let scene = benefits().build(Surface::new(900.0, 380.0));
    assert_eq!(scene.count_keyed("bar-"), BENEFITS.len());
    assert_eq!(scene.count_keyed("label-"), BENEFITS.len());
    assert_eq!(scene.count_keyed("value-"), BENEFITS.len());
}

#[test]
fn width_is_capped_and_longest_bar_fills_plot() {
    let chart = benefits();
    let layout = chart.layout(Surface::new(1200.0, 380.0)).unwrap();
    assert_eq!(layout.width, 700.0);
    assert_eq!(layout.height, 380.0);
    // Physical Activity is the maximum and spans the whole plot width.
    assert!((layout.bars[0].x1 - (700.0 - 100.0)).abs() < 1e-9);
    assert!(layout.bars.iter().all(|r| r.x0 == 140.0));
}

#[test]
fn bars_start_collapsed_and_grow_in_order() {
    let scene = benefits().build(Surface::new(700.0, 380.0));
    let at = |t: u64, key: &str| match &scene.sample(Millis(t)).find(key).unwrap().shape {
        Shape::Rect { rect, .. } => rect.width(),
        other => panic!("unexpected shape {other:?}"),
    };
    assert_eq!(at(0, "bar-0"), 0.0);
    assert!(at(500, "bar-0") > at(500, "bar-3"));
    let full = scene.settled();
    let Shape::Rect { rect, corner_radius } = &full.find("bar-0").unwrap().shape else {
        panic!("bar is a rect");
    };
    assert!((rect.width() - 460.0).abs() < 1e-9);
    assert!((corner_radius - rect.height() / 2.0).abs() < 1e-9);
}

#[test]
fn values_fade_in_after_bars() {
    let scene = benefits().build(Surface::new(700.0, 380.0));
    let opacity = |t: u64| scene.sample(Millis(t)).find("value-2").unwrap().paint.opacity;
    assert_eq!(opacity(1100), 0.0);
    assert_eq!(opacity(1200 + 250), 1.0);
    assert_eq!(scene.settle_time(), Millis(1000 + 6 * 100 + 250));
}

#[test]
fn tooltip_reports_value_share_and_description() {
    let tip = benefits().tooltip(0).unwrap();
    assert_eq!(tip.title, "Physical Activity");
    assert_eq!(tip.value, "£129.9B");
    assert_eq!(tip.share, "57.3%");
    assert_eq!(
        tip.description.as_deref(),
        Some("Health benefits from increased walking and cycling")
    );
    assert!(benefits().tooltip(BENEFITS.len()).is_none());
}

#[test]
fn regions_use_their_own_padding_and_stagger() {
    let chart = BarChart::regions(REGIONS, BarOptions::regions(), Theme::default());
    assert_eq!(chart.kind(), ChartKind::Regions);
    assert_eq!(chart.preferred_height(500.0), 190.0);
    let scene = chart.build(Surface::new(500.0, 190.0));
    assert_eq!(scene.count_keyed("bar-"), 3);
    let bar2 = &scene.find("bar-2").unwrap().entrances[0];
    assert_eq!(bar2.timing.delay, Millis(300));
    assert!(chart.tooltip(1).unwrap().description.is_none());
}

#[test]
fn empty_data_and_narrow_containers_draw_nothing() {
    let empty = BarChart::new(ChartKind::Bar, Vec::new(), BarOptions::default(), Theme::default());
    assert!(empty.build(Surface::new(700.0, 380.0)).is_empty());
    assert!(benefits().build(Surface::new(200.0, 380.0)).is_empty());
}

#[test]
fn tooltip_element_stacks_lines() {
    let tip = benefits().tooltip(1).unwrap();
    let el = tip.to_element("tooltip", Point::new(100.0, 50.0), &Theme::default());
    let mut texts = 0;
    el.walk(&mut |e| {
        if matches!(e.shape, Shape::Text { .. }) {
            texts += 1;
        }
    });
    assert_eq!(texts, 3);
}
