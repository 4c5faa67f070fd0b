use std::sync::Arc;

use super::*;
use crate::{
    chart::{
        ChartKind,
        map::{TileProvider, UrlTemplateTiles},
    },
    config::VizConfig,
    data::metrics::REGIONS,
};

fn mounted(tiles: Option<Arc<dyn TileProvider>>) -> (SectionContext, EconomySection, f64) {
    let ctx = SectionContext::new(VizConfig::default(), tiles);
    let mut section = EconomySection::new(ctx.clone());
    let height = section.layout(0.0, 1280.0, 800.0, Millis::ZERO);
    (ctx, section, height)
}

fn tiles() -> Option<Arc<dyn TileProvider>> {
    let provider = UrlTemplateTiles::new("https://tiles.test/{z}/{x}/{y}.png").unwrap();
    Some(Arc::new(provider))
}

#[test]
fn top_authorities_are_ranked_and_formatted() {
    let rows = top_authorities(3);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].0, "1. Birmingham");
    assert!(rows[0].1.starts_with('£'));
    assert!(rows[2].0.starts_with("3. "));
}

#[test]
fn charts_render_when_scrolled_into_view() {
    let (_, mut s, height) = mounted(None);
    s.on_scroll(Rect::new(0.0, 0.0, 1280.0, height), Millis::ZERO);
    assert!(s.treemap().is_triggered());
    assert_eq!(
        s.regions().host().count_keyed(ChartKind::Regions.datum_prefix()),
        REGIONS.len()
    );
    assert!(s.map().is_triggered());
}

#[test]
fn map_without_tiles_has_no_markers_or_popups() {
    let (ctx, mut s, height) = mounted(None);
    s.on_scroll(Rect::new(0.0, 0.0, 1280.0, height), Millis::ZERO);
    assert_eq!(s.map().host().count_keyed(ChartKind::Map.datum_prefix()), 0);
    assert!(!s.hover_marker(0));
    assert_eq!(ctx.overlay.layer_count(), 0);
}

#[test]
fn marker_popup_lives_in_the_overlay() {
    let (ctx, mut s, height) = mounted(tiles());
    assert!(!s.hover_marker(0));
    s.on_scroll(Rect::new(0.0, 0.0, 1280.0, height), Millis::ZERO);
    assert!(s.hover_marker(0));
    assert!(s.hover_marker(1));
    assert_eq!(s.hovered(), Some(1));
    assert_eq!(ctx.overlay.layer_count(), 1);

    s.unhover();
    assert_eq!(ctx.overlay.layer_count(), 0);
}

#[test]
fn dropping_the_section_releases_its_popup() {
    let (ctx, mut s, height) = mounted(tiles());
    s.on_scroll(Rect::new(0.0, 0.0, 1280.0, height), Millis::ZERO);
    assert!(s.hover_marker(0));
    drop(s);
    assert_eq!(ctx.overlay.layer_count(), 0);
}
