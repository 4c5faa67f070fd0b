use super::*;
use crate::data::metrics::TOP_AUTHORITIES;

fn tiles() -> Arc<dyn TileProvider> {
    Arc::new(UrlTemplateTiles::new("https://tiles.test/{z}/{x}/{y}.png").unwrap())
}

fn chart(tiles: Option<Arc<dyn TileProvider>>) -> MapChart {
    MapChart::authorities(TOP_AUTHORITIES, tiles, MapOptions::default(), Theme::default())
}

#[test]
fn without_tiles_the_map_is_a_no_op() {
    let map = chart(None);
    assert!(!map.has_tiles());
    assert!(map.build(Surface::new(800.0, 500.0)).is_empty());
    // Popups are pure data and still work.
    assert!(map.popup(0).is_some());
}

#[test]
fn template_requires_all_placeholders() {
    assert!(UrlTemplateTiles::new("https://tiles.test/{z}/{x}.png").is_err());
    let t = UrlTemplateTiles::new("https://tiles.test/{z}/{x}/{y}.png").unwrap();
    assert_eq!(t.tile_url(5, 15, 10), "https://tiles.test/5/15/10.png");
    assert!(t.attribution().is_none());
    let t = t.with_attribution("© contributors");
    assert_eq!(t.attribution(), Some("© contributors"));
}

#[test]
fn mercator_origin_is_world_center() {
    let p = project(0.0, 0.0, 0);
    assert!((p.x - 128.0).abs() < 1e-9);
    assert!((p.y - 128.0).abs() < 1e-9);
    let z1 = project(0.0, 0.0, 1);
    assert!((z1.x - 256.0).abs() < 1e-9);
}

#[test]
fn fitted_viewport_contains_the_bounds() {
    let size = Surface::new(800.0, 500.0);
    let view = Viewport::fit(UK_BOUNDS, size, 20.0, 18);
    assert_eq!(view.zoom, 5);
    let nw = view.locate(UK_BOUNDS.north, UK_BOUNDS.west);
    let se = view.locate(UK_BOUNDS.south, UK_BOUNDS.east);
    assert!(nw.x >= 20.0 && nw.y >= 20.0, "{nw:?}");
    assert!(se.x <= 780.0 && se.y <= 480.0, "{se:?}");
    let mid = nw.midpoint(se);
    assert!((mid.x - 400.0).abs() < 1e-9 && (mid.y - 250.0).abs() < 1e-9);
}

#[test]
fn tile_layer_covers_the_viewport() {
    let view = Viewport::fit(UK_BOUNDS, Surface::new(800.0, 500.0), 20.0, 18);
    let tiles = view.tiles();
    assert!(!tiles.is_empty());
    let covered: f64 = tiles
        .iter()
        .map(|(_, _, r)| r.intersect(Rect::new(0.0, 0.0, 800.0, 500.0)).area())
        .sum();
    assert!((covered - 800.0 * 500.0).abs() < 1e-6);
}

#[test]
fn one_marker_per_authority_inside_the_map() {
    let map = chart(Some(tiles()));
    let scene = map.build(Surface::new(800.0, 500.0));
    assert_eq!(scene.count_keyed("marker-"), TOP_AUTHORITIES.len());
    assert!(scene.count_keyed("tile-") > 0);
    for i in 0..TOP_AUTHORITIES.len() {
        let p = map.marker_position(i, 800.0).unwrap();
        assert!(p.x > 0.0 && p.x < 800.0 && p.y > 0.0 && p.y < 500.0, "{p:?}");
    }
    let Shape::Circle { radius, .. } = scene.settled().find("marker-0").unwrap().shape else {
        panic!("marker is a circle");
    };
    assert!((radius - 24.0).abs() < 1e-9);
}

#[test]
fn popup_reports_share_and_per_capita() {
    let popup = chart(None).popup(0).unwrap();
    assert_eq!(popup.title, "Birmingham");
    assert_eq!(popup.value, "£2.3B");
    assert_eq!(popup.share, "16.5%");
    assert_eq!(popup.per_capita, "£2,021");
    assert!(chart(None).popup(99).is_none());
}

#[test]
fn options_build_a_provider_only_with_a_template() {
    assert!(MapOptions::default().tile_provider().unwrap().is_none());
    let opts = MapOptions {
        tiles: Some("https://tiles.test/{z}/{x}/{y}.png".to_owned()),
        attribution: Some("test".to_owned()),
        ..MapOptions::default()
    };
    let provider = opts.tile_provider().unwrap().unwrap();
    assert_eq!(provider.attribution(), Some("test"));
    let bad = MapOptions {
        tiles: Some("https://tiles.test/".to_owned()),
        ..MapOptions::default()
    };
    assert!(bad.tile_provider().is_err());
}

#[test]
fn zero_width_surface_draws_nothing() {
    assert!(chart(Some(tiles())).build(Surface::new(0.0, 500.0)).is_empty());
}
