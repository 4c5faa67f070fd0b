use super::*;
use crate::data::metrics::ECONOMIC_BREAKDOWN;

fn chart() -> TreemapChart {
    TreemapChart::from_records(ECONOMIC_BREAKDOWN, TreemapOptions::default(), Theme::default())
}

fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

#[test]
fn leaves_fit_inside_the_surface_without_overlap() {
    let surface = Surface::new(900.0, 400.0);
    let cells = chart().cells(surface);
    assert_eq!(cells.len(), ECONOMIC_BREAKDOWN.len());

    let leaf_area: f64 = cells.iter().map(|c| c.area()).sum();
    assert!(leaf_area < surface.area());
    for (i, a) in cells.iter().enumerate() {
        assert!(a.x0 >= 6.0 && a.y0 >= 6.0, "{a:?}");
        assert!(a.x1 <= 894.0 && a.y1 <= 394.0, "{a:?}");
        for b in &cells[i + 1..] {
            assert!(!overlaps(a, b), "{a:?} overlaps {b:?}");
        }
    }
}

#[test]
fn rounding_snaps_to_whole_pixels() {
    let cells = squarify(&[5.0, 3.0, 2.0], Rect::new(0.0, 0.0, 333.0, 211.0), 6.0, true);
    for c in cells {
        for v in [c.x0, c.y0, c.x1, c.y1] {
            assert_eq!(v, v.round());
        }
    }
}

#[test]
fn areas_follow_values() {
    let cells = squarify(&[6.0, 3.0, 1.0], Rect::new(0.0, 0.0, 600.0, 400.0), 0.0, false);
    let total = 600.0 * 400.0;
    assert!((cells[0].area() / total - 0.6).abs() < 1e-9);
    assert!((cells[1].area() / total - 0.3).abs() < 1e-9);
    assert!((cells[2].area() / total - 0.1).abs() < 1e-9);
}

#[test]
fn equal_values_get_equal_areas() {
    let cells = squarify(&[1.0; 4], Rect::new(0.0, 0.0, 400.0, 400.0), 0.0, false);
    for c in &cells {
        assert!((c.area() - 40_000.0).abs() < 1e-6, "{c:?}");
    }
}

#[test]
fn wide_layout_shows_descriptions() {
    let scene = chart().build(Surface::new(1000.0, 400.0));
    assert_eq!(scene.count_keyed("tile-"), 4);
    assert_eq!(scene.count_keyed("desc-"), 4);
    let tile = scene.settled();
    assert_eq!(tile.find("tile-0").unwrap().paint.opacity, 0.9);
    assert_eq!(scene.sample(Millis::ZERO).find("tile-0").unwrap().paint.opacity, 0.0);
}

#[test]
fn compact_layout_drops_descriptions_and_truncates_names() {
    let scene = chart().build(Surface::new(500.0, 400.0));
    assert_eq!(scene.count_keyed("tile-"), 4);
    assert_eq!(scene.count_keyed("desc-"), 0);
    let cells = chart().cells(Surface::new(500.0, 400.0));
    for (i, cell) in cells.iter().enumerate() {
        let Shape::Text { content, .. } = &scene.find(&format!("name-{i}")).unwrap().shape else {
            panic!("name is text");
        };
        let fits = ((cell.width() - 32.0).max(0.0) / 8.4).floor() as usize;
        assert!(content.chars().count() <= fits, "{content} in {cell:?}");
    }
}

#[test]
fn truncation_adds_ellipsis() {
    assert_eq!(truncate_to_width("Health Benefits", 40.0, 14.0), "Hea…");
    assert_eq!(truncate_to_width("NHS", 200.0, 14.0), "NHS");
    assert_eq!(truncate_to_width("NHS", -5.0, 14.0), "");
}

#[test]
fn empty_input_draws_nothing() {
    let chart = TreemapChart::new(Vec::new(), TreemapOptions::default(), Theme::default());
    assert!(chart.build(Surface::new(800.0, 400.0)).is_empty());
    assert!(squarify(&[], Rect::new(0.0, 0.0, 10.0, 10.0), 0.0, true).is_empty());
}

#[test]
fn zero_width_surface_draws_nothing() {
    assert!(chart().build(Surface::new(0.0, 400.0)).is_empty());
}
