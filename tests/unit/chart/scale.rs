use super::*;

#[test]
fn linear_maps_endpoints_and_inverts_y() {
    let y = LinearScale::new((0.0, 14_000.0), (320.0, 0.0));
    assert_eq!(y.map(0.0), 320.0);
    assert_eq!(y.map(14_000.0), 0.0);
    assert_eq!(y.map(7_000.0), 160.0);
}

#[test]
fn degenerate_domain_maps_to_range_midpoint() {
    let s = LinearScale::new((5.0, 5.0), (0.0, 100.0));
    assert_eq!(s.map(5.0), 50.0);
}

#[test]
fn ticks_pick_round_steps() {
    let x = LinearScale::new((2025.0, 2050.0), (0.0, 600.0));
    assert_eq!(x.ticks(6), vec![2025.0, 2030.0, 2035.0, 2040.0, 2045.0, 2050.0]);

    let y = LinearScale::new((0.0, 14_000.0), (320.0, 0.0));
    let ticks = y.ticks(7);
    assert_eq!(ticks.first(), Some(&0.0));
    assert_eq!(ticks.last(), Some(&14_000.0));
    assert_eq!(ticks.len(), 8);
}

#[test]
fn band_layout_matches_padding_rules() {
    let b = BandScale::new(7, (0.0, 340.0), 0.35);
    let step = 340.0 / (7.0 + 0.35);
    assert!((b.step() - step).abs() < 1e-9);
    assert!((b.bandwidth() - step * 0.65).abs() < 1e-9);
    // Outer padding mirrors on both ends.
    let lead = b.position(0);
    let trail = 340.0 - (b.position(6) + b.bandwidth());
    assert!((lead - trail).abs() < 1e-9);
    assert!(b.position(1) > b.position(0) + b.bandwidth());
}

#[test]
fn sqrt_scale_is_area_proportional() {
    let s = SqrtScale::new(1000.0, 8.0);
    assert_eq!(s.map(1000.0), 8.0);
    assert!((s.map(4000.0) - 16.0).abs() < 1e-12);
    assert_eq!(s.map(-1.0), 0.0);
}

#[test]
fn sqrt_scale_floor_offsets_the_range() {
    let s = SqrtScale::new(400.0, 50.0).with_floor(15.0);
    assert_eq!(s.map(0.0), 15.0);
    assert_eq!(s.map(400.0), 50.0);
    assert!((s.map(100.0) - 32.5).abs() < 1e-12);
}

#[test]
fn sqrt_scale_floor_defaults_to_zero_in_config() {
    let s: SqrtScale = serde_json::from_str(r#"{"domain_max":10.0,"range_max":4.0}"#).unwrap();
    assert_eq!(s, SqrtScale::new(10.0, 4.0));
}
