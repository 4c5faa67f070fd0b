use std::path::PathBuf;

use super::*;

#[test]
fn empty_object_is_the_default() {
    let config = VizConfig::from_json_str("{}").unwrap();
    assert_eq!(config, VizConfig::default());
    assert_eq!(config.root_margin, -100.0);
    assert_eq!(config.regions.padding, 0.4);
}

#[test]
fn partial_objects_keep_other_defaults() {
    let config = VizConfig::from_json_str(
        r##"{"viewport": {"width": 800, "height": 600}, "bar": {"padding": 0.5},
            "theme": {"accent": "#ff0000"}}"##,
    )
    .unwrap();
    assert_eq!(config.viewport, Surface::new(800.0, 600.0));
    assert_eq!(config.bar.padding, 0.5);
    assert_eq!(config.bar.plot_height, 340.0);
    assert_eq!(config.theme.accent, crate::foundation::core::Color::hex(0xff0000));
    assert_eq!(config.theme.text, Theme::default().text);
}

#[test]
fn partial_regions_keep_the_regions_defaults() {
    let config = VizConfig::from_json_str(r#"{"regions": {}}"#).unwrap();
    assert_eq!(config.regions, BarOptions::regions());
    assert_ne!(config.regions, BarOptions::default());

    let config = VizConfig::from_json_str(r#"{"regions": {"padding": 0.2}}"#).unwrap();
    assert_eq!(config.regions.padding, 0.2);
    assert_eq!(config.regions.plot_height, BarOptions::regions().plot_height);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = VizConfig::from_json_str("{ nope").unwrap_err();
    assert!(matches!(err, VizError::Serde(_)), "{err}");
}

#[test]
fn out_of_range_values_are_rejected() {
    for json in [
        r#"{"viewport": {"width": 0, "height": 600}}"#,
        r#"{"bar": {"padding": 1.5}}"#,
        r#"{"pie": {"inner_ratio": -0.1}}"#,
        r#"{"treemap": {"padding": -1}}"#,
        r#"{"frames": {"fps": 0}}"#,
        r#"{"cumulative": {"min_radius": 60}}"#,
        r#"{"cumulative": {"padding": 2}}"#,
        r#"{"frames": {"threads": 0}}"#,
        r#"{"map": {"tiles": "https://tiles.test/{z}.png"}}"#,
        r#"{"timeline": {"margin": {"top": -1, "right": 0, "bottom": 0, "left": 0}}}"#,
    ] {
        let err = VizConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, VizError::Validation(_)), "{json}: {err}");
    }
}

#[test]
fn round_trips_through_json() {
    let config = VizConfig::default();
    let json = config.to_json_pretty().unwrap();
    assert_eq!(VizConfig::from_json_str(&json).unwrap(), config);
}

#[test]
fn loads_from_a_file() {
    let dir = PathBuf::from("target").join("config_tests");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("viz.json");
    std::fs::write(&path, r#"{"particles": {"count": 12}}"#).unwrap();
    let config = VizConfig::from_json_path(&path).unwrap();
    assert_eq!(config.particles.count, 12);

    let missing = VizConfig::from_json_path(&dir.join("missing.json")).unwrap_err();
    assert!(matches!(missing, VizError::Other(_)));
}

#[test]
fn builds_every_chart_kind() {
    let config = VizConfig::default();
    for kind in ChartKind::ALL {
        assert_eq!(config.chart(kind, 2030, None).kind(), kind);
    }
    let map = config.chart(ChartKind::Map, 2030, None);
    assert!(map.build(Surface::new(800.0, 500.0)).is_empty());
}
