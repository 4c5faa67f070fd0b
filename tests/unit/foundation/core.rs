use super::*;

#[test]
fn surface_drawable_requires_positive_sides() {
    assert!(Surface::new(640.0, 380.0).is_drawable());
    assert!(!Surface::new(0.0, 380.0).is_drawable());
    assert!(!Surface::new(640.0, 0.0).is_drawable());
    assert!(!Surface::new(f64::NAN, 10.0).is_drawable());
}

#[test]
fn color_hex_literal_and_parse_agree() {
    let c = Color::parse("#10B981").unwrap();
    assert_eq!(c, Color::hex(0x10b981));
    assert_eq!(c.to_string(), "#10b981");

    let c = Color::parse("10b98180").unwrap();
    assert_eq!(c.a, 0x80);
    assert_eq!(c.to_string(), "#10b98180");
}

#[test]
fn color_rejects_bad_lengths() {
    assert!(Color::parse("#fff").is_err());
    assert!(Color::parse("#zzzzzz").is_err());
}

#[test]
fn color_serde_uses_hex_strings() {
    let c: Color = serde_json::from_str("\"#3b82f6\"").unwrap();
    assert_eq!(c, Color::hex(0x3b82f6));
    assert_eq!(serde_json::to_string(&c).unwrap(), "\"#3b82f6\"");
}

#[test]
fn margin_validation() {
    assert!(Margin::new(20.0, 100.0, 20.0, 140.0).validate().is_ok());
    assert!(Margin::new(-1.0, 0.0, 0.0, 0.0).validate().is_err());
}

#[test]
fn millis_saturates() {
    assert_eq!(Millis(5).saturating_sub(Millis(9)), Millis::ZERO);
    assert_eq!(Millis(5) + Millis(9), Millis(14));
}
