use super::*;

#[test]
fn hex_forms_parse() {
    assert_eq!(Color::parse_hex("#00ff00").unwrap(), Color::rgb(0, 255, 0));
    assert_eq!(Color::parse_hex("fafafa").unwrap(), Color::rgb(250, 250, 250));
    assert_eq!(Color::parse_hex("#f00").unwrap(), Color::rgb(255, 0, 0));
    assert_eq!(
        Color::parse_hex("#11223380").unwrap(),
        Color::rgba(0x11, 0x22, 0x33, 0x80)
    );
}

#[test]
fn hex_rejects_garbage() {
    assert!(Color::parse_hex("#12345").is_err());
    assert!(Color::parse_hex("#gg0000").is_err());
    assert!(Color::parse_hex("").is_err());
}

#[test]
fn display_roundtrips_through_json() {
    let c = Color::rgba(1, 2, 3, 4);
    let json = serde_json::to_string(&c).unwrap();
    assert_eq!(json, "\"#01020304\"");
    let back: Color = serde_json::from_str(&json).unwrap();
    assert_eq!(back, c);
    assert_eq!(Color::rgb(255, 0, 0).to_string(), "#ff0000");
}

#[test]
fn premul_of_opaque_is_identity() {
    assert_eq!(Color::rgb(10, 20, 30).to_premul(), [10, 20, 30, 255]);
    assert_eq!(Color::rgba(200, 100, 0, 0).to_premul(), [0, 0, 0, 0]);
}

#[test]
fn alpha_mul_scales_and_clamps() {
    assert_eq!(Color::BLACK.with_alpha_mul(0.5).a, 128);
    assert_eq!(Color::BLACK.with_alpha_mul(2.0).a, 255);
    assert_eq!(Color::BLACK.with_alpha_mul(f64::NAN).a, 0);
}

#[test]
fn canvas_scaled_rounds_and_zeroes_degenerate_scale() {
    let c = CanvasSize::new(200, 100);
    assert_eq!(c.scaled(1.0), (200, 100));
    assert_eq!(c.scaled(2.0), (400, 200));
    assert_eq!(c.scaled(0.5), (100, 50));
    assert_eq!(c.scaled(0.001), (1, 1));
    assert_eq!(c.scaled(0.004), (1, 1));
    assert_eq!(c.scaled(0.0), (0, 0));
    assert_eq!(c.scaled(f64::NAN), (0, 0));
}
