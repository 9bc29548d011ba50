use super::*;

#[test]
fn defaults_match_the_editor_startup_state() {
    let s = DecorationState::default();
    assert_eq!(s.canvas, CanvasSize::new(300, 300));
    assert!(s.auto_canvas);
    assert_eq!(s.background.mode, BackgroundMode::Solid);
    assert_eq!(s.background.color, Color::rgb(0xfa, 0xfa, 0xfa));
    assert_eq!(s.corner_radius, 0.0);
    assert_eq!(s.shadow.blur, 20.0);
    assert_eq!(s.shadow.opacity, 50.0);
    assert_eq!(s.shadow.color, Color::BLACK);
    assert_eq!(s.layout, Layout::Free);
    assert_eq!(s.export_scale, 1.0);
    assert!(!s.has_foreground());
}

#[test]
fn partial_json_fills_defaults() {
    let s = DecorationState::from_json(
        r##"{
            "canvas": { "width": 640, "height": 480 },
            "background": { "mode": "gradient", "gradient": {
                "direction": "to right",
                "stops": [
                    { "id": 0, "color": "#ff0000" },
                    { "id": 1, "color": "#0000ff" }
                ]
            } },
            "layout": { "kind": "inset", "left": 10, "right": 10, "top": 5, "bottom": 5 }
        }"##,
    )
    .unwrap();
    assert_eq!(s.canvas, CanvasSize::new(640, 480));
    assert_eq!(s.background.mode, BackgroundMode::Gradient);
    assert_eq!(s.background.color, Color::rgb(0xfa, 0xfa, 0xfa));
    assert_eq!(
        s.background.gradient.direction,
        GradientDirection::Compass(Compass::ToRight)
    );
    assert_eq!(s.background.gradient.stops.len(), 2);
    assert_eq!(s.background.gradient.next_id, 2);
    assert_eq!(
        s.layout,
        Layout::Inset(Padding {
            left: 10.0,
            right: 10.0,
            top: 5.0,
            bottom: 5.0
        })
    );
    assert_eq!(s.shadow, Shadow::default());
}

#[test]
fn json_with_explicit_points_parses() {
    let s = DecorationState::from_json(
        r#"{ "background": { "gradient": { "direction": { "start": { "x": 1, "y": 2 }, "end": { "x": 3, "y": 4 } } } } }"#,
    )
    .unwrap();
    assert_eq!(
        s.background.gradient.direction,
        GradientDirection::Points {
            start: Point::new(1.0, 2.0),
            end: Point::new(3.0, 4.0)
        }
    );
}

#[test]
fn json_round_trips_without_foreground() {
    let mut s = DecorationState::default();
    s.background = Background::gradient(Gradient::even(
        GradientDirection::Compass(Compass::ToTopLeft),
        &[Color::rgb(1, 2, 3), Color::rgb(4, 5, 6)],
    ));
    s.foreground = Some(Foreground::centered(
        PreparedImage::solid(2, 2, [0, 0, 0, 255]),
        s.canvas,
    ));
    let json = s.to_json_pretty().unwrap();
    let back = DecorationState::from_json(&json).unwrap();
    assert!(back.foreground.is_none());
    assert_eq!(back.background, s.background);
}

#[test]
fn malformed_json_is_serde_error() {
    let err = DecorationState::from_json("{ nope").unwrap_err();
    assert!(matches!(err, ShotframeError::Serde(_)));
}

#[test]
fn sanitize_clamps_out_of_range_values() {
    let s = DecorationState::from_json(
        r#"{ "canvas": { "width": 0, "height": 0 }, "corner_radius": -4,
             "shadow": { "blur": -1, "opacity": 250 }, "export_scale": 0 }"#,
    )
    .unwrap();
    assert_eq!(s.canvas, CanvasSize::new(1, 1));
    assert_eq!(s.corner_radius, 0.0);
    assert_eq!(s.shadow.blur, 0.0);
    assert_eq!(s.shadow.opacity, 100.0);
    assert_eq!(s.export_scale, 1.0);
}

#[test]
fn implicit_offsets_are_evenly_spaced_in_insertion_order() {
    let g = Gradient::even(
        GradientDirection::default(),
        &[Color::rgb(3, 0, 0), Color::rgb(1, 0, 0), Color::rgb(2, 0, 0)],
    );
    let stops = g.resolved_stops();
    assert_eq!(stops.len(), 3);
    assert_eq!(stops[0], (0.0, Color::rgb(3, 0, 0)));
    assert_eq!(stops[1], (0.5, Color::rgb(1, 0, 0)));
    assert_eq!(stops[2], (1.0, Color::rgb(2, 0, 0)));
}

#[test]
fn fewer_than_two_stops_resolve_to_nothing() {
    let mut g = Gradient::default();
    assert!(g.resolved_stops().is_empty());
    g.push(Color::WHITE);
    assert!(g.resolved_stops().is_empty());
}

#[test]
fn explicit_offsets_are_clamped_and_monotonic() {
    let mut g = Gradient::even(
        GradientDirection::default(),
        &[Color::BLACK, Color::WHITE, Color::BLACK],
    );
    g.stops[0].offset = Some(-1.0);
    g.stops[1].offset = Some(0.8);
    g.stops[2].offset = Some(0.3);
    let offs: Vec<f64> = g.resolved_stops().iter().map(|(o, _)| *o).collect();
    assert_eq!(offs, vec![0.0, 0.8, 0.8]);
}

#[test]
fn stop_ids_stay_unique_after_removal() {
    let mut g = Gradient::default();
    let a = g.push(Color::BLACK);
    let b = g.push(Color::WHITE);
    g.stops.retain(|s| s.id != a);
    let c = g.push(Color::BLACK);
    assert_ne!(c, b);
    assert!(c > b);
}

#[test]
fn compass_parses_loose_spellings() {
    assert_eq!("to right".parse::<Compass>().unwrap(), Compass::ToRight);
    assert_eq!("Top-Left".parse::<Compass>().unwrap(), Compass::ToTopLeft);
    assert_eq!(
        "to_bottom_right".parse::<Compass>().unwrap(),
        Compass::ToBottomRight
    );
    assert!("sideways".parse::<Compass>().is_err());
}

#[test]
fn compass_endpoints_follow_direction() {
    assert_eq!(
        Compass::ToRight.endpoints(99.0, 9.0),
        (Point::new(0.0, 0.0), Point::new(99.0, 0.0))
    );
    assert_eq!(
        Compass::ToTop.endpoints(99.0, 9.0),
        (Point::new(0.0, 9.0), Point::new(0.0, 0.0))
    );
    assert_eq!(
        Compass::ToBottomLeft.endpoints(99.0, 9.0),
        (Point::new(99.0, 0.0), Point::new(0.0, 9.0))
    );
}

#[test]
fn centered_foreground_uses_natural_size() {
    let fg = Foreground::centered(
        PreparedImage::solid(100, 50, [0, 0, 0, 255]),
        CanvasSize::new(200, 200),
    );
    assert_eq!(fg.placement, Placement { x: 50.0, y: 75.0, scale: 1.0 });
    assert_eq!(fg.scaled_size(), (100.0, 50.0));
}
