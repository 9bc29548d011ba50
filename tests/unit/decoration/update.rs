use super::*;
use crate::decoration::model::{Compass, Placement};
use crate::foundation::core::Point;

fn loaded(w: u32, h: u32) -> DecorationState {
    DecorationState::default()
        .apply(Update::SetCanvasWidth(200.0))
        .apply(Update::SetCanvasHeight(200.0))
        .apply(Update::LoadForeground(PreparedImage::solid(
            w,
            h,
            [255, 0, 0, 255],
        )))
}

#[test]
fn editing_canvas_size_disables_auto_fit_and_clamps() {
    let s = DecorationState::default().apply(Update::SetCanvasWidth(0.0));
    assert!(!s.auto_canvas);
    assert_eq!(s.canvas.width, 1);

    let s = s.apply(Update::SetCanvasWidth(640.4));
    assert_eq!(s.canvas.width, 640);

    let s = s.apply(Update::SetCanvasHeight(f64::NAN));
    assert_eq!(s.canvas.height, 300);
}

#[test]
fn viewport_fit_only_applies_in_auto_mode() {
    let s = DecorationState::default().apply(Update::FitViewport {
        width: 1050,
        height: 750,
    });
    assert_eq!(s.canvas, CanvasSize::new(1000, 700));

    let s = s
        .apply(Update::SetAutoCanvas(false))
        .apply(Update::FitViewport {
            width: 20,
            height: 20,
        });
    assert_eq!(s.canvas, CanvasSize::new(1000, 700));

    let s = s
        .apply(Update::SetAutoCanvas(true))
        .apply(Update::FitViewport {
            width: 20,
            height: 20,
        });
    assert_eq!(s.canvas, CanvasSize::new(1, 1));
}

#[test]
fn shadow_and_radius_inputs_are_clamped() {
    let s = DecorationState::default()
        .apply(Update::SetShadowOpacity(150.0))
        .apply(Update::SetShadowBlur(-3.0))
        .apply(Update::SetCornerRadius(-1.0));
    assert_eq!(s.shadow.opacity, 100.0);
    assert_eq!(s.shadow.blur, 0.0);
    assert_eq!(s.corner_radius, 0.0);

    let s = s
        .apply(Update::SetShadowOpacity(f64::NAN))
        .apply(Update::SetCornerRadius(f64::INFINITY));
    assert_eq!(s.shadow.opacity, 100.0);
    assert_eq!(s.corner_radius, 0.0);
}

#[test]
fn export_scale_rejects_non_positive() {
    let s = DecorationState::default().apply(Update::SetExportScale(2.0));
    assert_eq!(s.export_scale, 2.0);
    let s = s.apply(Update::SetExportScale(-1.0));
    assert_eq!(s.export_scale, 2.0);
    let s = s.apply(Update::SetExportScale(0.0));
    assert_eq!(s.export_scale, 2.0);
}

#[test]
fn gradient_stop_lifecycle() {
    let s = DecorationState::default()
        .apply(Update::SetBackgroundMode(BackgroundMode::Gradient))
        .apply(Update::SetGradientDirection(GradientDirection::Compass(
            Compass::ToRight,
        )))
        .apply(Update::AddGradientStop(Color::rgb(255, 0, 0)))
        .apply(Update::AddGradientStop(Color::rgb(0, 0, 255)));
    let ids: Vec<StopId> = s.background.gradient.stops.iter().map(|s| s.id).collect();
    assert_eq!(ids.len(), 2);

    let s = s.apply(Update::RecolorGradientStop {
        id: ids[0],
        color: Some(Color::rgb(0, 255, 0)),
    });
    assert_eq!(s.background.gradient.stops[0].color, Color::rgb(0, 255, 0));

    let before = s.clone();
    let s = s.apply(Update::RecolorGradientStop {
        id: ids[0],
        color: None,
    });
    assert_eq!(s, before);

    let s = s.apply(Update::SetGradientStopOffset {
        id: ids[1],
        offset: Some(1.7),
    });
    assert_eq!(s.background.gradient.stops[1].offset, Some(1.0));

    let s = s.apply(Update::RemoveGradientStop(ids[0]));
    assert_eq!(s.background.gradient.stops.len(), 1);
    assert_eq!(s.background.gradient.stops[0].id, ids[1]);
}

#[test]
fn removed_stop_ids_are_not_reissued() {
    let s = DecorationState::default()
        .apply(Update::AddGradientStop(Color::rgb(255, 0, 0)))
        .apply(Update::AddGradientStop(Color::rgb(0, 0, 255)));
    let removed = s.background.gradient.stops[1].id;

    let s = s
        .apply(Update::RemoveGradientStop(removed))
        .apply(Update::AddGradientStop(Color::rgb(0, 255, 0)));
    let fresh = s.background.gradient.stops[1].id;
    assert_ne!(fresh, removed);

    // A late edit aimed at the removed stop must not land on its replacement.
    let s = s.apply(Update::RecolorGradientStop {
        id: removed,
        color: Some(Color::rgb(255, 255, 255)),
    });
    assert_eq!(s.background.gradient.stops[1].color, Color::rgb(0, 255, 0));
}

#[test]
fn loaded_state_does_not_reissue_ids_in_use() {
    let s = DecorationState::default()
        .apply(Update::AddGradientStop(Color::rgb(255, 0, 0)))
        .apply(Update::AddGradientStop(Color::rgb(0, 0, 255)));
    let mut stale = s.clone();
    stale.background.gradient.next_id = 0;

    let s = stale.sanitized().apply(Update::AddGradientStop(Color::rgb(0, 255, 0)));
    let ids: Vec<StopId> = s.background.gradient.stops.iter().map(|s| s.id).collect();
    assert_eq!(ids.len(), 3);
    assert!(ids[2] != ids[0] && ids[2] != ids[1]);
}

#[test]
fn load_centers_foreground() {
    let s = loaded(100, 100);
    let fg = s.foreground.as_ref().unwrap();
    assert_eq!(fg.placement, Placement { x: 50.0, y: 50.0, scale: 1.0 });
}

#[test]
fn align_commands_touch_one_axis() {
    let s = loaded(100, 40).apply(Update::MoveForeground { x: 7.0, y: 9.0 });
    let s = s.apply(Update::Align(Align::Right));
    let p = s.foreground.as_ref().unwrap().placement;
    assert_eq!((p.x, p.y), (100.0, 9.0));

    let s = s.apply(Update::Align(Align::Bottom));
    let p = s.foreground.as_ref().unwrap().placement;
    assert_eq!((p.x, p.y), (100.0, 160.0));

    let s = s.apply(Update::Align(Align::Left)).apply(Update::Align(Align::Top));
    let p = s.foreground.as_ref().unwrap().placement;
    assert_eq!((p.x, p.y), (0.0, 0.0));
}

#[test]
fn align_and_zoom_are_noops_without_free_layout_or_image() {
    let s = DecorationState::default().apply(Update::Align(Align::Left));
    assert!(s.foreground.is_none());

    let s = loaded(10, 10).apply(Update::SetPadding(Padding::uniform(8.0)));
    let before = s.foreground.as_ref().unwrap().placement;
    let s = s
        .apply(Update::Align(Align::Left))
        .apply(Update::Zoom(WheelStep {
            cursor: Point::new(5.0, 5.0),
            delta_y: 1.0,
            invert: false,
        }));
    assert_eq!(s.foreground.as_ref().unwrap().placement, before);
}

#[test]
fn zoom_scales_about_cursor() {
    let s = loaded(100, 100).apply(Update::Zoom(WheelStep {
        cursor: Point::new(50.0, 50.0),
        delta_y: 1.0,
        invert: false,
    }));
    let p = s.foreground.as_ref().unwrap().placement;
    assert!((p.scale - 1.1).abs() < 1e-12);
    assert!((p.x - 50.0).abs() < 1e-9);
    assert!((p.y - 50.0).abs() < 1e-9);
}

#[test]
fn padding_is_sanitized_and_switches_layout() {
    let s = DecorationState::default().apply(Update::SetPadding(Padding {
        left: -5.0,
        right: 4.0,
        top: f64::NAN,
        bottom: 2.0,
    }));
    assert_eq!(
        s.layout,
        Layout::Inset(Padding {
            left: 0.0,
            right: 4.0,
            top: 0.0,
            bottom: 2.0
        })
    );
    let s = s.apply(Update::SetLayout(Layout::Free));
    assert_eq!(s.layout, Layout::Free);
}

#[test]
fn clear_foreground_returns_to_empty() {
    let s = loaded(5, 5).apply(Update::ClearForeground);
    assert!(!s.has_foreground());
}
