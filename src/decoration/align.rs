use crate::{
    decoration::model::{Foreground, Placement},
    foundation::core::CanvasSize,
};

/// Canonical alignment commands; each touches a single axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    HCenter,
    Right,
    Top,
    VCenter,
    Bottom,
}

enum Edge {
    Start,
    Center,
    End,
}

/// Reposition `fg` on one axis. The remaining room may be negative when the
/// image is larger than the canvas; it is not clamped.
pub fn align_placement(fg: &Foreground, canvas: CanvasSize, align: Align) -> Placement {
    let (w, h) = fg.scaled_size();
    let mut p = fg.placement;
    match align {
        Align::Left => p.x = offset(f64::from(canvas.width), w, Edge::Start),
        Align::HCenter => p.x = offset(f64::from(canvas.width), w, Edge::Center),
        Align::Right => p.x = offset(f64::from(canvas.width), w, Edge::End),
        Align::Top => p.y = offset(f64::from(canvas.height), h, Edge::Start),
        Align::VCenter => p.y = offset(f64::from(canvas.height), h, Edge::Center),
        Align::Bottom => p.y = offset(f64::from(canvas.height), h, Edge::End),
    }
    p
}

fn offset(container: f64, content: f64, edge: Edge) -> f64 {
    let rem = container - content;
    match edge {
        Edge::Start => 0.0,
        Edge::Center => rem / 2.0,
        Edge::End => rem,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decoration/align.rs"]
mod tests;
