use crate::{decoration::model::Placement, foundation::core::Point};

/// Multiplicative scale change per wheel step.
pub const ZOOM_STEP: f64 = 1.1;

/// One discrete wheel/gesture step.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WheelStep {
    /// Pointer position in canvas pixels; stays fixed on the image.
    pub cursor: Point,
    /// Raw wheel delta; positive zooms in, zero or negative zooms out.
    pub delta_y: f64,
    /// Modifier key held: inverts the direction.
    pub invert: bool,
}

/// Scale `placement` about `step.cursor`.
pub fn zoom_placement(placement: Placement, step: WheelStep) -> Placement {
    let old = placement.scale;
    if !old.is_finite() || old <= 0.0 {
        return placement;
    }
    let mut zoom_in = step.delta_y > 0.0;
    if step.invert {
        zoom_in = !zoom_in;
    }
    let new = if zoom_in { old * ZOOM_STEP } else { old / ZOOM_STEP };

    // Image-local point under the cursor, in unscaled pixels.
    let local_x = (step.cursor.x - placement.x) / old;
    let local_y = (step.cursor.y - placement.y) / old;
    Placement {
        x: step.cursor.x - local_x * new,
        y: step.cursor.y - local_y * new,
        scale: new,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decoration/zoom.rs"]
mod tests;
