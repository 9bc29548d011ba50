use crate::{
    assets::decode::PreparedImage,
    decoration::{
        align::{Align, align_placement},
        model::{
            AUTO_CANVAS_MARGIN, BackgroundMode, DecorationState, Foreground, GradientDirection,
            Layout, Padding, StopId, non_negative,
        },
        zoom::{WheelStep, zoom_placement},
    },
    foundation::core::{CanvasSize, Color},
};

/// A single control change. Applying one yields a new [`DecorationState`].
#[derive(Clone, Debug, PartialEq)]
pub enum Update {
    SetCanvasWidth(f64),
    SetCanvasHeight(f64),
    SetAutoCanvas(bool),
    /// Viewport size changed; re-fits the canvas when auto-fit is on.
    FitViewport {
        width: u32,
        height: u32,
    },
    SetCornerRadius(f64),
    SetShadowColor(Color),
    SetShadowBlur(f64),
    SetShadowOpacity(f64),
    SetBackgroundMode(BackgroundMode),
    SetBackgroundColor(Color),
    SetGradientDirection(GradientDirection),
    AddGradientStop(Color),
    RemoveGradientStop(StopId),
    /// Result of a color dialog; `None` means it was cancelled.
    RecolorGradientStop {
        id: StopId,
        color: Option<Color>,
    },
    SetGradientStopOffset {
        id: StopId,
        offset: Option<f64>,
    },
    SetLayout(Layout),
    SetPadding(Padding),
    Align(Align),
    Zoom(WheelStep),
    MoveForeground {
        x: f64,
        y: f64,
    },
    SetExportScale(f64),
    LoadForeground(PreparedImage),
    ClearForeground,
}

impl DecorationState {
    /// Reducer: consume the current state and return the updated one.
    ///
    /// Out-of-range numbers are clamped, non-finite ones keep the previous value.
    pub fn apply(mut self, update: Update) -> Self {
        match update {
            Update::SetCanvasWidth(v) => {
                self.auto_canvas = false;
                if let Some(w) = canvas_axis(v) {
                    self.canvas.width = w;
                }
            }
            Update::SetCanvasHeight(v) => {
                self.auto_canvas = false;
                if let Some(h) = canvas_axis(v) {
                    self.canvas.height = h;
                }
            }
            Update::SetAutoCanvas(on) => self.auto_canvas = on,
            Update::FitViewport { width, height } => {
                if self.auto_canvas {
                    self.canvas = fit_viewport(width, height);
                }
            }
            Update::SetCornerRadius(v) => {
                if v.is_finite() {
                    self.corner_radius = non_negative(v);
                }
            }
            Update::SetShadowColor(c) => self.shadow.color = c,
            Update::SetShadowBlur(v) => {
                if v.is_finite() {
                    self.shadow.blur = non_negative(v);
                }
            }
            Update::SetShadowOpacity(v) => {
                if v.is_finite() {
                    self.shadow.opacity = v.clamp(0.0, 100.0);
                }
            }
            Update::SetBackgroundMode(mode) => self.background.mode = mode,
            Update::SetBackgroundColor(c) => self.background.color = c,
            Update::SetGradientDirection(dir) => self.background.gradient.direction = dir,
            Update::AddGradientStop(c) => {
                self.background.gradient.push(c);
            }
            Update::RemoveGradientStop(id) => {
                self.background.gradient.stops.retain(|s| s.id != id);
            }
            Update::RecolorGradientStop { id, color } => {
                if let (Some(c), Some(stop)) = (color, self.background.gradient.stop_mut(id)) {
                    stop.color = c;
                }
            }
            Update::SetGradientStopOffset { id, offset } => {
                if let Some(stop) = self.background.gradient.stop_mut(id) {
                    stop.offset = offset.filter(|o| o.is_finite()).map(|o| o.clamp(0.0, 1.0));
                }
            }
            Update::SetLayout(layout) => {
                self.layout = match layout {
                    Layout::Inset(p) => Layout::Inset(p.sanitized()),
                    Layout::Free => Layout::Free,
                };
            }
            Update::SetPadding(p) => self.layout = Layout::Inset(p.sanitized()),
            Update::Align(align) => {
                if self.layout == Layout::Free {
                    let canvas = self.canvas;
                    if let Some(fg) = self.foreground.as_mut() {
                        fg.placement = align_placement(fg, canvas, align);
                    }
                }
            }
            Update::Zoom(step) => {
                if self.layout == Layout::Free
                    && let Some(fg) = self.foreground.as_mut()
                {
                    fg.placement = zoom_placement(fg.placement, step);
                }
            }
            Update::MoveForeground { x, y } => {
                if x.is_finite()
                    && y.is_finite()
                    && let Some(fg) = self.foreground.as_mut()
                {
                    fg.placement.x = x;
                    fg.placement.y = y;
                }
            }
            Update::SetExportScale(v) => {
                if v.is_finite() && v > 0.0 {
                    self.export_scale = v;
                }
            }
            Update::LoadForeground(image) => {
                self.foreground = Some(Foreground::centered(image, self.canvas));
            }
            Update::ClearForeground => self.foreground = None,
        }
        self
    }
}

fn canvas_axis(v: f64) -> Option<u32> {
    if !v.is_finite() {
        return None;
    }
    Some(v.round().clamp(1.0, f64::from(u32::MAX)) as u32)
}

fn fit_viewport(width: u32, height: u32) -> CanvasSize {
    CanvasSize::new(
        width.saturating_sub(AUTO_CANVAS_MARGIN).max(1),
        height.saturating_sub(AUTO_CANVAS_MARGIN).max(1),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/decoration/update.rs"]
mod tests;
