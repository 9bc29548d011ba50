use std::{path::Path, str::FromStr};

use anyhow::Context;

use crate::{
    assets::decode::PreparedImage,
    foundation::core::{CanvasSize, Color, Point},
    foundation::error::{ShotframeError, ShotframeResult},
};

/// Margin kept between the viewport edge and an auto-fitted canvas.
pub const AUTO_CANVAS_MARGIN: u32 = 50;

/// Everything the user can adjust about the decorated output.
///
/// Values are replaced wholesale by [`crate::Update`]s; the foreground image itself is
/// process-local and never serialized.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DecorationState {
    pub canvas: CanvasSize,
    /// Canvas follows the viewport size when set.
    pub auto_canvas: bool,
    pub background: Background,
    /// Corner rounding in canvas pixels.
    pub corner_radius: f64,
    pub shadow: Shadow,
    pub layout: Layout,
    /// Multiplier applied only when rasterizing for export.
    pub export_scale: f64,
    #[serde(skip)]
    pub foreground: Option<Foreground>,
}

impl Default for DecorationState {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::default(),
            auto_canvas: true,
            background: Background::default(),
            corner_radius: 0.0,
            shadow: Shadow::default(),
            layout: Layout::Free,
            export_scale: 1.0,
            foreground: None,
        }
    }
}

impl DecorationState {
    pub fn has_foreground(&self) -> bool {
        self.foreground.is_some()
    }

    /// Parse a decoration document; omitted fields take their defaults.
    pub fn from_json(json: &str) -> ShotframeResult<Self> {
        let state: Self = serde_json::from_str(json)
            .map_err(|e| ShotframeError::serde(format!("parse decoration JSON: {e}")))?;
        Ok(state.sanitized())
    }

    pub fn from_path(path: &Path) -> ShotframeResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read decoration '{}'", path.display()))?;
        Self::from_json(&json)
    }

    pub fn to_json_pretty(&self) -> ShotframeResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ShotframeError::serde(format!("write decoration JSON: {e}")))
    }

    /// Clamp every numeric field into its valid range.
    pub fn sanitized(mut self) -> Self {
        self.canvas.width = self.canvas.width.max(1);
        self.canvas.height = self.canvas.height.max(1);
        self.corner_radius = non_negative(self.corner_radius);
        self.shadow.blur = non_negative(self.shadow.blur);
        self.shadow.opacity = if self.shadow.opacity.is_finite() {
            self.shadow.opacity.clamp(0.0, 100.0)
        } else {
            0.0
        };
        self.background.gradient.reserve_ids();
        if let Layout::Inset(p) = self.layout {
            self.layout = Layout::Inset(p.sanitized());
        }
        if !self.export_scale.is_finite() || self.export_scale <= 0.0 {
            self.export_scale = 1.0;
        }
        self
    }
}

pub(crate) fn non_negative(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundMode {
    #[default]
    Solid,
    Gradient,
}

/// Backdrop drawn under the foreground.
///
/// The solid color is kept while the gradient is active so switching modes is lossless.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Background {
    pub mode: BackgroundMode,
    pub color: Color,
    pub gradient: Gradient,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            mode: BackgroundMode::Solid,
            color: Color::rgb(0xfa, 0xfa, 0xfa),
            gradient: Gradient::default(),
        }
    }
}

impl Background {
    pub fn solid(color: Color) -> Self {
        Self {
            mode: BackgroundMode::Solid,
            color,
            ..Self::default()
        }
    }

    pub fn gradient(gradient: Gradient) -> Self {
        Self {
            mode: BackgroundMode::Gradient,
            gradient,
            ..Self::default()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct StopId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientStop {
    pub id: StopId,
    /// Position in `[0, 1]`; evenly distributed by list order when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<f64>,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Gradient {
    pub direction: GradientDirection,
    pub stops: Vec<GradientStop>,
    /// Next id handed out by [`Gradient::push`]; ids are never reused after removal.
    pub next_id: u64,
}

impl Gradient {
    /// Gradient with evenly spaced stops in the given order.
    pub fn even(direction: GradientDirection, colors: &[Color]) -> Self {
        let mut g = Self {
            direction,
            stops: Vec::with_capacity(colors.len()),
            next_id: 0,
        };
        for &c in colors {
            g.push(c);
        }
        g
    }

    /// Append a stop at the end of the list and return its id.
    pub fn push(&mut self, color: Color) -> StopId {
        self.reserve_ids();
        let id = StopId(self.next_id);
        self.next_id += 1;
        self.stops.push(GradientStop {
            id,
            offset: None,
            color,
        });
        id
    }

    /// Raise `next_id` above every id currently in use.
    pub fn reserve_ids(&mut self) {
        let floor = self.stops.iter().map(|s| s.id.0 + 1).max().unwrap_or(0);
        self.next_id = self.next_id.max(floor);
    }

    pub fn stop_mut(&mut self, id: StopId) -> Option<&mut GradientStop> {
        self.stops.iter_mut().find(|s| s.id == id)
    }

    /// `(offset, color)` pairs ready for interpolation, or empty when fewer than two stops exist.
    ///
    /// Implicit offsets are `i / (n - 1)`; explicit ones are clamped to `[0, 1]` and never
    /// allowed to precede an earlier stop.
    pub fn resolved_stops(&self) -> Vec<(f64, Color)> {
        let n = self.stops.len();
        if n < 2 {
            return Vec::new();
        }
        let last = (n - 1) as f64;
        let mut out = Vec::with_capacity(n);
        let mut floor = 0.0f64;
        for (i, stop) in self.stops.iter().enumerate() {
            let raw = match stop.offset {
                Some(o) if o.is_finite() => o.clamp(0.0, 1.0),
                _ => i as f64 / last,
            };
            let off = raw.max(floor);
            floor = off;
            out.push((off, stop.color));
        }
        out
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Compass {
    #[serde(rename = "to top")]
    ToTop,
    #[serde(rename = "to bottom")]
    ToBottom,
    #[serde(rename = "to left")]
    ToLeft,
    #[serde(rename = "to right")]
    ToRight,
    #[serde(rename = "to top left")]
    ToTopLeft,
    #[serde(rename = "to top right")]
    ToTopRight,
    #[serde(rename = "to bottom left")]
    ToBottomLeft,
    #[serde(rename = "to bottom right")]
    ToBottomRight,
}

impl Compass {
    pub const ALL: [Self; 8] = [
        Self::ToTop,
        Self::ToBottom,
        Self::ToLeft,
        Self::ToRight,
        Self::ToTopLeft,
        Self::ToTopRight,
        Self::ToBottomLeft,
        Self::ToBottomRight,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ToTop => "to top",
            Self::ToBottom => "to bottom",
            Self::ToLeft => "to left",
            Self::ToRight => "to right",
            Self::ToTopLeft => "to top left",
            Self::ToTopRight => "to top right",
            Self::ToBottomLeft => "to bottom left",
            Self::ToBottomRight => "to bottom right",
        }
    }

    /// Start and end points across a box spanning `(0,0)..=(max_x,max_y)`.
    pub fn endpoints(self, max_x: f64, max_y: f64) -> (Point, Point) {
        let p = Point::new;
        match self {
            Self::ToTop => (p(0.0, max_y), p(0.0, 0.0)),
            Self::ToBottom => (p(0.0, 0.0), p(0.0, max_y)),
            Self::ToLeft => (p(max_x, 0.0), p(0.0, 0.0)),
            Self::ToRight => (p(0.0, 0.0), p(max_x, 0.0)),
            Self::ToTopLeft => (p(max_x, max_y), p(0.0, 0.0)),
            Self::ToTopRight => (p(0.0, max_y), p(max_x, 0.0)),
            Self::ToBottomLeft => (p(max_x, 0.0), p(0.0, max_y)),
            Self::ToBottomRight => (p(0.0, 0.0), p(max_x, max_y)),
        }
    }
}

impl FromStr for Compass {
    type Err = ShotframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        let norm = norm.split_whitespace().collect::<Vec<_>>().join(" ");
        let norm = norm.strip_prefix("to ").unwrap_or(&norm).to_string();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str()[3..] == norm)
            .ok_or_else(|| ShotframeError::validation(format!("unknown gradient direction '{s}'")))
    }
}

/// Gradient axis: a compass direction across the canvas or explicit canvas-space points.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum GradientDirection {
    Compass(Compass),
    Points { start: Point, end: Point },
}

impl Default for GradientDirection {
    fn default() -> Self {
        Self::Compass(Compass::ToBottomRight)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Shadow {
    /// Blur radius in canvas pixels.
    pub blur: f64,
    /// Percentage in `[0, 100]`.
    pub opacity: f64,
    pub color: Color,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            blur: 20.0,
            opacity: 50.0,
            color: Color::BLACK,
        }
    }
}

/// Inset of the image container from the canvas edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Padding {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Padding {
    pub fn uniform(v: f64) -> Self {
        Self {
            left: v,
            right: v,
            top: v,
            bottom: v,
        }
    }

    pub fn sanitized(self) -> Self {
        Self {
            left: non_negative(self.left),
            right: non_negative(self.right),
            top: non_negative(self.top),
            bottom: non_negative(self.bottom),
        }
    }
}

/// How the foreground is positioned on the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Layout {
    /// Free position/scale, adjusted by alignment, zoom and drag.
    #[default]
    Free,
    /// Image fitted into the canvas inset by the padding; no transform.
    Inset(Padding),
}

/// Foreground transform in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }
}

impl Placement {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Foreground {
    pub image: PreparedImage,
    pub placement: Placement,
}

impl Foreground {
    /// Foreground centered on `canvas` at its natural size.
    pub fn centered(image: PreparedImage, canvas: CanvasSize) -> Self {
        let x = (f64::from(canvas.width) - f64::from(image.width)) / 2.0;
        let y = (f64::from(canvas.height) - f64::from(image.height)) / 2.0;
        Self {
            image,
            placement: Placement { x, y, scale: 1.0 },
        }
    }

    /// Displayed size in canvas pixels (natural size times placement scale).
    pub fn scaled_size(&self) -> (f64, f64) {
        (
            f64::from(self.image.width) * self.placement.scale,
            f64::from(self.image.height) * self.placement.scale,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/decoration/model.rs"]
mod tests;
