//! Shotframe decorates a screenshot: it places one image on a canvas with a solid or
//! gradient backdrop, rounded corners and a soft drop shadow, and exports the result as PNG.
//!
//! # Pipeline overview
//!
//! 1. **Load**: decode a dropped/picked file into a premultiplied [`PreparedImage`] on the
//!    rayon pool; superseded loads are discarded by [`ImageLoader`].
//! 2. **Edit**: every control produces an [`Update`] that is folded into an immutable
//!    [`DecorationState`] (`state.apply(update)`).
//! 3. **Render**: [`render`] / [`render_at`] derive the whole image from the state
//!    (background, silhouette, shadow, foreground) as a straight-alpha [`RasterImage`].
//! 4. **Export**: [`export_png`] writes `image.png` at `export_scale × pixel_ratio`.
//!
//! [`Editor`] ties these together for an interactive session.
#![forbid(unsafe_code)]

pub mod assets;
pub mod decoration;
pub mod editor;
pub mod export;
pub mod foundation;
pub mod render;

pub use crate::assets::decode::{PreparedImage, decode_image, read_image};
pub use crate::assets::loader::{ImageLoader, LoadOutcome, LoadTicket};
pub use crate::decoration::align::Align;
pub use crate::decoration::model::{
    Background, BackgroundMode, Compass, DecorationState, Foreground, Gradient,
    GradientDirection, GradientStop, Layout, Padding, Placement, Shadow, StopId,
};
pub use crate::decoration::picker::{ColorDialog, recolor_stop};
pub use crate::decoration::update::Update;
pub use crate::decoration::zoom::WheelStep;
pub use crate::editor::{Editor, EditorView};
pub use crate::export::{ExportOptions, export_png};
pub use crate::foundation::core::{CanvasSize, Color, Point, Rect, Vec2};
pub use crate::foundation::error::{ImageDecodeError, ShotframeError, ShotframeResult};
pub use crate::render::{RasterImage, render, render_at};
