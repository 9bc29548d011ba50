pub mod background;
pub mod blur;
pub mod composite;
pub mod compositor;
pub mod frame;
pub mod mask;

pub use compositor::{render, render_at};
pub use frame::RasterImage;
