pub mod align;
pub mod model;
pub mod picker;
pub mod update;
pub mod zoom;
