use std::path::{Path, PathBuf};

use crate::{
    decoration::model::DecorationState,
    foundation::error::ShotframeResult,
    render::{RasterImage, render_at},
};

/// Environment variable overriding the device pixel ratio used for export.
pub const PIXEL_RATIO_ENV: &str = "SHOTFRAME_PIXEL_RATIO";

/// Default file name written by an export.
pub const DEFAULT_FILE_NAME: &str = "image.png";

/// Options controlling how an export is rasterized and named.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportOptions {
    /// Device pixel ratio multiplied into the state's export scale.
    pub pixel_ratio: f64,
    pub file_name: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            pixel_ratio: 1.0,
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

impl ExportOptions {
    /// Defaults, with the pixel ratio taken from `SHOTFRAME_PIXEL_RATIO` when it parses to a
    /// positive number.
    pub fn from_env() -> Self {
        let pixel_ratio = std::env::var(PIXEL_RATIO_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|r| r.is_finite() && *r > 0.0)
            .unwrap_or(1.0);
        Self {
            pixel_ratio,
            ..Self::default()
        }
    }

    /// Effective rasterization scale for `state`.
    pub fn scale_for(&self, state: &DecorationState) -> f64 {
        state.export_scale * self.pixel_ratio
    }
}

/// Render `state` for export without touching the filesystem.
///
/// Returns `None` when no foreground is loaded.
pub fn export_raster(
    state: &DecorationState,
    opts: &ExportOptions,
) -> ShotframeResult<Option<RasterImage>> {
    if !state.has_foreground() {
        tracing::debug!("export skipped: no foreground loaded");
        return Ok(None);
    }
    render_at(state, opts.scale_for(state)).map(Some)
}

/// Render and write `dir/<file_name>`; returns the written path, or `None` without a foreground.
#[tracing::instrument(skip(state, opts), fields(dir = %dir.display(), scale = opts.scale_for(state)))]
pub fn export_png(
    state: &DecorationState,
    dir: &Path,
    opts: &ExportOptions,
) -> ShotframeResult<Option<PathBuf>> {
    let Some(raster) = export_raster(state, opts)? else {
        return Ok(None);
    };
    let path = dir.join(&opts.file_name);
    raster.save_png(&path)?;
    tracing::info!(
        path = %path.display(),
        width = raster.width,
        height = raster.height,
        "exported"
    );
    Ok(Some(path))
}

#[cfg(test)]
#[path = "../tests/unit/export.rs"]
mod tests;
