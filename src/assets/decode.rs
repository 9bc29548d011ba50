use std::{path::Path, sync::Arc};

use crate::foundation::{
    error::{ImageDecodeError, ShotframeResult},
    math::premultiply_rgba8_in_place,
};

/// File extensions accepted as foreground images.
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "bmp", "gif", "webp"];

/// Decoded foreground raster in premultiplied RGBA8 form.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Wrap straight-alpha RGBA8 pixels, premultiplying them.
    pub fn from_straight_rgba8(width: u32, height: u32, mut rgba: Vec<u8>) -> Self {
        premultiply_rgba8_in_place(&mut rgba);
        Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba),
        }
    }

    /// Solid opaque image, mostly useful for tests and demos.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self::from_straight_rgba8(width, height, rgba.repeat(width as usize * height as usize))
    }
}

/// Whether `path` carries one of the accepted raster extensions.
pub fn is_supported_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode_image(bytes: &[u8]) -> Result<PreparedImage, ImageDecodeError> {
    let dyn_img = image::load_from_memory(bytes)?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    tracing::debug!(width, height, "decoded foreground image");
    Ok(PreparedImage::from_straight_rgba8(width, height, rgba.into_raw()))
}

/// Read and decode an image file, rejecting unsupported extensions up front.
pub fn read_image(path: &Path) -> ShotframeResult<PreparedImage> {
    if !is_supported_path(path) {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        return Err(ImageDecodeError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        }
        .into());
    }
    let bytes = std::fs::read(path).map_err(|source| ImageDecodeError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decode_image(&bytes)?)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
