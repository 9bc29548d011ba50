use std::{io::Cursor, path::Path};

use anyhow::Context;

use crate::foundation::error::{ShotframeError, ShotframeResult};

/// A rendered raster.
///
/// Output frames are **straight alpha**, which is what PNG stores.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl RasterImage {
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            data: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Straight RGBA at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + x as usize) * 4;
        self.data.get(i..i + 4).map(|p| [p[0], p[1], p[2], p[3]])
    }

    fn to_rgba_image(&self) -> ShotframeResult<image::RgbaImage> {
        if self.is_empty() {
            return Err(ShotframeError::render("cannot encode an empty raster"));
        }
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| ShotframeError::render("raster bytes do not match width*height*4"))
    }

    pub fn encode_png(&self) -> ShotframeResult<Vec<u8>> {
        let img = self.to_rgba_image()?;
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode png")?;
        Ok(buf)
    }

    /// Write a PNG to `path`, creating missing parent directories.
    pub fn save_png(&self, path: &Path) -> ShotframeResult<()> {
        let img = self.to_rgba_image()?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        img.save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
