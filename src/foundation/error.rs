use std::path::PathBuf;

/// Convenience result type used across shotframe.
pub type ShotframeResult<T> = Result<T, ShotframeError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum ShotframeError {
    /// Invalid user-provided decoration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The foreground image could not be read or decoded.
    #[error(transparent)]
    ImageDecode(#[from] ImageDecodeError),

    /// Errors raised while rasterizing the composition.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing decoration documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShotframeError {
    /// Build a [`ShotframeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ShotframeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ShotframeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

/// Failure to turn a user-supplied file into a decoded raster.
#[derive(thiserror::Error, Debug)]
pub enum ImageDecodeError {
    /// The file extension is not one of the accepted raster formats.
    #[error("unsupported image format '{extension}' ({})", path.display())]
    UnsupportedFormat {
        /// Offending path.
        path: PathBuf,
        /// Extension as found on the path (may be empty).
        extension: String,
    },

    /// The file could not be read.
    #[error("read image '{}': {source}", path.display())]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not a decodable image.
    #[error("decode image: {0}")]
    Decode(#[from] image::ImageError),
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
