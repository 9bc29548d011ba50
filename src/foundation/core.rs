use std::{fmt, str::FromStr};

use crate::foundation::{
    error::{ShotframeError, ShotframeResult},
    math::mul_div255_u8,
};

pub use kurbo::{Point, Rect, Vec2};

/// Canvas dimensions in logical pixels (before export scaling).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Pixel dimensions of the raster produced at `scale`.
    ///
    /// A positive scale never rounds a side below one pixel.
    pub fn scaled(self, scale: f64) -> (u32, u32) {
        fn axis(v: u32, scale: f64) -> u32 {
            let s = f64::from(v) * scale;
            if !s.is_finite() || s <= 0.0 {
                return 0;
            }
            s.round().clamp(1.0, f64::from(u32::MAX)) as u32
        }
        (axis(self.width, scale), axis(self.height, scale))
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 300,
            height: 300,
        }
    }
}

/// Straight (non-premultiplied) RGBA8 color.
///
/// Serialized as a `#rrggbb` / `#rrggbbaa` hex string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn parse_hex(s: &str) -> ShotframeResult<Self> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return Err(ShotframeError::validation(format!("invalid color '{s}'")));
        }
        let byte = |i: usize| -> ShotframeResult<u8> {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| ShotframeError::validation(format!("invalid color '{s}'")))
        };
        match hex.len() {
            3 => {
                let nib = |i: usize| -> ShotframeResult<u8> {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| ShotframeError::validation(format!("invalid color '{s}'")))
                };
                Ok(Self::rgb(nib(0)?, nib(1)?, nib(2)?))
            }
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(ShotframeError::validation(format!(
                "color '{s}' must be #rgb, #rrggbb or #rrggbbaa"
            ))),
        }
    }

    /// Same color with alpha scaled by `factor` in `[0, 1]`.
    pub fn with_alpha_mul(self, factor: f64) -> Self {
        let f = if factor.is_finite() {
            factor.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let a = (f64::from(self.a) * f).round() as u8;
        Self { a, ..self }
    }

    pub fn to_premul(self) -> [u8; 4] {
        let a = u16::from(self.a);
        [
            mul_div255_u8(u16::from(self.r), a),
            mul_div255_u8(u16::from(self.g), a),
            mul_div255_u8(u16::from(self.b), a),
            self.a,
        ]
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

impl FromStr for Color {
    type Err = ShotframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ShotframeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value)
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
