use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a color string cannot be resolved to six hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Color \"{input}\" is not a #rrggbb hex value")]
pub struct ColorParseError {
    /// The rejected input, as supplied by the caller.
    pub input: String,
}

/// An opaque 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb`. The leading `#` is optional and digits are case-insensitive.
    pub fn from_hex(input: &str) -> Result<Self, ColorParseError> {
        let digits = input.trim().strip_prefix('#').unwrap_or(input.trim());
        let err = || ColorParseError {
            input: input.to_string(),
        };

        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }

        let value = u32::from_str_radix(digits, 16).map_err(|_| err())?;
        Ok(Self::new(
            (value >> 16) as u8,
            ((value >> 8) & 0xff) as u8,
            (value & 0xff) as u8,
        ))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Per-channel `a + t * (b - a)`, truncated toward zero.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let channel = |a: u8, b: u8| {
            let a = f64::from(a);
            (a + t * (f64::from(b) - a)) as u8
        };
        Self::new(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
        )
    }

    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a: alpha,
        }
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}

impl From<Rgb> for Color {
    fn from(value: Rgb) -> Self {
        Color::srgb_u8(value.r, value.g, value.b)
    }
}

/// A composited color. Alpha stays on the 0-255 scale and may be fractional
/// after interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub fn rgb(&self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// Alpha as a CSS opacity in `[0, 1]` (unclamped).
    pub fn opacity(&self) -> f64 {
        self.a / 255.0
    }

    /// Formats as `rgba(r, g, b, a/255)`.
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.opacity())
    }
}

impl From<Rgba> for Color {
    fn from(value: Rgba) -> Self {
        Color::srgba(
            f32::from(value.r) / 255.0,
            f32::from(value.g) / 255.0,
            f32::from(value.b) / 255.0,
            value.opacity() as f32,
        )
    }
}

/// Converts a `0..=1` opacity into the canonical `0..=255` alpha.
pub fn alpha_from_unit(opacity: f32) -> u8 {
    (opacity.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Converts the canonical `0..=255` alpha into a `0..=1` opacity.
pub fn alpha_to_unit(alpha: u8) -> f32 {
    f32::from(alpha) / 255.0
}
