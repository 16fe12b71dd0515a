use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::color::{ColorParseError, Rgb, alpha_from_unit, alpha_to_unit};

/// Alpha given to alpha keys created without an explicit value.
pub const DEFAULT_ALPHA: u8 = 255;

/// A color marker on the gradient's time axis.
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct ColorKey {
    pub time: f64,
    pub color: Rgb,
}

impl ColorKey {
    pub fn new(time: f64, color: Rgb) -> Self {
        Self { time, color }
    }

    pub fn from_hex(time: f64, hex: &str) -> Result<Self, ColorParseError> {
        Ok(Self::new(time, Rgb::from_hex(hex)?))
    }
}

impl Default for ColorKey {
    fn default() -> Self {
        Self::new(0.0, Rgb::WHITE)
    }
}

/// An opacity marker on the gradient's time axis. Alpha is stored on the
/// `0..=255` scale.
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct AlphaKey {
    pub time: f64,
    pub alpha: u8,
}

impl AlphaKey {
    pub fn new(time: f64, alpha: u8) -> Self {
        Self { time, alpha }
    }

    /// Builds a key from a `0..=1` opacity.
    pub fn from_unit(time: f64, opacity: f32) -> Self {
        Self::new(time, alpha_from_unit(opacity))
    }

    pub fn opacity(&self) -> f32 {
        alpha_to_unit(self.alpha)
    }
}

impl Default for AlphaKey {
    fn default() -> Self {
        Self::new(0.0, DEFAULT_ALPHA)
    }
}

/// Which row a key (and its pin) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum KeyKind {
    Color,
    Alpha,
}

/// Either kind of key.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum Key {
    Color(ColorKey),
    Alpha(AlphaKey),
}

impl Key {
    /// A key of `kind` at `time` carrying the default value for that kind.
    pub fn with_default_value(kind: KeyKind, time: f64) -> Self {
        match kind {
            KeyKind::Color => Self::Color(ColorKey::new(time, Rgb::WHITE)),
            KeyKind::Alpha => Self::Alpha(AlphaKey::new(time, DEFAULT_ALPHA)),
        }
    }

    pub fn kind(&self) -> KeyKind {
        match self {
            Self::Color(_) => KeyKind::Color,
            Self::Alpha(_) => KeyKind::Alpha,
        }
    }

    pub fn time(&self) -> f64 {
        match self {
            Self::Color(key) => key.time,
            Self::Alpha(key) => key.time,
        }
    }

    pub fn as_color(&self) -> Option<&ColorKey> {
        match self {
            Self::Color(key) => Some(key),
            Self::Alpha(_) => None,
        }
    }

    pub fn as_alpha(&self) -> Option<&AlphaKey> {
        match self {
            Self::Alpha(key) => Some(key),
            Self::Color(_) => None,
        }
    }
}

impl From<ColorKey> for Key {
    fn from(key: ColorKey) -> Self {
        Self::Color(key)
    }
}

impl From<AlphaKey> for Key {
    fn from(key: AlphaKey) -> Self {
        Self::Alpha(key)
    }
}

/// How the composited samples are joined when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum GradientMode {
    /// Samples are linearly blended.
    #[default]
    Blend,
    /// Each sample holds its color until the next one.
    Fixed,
}

/// The gradient value exchanged with the host: independent color and alpha
/// keys plus the blend mode.
///
/// Key times are meant to lie in `[0, 1]` but are not validated.
#[derive(Debug, Clone, PartialEq, Default, Reflect, Serialize, Deserialize)]
pub struct Gradient {
    #[serde(default)]
    pub color_keys: Vec<ColorKey>,
    #[serde(default)]
    pub alpha_keys: Vec<AlphaKey>,
    #[serde(default)]
    pub mode: GradientMode,
}

impl Gradient {
    pub fn new(color_keys: Vec<ColorKey>, alpha_keys: Vec<AlphaKey>) -> Self {
        Self {
            color_keys,
            alpha_keys,
            mode: GradientMode::Blend,
        }
    }

    /// Opaque white from 0 to 1.
    pub fn white() -> Self {
        Self::new(
            vec![
                ColorKey::new(0.0, Rgb::WHITE),
                ColorKey::new(1.0, Rgb::WHITE),
            ],
            vec![
                AlphaKey::new(0.0, DEFAULT_ALPHA),
                AlphaKey::new(1.0, DEFAULT_ALPHA),
            ],
        )
    }

    pub fn with_mode(mut self, mode: GradientMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn from_ron_str(source: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(source)
    }

    pub fn to_ron_string(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }
}
