//! RGB colors
//!
//! Colors are stored as sRGB components in `0.0..=1.0` and parsed from the
//! notations used in scene descriptions: CSS names, `#rgb`, `#rrggbb`, and
//! `0xrrggbb` integers.

use serde::{Deserialize, Serialize};

/// An sRGB color
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);

    /// Create a color from sRGB components
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a packed `0xrrggbb` integer
    pub fn from_hex(hex: u32) -> Self {
        Self::from_bytes(
            ((hex >> 16) & 0xff) as u8,
            ((hex >> 8) & 0xff) as u8,
            (hex & 0xff) as u8,
        )
    }

    /// Create a color from 8-bit sRGB components
    pub fn from_bytes(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Parse a CSS-style color string
    pub fn parse(s: &str) -> Result<Self, ColorParseError> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return Self::parse_hex_digits(hex).ok_or_else(|| ColorParseError::new(s));
        }
        if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            return u32::from_str_radix(hex, 16)
                .ok()
                .filter(|_| hex.len() == 6)
                .map(Self::from_hex)
                .ok_or_else(|| ColorParseError::new(s));
        }
        Self::named(s).ok_or_else(|| ColorParseError::new(s))
    }

    fn parse_hex_digits(hex: &str) -> Option<Self> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            // #rgb expands each digit: #333 == #333333
            3 => {
                let v = u32::from_str_radix(hex, 16).ok()?;
                let (r, g, b) = ((v >> 8) & 0xf, (v >> 4) & 0xf, v & 0xf);
                Some(Self::from_hex((r * 0x11) << 16 | (g * 0x11) << 8 | b * 0x11))
            }
            6 => u32::from_str_radix(hex, 16).ok().map(Self::from_hex),
            _ => None,
        }
    }

    fn named(name: &str) -> Option<Self> {
        let hex = match name.to_ascii_lowercase().as_str() {
            "black" => 0x000000,
            "white" => 0xffffff,
            "red" => 0xff0000,
            "lime" => 0x00ff00,
            "green" => 0x008000,
            "blue" => 0x0000ff,
            "yellow" => 0xffff00,
            "cyan" | "aqua" => 0x00ffff,
            "magenta" | "fuchsia" => 0xff00ff,
            "gray" | "grey" => 0x808080,
            "silver" => 0xc0c0c0,
            "orange" => 0xffa500,
            "navy" => 0x000080,
            _ => return None,
        };
        Some(Self::from_hex(hex))
    }

    /// Pack into a `0xrrggbb` integer
    pub fn to_hex(&self) -> u32 {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        byte(self.r) << 16 | byte(self.g) << 8 | byte(self.b)
    }

    /// Convert to linear RGB for lighting math
    pub fn to_linear(&self) -> [f32; 3] {
        [srgb_to_linear(self.r), srgb_to_linear(self.g), srgb_to_linear(self.b)]
    }

    /// Linear RGBA with the given alpha
    pub fn to_linear_rgba(&self, alpha: f32) -> [f32; 4] {
        let [r, g, b] = self.to_linear();
        [r, g, b, alpha]
    }

    /// Scale every channel (used for light intensity)
    pub fn scaled(&self, factor: f32) -> Self {
        Self::rgb(self.r * factor, self.g * factor, self.b * factor)
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06x}", self.to_hex())
    }
}

impl std::str::FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Error returned when a color string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError {
    input: String,
}

impl ColorParseError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}

impl std::fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid color '{}'", self.input)
    }
}

impl std::error::Error for ColorParseError {}
