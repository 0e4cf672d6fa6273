//! HexColor type — the canonical color representation for floem-ramps.
//!
//! Stores an opaque sRGB triple and always formats as lower-case `#rrggbb`.
//! Parsing is total: anything that is not a recognizable hex color becomes
//! black, so a half-typed value in a text field never fails.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::math;

/// Opaque sRGB color with 0–255 channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HexColor {
    r: u8,
    g: u8,
    b: u8,
}

/// HSL triple with integer components: hue 0–360, saturation and lightness 0–100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsl {
    pub h: i32,
    pub s: i32,
    pub l: i32,
}

impl HexColor {
    pub const BLACK: Self = Self::from_rgb(0, 0, 0);
    pub const WHITE: Self = Self::from_rgb(255, 255, 255);

    /// Create from 0–255 RGB values.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to 0–255 RGB tuple.
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Format as lower-case hex with `#` prefix.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Format as upper-case hex with `#` prefix.
    pub fn to_hex_upper(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Convert to HSL, each component rounded to an integer.
    pub fn to_hsl(&self) -> Hsl {
        let (h, s, l) = math::rgb_to_hsl(
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        );
        Hsl {
            h: math::round_half_up(h * 360.0),
            s: math::round_half_up(s * 100.0),
            l: math::round_half_up(l * 100.0),
        }
    }
}

/// Parse any string into a color.
///
/// Leading and trailing whitespace is ignored, a missing `#` is added and
/// 3-digit shorthand is expanded by doubling each digit. Anything that does
/// not end up as exactly `#` followed by six hex digits becomes `#000000`.
pub fn normalize(input: &str) -> HexColor {
    let trimmed = input.trim();
    let stripped = trimmed.strip_prefix('#').unwrap_or(trimmed);

    let expanded: String = if stripped.chars().count() == 3 {
        stripped.chars().flat_map(|c| [c, c]).collect()
    } else {
        stripped.to_string()
    };

    if expanded.len() != 6 || !expanded.chars().all(|c| c.is_ascii_hexdigit()) {
        return HexColor::BLACK;
    }

    let byte = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).unwrap_or(0);
    HexColor::from_rgb(byte(0), byte(2), byte(4))
}

/// String form of [`normalize`]: always a 7-character lower-case `#rrggbb`.
pub fn normalize_hex(input: &str) -> String {
    normalize(input).to_hex()
}

/// Per-channel linear interpolation from `a` (t = 0) to `b` (t = 1).
///
/// `t` is clamped to 0.0–1.0; a NaN `t` counts as 0.
pub fn mix(a: HexColor, b: HexColor, t: f64) -> HexColor {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    HexColor::from_rgb(
        math::lerp_channel(a.r, b.r, t),
        math::lerp_channel(a.g, b.g, t),
        math::lerp_channel(a.b, b.b, t),
    )
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<&str> for HexColor {
    fn from(value: &str) -> Self {
        normalize(value)
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Non-strings (numbers, null, objects) read as black rather than failing.
        Ok(match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(raw) => normalize(&raw),
            _ => HexColor::BLACK,
        })
    }
}
