//! WCAG 2.x contrast: relative luminance, contrast ratio and AA checks.
//!
//! A [`ContrastPill`] carries the result for both black and white text on a
//! background, so previews always show both sides.

use serde::Serialize;

use crate::color::HexColor;
use crate::math::srgb_to_linear;

/// Minimum ratio for graphics and UI components (WCAG AA, 1.4.11).
pub const GRAPHICS_MIN: f64 = 3.0;
/// Minimum ratio for large text (WCAG AA, 1.4.3).
pub const LARGE_TEXT_MIN: f64 = 3.0;
/// Minimum ratio for normal text (WCAG AA, 1.4.3).
pub const NORMAL_TEXT_MIN: f64 = 4.5;

/// Relative luminance in 0.0–1.0.
pub fn relative_luminance(color: HexColor) -> f64 {
    let (r, g, b) = color.to_rgb();
    0.2126 * srgb_to_linear(r) + 0.7152 * srgb_to_linear(g) + 0.0722 * srgb_to_linear(b)
}

/// Contrast ratio between two colors, 1.0–21.0, order independent.
pub fn contrast_ratio(a: HexColor, b: HexColor) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    (la.max(lb) + 0.05) / (la.min(lb) + 0.05)
}

/// Black or white, whichever reads better on `background`. Ties go to black.
pub fn best_foreground(background: HexColor) -> HexColor {
    let on_black = contrast_ratio(background, HexColor::BLACK);
    let on_white = contrast_ratio(background, HexColor::WHITE);
    if on_black >= on_white {
        HexColor::BLACK
    } else {
        HexColor::WHITE
    }
}

/// Pass/fail for the three AA checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Checks {
    pub graphics: bool,
    pub large_text: bool,
    pub normal_text: bool,
}

impl Checks {
    pub fn all(&self) -> bool {
        self.graphics && self.large_text && self.normal_text
    }

    pub fn none(&self) -> bool {
        !(self.graphics || self.large_text || self.normal_text)
    }
}

pub fn classify(ratio: f64) -> Checks {
    Checks {
        graphics: ratio >= GRAPHICS_MIN,
        large_text: ratio >= LARGE_TEXT_MIN,
        normal_text: ratio >= NORMAL_TEXT_MIN,
    }
}

/// Contrast of one foreground against a background.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Side {
    pub ratio: f64,
    pub checks: Checks,
}

impl Side {
    fn new(ratio: f64) -> Self {
        Self {
            ratio,
            checks: classify(ratio),
        }
    }

    /// Ratio with two decimals, as shown on swatches.
    pub fn display_ratio(&self) -> String {
        format!("{:.2}", self.ratio)
    }
}

/// Black and white contrast for one swatch background.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastPill {
    pub on_black: Side,
    pub on_white: Side,
    pub best: HexColor,
}

impl ContrastPill {
    pub fn for_background(background: HexColor) -> Self {
        let on_black = Side::new(contrast_ratio(background, HexColor::BLACK));
        let on_white = Side::new(contrast_ratio(background, HexColor::WHITE));
        let best = if on_black.ratio >= on_white.ratio {
            HexColor::BLACK
        } else {
            HexColor::WHITE
        };
        Self {
            on_black,
            on_white,
            best,
        }
    }
}
