//! Sizing, color, and styling constants for the preview.

use floem::peniko::Color;

/// Width of one ramp column
pub const COLUMN_WIDTH: f32 = 220.0;

/// Height of one swatch row
pub const ROW_HEIGHT: f32 = 34.0;

/// Height of the ramp strip under each column header
pub const STRIP_HEIGHT: f32 = 10.0;

/// Border radius for cards and strips
pub const RADIUS: f32 = 8.0;

/// Gap between editor elements
pub const GAP: f32 = 12.0;

/// Padding around the whole editor
pub const PADDING: f32 = 16.0;

/// Hex input field width
pub const HEX_INPUT_WIDTH: f32 = 72.0;

/// Input font size
pub const INPUT_FONT: f32 = 12.0;

/// Label font size
pub const LABEL_FONT: f32 = 10.0;

/// Height of the export text area
pub const EXPORT_HEIGHT: f32 = 180.0;

/// Check mark color for a passing contrast check
pub const PASS: Color = Color::rgb8(24, 138, 90);

/// Check mark color for a failing contrast check
pub const FAIL: Color = Color::rgb8(211, 84, 84);

/// Editor background
pub const BACKGROUND: Color = Color::rgb8(242, 242, 242);
