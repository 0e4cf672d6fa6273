//! Swatch table: what a preview column shows for each step.
//!
//! The live preview renders it, and `GenerateFrames` hands it to the host
//! so its frames carry the same colors and contrast results.

use serde::Serialize;

use crate::color::HexColor;
use crate::contrast::{best_foreground, ContrastPill};
use crate::palette::{Group, Palette};
use crate::ramp::Step;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwatchRow {
    pub step: Step,
    pub color: HexColor,
    /// Text color for labels drawn on the swatch.
    pub foreground: HexColor,
    pub pill: ContrastPill,
}

impl SwatchRow {
    pub fn new(step: Step, color: HexColor) -> Self {
        let pill = ContrastPill::for_background(color);
        Self {
            step,
            color,
            foreground: pill.best,
            pill,
        }
    }

    /// Upper-case hex label.
    pub fn label(&self) -> String {
        self.color.to_hex_upper()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub group: Group,
    pub title: &'static str,
    pub base: HexColor,
    pub header_foreground: HexColor,
    pub rows: Vec<SwatchRow>,
}

pub fn title(group: Group) -> &'static str {
    match group {
        Group::C1 => "Brand C1",
        Group::C2 => "Brand C2",
        Group::C3 => "Brand C3",
        Group::Neutral => "Brand Neutral",
    }
}

pub fn column(palette: &Palette, group: Group) -> Column {
    let ramp = palette.ramp(group);
    let base = ramp.base();
    Column {
        group,
        title: title(group),
        base,
        header_foreground: best_foreground(base),
        rows: ramp.iter().map(|(s, c)| SwatchRow::new(s, c)).collect(),
    }
}

/// One column per group, in canonical order.
pub fn columns(palette: &Palette) -> Vec<Column> {
    Group::ALL.into_iter().map(|g| column(palette, g)).collect()
}
