//! Palette builder: three brand ramps plus a neutral.
//!
//! The neutral is either a gray ramp tinted toward brand color 1 or, when
//! unlocked, a ramp built from a manually chosen base.

use std::fmt;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::color::{mix, normalize, HexColor};
use crate::ramp::{ramp_from, Ramp, Step};

/// Base of the locked neutral ramp.
pub const NEUTRAL_GRAY: HexColor = HexColor::from_rgb(0x80, 0x80, 0x80);

/// Default weight of brand color 1 in the locked neutral.
pub const DEFAULT_TINT_FRACTION: f64 = 0.02;

/// One of the four ramps of a palette, ordered canonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    C1,
    C2,
    C3,
    Neutral,
}

impl Group {
    /// Canonical output order.
    pub const ALL: [Group; 4] = [Group::C1, Group::C2, Group::C3, Group::Neutral];

    /// Key used in custom properties and token paths.
    pub const fn key(self) -> &'static str {
        match self {
            Group::C1 => "c1",
            Group::C2 => "c2",
            Group::C3 => "c3",
            Group::Neutral => "neutral",
        }
    }

    pub fn from_key(key: &str) -> Option<Group> {
        Group::ALL.into_iter().find(|g| g.key() == key)
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// How the neutral ramp is derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaletteOptions {
    /// Build the neutral from `neutral_manual` instead of tinted gray.
    pub neutral_unlocked: bool,
    pub neutral_manual: Option<HexColor>,
    /// Weight of brand color 1's base in the locked neutral, 0.0–1.0.
    pub tint_fraction: f64,
}

impl Default for PaletteOptions {
    fn default() -> Self {
        Self {
            neutral_unlocked: false,
            neutral_manual: None,
            tint_fraction: DEFAULT_TINT_FRACTION,
        }
    }
}

impl PaletteOptions {
    /// Manual neutral base, if unlocked and one was supplied.
    pub fn manual_neutral(&self) -> Option<HexColor> {
        if self.neutral_unlocked {
            self.neutral_manual
        } else {
            None
        }
    }
}

/// Four ramps built from user-picked bases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub c1: Ramp,
    pub c2: Ramp,
    pub c3: Ramp,
    pub neutral: Ramp,
}

impl Palette {
    pub fn ramp(&self, group: Group) -> &Ramp {
        match group {
            Group::C1 => &self.c1,
            Group::C2 => &self.c2,
            Group::C3 => &self.c3,
            Group::Neutral => &self.neutral,
        }
    }

    /// Step-500 color of a group.
    pub fn base(&self, group: Group) -> HexColor {
        self.ramp(group).base()
    }

    /// All 48 entries in canonical order: groups c1, c2, c3, neutral, steps ascending.
    pub fn entries(&self) -> impl Iterator<Item = (Group, Step, HexColor)> + '_ {
        Group::ALL
            .into_iter()
            .flat_map(move |g| self.ramp(g).iter().map(move |(s, c)| (g, s, c)))
    }

    /// Compact single-line custom-property block.
    ///
    /// `:root{--c1-25:#rrggbb;…;--neutral-950:#rrggbb;}`. Downstream parsers
    /// scan this with a regex, so the exact layout matters.
    pub fn css(&self) -> String {
        let mut out = String::with_capacity(1000);
        out.push_str(":root{");
        for (group, step, color) in self.entries() {
            let _ = write!(out, "--{group}-{step}:{color};");
        }
        out.push('}');
        out
    }
}

/// Build the palette for three brand bases.
pub fn build_palette(c1: &str, c2: &str, c3: &str, options: &PaletteOptions) -> Palette {
    build_palette_from(normalize(c1), normalize(c2), normalize(c3), options)
}

/// [`build_palette`] for already-normalized colors.
pub fn build_palette_from(
    c1: HexColor,
    c2: HexColor,
    c3: HexColor,
    options: &PaletteOptions,
) -> Palette {
    let c1 = ramp_from(c1);
    let neutral = match options.manual_neutral() {
        Some(base) => ramp_from(base),
        None => {
            let tint = c1.base();
            ramp_from(NEUTRAL_GRAY).map(|gray| mix(gray, tint, options.tint_fraction))
        }
    };

    Palette {
        c1,
        c2: ramp_from(c2),
        c3: ramp_from(c3),
        neutral,
    }
}
