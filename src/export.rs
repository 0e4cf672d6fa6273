//! Stylesheet exporters and the parser for the compact preview block.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::OnceLock;

use regex::Regex;

use crate::color::{normalize, HexColor};
use crate::palette::{Group, Palette};
use crate::ramp::Step;

/// Output flavor of the export panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// One `--group-step: #hex;` declaration per line.
    Css,
    /// HSL base per group plus relative-color deltas per step.
    Calc,
    /// `$group-step: #HEX;` variables.
    Scss,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Css, ExportFormat::Calc, ExportFormat::Scss];

    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Css => "CSS",
            ExportFormat::Calc => "CALCSS",
            ExportFormat::Scss => "SCSS",
        }
    }

    pub fn render(self, palette: &Palette) -> String {
        match self {
            ExportFormat::Css => flat_css(palette),
            ExportFormat::Calc => calc_css(palette),
            ExportFormat::Scss => scss(palette),
        }
    }
}

/// Multi-line `:root { … }` block with literal hex values.
pub fn flat_css(palette: &Palette) -> String {
    let mut lines = vec![":root {".to_string()];
    for (group, step, color) in palette.entries() {
        lines.push(format!("  --{group}-{step}: {color};"));
    }
    lines.push("}".to_string());
    lines.join("\n")
}

/// Themeable form: each group's base as an HSL triple, each step as a
/// saturation/lightness offset from it. Hue is never shifted.
pub fn calc_css(palette: &Palette) -> String {
    let mut out = String::new();
    out.push_str(":root {\n");
    for group in Group::ALL {
        let base = palette.base(group).to_hsl();
        let _ = writeln!(out, "  --{group}-base: {} {}% {}%;", base.h, base.s, base.l);
    }
    out.push('\n');

    for group in Group::ALL {
        let base = palette.base(group).to_hsl();
        for (step, color) in palette.ramp(group).iter() {
            let hsl = color.to_hsl();
            let ds = (hsl.s - base.s).clamp(-100, 100);
            let dl = (hsl.l - base.l).clamp(-100, 100);
            let _ = writeln!(
                out,
                "  --{group}-{step}: hsl(from hsl(var(--{group}-base)) h calc(s + {ds}) calc(l + {dl}));"
            );
        }
        out.push('\n');
    }
    out.push('}');
    out
}

/// SCSS variables with upper-case hex, one commented block per group.
pub fn scss(palette: &Palette) -> String {
    let mut lines = Vec::with_capacity(56);
    for group in Group::ALL {
        lines.push(format!("// {}", group.key().to_uppercase()));
        for (step, color) in palette.ramp(group).iter() {
            lines.push(format!("${group}-{step}: {};", color.to_hex_upper()));
        }
        lines.push(String::new());
    }
    lines.join("\n")
}

/// Entries recovered from a custom-property block, in canonical order.
pub type ParsedPalette = BTreeMap<(Group, Step), HexColor>;

fn declaration_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"--(c1|c2|c3|neutral)-(\d{2,3}):\s*(#[0-9a-fA-F]{6})")
            .unwrap_or_else(|e| unreachable!("static pattern: {e}"))
    })
}

/// Scan `css` for `--group-step: #rrggbb` declarations.
///
/// Later declarations of the same entry win. Steps outside the 12-step
/// scale are skipped.
pub fn parse_css(css: &str) -> ParsedPalette {
    let mut out = BTreeMap::new();
    for caps in declaration_re().captures_iter(css) {
        let Some(group) = Group::from_key(&caps[1]) else {
            continue;
        };
        let Some(step) = caps[2].parse::<u16>().ok().and_then(Step::from_value) else {
            continue;
        };
        out.insert((group, step), normalize(&caps[3]));
    }
    out
}
