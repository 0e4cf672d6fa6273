//! 12-step tonal ramps.
//!
//! Lighter steps mix the base toward white and darker steps toward black
//! with fixed per-step weights. Step 500 is always the base itself.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::color::{mix, normalize, HexColor};

/// Position on the lightness scale, lightest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum Step {
    S25,
    S50,
    S100,
    S200,
    S300,
    S400,
    S500,
    S600,
    S700,
    S800,
    S900,
    S950,
}

impl Step {
    /// All steps in ascending order.
    pub const ALL: [Step; 12] = [
        Step::S25,
        Step::S50,
        Step::S100,
        Step::S200,
        Step::S300,
        Step::S400,
        Step::S500,
        Step::S600,
        Step::S700,
        Step::S800,
        Step::S900,
        Step::S950,
    ];

    /// Numeric key (25, 50, …, 950).
    pub const fn value(self) -> u16 {
        match self {
            Step::S25 => 25,
            Step::S50 => 50,
            Step::S100 => 100,
            Step::S200 => 200,
            Step::S300 => 300,
            Step::S400 => 400,
            Step::S500 => 500,
            Step::S600 => 600,
            Step::S700 => 700,
            Step::S800 => 800,
            Step::S900 => 900,
            Step::S950 => 950,
        }
    }

    pub fn from_value(value: u16) -> Option<Step> {
        Step::ALL.into_iter().find(|s| s.value() == value)
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Mix target and weight used to derive this step from the base.
    ///
    /// `None` for 500, which is the base unchanged.
    fn derivation(self) -> Option<(HexColor, f64)> {
        let w = HexColor::WHITE;
        let k = HexColor::BLACK;
        match self {
            Step::S25 => Some((w, 0.92)),
            Step::S50 => Some((w, 0.85)),
            Step::S100 => Some((w, 0.75)),
            Step::S200 => Some((w, 0.60)),
            Step::S300 => Some((w, 0.45)),
            Step::S400 => Some((w, 0.30)),
            Step::S500 => None,
            Step::S600 => Some((k, 0.16)),
            Step::S700 => Some((k, 0.30)),
            Step::S800 => Some((k, 0.45)),
            Step::S900 => Some((k, 0.60)),
            Step::S950 => Some((k, 0.75)),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl From<Step> for u16 {
    fn from(step: Step) -> u16 {
        step.value()
    }
}

impl TryFrom<u16> for Step {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Step::from_value(value).ok_or_else(|| format!("unknown ramp step {value}"))
    }
}

/// A full scale: one color per [`Step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ramp {
    colors: [HexColor; 12],
}

impl Ramp {
    pub fn get(&self, step: Step) -> HexColor {
        self.colors[step.index()]
    }

    /// The color the ramp was built from.
    pub fn base(&self) -> HexColor {
        self.get(Step::S500)
    }

    /// `(step, color)` pairs, lightest first.
    pub fn iter(&self) -> impl Iterator<Item = (Step, HexColor)> + '_ {
        Step::ALL.into_iter().map(move |s| (s, self.get(s)))
    }

    /// Apply `f` to every step, keeping step positions.
    pub fn map(&self, mut f: impl FnMut(HexColor) -> HexColor) -> Ramp {
        let mut colors = self.colors;
        for c in colors.iter_mut() {
            *c = f(*c);
        }
        Ramp { colors }
    }
}

impl Index<Step> for Ramp {
    type Output = HexColor;

    fn index(&self, step: Step) -> &HexColor {
        &self.colors[step.index()]
    }
}

/// Derive the 12-step ramp for an already-normalized base.
pub fn ramp_from(base: HexColor) -> Ramp {
    let mut colors = [base; 12];
    for step in Step::ALL {
        if let Some((target, weight)) = step.derivation() {
            colors[step.index()] = mix(base, target, weight);
        }
    }
    Ramp { colors }
}

/// Normalize `base` and derive its ramp.
pub fn build_ramp(base: &str) -> Ramp {
    ramp_from(normalize(base))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_values_ascend() {
        let values: Vec<u16> = Step::ALL.iter().map(|s| s.value()).collect();
        assert_eq!(
            values,
            vec![25, 50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950]
        );
        assert_eq!(Step::from_value(950), Some(Step::S950));
        assert_eq!(Step::from_value(1000), None);
    }

    #[test]
    fn base_is_identity() {
        let ramp = build_ramp("#639720");
        assert_eq!(ramp[Step::S500].to_hex(), "#639720");
        assert_eq!(ramp.base(), normalize("#639720"));
    }

    #[test]
    fn darkest_step_matches_mix() {
        let ramp = build_ramp("#639720");
        assert_eq!(
            ramp[Step::S950],
            mix(normalize("#639720"), HexColor::BLACK, 0.75)
        );
        assert_eq!(ramp[Step::S950].to_hex(), "#192608");
    }

    #[test]
    fn lightest_step_matches_mix() {
        let ramp = build_ramp("#639720");
        assert_eq!(
            ramp[Step::S25],
            mix(normalize("#639720"), HexColor::WHITE, 0.92)
        );
    }

    #[test]
    fn gray_ramp() {
        let ramp = build_ramp("#808080");
        let hex: Vec<String> = ramp.iter().map(|(_, c)| c.to_hex()).collect();
        assert_eq!(
            hex,
            vec![
                "#f5f5f5", "#ececec", "#dfdfdf", "#cccccc", "#b9b9b9", "#a6a6a6", "#808080",
                "#6c6c6c", "#5a5a5a", "#464646", "#333333", "#202020",
            ]
        );
    }

    #[test]
    fn malformed_base_builds_black_ramp() {
        let ramp = build_ramp("#12");
        assert_eq!(ramp.base(), HexColor::BLACK);
        assert_eq!(ramp[Step::S25].to_hex(), "#ebebeb");
        assert_eq!(ramp[Step::S950], HexColor::BLACK);
    }

    #[test]
    fn step_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Step::S100).unwrap(), "100");
        let s: Step = serde_json::from_str("700").unwrap();
        assert_eq!(s, Step::S700);
        assert!(serde_json::from_str::<Step>("701").is_err());
    }
}
