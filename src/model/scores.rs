use serde::Serialize;

/// Raw per-frame scores. Values are unbounded; clamp only for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreSet {
    pub stability: f64,
    pub coordination: f64,
    pub hip_extension: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayScores {
    pub stability: String,
    pub coordination: String,
    pub hip_extension: String,
}

impl ScoreSet {
    pub fn display(&self) -> DisplayScores {
        DisplayScores {
            stability: to_percent(self.stability),
            coordination: to_percent(self.coordination),
            hip_extension: to_percent(self.hip_extension),
        }
    }

    #[cfg(test)]
    pub fn clamped(&self) -> [u8; 3] {
        [
            clamp_percent(self.stability),
            clamp_percent(self.coordination),
            clamp_percent(self.hip_extension),
        ]
    }
}

/// Rounds half up (like `Math.round`) and clamps to 0..=100.
pub fn clamp_percent(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    let rounded = (value + 0.5).floor();
    if rounded < 0.0 {
        0
    } else if rounded > 100.0 {
        100
    } else {
        rounded as u8
    }
}

pub fn to_percent(value: f64) -> String {
    format!("{}%", clamp_percent(value))
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/scores.rs"]
mod tests;
