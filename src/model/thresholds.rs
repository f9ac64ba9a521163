use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::input::InputError;

/// Scoring constants. The gains and the hip target are empirical and kept
/// exactly as calibrated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringProfile {
    pub stability_gain: f64,
    pub coordination_gain: f64,
    pub hip_extension_gain: f64,
    pub hip_to_shoulder_target: f64,
    pub advice_threshold: f64,
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self::default_v1()
    }
}

impl ScoringProfile {
    pub fn default_v1() -> Self {
        Self {
            stability_gain: 180.0,
            coordination_gain: 260.0,
            hip_extension_gain: 240.0,
            hip_to_shoulder_target: 0.2,
            advice_threshold: 65.0,
        }
    }

    /// Reads a JSON profile; missing fields fall back to `default_v1`.
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let text = std::fs::read_to_string(path)?;
        let profile: ScoringProfile =
            serde_json::from_str(&text).map_err(|e| InputError::Parse {
                line: e.line(),
                message: e.to_string(),
            })?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<(), InputError> {
        let fields = [
            ("stability_gain", self.stability_gain),
            ("coordination_gain", self.coordination_gain),
            ("hip_extension_gain", self.hip_extension_gain),
            ("hip_to_shoulder_target", self.hip_to_shoulder_target),
            ("advice_threshold", self.advice_threshold),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(InputError::InvalidInput(format!(
                    "profile field {name} must be finite"
                )));
            }
        }
        Ok(())
    }
}
