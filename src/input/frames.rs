use serde::Deserialize;

use crate::input::InputError;
use crate::model::landmarks::{POSE_LANDMARK_COUNT, Pose};

/// One line of a recorded landmark stream.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecordedFrame {
    #[serde(alias = "timestamp_ms")]
    pub t: f64,
    /// Mirrors the video element's ready state; unready frames skip detection.
    #[serde(default = "default_ready")]
    pub ready: bool,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub poses: Vec<Pose>,
}

fn default_ready() -> bool {
    true
}

pub fn parse_frame_line(line: &str, line_no: usize) -> Result<RecordedFrame, InputError> {
    let frame: RecordedFrame = serde_json::from_str(line).map_err(|e| InputError::Parse {
        line: line_no,
        message: e.to_string(),
    })?;
    if !frame.t.is_finite() {
        return Err(InputError::Parse {
            line: line_no,
            message: "timestamp must be finite".to_string(),
        });
    }
    if let Some(pose) = frame.poses.iter().find(|p| p.len() > POSE_LANDMARK_COUNT) {
        return Err(InputError::Parse {
            line: line_no,
            message: format!(
                "pose has {} landmarks, expected at most {}",
                pose.len(),
                POSE_LANDMARK_COUNT
            ),
        });
    }
    Ok(frame)
}
