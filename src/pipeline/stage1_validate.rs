use thiserror::Error;

use crate::model::landmarks::{
    LEFT_ANKLE, LEFT_HIP, LEFT_SHOULDER, LEFT_WRIST, Point2, Pose, RIGHT_ANKLE, RIGHT_HIP,
    RIGHT_SHOULDER, RIGHT_WRIST, landmark_name,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PoseError {
    #[error("pose is missing landmark {index} ({name})")]
    MissingLandmark { index: usize, name: &'static str },
    #[error("landmark {index} ({name}) has non-finite coordinates")]
    NonFinite { index: usize, name: &'static str },
}

/// The eight joints the scorer reads, checked present and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedPose {
    pub left_shoulder: Point2,
    pub right_shoulder: Point2,
    pub left_wrist: Point2,
    pub right_wrist: Point2,
    pub left_hip: Point2,
    pub right_hip: Point2,
    pub left_ankle: Point2,
    pub right_ankle: Point2,
}

impl ValidatedPose {
    pub fn from_pose(pose: &Pose) -> Result<Self, PoseError> {
        Ok(Self {
            left_shoulder: required(pose, LEFT_SHOULDER)?,
            right_shoulder: required(pose, RIGHT_SHOULDER)?,
            left_wrist: required(pose, LEFT_WRIST)?,
            right_wrist: required(pose, RIGHT_WRIST)?,
            left_hip: required(pose, LEFT_HIP)?,
            right_hip: required(pose, RIGHT_HIP)?,
            left_ankle: required(pose, LEFT_ANKLE)?,
            right_ankle: required(pose, RIGHT_ANKLE)?,
        })
    }
}

fn required(pose: &Pose, index: usize) -> Result<Point2, PoseError> {
    let name = landmark_name(index);
    let landmark = pose
        .get(index)
        .copied()
        .flatten()
        .ok_or(PoseError::MissingLandmark { index, name })?;
    if !landmark.x.is_finite() || !landmark.y.is_finite() {
        return Err(PoseError::NonFinite { index, name });
    }
    Ok(landmark.point())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_validate.rs"]
mod tests;
