use crate::model::landmarks::{Point2, Pose};
use crate::model::scores::ScoreSet;
use crate::model::thresholds::ScoringProfile;
use crate::pipeline::stage1_validate::{PoseError, ValidatedPose};

/// Intermediate geometry, kept for debug logging and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseGeometry {
    pub shoulder_center: Point2,
    pub hip_center: Point2,
    pub feet_center_x: f64,
    pub center_offset: f64,
    pub hand_spread: f64,
    pub foot_spread: f64,
    pub hip_to_shoulder: f64,
}

pub fn pose_geometry(pose: &ValidatedPose) -> PoseGeometry {
    let shoulder_center = Point2::midpoint(pose.left_shoulder, pose.right_shoulder);
    let hip_center = Point2::midpoint(pose.left_hip, pose.right_hip);
    let feet_center_x = (pose.left_ankle.x + pose.right_ankle.x) / 2.0;

    PoseGeometry {
        shoulder_center,
        hip_center,
        feet_center_x,
        center_offset: (hip_center.x - feet_center_x).abs(),
        hand_spread: Point2::distance(pose.left_wrist, pose.right_wrist),
        foot_spread: Point2::distance(pose.left_ankle, pose.right_ankle),
        hip_to_shoulder: (hip_center.y - shoulder_center.y).abs(),
    }
}

pub fn score_geometry(geometry: &PoseGeometry, profile: &ScoringProfile) -> ScoreSet {
    let stability = 100.0 - geometry.center_offset * profile.stability_gain;

    let spread_diff = (geometry.hand_spread - geometry.foot_spread).abs();
    let coordination = 100.0 - spread_diff * profile.coordination_gain;

    let hip_extension = 100.0
        - (profile.hip_to_shoulder_target - geometry.hip_to_shoulder).abs()
            * profile.hip_extension_gain;

    ScoreSet {
        stability,
        coordination,
        hip_extension,
    }
}

/// Scores plus the geometry they were derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub geometry: PoseGeometry,
    pub scores: ScoreSet,
}

/// Validates then scores; a pose lacking a required joint yields `PoseError`.
pub fn evaluate_pose(pose: &Pose, profile: &ScoringProfile) -> Result<Evaluation, PoseError> {
    let validated = ValidatedPose::from_pose(pose)?;
    let geometry = pose_geometry(&validated);
    Ok(Evaluation {
        geometry,
        scores: score_geometry(&geometry, profile),
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_score.rs"]
mod tests;
