use serde::Serialize;

use crate::model::landmarks::{POSE_CONNECTIONS, Pose};

pub const LANDMARK_RADIUS: f64 = 3.0;
pub const LANDMARK_COLOR: &str = "#5ad8ff";
pub const CONNECTOR_COLOR: &str = "#73ffbf";
pub const CONNECTOR_WIDTH: f64 = 2.0;

/// Drawing parameters, written once at the head of `overlay.jsonl`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverlayStyle {
    pub landmark_radius: f64,
    pub landmark_color: &'static str,
    pub connector_color: &'static str,
    pub connector_width: f64,
}

pub const DEFAULT_STYLE: OverlayStyle = OverlayStyle {
    landmark_radius: LANDMARK_RADIUS,
    landmark_color: LANDMARK_COLOR,
    connector_color: CONNECTOR_COLOR,
    connector_width: CONNECTOR_WIDTH,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverlayPoint {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub visibility: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverlaySegment {
    pub from: usize,
    pub to: usize,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoseOverlay {
    pub points: Vec<OverlayPoint>,
    pub segments: Vec<OverlaySegment>,
}

/// Canvas contents for one frame. Coordinates are in pixels when the frame
/// size is known, otherwise normalised.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Overlay {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub poses: Vec<PoseOverlay>,
}

impl Overlay {
    pub fn cleared(width: Option<u32>, height: Option<u32>) -> Self {
        Self {
            width,
            height,
            poses: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }
}

pub fn build_overlay(poses: &[Pose], width: Option<u32>, height: Option<u32>) -> Overlay {
    let sx = width.map(f64::from).unwrap_or(1.0);
    let sy = height.map(f64::from).unwrap_or(1.0);

    let mut out = Overlay::cleared(width, height);
    for pose in poses {
        let mut points = Vec::with_capacity(pose.len());
        for (index, lm) in pose.iter().enumerate() {
            if let Some(lm) = lm {
                if lm.x.is_finite() && lm.y.is_finite() {
                    points.push(OverlayPoint {
                        index,
                        x: lm.x * sx,
                        y: lm.y * sy,
                        visibility: lm.visibility,
                    });
                }
            }
        }

        let mut segments = Vec::new();
        for &(from, to) in POSE_CONNECTIONS.iter() {
            let a = points.iter().find(|p| p.index == from);
            let b = points.iter().find(|p| p.index == to);
            if let (Some(a), Some(b)) = (a, b) {
                segments.push(OverlaySegment {
                    from,
                    to,
                    x1: a.x,
                    y1: a.y,
                    x2: b.x,
                    y2: b.y,
                });
            }
        }

        out.poses.push(PoseOverlay { points, segments });
    }
    out
}
