use serde::{Deserialize, Serialize};

/// Number of landmarks in one BlazePose / MediaPipe pose.
pub const POSE_LANDMARK_COUNT: usize = 33;

pub const LEFT_SHOULDER: usize = 11;
pub const RIGHT_SHOULDER: usize = 12;
pub const LEFT_ELBOW: usize = 13;
pub const RIGHT_ELBOW: usize = 14;
pub const LEFT_WRIST: usize = 15;
pub const RIGHT_WRIST: usize = 16;
pub const LEFT_HIP: usize = 23;
pub const RIGHT_HIP: usize = 24;
pub const LEFT_KNEE: usize = 25;
pub const RIGHT_KNEE: usize = 26;
pub const LEFT_ANKLE: usize = 27;
pub const RIGHT_ANKLE: usize = 28;

/// Skeleton edges drawn by the overlay (MediaPipe POSE_CONNECTIONS).
pub const POSE_CONNECTIONS: [(usize, usize); 35] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 7),
    (0, 4),
    (4, 5),
    (5, 6),
    (6, 8),
    (9, 10),
    (11, 12),
    (11, 13),
    (13, 15),
    (15, 17),
    (15, 19),
    (15, 21),
    (17, 19),
    (12, 14),
    (14, 16),
    (16, 18),
    (16, 20),
    (16, 22),
    (18, 20),
    (11, 23),
    (12, 24),
    (23, 24),
    (23, 25),
    (24, 26),
    (25, 27),
    (26, 28),
    (27, 29),
    (28, 30),
    (29, 31),
    (30, 32),
    (27, 31),
    (28, 32),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default = "default_visibility")]
    pub visibility: f64,
}

fn default_visibility() -> f64 {
    1.0
}

impl Landmark {
    #[cfg(test)]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            visibility: 1.0,
        }
    }

    pub fn point(&self) -> Point2 {
        Point2 {
            x: self.x,
            y: self.y,
        }
    }
}

/// One detected person. Entries may be `None` when the source omitted them.
pub type Pose = Vec<Option<Landmark>>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn midpoint(a: Point2, b: Point2) -> Point2 {
        Point2 {
            x: (a.x + b.x) / 2.0,
            y: (a.y + b.y) / 2.0,
        }
    }

    pub fn distance(a: Point2, b: Point2) -> f64 {
        (a.x - b.x).hypot(a.y - b.y)
    }
}

pub fn landmark_name(index: usize) -> &'static str {
    match index {
        LEFT_SHOULDER => "left_shoulder",
        RIGHT_SHOULDER => "right_shoulder",
        LEFT_ELBOW => "left_elbow",
        RIGHT_ELBOW => "right_elbow",
        LEFT_WRIST => "left_wrist",
        RIGHT_WRIST => "right_wrist",
        LEFT_HIP => "left_hip",
        RIGHT_HIP => "right_hip",
        LEFT_KNEE => "left_knee",
        RIGHT_KNEE => "right_knee",
        LEFT_ANKLE => "left_ankle",
        RIGHT_ANKLE => "right_ankle",
        _ => "landmark",
    }
}
