use super::*;
use crate::model::thresholds::ScoringProfile;
use crate::report::{FrameCounts, LastFrame, ToolMeta, named_stats};

fn summary(scored: u64) -> SummaryData {
    SummaryData {
        tool: ToolMeta {
            name: "climb-posecoach".to_string(),
            version: "0.1.0".to_string(),
        },
        source: "frames.jsonl".to_string(),
        locale: "en".to_string(),
        profile: ScoringProfile::default_v1(),
        status: "stopped".to_string(),
        status_text: "Analysis stopped.".to_string(),
        frames: FrameCounts {
            ticks: 3,
            rendered: 3,
            scored,
            retained: 0,
            no_pose: 0,
            not_ready: 0,
            dropped: 0,
            abandoned: 0,
        },
        scores: vec![
            named_stats("stability", &[90.0, 95.0, 99.0]),
            named_stats("coordination", &[40.0, 50.0, 70.0, 80.0, 90.0]),
            named_stats("hip_extension", &[10.0, 20.0, 30.0]),
        ],
        advice: vec![
            AdviceStat {
                code: "LIMB_SYNC",
                count: 1,
                fraction: 1.0 / 3.0,
            },
            AdviceStat {
                code: "HIP_ROTATION",
                count: 3,
                fraction: 1.0,
            },
        ],
        missing_landmarks: vec![("left_ankle".to_string(), 2)],
        last: Some(LastFrame {
            frame: 2,
            stability: "99%".to_string(),
            coordination: "80%".to_string(),
            hip_extension: "30%".to_string(),
            tips: vec!["turn the hip in".to_string()],
        }),
    }
}

#[test]
fn test_report_sections() {
    let text = render_report_text(&summary(3));
    assert!(text.starts_with("Climbing Posture Coaching Report\n"));
    assert!(text.contains("1. Session\n"));
    assert!(text.contains("stability: median 95.000 (p10 95.000, p90 99.000); consistently above threshold"));
    assert!(text.contains("coordination: median 70.000"));
    assert!(text.contains("mostly above threshold with weak moments"));
    assert!(text.contains("hip_extension: median 20.000 (p10 20.000, p90 30.000); below threshold for most frames"));
    assert!(text.contains("Most frequent: HIP_ROTATION (1.000)"));
    assert!(text.contains("- turn the hip in\n"));
    assert!(text.contains("left_ankle missing in 2 poses"));
}

#[test]
fn test_report_without_scored_frames() {
    let mut data = summary(0);
    data.advice.clear();
    data.missing_landmarks.clear();
    data.last = None;
    let text = render_report_text(&data);
    assert!(text.contains("No frame produced a complete pose."));
    assert!(text.contains("No tips were issued."));
    assert!(text.contains("All detected poses carried the required joints."));
}
