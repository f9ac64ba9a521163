use super::*;
use crate::model::thresholds::ScoringProfile;
use crate::report::{FrameCounts, ToolMeta, named_stats};

#[test]
fn test_summary_json_keys() {
    let data = SummaryData {
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
            ticks: 2,
            rendered: 2,
            scored: 2,
            retained: 0,
            no_pose: 0,
            not_ready: 0,
            dropped: 0,
            abandoned: 0,
        },
        scores: vec![named_stats("stability", &[100.0, 90.0])],
        advice: Vec::new(),
        missing_landmarks: vec![("left_wrist".to_string(), 1)],
        last: None,
    };
    let json = render_summary_json(&data).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["tool"]["name"], "climb-posecoach");
    assert_eq!(value["profile"]["stability_gain"], 180.0);
    assert_eq!(value["frames"]["scored"], 2);
    assert_eq!(value["scores"][0]["name"], "stability");
    assert_eq!(value["missing_landmarks"][0][0], "left_wrist");
    assert!(value["last"].is_null());
}
