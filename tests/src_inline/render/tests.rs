use super::overlay::{DEFAULT_STYLE, LANDMARK_COLOR, build_overlay};
use super::*;
use crate::model::advice::Advice;
use crate::test_support::{make_temp_dir, sample_pose, without};

#[test]
fn test_overlay_scales_to_frame_size() {
    let overlay = build_overlay(&[sample_pose()], Some(1280), Some(720));
    assert_eq!(overlay.poses.len(), 1);
    let pose = &overlay.poses[0];
    assert_eq!(pose.points.len(), 33);
    let shoulder = pose.points.iter().find(|p| p.index == 11).unwrap();
    assert!((shoulder.x - 512.0).abs() < 1e-9);
    assert!((shoulder.y - 216.0).abs() < 1e-9);
    assert_eq!(pose.segments.len(), 35);
}

#[test]
fn test_overlay_skips_segments_with_missing_endpoint() {
    let overlay = build_overlay(&[without(sample_pose(), 13)], None, None);
    let pose = &overlay.poses[0];
    assert_eq!(pose.points.len(), 32);
    assert!(pose.segments.iter().all(|s| s.from != 13 && s.to != 13));
    // (11,13) and (13,15) are gone.
    assert_eq!(pose.segments.len(), 33);
    let wrist = pose.points.iter().find(|p| p.index == 15).unwrap();
    assert_eq!(wrist.x, 0.2);
}

#[test]
fn test_empty_detection_clears_overlay() {
    let overlay = build_overlay(&[], Some(640), Some(480));
    assert!(overlay.is_empty());
    assert_eq!(overlay.width, Some(640));
}

#[test]
fn test_overlay_style_constants() {
    assert_eq!(DEFAULT_STYLE.landmark_color, LANDMARK_COLOR);
    assert_eq!(DEFAULT_STYLE.connector_color, "#73ffbf");
    assert_eq!(DEFAULT_STYLE.landmark_radius, 3.0);
}

#[test]
fn test_recording_sink_streams_overlay() {
    let dir = make_temp_dir("sink");
    let path = dir.join("nested").join("overlay.jsonl");
    let mut sink = RecordingSink::new().with_overlay_file(&path).unwrap();

    let frame = FrameRender {
        frame_index: 4,
        timestamp_ms: 132.0,
        outcome: FrameOutcome::Scored,
        n_poses: 1,
        overlay: build_overlay(&[sample_pose()], None, None),
        scores: None,
        display: None,
        advice: vec![Advice::GoodRhythm],
        tips: FrameRender::tips_for(&[Advice::GoodRhythm], Locale::En),
    };
    sink.render(&frame).unwrap();
    sink.status(&SessionStatus::Stopped, "Analysis stopped.");
    sink.finish().unwrap();

    assert_eq!(sink.frames.len(), 1);
    assert_eq!(sink.last_status(), Some(&SessionStatus::Stopped));

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    let header: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(header["style"]["connector_width"], 2.0);
    let value: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(value["frame"], 4);
    assert_eq!(value["outcome"], "scored");
    assert_eq!(value["overlay"]["poses"][0]["points"][11]["index"], 11);
}
