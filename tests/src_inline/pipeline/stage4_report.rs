use super::*;
use crate::model::scores::ScoreSet;
use crate::render::overlay::Overlay;
use crate::test_support::make_temp_dir;

fn render(index: u64, outcome: FrameOutcome, scores: Option<ScoreSet>, advice: Vec<Advice>) -> FrameRender {
    FrameRender {
        frame_index: index,
        timestamp_ms: index as f64 * 16.0,
        outcome,
        n_poses: if outcome == FrameOutcome::NoPose { 0 } else { 1 },
        overlay: Overlay::default(),
        display: scores.as_ref().map(ScoreSet::display),
        tips: FrameRender::tips_for(&advice, Locale::En),
        scores,
        advice,
    }
}

fn frames() -> Vec<FrameRender> {
    let a = ScoreSet {
        stability: 100.0,
        coordination: -30.0,
        hip_extension: 100.0,
    };
    let b = ScoreSet {
        stability: 50.0,
        coordination: 80.0,
        hip_extension: 50.0,
    };
    vec![
        render(0, FrameOutcome::Scored, Some(a), vec![Advice::LimbSync]),
        render(
            1,
            FrameOutcome::Scored,
            Some(b),
            vec![Advice::BalanceCorrection, Advice::HipRotation],
        ),
        render(
            2,
            FrameOutcome::Retained,
            Some(b),
            vec![Advice::BalanceCorrection, Advice::HipRotation],
        ),
        render(3, FrameOutcome::NoPose, None, Vec::new()),
    ]
}

fn stats() -> SessionStats {
    let mut stats = SessionStats {
        ticks: 4,
        scored: 2,
        retained: 1,
        no_pose: 1,
        ..SessionStats::default()
    };
    stats.missing_landmarks.insert(24, 1);
    stats
}

fn input<'a>(
    frames: &'a [FrameRender],
    stats: &'a SessionStats,
    profile: &'a ScoringProfile,
) -> ReportInput<'a> {
    ReportInput {
        frames,
        stats,
        status: &SessionStatus::Stopped,
        locale: Locale::En,
        profile,
        source: "frames.jsonl".to_string(),
        tool_name: "climb-posecoach".to_string(),
        tool_version: "0.1.0".to_string(),
    }
}

#[test]
fn test_write_reports_creates_files() {
    let dir = make_temp_dir("report").join("out");
    let frames = frames();
    let stats = stats();
    let profile = ScoringProfile::default_v1();
    write_reports(&input(&frames, &stats, &profile), &dir).unwrap();

    assert!(dir.join("frames.tsv").is_file());
    assert!(dir.join("summary.json").is_file());
    assert!(dir.join("report.txt").is_file());
}

#[test]
fn test_frames_tsv_rows() {
    let dir = make_temp_dir("tsv");
    let frames = frames();
    let stats = stats();
    let profile = ScoringProfile::default_v1();
    write_reports(&input(&frames, &stats, &profile), &dir).unwrap();

    let text = std::fs::read_to_string(dir.join("frames.tsv")).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("frame\tt_ms\toutcome"));

    let row0: Vec<&str> = lines[1].split('\t').collect();
    assert_eq!(row0.len(), 11);
    assert_eq!(row0[2], "scored");
    assert_eq!(row0[5], "-30.000");
    assert_eq!(row0[8], "0%");
    assert_eq!(row0[10], "LIMB_SYNC");

    let row1: Vec<&str> = lines[2].split('\t').collect();
    assert_eq!(row1[10], "BALANCE_CORRECTION;HIP_ROTATION");

    let row3: Vec<&str> = lines[4].split('\t').collect();
    assert_eq!(row3[2], "no_pose");
    assert_eq!(row3[4], "NA");
    assert_eq!(row3[10], "NA");
}

#[test]
fn test_summary_counts_only_scored_frames() {
    let frames = frames();
    let stats = stats();
    let profile = ScoringProfile::default_v1();
    let summary = build_summary(&input(&frames, &stats, &profile));

    assert_eq!(summary.frames.rendered, 4);
    assert_eq!(summary.frames.scored, 2);
    assert_eq!(summary.status, "stopped");
    assert_eq!(summary.status_text, "Analysis stopped.");

    let stability = &summary.scores[0];
    assert_eq!(stability.name, "stability");
    assert_eq!(stability.min, 50.0);
    assert_eq!(stability.max, 100.0);

    let codes: Vec<&str> = summary.advice.iter().map(|a| a.code).collect();
    assert_eq!(codes, vec!["BALANCE_CORRECTION", "LIMB_SYNC", "HIP_ROTATION"]);
    assert!(summary.advice.iter().all(|a| a.count == 1));
    assert!((summary.advice[0].fraction - 0.5).abs() < 1e-12);

    assert_eq!(
        summary.missing_landmarks,
        vec![("right_hip".to_string(), 1)]
    );

    let last = summary.last.unwrap();
    assert_eq!(last.frame, 2);
    assert_eq!(last.stability, "50%");
    assert_eq!(last.tips.len(), 2);
}

#[test]
fn test_summary_without_scored_frames() {
    let frames = vec![render(0, FrameOutcome::NoPose, None, Vec::new())];
    let stats = SessionStats::default();
    let profile = ScoringProfile::default_v1();
    let summary = build_summary(&input(&frames, &stats, &profile));
    assert!(summary.advice.is_empty());
    assert!(summary.last.is_none());
    assert_eq!(summary.scores[1].median, 0.0);
}
