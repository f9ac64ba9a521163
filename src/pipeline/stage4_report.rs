use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::model::advice::{Advice, advice_order};
use crate::model::landmarks::landmark_name;
use crate::model::locale::Locale;
use crate::model::scores::ScoreSet;
use crate::model::thresholds::ScoringProfile;
use crate::render::FrameRender;
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{
    AdviceStat, FrameCounts, LastFrame, SummaryData, ToolMeta, format_f64_3, named_stats,
};
use crate::session::{FrameOutcome, SessionStats, SessionStatus};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct ReportInput<'a> {
    pub frames: &'a [FrameRender],
    pub stats: &'a SessionStats,
    pub status: &'a SessionStatus,
    pub locale: Locale,
    pub profile: &'a ScoringProfile,
    pub source: String,
    pub tool_name: String,
    pub tool_version: String,
}

pub fn write_reports(input: &ReportInput<'_>, out_dir: &Path) -> Result<(), ReportError> {
    fs::create_dir_all(out_dir)?;

    write_frames_tsv(input, &out_dir.join("frames.tsv"))?;

    let summary = build_summary(input);
    let json = render_summary_json(&summary)?;
    write_text(&out_dir.join("summary.json"), &json)?;

    let report = render_report_text(&summary);
    write_text(&out_dir.join("report.txt"), &report)?;

    Ok(())
}

fn write_frames_tsv(input: &ReportInput<'_>, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let header = [
        "frame",
        "t_ms",
        "outcome",
        "n_poses",
        "stability_raw",
        "coordination_raw",
        "hip_extension_raw",
        "stability_pct",
        "coordination_pct",
        "hip_extension_pct",
        "advice",
    ];
    writeln!(w, "{}", header.join("\t"))?;

    for frame in input.frames {
        let (raw, pct) = match (&frame.scores, &frame.display) {
            (Some(s), Some(d)) => (
                [
                    format_f64_3(s.stability),
                    format_f64_3(s.coordination),
                    format_f64_3(s.hip_extension),
                ],
                [
                    d.stability.clone(),
                    d.coordination.clone(),
                    d.hip_extension.clone(),
                ],
            ),
            _ => (na3(), na3()),
        };
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            frame.frame_index,
            format_f64_3(frame.timestamp_ms),
            frame.outcome.name(),
            frame.n_poses,
            raw[0],
            raw[1],
            raw[2],
            pct[0],
            pct[1],
            pct[2],
            format_advice(&frame.advice)
        )?;
    }
    w.flush()
}

fn na3() -> [String; 3] {
    ["NA".to_string(), "NA".to_string(), "NA".to_string()]
}

fn format_advice(advice: &[Advice]) -> String {
    if advice.is_empty() {
        return "NA".to_string();
    }
    advice
        .iter()
        .map(|a| a.code())
        .collect::<Vec<_>>()
        .join(";")
}

fn build_summary(input: &ReportInput<'_>) -> SummaryData {
    let scored: Vec<(&FrameRender, ScoreSet)> = input
        .frames
        .iter()
        .filter(|f| f.outcome == FrameOutcome::Scored)
        .filter_map(|f| f.scores.map(|s| (f, s)))
        .collect();

    let stability: Vec<f64> = scored.iter().map(|(_, s)| s.stability).collect();
    let coordination: Vec<f64> = scored.iter().map(|(_, s)| s.coordination).collect();
    let hip_extension: Vec<f64> = scored.iter().map(|(_, s)| s.hip_extension).collect();

    let mut advice = Vec::new();
    for item in advice_order() {
        let count = scored
            .iter()
            .filter(|(f, _)| f.advice.contains(item))
            .count();
        if count == 0 {
            continue;
        }
        advice.push(AdviceStat {
            code: item.code(),
            count,
            fraction: count as f64 / scored.len() as f64,
        });
    }

    let missing_landmarks = input
        .stats
        .missing_landmarks
        .iter()
        .map(|(&index, &count)| (landmark_name(index).to_string(), count))
        .collect();

    let last = input.frames.iter().rev().find_map(|f| {
        f.display.as_ref().map(|d| LastFrame {
            frame: f.frame_index,
            stability: d.stability.clone(),
            coordination: d.coordination.clone(),
            hip_extension: d.hip_extension.clone(),
            tips: f.tips.clone(),
        })
    });

    SummaryData {
        tool: ToolMeta {
            name: input.tool_name.clone(),
            version: input.tool_version.clone(),
        },
        source: input.source.clone(),
        locale: input.locale.tag().to_string(),
        profile: input.profile.clone(),
        status: input.status.name().to_string(),
        status_text: input.status.text(input.locale),
        frames: FrameCounts {
            ticks: input.stats.ticks,
            rendered: input.frames.len(),
            scored: input.stats.scored,
            retained: input.stats.retained,
            no_pose: input.stats.no_pose,
            not_ready: input.stats.not_ready,
            dropped: input.stats.dropped,
            abandoned: input.stats.abandoned,
        },
        scores: vec![
            named_stats("stability", &stability),
            named_stats("coordination", &coordination),
            named_stats("hip_extension", &hip_extension),
        ],
        advice,
        missing_landmarks,
        last,
    }
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_report.rs"]
mod tests;
