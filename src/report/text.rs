use crate::report::{AdviceStat, NamedStats, SummaryData, format_f64_3};

pub fn render_report_text(data: &SummaryData) -> String {
    let mut out = String::new();

    out.push_str("Climbing Posture Coaching Report\n");
    out.push_str("================================\n\n");

    out.push_str("1. Session\n");
    out.push_str(&format!("Source: {}\n", data.source));
    out.push_str(&format!("Locale: {}\n", data.locale));
    out.push_str(&format!("Status: {} ({})\n", data.status, data.status_text));
    out.push_str(&format!(
        "Frames: {} ticks, {} scored, {} retained, {} without pose, {} not ready, {} dropped\n\n",
        data.frames.ticks,
        data.frames.scored,
        data.frames.retained,
        data.frames.no_pose,
        data.frames.not_ready,
        data.frames.dropped
    ));

    out.push_str("2. Scores (raw, scored frames)\n");
    if data.frames.scored == 0 {
        out.push_str("No frame produced a complete pose.\n\n");
    } else {
        for s in &data.scores {
            out.push_str(&format!(
                "{}: median {} (p10 {}, p90 {}); {}\n",
                s.name,
                format_f64_3(s.median),
                format_f64_3(s.p10),
                format_f64_3(s.p90),
                score_statement(s, data.profile.advice_threshold)
            ));
        }
        out.push('\n');
    }

    out.push_str("3. Coaching tips\n");
    if data.advice.is_empty() {
        out.push_str("No tips were issued.\n");
    } else {
        out.push_str(&format!("Most frequent: {}\n", dominant_advice(&data.advice)));
        for a in &data.advice {
            out.push_str(&format!(
                "{}: {} frames ({})\n",
                a.code,
                a.count,
                format_f64_3(a.fraction)
            ));
        }
    }
    if let Some(last) = &data.last {
        out.push_str(&format!(
            "Last frame {}: stability {}, coordination {}, hip extension {}\n",
            last.frame, last.stability, last.coordination, last.hip_extension
        ));
        for tip in &last.tips {
            out.push_str(&format!("- {}\n", tip));
        }
    }
    out.push('\n');

    out.push_str("4. Quality and caveats\n");
    if data.missing_landmarks.is_empty() {
        out.push_str("All detected poses carried the required joints.\n");
    } else {
        for (name, count) in &data.missing_landmarks {
            out.push_str(&format!("{} missing in {} poses\n", name, count));
        }
    }

    out
}

fn score_statement(stats: &NamedStats, threshold: f64) -> &'static str {
    if stats.median >= threshold && stats.p10 >= threshold {
        "consistently above threshold"
    } else if stats.median >= threshold {
        "mostly above threshold with weak moments"
    } else {
        "below threshold for most frames"
    }
}

fn dominant_advice(advice: &[AdviceStat]) -> String {
    let mut sorted = advice.to_vec();
    sorted.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.code.cmp(b.code)));
    sorted
        .first()
        .map(|a| format!("{} ({})", a.code, format_f64_3(a.fraction)))
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
