use serde::Serialize;

pub mod json;
pub mod text;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedStats {
    pub name: &'static str,
    pub median: f64,
    pub p10: f64,
    pub p90: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdviceStat {
    pub code: &'static str,
    pub count: usize,
    pub fraction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameCounts {
    pub ticks: u64,
    pub rendered: usize,
    pub scored: u64,
    pub retained: u64,
    pub no_pose: u64,
    pub not_ready: u64,
    pub dropped: u64,
    pub abandoned: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LastFrame {
    pub frame: u64,
    pub stability: String,
    pub coordination: String,
    pub hip_extension: String,
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryData {
    pub tool: ToolMeta,
    pub source: String,
    pub locale: String,
    pub profile: crate::model::thresholds::ScoringProfile,
    pub status: String,
    pub status_text: String,
    pub frames: FrameCounts,
    pub scores: Vec<NamedStats>,
    pub advice: Vec<AdviceStat>,
    pub missing_landmarks: Vec<(String, u64)>,
    pub last: Option<LastFrame>,
}

pub fn format_f64_3(v: f64) -> String {
    format!("{:.3}", v)
}

pub fn quantile_indexed(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    let idx = ((n - 1) as f64 * p).ceil() as usize;
    sorted[idx]
}

pub fn median(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.5)
}

pub fn p10(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.10)
}

pub fn p90(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.90)
}

pub fn named_stats(name: &'static str, values: &[f64]) -> NamedStats {
    let (min, max) = if values.is_empty() {
        (0.0, 0.0)
    } else {
        values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    };
    NamedStats {
        name,
        median: median(values),
        p10: p10(values),
        p90: p90(values),
        min,
        max,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
