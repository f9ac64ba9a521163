use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::model::advice::Advice;
use crate::model::locale::Locale;
use crate::model::scores::{DisplayScores, ScoreSet};
use crate::session::{FrameOutcome, SessionStatus};

pub mod overlay;

use overlay::{DEFAULT_STYLE, Overlay, OverlayStyle};

/// Everything the display needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameRender {
    pub frame_index: u64,
    pub timestamp_ms: f64,
    pub outcome: FrameOutcome,
    pub n_poses: usize,
    pub overlay: Overlay,
    pub scores: Option<ScoreSet>,
    pub display: Option<DisplayScores>,
    pub advice: Vec<Advice>,
    pub tips: Vec<String>,
}

impl FrameRender {
    pub fn tips_for(advice: &[Advice], locale: Locale) -> Vec<String> {
        advice.iter().map(|a| a.text(locale).to_string()).collect()
    }
}

pub trait RenderSink {
    fn render(&mut self, frame: &FrameRender) -> std::io::Result<()>;
    fn status(&mut self, status: &SessionStatus, text: &str);
}

#[derive(Serialize)]
struct OverlayHeader {
    style: OverlayStyle,
}

#[derive(Serialize)]
struct OverlayRecord<'a> {
    frame: u64,
    t: f64,
    outcome: FrameOutcome,
    overlay: &'a Overlay,
}

/// Keeps rendered frames for the report stage; optionally streams overlays.
#[derive(Default)]
pub struct RecordingSink {
    pub frames: Vec<FrameRender>,
    pub statuses: Vec<(SessionStatus, String)>,
    overlay_out: Option<BufWriter<File>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overlay_file(mut self, path: &Path) -> std::io::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut w = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut w, &OverlayHeader { style: DEFAULT_STYLE })?;
        w.write_all(b"\n")?;
        self.overlay_out = Some(w);
        Ok(self)
    }

    #[cfg(test)]
    pub fn last_status(&self) -> Option<&SessionStatus> {
        self.statuses.last().map(|(s, _)| s)
    }

    pub fn finish(&mut self) -> std::io::Result<()> {
        if let Some(w) = self.overlay_out.as_mut() {
            w.flush()?;
        }
        Ok(())
    }
}

impl RenderSink for RecordingSink {
    fn render(&mut self, frame: &FrameRender) -> std::io::Result<()> {
        if let Some(w) = self.overlay_out.as_mut() {
            let record = OverlayRecord {
                frame: frame.frame_index,
                t: frame.timestamp_ms,
                outcome: frame.outcome,
                overlay: &frame.overlay,
            };
            serde_json::to_writer(&mut *w, &record)?;
            w.write_all(b"\n")?;
        }
        self.frames.push(frame.clone());
        Ok(())
    }

    fn status(&mut self, status: &SessionStatus, text: &str) {
        self.statuses.push((status.clone(), text.to_string()));
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/render/tests.rs"]
mod tests;
