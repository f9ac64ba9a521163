use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::input::{InputError, LandmarkSource, SourceInfo, VideoFrame};
use crate::model::advice::Advice;
use crate::model::locale::Locale;
use crate::model::scores::ScoreSet;
use crate::model::thresholds::ScoringProfile;
use crate::pipeline::stage1_validate::PoseError;
use crate::pipeline::stage2_score::evaluate_pose;
use crate::pipeline::stage3_advise::advise;
use crate::render::overlay::{Overlay, build_overlay};
use crate::render::{FrameRender, RenderSink};

pub mod supervisor;

use supervisor::FrameSupervisor;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to start camera or pose model: {0}")]
    Start(#[source] InputError),
    #[error("session already running")]
    AlreadyRunning,
    #[error("session not running")]
    NotRunning,
    #[error("frame acquisition failed: {0}")]
    Acquisition(#[source] InputError),
    #[error("pose detection failed at frame {frame}: {source}")]
    Detection {
        frame: u64,
        #[source]
        source: InputError,
    },
    #[error("render sink failed: {0}")]
    Render(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Idle,
    LoadingModel,
    Analyzing,
    Failed(String),
    Stopped,
}

impl SessionStatus {
    pub fn text(&self, locale: Locale) -> String {
        match self {
            SessionStatus::Idle => locale.idle().to_string(),
            SessionStatus::LoadingModel => locale.loading_model().to_string(),
            SessionStatus::Analyzing => locale.analyzing().to_string(),
            SessionStatus::Failed(msg) => msg.clone(),
            SessionStatus::Stopped => locale.stopped().to_string(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SessionStatus::Idle => "idle",
            SessionStatus::LoadingModel => "loading_model",
            SessionStatus::Analyzing => "analyzing",
            SessionStatus::Failed(_) => "failed",
            SessionStatus::Stopped => "stopped",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameOutcome {
    /// A pose was scored and rendered.
    Scored,
    /// Every detected pose was malformed; previous overlay and advice kept.
    Retained,
    /// Nothing detected; overlay cleared, score text left as is.
    NoPose,
    /// Video not ready; detection skipped.
    NotReady,
    /// Timestamp did not advance or the slot was busy.
    Dropped,
}

impl FrameOutcome {
    pub fn name(self) -> &'static str {
        match self {
            FrameOutcome::Scored => "scored",
            FrameOutcome::Retained => "retained",
            FrameOutcome::NoPose => "no_pose",
            FrameOutcome::NotReady => "not_ready",
            FrameOutcome::Dropped => "dropped",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Frame(FrameOutcome),
    Exhausted,
    Cancelled,
}

/// Cancellation flag shared with whoever owns the stop action.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionStats {
    pub ticks: u64,
    pub scored: u64,
    pub retained: u64,
    pub no_pose: u64,
    pub not_ready: u64,
    pub dropped: u64,
    pub abandoned: u64,
    /// Required landmark index -> frames where it was missing or non-finite.
    pub missing_landmarks: BTreeMap<usize, u64>,
}

impl SessionStats {
    fn record(&mut self, outcome: FrameOutcome) {
        match outcome {
            FrameOutcome::Scored => self.scored += 1,
            FrameOutcome::Retained => self.retained += 1,
            FrameOutcome::NoPose => self.no_pose += 1,
            FrameOutcome::NotReady => self.not_ready += 1,
            FrameOutcome::Dropped => self.dropped += 1,
        }
    }
}

#[derive(Debug, Clone)]
struct LastRender {
    overlay: Overlay,
    scores: ScoreSet,
    advice: Vec<Advice>,
}

/// State owned by the acquisition loop and threaded through every tick.
pub struct Session {
    profile: ScoringProfile,
    locale: Locale,
    status: SessionStatus,
    cancel: CancelToken,
    supervisor: FrameSupervisor,
    max_frames: Option<u64>,
    last_timestamp: Option<f64>,
    last: Option<LastRender>,
    stats: SessionStats,
}

impl Session {
    pub fn new(profile: ScoringProfile, locale: Locale) -> Self {
        Self {
            profile,
            locale,
            status: SessionStatus::Idle,
            cancel: CancelToken::new(),
            supervisor: FrameSupervisor::new(),
            max_frames: None,
            last_timestamp: None,
            last: None,
            stats: SessionStats::default(),
        }
    }

    pub fn with_max_frames(mut self, max_frames: Option<u64>) -> Self {
        self.max_frames = max_frames;
        self
    }

    /// Shares an externally owned stop flag, e.g. one set from a Ctrl-C handler.
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    #[cfg(test)]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn profile(&self) -> &ScoringProfile {
        &self.profile
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn supervisor(&self) -> &FrameSupervisor {
        &self.supervisor
    }

    /// The start control is enabled only while no session is active.
    pub fn can_start(&self) -> bool {
        matches!(self.status, SessionStatus::Idle | SessionStatus::Failed(_))
    }

    fn set_status(&mut self, status: SessionStatus, sink: &mut dyn RenderSink) {
        let text = status.text(self.locale);
        info!(status = status.name(), "{}", text);
        sink.status(&status, &text);
        self.status = status;
    }

    pub fn start(
        &mut self,
        source: &mut dyn LandmarkSource,
        sink: &mut dyn RenderSink,
    ) -> Result<SourceInfo, SessionError> {
        if !self.can_start() {
            return Err(SessionError::AlreadyRunning);
        }
        self.set_status(SessionStatus::LoadingModel, sink);

        match source.open() {
            Ok(info) => {
                self.cancel.reset();
                self.last_timestamp = None;
                self.set_status(SessionStatus::Analyzing, sink);
                info!(
                    source = %info.name,
                    max_poses = info.max_poses,
                    control = self.locale.control_busy(),
                    "analysis started"
                );
                Ok(info)
            }
            Err(err) => {
                error!("failed to start camera or pose model: {err}");
                source.release();
                let msg = self.locale.start_failed().to_string();
                self.set_status(SessionStatus::Failed(msg), sink);
                Err(SessionError::Start(err))
            }
        }
    }

    /// Runs ticks until the source is exhausted or the session is cancelled,
    /// then stops.
    pub fn run(
        &mut self,
        source: &mut dyn LandmarkSource,
        sink: &mut dyn RenderSink,
    ) -> Result<SessionStats, SessionError> {
        if self.status != SessionStatus::Analyzing {
            return Err(SessionError::NotRunning);
        }
        loop {
            match self.tick(source, sink) {
                Ok(Tick::Frame(_)) => continue,
                Ok(Tick::Exhausted) | Ok(Tick::Cancelled) => break,
                Err(err) => {
                    self.fail(source, sink);
                    return Err(err);
                }
            }
        }
        self.stop(source, sink);
        Ok(self.stats.clone())
    }

    pub fn tick(
        &mut self,
        source: &mut dyn LandmarkSource,
        sink: &mut dyn RenderSink,
    ) -> Result<Tick, SessionError> {
        if self.status != SessionStatus::Analyzing {
            return Err(SessionError::NotRunning);
        }
        if let Some(max) = self.max_frames {
            if self.stats.ticks >= max {
                debug!(max, "frame limit reached");
                self.cancel.cancel();
            }
        }
        if self.cancel.is_cancelled() {
            return Ok(Tick::Cancelled);
        }

        let frame = match source.next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => return Ok(Tick::Exhausted),
            Err(err) => return Err(SessionError::Acquisition(err)),
        };
        self.stats.ticks += 1;

        let outcome = self.process_frame(&frame, source, sink)?;
        self.stats.record(outcome);
        Ok(Tick::Frame(outcome))
    }

    fn process_frame(
        &mut self,
        frame: &VideoFrame,
        source: &mut dyn LandmarkSource,
        sink: &mut dyn RenderSink,
    ) -> Result<FrameOutcome, SessionError> {
        if !frame.ready {
            return Ok(FrameOutcome::NotReady);
        }
        let timestamp_ms = frame.timestamp_ms;
        if let Some(prev) = self.last_timestamp {
            if timestamp_ms <= prev {
                warn!(
                    frame = frame.index,
                    timestamp_ms, prev, "timestamp did not advance; dropping frame"
                );
                self.supervisor.record_drop();
                return Ok(FrameOutcome::Dropped);
            }
        }
        if !self.supervisor.try_begin(frame.index) {
            debug!(frame = frame.index, "scoring pass in flight; dropping frame");
            return Ok(FrameOutcome::Dropped);
        }

        let poses = match source.detect(frame, timestamp_ms) {
            Ok(poses) => poses,
            Err(err) => {
                self.supervisor.abandon();
                return Err(SessionError::Detection {
                    frame: frame.index,
                    source: err,
                });
            }
        };
        self.last_timestamp = Some(timestamp_ms);

        let overlay = build_overlay(&poses, frame.width, frame.height);
        let mut scored: Option<ScoreSet> = None;
        for pose in &poses {
            match evaluate_pose(pose, &self.profile) {
                Ok(evaluation) => {
                    debug!(frame = frame.index, geometry = ?evaluation.geometry, "pose geometry");
                    scored = Some(evaluation.scores);
                }
                Err(err) => {
                    self.note_malformed(frame.index, &err);
                }
            }
        }

        let outcome = match (scored, poses.is_empty()) {
            (Some(scores), _) => {
                let advice = advise(&scores, &self.profile);
                self.last = Some(LastRender {
                    overlay: overlay.clone(),
                    scores,
                    advice,
                });
                FrameOutcome::Scored
            }
            (None, true) => {
                if let Some(last) = self.last.as_mut() {
                    last.overlay = overlay.clone();
                }
                FrameOutcome::NoPose
            }
            (None, false) => FrameOutcome::Retained,
        };

        let render = self.frame_render(frame, outcome, poses.len(), overlay);
        let rendered = sink.render(&render);
        self.supervisor.complete(frame.index);
        rendered?;
        Ok(outcome)
    }

    fn note_malformed(&mut self, frame: u64, err: &PoseError) {
        warn!(frame, "skipping scoring: {err}");
        let index = match err {
            PoseError::MissingLandmark { index, .. } | PoseError::NonFinite { index, .. } => *index,
        };
        *self.stats.missing_landmarks.entry(index).or_insert(0) += 1;
    }

    fn frame_render(
        &self,
        frame: &VideoFrame,
        outcome: FrameOutcome,
        n_poses: usize,
        overlay: Overlay,
    ) -> FrameRender {
        let overlay = match (outcome, self.last.as_ref()) {
            (FrameOutcome::Retained, Some(last)) => last.overlay.clone(),
            (FrameOutcome::Retained, None) => Overlay::cleared(frame.width, frame.height),
            _ => overlay,
        };
        let (scores, advice) = match self.last.as_ref() {
            Some(last) => (Some(last.scores), last.advice.clone()),
            None => (None, Vec::new()),
        };
        FrameRender {
            frame_index: frame.index,
            timestamp_ms: frame.timestamp_ms,
            outcome,
            n_poses,
            overlay,
            display: scores.as_ref().map(ScoreSet::display),
            tips: FrameRender::tips_for(&advice, self.locale),
            scores,
            advice,
        }
    }

    fn abandon_in_flight(&mut self) {
        if let Some(frame) = self.supervisor.in_flight() {
            debug!(frame, "abandoning in-flight scoring pass");
        }
        self.supervisor.abandon();
    }

    pub fn stop(&mut self, source: &mut dyn LandmarkSource, sink: &mut dyn RenderSink) {
        self.cancel.cancel();
        self.abandon_in_flight();
        self.stats.abandoned = self.supervisor.abandoned();
        source.release();
        if self.status == SessionStatus::Analyzing {
            self.set_status(SessionStatus::Stopped, sink);
        }
    }

    fn fail(&mut self, source: &mut dyn LandmarkSource, sink: &mut dyn RenderSink) {
        self.cancel.cancel();
        self.abandon_in_flight();
        self.stats.abandoned = self.supervisor.abandoned();
        source.release();
        let msg = self.locale.analysis_failed().to_string();
        self.set_status(SessionStatus::Failed(msg), sink);
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/session/tests.rs"]
mod tests;
