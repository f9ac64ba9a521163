use std::io::BufRead;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::input::reader::open_maybe_gz;
use crate::input::{InputError, parse_frame_line};
use crate::model::landmarks::Pose;

#[derive(Debug, Clone, PartialEq)]
pub struct SourceInfo {
    pub name: String,
    pub max_poses: usize,
}

/// Frame handle handed from the source to the session loop.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoFrame {
    pub index: u64,
    pub timestamp_ms: f64,
    pub ready: bool,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub(crate) poses: Vec<Pose>,
}

impl VideoFrame {
    pub fn new(index: u64, timestamp_ms: f64, poses: Vec<Pose>) -> Self {
        Self {
            index,
            timestamp_ms,
            ready: true,
            width: None,
            height: None,
            poses,
        }
    }
}

/// Camera plus pose model. `open` may fail once; `detect` is called at most
/// once per frame with strictly increasing timestamps.
pub trait LandmarkSource {
    fn open(&mut self) -> Result<SourceInfo, InputError>;
    fn next_frame(&mut self) -> Result<Option<VideoFrame>, InputError>;
    fn detect(&mut self, frame: &VideoFrame, timestamp_ms: f64) -> Result<Vec<Pose>, InputError>;
    fn release(&mut self);
}

/// Replays landmark frames recorded as JSON Lines.
pub struct JsonlLandmarkSource {
    path: PathBuf,
    max_poses: usize,
    reader: Option<Box<dyn BufRead>>,
    line_no: usize,
    next_index: u64,
    buf: String,
}

impl JsonlLandmarkSource {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            max_poses: 1,
            reader: None,
            line_no: 0,
            next_index: 0,
            buf: String::new(),
        }
    }

    pub fn with_max_poses(mut self, max_poses: usize) -> Self {
        self.max_poses = max_poses;
        self
    }

    pub fn is_open(&self) -> bool {
        self.reader.is_some()
    }
}

impl LandmarkSource for JsonlLandmarkSource {
    fn open(&mut self) -> Result<SourceInfo, InputError> {
        let reader = open_maybe_gz(&self.path)?;
        self.reader = Some(reader);
        self.line_no = 0;
        self.next_index = 0;
        info!(path = %self.path.display(), "landmark replay opened");
        Ok(SourceInfo {
            name: self.path.display().to_string(),
            max_poses: self.max_poses,
        })
    }

    fn next_frame(&mut self) -> Result<Option<VideoFrame>, InputError> {
        let reader = self.reader.as_mut().ok_or(InputError::NotOpened)?;
        loop {
            self.buf.clear();
            let read = reader.read_line(&mut self.buf)?;
            if read == 0 {
                return Ok(None);
            }
            self.line_no += 1;
            let line = self.buf.trim();
            if line.is_empty() {
                continue;
            }
            let recorded = parse_frame_line(line, self.line_no)?;
            let index = self.next_index;
            self.next_index += 1;
            return Ok(Some(VideoFrame {
                ready: recorded.ready,
                width: recorded.width,
                height: recorded.height,
                ..VideoFrame::new(index, recorded.t, recorded.poses)
            }));
        }
    }

    fn detect(&mut self, frame: &VideoFrame, timestamp_ms: f64) -> Result<Vec<Pose>, InputError> {
        if !self.is_open() {
            return Err(InputError::NotOpened);
        }
        debug!(frame = frame.index, timestamp_ms, "replaying detection");
        Ok(frame.poses.iter().take(self.max_poses).cloned().collect())
    }

    fn release(&mut self) {
        if self.reader.take().is_some() {
            info!(path = %self.path.display(), "landmark replay released");
        }
    }
}
