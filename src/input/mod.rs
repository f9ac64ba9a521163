use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

pub mod frames;
pub mod reader;
pub mod source;

pub use frames::parse_frame_line;
pub use source::{JsonlLandmarkSource, LandmarkSource, SourceInfo, VideoFrame};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("source not opened")]
    NotOpened,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Jsonl,
    JsonlGz,
}

pub fn detect_format(path: &Path) -> Result<InputFormat, InputError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    if name.ends_with(".jsonl.gz") || name.ends_with(".ndjson.gz") {
        Ok(InputFormat::JsonlGz)
    } else if name.ends_with(".jsonl") || name.ends_with(".ndjson") {
        Ok(InputFormat::Jsonl)
    } else {
        Err(InputError::InvalidInput(format!(
            "unsupported landmark file {} (expected .jsonl or .jsonl.gz)",
            path.display()
        )))
    }
}

/// Resolves `--input`: a file is used as-is, a directory must contain
/// `frames.jsonl` or `frames.jsonl.gz`.
pub fn resolve_input_path(input: &Path) -> Result<PathBuf, InputError> {
    if input.is_file() {
        detect_format(input)?;
        return Ok(input.to_path_buf());
    }
    if input.is_dir() {
        for name in ["frames.jsonl", "frames.jsonl.gz"] {
            let candidate = input.join(name);
            if candidate.is_file() {
                info!(path = %candidate.display(), "discovered landmark frames");
                return Ok(candidate);
            }
        }
        return Err(InputError::MissingInput(format!(
            "no frames.jsonl or frames.jsonl.gz in {}",
            input.display()
        )));
    }
    Err(InputError::MissingInput(input.display().to_string()))
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
