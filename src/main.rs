mod input;
mod logging;
mod model;
mod pipeline;
mod render;
mod report;
mod session;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::input::{InputError, JsonlLandmarkSource, LandmarkSource, resolve_input_path};
use crate::model::locale::Locale;
use crate::model::thresholds::ScoringProfile;
use crate::pipeline::stage4_report::{ReportError, ReportInput, write_reports};
use crate::render::RecordingSink;
use crate::session::{CancelToken, Session, SessionError};

/// Scores climbing posture from recorded pose-landmark frames.
#[derive(Parser, Debug)]
#[command(name = "climb-posecoach")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay landmark frames through the scorer and write reports
    Run(RunArgs),
}

#[derive(clap::Args, Debug, Clone)]
struct RunArgs {
    /// Landmark frames (.jsonl / .jsonl.gz) or a directory holding frames.jsonl[.gz]
    #[arg(long)]
    input: PathBuf,

    /// Output directory
    #[arg(long)]
    out: PathBuf,

    /// JSON scoring profile overriding the default constants
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Language of status texts and tips
    #[arg(long, value_enum, default_value_t = Locale::ZhTw)]
    locale: Locale,

    /// Stop after this many frames
    #[arg(long)]
    max_frames: Option<u64>,

    /// Poses requested from the landmark source per frame
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    num_poses: u16,

    /// Also write overlay.jsonl with per-frame skeleton geometry
    #[arg(long)]
    overlay: bool,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to install Ctrl-C handler: {0}")]
    Signal(#[from] ctrlc::Error),
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if let Err(err) = run(cli) {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Commands::Run(args) => {
            let cancel = CancelToken::new();
            let handler_token = cancel.clone();
            ctrlc::set_handler(move || handler_token.cancel())?;
            run_analysis(&args, &cancel)
        }
    }
}

fn run_analysis(args: &RunArgs, cancel: &CancelToken) -> Result<(), AppError> {
    let profile = load_profile(args.profile.as_deref())?;
    let input_path = resolve_input_path(&args.input)?;

    let mut source =
        JsonlLandmarkSource::new(&input_path).with_max_poses(usize::from(args.num_poses));
    analyze(
        args,
        profile,
        &mut source,
        input_path.display().to_string(),
        cancel,
    )
}

/// Drives one session over `source` and writes the reports, also when the
/// run was cancelled or failed part way.
fn analyze(
    args: &RunArgs,
    profile: ScoringProfile,
    source: &mut dyn LandmarkSource,
    source_name: String,
    cancel: &CancelToken,
) -> Result<(), AppError> {
    let mut sink = if args.overlay {
        RecordingSink::new().with_overlay_file(&args.out.join("overlay.jsonl"))?
    } else {
        RecordingSink::new()
    };

    let mut session = Session::new(profile, args.locale)
        .with_max_frames(args.max_frames)
        .with_cancel_token(cancel.clone());
    let started = session.start(source, &mut sink);
    let run_result = match started {
        Ok(_) => session.run(source, &mut sink).map(|_| ()),
        Err(err) => Err(err),
    };
    sink.finish()?;

    let stats = session.stats().clone();
    info!(
        ticks = stats.ticks,
        scored = stats.scored,
        retained = stats.retained,
        no_pose = stats.no_pose,
        dropped = session.supervisor().dropped(),
        started = session.supervisor().started(),
        completed = session.supervisor().completed(),
        "session finished"
    );

    let report = ReportInput {
        frames: &sink.frames,
        stats: &stats,
        status: session.status(),
        locale: session.locale(),
        profile: session.profile(),
        source: source_name,
        tool_name: env!("CARGO_PKG_NAME").to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    };
    write_reports(&report, &args.out)?;
    info!(out = %args.out.display(), "reports written");

    run_result?;
    Ok(())
}

fn load_profile(path: Option<&Path>) -> Result<ScoringProfile, InputError> {
    match path {
        Some(path) => {
            let profile = ScoringProfile::load(path)?;
            if profile != ScoringProfile::default_v1() {
                warn!(
                    path = %path.display(),
                    "custom scoring profile in use; scores are not comparable with the default calibration"
                );
            }
            Ok(profile)
        }
        None => Ok(ScoringProfile::default_v1()),
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/support.rs"]
mod test_support;

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
