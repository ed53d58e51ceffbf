//! Replay a landmark stream through an attention session.

use std::path::{Path, PathBuf};

use focuslens_common::config::{AppConfig, TrackerSettings};
use focuslens_common::error::FocuslensResult;
use focuslens_model::frame::FrameRecord;
use focuslens_model::report::{format_percent, FrameReport, SessionLogEntry, SessionSummary};
use focuslens_stream::writer::ReportLogHeader;
use focuslens_stream::{JsonlReplaySource, LandmarkSource, ReplayOutcome, ReportWriter};

pub struct ReplayArgs {
    pub path: PathBuf,
    pub window: Option<usize>,
    pub threshold: Option<f64>,
    pub json: bool,
    pub output: Option<PathBuf>,
}

pub fn run(args: ReplayArgs, config: &AppConfig) -> anyhow::Result<()> {
    let settings = tracker_settings(config, args.window, args.threshold)?;

    let mut writer = match &args.output {
        Some(output) => {
            let header = ReportLogHeader::new(
                args.path.display().to_string(),
                settings.window_size,
                settings.offset_threshold,
            );
            Some(
                ReportWriter::new(output.clone(), &header)
                    .map_err(|e| anyhow::anyhow!("Failed to create report log: {e}"))?,
            )
        }
        None => None,
    };

    let json = args.json;
    let outcome = replay_file(&args.path, &settings, |frame, report| {
        if json {
            let entry = SessionLogEntry::Frame {
                t: frame.timestamp_ns,
                report: *report,
            };
            println!("{}", serde_json::to_string(&entry)?);
        } else {
            print_frame(frame, report);
        }
        if let Some(writer) = writer.as_mut() {
            writer.write_frame(frame.timestamp_ns, report)?;
        }
        Ok(())
    })?;

    if let Some(writer) = writer.as_mut() {
        writer
            .write_summary(&outcome.summary)
            .map_err(|e| anyhow::anyhow!("Failed to write summary: {e}"))?;
        tracing::info!(
            path = %writer.path().display(),
            entries = writer.entries_written(),
            "Report log written"
        );
    }

    if json {
        let entry = SessionLogEntry::Summary {
            summary: outcome.summary,
        };
        println!("{}", serde_json::to_string(&entry)?);
    } else {
        print_summary(&outcome.summary);
    }

    Ok(())
}

/// Tracker settings from config, with command-line overrides applied.
pub fn tracker_settings(
    config: &AppConfig,
    window: Option<usize>,
    threshold: Option<f64>,
) -> anyhow::Result<TrackerSettings> {
    let mut settings = config.tracker.clone();
    if let Some(window) = window {
        settings.window_size = window;
    }
    if let Some(threshold) = threshold {
        settings.offset_threshold = threshold;
    }
    settings
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid tracker settings: {e}"))?;
    Ok(settings)
}

/// Replay the stream at `path`; session time follows frame timestamps.
pub fn replay_file<F>(
    path: &Path,
    settings: &TrackerSettings,
    on_frame: F,
) -> anyhow::Result<ReplayOutcome>
where
    F: FnMut(&FrameRecord, &FrameReport) -> FocuslensResult<()>,
{
    let mut source = JsonlReplaySource::open(path)
        .map_err(|e| anyhow::anyhow!("Failed to open landmark stream: {e}"))?;
    if let Some(header) = source.header() {
        tracing::debug!(
            source = %header.source,
            fps = ?header.fps,
            "Landmark stream header"
        );
    }

    let outcome = focuslens_stream::replay(&mut source, settings, on_frame)
        .map_err(|e| anyhow::anyhow!("Replay of {} failed: {e}", source.name()))?;
    Ok(outcome)
}

fn print_frame(frame: &FrameRecord, report: &FrameReport) {
    println!(
        "[{:>8.2}s] Status: {:<12} | Attention Score: {:>6} | Session Time: {}s",
        frame.timestamp_secs(),
        report.status.label(),
        format_percent(report.instantaneous_score_percent),
        report.session_elapsed_seconds
    );
}

pub fn print_summary(summary: &SessionSummary) {
    println!("\n--- Session Summary ---");
    println!("Total Time: {} seconds", summary.total_elapsed_seconds);
    match summary.overall_focus_percent {
        Some(_) => println!(
            "Overall Focus Score: {}",
            format_percent(summary.overall_focus_percent)
        ),
        None => println!("Overall Focus Score: no face detected"),
    }
    println!(
        "Frames: {} with a face, {} focused",
        summary.total_frames, summary.focused_frames
    );
}
