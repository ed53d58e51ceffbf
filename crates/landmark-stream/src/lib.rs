//! FocusLens Landmark Stream
//!
//! Connects landmark producers to an attention session. Producers implement
//! [`LandmarkSource`]; the crate ships two:
//!
//! - **JSONL replay:** Recorded landmark streams, one frame per line
//! - **Memory:** Frames held in memory (tests, embedding)
//!
//! Streams can be validated up front, and per-frame reports can be written
//! to an append-only JSONL report log.

pub mod sources;
pub mod validate;
pub mod writer;

use std::sync::Arc;

use focuslens_common::clock::{Clock, ManualClock};
use focuslens_common::config::TrackerSettings;
use focuslens_common::error::FocuslensResult;
use focuslens_core::AttentionSession;
use focuslens_model::frame::FrameRecord;
use focuslens_model::report::{FrameReport, SessionSummary};

pub use sources::{JsonlReplaySource, MemorySource};
pub use validate::{validate_source, StreamIssue, StreamValidation};
pub use writer::ReportWriter;

/// Trait for landmark producers.
pub trait LandmarkSource: Send {
    /// Next frame, or `None` once the source is exhausted.
    fn next_frame(&mut self) -> FocuslensResult<Option<FrameRecord>>;

    /// Source name for logging.
    fn name(&self) -> &str;
}

/// Result of replaying a whole source through a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplayOutcome {
    /// Frames read from the source, with or without a face.
    pub frames_read: u64,
    pub summary: SessionSummary,
}

/// Replay every frame of `source` through a new session built from
/// `settings`.
///
/// The session runs on its own [`ManualClock`], moved to each frame's
/// timestamp (relative to the first frame) before the frame is processed, so
/// elapsed times reflect the recording rather than wall time. The session is
/// stopped once the source is exhausted. `on_frame` sees every report in
/// order.
pub fn replay<S, F>(
    source: &mut S,
    settings: &TrackerSettings,
    mut on_frame: F,
) -> FocuslensResult<ReplayOutcome>
where
    S: LandmarkSource + ?Sized,
    F: FnMut(&FrameRecord, &FrameReport) -> FocuslensResult<()>,
{
    let clock = Arc::new(ManualClock::new());
    let mut session = AttentionSession::from_settings(settings, clock.clone())?;

    tracing::info!(
        source = source.name(),
        classifier = session.classifier_name(),
        window = settings.window_size,
        "Replay started"
    );
    session.start()?;

    let origin_ns = clock.now_ns();
    let mut first_ts = None;
    let mut last_ts = 0u64;
    let mut frames_read = 0u64;

    while let Some(frame) = source.next_frame()? {
        let first = *first_ts.get_or_insert(frame.timestamp_ns);
        if frames_read > 0 && frame.timestamp_ns < last_ts {
            tracing::warn!(
                t = frame.timestamp_ns,
                previous = last_ts,
                "Frame timestamp went backwards; holding clock"
            );
        }
        last_ts = last_ts.max(frame.timestamp_ns);
        clock.set_ns(origin_ns + frame.timestamp_ns.saturating_sub(first));

        let report = session.process_frame(&frame.observation)?;
        on_frame(&frame, &report)?;
        frames_read += 1;
    }

    let summary = session.stop()?;
    tracing::info!(
        source = source.name(),
        frames = frames_read,
        "Replay finished"
    );
    Ok(ReplayOutcome {
        frames_read,
        summary,
    })
}
