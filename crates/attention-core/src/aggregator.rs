//! Session-wide attention statistics.

use focuslens_common::clock::ns_to_secs;
use focuslens_model::report::{FrameJudgment, SessionSummary};

/// Cumulative frame counters for one session.
///
/// Only face-present frames are counted; `NoFace` leaves both counters
/// untouched so "never measured" is not confused with "never focused".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionAggregator {
    start_ns: u64,
    total_frames: u64,
    focused_frames: u64,
}

impl SessionAggregator {
    /// Create an aggregator whose session started at `start_ns`.
    pub fn new(start_ns: u64) -> Self {
        Self {
            start_ns,
            total_frames: 0,
            focused_frames: 0,
        }
    }

    /// Zero the counters and move the start time.
    pub fn reset(&mut self, start_ns: u64) {
        *self = Self::new(start_ns);
    }

    /// Count one processed frame.
    pub fn record(&mut self, judgment: FrameJudgment) {
        if !judgment.is_face_present() {
            return;
        }
        self.total_frames += 1;
        if judgment.is_focused() {
            self.focused_frames += 1;
        }
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    pub fn focused_frames(&self) -> u64 {
        self.focused_frames
    }

    pub fn start_ns(&self) -> u64 {
        self.start_ns
    }

    /// Nanoseconds between the session start and `now_ns` (never negative).
    pub fn elapsed_ns(&self, now_ns: u64) -> u64 {
        now_ns.saturating_sub(self.start_ns)
    }

    /// Focused share of all face-present frames, `None` if there were none.
    pub fn overall_focus_percent(&self) -> Option<f64> {
        if self.total_frames == 0 {
            return None;
        }
        Some(100.0 * self.focused_frames as f64 / self.total_frames as f64)
    }

    /// Summarize the session as of `now_ns`. Does not change any state.
    pub fn finalize(&self, now_ns: u64) -> SessionSummary {
        let elapsed_ns = self.elapsed_ns(now_ns);
        SessionSummary {
            total_elapsed_seconds: elapsed_ns / 1_000_000_000,
            elapsed_seconds: ns_to_secs(elapsed_ns),
            overall_focus_percent: self.overall_focus_percent(),
            total_frames: self.total_frames,
            focused_frames: self.focused_frames,
        }
    }
}
