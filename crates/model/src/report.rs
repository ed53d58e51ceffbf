//! Attention reports produced by the tracker.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::frame::TimestampNs;

/// The tracker's verdict for one frame.
///
/// `NoFace` is a first-class state, not a failed classification: it never
/// counts as looking away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameJudgment {
    Focused,
    LookingAway,
    NoFace,
}

impl FrameJudgment {
    /// Map a classifier result (`None` when no face was detected).
    pub fn from_classification(focused: Option<bool>) -> Self {
        focused.map_or(FrameJudgment::NoFace, Self::from_focus)
    }

    /// Verdict for a frame where a face was detected.
    pub fn from_focus(focused: bool) -> Self {
        if focused {
            FrameJudgment::Focused
        } else {
            FrameJudgment::LookingAway
        }
    }

    pub fn is_face_present(self) -> bool {
        !matches!(self, FrameJudgment::NoFace)
    }

    pub fn is_focused(self) -> bool {
        matches!(self, FrameJudgment::Focused)
    }

    /// Human-readable status label.
    pub fn label(self) -> &'static str {
        match self {
            FrameJudgment::Focused => "Focused",
            FrameJudgment::LookingAway => "Looking Away",
            FrameJudgment::NoFace => "No Face",
        }
    }
}

impl fmt::Display for FrameJudgment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-frame output handed to presentation or logging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    pub status: FrameJudgment,

    /// Rolling-window attention in `[0, 100]`; `None` until the first face
    /// is seen.
    pub instantaneous_score_percent: Option<f64>,

    /// Whole seconds since the session started.
    pub session_elapsed_seconds: u64,
}

/// Final statistics for a tracking session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Whole seconds from start to finalization.
    pub total_elapsed_seconds: u64,

    /// Fractional seconds from start to finalization.
    pub elapsed_seconds: f64,

    /// Share of face-present frames judged focused, in `[0, 100]`.
    /// `None` when no face was ever detected.
    pub overall_focus_percent: Option<f64>,

    /// Frames with a detected face.
    pub total_frames: u64,

    /// Face-present frames judged focused.
    pub focused_frames: u64,
}

/// One line of a session report log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionLogEntry {
    Frame {
        t: TimestampNs,
        report: FrameReport,
    },
    Summary {
        summary: SessionSummary,
    },
}

/// Format an optional percentage for display, `--` when undefined.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}%"),
        None => "--".to_string(),
    }
}
