//! Errors raised while building or parsing model types.

/// Errors that can occur when working with landmark data.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Landmark {index} has non-finite coordinates ({x}, {y})")]
    NonFiniteLandmark { index: usize, x: f64, y: f64 },

    #[error("Landmark index {index} is out of range for a set of {len} points")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("No landmarks selected")]
    EmptySelection,

    #[error("Gaze index groups reuse landmark {index}")]
    OverlappingGroups { index: usize },

    #[error("Parse error on line {line}: {source}")]
    Parse {
        line: usize,
        source: serde_json::Error,
    },
}
