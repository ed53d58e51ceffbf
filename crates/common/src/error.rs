//! Error types shared across FocusLens crates.

use std::path::PathBuf;

/// Top-level error type for FocusLens operations.
#[derive(Debug, thiserror::Error)]
pub enum FocuslensError {
    /// A frame was recorded or scored while the session was not running.
    #[error("Session not running (state: {state})")]
    SessionNotRunning { state: String },

    #[error("Invalid session transition: {message}")]
    InvalidTransition { message: String },

    #[error("Invalid landmarks: {message}")]
    InvalidLandmarks { message: String },

    #[error("Landmark stream error: {message}")]
    Stream { message: String },

    #[error("Report log error: {message}")]
    ReportLog { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using FocuslensError.
pub type FocuslensResult<T> = Result<T, FocuslensError>;

impl FocuslensError {
    pub fn session_not_running(state: impl std::fmt::Display) -> Self {
        Self::SessionNotRunning {
            state: state.to_string(),
        }
    }

    pub fn invalid_transition(msg: impl Into<String>) -> Self {
        Self::InvalidTransition {
            message: msg.into(),
        }
    }

    pub fn invalid_landmarks(msg: impl Into<String>) -> Self {
        Self::InvalidLandmarks {
            message: msg.into(),
        }
    }

    pub fn stream(msg: impl Into<String>) -> Self {
        Self::Stream {
            message: msg.into(),
        }
    }

    pub fn report_log(msg: impl Into<String>) -> Self {
        Self::ReportLog {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
