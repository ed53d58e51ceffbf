//! Append-only report writer for session logs.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use focuslens_common::error::{FocuslensError, FocuslensResult};
use focuslens_model::frame::TimestampNs;
use focuslens_model::report::{FrameReport, SessionLogEntry, SessionSummary};

pub const REPORT_SCHEMA_VERSION: &str = "1.0";

/// First line of a report log, written as `# {json}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportLogHeader {
    pub schema_version: String,

    /// RFC 3339 wall-clock time the log was created.
    pub created_at: String,

    /// Name of the landmark source being scored.
    pub source: String,

    pub window_size: usize,
    pub offset_threshold: f64,
}

impl ReportLogHeader {
    pub fn new(source: impl Into<String>, window_size: usize, offset_threshold: f64) -> Self {
        Self {
            schema_version: REPORT_SCHEMA_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            source: source.into(),
            window_size,
            offset_threshold,
        }
    }
}

/// Writes session log entries to a JSONL file.
pub struct ReportWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    entries_written: u64,
}

impl ReportWriter {
    /// Create a new report writer, writing the header as the first line.
    pub fn new(path: PathBuf, header: &ReportLogHeader) -> FocuslensResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;

        let mut writer = BufWriter::new(file);

        let header_json = serde_json::to_string(header)?;
        writeln!(writer, "# {header_json}")
            .map_err(|e| FocuslensError::report_log(format!("Failed to write header: {e}")))?;

        tracing::debug!(path = %path.display(), "Opened report log");

        Ok(Self {
            writer,
            path,
            entries_written: 0,
        })
    }

    /// Append the report for one frame.
    pub fn write_frame(&mut self, t: TimestampNs, report: &FrameReport) -> FocuslensResult<()> {
        self.write_entry(&SessionLogEntry::Frame { t, report: *report })
    }

    /// Append the session summary and flush.
    pub fn write_summary(&mut self, summary: &SessionSummary) -> FocuslensResult<()> {
        self.write_entry(&SessionLogEntry::Summary { summary: *summary })?;
        self.flush()
    }

    fn write_entry(&mut self, entry: &SessionLogEntry) -> FocuslensResult<()> {
        let json = serde_json::to_string(entry)?;
        writeln!(self.writer, "{json}")
            .map_err(|e| FocuslensError::report_log(format!("Failed to write entry: {e}")))?;
        self.entries_written += 1;

        if self.entries_written % 1000 == 0 {
            self.flush()?;
        }

        Ok(())
    }

    /// Flush buffered writes to disk.
    pub fn flush(&mut self) -> FocuslensResult<()> {
        self.writer
            .flush()
            .map_err(|e| FocuslensError::report_log(format!("Failed to flush report log: {e}")))
    }

    /// Number of entries written, header excluded.
    pub fn entries_written(&self) -> u64 {
        self.entries_written
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Drop for ReportWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
