//! Landmark source implementations.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use focuslens_common::error::{FocuslensError, FocuslensResult};
use focuslens_model::frame::{parse_frame_line, parse_header_line, FrameRecord, FrameStreamHeader};

use crate::LandmarkSource;

/// Reads a recorded landmark stream (JSONL) one frame at a time.
pub struct JsonlReplaySource {
    name: String,
    lines: std::io::Lines<Box<dyn BufRead + Send>>,
    header: Option<FrameStreamHeader>,
    /// First non-header line, read while probing for the header.
    pending: Option<String>,
    line_number: usize,
}

impl JsonlReplaySource {
    /// Open a landmark stream file.
    pub fn open(path: impl AsRef<Path>) -> FocuslensResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(FocuslensError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), path.display().to_string())
    }

    /// Read a landmark stream from any buffered reader.
    pub fn from_reader(
        reader: impl BufRead + Send + 'static,
        name: impl Into<String>,
    ) -> FocuslensResult<Self> {
        let boxed: Box<dyn BufRead + Send> = Box::new(reader);
        let mut source = Self {
            name: name.into(),
            lines: boxed.lines(),
            header: None,
            pending: None,
            line_number: 0,
        };
        source.read_header()?;
        Ok(source)
    }

    /// Stream header, if the first line carried one.
    pub fn header(&self) -> Option<&FrameStreamHeader> {
        self.header.as_ref()
    }

    /// 1-based number of the last line read.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    fn read_header(&mut self) -> FocuslensResult<()> {
        let Some(first) = self.lines.next().transpose()? else {
            return Ok(());
        };
        self.line_number = 1;

        match parse_header_line(&first) {
            Some(Ok(header)) => {
                tracing::debug!(
                    source = %header.source,
                    schema = %header.schema_version,
                    "Read landmark stream header"
                );
                self.header = Some(header);
            }
            Some(Err(e)) => {
                tracing::warn!(error = %e, "Ignoring unreadable landmark stream header");
            }
            None => self.pending = Some(first),
        }
        Ok(())
    }
}

impl LandmarkSource for JsonlReplaySource {
    fn next_frame(&mut self) -> FocuslensResult<Option<FrameRecord>> {
        if let Some(line) = self.pending.take() {
            if let Some(frame) = parse_line(&line, self.line_number)? {
                return Ok(Some(frame));
            }
        }

        while let Some(line) = self.lines.next().transpose()? {
            self.line_number += 1;
            if let Some(frame) = parse_line(&line, self.line_number)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn parse_line(line: &str, line_number: usize) -> FocuslensResult<Option<FrameRecord>> {
    parse_frame_line(line, line_number).map_err(|e| FocuslensError::stream(e.to_string()))
}

/// Serves frames held in memory.
pub struct MemorySource {
    frames: VecDeque<FrameRecord>,
}

impl MemorySource {
    pub fn new(frames: Vec<FrameRecord>) -> Self {
        Self {
            frames: frames.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl LandmarkSource for MemorySource {
    fn next_frame(&mut self) -> FocuslensResult<Option<FrameRecord>> {
        Ok(self.frames.pop_front())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn source_from(text: &str) -> JsonlReplaySource {
        JsonlReplaySource::from_reader(Cursor::new(text.to_string()), "test").unwrap()
    }

    fn drain(source: &mut JsonlReplaySource) -> Vec<FrameRecord> {
        let mut frames = Vec::new();
        while let Some(frame) = source.next_frame().unwrap() {
            frames.push(frame);
        }
        frames
    }

    #[test]
    fn test_reads_header_then_frames() {
        let mut source = source_from(
            "# {\"schema_version\":\"1.0\",\"source\":\"unit\"}\n\
             {\"t\":0,\"type\":\"face_absent\"}\n\
             \n\
             {\"t\":10,\"type\":\"face_present\",\"landmarks\":[[0.5,0.5]]}\n",
        );
        assert_eq!(source.header().unwrap().source, "unit");

        let frames = drain(&mut source);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].timestamp_ns, 10);
        assert_eq!(frames[1].observation.landmarks().unwrap().len(), 1);
    }

    #[test]
    fn test_stream_without_header_keeps_first_frame() {
        let mut source = source_from(
            "{\"t\":0,\"type\":\"face_absent\"}\n{\"t\":5,\"type\":\"face_absent\"}\n",
        );
        assert!(source.header().is_none());
        assert_eq!(drain(&mut source).len(), 2);
    }

    #[test]
    fn test_bad_line_reports_line_number() {
        let mut source = source_from(
            "# {\"schema_version\":\"1.0\"}\n{\"t\":0,\"type\":\"face_absent\"}\nnot json\n",
        );
        assert!(source.next_frame().unwrap().is_some());
        let err = source.next_frame().unwrap_err();
        assert!(err.to_string().contains("line 3"), "unexpected error: {err}");
    }

    #[test]
    fn test_empty_stream() {
        let mut source = source_from("");
        assert!(source.header().is_none());
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_missing_file() {
        let err = JsonlReplaySource::open("/nonexistent/focuslens/frames.jsonl")
            .err()
            .unwrap();
        assert!(matches!(err, FocuslensError::FileNotFound { .. }));
    }

    #[test]
    fn test_fixture_stream_opens() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("fixtures")
            .join("sample-session")
            .join("frames.jsonl");
        let mut source = JsonlReplaySource::open(path).unwrap();
        assert_eq!(source.header().unwrap().landmark_count, Some(478));
        assert_eq!(drain(&mut source).len(), 30);
    }

    #[test]
    fn test_memory_source_drains_in_order() {
        let mut source = MemorySource::new(vec![
            FrameRecord::face_absent(1),
            FrameRecord::face_absent(2),
        ]);
        assert_eq!(source.next_frame().unwrap().unwrap().timestamp_ns, 1);
        assert_eq!(source.remaining(), 1);
        assert_eq!(source.next_frame().unwrap().unwrap().timestamp_ns, 2);
        assert!(source.next_frame().unwrap().is_none());
    }
}
