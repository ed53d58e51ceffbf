//! Frame records for the landmark stream.
//!
//! A landmark stream is JSONL: an optional `# {header}` comment line followed
//! by one [`FrameRecord`] per processed camera frame. Frames where the
//! landmark model found no face are recorded explicitly so replays see the
//! same gaps the live tracker saw.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::landmarks::LandmarkSet;

/// Monotonic timestamp in nanoseconds since stream start.
pub type TimestampNs = u64;

/// Current landmark stream schema version.
pub const FRAME_SCHEMA_VERSION: &str = "1.0";

/// What the landmark model reported for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FrameObservation {
    /// No face was detected.
    FaceAbsent,

    /// A face was detected; its landmarks follow.
    FacePresent { landmarks: LandmarkSet },
}

/// A single frame observation with timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Monotonic nanoseconds since stream start.
    #[serde(rename = "t")]
    pub timestamp_ns: TimestampNs,

    /// The observation payload.
    #[serde(flatten)]
    pub observation: FrameObservation,
}

/// Stream metadata written as the first (comment) line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameStreamHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Wall-clock time at stream start (RFC 3339).
    #[serde(default)]
    pub epoch_wall: String,

    /// Producer of the landmarks (e.g. "mediapipe-face-mesh").
    #[serde(default)]
    pub source: String,

    /// Landmarks per detected face.
    #[serde(default)]
    pub landmark_count: Option<usize>,

    /// Nominal camera frame rate.
    #[serde(default)]
    pub fps: Option<f64>,
}

impl FrameObservation {
    pub fn landmarks(&self) -> Option<&LandmarkSet> {
        match self {
            FrameObservation::FaceAbsent => None,
            FrameObservation::FacePresent { landmarks } => Some(landmarks),
        }
    }

    pub fn is_face_present(&self) -> bool {
        matches!(self, FrameObservation::FacePresent { .. })
    }
}

impl FrameRecord {
    /// Create a frame with no detected face.
    pub fn face_absent(timestamp_ns: TimestampNs) -> Self {
        Self {
            timestamp_ns,
            observation: FrameObservation::FaceAbsent,
        }
    }

    /// Create a frame with a detected face.
    pub fn face_present(timestamp_ns: TimestampNs, landmarks: LandmarkSet) -> Self {
        Self {
            timestamp_ns,
            observation: FrameObservation::FacePresent { landmarks },
        }
    }

    /// Timestamp as fractional seconds since stream start.
    pub fn timestamp_secs(&self) -> f64 {
        self.timestamp_ns as f64 / 1_000_000_000.0
    }
}

impl FrameStreamHeader {
    pub fn new(source: impl Into<String>, epoch_wall: impl Into<String>) -> Self {
        Self {
            schema_version: FRAME_SCHEMA_VERSION.to_string(),
            epoch_wall: epoch_wall.into(),
            source: source.into(),
            landmark_count: None,
            fps: None,
        }
    }
}

/// Parse one stream line. Blank lines and `#` comment lines yield `None`.
///
/// `line_number` is 1-based and only used for error messages.
pub fn parse_frame_line(line: &str, line_number: usize) -> Result<Option<FrameRecord>, ModelError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|source| ModelError::Parse {
            line: line_number,
            source,
        })
}

/// Parse the `# {header}` line if the stream starts with one.
pub fn parse_header_line(line: &str) -> Option<Result<FrameStreamHeader, ModelError>> {
    let json = line.trim().strip_prefix('#')?.trim();
    if !json.starts_with('{') {
        return None;
    }
    Some(
        serde_json::from_str(json).map_err(|source| ModelError::Parse { line: 1, source }),
    )
}

/// Parse frames from JSONL content (one JSON object per line).
pub fn parse_frames(jsonl: &str) -> Result<Vec<FrameRecord>, ModelError> {
    let mut frames = Vec::new();
    for (i, line) in jsonl.lines().enumerate() {
        if let Some(frame) = parse_frame_line(line, i + 1)? {
            frames.push(frame);
        }
    }
    Ok(frames)
}

/// Serialize frames to JSONL format.
pub fn serialize_frames(frames: &[FrameRecord]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for frame in frames {
        output.push_str(&serde_json::to_string(frame)?);
        output.push('\n');
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point2D;

    fn tiny_landmarks() -> LandmarkSet {
        LandmarkSet::new(vec![Point2D::new(0.5, 0.25), Point2D::new(0.75, 0.5)]).unwrap()
    }

    #[test]
    fn test_json_format() {
        let frame = FrameRecord::face_present(33_000_000, tiny_landmarks());
        let json = serde_json::to_string(&frame).unwrap();
        assert_eq!(
            json,
            r#"{"t":33000000,"type":"face_present","landmarks":[[0.5,0.25],[0.75,0.5]]}"#
        );

        let absent = serde_json::to_string(&FrameRecord::face_absent(0)).unwrap();
        assert_eq!(absent, r#"{"t":0,"type":"face_absent"}"#);
    }

    #[test]
    fn test_jsonl_roundtrip() {
        let frames = vec![
            FrameRecord::face_absent(0),
            FrameRecord::face_present(33_000_000, tiny_landmarks()),
        ];
        let jsonl = serialize_frames(&frames).unwrap();
        assert_eq!(parse_frames(&jsonl).unwrap(), frames);
    }

    #[test]
    fn test_parse_frames_skips_header_and_blank_lines() {
        let jsonl = "# {\"schema_version\":\"1.0\"}\n\n{\"t\":5,\"type\":\"face_absent\"}\n";
        let frames = parse_frames(jsonl).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].timestamp_ns, 5);
        assert!(!frames[0].observation.is_face_present());
    }

    #[test]
    fn test_parse_error_reports_line_number() {
        let jsonl = "{\"t\":0,\"type\":\"face_absent\"}\n{\"t\":1,\"type\":\"bogus\"}\n";
        let err = parse_frames(jsonl).unwrap_err();
        assert!(matches!(err, ModelError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_header_line_parsing() {
        let header = parse_header_line(
            "# {\"schema_version\":\"1.0\",\"source\":\"mediapipe-face-mesh\",\"landmark_count\":478}",
        )
        .unwrap()
        .unwrap();
        assert_eq!(header.source, "mediapipe-face-mesh");
        assert_eq!(header.landmark_count, Some(478));
        assert_eq!(header.fps, None);

        assert!(parse_header_line("{\"t\":0,\"type\":\"face_absent\"}").is_none());
        assert!(parse_header_line("# just a note").is_none());
    }

    #[test]
    fn test_timestamp_secs() {
        let frame = FrameRecord::face_absent(1_500_000_000);
        assert!((frame.timestamp_secs() - 1.5).abs() < 1e-9);
    }
}
