//! Landmark stream validation.

use std::fmt;

use focuslens_common::error::{FocuslensError, FocuslensResult};
use focuslens_model::frame::TimestampNs;
use focuslens_model::landmarks::GazeIndexGroups;

use crate::LandmarkSource;

/// A problem found in a landmark stream.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamIssue {
    /// A line that could not be parsed as a frame.
    Unreadable { message: String },

    /// A frame whose timestamp is earlier than the one before it.
    NonMonotonic {
        frame: u64,
        t: TimestampNs,
        previous: TimestampNs,
    },

    /// A face frame too short for the gaze index groups.
    MissingLandmarks {
        frame: u64,
        t: TimestampNs,
        missing: usize,
        first_missing: usize,
    },
}

impl fmt::Display for StreamIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamIssue::Unreadable { message } => write!(f, "{message}"),
            StreamIssue::NonMonotonic { frame, t, previous } => write!(
                f,
                "frame {frame}: timestamp {t} ns is earlier than previous {previous} ns"
            ),
            StreamIssue::MissingLandmarks {
                frame,
                t,
                missing,
                first_missing,
            } => write!(
                f,
                "frame {frame} (t={t} ns): {missing} gaze landmark(s) missing, first index {first_missing}"
            ),
        }
    }
}

/// Statistics and issues collected from a full pass over a stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamValidation {
    pub frames: u64,
    pub face_frames: u64,
    pub first_t: Option<TimestampNs>,
    pub last_t: Option<TimestampNs>,
    pub issues: Vec<StreamIssue>,
}

impl StreamValidation {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Seconds covered between the first and last frame.
    pub fn duration_secs(&self) -> f64 {
        match (self.first_t, self.last_t) {
            (Some(first), Some(last)) => last.saturating_sub(first) as f64 / 1_000_000_000.0,
            _ => 0.0,
        }
    }
}

/// Read every frame of `source`, collecting issues instead of stopping.
///
/// Unparseable lines are reported and skipped. I/O errors end the pass.
pub fn validate_source<S>(source: &mut S, groups: &GazeIndexGroups) -> FocuslensResult<StreamValidation>
where
    S: LandmarkSource + ?Sized,
{
    let mut result = StreamValidation::default();
    let mut previous: Option<TimestampNs> = None;

    loop {
        let frame = match source.next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => break,
            Err(FocuslensError::Stream { message }) => {
                result.issues.push(StreamIssue::Unreadable { message });
                continue;
            }
            Err(e) => return Err(e),
        };

        let index = result.frames;
        result.frames += 1;
        result.first_t.get_or_insert(frame.timestamp_ns);

        if let Some(prev) = previous {
            if frame.timestamp_ns < prev {
                result.issues.push(StreamIssue::NonMonotonic {
                    frame: index,
                    t: frame.timestamp_ns,
                    previous: prev,
                });
            }
        }
        previous = Some(previous.map_or(frame.timestamp_ns, |p| p.max(frame.timestamp_ns)));
        result.last_t = previous;

        if let Some(landmarks) = frame.observation.landmarks() {
            result.face_frames += 1;
            let missing = groups.missing_in(landmarks);
            if let Some(&first_missing) = missing.first() {
                result.issues.push(StreamIssue::MissingLandmarks {
                    frame: index,
                    t: frame.timestamp_ns,
                    missing: missing.len(),
                    first_missing,
                });
            }
        }
    }

    tracing::debug!(
        source = source.name(),
        frames = result.frames,
        issues = result.issues.len(),
        "Validated landmark stream"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{JsonlReplaySource, MemorySource};
    use focuslens_model::frame::FrameRecord;
    use focuslens_model::landmarks::LandmarkSet;
    use focuslens_model::synthetic::synthetic_face;
    use focuslens_model::Point2D;
    use std::io::Cursor;

    #[test]
    fn test_clean_stream_has_no_issues() {
        let mut source = MemorySource::new(vec![
            FrameRecord::face_absent(0),
            FrameRecord::face_present(100_000_000, synthetic_face(0.0, 0.0)),
            FrameRecord::face_present(1_600_000_000, synthetic_face(0.02, 0.0)),
        ]);
        let result = validate_source(&mut source, &GazeIndexGroups::FACE_MESH).unwrap();

        assert!(result.is_valid());
        assert_eq!(result.frames, 3);
        assert_eq!(result.face_frames, 2);
        assert!((result.duration_secs() - 1.6).abs() < 1e-9);
    }

    #[test]
    fn test_reports_backwards_timestamps_and_short_faces() {
        let short = LandmarkSet::new(vec![Point2D::new(0.5, 0.5); 474]).unwrap();
        let mut source = MemorySource::new(vec![
            FrameRecord::face_absent(500),
            FrameRecord::face_absent(200),
            FrameRecord::face_present(600, short),
        ]);
        let result = validate_source(&mut source, &GazeIndexGroups::FACE_MESH).unwrap();

        assert_eq!(
            result.issues,
            vec![
                StreamIssue::NonMonotonic {
                    frame: 1,
                    t: 200,
                    previous: 500,
                },
                StreamIssue::MissingLandmarks {
                    frame: 2,
                    t: 600,
                    missing: 4,
                    first_missing: 474,
                },
            ]
        );
    }

    #[test]
    fn test_unreadable_lines_are_skipped() {
        let text = "{\"t\":0,\"type\":\"face_absent\"}\n{oops\n{\"t\":1,\"type\":\"face_absent\"}\n";
        let mut source = JsonlReplaySource::from_reader(Cursor::new(text.to_string()), "t").unwrap();
        let result = validate_source(&mut source, &GazeIndexGroups::FACE_MESH).unwrap();

        assert_eq!(result.frames, 2);
        assert_eq!(result.issues.len(), 1);
        assert!(matches!(result.issues[0], StreamIssue::Unreadable { .. }));
        assert!(result.issues[0].to_string().contains("line 2"));
    }
}
