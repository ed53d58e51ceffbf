//! Attention tracking session.
//!
//! A session owns one classifier, one rolling window, and one set of
//! counters. Nothing is shared between sessions, so several camera streams
//! can be tracked side by side.
//!
//! Lifecycle: `NotStarted -> Running -> Ended`. Frames are only accepted
//! while running; anything else is a caller bug and returns
//! [`FocuslensError::SessionNotRunning`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use focuslens_common::clock::Clock;
use focuslens_common::config::TrackerSettings;
use focuslens_common::error::{FocuslensError, FocuslensResult};
use focuslens_model::frame::FrameObservation;
use focuslens_model::report::{FrameJudgment, FrameReport, SessionSummary};

use crate::aggregator::SessionAggregator;
use crate::classifier::{GazeClassifier, IrisOffsetClassifier};
use crate::smoother::{AttentionSmoother, WINDOW_SIZE};

/// State of a tracking session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Session created but not started.
    NotStarted,
    /// Accepting frames.
    Running,
    /// Stopped; the summary is final.
    Ended,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SessionState::NotStarted => "not started",
            SessionState::Running => "running",
            SessionState::Ended => "ended",
        })
    }
}

/// Classifier, smoother, and aggregator driven together, one frame at a time.
pub struct AttentionSession {
    classifier: Box<dyn GazeClassifier>,
    smoother: AttentionSmoother,
    aggregator: SessionAggregator,
    clock: Arc<dyn Clock>,
    state: SessionState,
    summary: Option<SessionSummary>,
}

impl AttentionSession {
    /// Create a session with the default classifier and window.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_classifier(Box::new(IrisOffsetClassifier::with_defaults()), WINDOW_SIZE, clock)
    }

    /// Create a session from tracker settings.
    pub fn from_settings(settings: &TrackerSettings, clock: Arc<dyn Clock>) -> FocuslensResult<Self> {
        settings.validate()?;
        let classifier = IrisOffsetClassifier::with_threshold(settings.offset_threshold)?;
        Ok(Self::with_classifier(
            Box::new(classifier),
            settings.window_size,
            clock,
        ))
    }

    /// Create a session with a custom classifier.
    pub fn with_classifier(
        classifier: Box<dyn GazeClassifier>,
        window: usize,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let start_ns = clock.now_ns();
        Self {
            classifier,
            smoother: AttentionSmoother::with_window(window),
            aggregator: SessionAggregator::new(start_ns),
            clock,
            state: SessionState::NotStarted,
            summary: None,
        }
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Begin accepting frames.
    ///
    /// Records the start time, zeroes the counters, and clears the window.
    /// An ended session cannot be restarted; create a new one instead.
    pub fn start(&mut self) -> FocuslensResult<()> {
        if self.state != SessionState::NotStarted {
            return Err(FocuslensError::invalid_transition(format!(
                "cannot start a session that is {}",
                self.state
            )));
        }

        self.aggregator.reset(self.clock.now_ns());
        self.smoother.clear();
        self.summary = None;
        self.state = SessionState::Running;

        tracing::info!(
            classifier = self.classifier.name(),
            window = self.smoother.capacity(),
            "Attention session started"
        );
        Ok(())
    }

    /// Classify one frame and fold it into the window and counters.
    pub fn process_frame(&mut self, observation: &FrameObservation) -> FocuslensResult<FrameReport> {
        self.ensure_running()?;

        let judgment = match observation.landmarks() {
            Some(landmarks) => FrameJudgment::from_focus(self.classifier.classify(landmarks)?),
            None => FrameJudgment::NoFace,
        };
        self.record(judgment)
    }

    /// Fold an already-made judgment into the window and counters.
    ///
    /// `NoFace` frames leave both untouched; the report then carries the
    /// previous score (or `None` if no face has been seen yet).
    pub fn record(&mut self, judgment: FrameJudgment) -> FocuslensResult<FrameReport> {
        self.ensure_running()?;

        let score = if judgment.is_face_present() {
            Some(self.smoother.update(judgment.is_focused()))
        } else {
            self.smoother.score()
        };
        self.aggregator.record(judgment);

        let report = FrameReport {
            status: judgment,
            instantaneous_score_percent: score,
            session_elapsed_seconds: self.elapsed_seconds(),
        };
        tracing::debug!(
            status = %judgment,
            score = ?report.instantaneous_score_percent,
            total_frames = self.aggregator.total_frames(),
            "Frame recorded"
        );
        Ok(report)
    }

    /// Rolling-window score, `None` until a face has been seen.
    pub fn instantaneous_score(&self) -> Option<f64> {
        self.smoother.score()
    }

    /// Whole seconds since `start()`, frozen once the session ends.
    pub fn elapsed_seconds(&self) -> u64 {
        match (self.state, &self.summary) {
            (SessionState::Running, _) => {
                self.aggregator.elapsed_ns(self.clock.now_ns()) / 1_000_000_000
            }
            (SessionState::Ended, Some(summary)) => summary.total_elapsed_seconds,
            _ => 0,
        }
    }

    /// Summary as of now without ending the session.
    ///
    /// Repeated calls return the same result while the clock and counters
    /// are unchanged. After `stop()` this is the stored final summary.
    pub fn finalize(&self) -> FocuslensResult<SessionSummary> {
        match (self.state, self.summary) {
            (SessionState::Running, _) => Ok(self.aggregator.finalize(self.clock.now_ns())),
            (SessionState::Ended, Some(summary)) => Ok(summary),
            _ => Err(FocuslensError::session_not_running(self.state)),
        }
    }

    /// End the session and return its final summary.
    pub fn stop(&mut self) -> FocuslensResult<SessionSummary> {
        self.ensure_running()?;

        let summary = self.aggregator.finalize(self.clock.now_ns());
        self.summary = Some(summary);
        self.state = SessionState::Ended;

        tracing::info!(
            elapsed_secs = summary.elapsed_seconds,
            total_frames = summary.total_frames,
            focused_frames = summary.focused_frames,
            overall = ?summary.overall_focus_percent,
            "Attention session ended"
        );
        Ok(summary)
    }

    /// Final summary, available once the session has ended.
    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    pub fn smoother(&self) -> &AttentionSmoother {
        &self.smoother
    }

    pub fn aggregator(&self) -> &SessionAggregator {
        &self.aggregator
    }

    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    fn ensure_running(&self) -> FocuslensResult<()> {
        if self.state != SessionState::Running {
            return Err(FocuslensError::session_not_running(self.state));
        }
        Ok(())
    }
}

impl fmt::Debug for AttentionSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttentionSession")
            .field("classifier", &self.classifier.name())
            .field("smoother", &self.smoother)
            .field("aggregator", &self.aggregator)
            .field("state", &self.state)
            .field("summary", &self.summary)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use focuslens_common::clock::ManualClock;
    use focuslens_model::synthetic::synthetic_face;

    fn session_at(clock: &Arc<ManualClock>) -> AttentionSession {
        AttentionSession::new(clock.clone())
    }

    #[test]
    fn test_frames_rejected_before_start() {
        let clock = Arc::new(ManualClock::new());
        let mut session = session_at(&clock);
        let err = session.record(FrameJudgment::Focused).unwrap_err();
        assert!(matches!(err, FocuslensError::SessionNotRunning { .. }));
        assert!(session.finalize().is_err());
    }

    #[test]
    fn test_frames_rejected_after_stop() {
        let clock = Arc::new(ManualClock::new());
        let mut session = session_at(&clock);
        session.start().unwrap();
        session.stop().unwrap();

        assert!(matches!(
            session.record(FrameJudgment::Focused),
            Err(FocuslensError::SessionNotRunning { .. })
        ));
        assert!(matches!(
            session.process_frame(&FrameObservation::FaceAbsent),
            Err(FocuslensError::SessionNotRunning { .. })
        ));
        assert!(session.stop().is_err());
    }

    #[test]
    fn test_ended_session_cannot_restart() {
        let clock = Arc::new(ManualClock::new());
        let mut session = session_at(&clock);
        session.start().unwrap();
        assert!(matches!(
            session.start(),
            Err(FocuslensError::InvalidTransition { .. })
        ));
        session.stop().unwrap();
        assert!(session.start().is_err());
        assert_eq!(session.state(), SessionState::Ended);
    }

    #[test]
    fn test_no_face_before_any_face_has_no_score() {
        let clock = Arc::new(ManualClock::new());
        let mut session = session_at(&clock);
        session.start().unwrap();

        let report = session.process_frame(&FrameObservation::FaceAbsent).unwrap();
        assert_eq!(report.status, FrameJudgment::NoFace);
        assert_eq!(report.instantaneous_score_percent, None);
    }

    #[test]
    fn test_no_face_keeps_previous_score() {
        let clock = Arc::new(ManualClock::new());
        let mut session = session_at(&clock);
        session.start().unwrap();

        session.record(FrameJudgment::Focused).unwrap();
        session.record(FrameJudgment::LookingAway).unwrap();
        let report = session.record(FrameJudgment::NoFace).unwrap();
        assert_eq!(report.instantaneous_score_percent, Some(50.0));
        assert_eq!(session.smoother().len(), 2);
        assert_eq!(session.aggregator().total_frames(), 2);
    }

    #[test]
    fn test_landmarks_are_classified() {
        let clock = Arc::new(ManualClock::new());
        let mut session = session_at(&clock);
        session.start().unwrap();

        let focused = FrameObservation::FacePresent {
            landmarks: synthetic_face(0.005, 0.005),
        };
        let away = FrameObservation::FacePresent {
            landmarks: synthetic_face(0.005, 0.03),
        };
        assert_eq!(
            session.process_frame(&focused).unwrap().status,
            FrameJudgment::Focused
        );
        let report = session.process_frame(&away).unwrap();
        assert_eq!(report.status, FrameJudgment::LookingAway);
        assert_eq!(report.instantaneous_score_percent, Some(50.0));
    }

    #[test]
    fn test_elapsed_time_follows_clock_and_freezes_on_stop() {
        let clock = Arc::new(ManualClock::at(1_000_000_000));
        let mut session = session_at(&clock);
        clock.advance_ns(4_000_000_000);
        session.start().unwrap();

        clock.advance_ns(2_600_000_000);
        let report = session.record(FrameJudgment::Focused).unwrap();
        assert_eq!(report.session_elapsed_seconds, 2);

        clock.advance_ns(1_000_000_000);
        let summary = session.stop().unwrap();
        assert_eq!(summary.total_elapsed_seconds, 3);
        assert!((summary.elapsed_seconds - 3.6).abs() < 1e-9);

        clock.advance_ns(10_000_000_000);
        assert_eq!(session.elapsed_seconds(), 3);
        assert_eq!(session.finalize().unwrap(), summary);
        assert_eq!(session.summary(), Some(&summary));
    }

    #[test]
    fn test_from_settings_applies_window_and_threshold() {
        let clock = Arc::new(ManualClock::new());
        let settings = TrackerSettings {
            window_size: 2,
            offset_threshold: 0.05,
        };
        let mut session = AttentionSession::from_settings(&settings, clock).unwrap();
        session.start().unwrap();

        let wide = FrameObservation::FacePresent {
            landmarks: synthetic_face(0.03, 0.03),
        };
        assert_eq!(
            session.process_frame(&wide).unwrap().status,
            FrameJudgment::Focused
        );
        session.record(FrameJudgment::LookingAway).unwrap();
        session.record(FrameJudgment::LookingAway).unwrap();
        assert_eq!(session.instantaneous_score(), Some(0.0));
        assert_eq!(session.smoother().capacity(), 2);
    }

    #[test]
    fn test_from_settings_rejects_bad_window() {
        let clock = Arc::new(ManualClock::new());
        let settings = TrackerSettings {
            window_size: 0,
            ..Default::default()
        };
        assert!(AttentionSession::from_settings(&settings, clock).is_err());
    }

    #[test]
    fn test_default_settings_match_tracker_constants() {
        let settings = TrackerSettings::default();
        assert_eq!(settings.window_size, WINDOW_SIZE);
        assert_eq!(
            settings.offset_threshold,
            crate::classifier::OFFSET_THRESHOLD
        );
    }

    #[test]
    fn test_session_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<AttentionSession>();
    }

    #[test]
    fn test_state_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&SessionState::NotStarted).unwrap(),
            "\"not_started\""
        );
        let state: SessionState = serde_json::from_str("\"ended\"").unwrap();
        assert_eq!(state, SessionState::Ended);
        assert_eq!(state.to_string(), "ended");
    }
}
