//! Per-frame gaze classification.
//!
//! The default heuristic compares where each iris sits inside its eye: when
//! both iris centroids are close to their eye-contour centroids the user is
//! taken to be looking at the screen. Distances are measured in normalized
//! image units, which keeps the rule roughly independent of how far the user
//! sits from the camera. Head pose is not compensated.

use focuslens_common::error::{FocuslensError, FocuslensResult};
use focuslens_model::landmarks::{EyeIndexGroup, GazeIndexGroups, LandmarkSet};

/// Default iris offset threshold (normalized units).
pub const OFFSET_THRESHOLD: f64 = 0.015;

/// Turns one frame's landmarks into a focused / not focused verdict.
pub trait GazeClassifier: Send {
    /// `true` if the gaze is judged to be on screen.
    fn classify(&self, landmarks: &LandmarkSet) -> FocuslensResult<bool>;

    /// Classifier name for logging.
    fn name(&self) -> &str;
}

/// Iris offset per eye for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyeOffsets {
    pub left: f64,
    pub right: f64,
}

impl EyeOffsets {
    /// Both eyes strictly inside `threshold`.
    pub fn both_within(&self, threshold: f64) -> bool {
        self.left < threshold && self.right < threshold
    }
}

/// Iris-offset heuristic: focused iff both irises sit within
/// `threshold` of their eye centers.
#[derive(Debug, Clone)]
pub struct IrisOffsetClassifier {
    groups: GazeIndexGroups,
    threshold: f64,
}

impl IrisOffsetClassifier {
    /// Create a classifier with explicit index groups and threshold.
    pub fn new(groups: GazeIndexGroups, threshold: f64) -> FocuslensResult<Self> {
        groups
            .validate()
            .map_err(|e| FocuslensError::config(e.to_string()))?;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(FocuslensError::config(format!(
                "offset threshold must be a positive number, got {threshold}"
            )));
        }
        Ok(Self { groups, threshold })
    }

    /// Face Mesh index groups with the default threshold.
    pub fn with_defaults() -> Self {
        Self {
            groups: GazeIndexGroups::FACE_MESH,
            threshold: OFFSET_THRESHOLD,
        }
    }

    /// Face Mesh index groups with a custom threshold.
    pub fn with_threshold(threshold: f64) -> FocuslensResult<Self> {
        Self::new(GazeIndexGroups::FACE_MESH, threshold)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn groups(&self) -> &GazeIndexGroups {
        &self.groups
    }

    /// Distance between iris center and eye center, per eye.
    pub fn eye_offsets(&self, landmarks: &LandmarkSet) -> FocuslensResult<EyeOffsets> {
        Ok(EyeOffsets {
            left: eye_offset(landmarks, &self.groups.left)?,
            right: eye_offset(landmarks, &self.groups.right)?,
        })
    }
}

impl Default for IrisOffsetClassifier {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl GazeClassifier for IrisOffsetClassifier {
    fn classify(&self, landmarks: &LandmarkSet) -> FocuslensResult<bool> {
        let offsets = self.eye_offsets(landmarks)?;
        let focused = offsets.both_within(self.threshold);
        tracing::trace!(
            left = offsets.left,
            right = offsets.right,
            focused,
            "Classified gaze"
        );
        Ok(focused)
    }

    fn name(&self) -> &str {
        "iris-offset"
    }
}

fn eye_offset(landmarks: &LandmarkSet, eye: &EyeIndexGroup) -> FocuslensResult<f64> {
    let iris = landmarks
        .centroid_of(&eye.iris)
        .map_err(|e| FocuslensError::invalid_landmarks(e.to_string()))?;
    let center = landmarks
        .centroid_of(&eye.contour)
        .map_err(|e| FocuslensError::invalid_landmarks(e.to_string()))?;
    Ok(iris.distance_to(&center))
}
