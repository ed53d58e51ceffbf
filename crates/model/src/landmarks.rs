//! Facial landmark sets and the index groups used for gaze estimation.
//!
//! A [`LandmarkSet`] is the per-frame output of the face landmark model:
//! an ordered list of normalized points where each position always names
//! the same anatomical feature. [`GazeIndexGroups`] selects which of those
//! positions outline each eye and each iris.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ModelError;
use crate::geometry::{centroid, Point2D};

/// Landmarks produced per face by MediaPipe Face Mesh with iris refinement.
pub const FACE_MESH_LANDMARK_COUNT: usize = 478;

/// Points in an iris group.
pub const IRIS_POINTS: usize = 4;

/// Points in an eye-contour group.
pub const EYE_CONTOUR_POINTS: usize = 16;

/// Ordered facial landmarks for a single detected face.
///
/// Serialized as an array of `[x, y]` pairs. Every coordinate is finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<[f64; 2]>", into = "Vec<[f64; 2]>")]
pub struct LandmarkSet {
    points: Vec<Point2D>,
}

impl LandmarkSet {
    /// Build a landmark set, rejecting NaN or infinite coordinates.
    pub fn new(points: Vec<Point2D>) -> Result<Self, ModelError> {
        if let Some((index, p)) = points.iter().enumerate().find(|(_, p)| !p.is_finite()) {
            return Err(ModelError::NonFiniteLandmark {
                index,
                x: p.x,
                y: p.y,
            });
        }
        Ok(Self { points })
    }

    /// Wrap points already known to be finite.
    pub(crate) fn from_finite(points: Vec<Point2D>) -> Self {
        debug_assert!(points.iter().all(Point2D::is_finite));
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<Point2D> {
        self.points.get(index).copied()
    }

    /// The point at `index`, or an error naming the missing index.
    pub fn point(&self, index: usize) -> Result<Point2D, ModelError> {
        self.get(index).ok_or(ModelError::IndexOutOfRange {
            index,
            len: self.points.len(),
        })
    }

    /// Mean position of the points at `indices`.
    pub fn centroid_of(&self, indices: &[usize]) -> Result<Point2D, ModelError> {
        let selected = indices
            .iter()
            .map(|&i| self.point(i))
            .collect::<Result<Vec<_>, _>>()?;
        centroid(&selected).ok_or(ModelError::EmptySelection)
    }
}

impl TryFrom<Vec<[f64; 2]>> for LandmarkSet {
    type Error = ModelError;

    fn try_from(raw: Vec<[f64; 2]>) -> Result<Self, Self::Error> {
        Self::new(raw.into_iter().map(|[x, y]| Point2D::new(x, y)).collect())
    }
}

impl From<LandmarkSet> for Vec<[f64; 2]> {
    fn from(set: LandmarkSet) -> Self {
        set.points.into_iter().map(|p| [p.x, p.y]).collect()
    }
}

/// Landmark positions outlining one eye.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EyeIndexGroup {
    /// Points on the iris boundary.
    pub iris: [usize; IRIS_POINTS],
    /// Points on the eyelid contour.
    pub contour: [usize; EYE_CONTOUR_POINTS],
}

/// Iris and eye-contour groups for both eyes.
///
/// "Left" and "right" follow the landmark model's convention (the
/// subject's left eye), not the mirrored image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GazeIndexGroups {
    pub left: EyeIndexGroup,
    pub right: EyeIndexGroup,
}

impl GazeIndexGroups {
    /// MediaPipe Face Mesh indices (refined landmarks, 478 points).
    pub const FACE_MESH: GazeIndexGroups = GazeIndexGroups {
        left: EyeIndexGroup {
            iris: [474, 475, 476, 477],
            contour: [
                362, 382, 381, 380, 374, 373, 390, 249, 263, 466, 388, 387, 386, 385, 384, 398,
            ],
        },
        right: EyeIndexGroup {
            iris: [469, 470, 471, 472],
            contour: [
                33, 7, 163, 144, 145, 153, 154, 155, 133, 173, 157, 158, 159, 160, 161, 246,
            ],
        },
    };

    /// Every index referenced by the groups, left eye first.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        [&self.left, &self.right]
            .into_iter()
            .flat_map(|eye| eye.iris.iter().chain(eye.contour.iter()).copied())
    }

    /// Highest landmark index the groups need.
    pub fn max_index(&self) -> usize {
        self.indices().max().unwrap_or(0)
    }

    /// Check that no landmark belongs to more than one group.
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut seen = HashSet::new();
        for index in self.indices() {
            if !seen.insert(index) {
                return Err(ModelError::OverlappingGroups { index });
            }
        }
        Ok(())
    }

    /// Indices the groups need that `landmarks` does not provide.
    pub fn missing_in(&self, landmarks: &LandmarkSet) -> Vec<usize> {
        self.indices().filter(|&i| i >= landmarks.len()).collect()
    }
}

impl Default for GazeIndexGroups {
    fn default() -> Self {
        Self::FACE_MESH
    }
}
