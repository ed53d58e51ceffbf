//! Synthetic landmark sets with known gaze geometry.
//!
//! Used by tests and demos that need a face without a camera: every
//! landmark sits at the frame center except the eye groups, which are laid
//! out so the iris centroid lands exactly `offset` to the right of the eye
//! centroid.

use crate::geometry::Point2D;
use crate::landmarks::{EyeIndexGroup, GazeIndexGroups, LandmarkSet, FACE_MESH_LANDMARK_COUNT};

const LEFT_EYE_CENTER: Point2D = Point2D { x: 0.62, y: 0.44 };
const RIGHT_EYE_CENTER: Point2D = Point2D { x: 0.38, y: 0.44 };
const EYE_HALF_WIDTH: f64 = 0.03;
const EYE_HALF_HEIGHT: f64 = 0.012;
const IRIS_RADIUS: f64 = 0.006;

/// A Face Mesh sized landmark set with the given iris offsets (normalized
/// units, measured from each eye's contour centroid).
pub fn synthetic_face(left_offset: f64, right_offset: f64) -> LandmarkSet {
    synthetic_face_with(&GazeIndexGroups::FACE_MESH, left_offset, right_offset)
}

/// Same as [`synthetic_face`] for arbitrary index groups.
pub fn synthetic_face_with(
    groups: &GazeIndexGroups,
    left_offset: f64,
    right_offset: f64,
) -> LandmarkSet {
    let len = FACE_MESH_LANDMARK_COUNT.max(groups.max_index() + 1);
    let mut points = vec![Point2D::new(0.5, 0.5); len];

    place_eye(&mut points, &groups.left, LEFT_EYE_CENTER, left_offset);
    place_eye(&mut points, &groups.right, RIGHT_EYE_CENTER, right_offset);

    LandmarkSet::from_finite(points)
}

fn place_eye(points: &mut [Point2D], eye: &EyeIndexGroup, center: Point2D, offset: f64) {
    // Contour points come in mirrored pairs so their mean is the center.
    let half = eye.contour.len() / 2;
    for k in 0..half {
        let angle = std::f64::consts::PI * k as f64 / half as f64;
        let dx = EYE_HALF_WIDTH * angle.cos();
        let dy = EYE_HALF_HEIGHT * angle.sin();
        points[eye.contour[k]] = Point2D::new(center.x + dx, center.y + dy);
        points[eye.contour[k + half]] = Point2D::new(center.x - dx, center.y - dy);
    }

    let iris = Point2D::new(center.x + offset, center.y);
    let ring = [
        (IRIS_RADIUS, 0.0),
        (0.0, IRIS_RADIUS),
        (-IRIS_RADIUS, 0.0),
        (0.0, -IRIS_RADIUS),
    ];
    for (&index, (dx, dy)) in eye.iris.iter().zip(ring) {
        points[index] = Point2D::new(iris.x + dx, iris.y + dy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_are_reproduced() {
        let face = synthetic_face(0.01, 0.02);
        let groups = GazeIndexGroups::FACE_MESH;

        let left = face
            .centroid_of(&groups.left.iris)
            .unwrap()
            .distance_to(&face.centroid_of(&groups.left.contour).unwrap());
        let right = face
            .centroid_of(&groups.right.iris)
            .unwrap()
            .distance_to(&face.centroid_of(&groups.right.contour).unwrap());

        assert!((left - 0.01).abs() < 1e-9);
        assert!((right - 0.02).abs() < 1e-9);
        assert_eq!(face.len(), FACE_MESH_LANDMARK_COUNT);
    }
}
