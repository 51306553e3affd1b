// Landmark normalization
// Translation and scale invariant hand pose used for template matching and classification

use serde::{Deserialize, Serialize};

use crate::landmarks::types::{fixed_points, LandmarkError, LandmarkSet, Point3, LANDMARK_COUNT};

/// A hand pose with the wrist at the origin and a maximum pairwise
/// distance of 1.0 between its points
///
/// Degenerate input (all points coincident) normalizes to the all-zero pose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point3>", into = "Vec<Point3>")]
pub struct NormalizedPose {
    points: [Point3; LANDMARK_COUNT],
}

impl NormalizedPose {
    /// The all-zero pose produced by degenerate input
    pub fn zero() -> Self {
        NormalizedPose {
            points: [Point3::ZERO; LANDMARK_COUNT],
        }
    }

    pub fn points(&self) -> &[Point3; LANDMARK_COUNT] {
        &self.points
    }

    pub fn point(&self, index: usize) -> Point3 {
        self.points[index]
    }

    /// True when normalization had nothing to scale
    pub fn is_degenerate(&self) -> bool {
        self.points.iter().all(|p| *p == Point3::ZERO)
    }

    /// Mean per-point Euclidean distance to another pose
    pub fn mean_distance_to(&self, other: &NormalizedPose) -> f32 {
        let total: f32 = self
            .points
            .iter()
            .zip(other.points.iter())
            .map(|(a, b)| a.distance_to(b))
            .sum();
        total / LANDMARK_COUNT as f32
    }
}

impl TryFrom<Vec<Point3>> for NormalizedPose {
    type Error = LandmarkError;

    fn try_from(points: Vec<Point3>) -> Result<Self, Self::Error> {
        Ok(NormalizedPose {
            points: fixed_points(points)?,
        })
    }
}

impl From<NormalizedPose> for Vec<Point3> {
    fn from(pose: NormalizedPose) -> Self {
        pose.points.to_vec()
    }
}

/// Normalize a raw landmark set
///
/// Algorithm:
/// 1. Translate so point 0 (wrist) is the origin
/// 2. Find the maximum pairwise distance over all point pairs
/// 3. Divide every point by it, or return the zero pose if it is zero
pub fn normalize(raw: &LandmarkSet) -> NormalizedPose {
    let wrist = raw.point(0);
    let mut points = [Point3::ZERO; LANDMARK_COUNT];
    for (out, p) in points.iter_mut().zip(raw.points().iter()) {
        *out = p.sub(&wrist);
    }

    let max_dist = max_pairwise_distance(&points);
    if max_dist <= 0.0 || !max_dist.is_finite() {
        return NormalizedPose::zero();
    }

    let inv = 1.0 / max_dist;
    for p in points.iter_mut() {
        *p = p.scale(inv);
    }

    NormalizedPose { points }
}

/// Largest Euclidean distance between any two points
pub fn max_pairwise_distance(points: &[Point3]) -> f32 {
    let mut max_dist = 0.0f32;
    for (i, a) in points.iter().enumerate() {
        for b in points.iter().skip(i + 1) {
            max_dist = max_dist.max(a.distance_to(b));
        }
    }
    max_dist
}
