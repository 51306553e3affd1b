// Landmark types
// A tracked hand is exactly 21 points in the order the hand tracking model emits them

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of landmarks per tracked hand
pub const LANDMARK_COUNT: usize = 21;

/// Landmark indices (hand tracking model convention)
#[allow(dead_code)]
pub mod index {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_FINGER_MCP: usize = 5;
    pub const INDEX_FINGER_PIP: usize = 6;
    pub const INDEX_FINGER_DIP: usize = 7;
    pub const INDEX_FINGER_TIP: usize = 8;
    pub const MIDDLE_FINGER_MCP: usize = 9;
    pub const MIDDLE_FINGER_PIP: usize = 10;
    pub const MIDDLE_FINGER_DIP: usize = 11;
    pub const MIDDLE_FINGER_TIP: usize = 12;
    pub const RING_FINGER_MCP: usize = 13;
    pub const RING_FINGER_PIP: usize = 14;
    pub const RING_FINGER_DIP: usize = 15;
    pub const RING_FINGER_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;
}

/// A 3-D point, serialized as `[x, y, z]`
///
/// For raw landmarks x/y are normalized image coordinates (y grows downward)
/// and z is depth relative to the wrist.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub const ZERO: Point3 = Point3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Point3 { x, y, z }
    }

    /// Component-wise difference `self - other`
    pub fn sub(&self, other: &Point3) -> Point3 {
        Point3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    /// Uniform scale by `factor`
    pub fn scale(&self, factor: f32) -> Point3 {
        Point3::new(self.x * factor, self.y * factor, self.z * factor)
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point3) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl From<[f32; 3]> for Point3 {
    fn from(v: [f32; 3]) -> Self {
        Point3::new(v[0], v[1], v[2])
    }
}

impl From<Point3> for [f32; 3] {
    fn from(p: Point3) -> Self {
        [p.x, p.y, p.z]
    }
}

/// Errors raised at the landmark boundary
#[derive(Debug, Error, PartialEq)]
pub enum LandmarkError {
    #[error("Expected {expected} landmarks, got {actual}")]
    WrongArity { expected: usize, actual: usize },
}

/// One observed hand: exactly [`LANDMARK_COUNT`] points
///
/// Any other arity is rejected on construction, so downstream code can index
/// with the constants in [`index`] without bounds checks failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point3>", into = "Vec<Point3>")]
pub struct LandmarkSet {
    points: [Point3; LANDMARK_COUNT],
}

impl LandmarkSet {
    pub fn new(points: [Point3; LANDMARK_COUNT]) -> Self {
        LandmarkSet { points }
    }

    pub fn points(&self) -> &[Point3; LANDMARK_COUNT] {
        &self.points
    }

    pub fn point(&self, index: usize) -> Point3 {
        self.points[index]
    }
}

/// Convert a variable-length point list, checking the arity
pub fn fixed_points(points: Vec<Point3>) -> Result<[Point3; LANDMARK_COUNT], LandmarkError> {
    let actual = points.len();
    points.try_into().map_err(|_| LandmarkError::WrongArity {
        expected: LANDMARK_COUNT,
        actual,
    })
}

impl TryFrom<Vec<Point3>> for LandmarkSet {
    type Error = LandmarkError;

    fn try_from(points: Vec<Point3>) -> Result<Self, Self::Error> {
        Ok(LandmarkSet::new(fixed_points(points)?))
    }
}

impl TryFrom<Vec<[f32; 3]>> for LandmarkSet {
    type Error = LandmarkError;

    fn try_from(coords: Vec<[f32; 3]>) -> Result<Self, Self::Error> {
        LandmarkSet::try_from(coords.into_iter().map(Point3::from).collect::<Vec<_>>())
    }
}

impl From<LandmarkSet> for Vec<Point3> {
    fn from(set: LandmarkSet) -> Self {
        set.points.to_vec()
    }
}
