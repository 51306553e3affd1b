// Landmark module
// Fixed-arity hand landmarks, pose normalization, and landmark sources

pub mod normalize;
pub mod provider;
pub mod types;

pub use normalize::{max_pairwise_distance, normalize, NormalizedPose};
pub use provider::{JsonLinesProvider, LandmarkProvider, Observation, ProviderError};
pub use types::{index, LandmarkError, LandmarkSet, Point3, LANDMARK_COUNT};
