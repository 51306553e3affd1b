// Gesture recognition module
// Finger counting, template matching, classification, and the hold/cooldown state machine

pub mod classifier;
pub mod heuristic;
pub mod state_machine;
pub mod templates;
pub mod types;

pub use classifier::{
    ClassificationResult, ClassifierConfig, GestureClassifier, DEFAULT_MATCH_THRESHOLD,
};
pub use heuristic::count_fingers;
pub use state_machine::{FireEvent, GestureStateMachine, HoldConfig, RecognitionPhase};
pub use templates::{match_template, nearest_template, TemplateLibrary, TemplateMatch};
pub use types::{GestureId, GestureTemplate};
