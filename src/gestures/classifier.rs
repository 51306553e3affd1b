// Gesture classifier
// Combines custom template matching with the finger-count heuristic

use crate::gestures::heuristic::count_fingers;
use crate::gestures::templates::{match_template, TemplateLibrary, TemplateMatch};
use crate::gestures::types::GestureId;
use crate::landmarks::NormalizedPose;

/// Default template acceptance threshold, in normalized units
pub const DEFAULT_MATCH_THRESHOLD: f32 = 0.2;

/// Configuration for classification thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierConfig {
    /// A template matches only when its mean distance is below this
    pub match_threshold: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            match_threshold: DEFAULT_MATCH_THRESHOLD,
        }
    }
}

/// Everything the classifier looked at for one pose (for debug logging)
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    /// Winning gesture, `None` when nothing is confident
    pub gesture: Option<GestureId>,

    /// Heuristic finger count, `None` for a degenerate pose
    pub finger_count: Option<u8>,

    /// Accepted template match, if any
    pub template: Option<TemplateMatch>,
}

/// Classifies normalized poses into discrete gestures
///
/// Precedence: an accepted template match wins over the finger count, since
/// a custom gesture is an explicit user choice. A degenerate pose classifies
/// as nothing.
#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    config: ClassifierConfig,
}

impl GestureClassifier {
    /// Create a classifier with default configuration
    pub fn new() -> Self {
        GestureClassifier::default()
    }

    /// Create a classifier with custom configuration
    pub fn with_config(config: ClassifierConfig) -> Self {
        GestureClassifier { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify a pose against the heuristic and the template library
    pub fn classify(
        &self,
        pose: &NormalizedPose,
        templates: &TemplateLibrary,
    ) -> Option<GestureId> {
        self.explain(pose, templates).gesture
    }

    /// Classify and keep the intermediate results
    pub fn explain(
        &self,
        pose: &NormalizedPose,
        templates: &TemplateLibrary,
    ) -> ClassificationResult {
        if pose.is_degenerate() {
            return ClassificationResult {
                gesture: None,
                finger_count: None,
                template: None,
            };
        }

        let template = if templates.is_empty() {
            None
        } else {
            match_template(pose, templates, self.config.match_threshold)
        };
        let finger_count = count_fingers(pose.points());

        let gesture = match &template {
            Some(m) => GestureId::Template(m.name.clone()),
            None => GestureId::FingerCount(finger_count),
        };

        ClassificationResult {
            gesture: Some(gesture),
            finger_count: Some(finger_count),
            template,
        }
    }
}
