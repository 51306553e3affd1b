// Gesture types
// Discrete gesture identifiers and user-recorded gesture templates

use std::fmt;

use crate::landmarks::NormalizedPose;

/// Discrete result of classifying one hand pose
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GestureId {
    /// Number of raised fingers from the static heuristic [0, 5]
    FingerCount(u8),

    /// Name of a matched custom template
    Template(String),
}

impl GestureId {
    pub fn template(name: impl Into<String>) -> Self {
        GestureId::Template(name.into())
    }

    /// Finger count, if this is a heuristic gesture
    pub fn finger_count(&self) -> Option<u8> {
        match self {
            GestureId::FingerCount(n) => Some(*n),
            GestureId::Template(_) => None,
        }
    }

    /// Template name, if this is a custom gesture
    pub fn template_name(&self) -> Option<&str> {
        match self {
            GestureId::FingerCount(_) => None,
            GestureId::Template(name) => Some(name),
        }
    }
}

impl fmt::Display for GestureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureId::FingerCount(n) => write!(f, "{} Finger(s) Up", n),
            GestureId::Template(name) => write!(f, "Custom: {}", name),
        }
    }
}

/// A named reference pose recorded by the user
#[derive(Debug, Clone, PartialEq)]
pub struct GestureTemplate {
    /// Unique, case-sensitive name
    pub name: String,

    /// Reference pose captured when the template was recorded
    pub pose: NormalizedPose,
}

impl GestureTemplate {
    pub fn new(name: impl Into<String>, pose: NormalizedPose) -> Self {
        GestureTemplate {
            name: name.into(),
            pose,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_labels() {
        assert_eq!(GestureId::FingerCount(2).to_string(), "2 Finger(s) Up");
        assert_eq!(GestureId::template("peace").to_string(), "Custom: peace");
    }

    #[test]
    fn test_accessors() {
        assert_eq!(GestureId::FingerCount(3).finger_count(), Some(3));
        assert_eq!(GestureId::FingerCount(3).template_name(), None);
        assert_eq!(GestureId::template("ok").template_name(), Some("ok"));
    }

    #[test]
    fn test_finger_counts_order_before_templates() {
        let mut ids = vec![
            GestureId::template("a"),
            GestureId::FingerCount(4),
            GestureId::FingerCount(1),
        ];
        ids.sort();
        assert_eq!(ids[0], GestureId::FingerCount(1));
        assert_eq!(ids[2], GestureId::template("a"));
    }
}
