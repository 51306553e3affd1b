// Data models for gesture-to-action mappings
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;
use thiserror::Error;

use crate::gestures::{GestureId, GestureTemplate, TemplateLibrary};

/// Finger counts that always carry a mapping
pub const FINGER_SLOTS: RangeInclusive<u8> = 1..=4;

/// Action assigned to a new custom gesture
pub const DEFAULT_CUSTOM_KEY: &str = "space";

/// What to inject when a gesture fires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionSpec {
    /// One key press
    Single(String),

    /// Keys pressed together in order, released in reverse
    Hotkey(Vec<String>),
}

impl ActionSpec {
    pub fn single(key: impl Into<String>) -> Self {
        ActionSpec::Single(key.into())
    }

    pub fn hotkey<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ActionSpec::Hotkey(keys.into_iter().map(Into::into).collect())
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            ActionSpec::Single(_) => ActionKind::Single,
            ActionSpec::Hotkey(_) => ActionKind::Hotkey,
        }
    }

    pub fn keys(&self) -> Vec<&str> {
        match self {
            ActionSpec::Single(key) => vec![key.as_str()],
            ActionSpec::Hotkey(keys) => keys.iter().map(String::as_str).collect(),
        }
    }
}

impl fmt::Display for ActionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionSpec::Single(key) => write!(f, "single {}", key),
            ActionSpec::Hotkey(keys) => write!(f, "hotkey {}", keys.join("+")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Single,
    Hotkey,
}

/// Persisted form of an action: `{"type": "single"|"hotkey", "keys": [...]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub keys: Vec<String>,
}

#[derive(Debug, Error, PartialEq)]
pub enum ActionError {
    #[error("Action of type {0:?} has no keys")]
    NoKeys(ActionKind),
}

impl TryFrom<ActionRecord> for ActionSpec {
    type Error = ActionError;

    fn try_from(record: ActionRecord) -> Result<Self, Self::Error> {
        match record.kind {
            // Extra keys on a single action are ignored
            ActionKind::Single => record
                .keys
                .into_iter()
                .next()
                .map(ActionSpec::Single)
                .ok_or(ActionError::NoKeys(ActionKind::Single)),
            ActionKind::Hotkey if record.keys.is_empty() => {
                Err(ActionError::NoKeys(ActionKind::Hotkey))
            }
            ActionKind::Hotkey => Ok(ActionSpec::Hotkey(record.keys)),
        }
    }
}

impl From<&ActionSpec> for ActionRecord {
    fn from(action: &ActionSpec) -> Self {
        ActionRecord {
            kind: action.kind(),
            keys: action.keys().into_iter().map(str::to_string).collect(),
        }
    }
}

/// Gesture identifier to action
///
/// After [`GestureMapping::fill_defaults`] the finger slots 1-4 are always
/// present. Template entries are only added by the user.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GestureMapping {
    entries: BTreeMap<GestureId, ActionSpec>,
}

impl GestureMapping {
    /// An empty mapping, without the built-in slots
    pub fn empty() -> Self {
        GestureMapping::default()
    }

    /// Built-in defaults: 1 winleft, 2 tab, 3 enter, 4 space
    pub fn defaults() -> Self {
        let mut mapping = GestureMapping::empty();
        mapping.fill_defaults();
        mapping
    }

    /// Built-in action for a finger slot
    pub fn default_action(slot: u8) -> Option<ActionSpec> {
        let key = match slot {
            1 => "winleft",
            2 => "tab",
            3 => "enter",
            4 => "space",
            _ => return None,
        };
        Some(ActionSpec::single(key))
    }

    /// Fill any missing finger slot from the built-in defaults
    pub fn fill_defaults(&mut self) {
        for slot in FINGER_SLOTS {
            if let Some(action) = Self::default_action(slot) {
                self.entries.entry(GestureId::FingerCount(slot)).or_insert(action);
            }
        }
    }

    pub fn get(&self, gesture: &GestureId) -> Option<&ActionSpec> {
        self.entries.get(gesture)
    }

    pub fn set(&mut self, gesture: GestureId, action: ActionSpec) -> Option<ActionSpec> {
        self.entries.insert(gesture, action)
    }

    pub fn remove(&mut self, gesture: &GestureId) -> Option<ActionSpec> {
        self.entries.remove(gesture)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GestureId, &ActionSpec)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything the user configures: the mapping plus the template library
///
/// This is the unit of persistence and of concurrent replacement.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub mapping: GestureMapping,
    pub templates: TemplateLibrary,
}

impl Settings {
    pub fn new(mapping: GestureMapping, templates: TemplateLibrary) -> Self {
        Settings { mapping, templates }
    }

    /// Action to run for a gesture, if any
    pub fn action_for(&self, gesture: &GestureId) -> Option<&ActionSpec> {
        self.mapping.get(gesture)
    }

    /// Add a template together with its mapping entry
    pub fn add_custom_gesture(&mut self, template: GestureTemplate, action: ActionSpec) {
        self.mapping
            .set(GestureId::Template(template.name.clone()), action);
        self.templates.insert(template);
    }

    /// Remove a template and its mapping entry; false if it did not exist
    pub fn remove_custom_gesture(&mut self, name: &str) -> bool {
        self.mapping.remove(&GestureId::template(name));
        self.templates.remove(name).is_some()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::new(GestureMapping::defaults(), TemplateLibrary::new())
    }
}
