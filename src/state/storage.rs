// Settings persistence
// Loads and saves the gesture mapping and custom templates as one JSON document
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::gestures::{GestureId, GestureTemplate, TemplateLibrary};
use crate::landmarks::NormalizedPose;
use crate::state::models::{
    ActionRecord, ActionSpec, GestureMapping, Settings, DEFAULT_CUSTOM_KEY, FINGER_SLOTS,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Failed to get app config directory")]
    NoConfigDir,
}

pub type StoreResult<T> = Result<T, StoreError>;

pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Get the config directory for gesture_keys
pub fn get_app_config_dir() -> StoreResult<PathBuf> {
    let config_dir = dirs::config_dir().ok_or(StoreError::NoConfigDir)?;
    let app_dir = config_dir.join("gesture-keys");
    fs::create_dir_all(&app_dir)?;
    Ok(app_dir)
}

/// Default location of the settings document
pub fn default_settings_path() -> StoreResult<PathBuf> {
    Ok(get_app_config_dir()?.join(SETTINGS_FILE_NAME))
}

/// Top-level persisted document
///
/// Entries are kept as raw JSON so one bad entry does not discard the rest.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsDocument {
    #[serde(default)]
    gesture_mappings: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    custom_gestures: BTreeMap<String, serde_json::Value>,
}

/// One entry of `custom_gestures`
#[derive(Debug, Serialize, Deserialize)]
struct CustomGestureRecord {
    #[serde(flatten)]
    action: ActionRecord,
    landmarks: NormalizedPose,
}

/// Owns the persisted settings document
///
/// Loading never fails: a missing or unreadable document yields defaults.
#[derive(Debug, Clone)]
pub struct MappingStore {
    path: PathBuf,
}

impl MappingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        MappingStore { path: path.into() }
    }

    /// Store at the platform config directory
    pub fn at_default_location() -> StoreResult<Self> {
        Ok(MappingStore::new(default_settings_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read persisted settings, falling back to defaults
    pub fn load(&self) -> Settings {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", self.path.display());
                return Settings::default();
            }
            Err(e) => {
                log::warn!("Failed to read {}: {}, using defaults", self.path.display(), e);
                return Settings::default();
            }
        };

        match settings_from_json_bytes(&data) {
            Ok(settings) => {
                log::info!(
                    "Loaded {} mappings and {} custom gestures from {}",
                    settings.mapping.len(),
                    settings.templates.len(),
                    self.path.display()
                );
                settings
            }
            Err(e) => {
                log::warn!("Malformed settings in {}: {}, using defaults", self.path.display(), e);
                Settings::default()
            }
        }
    }

    /// Replace the persisted document with `settings`
    ///
    /// Writes a uniquely named temp file next to the target and renames it
    /// into place, so readers see either the old or the new document. The
    /// temp file is removed when the rename fails.
    pub fn save(&self, settings: &Settings) -> StoreResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let data = settings_to_json_bytes(settings)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&data)?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        log::info!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

/// Parse a settings document
///
/// Fails only when the document itself is not a JSON object of the expected
/// shape. Bad entries are skipped with a warning and missing finger slots are
/// filled from the defaults.
pub fn settings_from_json_bytes(data: &[u8]) -> Result<Settings, serde_json::Error> {
    let document: SettingsDocument = serde_json::from_slice(data)?;
    Ok(settings_from_document(document))
}

/// Serialize settings to the persisted document shape
pub fn settings_to_json_bytes(settings: &Settings) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec_pretty(&document_from_settings(settings)?)
}

fn settings_from_document(document: SettingsDocument) -> Settings {
    let mut mapping = GestureMapping::empty();

    for (key, value) in document.gesture_mappings {
        let slot = match key.parse::<u8>() {
            Ok(slot) if FINGER_SLOTS.contains(&slot) => slot,
            _ => {
                log::warn!("Ignoring mapping for unknown slot {:?}", key);
                continue;
            }
        };

        match parse_action(value) {
            Some(action) => {
                mapping.set(GestureId::FingerCount(slot), action);
            }
            None => log::warn!("Ignoring malformed mapping for slot {}", slot),
        }
    }
    mapping.fill_defaults();

    let mut templates = TemplateLibrary::new();
    for (name, value) in document.custom_gestures {
        let record: CustomGestureRecord = match serde_json::from_value(value) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Ignoring malformed custom gesture {:?}: {}", name, e);
                continue;
            }
        };
        let action = match ActionSpec::try_from(record.action) {
            Ok(action) => action,
            Err(e) => {
                log::warn!("Custom gesture {:?}: {}, using default key", name, e);
                ActionSpec::single(DEFAULT_CUSTOM_KEY)
            }
        };

        mapping.set(GestureId::template(name.clone()), action);
        templates.insert(GestureTemplate::new(name, record.landmarks));
    }

    Settings::new(mapping, templates)
}

fn parse_action(value: serde_json::Value) -> Option<ActionSpec> {
    let record: ActionRecord = serde_json::from_value(value).ok()?;
    ActionSpec::try_from(record).ok()
}

fn document_from_settings(settings: &Settings) -> Result<SettingsDocument, serde_json::Error> {
    let mut document = SettingsDocument::default();

    for (gesture, action) in settings.mapping.iter() {
        if let GestureId::FingerCount(slot) = gesture {
            document
                .gesture_mappings
                .insert(slot.to_string(), serde_json::to_value(ActionRecord::from(action))?);
        }
    }

    for template in settings.templates.iter() {
        let action = settings
            .mapping
            .get(&GestureId::template(template.name.clone()))
            .cloned()
            .unwrap_or_else(|| ActionSpec::single(DEFAULT_CUSTOM_KEY));
        let record = CustomGestureRecord {
            action: ActionRecord::from(&action),
            landmarks: template.pose.clone(),
        };
        document
            .custom_gestures
            .insert(template.name.clone(), serde_json::to_value(record)?);
    }

    Ok(document)
}
