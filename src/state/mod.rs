// State management module
// Gesture mappings, JSON persistence, and the shared active settings

pub mod models;
pub mod shared;
pub mod storage;

pub use models::{
    ActionError, ActionKind, ActionRecord, ActionSpec, GestureMapping, Settings,
    DEFAULT_CUSTOM_KEY, FINGER_SLOTS,
};
pub use shared::SharedSettings;
pub use storage::{
    default_settings_path, get_app_config_dir, settings_from_json_bytes, settings_to_json_bytes,
    MappingStore, StoreError, StoreResult, SETTINGS_FILE_NAME,
};
