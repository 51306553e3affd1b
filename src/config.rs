// Runtime configuration
// Recognition timing and thresholds plus the application's run options

use clap::ValueEnum;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::gestures::{ClassifierConfig, HoldConfig};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a non-negative number of seconds, got {value}")]
    InvalidDuration { name: &'static str, value: f64 },

    #[error("Match threshold must be positive, got {0}")]
    InvalidThreshold(f32),
}

/// Everything that shapes per-frame recognition
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RecognitionConfig {
    pub classifier: ClassifierConfig,
    pub hold: HoldConfig,
}

impl RecognitionConfig {
    /// Build from command-line style values (seconds and normalized units)
    pub fn from_parts(
        hold_secs: f64,
        cooldown_secs: f64,
        match_threshold: f32,
    ) -> Result<Self, ConfigError> {
        if !(match_threshold.is_finite() && match_threshold > 0.0) {
            return Err(ConfigError::InvalidThreshold(match_threshold));
        }

        Ok(RecognitionConfig {
            classifier: ClassifierConfig { match_threshold },
            hold: HoldConfig {
                hold_duration: seconds("hold", hold_secs)?,
                cooldown: seconds("cooldown", cooldown_secs)?,
            },
        })
    }
}

fn seconds(name: &'static str, value: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(value).map_err(|_| ConfigError::InvalidDuration { name, value })
}

/// Where key events go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum InjectorKind {
    /// Log key events only
    #[default]
    DryRun,

    /// Synthesize real key events (requires the `enigo` feature)
    Os,
}

/// Options for one run of the application
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Settings document; the platform config directory when unset
    pub settings_path: Option<PathBuf>,

    /// JSON-lines landmark stream written by the hand tracker
    pub landmarks_path: PathBuf,

    /// Optional JSON-lines trace of fired actions
    pub trace_path: Option<PathBuf>,

    pub injector: InjectorKind,
    pub recognition: RecognitionConfig,

    /// Start recognizing immediately instead of opening the editor
    pub skip_editor: bool,
}

impl AppConfig {
    pub fn new(landmarks_path: impl Into<PathBuf>) -> Self {
        AppConfig {
            settings_path: None,
            landmarks_path: landmarks_path.into(),
            trace_path: None,
            injector: InjectorKind::default(),
            recognition: RecognitionConfig::default(),
            skip_editor: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RecognitionConfig::default();
        assert_eq!(config.hold.hold_duration, Duration::from_secs(1));
        assert_eq!(config.hold.cooldown, Duration::from_secs(2));
        assert_eq!(config.classifier.match_threshold, 0.2);
    }

    #[test]
    fn test_from_parts() {
        let config = RecognitionConfig::from_parts(0.5, 1.5, 0.1).unwrap();
        assert_eq!(config.hold.hold_duration, Duration::from_millis(500));
        assert_eq!(config.hold.cooldown, Duration::from_millis(1500));
        assert_eq!(config.classifier.match_threshold, 0.1);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert_eq!(
            RecognitionConfig::from_parts(-1.0, 2.0, 0.2),
            Err(ConfigError::InvalidDuration {
                name: "hold",
                value: -1.0
            })
        );
        assert_eq!(
            RecognitionConfig::from_parts(1.0, 2.0, 0.0),
            Err(ConfigError::InvalidThreshold(0.0))
        );
        assert!(RecognitionConfig::from_parts(1.0, f64::NAN, 0.2).is_err());
    }
}
