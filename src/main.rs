// Gesture Keys command-line entry point
// Parses options, installs logging, and hands off to the library

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use gesture_keys_lib::app::AppError;
use gesture_keys_lib::config::{AppConfig, InjectorKind, RecognitionConfig};
use gesture_keys_lib::gestures::DEFAULT_MATCH_THRESHOLD;

#[derive(Parser, Debug)]
#[command(name = "gesture_keys", version, about = "Turn held hand gestures into key presses")]
struct Cli {
    /// JSON-lines landmark stream from the hand tracker (file or FIFO)
    #[arg(long)]
    landmarks: PathBuf,

    /// Settings document (defaults to the platform config directory)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Append fired gestures to this JSON-lines file
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Seconds a gesture must be held before it fires
    #[arg(long, default_value_t = 1.0)]
    hold: f64,

    /// Minimum seconds between two fires
    #[arg(long, default_value_t = 2.0)]
    cooldown: f64,

    /// Maximum mean landmark distance for a custom gesture match
    #[arg(long, default_value_t = DEFAULT_MATCH_THRESHOLD)]
    threshold: f32,

    /// Where key events go
    #[arg(long, value_enum, default_value_t = InjectorKind::DryRun)]
    inject: InjectorKind,

    /// Start recognizing without opening the settings editor
    #[arg(long)]
    skip_editor: bool,
}

impl Cli {
    fn into_config(self) -> Result<AppConfig, AppError> {
        let recognition = RecognitionConfig::from_parts(self.hold, self.cooldown, self.threshold)?;
        Ok(AppConfig {
            settings_path: self.settings,
            landmarks_path: self.landmarks,
            trace_path: self.trace,
            injector: self.inject,
            recognition,
            skip_editor: self.skip_editor,
        })
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let result = Cli::parse().into_config().and_then(gesture_keys_lib::run);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
