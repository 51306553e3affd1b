// Gesture Keys - Hand Gesture to Key Press Engine
// Module declarations

pub mod actions;
pub mod app;
pub mod capture;
pub mod config;
pub mod console;
pub mod editor;
pub mod gestures;
pub mod landmarks;
pub mod pipeline;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

use actions::{InjectError, KeyInjector, LogInjector};
use app::{App, AppError, Mode};
use config::{AppConfig, InjectorKind};
use console::{spawn_stdin_reader, ConsoleFrontend};
use landmarks::JsonLinesProvider;
use pipeline::TraceWriter;
use state::MappingStore;

/// Run the console application until the operator quits or the landmark source ends
pub fn run(config: AppConfig) -> Result<(), AppError> {
    let store = match &config.settings_path {
        Some(path) => MappingStore::new(path),
        None => MappingStore::at_default_location()?,
    };
    log::info!("Using settings at {}", store.path().display());

    let provider = JsonLinesProvider::open(&config.landmarks_path)?;
    let injector = make_injector(config.injector)?;

    let mut app = App::new(provider, injector, store, &config.recognition);
    if let Some(path) = &config.trace_path {
        log::info!("Tracing fired gestures to {}", path.display());
        app = app.with_trace(TraceWriter::new(path.clone()));
    }

    let mut console = ConsoleFrontend::new(spawn_stdin_reader(), std::io::stdout());
    let start = if config.skip_editor {
        Mode::Recognize
    } else {
        Mode::Editor
    };

    app.run(&mut console, start)
}

fn make_injector(kind: InjectorKind) -> Result<Box<dyn KeyInjector>, InjectError> {
    match kind {
        InjectorKind::DryRun => Ok(Box::new(LogInjector)),
        #[cfg(feature = "enigo")]
        InjectorKind::Os => Ok(Box::new(actions::EnigoInjector::new()?)),
        #[cfg(not(feature = "enigo"))]
        InjectorKind::Os => Err(InjectError::Failed(
            "OS key injection requires the `enigo` feature".to_string(),
        )),
    }
}
