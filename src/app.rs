// Application loop
// Explicit run modes (editor, recognize, capture) driven by a transition table

use thiserror::Error;

use crate::actions::{InjectError, KeyInjector};
use crate::capture::{CapturePrompt, TemplateCaptureSession};
use crate::config::{ConfigError, RecognitionConfig};
use crate::editor::{EditorOutcome, SettingsEditor};
use crate::landmarks::{LandmarkProvider, ProviderError};
use crate::pipeline::{FrameReport, Recognizer, TraceEntry, TraceWriter};
use crate::state::{MappingStore, SharedSettings, StoreError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Landmark source failed: {0}")]
    Source(#[from] ProviderError),

    #[error("Settings error: {0}")]
    Store(#[from] StoreError),

    #[error("Injector error: {0}")]
    Injector(#[from] InjectError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Editor,
    Recognize,
    Capture,
    Exit,
}

/// Why the current mode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeEvent {
    Saved,
    CaptureRequested,
    QuitRequested,
    EditorRequested,
    CaptureDone,
    SourceLost,
}

impl Mode {
    /// Transition table; events that do not apply keep the current mode
    pub fn next(self, event: ModeEvent) -> Mode {
        use ModeEvent::*;

        match (self, event) {
            (Mode::Editor, Saved) => Mode::Recognize,
            (Mode::Editor, CaptureRequested) => Mode::Capture,
            (Mode::Editor, QuitRequested) => Mode::Exit,
            (Mode::Recognize, EditorRequested) => Mode::Editor,
            (Mode::Recognize, QuitRequested) => Mode::Exit,
            (Mode::Capture, CaptureDone) => Mode::Editor,
            (_, SourceLost) => Mode::Exit,
            (mode, _) => mode,
        }
    }
}

/// Commands accepted while the live preview runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewCommand {
    Quit,
    OpenEditor,
}

impl PreviewCommand {
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'q' => Some(PreviewCommand::Quit),
            't' => Some(PreviewCommand::OpenEditor),
            _ => None,
        }
    }
}

/// Live preview side of the user interface
pub trait PreviewControl {
    /// Non-blocking; called once per frame
    fn poll_command(&mut self) -> Option<PreviewCommand>;

    fn show_frame(&mut self, _report: &FrameReport) {}
}

/// Owns the landmark source, the recognizer and the settings
pub struct App<P, I> {
    provider: P,
    recognizer: Recognizer<I>,
    store: MappingStore,
    shared: SharedSettings,
    trace: Option<TraceWriter>,
}

impl<P: LandmarkProvider, I: KeyInjector> App<P, I> {
    /// Load persisted settings and set up recognition
    pub fn new(provider: P, injector: I, store: MappingStore, config: &RecognitionConfig) -> Self {
        let shared = SharedSettings::new(store.load());
        App {
            provider,
            recognizer: Recognizer::new(config, injector),
            store,
            shared,
            trace: None,
        }
    }

    pub fn with_trace(mut self, trace: TraceWriter) -> Self {
        self.trace = Some(trace);
        self
    }

    pub fn shared(&self) -> &SharedSettings {
        &self.shared
    }

    pub fn recognizer(&self) -> &Recognizer<I> {
        &self.recognizer
    }

    /// Run modes until one of them exits
    pub fn run<U>(&mut self, ui: &mut U, start: Mode) -> Result<(), AppError>
    where
        U: PreviewControl + SettingsEditor + CapturePrompt,
    {
        let mut mode = start;
        log::info!("Starting in {:?} mode", mode);

        while mode != Mode::Exit {
            let event = match mode {
                Mode::Editor => self.edit(ui),
                Mode::Recognize => self.recognize(ui)?,
                Mode::Capture => self.capture(ui)?,
                Mode::Exit => break,
            };

            let next = mode.next(event);
            log::info!("{:?} -> {:?} on {:?}", mode, next, event);
            mode = next;
        }

        Ok(())
    }

    fn edit<U: SettingsEditor>(&mut self, ui: &mut U) -> ModeEvent {
        match ui.edit(&self.shared.snapshot()) {
            EditorOutcome::Save(settings) => {
                if let Err(e) = self.shared.commit(&self.store, settings.clone()) {
                    log::warn!("Failed to save settings: {}", e);
                    self.shared.replace(settings);
                }
                ModeEvent::Saved
            }
            EditorOutcome::Capture => ModeEvent::CaptureRequested,
            EditorOutcome::Quit => ModeEvent::QuitRequested,
        }
    }

    fn recognize<U: PreviewControl>(&mut self, ui: &mut U) -> Result<ModeEvent, AppError> {
        self.recognizer.reset();

        loop {
            match ui.poll_command() {
                Some(PreviewCommand::Quit) => return Ok(ModeEvent::QuitRequested),
                Some(PreviewCommand::OpenEditor) => return Ok(ModeEvent::EditorRequested),
                None => {}
            }

            let observation = match self.provider.next_observation() {
                Ok(observation) => observation,
                Err(ProviderError::Exhausted) => {
                    log::info!("Landmark source ended");
                    return Ok(ModeEvent::SourceLost);
                }
                Err(e) => return Err(e.into()),
            };

            let report = self.recognizer.process(&observation, &self.shared.snapshot());
            ui.show_frame(&report);

            if let (Some(fired), Some(trace)) = (&report.fired, &self.trace) {
                if let Err(e) = trace.write(&TraceEntry::from_fired(fired)) {
                    log::warn!("Failed to write trace to {}: {}", trace.path().display(), e);
                }
            }
        }
    }

    fn capture<U: CapturePrompt>(&mut self, ui: &mut U) -> Result<ModeEvent, AppError> {
        let session = TemplateCaptureSession::new(&self.store, &self.shared);
        match session.run(&mut self.provider, ui) {
            Ok(outcome) => {
                log::debug!("Capture finished: {:?}", outcome);
                Ok(ModeEvent::CaptureDone)
            }
            Err(ProviderError::Exhausted) => {
                log::info!("Landmark source ended during capture");
                Ok(ModeEvent::SourceLost)
            }
            Err(e) => Err(e.into()),
        }
    }
}
