// Template capture session
// Operator confirms with a name, one frame is normalized and stored as a template

use thiserror::Error;

use crate::gestures::{GestureTemplate, TemplateLibrary};
use crate::landmarks::{normalize, LandmarkProvider, LandmarkSet, ProviderError};
use crate::state::{ActionSpec, MappingStore, SharedSettings, StoreError, DEFAULT_CUSTOM_KEY};

/// Reasons a capture attempt is rejected; the session stays open after each
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Gesture name cannot be empty")]
    EmptyName,

    #[error("A gesture named {0:?} already exists")]
    DuplicateName(String),

    #[error("Gesture name {0:?} must be a single word that is not a number")]
    InvalidName(String),

    #[error("No hand in view")]
    NoHand,

    #[error("Failed to save gesture: {0}")]
    Store(#[from] StoreError),
}

/// Operator side of a capture session
pub trait CapturePrompt {
    /// Block until the operator confirms a capture; `None` cancels the session
    ///
    /// The frame captured is the next one the landmark source delivers after
    /// this returns. A source that kept buffering while nobody read it (a FIFO
    /// behind a paused tracker) may hand back an older frame, so the operator
    /// should be holding the gesture before confirming.
    fn confirm_capture(&mut self) -> Option<String>;

    fn report_rejection(&mut self, error: &CaptureError);

    fn report_saved(&mut self, _template: &GestureTemplate) {}
}

#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    Saved(String),
    Cancelled,
}

/// Blocking capture flow against the shared settings
///
/// Each confirmation takes exactly one observation from the provider. A new
/// template is persisted with the default custom action and then swapped into
/// the shared settings; a rejected attempt changes nothing.
pub struct TemplateCaptureSession<'a> {
    store: &'a MappingStore,
    shared: &'a SharedSettings,
}

impl<'a> TemplateCaptureSession<'a> {
    pub fn new(store: &'a MappingStore, shared: &'a SharedSettings) -> Self {
        TemplateCaptureSession { store, shared }
    }

    /// Run until a template is saved or the operator cancels
    ///
    /// Only a failing landmark source ends the session with an error.
    pub fn run<P, U>(
        &self,
        provider: &mut P,
        prompt: &mut U,
    ) -> Result<CaptureOutcome, ProviderError>
    where
        P: LandmarkProvider + ?Sized,
        U: CapturePrompt + ?Sized,
    {
        loop {
            let Some(raw_name) = prompt.confirm_capture() else {
                log::info!("Capture cancelled");
                return Ok(CaptureOutcome::Cancelled);
            };

            let name = match validate_name(&raw_name, &self.shared.snapshot().templates) {
                Ok(name) => name,
                Err(e) => {
                    log::warn!("Capture rejected: {}", e);
                    prompt.report_rejection(&e);
                    continue;
                }
            };

            let observation = provider.next_observation()?;
            let Some(landmarks) = observation.hand else {
                log::warn!("Capture rejected: no hand at {:?}", observation.timestamp);
                prompt.report_rejection(&CaptureError::NoHand);
                continue;
            };

            match self.commit(&name, &landmarks) {
                Ok(template) => {
                    prompt.report_saved(&template);
                    return Ok(CaptureOutcome::Saved(template.name));
                }
                Err(e) => {
                    log::warn!("Capture rejected: {}", e);
                    prompt.report_rejection(&e);
                }
            }
        }
    }

    /// Validate, normalize, persist and publish one template
    pub fn commit(
        &self,
        name: &str,
        landmarks: &LandmarkSet,
    ) -> Result<GestureTemplate, CaptureError> {
        let template = self.shared.update(self.store, |settings| {
            let name = validate_name(name, &settings.templates)?;
            let template = GestureTemplate::new(name, normalize(landmarks));
            settings.add_custom_gesture(template.clone(), ActionSpec::single(DEFAULT_CUSTOM_KEY));
            Ok::<_, CaptureError>(template)
        })?;

        log::info!("Saved custom gesture {:?}", template.name);
        Ok(template)
    }
}

/// Trim `name` and check it against existing templates (case-sensitive)
///
/// Names must be addressable from the editor's command line: one word, and
/// not all digits (those read as finger slots).
pub fn validate_name(name: &str, templates: &TemplateLibrary) -> Result<String, CaptureError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CaptureError::EmptyName);
    }
    if name.contains(char::is_whitespace) || name.chars().all(|c| c.is_ascii_digit()) {
        return Err(CaptureError::InvalidName(name.to_string()));
    }
    if templates.contains(name) {
        return Err(CaptureError::DuplicateName(name.to_string()));
    }
    Ok(name.to_string())
}
