// Template capture module
// Records a named custom gesture from a single observed frame

pub mod session;

pub use session::{
    validate_name, CaptureError, CaptureOutcome, CapturePrompt, TemplateCaptureSession,
};
