// Recognition pipeline module
// Per-frame recognition and the fire trace

pub mod recognizer;
pub mod trace;

pub use recognizer::{FiredAction, FrameReport, Recognizer};
pub use trace::{read_trace_file, TraceEntry, TraceError, TraceWriter};
