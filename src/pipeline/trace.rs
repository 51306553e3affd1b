// Fire tracing
// Append-only JSONL trace of fired gestures for monitoring and post-mortem

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::pipeline::recognizer::FiredAction;

/// Errors that can occur during trace operations
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// A single fired gesture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// RFC 3339 wall-clock time the entry was written
    pub timestamp: String,

    /// Stream time of the firing frame
    pub stream_time_ms: u64,

    /// Display label of the gesture (e.g. "2 Finger(s) Up")
    pub gesture: String,

    /// Dispatched action, absent for unmapped gestures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl TraceEntry {
    pub fn from_fired(fired: &FiredAction) -> Self {
        TraceEntry {
            timestamp: Utc::now().to_rfc3339(),
            stream_time_ms: u64::try_from(fired.at.as_millis()).unwrap_or(u64::MAX),
            gesture: fired.gesture.to_string(),
            action: fired.action.as_ref().map(ToString::to_string),
        }
    }

    /// Serialize to JSON line (with newline)
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_string(self)?;
        Ok(format!("{}\n", json))
    }
}

/// Fire trace writer
/// Manages append-only JSONL trace file
pub struct TraceWriter {
    file_path: PathBuf,
}

impl TraceWriter {
    pub fn new(file_path: PathBuf) -> Self {
        TraceWriter { file_path }
    }

    /// Append a trace entry to the file
    /// Creates file if it doesn't exist
    pub fn write(&self, entry: &TraceEntry) -> Result<(), TraceError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)?;

        let json_line = entry.to_json_line()?;
        file.write_all(json_line.as_bytes())?;
        file.flush()?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

/// Read trace entries from a JSONL file
pub fn read_trace_file(path: &Path) -> Result<Vec<TraceEntry>, TraceError> {
    let contents = std::fs::read_to_string(path)?;
    let mut entries = Vec::new();

    for line in contents.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let entry: TraceEntry = serde_json::from_str(line)?;
        entries.push(entry);
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gestures::GestureId;
    use crate::state::ActionSpec;
    use std::time::Duration;
    use tempfile::TempDir;

    fn fired(action: Option<ActionSpec>) -> FiredAction {
        FiredAction {
            gesture: GestureId::FingerCount(2),
            action,
            at: Duration::from_millis(1033),
        }
    }

    #[test]
    fn test_entry_from_fired() {
        let entry = TraceEntry::from_fired(&fired(Some(ActionSpec::single("tab"))));
        assert_eq!(entry.stream_time_ms, 1033);
        assert_eq!(entry.gesture, "2 Finger(s) Up");
        assert_eq!(entry.action.as_deref(), Some("single tab"));
        assert!(chrono::DateTime::parse_from_rfc3339(&entry.timestamp).is_ok());
    }

    #[test]
    fn test_unmapped_action_omitted() {
        let entry = TraceEntry::from_fired(&fired(None));
        let line = entry.to_json_line().unwrap();

        assert!(line.ends_with('\n'));
        assert!(!line.contains("\"action\""));
    }

    #[test]
    fn test_trace_writer() {
        let temp_dir = TempDir::new().unwrap();
        let trace_path = temp_dir.path().join("fires.jsonl");
        let writer = TraceWriter::new(trace_path.clone());

        writer
            .write(&TraceEntry::from_fired(&fired(Some(ActionSpec::single("tab")))))
            .unwrap();
        writer.write(&TraceEntry::from_fired(&fired(None))).unwrap();

        let entries = read_trace_file(&trace_path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].action.as_deref(), Some("single tab"));
        assert_eq!(entries[1].action, None);
    }
}
