// Landmark providers
// The hand tracker runs out of process; it hands us one observation per processed frame

use serde::Deserialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::landmarks::types::{LandmarkSet, Point3};

/// One processed frame from the hand tracker
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Stream time of the frame, measured from the start of the source
    pub timestamp: Duration,

    /// The observed hand, or `None` when no hand was detected
    pub hand: Option<LandmarkSet>,
}

impl Observation {
    pub fn hand(timestamp: Duration, landmarks: LandmarkSet) -> Self {
        Observation {
            timestamp,
            hand: Some(landmarks),
        }
    }

    pub fn no_hand(timestamp: Duration) -> Self {
        Observation {
            timestamp,
            hand: None,
        }
    }
}

/// Errors from a landmark source
///
/// Any of these ends the recognition loop.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Landmark source exhausted")]
    Exhausted,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Anything that yields hand observations, blocking until the next frame
pub trait LandmarkProvider {
    fn next_observation(&mut self) -> Result<Observation, ProviderError>;
}

impl<P: LandmarkProvider + ?Sized> LandmarkProvider for Box<P> {
    fn next_observation(&mut self) -> Result<Observation, ProviderError> {
        (**self).next_observation()
    }
}

/// Wire format of a single JSON line
#[derive(Debug, Deserialize)]
struct ObservationRecord {
    /// Seconds since the tracker started
    t: f64,
    landmarks: Option<Vec<Point3>>,
}

/// Reads observations from a JSON-lines stream
///
/// Each line is `{"t": <seconds>, "landmarks": [[x, y, z], ...] | null}`.
/// A file, a named pipe fed by the tracker, or any other reader works.
/// Lines that fail to parse or carry the wrong number of points are skipped.
pub struct JsonLinesProvider<R> {
    reader: R,
    label: String,
    line: String,
    line_number: usize,
}

impl JsonLinesProvider<BufReader<File>> {
    /// Open a landmark stream on disk
    pub fn open(path: &Path) -> Result<Self, ProviderError> {
        let file = File::open(path)?;
        log::info!("Opened landmark source {}", path.display());
        Ok(Self::new(BufReader::new(file), path.display().to_string()))
    }
}

impl<R: BufRead> JsonLinesProvider<R> {
    pub fn new(reader: R, label: impl Into<String>) -> Self {
        JsonLinesProvider {
            reader,
            label: label.into(),
            line: String::new(),
            line_number: 0,
        }
    }

    fn parse_line(&self, line: &str) -> Option<Observation> {
        let record: ObservationRecord = match serde_json::from_str(line) {
            Ok(record) => record,
            Err(e) => {
                log::warn!(
                    "{}:{}: skipping unparseable observation: {}",
                    self.label,
                    self.line_number,
                    e
                );
                return None;
            }
        };

        let Ok(timestamp) = Duration::try_from_secs_f64(record.t) else {
            log::warn!(
                "{}:{}: skipping observation with invalid time {}",
                self.label,
                self.line_number,
                record.t
            );
            return None;
        };

        match record.landmarks {
            None => Some(Observation::no_hand(timestamp)),
            Some(points) => match LandmarkSet::try_from(points) {
                Ok(hand) => Some(Observation::hand(timestamp, hand)),
                Err(e) => {
                    log::warn!("{}:{}: rejecting hand: {}", self.label, self.line_number, e);
                    None
                }
            },
        }
    }
}

impl<R: BufRead> LandmarkProvider for JsonLinesProvider<R> {
    fn next_observation(&mut self) -> Result<Observation, ProviderError> {
        loop {
            self.line.clear();
            let read = self.reader.read_line(&mut self.line)?;
            if read == 0 {
                return Err(ProviderError::Exhausted);
            }
            self.line_number += 1;

            let trimmed = self.line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if let Some(observation) = self.parse_line(trimmed) {
                return Ok(observation);
            }
        }
    }
}

impl<R> Drop for JsonLinesProvider<R> {
    fn drop(&mut self) {
        log::info!("Released landmark source {}", self.label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn hand_json(t: f64) -> String {
        let points = vec![[0.5f32, 0.5, 0.0]; 21];
        serde_json::json!({ "t": t, "landmarks": points }).to_string()
    }

    #[test]
    fn test_reads_hand_and_no_hand() {
        let input = format!("{}\n{{\"t\": 0.5, \"landmarks\": null}}\n", hand_json(0.25));
        let mut provider = JsonLinesProvider::new(Cursor::new(input), "test");

        let first = provider.next_observation().unwrap();
        assert_eq!(first.timestamp, Duration::from_millis(250));
        assert!(first.hand.is_some());

        let second = provider.next_observation().unwrap();
        assert_eq!(second.timestamp, Duration::from_millis(500));
        assert!(second.hand.is_none());

        assert!(matches!(
            provider.next_observation(),
            Err(ProviderError::Exhausted)
        ));
    }

    #[test]
    fn test_skips_malformed_lines() {
        let short = serde_json::json!({ "t": 0.1, "landmarks": vec![[0.0f32, 0.0, 0.0]; 5] });
        let input = format!("not json\n\n{}\n{}\n", short, hand_json(0.75));
        let mut provider = JsonLinesProvider::new(Cursor::new(input), "test");

        let observation = provider.next_observation().unwrap();
        assert_eq!(observation.timestamp, Duration::from_millis(750));
        assert!(observation.hand.is_some());
    }

    #[test]
    fn test_skips_negative_time() {
        let input = format!("{}\n{}\n", hand_json(-1.0), hand_json(1.0));
        let mut provider = JsonLinesProvider::new(Cursor::new(input), "test");
        let observation = provider.next_observation().unwrap();
        assert_eq!(observation.timestamp, Duration::from_secs(1));
    }
}
