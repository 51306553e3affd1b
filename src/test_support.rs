// Test fixtures
// Synthetic hands plus scripted collaborators shared by the unit tests

use std::collections::VecDeque;
use std::time::Duration;

use crate::actions::{InjectError, KeyInjector};
use crate::capture::{CaptureError, CapturePrompt};
use crate::gestures::GestureTemplate;
use crate::landmarks::{
    index, LandmarkProvider, LandmarkSet, Observation, Point3, ProviderError, LANDMARK_COUNT,
};

/// A right hand in image coordinates (y grows downward), palm facing the camera
pub fn hand(thumb_up: bool, fingers_up: [bool; 4]) -> LandmarkSet {
    let mut points = [Point3::ZERO; LANDMARK_COUNT];
    points[index::WRIST] = Point3::new(0.5, 0.9, 0.0);

    points[index::THUMB_CMC] = Point3::new(0.42, 0.85, 0.0);
    points[index::THUMB_MCP] = Point3::new(0.38, 0.8, 0.0);
    points[index::THUMB_IP] = Point3::new(0.34, 0.75, 0.0);
    points[index::THUMB_TIP] = if thumb_up {
        Point3::new(0.36, 0.70, 0.0)
    } else {
        Point3::new(0.30, 0.74, 0.0)
    };

    let bases = [
        (index::INDEX_FINGER_MCP, 0.44),
        (index::MIDDLE_FINGER_MCP, 0.5),
        (index::RING_FINGER_MCP, 0.56),
        (index::PINKY_MCP, 0.62),
    ];
    for ((mcp, x), up) in bases.into_iter().zip(fingers_up) {
        let (dip_y, tip_y) = if up { (0.5, 0.4) } else { (0.65, 0.68) };
        points[mcp] = Point3::new(x, 0.7, 0.0);
        points[mcp + 1] = Point3::new(x, 0.6, 0.0);
        points[mcp + 2] = Point3::new(x, dip_y, 0.0);
        points[mcp + 3] = Point3::new(x, tip_y, 0.0);
    }

    LandmarkSet::new(points)
}

/// Index and middle up, ring and pinky curled, thumb closed
pub fn two_finger_hand() -> LandmarkSet {
    hand(false, [true, true, false, false])
}

pub fn open_hand() -> LandmarkSet {
    hand(true, [true; 4])
}

pub fn fist() -> LandmarkSet {
    hand(false, [false; 4])
}

#[derive(Debug, Clone, PartialEq)]
pub enum InjectedKeys {
    Press(String),
    Hotkey(Vec<String>),
}

/// Injector that records calls and rejects one configured key
#[derive(Debug, Default)]
pub struct RecordingInjector {
    pub events: Vec<InjectedKeys>,
    pub rejected: Vec<InjectError>,
    reject: Option<String>,
}

impl RecordingInjector {
    pub fn rejecting(key: &str) -> Self {
        RecordingInjector {
            reject: Some(key.to_string()),
            ..Default::default()
        }
    }

    fn check(&mut self, key: &str) -> Result<(), InjectError> {
        if self.reject.as_deref() == Some(key) {
            let err = InjectError::UnsupportedKey(key.to_string());
            self.rejected.push(err.clone());
            return Err(err);
        }
        Ok(())
    }
}

impl KeyInjector for RecordingInjector {
    fn press(&mut self, key: &str) -> Result<(), InjectError> {
        self.check(key)?;
        self.events.push(InjectedKeys::Press(key.to_string()));
        Ok(())
    }

    fn hotkey(&mut self, keys: &[String]) -> Result<(), InjectError> {
        for key in keys {
            self.check(key)?;
        }
        self.events.push(InjectedKeys::Hotkey(keys.to_vec()));
        Ok(())
    }
}

/// Provider replaying a fixed list of observations
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    frames: VecDeque<Observation>,
}

impl ScriptedProvider {
    pub fn new(frames: impl IntoIterator<Item = Observation>) -> Self {
        ScriptedProvider {
            frames: frames.into_iter().collect(),
        }
    }

    /// Append `set` every `step_ms` over [from_ms, to_ms]
    pub fn holding(mut self, set: &LandmarkSet, from_ms: u64, to_ms: u64, step_ms: u64) -> Self {
        let step = step_ms.max(1) as usize;
        for t in (from_ms..=to_ms).step_by(step) {
            self.frames
                .push_back(Observation::hand(Duration::from_millis(t), set.clone()));
        }
        self
    }

    pub fn then_no_hand(mut self, at_ms: u64) -> Self {
        self.frames
            .push_back(Observation::no_hand(Duration::from_millis(at_ms)));
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl LandmarkProvider for ScriptedProvider {
    fn next_observation(&mut self) -> Result<Observation, ProviderError> {
        self.frames.pop_front().ok_or(ProviderError::Exhausted)
    }
}

/// Capture prompt answering from a script; an exhausted script cancels
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<Option<String>>,
    pub rejections: Vec<String>,
    pub saved: Vec<String>,
}

impl ScriptedPrompt {
    pub fn answering<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedPrompt {
            answers: names.into_iter().map(|n| Some(n.into())).collect(),
            ..Default::default()
        }
    }
}

impl CapturePrompt for ScriptedPrompt {
    fn confirm_capture(&mut self) -> Option<String> {
        self.answers.pop_front().flatten()
    }

    fn report_rejection(&mut self, error: &CaptureError) {
        self.rejections.push(error.to_string());
    }

    fn report_saved(&mut self, template: &GestureTemplate) {
        self.saved.push(template.name.clone());
    }
}
