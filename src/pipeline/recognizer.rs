// Per-frame recognition
// observation -> normalize -> classify -> hold/cooldown -> dispatch

use std::time::Duration;

use crate::actions::{ActionDispatcher, KeyInjector};
use crate::config::RecognitionConfig;
use crate::gestures::{GestureClassifier, GestureId, GestureStateMachine};
use crate::landmarks::{normalize, Observation};
use crate::state::{ActionSpec, Settings};

/// A gesture that passed the hold and cooldown checks
#[derive(Debug, Clone, PartialEq)]
pub struct FiredAction {
    pub gesture: GestureId,

    /// Mapped action; `None` for gestures without a mapping (e.g. a fist)
    pub action: Option<ActionSpec>,

    pub at: Duration,
}

/// What one frame produced
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameReport {
    /// Active gesture for this frame, for preview display
    pub gesture: Option<GestureId>,

    pub fired: Option<FiredAction>,
}

/// Synchronous recognition step shared by the app loop and tests
pub struct Recognizer<I> {
    classifier: GestureClassifier,
    machine: GestureStateMachine,
    dispatcher: ActionDispatcher<I>,
}

impl<I: KeyInjector> Recognizer<I> {
    pub fn new(config: &RecognitionConfig, injector: I) -> Self {
        Recognizer {
            classifier: GestureClassifier::with_config(config.classifier),
            machine: GestureStateMachine::with_config(config.hold),
            dispatcher: ActionDispatcher::new(injector),
        }
    }

    /// Process one observation against the given settings snapshot
    pub fn process(&mut self, observation: &Observation, settings: &Settings) -> FrameReport {
        let gesture = observation.hand.as_ref().and_then(|landmarks| {
            let pose = normalize(landmarks);
            let result = self.classifier.explain(&pose, &settings.templates);
            log::debug!(
                "t={:?} fingers={:?} template={:?} -> {:?}",
                observation.timestamp,
                result.finger_count,
                result.template,
                result.gesture
            );
            result.gesture
        });

        let fired = self
            .machine
            .observe(observation.timestamp, gesture.clone())
            .map(|event| {
                let action = settings.action_for(&event.gesture).cloned();
                match &action {
                    Some(action) => {
                        log::info!("{} fired at {:?}: {}", event.gesture, event.at, action);
                        self.dispatcher.dispatch(action);
                    }
                    None => log::info!("{} fired at {:?} with no mapping", event.gesture, event.at),
                }
                FiredAction {
                    gesture: event.gesture,
                    action,
                    at: event.at,
                }
            });

        FrameReport { gesture, fired }
    }

    /// Forget the current candidate and the cooldown clock
    pub fn reset(&mut self) {
        self.machine.reset();
    }

    pub fn dispatcher(&self) -> &ActionDispatcher<I> {
        &self.dispatcher
    }
}
