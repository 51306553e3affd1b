// Action dispatcher
// Turns an ActionSpec into injector calls; failures never reach the recognition loop

use crate::actions::injector::KeyInjector;
use crate::state::ActionSpec;

/// Fire-and-forget executor for actions
pub struct ActionDispatcher<I> {
    injector: I,
    dispatched: u64,
    failures: u64,
}

impl<I: KeyInjector> ActionDispatcher<I> {
    pub fn new(injector: I) -> Self {
        ActionDispatcher {
            injector,
            dispatched: 0,
            failures: 0,
        }
    }

    /// Execute an action
    ///
    /// Keys are lower-cased and otherwise passed through; rejecting unknown
    /// keys is the injector's call. Returns whether the injector succeeded.
    pub fn dispatch(&mut self, action: &ActionSpec) -> bool {
        self.dispatched += 1;

        let result = match action {
            ActionSpec::Single(key) => self.injector.press(&key.to_lowercase()),
            ActionSpec::Hotkey(keys) => {
                let keys: Vec<String> = keys.iter().map(|k| k.to_lowercase()).collect();
                self.injector.hotkey(&keys)
            }
        };

        match result {
            Ok(()) => {
                log::info!("Dispatched {}", action);
                true
            }
            Err(e) => {
                self.failures += 1;
                log::warn!("Failed to dispatch {}: {}", action, e);
                false
            }
        }
    }

    pub fn injector(&self) -> &I {
        &self.injector
    }

    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }

    pub fn failures(&self) -> u64 {
        self.failures
    }
}
