// Gesture state machine
// Hold-then-fire with a global cooldown: decides when a recognized gesture becomes an action

use std::time::Duration;

use crate::gestures::types::GestureId;

/// Timing policy for firing gestures
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoldConfig {
    /// Continuous observation time before a candidate fires
    pub hold_duration: Duration,

    /// Minimum time between two fires, regardless of gesture
    pub cooldown: Duration,
}

impl Default for HoldConfig {
    fn default() -> Self {
        HoldConfig {
            hold_duration: Duration::from_secs(1),
            cooldown: Duration::from_secs(2),
        }
    }
}

/// Where the current candidate stands
#[derive(Debug, Clone, PartialEq)]
pub enum RecognitionPhase {
    /// No hand, or nothing confident
    Idle,

    /// Candidate observed continuously since `since`
    Armed { candidate: GestureId, since: Duration },

    /// Candidate fired at `at` and is still being held
    Fired { candidate: GestureId, at: Duration },
}

/// Emitted once per stabilized gesture
#[derive(Debug, Clone, PartialEq)]
pub struct FireEvent {
    pub gesture: GestureId,
    pub at: Duration,
}

/// Consumes timestamped classification results and emits fire events
///
/// A candidate fires when all of these hold:
/// - it has been observed continuously for at least `hold_duration`
/// - at least `cooldown` has passed since the previous fire
/// - it differs from the last fired gesture, or the hand left the frame since
///
/// After firing, further frames of the same candidate are ignored until the
/// candidate changes or a no-hand frame resets the machine. A no-hand frame
/// never resets the cooldown clock.
#[derive(Debug, Clone)]
pub struct GestureStateMachine {
    config: HoldConfig,
    phase: RecognitionPhase,
    last_fire_at: Option<Duration>,
    last_fired: Option<GestureId>,
    reset_since_fire: bool,
}

impl GestureStateMachine {
    pub fn new() -> Self {
        Self::with_config(HoldConfig::default())
    }

    pub fn with_config(config: HoldConfig) -> Self {
        GestureStateMachine {
            config,
            phase: RecognitionPhase::Idle,
            last_fire_at: None,
            last_fired: None,
            reset_since_fire: true,
        }
    }

    pub fn config(&self) -> &HoldConfig {
        &self.config
    }

    pub fn phase(&self) -> &RecognitionPhase {
        &self.phase
    }

    pub fn last_fired(&self) -> Option<&GestureId> {
        self.last_fired.as_ref()
    }

    /// Forget everything, including the cooldown clock
    pub fn reset(&mut self) {
        *self = Self::with_config(self.config);
    }

    /// Feed one classified frame; `None` means no hand or no confident gesture
    pub fn observe(&mut self, now: Duration, candidate: Option<GestureId>) -> Option<FireEvent> {
        let Some(candidate) = candidate else {
            if self.phase != RecognitionPhase::Idle {
                log::debug!("Hand lost, back to idle");
            }
            self.phase = RecognitionPhase::Idle;
            self.reset_since_fire = true;
            return None;
        };

        let armed_since = match &self.phase {
            RecognitionPhase::Armed { candidate: c, since } if *c == candidate => Some(*since),
            RecognitionPhase::Fired { candidate: c, .. } if *c == candidate => return None,
            _ => None,
        };

        let since = match armed_since {
            Some(since) => since,
            None => {
                log::debug!("Arming {}", candidate);
                self.phase = RecognitionPhase::Armed {
                    candidate: candidate.clone(),
                    since: now,
                };
                now
            }
        };

        if !self.ready_to_fire(&candidate, since, now) {
            return None;
        }

        self.phase = RecognitionPhase::Fired {
            candidate: candidate.clone(),
            at: now,
        };
        self.last_fire_at = Some(now);
        self.last_fired = Some(candidate.clone());
        self.reset_since_fire = false;

        Some(FireEvent {
            gesture: candidate,
            at: now,
        })
    }

    fn ready_to_fire(&self, candidate: &GestureId, since: Duration, now: Duration) -> bool {
        let held = now.saturating_sub(since) >= self.config.hold_duration;
        let cooled = self
            .last_fire_at
            .map_or(true, |at| now.saturating_sub(at) >= self.config.cooldown);
        let fresh = self.reset_since_fire || self.last_fired.as_ref() != Some(candidate);

        held && cooled && fresh
    }
}

impl Default for GestureStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn two() -> Option<GestureId> {
        Some(GestureId::FingerCount(2))
    }

    fn three() -> Option<GestureId> {
        Some(GestureId::FingerCount(3))
    }

    /// Feed a candidate every 100 ms over [from, to] and collect fires
    fn hold(
        machine: &mut GestureStateMachine,
        candidate: Option<GestureId>,
        from: u64,
        to: u64,
    ) -> Vec<FireEvent> {
        (from..=to)
            .step_by(100)
            .filter_map(|t| machine.observe(ms(t), candidate.clone()))
            .collect()
    }

    #[test]
    fn test_fires_once_after_hold() {
        let mut machine = GestureStateMachine::new();
        let fires = hold(&mut machine, two(), 0, 3000);

        assert_eq!(fires.len(), 1);
        assert_eq!(fires[0].gesture, GestureId::FingerCount(2));
        assert_eq!(fires[0].at, ms(1000));
        assert!(matches!(machine.phase(), RecognitionPhase::Fired { .. }));
    }

    #[test]
    fn test_no_fire_before_hold_elapsed() {
        let mut machine = GestureStateMachine::new();
        assert!(hold(&mut machine, two(), 0, 900).is_empty());
        assert!(matches!(machine.phase(), RecognitionPhase::Armed { .. }));
    }

    #[test]
    fn test_candidate_change_restarts_hold() {
        let mut machine = GestureStateMachine::new();
        assert!(hold(&mut machine, two(), 0, 800).is_empty());
        assert!(hold(&mut machine, three(), 900, 1700).is_empty());
        let fires = hold(&mut machine, three(), 1800, 1900);
        assert_eq!(fires.len(), 1);
        assert_eq!(fires[0].at, ms(1900));
    }

    #[test]
    fn test_second_gesture_suppressed_within_cooldown() {
        let mut machine = GestureStateMachine::new();
        assert_eq!(hold(&mut machine, two(), 0, 1000).len(), 1);

        // Three is held long enough at 2100 but the cooldown runs until 3000
        assert!(hold(&mut machine, three(), 1100, 2900).is_empty());

        let fires = hold(&mut machine, three(), 3000, 3000);
        assert_eq!(fires.len(), 1);
        assert_eq!(fires[0].gesture, GestureId::FingerCount(3));
    }

    #[test]
    fn test_same_gesture_refires_after_reset_and_cooldown() {
        let mut machine = GestureStateMachine::new();
        assert_eq!(hold(&mut machine, two(), 0, 1000).len(), 1);

        machine.observe(ms(1100), None);
        assert_eq!(machine.phase(), &RecognitionPhase::Idle);

        // Re-armed at 1200, held by 2200, cooldown clears at 3000
        assert!(hold(&mut machine, two(), 1200, 2900).is_empty());
        assert_eq!(hold(&mut machine, two(), 3000, 3000).len(), 1);
    }

    #[test]
    fn test_same_gesture_without_reset_does_not_refire() {
        let mut machine = GestureStateMachine::new();
        assert_eq!(hold(&mut machine, two(), 0, 1000).len(), 1);

        // Brief switch away and back without the hand leaving
        hold(&mut machine, three(), 1100, 1100);
        assert!(hold(&mut machine, two(), 1200, 6000).is_empty());
    }

    #[test]
    fn test_no_hand_keeps_cooldown_clock() {
        let mut machine = GestureStateMachine::new();
        assert_eq!(hold(&mut machine, two(), 0, 1000).len(), 1);
        machine.observe(ms(1050), None);

        // Held from 1100, hold satisfied at 2100, cooldown not until 3000
        let fires = hold(&mut machine, three(), 1100, 3500);
        assert_eq!(fires.len(), 1);
        assert_eq!(fires[0].at, ms(3000));
    }

    #[test]
    fn test_unclassified_frame_counts_as_no_hand() {
        let mut machine = GestureStateMachine::new();
        hold(&mut machine, two(), 0, 500);
        machine.observe(ms(600), None);
        assert!(hold(&mut machine, two(), 700, 1600).is_empty());
        assert_eq!(hold(&mut machine, two(), 1700, 1700).len(), 1);
    }

    #[test]
    fn test_zero_hold_fires_immediately() {
        let mut machine = GestureStateMachine::with_config(HoldConfig {
            hold_duration: Duration::ZERO,
            cooldown: Duration::ZERO,
        });
        assert!(machine.observe(ms(0), two()).is_some());
        assert!(machine.observe(ms(10), two()).is_none());
        assert!(machine.observe(ms(20), three()).is_some());
    }

    #[test]
    fn test_reset_clears_cooldown() {
        let mut machine = GestureStateMachine::new();
        assert_eq!(hold(&mut machine, two(), 0, 1000).len(), 1);
        machine.reset();
        assert_eq!(machine.last_fired(), None);
        assert_eq!(hold(&mut machine, three(), 1100, 2100).len(), 1);
    }
}
