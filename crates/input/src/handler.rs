//! Press-and-hold auto-repeat for terminal environments.
//!
//! A held move or soft drop fires once on press, then again after the repeat delay plus one
//! interval, and every interval after that. Time is fed in by the caller, so the state
//! machine is deterministic.
//!
//! Supports terminals that do not emit key release events by using a timeout.

use arrayvec::ArrayVec;

use crate::types::{GameAction, AUTO_REPEAT_DELAY_MS, AUTO_REPEAT_INTERVAL_MS};

/// Actions produced by one [`AutoRepeat::update`] call
pub type RepeatBatch = ArrayVec<GameAction, 32>;

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained "held" state that triggers repeats.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// What is holding the action down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldSource {
    /// A keyboard key; may need the release timeout.
    Key,
    /// A pointer button; always reports its release.
    Pointer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Hold {
    action: GameAction,
    source: HoldSource,
    held_ms: u32,
    /// Time since the key last reported itself (press or OS repeat).
    idle_ms: u32,
}

/// Tracks the single held action and its repeat timing.
#[derive(Debug, Clone)]
pub struct AutoRepeat {
    hold: Option<Hold>,
    delay_ms: u32,
    interval_ms: u32,
    key_release_timeout_ms: Option<u32>,
}

impl AutoRepeat {
    pub fn new() -> Self {
        Self::with_config(AUTO_REPEAT_DELAY_MS, AUTO_REPEAT_INTERVAL_MS)
    }

    pub fn with_config(delay_ms: u32, interval_ms: u32) -> Self {
        Self {
            hold: None,
            delay_ms,
            interval_ms: interval_ms.max(1),
            key_release_timeout_ms: Some(DEFAULT_KEY_RELEASE_TIMEOUT_MS),
        }
    }

    /// Release timeout for keys; `None` when the terminal reports key releases.
    pub fn with_key_release_timeout_ms(mut self, timeout_ms: Option<u32>) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> Option<u32> {
        self.key_release_timeout_ms
    }

    /// Currently held action, if any
    pub fn held(&self) -> Option<GameAction> {
        self.hold.map(|h| h.action)
    }

    /// Register a press. Returns the action to apply immediately.
    ///
    /// A key press for the action that is already held (OS key repeat) only keeps the hold
    /// alive and returns `None`. Actions that do not repeat pass straight through.
    pub fn press(&mut self, action: GameAction, source: HoldSource) -> Option<GameAction> {
        if !action.repeats_when_held() {
            return Some(action);
        }

        if let Some(hold) = self.hold.as_mut() {
            if hold.action == action && source == HoldSource::Key && hold.source == source {
                hold.idle_ms = 0;
                return None;
            }
        }

        self.hold = Some(Hold {
            action,
            source,
            held_ms: 0,
            idle_ms: 0,
        });
        Some(action)
    }

    /// Register a release; only the matching held action is let go.
    pub fn release(&mut self, action: GameAction) {
        if self.held() == Some(action) {
            self.hold = None;
        }
    }

    /// Let go of whatever is held.
    pub fn cancel(&mut self) {
        self.hold = None;
    }

    /// Advance time and collect due repeats.
    ///
    /// When the game is not `playable` (paused or over) the hold is cancelled, so a
    /// restarted or resumed game never sees stale repeats.
    pub fn update(&mut self, elapsed_ms: u32, playable: bool) -> RepeatBatch {
        let mut actions = RepeatBatch::new();
        if !playable {
            self.cancel();
            return actions;
        }

        let Some(mut hold) = self.hold else {
            return actions;
        };

        // Auto-release when terminal does not emit release events.
        if hold.source == HoldSource::Key {
            if let Some(timeout) = self.key_release_timeout_ms {
                hold.idle_ms = hold.idle_ms.saturating_add(elapsed_ms);
                if hold.idle_ms > timeout {
                    self.hold = None;
                    return actions;
                }
            }
        }

        let before = self.repeats_after(hold.held_ms);
        hold.held_ms = hold.held_ms.saturating_add(elapsed_ms);
        let after = self.repeats_after(hold.held_ms);
        for _ in before..after {
            if actions.try_push(hold.action).is_err() {
                break;
            }
        }

        self.hold = Some(hold);
        actions
    }

    /// Number of repeats due once an action has been held for `held_ms`
    fn repeats_after(&self, held_ms: u32) -> u32 {
        held_ms.saturating_sub(self.delay_ms) / self.interval_ms
    }
}

impl Default for AutoRepeat {
    fn default() -> Self {
        Self::new()
    }
}
