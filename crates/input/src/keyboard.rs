//! Keyboard state with frame-synced edges and auto-repeat.
//!
//! Key events arrive whenever the terminal delivers them and only touch a
//! pending buffer. Once per frame [`KeyboardState::sync`] turns the buffer
//! into a stable [`InputSnapshot`] that the simulation reads.
//!
//! Supports terminals that do not emit key release events by using a timeout.

use log::debug;

use crate::bindings::KeyBindings;
use crate::core::{InputSnapshot, InputSource};
use crate::types::{Action, ActionState, KEY_REPEAT_MS};

// No longer than one repeat period, so a lone tap is released before it
// could earn a repeat tick.
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = KEY_REPEAT_MS;

/// Asynchronous side of one action, written by key events
#[derive(Debug, Clone, Copy, Default)]
struct PendingKey {
    down: bool,
    /// A press arrived since the last sync (survives a release before it)
    tapped: bool,
    last_event_ms: u64,
}

/// Frame-synced view of the bound keys
#[derive(Debug, Clone)]
pub struct KeyboardState {
    bindings: KeyBindings,
    pending: [PendingKey; Action::COUNT],
    snapshot: InputSnapshot,
    last_tick_ms: [u64; Action::COUNT],
    now_ms: u64,
    repeat_ms: u32,
    key_release_timeout_ms: u32,
    capture: Option<Action>,
}

impl KeyboardState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            pending: [PendingKey::default(); Action::COUNT],
            snapshot: InputSnapshot::new(),
            last_tick_ms: [0; Action::COUNT],
            now_ms: 0,
            repeat_ms: KEY_REPEAT_MS,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            capture: None,
        }
    }

    pub fn with_repeat_ms(mut self, repeat_ms: u32) -> Self {
        self.repeat_ms = repeat_ms.max(1);
        self
    }

    /// 0 disables auto-release (for terminals that report key releases).
    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Bind the next pressed key to `action` instead of acting on it.
    pub fn listen_and_set(&mut self, action: Action) {
        self.capture = Some(action);
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_some()
    }

    /// Record a press (or terminal auto-repeat) of `code`.
    ///
    /// Returns the action a pending capture bound the key to, if any.
    pub fn key_down(&mut self, code: &str) -> Option<Action> {
        if let Some(action) = self.capture.take() {
            self.bindings.rebind(action, code);
            return Some(action);
        }
        if let Some(action) = self.bindings.action_for(code) {
            let p = &mut self.pending[action.index()];
            p.down = true;
            p.tapped = true;
            p.last_event_ms = self.now_ms;
        }
        None
    }

    pub fn key_up(&mut self, code: &str) {
        if let Some(action) = self.bindings.action_for(code) {
            self.pending[action.index()].down = false;
        }
    }

    /// Advance the clock by `elapsed_ms` and transcribe pending key levels.
    ///
    /// - pressed: down now, not held at the previous sync
    /// - held: down now
    /// - released: not down now, held at the previous sync
    /// - repeat: held and a full `repeat_ms` passed since the last tick; with
    ///   auto-release on, a press or terminal repeat event must also have
    ///   arrived since that tick
    ///
    /// A press and release that both land between two syncs still yields one
    /// frame of `pressed`, followed by `released` on the next sync.
    pub fn sync(&mut self, elapsed_ms: u32) -> InputSnapshot {
        self.now_ms += elapsed_ms as u64;

        for action in Action::ALL {
            let i = action.index();
            let p = &mut self.pending[i];

            if p.down
                && self.key_release_timeout_ms > 0
                && self.now_ms - p.last_event_ms > self.key_release_timeout_ms as u64
            {
                debug!("auto-release {}", action.as_str());
                p.down = false;
            }

            let last_event_ms = p.last_event_ms;
            let tapped = std::mem::take(&mut p.tapped);
            let was_held = self.snapshot.action(action).held;
            let active = p.down || (tapped && !was_held);

            let state = self.snapshot.get_mut(action);
            *state = if active {
                if !was_held {
                    self.last_tick_ms[i] = self.now_ms;
                }
                ActionState {
                    pressed: !was_held,
                    held: true,
                    released: false,
                    repeat: false,
                }
            } else {
                ActionState {
                    released: was_held,
                    ..ActionState::default()
                }
            };

            let refreshed =
                self.key_release_timeout_ms == 0 || last_event_ms >= self.last_tick_ms[i];
            if state.held
                && refreshed
                && self.now_ms - self.last_tick_ms[i] > self.repeat_ms as u64
            {
                self.last_tick_ms[i] += self.repeat_ms as u64;
                state.repeat = true;
            }
        }

        self.snapshot
    }

    /// Forget all pending and held keys (e.g. when pausing).
    pub fn reset(&mut self) {
        self.pending = [PendingKey::default(); Action::COUNT];
        self.snapshot = InputSnapshot::new();
        self.capture = None;
    }
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyboard() -> KeyboardState {
        KeyboardState::default().with_key_release_timeout_ms(0)
    }

    #[test]
    fn test_press_hold_release_edges() {
        let mut kb = keyboard();
        kb.key_down("KeyA");

        let s = kb.sync(16);
        let left = s.action(Action::MoveLeft);
        assert!(left.pressed && left.held && !left.released);

        let left = kb.sync(16).action(Action::MoveLeft);
        assert!(!left.pressed && left.held);

        kb.key_up("KeyA");
        let left = kb.sync(16).action(Action::MoveLeft);
        assert!(!left.pressed && !left.held && left.released);

        let left = kb.sync(16).action(Action::MoveLeft);
        assert_eq!(left, ActionState::default());
    }

    #[test]
    fn test_tap_between_syncs_is_not_lost() {
        let mut kb = keyboard();
        kb.key_down("KeyE");
        kb.key_up("KeyE");

        let rot = kb.sync(16).action(Action::RotateZCw);
        assert!(rot.pressed);
        let rot = kb.sync(16).action(Action::RotateZCw);
        assert!(rot.released && !rot.held);
    }

    #[test]
    fn test_repeat_ticks_every_period_while_held() {
        let mut kb = keyboard().with_repeat_ms(150);
        kb.key_down("KeyD");
        assert!(!kb.sync(0).action(Action::MoveRight).repeat);

        assert!(!kb.sync(150).action(Action::MoveRight).repeat);
        assert!(kb.sync(1).action(Action::MoveRight).repeat);
        assert!(!kb.sync(100).action(Action::MoveRight).repeat);
        assert!(kb.sync(100).action(Action::MoveRight).repeat);
    }

    #[test]
    fn test_unbound_keys_are_ignored() {
        let mut kb = keyboard();
        kb.key_down("KeyP");
        let s = kb.sync(16);
        assert!(s.iter().all(|(_, st)| st == ActionState::default()));
    }

    #[test]
    fn test_auto_release_without_release_events() {
        let mut kb = KeyboardState::default().with_key_release_timeout_ms(50);
        kb.key_down("KeyW");
        assert!(kb.sync(10).action(Action::MoveForward).held);
        assert!(kb.sync(40).action(Action::MoveForward).held);

        let fwd = kb.sync(20).action(Action::MoveForward);
        assert!(!fwd.held && fwd.released);
    }

    #[test]
    fn test_terminal_repeat_keeps_key_held() {
        let mut kb = KeyboardState::default().with_key_release_timeout_ms(50);
        kb.key_down("KeyW");
        for _ in 0..10 {
            assert!(kb.sync(30).action(Action::MoveForward).held);
            kb.key_down("KeyW");
        }
    }

    #[test]
    fn test_lone_press_without_release_fires_once() {
        let mut kb = KeyboardState::default();
        kb.key_down("KeyA");
        let fired = (0..60)
            .filter(|_| kb.sync(16).action(Action::MoveLeft).triggered())
            .count();
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_terminal_repeat_events_earn_repeat_ticks() {
        let mut kb = KeyboardState::default();
        let mut fired = 0;
        for _ in 0..40 {
            kb.key_down("KeyA");
            if kb.sync(16).action(Action::MoveLeft).triggered() {
                fired += 1;
            }
        }
        // The press, then ticks at 176, 320, 480 and 624ms.
        assert_eq!(fired, 5);
    }

    #[test]
    fn test_listen_and_set_rebinds_next_key() {
        let mut kb = keyboard();
        kb.listen_and_set(Action::ForceDown);
        assert!(kb.is_capturing());
        assert_eq!(kb.key_down("Space"), Some(Action::ForceDown));
        assert!(!kb.is_capturing());
        assert_eq!(kb.bindings().code(Action::ForceDown), "Space");

        // The capturing press itself did not act.
        assert!(!kb.sync(16).action(Action::ForceDown).pressed);

        kb.key_down("Space");
        assert!(kb.sync(16).action(Action::ForceDown).pressed);
    }

    #[test]
    fn test_reset_clears_held_state() {
        let mut kb = keyboard();
        kb.key_down("KeyA");
        kb.sync(16);
        kb.reset();
        assert_eq!(kb.sync(16).action(Action::MoveLeft), ActionState::default());
    }
}
