//! Input seam between the simulation step and the input collaborator.
//!
//! The step never listens for events itself. Each frame it is handed
//! something that answers "what is the state of this action right now",
//! already synced to a stable snapshot.

use crate::types::{Action, ActionState};

/// Per-frame, read-only view of player intents
pub trait InputSource {
    fn action(&self, action: Action) -> ActionState;
}

/// A fixed snapshot of all action states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    states: [ActionState; Action::COUNT],
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot with only `action` freshly pressed
    pub fn pressed(action: Action) -> Self {
        let mut s = Self::default();
        s.set(
            action,
            ActionState {
                pressed: true,
                held: true,
                ..ActionState::default()
            },
        );
        s
    }

    pub fn set(&mut self, action: Action, state: ActionState) {
        self.states[action.index()] = state;
    }

    pub fn get_mut(&mut self, action: Action) -> &mut ActionState {
        &mut self.states[action.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Action, ActionState)> + '_ {
        Action::ALL.iter().map(move |a| (*a, self.states[a.index()]))
    }
}

impl InputSource for InputSnapshot {
    fn action(&self, action: Action) -> ActionState {
        self.states[action.index()]
    }
}
