//! Game state module - the per-frame simulation step
//!
//! This module ties together the field, the active piece, the random source
//! and scoring. Each [`GameState::step`] applies the frame's input intents to
//! a scratch copy of the piece, advances gravity, and then either commits the
//! scratch piece, settles it into the field, or ends the game.

use glam::{IVec3, Vec3};
use log::{debug, info};

use crate::field::Field;
use crate::input::InputSource;
use crate::piece::Piece;
use crate::rng::{RandomSource, SimpleRng};
use crate::scoring::{accelerated_velocity, placement_score};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Action, CoreEvent, GameConfig, SHAPE_COUNT};
use crate::view::ControlFrame;

/// Gravity state: continuous velocity turned into whole-cell drops
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Descent {
    /// Cells per second, negative = downward
    pub velocity: f32,
    /// Fractional height gathered since the last drop
    pub accumulated: f32,
}

impl Descent {
    pub fn new(velocity: f32) -> Self {
        Self {
            velocity,
            accumulated: 0.0,
        }
    }

    /// Add `seconds` of gravity. Returns true when a whole cell was gathered;
    /// at most one drop is reported per call.
    fn advance(&mut self, seconds: f32) -> bool {
        self.accumulated += self.velocity * seconds;
        if self.accumulated < -1.0 {
            self.accumulated += 1.0;
            true
        } else {
            false
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R: RandomSource = SimpleRng> {
    config: GameConfig,
    field: Field,
    piece: Piece,
    descent: Descent,
    rng: R,
    score: u32,
    rows_cleared: u32,
    pieces_placed: u32,
    paused: bool,
    /// Last placement/lifecycle event (consumed by the presentation side).
    last_event: Option<CoreEvent>,
}

impl GameState<SimpleRng> {
    /// Create a paused game seeded from `config.seed`
    pub fn new(config: GameConfig) -> Self {
        let rng = SimpleRng::new(config.seed);
        Self::with_random(config, rng)
    }
}

impl<R: RandomSource> GameState<R> {
    /// Create a paused game drawing new shapes from `rng`
    pub fn with_random(config: GameConfig, rng: R) -> Self {
        let mut state = Self {
            config,
            field: Field::new(config.extent),
            piece: Piece::default(),
            descent: Descent::new(config.initial_velocity),
            rng,
            score: 0,
            rows_cleared: 0,
            pieces_placed: 0,
            paused: true,
            last_event: None,
        };
        state.restart();
        state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Direct field access for scenario setup (tests, tools).
    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    /// Direct piece access for scenario setup (tests, tools).
    pub fn piece_mut(&mut self) -> &mut Piece {
        &mut self.piece
    }

    pub fn descent(&self) -> Descent {
        self.descent
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn rows_cleared(&self) -> u32 {
        self.rows_cleared
    }

    pub fn pieces_placed(&self) -> u32 {
        self.pieces_placed
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            info!("game {}", if paused { "paused" } else { "resumed" });
        }
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.paused);
    }

    /// Pivot of every new piece: centered in X/Z, above the top layer
    pub fn spawn_position(&self) -> IVec3 {
        IVec3::new(
            self.field.width() / 2,
            self.field.height() + self.config.spawn_headroom,
            self.field.depth() / 2,
        )
    }

    /// Take and clear the last lifecycle event.
    pub fn take_last_event(&mut self) -> Option<CoreEvent> {
        self.last_event.take()
    }

    /// Return to the initial state: empty field, start shape, base speed, zero score.
    pub fn reset(&mut self) {
        info!("reset (score {})", self.score);
        self.restart();
        self.last_event = Some(CoreEvent::Reset);
    }

    fn restart(&mut self) {
        self.field.reset();
        self.piece.set_shape(0);
        self.piece.set_position(self.spawn_position());
        self.descent = Descent::new(self.config.initial_velocity);
        self.score = 0;
        self.rows_cleared = 0;
        self.pieces_placed = 0;
    }

    fn spawn_next(&mut self) {
        let index = self.rng.next_index(SHAPE_COUNT);
        self.piece.set_shape(index);
        self.piece.set_position(self.spawn_position());
        self.descent.accumulated = 0.0;
    }

    /// Run one frame of simulation.
    ///
    /// `elapsed_ms` is the time since the previous step, `input` the frame's
    /// synced intents, and `view_forward` the camera's forward direction in
    /// field space (used to make translation and roll camera-relative).
    ///
    /// Returns true when the frame ended with a placement or a game over.
    /// Nothing happens while paused.
    pub fn step(&mut self, elapsed_ms: u32, input: &impl InputSource, view_forward: Vec3) -> bool {
        if self.paused {
            return false;
        }

        let frame = ControlFrame::from_view(view_forward);
        let mut scratch = self.piece;

        for action in Action::ALL {
            let state = input.action(action);
            let fire = if action.is_rotation() {
                state.pressed
            } else {
                state.triggered()
            };
            if fire {
                self.apply_action(&mut scratch, action, &frame);
            }
        }

        if self.descent.advance(elapsed_ms as f32 / 1000.0) {
            scratch.translate(IVec3::NEG_Y);
        }

        if !self.field.collides(&scratch) {
            self.piece = scratch;
            return false;
        }

        if scratch.bounding_box().top >= self.field.height() {
            let score = self.score;
            info!("game over with score {score}, {} layers", self.rows_cleared);
            self.restart();
            self.last_event = Some(CoreEvent::GameOver { score });
            return true;
        }

        // The drop is what collided: rest one cell higher.
        scratch.translate(IVec3::Y);
        let rows = self.field.place(&scratch);
        self.score += placement_score(rows);
        self.rows_cleared += rows;
        self.pieces_placed += 1;
        self.descent.velocity =
            accelerated_velocity(self.descent.velocity, rows, self.config.speedup_per_row);
        debug!(
            "placed shape {} at {}, {rows} layer(s), score {}",
            scratch.shape_index(),
            scratch.position(),
            self.score
        );
        self.last_event = Some(CoreEvent::Placed {
            rows_cleared: rows,
            score: self.score,
        });

        self.spawn_next();
        true
    }

    fn apply_action(&mut self, scratch: &mut Piece, action: Action, frame: &ControlFrame) {
        match action {
            Action::MoveForward => self.try_transform(scratch, |p| p.translate(frame.forward)),
            Action::MoveBackward => self.try_transform(scratch, |p| p.translate(frame.backward)),
            Action::MoveLeft => self.try_transform(scratch, |p| p.translate(frame.left)),
            Action::MoveRight => self.try_transform(scratch, |p| p.translate(frame.right)),
            Action::ForceDown => self.descent.accumulated -= 1.0,
            Action::RotateZCcw => {
                self.try_transform(scratch, |p| p.rotate_around_axis(frame.forward))
            }
            Action::RotateZCw => {
                self.try_transform(scratch, |p| p.rotate_around_axis(frame.backward))
            }
            Action::RotateYCcw => self.try_transform(scratch, |p| p.rotate_around_axis(IVec3::NEG_Y)),
            Action::RotateYCw => self.try_transform(scratch, |p| p.rotate_around_axis(IVec3::Y)),
        }
    }

    /// Apply `f` to a copy of `scratch`; keep it only if it fits.
    fn try_transform(&self, scratch: &mut Piece, f: impl FnOnce(&mut Piece)) {
        let mut candidate = *scratch;
        f(&mut candidate);
        if !self.field.collides(&candidate) {
            scratch.copy_from(&candidate);
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.extent = self.field.extent();
        out.occupancy.clear();
        out.occupancy.extend_from_slice(self.field.cells());
        out.active = ActiveSnapshot::from(&self.piece);
        out.score = self.score;
        out.rows_cleared = self.rows_cleared;
        out.pieces_placed = self.pieces_placed;
        out.velocity = self.descent.velocity;
        out.paused = self.paused;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState<SimpleRng> {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputSnapshot;
    use crate::pieces::I_SHAPE;
    use crate::rng::ScriptedRandom;
    use crate::types::ActionState;

    const LOOK: Vec3 = Vec3::new(0.0, 0.0, -1.0);

    fn running() -> GameState<ScriptedRandom> {
        let mut s = GameState::with_random(GameConfig::default(), ScriptedRandom::constant(I_SHAPE));
        s.set_paused(false);
        s
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(GameConfig::default());
        assert!(state.paused());
        assert_eq!(state.score(), 0);
        assert_eq!(state.rows_cleared(), 0);
        assert_eq!(state.piece().shape_index(), 0);
        assert_eq!(state.piece().position(), IVec3::new(2, 14, 2));
        assert_eq!(state.descent(), Descent::new(-1.0));
        assert_eq!(state.field().occupied_count(), 0);
    }

    #[test]
    fn test_paused_step_is_noop() {
        let mut state = GameState::new(GameConfig::default());
        let before = *state.piece();
        assert!(!state.step(5_000, &InputSnapshot::pressed(Action::MoveLeft), LOOK));
        assert_eq!(*state.piece(), before);
        assert_eq!(state.descent().accumulated, 0.0);
    }

    #[test]
    fn test_descent_advance_drops_once_per_call() {
        let mut d = Descent::new(-1.0);
        assert!(!d.advance(0.5));
        assert!(!d.advance(0.5));
        assert!(d.advance(0.1));
        assert!((d.accumulated - -0.1).abs() < 1e-5);

        let mut fast = Descent::new(-50.0);
        assert!(fast.advance(1.0));
        assert!(fast.accumulated < -1.0);
    }

    #[test]
    fn test_gravity_drops_one_cell() {
        let mut state = running();
        let y0 = state.piece().position().y;
        state.step(600, &InputSnapshot::new(), LOOK);
        assert_eq!(state.piece().position().y, y0);
        state.step(600, &InputSnapshot::new(), LOOK);
        assert_eq!(state.piece().position().y, y0 - 1);
    }

    #[test]
    fn test_force_down_drops_on_next_gravity_check() {
        let mut state = running();
        let y0 = state.piece().position().y;
        state.step(16, &InputSnapshot::pressed(Action::ForceDown), LOOK);
        assert_eq!(state.piece().position().y, y0 - 1);
    }

    #[test]
    fn test_rotation_needs_press_edge() {
        let mut state = running();
        state.piece_mut().set_shape(0);
        let cells = *state.piece().cells();

        let mut held = InputSnapshot::new();
        held.set(
            Action::RotateYCw,
            ActionState {
                held: true,
                repeat: true,
                ..ActionState::default()
            },
        );
        state.step(0, &held, LOOK);
        assert_eq!(*state.piece().cells(), cells);

        state.step(0, &InputSnapshot::pressed(Action::RotateYCw), LOOK);
        assert_ne!(*state.piece().cells(), cells);
    }

    #[test]
    fn test_translation_fires_on_repeat_tick() {
        let mut state = running();
        let x0 = state.piece().position().x;
        let mut repeat = InputSnapshot::new();
        repeat.set(
            Action::MoveRight,
            ActionState {
                held: true,
                repeat: true,
                ..ActionState::default()
            },
        );
        state.step(0, &repeat, LOOK);
        assert_eq!(state.piece().position().x, x0 - 1);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut state = running();
        state.field_mut().fill_layer(0);
        state.step(16, &InputSnapshot::pressed(Action::MoveLeft), LOOK);
        state.reset();
        assert_eq!(state.field().occupied_count(), 0);
        assert_eq!(state.piece().shape_index(), 0);
        assert_eq!(state.piece().position(), state.spawn_position());
        assert_eq!(state.take_last_event(), Some(CoreEvent::Reset));
        assert_eq!(state.take_last_event(), None);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = running();
        state.field_mut().set(IVec3::new(1, 0, 2), true);
        let snap = state.snapshot();
        assert_eq!(snap.occupancy.len(), 4 * 12 * 4);
        assert!(snap.occupancy[state.field().index(IVec3::new(1, 0, 2)).unwrap()]);
        assert_eq!(snap.active.position, state.piece().position());
        assert_eq!(snap.active.cells, state.piece().world_cells());
        assert!(!snap.paused);
    }
}
