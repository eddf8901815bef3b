//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the rules of the 3D falling-block game: the piece
//! catalog, the discrete piece transform, the occupancy field with layer
//! clearing, and the per-frame simulation step. It has **no dependencies**
//! on terminals, key events, or rendering:
//!
//! - **Deterministic**: same seed (or scripted random source) and same inputs
//!   produce the same game
//! - **Headless**: input arrives through the [`InputSource`] trait, output
//!   leaves through [`GameSnapshot`] and [`CoreEvent`](types::CoreEvent)
//!
//! # Module Structure
//!
//! - [`pieces`]: the eight shape definitions
//! - [`piece`]: offsets + pivot, quarter-turn rotation, bounding box
//! - [`field`]: W x H x D occupancy grid, collision, placement and layer clearing
//! - [`game_state`]: gravity, input intents, placement, game over, scoring
//! - [`view`]: camera-relative control directions
//! - [`rng`]: injectable random source for new shapes
//! - [`scoring`]: score and speed-up rules
//! - [`snapshot`]: read-only copies for presentation
//! - [`input`]: the per-frame input seam
//!
//! # Game Rules
//!
//! - Pieces spawn centered two cells above the top layer and fall at a
//!   continuous velocity, one whole cell at a time
//! - A piece that can no longer fall settles; every completely filled
//!   horizontal layer is removed and everything above drops by one
//! - Clearing `r` layers at once scores `r * r` and speeds gravity up by
//!   `0.1 * r` cells per second
//! - A piece that settles while reaching above the top ends the game, which
//!   restarts immediately
//!
//! # Example
//!
//! ```
//! use glam::Vec3;
//! use voxtris_core::{GameState, InputSnapshot};
//! use voxtris_core::types::{Action, GameConfig};
//!
//! let mut game = GameState::new(GameConfig::default());
//! game.set_paused(false);
//!
//! let look = Vec3::new(0.0, 0.0, -1.0);
//! let start = game.piece().position();
//! game.step(16, &InputSnapshot::pressed(Action::ForceDown), look);
//! assert_eq!(game.piece().position().y, start.y - 1);
//! ```

pub mod field;
pub mod game_state;
pub mod input;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod view;

pub use voxtris_types as types;

// Re-export commonly used types for convenience
pub use field::Field;
pub use game_state::{Descent, GameState};
pub use input::{InputSnapshot, InputSource};
pub use piece::{BoundingBox, Piece};
pub use pieces::{shape, ShapeDef, CATALOG};
pub use rng::{RandomSource, ScriptedRandom, SimpleRng};
pub use scoring::{accelerated_velocity, placement_score};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use view::{snap_backward, view_forward_from_yaw, ControlFrame};
