//! Terminal "game renderer" module.
//!
//! A small rendering layer for terminal gameplay. It avoids widget/layout
//! frameworks and instead renders into a simple framebuffer that is diffed
//! and flushed to the terminal.
//!
//! Goals:
//! - Keep `core` deterministic and free of presentation concerns
//! - Show the 3D field through projections that follow the camera heading
//! - Allow precise control over aspect ratio (2 chars wide per cell)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use voxtris_core as core;
pub use voxtris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Projection, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
