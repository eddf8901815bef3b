//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events to physical key names, resolves them through the key bindings, and
//! keeps a [`KeyboardState`] that is synced once per frame into the
//! simulation's [`InputSnapshot`](voxtris_core::InputSnapshot). Terminals
//! without key-release events are handled with an auto-release timeout.

pub mod bindings;
pub mod keyboard;
pub mod map;

pub use voxtris_core as core;
pub use voxtris_types as types;

pub use bindings::{BindingsError, KeyBindings};
pub use keyboard::KeyboardState;
pub use map::{key_code_name, key_transition, should_quit, system_key, KeyTransition, SystemKey};
