//! Voxtris (workspace facade crate).
//!
//! Re-exports the workspace crates as `voxtris::{core,input,term,types}` and
//! holds the runner's settings and logging setup.

pub use voxtris_core as core;
pub use voxtris_input as input;
pub use voxtris_term as term;
pub use voxtris_types as types;

pub mod logging;
pub mod settings;
