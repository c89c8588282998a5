//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]s. Each key
//! press yields at most one action; the game loop applies it immediately and
//! auto-fall keeps its own fixed tick.

pub mod map;

pub use tetris_2048_types as types;

pub use map::{handle_key_event, should_quit};
