//! Tetris 2048 (workspace facade crate).
//!
//! Re-exports the member crates under `crates/` so binaries, tests and
//! benches can use a single `tetris_2048::{core,input,term,types}` path.

pub use tetris_2048_core as core;
pub use tetris_2048_input as input;
pub use tetris_2048_term as term;
pub use tetris_2048_types as types;
