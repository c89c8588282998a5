//! Terminal rendering for the tile-merging game.
//!
//! A session snapshot is drawn into a plain framebuffer by [`GameView`], and
//! [`TerminalRenderer`] flushes that framebuffer to the terminal, sending
//! only what changed since the previous frame.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tetris_2048_core as core;
pub use tetris_2048_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Layout, Viewport, CONTROLS_HELP};
pub use renderer::{changed_runs, encode_diff_into, encode_full_into, Run, TerminalRenderer};
