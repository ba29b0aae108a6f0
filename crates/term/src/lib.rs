//! Plain-character terminal host view.
//!
//! Turns a [`Projection`](tetris_rules_core::Projection) into rows of text and
//! flushes them to a terminal. There is no styling: every cell is two
//! characters wide so the board keeps a roughly square aspect.

pub mod frame;
pub mod renderer;

pub use tetris_rules_core as core;
pub use tetris_rules_types as types;

pub use frame::{cell_glyph, Frame};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
