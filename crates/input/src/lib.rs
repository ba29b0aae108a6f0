//! Terminal input mapping.
//!
//! Independent of any renderer: maps `crossterm` key events onto
//! [`crate::types::GameCommand`]. Key repeat is left to the terminal, so
//! a held key simply produces repeated press events.

pub mod map;

pub use tetris_rules_types as types;

pub use map::{handle_key_event, should_quit};
