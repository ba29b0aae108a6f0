//! Falling-block rules engine (workspace facade crate).
//!
//! Re-exports the crates under `crates/` as `tetris_rules::{core,engine,input,term,types}`.

pub use tetris_rules_core as core;
pub use tetris_rules_engine as engine;
pub use tetris_rules_input as input;
pub use tetris_rules_term as term;
pub use tetris_rules_types as types;
