//! Session runtime for the rules engine
//!
//! Wraps a [`GameState`](tetris_rules_core::GameState) in a tokio task that
//! owns it outright:
//!
//! - [`session`]: the command loop, projection publishing, and shutdown
//! - [`gravity`]: a cancellable interval retimed on every level change
//! - [`event_log`]: optional JSON-lines record of starts, locks and game overs
//! - [`config`]: environment driven settings

pub mod config;
pub mod event_log;
pub mod gravity;
pub mod session;

pub use config::SessionConfig;
pub use event_log::{EventLog, EventRecord};
pub use gravity::GravityTimer;
pub use session::Session;
