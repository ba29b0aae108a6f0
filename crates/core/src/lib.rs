//! Core rules engine - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and the render
//! projection. It has **no dependencies** on UI, timers, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Every command is a plain method call on [`GameState`]
//! - **Portable**: Can run under any host (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`pieces`]: Piece catalog, occupancy matrices and clockwise rotation
//! - [`rng`]: 7-bag generator with a seeded LCG or an entropy source
//! - [`board`]: 10x20 grid with collision, copy-on-write merge and line clearing
//! - [`scoring`]: Line clear points, soft drop points, leveling, gravity table
//! - [`game_state`]: Active piece, hold, queue, counters and lifecycle
//! - [`projection`]: Read-only render grid with ghost overlay
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer**: every aligned run of seven pieces holds each kind once
//! - **Rotation**: clockwise through precomputed states, kicks of 0, -1, +1, -2, +2 columns
//! - **Ghost Piece**: shows where the current piece will land
//! - **Hold**: store one piece for later use (once per piece)
//! - **Scoring**: 100/300/500/800 x (level + 1), 1 point per soft drop row
//! - **Game over**: a piece locks while still partly above the board
//!
//! # Example
//!
//! ```
//! use tetris_rules_core::GameState;
//! use tetris_rules_core::types::GameCommand;
//!
//! let mut game = GameState::new(Some(12345));
//! game.start();
//!
//! game.apply(GameCommand::MoveRight);
//! game.apply(GameCommand::Rotate);
//! game.apply(GameCommand::HardDrop);
//!
//! let view = game.projection();
//! assert!(view.running);
//! assert_eq!(view.next.len(), 5);
//! ```

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod projection;
pub mod rng;
pub mod scoring;

pub use tetris_rules_types as types;

// Re-export commonly used types for convenience
pub use board::{clear_lines, collides, merge, Board};
pub use game_state::{ActivePiece, GameState, LockEvent};
pub use pieces::{get_shape, get_spawn_shape, PieceDefinition, Shape};
pub use projection::{render_cells, Projection, RenderGrid};
pub use rng::{BagGenerator, SimpleRng};
pub use scoring::{gravity_interval_ms, line_clear_score, next_level, soft_drop_score};
