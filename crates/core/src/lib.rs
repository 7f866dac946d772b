//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the game rules and state with no dependencies on terminal
//! I/O or wall-clock time:
//!
//! - **Deterministic**: same seed, same piece sequence
//! - **Testable**: every rule is a plain function or method
//! - **Portable**: runs in a terminal, headless, or behind any other surface
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with row clearing
//! - [`pieces`]: shape matrices, clockwise rotation and wall kicks
//! - [`collision`]: collision test and piece placement
//! - [`scoring`]: line-clear points, level curve, drop interval
//! - [`rng`]: uniform seeded piece selection
//! - [`session`]: the complete game state machine
//! - [`clock`]: pause-aware drop timing
//! - [`snapshot`]: immutable per-frame view for renderers
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: each spawn picks one of seven kinds independently
//! - **Rotation**: clockwise only, kicks tried at x, x-1, x+1, x-2, x+2
//! - **No lock delay**: a blocked descent locks immediately
//! - **Scoring**: 100/300/500/800 x level for 1-4 lines, +1 soft drop, +2 per hard-drop row
//! - **Levels**: one per 10 lines, each 100ms faster, floored at 100ms
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameSession;
//! use blockfall_types::GameAction;
//!
//! let mut game = GameSession::new(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.score() > 0); // hard drop awards points
//! ```

pub mod board;
pub mod clock;
pub mod collision;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use blockfall_types as types;

pub use board::Board;
pub use clock::DropClock;
pub use collision::{check_collision, place_piece};
pub use pieces::{base_shape, try_rotate, ActivePiece, Shape};
pub use rng::PieceSource;
pub use scoring::{drop_interval_ms, drop_score, level_for_lines, line_clear_score};
pub use session::{GameSession, LockOutcome, StepOutcome};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
