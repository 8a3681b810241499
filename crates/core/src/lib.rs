//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on UI, audio or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Comprehensive unit tests for all game rules
//! - **Portable**: Can run in any environment (terminal, headless, benchmarks)
//! - **Allocation-free**: The board, pieces and cue queue live in fixed-size arrays
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid of locked cells and line clearing
//! - [`pieces`]: Shape matrices, the seven-piece catalog and clockwise rotation
//! - [`rng`]: Seedable uniform piece generation
//! - [`collision`]: Wall, floor and overlap checks
//! - [`rotation`]: Rotation with a horizontal wall-kick search
//! - [`scoring`]: Line clear points, levels and gravity speed
//! - [`game_state`]: The state machine tying it all together
//! - [`snapshot`]: Read-only view handed to renderers
//!
//! # Game Rules
//!
//! - **Uniform Randomizer**: Every kind is equally likely on every draw
//! - **Simple Kicks**: A rotation that collides is retried 1 and 2 columns to each side
//! - **Instant Lock**: A piece locks the moment it cannot move down
//! - **Scoring**: 40/100/300/1200 times the level; a level every 10 lines
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::{GameAction, SoundCue};
//!
//! let mut game = GameState::new(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::SoftDrop);
//!
//! assert_eq!(game.score(), 1); // Soft drop awards a point per row
//! assert_eq!(game.take_cues().as_slice(), &[SoundCue::Move]);
//! ```
//!
//! # Timing
//!
//! Gravity starts at one row per 1000 ms and speeds up by 50 ms per level, down to 50 ms.
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with elapsed time.

pub mod board;
pub mod collision;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod rotation;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collision::collides;
pub use game_state::{CueQueue, GameState, LockEvent, CUE_QUEUE_CAPACITY};
pub use pieces::{template, Piece, PieceTemplate, Shape, CATALOG};
pub use rng::{PieceGenerator, SimpleRng};
pub use rotation::{try_rotate, WALL_KICK_OFFSETS};
pub use scoring::{calculate_drop_score, calculate_score, ScoreResult};
pub use snapshot::{GameSnapshot, GameStatus};
