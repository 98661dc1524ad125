//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules and state transitions of a falling-block
//! puzzle. It does no rendering, input handling or I/O beyond loading a
//! config file, so it runs the same in a terminal, a GUI or headless.
//!
//! - **Deterministic**: the same seed and the same calls produce the same game
//! - **Persistent**: every operation returns a new [`Game`] and leaves its
//!   input untouched
//! - **Clock-driven**: gravity and lock delay depend only on the logical clock
//!   passed to [`Game::tick_clock_to`]
//!
//! # Module Structure
//!
//! - [`config`]: injected tuning (dimensions, walls, shapes, speeds, scores)
//! - [`board`]: the settled grid, row clearing and collapsing
//! - [`pieces`]: piece geometry and quarter-turn rotation
//! - [`placement`]: collision, wall kicks and landing location
//! - [`rng`]: bag randomizer and the upcoming-shape queue
//! - [`scoring`]: line-clear points, levels and level-scaled speeds
//! - [`gravity`]: gravity steps and the lock-delay state machine
//! - [`game`]: the game-state reducer
//! - [`display`]: overlay and preview boards for a renderer
//! - [`highscore`]: high-score records built from finished games
//!
//! # Example
//!
//! ```
//! use blockfall_core::types::{GameAction, ShiftDirection};
//! use blockfall_core::{Config, Game};
//!
//! let game = Game::new(Config::default(), 12345).start();
//! let game = game
//!     .shift(ShiftDirection::Right)
//!     .apply(GameAction::RotateCw)
//!     .hard_drop();
//!
//! assert_eq!(game.board().block_count(), 4);
//! assert_eq!(game.blocks_spawned(), 2);
//!
//! // One second of logical time at the default 10ms tick.
//! let mut game = game;
//! for _ in 0..100 {
//!     game = game.tick_clock();
//! }
//! assert_eq!(game.clock_ms(), 1000);
//! ```

pub mod board;
pub mod config;
pub mod display;
pub mod game;
pub mod gravity;
pub mod highscore;
pub mod pieces;
pub mod placement;
pub mod rng;
pub mod scoring;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::{Config, ConfigError, PollRates, ScoreMultiplier, WallMode, CONFIG_ENV_VAR};
pub use display::{board_with_overlay, preview_board};
pub use game::{AllowedInputs, FallingBlock, Game, StartId};
pub use gravity::{Contact, LockDelay};
pub use highscore::{
    default_high_scores, sort_high_scores, HighScore, HighScoreError, Platform,
};
pub use pieces::{Piece, PieceBody};
pub use placement::{intersects, landing_origin, try_rotate};
pub use rng::{draw_bag, ShapeQueue, SimpleRng};
pub use scoring::LevelTuning;
