//! Game loop logic and state management.
//!
//! This module drives the data structures of [`crate::core`] through time:
//!
//! - [`GameSession`] - Grid, falling piece, score and the timing state machine
//! - [`GameConfig`] - Gravity, lock and scoring constants
//! - [`GameStats`] - Score and line-clear counters for the current game
//! - [`PieceGenerator`] - Seeded uniform piece selection
//! - [`FrameInput`], [`FrameTime`], [`FrameClock`] - Per-frame inputs
//!
//! # Frame Flow
//!
//! Each call to [`GameSession::update`] runs one frame:
//!
//! 1. Apply input events (move, rotate, soft-drop press/release, quit)
//! 2. Fire a charged hard drop if the soft-drop key has been held long enough
//! 3. Discard the grace period if the piece can fall again, then apply
//!    gravity; a blocked fall starts the grace period
//! 4. Lock the piece once the grace period has elapsed
//!
//! Locking merges the piece, clears lines, scores them and spawns the next
//! piece. If that piece does not fit, the grid and score are reset.
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{FrameInput, FrameTime, GameConfig, GameSession, InputEvent, PieceSeed};
//!
//! let mut session = GameSession::new(GameConfig::default(), PieceSeed::from(7));
//!
//! let input = FrameInput::from_events([InputEvent::MoveLeft]);
//! let report = session.update(&input, FrameTime::new(16, 16));
//! assert!(!report.quit);
//!
//! let report = session.update(&FrameInput::from_events([InputEvent::Quit]), FrameTime::new(32, 16));
//! assert!(report.quit);
//! ```

pub use self::{config::*, game_session::*, game_stats::*, input::*, piece_generator::*};

mod config;
mod game_session;
mod game_stats;
mod input;
mod piece_generator;
