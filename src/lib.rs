//! Abalone rules engine
//!
//! Rules engine for Abalone, the two-player push-capture game on a 61-cell
//! hexagonal board:
//! - 14 marbles per side, three built-in starting layouts
//! - Groups of 1-3 marbles in a straight line move one cell per turn
//! - Inline groups push a strictly smaller opposing chain
//! - Pushing a marble off the board scores a capture; 6 captures win
//!
//! # Architecture
//!
//! - [`board`]: Coordinates, bitboards and starting layouts
//! - [`rules`]: Selection validation, move generation and move execution
//! - [`session`]: The [`GameSession`] aggregate with scores, clocks and undo
//! - [`notation`]: Wire board format and engine move text
//! - [`engine`]: Move-search boundary and a random legal-move agent
//! - [`config`]: Match configuration
//! - [`ui`]: egui desktop front-end
//!
//! # Quick Start
//!
//! ```
//! use abalone::{Coord, Direction, GameConfig, GameSession, Player};
//! use std::time::Duration;
//!
//! let mut session = GameSession::new(GameConfig::default());
//!
//! // Black selects a column of three and moves it up-left
//! let line = [Coord::new(3, 1), Coord::new(3, 2), Coord::new(3, 3)];
//! session.set_selection(&line).unwrap();
//! let record = session.confirm_direction(Direction::NW, Duration::from_secs(3)).unwrap();
//! println!("{record}");
//!
//! assert_eq!(session.current(), Player::White);
//! assert!(session.undo());
//! assert_eq!(session.current(), Player::Black);
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod notation;
pub mod rules;
pub mod session;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Coord, Direction, Layout, Player};
pub use config::{GameConfig, MatchType};
pub use engine::{MoveSearch, RandomMover, SearchReply};
pub use error::{AbaloneError, Result};
pub use rules::{MoveKind, MoveOption, Selection};
pub use session::{GameSession, MoveRecord, Outcome, SessionEvent, WIN_SCORE};
