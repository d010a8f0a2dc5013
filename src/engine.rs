//! Move-search boundary
//!
//! The session never searches for moves itself. A search implementation
//! receives the wire board (see [`crate::notation`]) and answers with move
//! text, which the caller feeds back through
//! [`GameSession::apply_move_text`](crate::GameSession::apply_move_text).
//! Searches block, so interactive callers run them on a worker thread.
//!
//! # Example
//!
//! ```
//! use abalone::{GameConfig, GameSession, MoveSearch, RandomMover};
//! use std::time::Duration;
//!
//! let mut session = GameSession::new(GameConfig::default());
//! let mut engine = RandomMover::seeded(7);
//!
//! let wire = session.wire_string().unwrap();
//! let reply = engine.search(&wire).unwrap();
//! session.apply_move_text(&reply, Duration::ZERO).unwrap();
//! assert_eq!(session.move_log().count(), 1);
//! ```

use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use tracing::debug;

use crate::board::{Board, Player};
use crate::error::{AbaloneError, Result};
use crate::notation::{format_move_text, parse_wire_board};
use crate::rules::{generate_moves, MoveOption};

/// An opaque move searcher: wire board in, move text out.
pub trait MoveSearch: Send {
    /// Short name for logs and the UI
    fn name(&self) -> &str;

    /// Choose a move for the side to move in `wire`
    fn search(&mut self, wire: &str) -> Result<String>;
}

/// Result of a timed search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReply {
    /// Move text as returned by the searcher
    pub move_text: String,
    /// Wall time of the search in milliseconds
    pub time_ms: u64,
}

/// Run `engine` on `wire` and measure how long it took.
pub fn timed_search(engine: &mut dyn MoveSearch, wire: &str) -> Result<SearchReply> {
    let start = Instant::now();
    let move_text = engine.search(wire)?;
    let time_ms = start.elapsed().as_millis() as u64;
    debug!("{} answered {:?} in {}ms", engine.name(), move_text, time_ms);
    Ok(SearchReply { move_text, time_ms })
}

/// Plays a uniformly random legal move.
///
/// Stands in for a real search engine in the desktop front-end and gives
/// tests a reproducible opponent when seeded.
pub struct RandomMover {
    rng: StdRng,
}

impl RandomMover {
    /// Seeded from the operating system
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic sequence of choices for a given seed
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Pick one legal move of `player`, `None` if there are none
    pub fn choose_move(&mut self, board: &Board, player: Player) -> Option<MoveOption> {
        let moves = generate_moves(board, player);
        moves.choose(&mut self.rng).cloned()
    }
}

impl Default for RandomMover {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSearch for RandomMover {
    fn name(&self) -> &str {
        "random"
    }

    fn search(&mut self, wire: &str) -> Result<String> {
        let (board, player) = parse_wire_board(wire)?;
        let option = self.choose_move(&board, player).ok_or_else(|| AbaloneError::Engine {
            message: format!("{player} has no legal move"),
        })?;
        Ok(format_move_text(player, &option.pieces, option.kind, option.direction))
    }
}
