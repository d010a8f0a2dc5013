//! Board representation for Abalone

pub mod bitboard;
pub mod board;
pub mod coord;
pub mod layout;


use serde::{Deserialize, Serialize};
use std::fmt;

// Re-exports
pub use bitboard::Bitboard;
pub use board::{Board, Cell};
pub use coord::{Coord, Direction, CELLS};
pub use layout::Layout;

/// Number of playable cells on the hexagon
pub const NUM_CELLS: usize = 61;

/// Marbles each side starts with in every built-in layout
pub const PIECES_PER_SIDE: u32 = 14;

/// The two sides. Black always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub const BOTH: [Player; 2] = [Player::Black, Player::White];

    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Single-character tag used by the wire format and move text
    #[inline]
    pub fn tag(self) -> char {
        match self {
            Player::Black => 'b',
            Player::White => 'w',
        }
    }

    /// Accepts `b`/`w` and `black`/`white`, any case
    pub fn from_tag(tag: &str) -> Option<Player> {
        match tag.to_ascii_lowercase().as_str() {
            "b" | "black" => Some(Player::Black),
            "w" | "white" => Some(Player::White),
            _ => None,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::Black => 0,
            Player::White => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Player::Black => "Black",
            Player::White => "White",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
