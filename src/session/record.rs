//! Executed-move records

use std::fmt;
use std::time::Duration;

use crate::board::{Coord, Direction, Player};
use crate::notation::format_move_text;
use crate::rules::MoveKind;

/// Immutable description of one committed move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    /// 1-based position in the game
    pub move_number: usize,
    pub player: Player,
    pub opponent: Player,
    /// Moving marbles, front first
    pub from: Vec<Coord>,
    /// `from[i]` landed on `to[i]`
    pub to: Vec<Coord>,
    pub direction: Direction,
    pub kind: MoveKind,
    /// Opposing marbles pushed one cell and still on the board (original cells)
    pub pushed: Vec<Coord>,
    /// Opposing marbles pushed off the board (original cells)
    pub captured: Vec<Coord>,
    /// Time the mover spent deciding
    pub elapsed: Duration,
}

impl MoveRecord {
    /// The move in engine move-text form
    pub fn move_text(&self) -> String {
        format_move_text(self.player, &self.from, self.kind, self.direction)
    }

    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.move_number, self.move_text())?;
        if !self.pushed.is_empty() {
            write!(f, " pushes {}", self.pushed.len())?;
        }
        for (i, cell) in self.captured.iter().enumerate() {
            let sep = if i == 0 { " captures " } else { ", " };
            write!(f, "{sep}{cell}")?;
        }
        write!(f, " ({:.1}s)", self.elapsed.as_secs_f32())
    }
}
