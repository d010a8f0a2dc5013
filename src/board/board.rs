//! Board state: occupancy of every cell

use super::bitboard::Bitboard;
use super::layout::Layout;
use super::{Coord, Player, CELLS};
use crate::error::{AbaloneError, Result};

/// Occupancy of one cell. The owner is present iff the cell is occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub owner: Option<Player>,
}

impl Cell {
    #[inline]
    pub fn is_occupied(self) -> bool {
        self.owner.is_some()
    }
}

/// Game board. The cell set is fixed; only occupancy changes, and a side's
/// piece count never grows during play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Board {
    /// Black marbles bitboard
    pub black: Bitboard,
    /// White marbles bitboard
    pub white: Bitboard,
}

#[inline]
fn cell_index(coord: Coord) -> Result<usize> {
    coord.index().ok_or(AbaloneError::InvalidCoordinate {
        col: coord.col,
        row: coord.row,
    })
}

impl Board {
    pub fn new() -> Self {
        Self {
            black: Bitboard::new(),
            white: Bitboard::new(),
        }
    }

    /// Board set up with a starting layout, `host` seated at the bottom
    pub fn with_layout(layout: Layout, host: Player) -> Self {
        let mut board = Self::new();
        board.apply_layout(layout, host);
        board
    }

    /// Owner of the marble at `coord`, `None` if the cell is empty
    #[inline]
    pub fn get(&self, coord: Coord) -> Result<Option<Player>> {
        let idx = cell_index(coord)?;
        Ok(self.owner_at(idx))
    }

    #[inline]
    pub fn cell(&self, coord: Coord) -> Result<Cell> {
        Ok(Cell { owner: self.get(coord)? })
    }

    #[inline]
    pub fn is_empty(&self, coord: Coord) -> Result<bool> {
        Ok(self.get(coord)?.is_none())
    }

    /// Lookup that treats off-board coordinates as empty. Only for callers
    /// that already checked membership.
    #[inline]
    pub(crate) fn occupant(&self, coord: Coord) -> Option<Player> {
        coord.index().and_then(|idx| self.owner_at(idx))
    }

    #[inline]
    fn owner_at(&self, idx: usize) -> Option<Player> {
        if self.black.get(idx) {
            Some(Player::Black)
        } else if self.white.get(idx) {
            Some(Player::White)
        } else {
            None
        }
    }

    /// Put a marble on a cell, replacing whatever was there
    #[inline]
    pub fn place(&mut self, coord: Coord, player: Player) -> Result<()> {
        let idx = cell_index(coord)?;
        match player {
            Player::Black => {
                self.white.clear(idx);
                self.black.set(idx);
            }
            Player::White => {
                self.black.clear(idx);
                self.white.set(idx);
            }
        }
        Ok(())
    }

    /// Empty a cell
    #[inline]
    pub fn remove(&mut self, coord: Coord) -> Result<()> {
        let idx = cell_index(coord)?;
        self.black.clear(idx);
        self.white.clear(idx);
        Ok(())
    }

    /// Write `owner` (or emptiness) to a cell
    #[inline]
    pub fn set(&mut self, coord: Coord, owner: Option<Player>) -> Result<()> {
        match owner {
            Some(player) => self.place(coord, player),
            None => self.remove(coord),
        }
    }

    /// Get bitboard for a color
    #[inline]
    pub fn pieces(&self, player: Player) -> &Bitboard {
        match player {
            Player::Black => &self.black,
            Player::White => &self.white,
        }
    }

    /// Marbles left for a side
    #[inline]
    pub fn count(&self, player: Player) -> u32 {
        self.pieces(player).count()
    }

    /// Total marbles on board
    #[inline]
    pub fn piece_count(&self) -> u32 {
        self.black.count() + self.white.count()
    }

    /// Every occupied cell with its owner, bottom row first then left to right
    pub fn occupied(&self) -> impl Iterator<Item = (Coord, Player)> + '_ {
        CELLS
            .iter()
            .enumerate()
            .filter_map(|(idx, &coord)| self.owner_at(idx).map(|owner| (coord, owner)))
    }

    /// Remove every marble
    pub fn clear(&mut self) {
        self.black = Bitboard::new();
        self.white = Bitboard::new();
    }

    /// Clear the board, then place both sides per the layout table.
    /// `Layout::Empty` leaves the board empty.
    pub fn apply_layout(&mut self, layout: Layout, host: Player) {
        self.clear();
        let (host_cells, opponent_cells) = layout.cells();
        for &(col, row) in opponent_cells {
            self.fill(Coord::new(col, row), host.opponent());
        }
        for &(col, row) in host_cells {
            self.fill(Coord::new(col, row), host);
        }
    }

    #[inline]
    fn fill(&mut self, coord: Coord, player: Player) {
        if let Some(idx) = coord.index() {
            match player {
                Player::Black => self.black.set(idx),
                Player::White => self.white.set(idx),
            }
        }
    }
}
