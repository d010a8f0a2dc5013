//! Selection validation
//!
//! A selection is 1-3 marbles of the side to move lying on one axis with no
//! gaps. Validity never depends on the order the marbles were picked in:
//! coordinates are sorted by `(col, row)` before the collinearity check, which
//! leaves every valid line stepping by E, NE or NW.

use crate::board::{Board, Coord, Direction, Player};
use crate::error::{AbaloneError, Result};

/// Largest group that may move together
pub const MAX_SELECTION: usize = 3;

/// A validated, non-empty group of marbles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Sorted along `axis` (first to last)
    pieces: Vec<Coord>,
    /// Alignment of a 2-3 piece line; `None` for a single marble
    axis: Option<Direction>,
    player: Player,
}

impl Selection {
    /// Validate `coords` for `player` and build the selection
    pub fn new(board: &Board, player: Player, coords: &[Coord]) -> Result<Selection> {
        if coords.is_empty() {
            return Err(AbaloneError::selection("nothing selected"));
        }
        if coords.len() > MAX_SELECTION {
            return Err(AbaloneError::selection(format!(
                "{} marbles selected, at most {} may move",
                coords.len(),
                MAX_SELECTION
            )));
        }

        for &coord in coords {
            match board.get(coord)? {
                Some(owner) if owner == player => {}
                _ => {
                    return Err(AbaloneError::selection(format!(
                        "{} is not a {} marble",
                        coord, player
                    )))
                }
            }
        }

        let mut pieces = coords.to_vec();
        pieces.sort_by_key(|c| (c.col, c.row));
        pieces.dedup();
        if pieces.len() != coords.len() {
            return Err(AbaloneError::selection("a marble was selected twice"));
        }

        let axis = if pieces.len() == 1 {
            None
        } else {
            let step = Direction::between(pieces[0], pieces[1]).ok_or_else(|| {
                AbaloneError::selection(format!("{} and {} are not adjacent", pieces[0], pieces[1]))
            })?;
            for pair in pieces.windows(2).skip(1) {
                if Direction::between(pair[0], pair[1]) != Some(step) {
                    return Err(AbaloneError::selection(
                        "marbles are not in a contiguous straight line",
                    ));
                }
            }
            Some(step)
        };

        Ok(Selection { pieces, axis, player })
    }

    #[inline]
    pub fn pieces(&self) -> &[Coord] {
        &self.pieces
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    #[inline]
    pub fn axis(&self) -> Option<Direction> {
        self.axis
    }

    #[inline]
    pub fn player(&self) -> Player {
        self.player
    }

    #[inline]
    pub fn contains(&self, coord: Coord) -> bool {
        self.pieces.contains(&coord)
    }

    /// Moving along the selection's own axis (either way)
    #[inline]
    pub fn is_inline(&self, dir: Direction) -> bool {
        self.axis.is_some_and(|axis| axis.is_colinear(dir))
    }

    /// The marble furthest along `dir`
    pub fn front(&self, dir: Direction) -> Coord {
        // pieces is never empty once constructed
        *self
            .pieces
            .iter()
            .max_by_key(|c| c.project(dir))
            .unwrap_or(&self.pieces[0])
    }
}

/// True if `coords` would make a legal selection for `player`.
/// The empty set is valid (nothing selected).
pub fn validate(board: &Board, player: Player, coords: &[Coord]) -> bool {
    coords.is_empty() || Selection::new(board, player, coords).is_ok()
}
