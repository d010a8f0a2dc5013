//! Move execution
//!
//! Applies a planned [`MoveOption`] to the board. The plan is re-checked
//! against the board before the first write, then writes happen in a fixed
//! order: the opposing chain from its far end, then the moving group with
//! every destination written before any vacated source is cleared.

use super::movegen::MoveOption;
use crate::board::{Board, Coord};
use crate::error::{AbaloneError, Result};

/// Opposing marbles displaced by a move
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushOutcome {
    /// Original cells of pushed marbles that stayed on the board
    pub relocated: Vec<Coord>,
    /// Original cells of marbles pushed off the board
    pub captured: Vec<Coord>,
}

/// Check that `option` still describes the board exactly
fn verify(board: &Board, option: &MoveOption) -> Result<()> {
    let stale = || AbaloneError::no_such_move(format!("{} move no longer matches the board", option.direction));
    let opponent = option.player.opponent();

    for &piece in &option.pieces {
        if board.get(piece)? != Some(option.player) {
            return Err(stale());
        }
    }
    for &pushed in &option.pushed {
        if board.get(pushed)? != Some(opponent) {
            return Err(stale());
        }
    }
    // Every cell entered by the group or the chain must be free, except
    // those being vacated in the same move
    let entered = option
        .entered_cells()
        .filter(|c| !option.pushed.contains(c))
        .chain(option.pushed.last().and_then(|last| last.neighbor(option.direction)));
    for cell in entered {
        if board.get(cell)?.is_some() {
            return Err(stale());
        }
    }
    Ok(())
}

/// Apply `option` to `board`. Fails without touching the board if the plan
/// does not match it.
pub fn apply(board: &mut Board, option: &MoveOption) -> Result<PushOutcome> {
    verify(board, option)?;
    let dir = option.direction;
    let mut outcome = PushOutcome::default();

    // Far end of the chain first so each marble steps into a free cell
    for &marble in option.pushed.iter().rev() {
        let owner = board.get(marble)?;
        match marble.neighbor(dir) {
            None => {
                board.remove(marble)?;
                outcome.captured.push(marble);
            }
            Some(next) => {
                board.set(next, owner)?;
                board.remove(marble)?;
                outcome.relocated.push(marble);
            }
        }
    }
    outcome.relocated.reverse();

    // pieces are ordered front first
    for &dest in &option.destinations {
        board.place(dest, option.player)?;
    }
    for &src in &option.pieces {
        if !option.destinations.contains(&src) {
            board.remove(src)?;
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Direction, Player};
    use crate::rules::{moves_for, Selection};

    fn c(col: i8, row: i8) -> Coord {
        Coord::new(col, row)
    }

    fn board_with(black: &[Coord], white: &[Coord]) -> Board {
        let mut board = Board::new();
        for &p in black {
            board.place(p, Player::Black).unwrap();
        }
        for &p in white {
            board.place(p, Player::White).unwrap();
        }
        board
    }

    fn planned(board: &Board, coords: &[Coord], dir: Direction) -> MoveOption {
        let sel = Selection::new(board, Player::Black, coords).unwrap();
        moves_for(board, &sel)
            .into_iter()
            .find(|m| m.direction == dir)
            .unwrap()
    }

    #[test]
    fn test_single_step() {
        let mut board = board_with(&[c(5, 5)], &[]);
        let mv = planned(&board, &[c(5, 5)], Direction::NW);
        let out = apply(&mut board, &mv).unwrap();
        assert_eq!(out, PushOutcome::default());
        assert_eq!(board.get(c(5, 6)), Ok(Some(Player::Black)));
        assert_eq!(board.get(c(5, 5)), Ok(None));
    }

    #[test]
    fn test_inline_push_relocates_chain() {
        let black = [c(2, 5), c(3, 5), c(4, 5)];
        let mut board = board_with(&black, &[c(5, 5), c(6, 5)]);
        let mv = planned(&board, &black, Direction::E);
        let out = apply(&mut board, &mv).unwrap();

        assert_eq!(out.relocated, vec![c(5, 5), c(6, 5)]);
        assert!(out.captured.is_empty());
        assert_eq!(board.get(c(2, 5)), Ok(None));
        for col in 3..=5 {
            assert_eq!(board.get(c(col, 5)), Ok(Some(Player::Black)));
        }
        assert_eq!(board.get(c(6, 5)), Ok(Some(Player::White)));
        assert_eq!(board.get(c(7, 5)), Ok(Some(Player::White)));
        assert_eq!(board.count(Player::White), 2);
    }

    #[test]
    fn test_inline_push_captures_at_edge() {
        let black = [c(5, 5), c(6, 5), c(7, 5)];
        let mut board = board_with(&black, &[c(8, 5), c(9, 5)]);
        let mv = planned(&board, &black, Direction::E);
        let out = apply(&mut board, &mv).unwrap();

        assert_eq!(out.captured, vec![c(9, 5)]);
        assert_eq!(out.relocated, vec![c(8, 5)]);
        assert_eq!(board.get(c(9, 5)), Ok(Some(Player::White)));
        assert_eq!(board.get(c(8, 5)), Ok(Some(Player::Black)));
        assert_eq!(board.count(Player::White), 1);
        assert_eq!(board.count(Player::Black), 3);
    }

    #[test]
    fn test_broadside_moves_every_marble() {
        let trio = [c(3, 3), c(4, 4), c(5, 5)];
        let mut board = board_with(&trio, &[]);
        let mv = planned(&board, &trio, Direction::E);
        apply(&mut board, &mv).unwrap();
        for p in trio {
            assert_eq!(board.get(p), Ok(None));
            assert_eq!(board.get(p.offset(Direction::E)), Ok(Some(Player::Black)));
        }
    }

    #[test]
    fn test_backward_inline_keeps_overlap() {
        let pair = [c(4, 5), c(5, 5)];
        let mut board = board_with(&pair, &[]);
        let mv = planned(&board, &pair, Direction::W);
        apply(&mut board, &mv).unwrap();
        assert_eq!(board.get(c(3, 5)), Ok(Some(Player::Black)));
        assert_eq!(board.get(c(4, 5)), Ok(Some(Player::Black)));
        assert_eq!(board.get(c(5, 5)), Ok(None));
    }

    #[test]
    fn test_stale_plan_rejected_without_mutation() {
        let pair = [c(3, 3), c(4, 3)];
        let mut board = board_with(&pair, &[]);
        let mv = planned(&board, &pair, Direction::NW);
        board.place(c(3, 4), Player::White).unwrap();
        let before = board;
        assert!(matches!(apply(&mut board, &mv), Err(AbaloneError::NoSuchMove { .. })));
        assert_eq!(board, before);
    }
}
