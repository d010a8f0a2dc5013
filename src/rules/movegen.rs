//! Move generation for a selection
//!
//! Single marbles step into any empty neighbour. Lines of 2-3 either move
//! broadside (every destination must be empty, no pushing) or inline, where
//! the front marble may push a strictly smaller opposing chain forward, or
//! off the board.

use super::selection::Selection;
use crate::board::{Board, Coord, Direction, Player};
use std::fmt;

/// How a group travels relative to its own axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Along the axis (single marbles always count as inline)
    Inline,
    /// Off the axis, never pushes
    Broadside,
}

impl MoveKind {
    /// Move-text tag
    pub fn tag(self) -> char {
        match self {
            MoveKind::Inline => 'i',
            MoveKind::Broadside => 's',
        }
    }
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveKind::Inline => f.write_str("inline"),
            MoveKind::Broadside => f.write_str("broadside"),
        }
    }
}

/// A legal move for one selection, fully planned against the current board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOption {
    pub player: Player,
    pub direction: Direction,
    pub kind: MoveKind,
    /// Moving marbles, front (largest projection on `direction`) first
    pub pieces: Vec<Coord>,
    /// `pieces[i]` lands on `destinations[i]`
    pub destinations: Vec<Coord>,
    /// Opposing chain being pushed, nearest to the mover first
    pub pushed: Vec<Coord>,
}

impl MoveOption {
    /// Destinations that are not currently part of the moving group
    pub fn entered_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.destinations
            .iter()
            .copied()
            .filter(|d| !self.pieces.contains(d))
    }

    /// True if the last pushed marble leaves the board
    pub fn is_capture(&self) -> bool {
        self.pushed
            .last()
            .is_some_and(|last| last.neighbor(self.direction).is_none())
    }
}

fn plan(selection: &Selection, direction: Direction, kind: MoveKind, pushed: Vec<Coord>) -> MoveOption {
    let mut pieces = selection.pieces().to_vec();
    pieces.sort_by_key(|c| std::cmp::Reverse(c.project(direction)));
    let destinations = pieces.iter().map(|c| c.offset(direction)).collect();
    MoveOption {
        player: selection.player(),
        direction,
        kind,
        pieces,
        destinations,
        pushed,
    }
}

/// Every legal move for `selection`, in `Direction::ALL` order
pub fn moves_for(board: &Board, selection: &Selection) -> Vec<MoveOption> {
    Direction::ALL
        .into_iter()
        .filter_map(|dir| move_in_direction(board, selection, dir))
        .collect()
}

/// The move of `selection` towards `dir`, if legal
pub fn move_in_direction(board: &Board, selection: &Selection, dir: Direction) -> Option<MoveOption> {
    if selection.len() == 1 {
        let target = selection.pieces()[0].neighbor(dir)?;
        return board
            .occupant(target)
            .is_none()
            .then(|| plan(selection, dir, MoveKind::Inline, Vec::new()));
    }

    if selection.is_inline(dir) {
        inline_move(board, selection, dir)
    } else {
        broadside_move(board, selection, dir)
    }
}

fn broadside_move(board: &Board, selection: &Selection, dir: Direction) -> Option<MoveOption> {
    for &piece in selection.pieces() {
        let target = piece.neighbor(dir)?;
        if board.occupant(target).is_some() {
            return None;
        }
    }
    Some(plan(selection, dir, MoveKind::Broadside, Vec::new()))
}

fn inline_move(board: &Board, selection: &Selection, dir: Direction) -> Option<MoveOption> {
    let player = selection.player();
    // Stepping the own group off the edge is never allowed
    let ahead = selection.front(dir).neighbor(dir)?;

    match board.occupant(ahead) {
        None => Some(plan(selection, dir, MoveKind::Inline, Vec::new())),
        Some(owner) if owner == player => None,
        Some(_) => {
            let chain = opposing_chain(board, ahead, dir, player.opponent());
            if chain.len() >= selection.len() {
                return None;
            }
            let last = *chain.last()?;
            match last.neighbor(dir) {
                // off the board: capture
                None => Some(plan(selection, dir, MoveKind::Inline, chain)),
                Some(beyond) => board
                    .occupant(beyond)
                    .is_none()
                    .then(|| plan(selection, dir, MoveKind::Inline, chain)),
            }
        }
    }
}

/// Contiguous run of `owner` marbles starting at `start` and heading along `dir`
fn opposing_chain(board: &Board, start: Coord, dir: Direction, owner: Player) -> Vec<Coord> {
    let mut chain = Vec::new();
    let mut cursor = Some(start);
    while let Some(coord) = cursor {
        if board.occupant(coord) != Some(owner) {
            break;
        }
        chain.push(coord);
        cursor = coord.neighbor(dir);
    }
    chain
}

/// Every legal move for `player`: singles first, then each 2- and 3-marble
/// line once
pub fn generate_moves(board: &Board, player: Player) -> Vec<MoveOption> {
    let mut moves = Vec::new();
    let own: Vec<Coord> = board.pieces(player).iter_ones().collect();

    for &piece in &own {
        if let Ok(sel) = Selection::new(board, player, &[piece]) {
            moves.extend(moves_for(board, &sel));
        }
    }

    // Growing only along E, NE and NW visits every line from its lowest end
    for &piece in &own {
        for axis in [Direction::E, Direction::NE, Direction::NW] {
            let mut group = vec![piece];
            let mut cursor = piece;
            while group.len() < super::selection::MAX_SELECTION {
                match cursor.neighbor(axis) {
                    Some(next) if board.occupant(next) == Some(player) => {
                        group.push(next);
                        cursor = next;
                        if let Ok(sel) = Selection::new(board, player, &group) {
                            moves.extend(moves_for(board, &sel));
                        }
                    }
                    _ => break,
                }
            }
        }
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Layout;

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

    fn select(board: &Board, coords: &[Coord]) -> Selection {
        Selection::new(board, Player::Black, coords).unwrap()
    }

    fn option(board: &Board, coords: &[Coord], dir: Direction) -> Option<MoveOption> {
        moves_for(board, &select(board, coords))
            .into_iter()
            .find(|m| m.direction == dir)
    }

    #[test]
    fn test_single_moves_into_empty_neighbors() {
        let board = board_with(&[c(5, 5)], &[c(6, 5)]);
        let moves = moves_for(&board, &select(&board, &[c(5, 5)]));
        assert_eq!(moves.len(), 5);
        assert!(moves.iter().all(|m| m.direction != Direction::E));
        assert!(moves.iter().all(|m| m.kind == MoveKind::Inline && m.pushed.is_empty()));
    }

    #[test]
    fn test_single_at_corner() {
        let board = board_with(&[c(1, 1)], &[]);
        let dirs: Vec<_> = moves_for(&board, &select(&board, &[c(1, 1)]))
            .into_iter()
            .map(|m| m.direction)
            .collect();
        assert_eq!(dirs, vec![Direction::E, Direction::NE, Direction::NW]);
    }

    #[test]
    fn test_inline_simple_advance() {
        let board = board_with(&[c(3, 5), c(4, 5)], &[]);
        let mv = option(&board, &[c(3, 5), c(4, 5)], Direction::E).unwrap();
        assert_eq!(mv.kind, MoveKind::Inline);
        assert_eq!(mv.pieces, vec![c(4, 5), c(3, 5)]);
        assert_eq!(mv.destinations, vec![c(5, 5), c(4, 5)]);
        assert_eq!(mv.entered_cells().collect::<Vec<_>>(), vec![c(5, 5)]);
    }

    #[test]
    fn test_inline_off_edge_is_illegal() {
        let board = board_with(&[c(1, 5), c(2, 5)], &[]);
        assert!(option(&board, &[c(1, 5), c(2, 5)], Direction::W).is_none());
    }

    #[test]
    fn test_inline_blocked_by_own() {
        let board = board_with(&[c(3, 5), c(4, 5), c(5, 5)], &[]);
        assert!(option(&board, &[c(3, 5), c(4, 5)], Direction::E).is_none());
    }

    #[test]
    fn test_three_push_two_but_not_three() {
        let black = [c(2, 5), c(3, 5), c(4, 5)];
        let board = board_with(&black, &[c(5, 5), c(6, 5)]);
        let mv = option(&board, &black, Direction::E).unwrap();
        assert_eq!(mv.pushed, vec![c(5, 5), c(6, 5)]);
        assert!(!mv.is_capture());

        let board = board_with(&black, &[c(5, 5), c(6, 5), c(7, 5)]);
        assert!(option(&board, &black, Direction::E).is_none());
    }

    #[test]
    fn test_two_push_one_but_not_two() {
        let black = [c(3, 5), c(4, 5)];
        let board = board_with(&black, &[c(5, 5)]);
        let mv = option(&board, &black, Direction::E).unwrap();
        assert_eq!(mv.pushed, vec![c(5, 5)]);

        let board = board_with(&black, &[c(5, 5), c(6, 5)]);
        assert!(option(&board, &black, Direction::E).is_none());
    }

    #[test]
    fn test_push_blocked_behind_chain() {
        let black = [c(3, 5), c(4, 5), c(5, 5)];
        // own marble behind the opposing chain
        let board = board_with(&[black[0], black[1], black[2], c(7, 5)], &[c(6, 5)]);
        assert!(option(&board, &black, Direction::E).is_none());

        // opponent marble separated by nothing: chain of 3 would form
        let board = board_with(&black, &[c(6, 5), c(7, 5), c(8, 5)]);
        assert!(option(&board, &black, Direction::E).is_none());
    }

    #[test]
    fn test_push_off_edge_is_capture() {
        let black = [c(6, 5), c(7, 5), c(8, 5)];
        let board = board_with(&black, &[c(9, 5)]);
        let mv = option(&board, &black, Direction::E).unwrap();
        assert_eq!(mv.pushed, vec![c(9, 5)]);
        assert!(mv.is_capture());
    }

    #[test]
    fn test_single_cannot_push() {
        let board = board_with(&[c(4, 5)], &[c(5, 5)]);
        assert!(option(&board, &[c(4, 5)], Direction::E).is_none());
    }

    #[test]
    fn test_broadside_needs_all_empty() {
        let pair = [c(3, 3), c(4, 3)];
        let board = board_with(&pair, &[]);
        let mv = option(&board, &pair, Direction::NW).unwrap();
        assert_eq!(mv.kind, MoveKind::Broadside);
        assert_eq!(mv.destinations.len(), 2);
        assert!(mv.destinations.contains(&c(3, 4)) && mv.destinations.contains(&c(4, 4)));

        let board = board_with(&pair, &[c(4, 4)]);
        assert!(option(&board, &pair, Direction::NW).is_none());
        let board = board_with(&[pair[0], pair[1], c(3, 4)], &[]);
        assert!(option(&board, &pair, Direction::NW).is_none());
    }

    #[test]
    fn test_broadside_off_edge_is_illegal() {
        let pair = [c(1, 1), c(2, 1)];
        let board = board_with(&pair, &[]);
        assert!(option(&board, &pair, Direction::SE).is_none());
    }

    #[test]
    fn test_standard_opening_move_count() {
        let board = Board::with_layout(Layout::Standard, Player::Black);
        let moves = generate_moves(&board, Player::Black);
        // well-known count for the standard opening
        assert_eq!(moves.len(), 44);
        assert!(moves.iter().all(|m| m.player == Player::Black));
    }

    #[test]
    fn test_generated_moves_unique() {
        let board = Board::with_layout(Layout::BelgianDaisy, Player::Black);
        let moves = generate_moves(&board, Player::White);
        for (i, a) in moves.iter().enumerate() {
            for b in &moves[i + 1..] {
                let mut pa = a.pieces.clone();
                let mut pb = b.pieces.clone();
                pa.sort();
                pb.sort();
                assert!(!(pa == pb && a.direction == b.direction));
            }
        }
    }
}
