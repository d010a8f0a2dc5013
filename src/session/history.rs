//! Undo stack
//!
//! Each entry is a full copy of the session state taken just before a move,
//! paired with the record of that move once it has been committed. Undo
//! restores the copy wholesale instead of inverting the move.

use std::time::Duration;

use super::record::MoveRecord;
use super::PlayerStats;
use crate::board::{Board, Player};

/// Session state captured before a move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub board: Board,
    pub current: Player,
    pub stats: [PlayerStats; 2],
    pub turn_clock: Duration,
}

#[derive(Debug, Clone)]
struct Entry {
    snapshot: Snapshot,
    record: Option<MoveRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<Entry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push the pre-move state. Must be followed by [`History::push_record`]
    /// or [`History::discard_last`].
    pub fn record_before_move(&mut self, snapshot: Snapshot) {
        self.entries.push(Entry {
            snapshot,
            record: None,
        });
    }

    /// Attach the committed move to the newest snapshot
    pub fn push_record(&mut self, record: MoveRecord) {
        if let Some(entry) = self.entries.last_mut() {
            entry.record = Some(record);
        }
    }

    /// Drop the newest snapshot of a move that failed to commit
    pub fn discard_last(&mut self) -> Option<Snapshot> {
        self.entries.pop().map(|entry| entry.snapshot)
    }

    /// Pop the newest entry; `None` on an empty stack
    pub fn undo(&mut self) -> Option<(Snapshot, Option<MoveRecord>)> {
        self.entries.pop().map(|entry| (entry.snapshot, entry.record))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Committed moves, oldest first
    pub fn records(&self) -> impl Iterator<Item = &MoveRecord> + '_ {
        self.entries.iter().filter_map(|entry| entry.record.as_ref())
    }

    pub fn last_record(&self) -> Option<&MoveRecord> {
        self.entries.last().and_then(|entry| entry.record.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Coord, Direction, Layout};
    use crate::rules::MoveKind;

    fn snapshot(current: Player) -> Snapshot {
        Snapshot {
            board: Board::with_layout(Layout::Standard, Player::Black),
            current,
            stats: Default::default(),
            turn_clock: Duration::from_secs(30),
        }
    }

    fn record(n: usize) -> MoveRecord {
        MoveRecord {
            move_number: n,
            player: Player::Black,
            opponent: Player::White,
            from: vec![Coord::new(3, 3)],
            to: vec![Coord::new(3, 4)],
            direction: Direction::NW,
            kind: MoveKind::Inline,
            pushed: Vec::new(),
            captured: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    #[test]
    fn test_empty_undo() {
        let mut history = History::new();
        assert!(history.undo().is_none());
        assert!(history.is_empty());
    }

    #[test]
    fn test_lifo_order() {
        let mut history = History::new();
        history.record_before_move(snapshot(Player::Black));
        history.push_record(record(1));
        history.record_before_move(snapshot(Player::White));
        history.push_record(record(2));
        assert_eq!(history.records().count(), 2);
        assert_eq!(history.last_record().map(|r| r.move_number), Some(2));

        let (snap, rec) = history.undo().unwrap();
        assert_eq!(snap.current, Player::White);
        assert_eq!(rec.map(|r| r.move_number), Some(2));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_discard_uncommitted() {
        let mut history = History::new();
        history.record_before_move(snapshot(Player::Black));
        assert_eq!(history.records().count(), 0);
        assert_eq!(history.discard_last().map(|s| s.current), Some(Player::Black));
        assert!(history.is_empty());
    }
}
