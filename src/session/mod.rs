//! Game session: the board, the side to move, scores, clocks, the current
//! selection and the undo history as one value
//!
//! All mutation goes through the session. Every fallible operation plans in
//! full before touching state, so an `Err` leaves the session unchanged.

pub mod history;
pub mod record;

use std::time::Duration;

use tracing::{debug, info, warn};

pub use history::{History, Snapshot};
pub use record::MoveRecord;

use crate::board::{Board, Coord, Direction, Player};
use crate::config::GameConfig;
use crate::error::{AbaloneError, Result};
use crate::notation::{parse_move_text, to_wire_string};
use crate::rules::{self, MoveOption, Selection};

/// Tie-break for a clicked cell entered by more than one move
pub const CONFIRM_ORDER: [Direction; 6] = [
    Direction::E,
    Direction::W,
    Direction::NE,
    Direction::NW,
    Direction::SE,
    Direction::SW,
];

/// Captures needed to win
pub const WIN_SCORE: u32 = 6;

/// Per-player running totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerStats {
    /// Opposing marbles pushed off the board
    pub score: u32,
    pub moves_made: u32,
    /// Total decision time over all moves
    pub time_spent: Duration,
}

/// Notifications for the front-end, drained with [`GameSession::take_events`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A move was committed; carries its human-readable description
    MoveCompleted(String),
    /// The side to move is computer-controlled; carries the wire board
    EngineTurn(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinReason {
    Captures,
    MoveLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win { winner: Player, reason: WinReason },
    Draw,
}

/// What a board click did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickResult {
    /// The selection changed
    Selected,
    /// A highlighted destination was clicked and the move committed
    Moved(MoveRecord),
    /// The selection was dropped
    Cleared,
}

pub struct GameSession {
    config: GameConfig,
    board: Board,
    current: Player,
    stats: [PlayerStats; 2],
    /// Clock allotment of the side to move
    turn_clock: Duration,
    selection: Vec<Coord>,
    /// Moves of the current selection, in direction order
    options: Vec<MoveOption>,
    history: History,
    events: Vec<SessionEvent>,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Self {
        let board = Board::with_layout(config.layout, config.host_color);
        Self::with_board(config, board, Player::Black)
    }

    /// Start from an arbitrary position
    pub fn with_board(config: GameConfig, board: Board, to_move: Player) -> Self {
        let mut session = Self {
            turn_clock: config.clock_for(to_move),
            config,
            board,
            current: to_move,
            stats: Default::default(),
            selection: Vec::new(),
            options: Vec::new(),
            history: History::new(),
            events: Vec::new(),
        };
        session.queue_engine_turn();
        session
    }

    /// Back to the configured layout with Black to move
    pub fn reset(&mut self) {
        self.board.apply_layout(self.config.layout, self.config.host_color);
        self.current = Player::Black;
        self.stats = Default::default();
        self.turn_clock = self.config.clock_for(Player::Black);
        self.history.clear();
        self.events.clear();
        self.clear_selection();
        info!("Game reset: {} layout, {} at the bottom", self.config.layout, self.config.host_color);
        self.queue_engine_turn();
    }

    /// Replace the configuration and reset
    pub fn reconfigure(&mut self, config: GameConfig) {
        self.config = config;
        self.reset();
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move
    pub fn current(&self) -> Player {
        self.current
    }

    pub fn stats(&self, player: Player) -> PlayerStats {
        self.stats[player.index()]
    }

    pub fn score(&self, player: Player) -> u32 {
        self.stats[player.index()].score
    }

    /// Clock allotment of the side to move
    pub fn turn_clock(&self) -> Duration {
        self.turn_clock
    }

    pub fn selection(&self) -> &[Coord] {
        &self.selection
    }

    /// Legal moves of the current selection
    pub fn move_options(&self) -> &[MoveOption] {
        &self.options
    }

    /// Cells a click can confirm: every cell newly entered by a legal move
    pub fn highlighted(&self) -> Vec<Coord> {
        let mut cells: Vec<Coord> = self.options.iter().flat_map(|o| o.entered_cells()).collect();
        cells.sort();
        cells.dedup();
        cells
    }

    /// Every legal move of the side to move
    pub fn legal_moves(&self) -> Vec<MoveOption> {
        rules::generate_moves(&self.board, self.current)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Committed moves, oldest first
    pub fn move_log(&self) -> impl Iterator<Item = &MoveRecord> + '_ {
        self.history.records()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn is_computer_turn(&self) -> bool {
        self.config.is_computer(self.current)
    }

    pub fn wire_string(&self) -> Result<String> {
        to_wire_string(&self.board, self.current)
    }

    /// Drain queued notifications
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Replace the selection. An empty slice clears it. On error the
    /// previous selection stays.
    pub fn set_selection(&mut self, coords: &[Coord]) -> Result<()> {
        if coords.is_empty() {
            self.clear_selection();
            return Ok(());
        }
        let selection = Selection::new(&self.board, self.current, coords)?;
        self.options = rules::moves_for(&self.board, &selection);
        self.selection = coords.to_vec();
        debug!(
            "Selected {:?}: {} legal moves",
            self.selection.iter().map(|c| c.label()).collect::<Vec<_>>(),
            self.options.len()
        );
        Ok(())
    }

    /// Start a new selection at `coord`
    pub fn select(&mut self, coord: Coord) -> Result<()> {
        self.set_selection(&[coord])
    }

    /// Add `coord` to the selection if the group stays valid
    pub fn extend_selection(&mut self, coord: Coord) -> Result<()> {
        if self.selection.contains(&coord) {
            return Err(AbaloneError::selection(format!("{coord} is already selected")));
        }
        let mut coords = self.selection.clone();
        coords.push(coord);
        self.set_selection(&coords)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.options.clear();
    }

    /// Interactive flow: a highlighted destination confirms, an own marble
    /// selects (or extends with `extend`), anything else clears
    pub fn click(&mut self, coord: Coord, extend: bool, elapsed: Duration) -> Result<ClickResult> {
        let owner = self.board.get(coord)?;

        if self.highlighted().contains(&coord) {
            return self.confirm(coord, elapsed).map(ClickResult::Moved);
        }

        if owner == Some(self.current) && self.outcome().is_none() {
            if extend && !self.selection.is_empty() {
                self.extend_selection(coord)?;
            } else {
                self.select(coord)?;
            }
            return Ok(ClickResult::Selected);
        }

        self.clear_selection();
        Ok(ClickResult::Cleared)
    }

    // ------------------------------------------------------------------
    // Moves
    // ------------------------------------------------------------------

    /// Commit the move of the current selection that enters `destination`.
    /// When several moves enter it, the first in [`CONFIRM_ORDER`] wins.
    pub fn confirm(&mut self, destination: Coord, elapsed: Duration) -> Result<MoveRecord> {
        self.ensure_running()?;
        let option = CONFIRM_ORDER
            .iter()
            .filter_map(|&d| self.options.iter().find(|o| o.direction == d))
            .find(|o| o.entered_cells().any(|c| c == destination))
            .cloned()
            .ok_or_else(|| {
                AbaloneError::no_such_move(format!("{destination} is not a destination of the selection"))
            })?;
        self.commit(option, elapsed)
    }

    /// Commit the move of the current selection towards `direction`
    pub fn confirm_direction(&mut self, direction: Direction, elapsed: Duration) -> Result<MoveRecord> {
        self.ensure_running()?;
        let option = self
            .options
            .iter()
            .find(|o| o.direction == direction)
            .cloned()
            .ok_or_else(|| AbaloneError::no_such_move(format!("selection cannot move {direction}")))?;
        self.commit(option, elapsed)
    }

    /// Apply a move described by the search engine, exactly as a human move
    pub fn apply_move_text(&mut self, text: &str, elapsed: Duration) -> Result<MoveRecord> {
        self.plan_move_text(text)
            .inspect_err(|err| warn!("Rejected engine move {:?}: {}", text, err))
            .and_then(|option| self.commit(option, elapsed))
    }

    fn plan_move_text(&self, text: &str) -> Result<MoveOption> {
        self.ensure_running()?;
        let mv = parse_move_text(text)?;
        if mv.player != self.current {
            return Err(AbaloneError::selection(format!(
                "it is {}'s turn, not {}'s",
                self.current, mv.player
            )));
        }
        let selection = Selection::new(&self.board, self.current, &mv.tiles)?;
        let option = rules::move_in_direction(&self.board, &selection, mv.direction)
            .ok_or_else(|| AbaloneError::no_such_move(text))?;
        if option.kind != mv.kind {
            return Err(AbaloneError::no_such_move(format!(
                "{text}: the move is {}, not {}",
                option.kind, mv.kind
            )));
        }
        Ok(option)
    }

    fn ensure_running(&self) -> Result<()> {
        match self.outcome() {
            Some(_) => Err(AbaloneError::no_such_move("the game is over")),
            None => Ok(()),
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board,
            current: self.current,
            stats: self.stats,
            turn_clock: self.turn_clock,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.board = snapshot.board;
        self.current = snapshot.current;
        self.stats = snapshot.stats;
        self.turn_clock = snapshot.turn_clock;
    }

    fn commit(&mut self, option: MoveOption, elapsed: Duration) -> Result<MoveRecord> {
        let snapshot = self.snapshot();
        self.history.record_before_move(snapshot);
        let pushed = match rules::apply(&mut self.board, &option) {
            Ok(outcome) => outcome,
            Err(err) => {
                if let Some(snapshot) = self.history.discard_last() {
                    self.restore(snapshot);
                }
                return Err(err);
            }
        };

        let mover = option.player;
        let stats = &mut self.stats[mover.index()];
        stats.score += pushed.captured.len() as u32;
        stats.moves_made += 1;
        stats.time_spent += elapsed;

        let record = MoveRecord {
            move_number: self.history.len(),
            player: mover,
            opponent: mover.opponent(),
            from: option.pieces,
            to: option.destinations,
            direction: option.direction,
            kind: option.kind,
            pushed: pushed.relocated,
            captured: pushed.captured,
            elapsed,
        };

        self.current = mover.opponent();
        self.turn_clock = self.config.clock_for(self.current);
        self.clear_selection();
        self.history.push_record(record.clone());

        info!("{}", record);
        if record.is_capture() {
            info!("{} captured {} (score {})", mover, record.captured.len(), self.score(mover));
        }
        if let Some(outcome) = self.outcome() {
            info!("Game over: {:?}", outcome);
        }

        self.events.push(SessionEvent::MoveCompleted(record.to_string()));
        self.queue_engine_turn();
        Ok(record)
    }

    /// Restore the state before the last move. Returns `false` with nothing
    /// to undo.
    ///
    /// Pending notifications describe positions that no longer exist and are
    /// dropped; an engine turn is queued again for the restored position.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some((snapshot, record)) => {
                self.restore(snapshot);
                self.clear_selection();
                self.events.clear();
                if let Some(record) = record {
                    info!("Undid move {}", record.move_number);
                }
                self.queue_engine_turn();
                true
            }
            None => false,
        }
    }

    /// Wire board for the engine if the side to move is computer-controlled
    pub fn engine_request(&self) -> Option<String> {
        if self.outcome().is_some() || !self.is_computer_turn() {
            return None;
        }
        match self.wire_string() {
            Ok(wire) => Some(wire),
            Err(err) => {
                warn!("Cannot serialize board for the engine: {}", err);
                None
            }
        }
    }

    fn queue_engine_turn(&mut self) {
        if let Some(wire) = self.engine_request() {
            debug!("Engine turn for {}", self.current);
            self.events.push(SessionEvent::EngineTurn(wire));
        }
    }

    /// Game result, if the game has ended
    pub fn outcome(&self) -> Option<Outcome> {
        for player in Player::BOTH {
            if self.score(player) >= WIN_SCORE {
                return Some(Outcome::Win {
                    winner: player,
                    reason: WinReason::Captures,
                });
            }
        }

        let limit = self.config.move_limit()?;
        if Player::BOTH.iter().all(|&p| self.stats(p).moves_made >= limit) {
            let (black, white) = (self.score(Player::Black), self.score(Player::White));
            let outcome = match black.cmp(&white) {
                std::cmp::Ordering::Greater => Outcome::Win {
                    winner: Player::Black,
                    reason: WinReason::MoveLimit,
                },
                std::cmp::Ordering::Less => Outcome::Win {
                    winner: Player::White,
                    reason: WinReason::MoveLimit,
                },
                std::cmp::Ordering::Equal => Outcome::Draw,
            };
            return Some(outcome);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Layout;
    use crate::config::MatchType;

    fn c(col: i8, row: i8) -> Coord {
        Coord::new(col, row)
    }

    fn empty_config() -> GameConfig {
        GameConfig {
            layout: Layout::Empty,
            ..GameConfig::default()
        }
    }

    fn session_with(black: &[Coord], white: &[Coord]) -> GameSession {
        let mut board = Board::new();
        for &p in black {
            board.place(p, Player::Black).unwrap();
        }
        for &p in white {
            board.place(p, Player::White).unwrap();
        }
        GameSession::with_board(empty_config(), board, Player::Black)
    }

    #[test]
    fn test_new_session() {
        let session = GameSession::new(GameConfig::default());
        assert_eq!(session.current(), Player::Black);
        assert_eq!(session.board().count(Player::Black), 14);
        assert_eq!(session.turn_clock(), Duration::from_secs(30));
        assert!(!session.can_undo());
        assert!(session.outcome().is_none());
    }

    #[test]
    fn test_invalid_selection_keeps_previous() {
        let mut session = session_with(&[c(3, 3), c(5, 3)], &[c(4, 3)]);
        session.select(c(3, 3)).unwrap();
        assert!(session.extend_selection(c(5, 3)).is_err());
        assert_eq!(session.selection(), &[c(3, 3)]);
        assert!(matches!(
            session.select(c(4, 3)),
            Err(AbaloneError::InvalidSelection { .. })
        ));
        assert_eq!(session.selection(), &[c(3, 3)]);
        assert!(!session.move_options().is_empty());
    }

    #[test]
    fn test_confirm_switches_turn_and_records() {
        let mut session = session_with(&[c(3, 3)], &[c(7, 7)]);
        session.select(c(3, 3)).unwrap();
        assert_eq!(session.highlighted().len(), 6);
        let record = session.confirm(c(4, 3), Duration::from_secs(2)).unwrap();

        assert_eq!(record.move_number, 1);
        assert_eq!(record.direction, Direction::E);
        assert_eq!(session.current(), Player::White);
        assert!(session.selection().is_empty());
        assert!(session.move_options().is_empty());
        let stats = session.stats(Player::Black);
        assert_eq!(stats.moves_made, 1);
        assert_eq!(stats.time_spent, Duration::from_secs(2));
        assert_eq!(
            session.take_events(),
            vec![SessionEvent::MoveCompleted(record.to_string())]
        );
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn test_confirm_unknown_destination() {
        let mut session = session_with(&[c(3, 3)], &[]);
        session.select(c(3, 3)).unwrap();
        let before = *session.board();
        assert!(matches!(
            session.confirm(c(6, 6), Duration::ZERO),
            Err(AbaloneError::NoSuchMove { .. })
        ));
        assert_eq!(*session.board(), before);
        assert_eq!(session.current(), Player::Black);
        assert!(!session.can_undo());
    }

    #[test]
    fn test_click_flow() {
        let mut session = session_with(&[c(3, 3), c(4, 3)], &[]);
        assert_eq!(session.click(c(3, 3), false, Duration::ZERO), Ok(ClickResult::Selected));
        assert_eq!(session.click(c(4, 3), true, Duration::ZERO), Ok(ClickResult::Selected));
        assert_eq!(session.selection().len(), 2);

        // empty non-highlighted cell clears
        assert_eq!(session.click(c(8, 8), false, Duration::ZERO), Ok(ClickResult::Cleared));
        assert!(session.selection().is_empty());

        session.set_selection(&[c(3, 3), c(4, 3)]).unwrap();
        match session.click(c(5, 3), false, Duration::ZERO).unwrap() {
            ClickResult::Moved(record) => {
                assert_eq!(record.direction, Direction::E);
                assert_eq!(record.kind, crate::rules::MoveKind::Inline);
            }
            other => panic!("expected a move, got {other:?}"),
        }
        assert_eq!(session.board().get(c(5, 3)), Ok(Some(Player::Black)));
        assert_eq!(session.board().get(c(3, 3)), Ok(None));
    }

    #[test]
    fn test_click_off_board_is_error() {
        let mut session = session_with(&[c(3, 3)], &[]);
        assert!(matches!(
            session.click(c(9, 1), false, Duration::ZERO),
            Err(AbaloneError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_capture_scores_and_undo_restores() {
        let black = [c(6, 5), c(7, 5), c(8, 5)];
        let mut session = session_with(&black, &[c(9, 5)]);
        session.set_selection(&black).unwrap();
        let record = session.confirm_direction(Direction::E, Duration::from_secs(1)).unwrap();

        assert_eq!(record.captured, vec![c(9, 5)]);
        assert_eq!(session.score(Player::Black), 1);
        assert_eq!(session.board().count(Player::White), 0);

        assert!(session.undo());
        assert_eq!(session.score(Player::Black), 0);
        assert_eq!(session.board().get(c(9, 5)), Ok(Some(Player::White)));
        assert_eq!(session.current(), Player::Black);
        assert_eq!(session.stats(Player::Black), PlayerStats::default());
        assert!(!session.undo());
    }

    #[test]
    fn test_apply_move_text() {
        let mut session = session_with(&[c(3, 3), c(4, 3)], &[]);
        let record = session.apply_move_text("(b, C3, C4) s → NW", Duration::ZERO).unwrap();
        assert_eq!(record.kind, crate::rules::MoveKind::Broadside);
        assert_eq!(session.board().get(c(3, 4)), Ok(Some(Player::Black)));
        assert_eq!(session.board().get(c(4, 4)), Ok(Some(Player::Black)));
    }

    #[test]
    fn test_apply_move_text_rejections() {
        let mut session = session_with(&[c(3, 3), c(4, 3)], &[c(5, 7)]);
        let cases = [
            "(w, G5) i → E",
            "(b, C3, C4) i → NW",
            "(b, C3, C5) i → E",
            "(b, C4) i → W",
            "nonsense",
        ];
        for text in cases {
            assert!(session.apply_move_text(text, Duration::ZERO).is_err(), "{text}");
        }
        assert_eq!(session.current(), Player::Black);
        assert!(!session.can_undo());
    }

    #[test]
    fn test_win_by_captures_stops_play() {
        let mut session = session_with(&[c(3, 3)], &[c(7, 7)]);
        session.stats[Player::Black.index()].score = WIN_SCORE;
        assert_eq!(
            session.outcome(),
            Some(Outcome::Win {
                winner: Player::Black,
                reason: WinReason::Captures
            })
        );
        assert!(matches!(
            session.apply_move_text("(b, C3) i → E", Duration::ZERO),
            Err(AbaloneError::NoSuchMove { .. })
        ));
        assert_eq!(session.click(c(3, 3), false, Duration::ZERO), Ok(ClickResult::Cleared));
    }

    #[test]
    fn test_move_limit_draw() {
        let config = GameConfig {
            moves_per_team: 1,
            ..empty_config()
        };
        let mut board = Board::new();
        board.place(c(3, 3), Player::Black).unwrap();
        board.place(c(7, 7), Player::White).unwrap();
        let mut session = GameSession::with_board(config, board, Player::Black);

        session.apply_move_text("(b, C3) i → E", Duration::ZERO).unwrap();
        assert!(session.outcome().is_none());
        session.apply_move_text("(w, G7) i → W", Duration::ZERO).unwrap();
        assert_eq!(session.outcome(), Some(Outcome::Draw));
    }

    #[test]
    fn test_engine_turn_events() {
        let config = GameConfig {
            match_type: MatchType::HumanVsComputer,
            ..GameConfig::default()
        };
        let mut session = GameSession::new(config);
        assert!(session.take_events().is_empty());
        assert!(session.engine_request().is_none());

        session.apply_move_text("(b, C3) i → NW", Duration::ZERO).unwrap();
        let events = session.take_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], SessionEvent::MoveCompleted(_)));
        match &events[1] {
            SessionEvent::EngineTurn(wire) => assert!(wire.starts_with("w\n")),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_computer_black_requests_on_start() {
        let config = GameConfig {
            match_type: MatchType::ComputerVsComputer,
            ..GameConfig::default()
        };
        let mut session = GameSession::new(config);
        let events = session.take_events();
        assert!(matches!(events.as_slice(), [SessionEvent::EngineTurn(_)]));

        session.reset();
        assert_eq!(session.take_events().len(), 1);
    }

    #[test]
    fn test_shared_destination_prefers_west_over_northwest() {
        // C3 and D4 form a NE pair; D3 is entered both by W and by NW
        let pair = [c(3, 3), c(4, 4)];
        let mut session = session_with(&pair, &[]);
        session.set_selection(&pair).unwrap();
        let entering: Vec<Direction> = session
            .move_options()
            .iter()
            .filter(|o| o.entered_cells().any(|cell| cell == c(3, 4)))
            .map(|o| o.direction)
            .collect();
        assert_eq!(entering.len(), 2);

        let record = session.confirm(c(3, 4), Duration::ZERO).unwrap();
        assert_eq!(record.direction, Direction::W);
        assert_eq!(session.board().get(c(2, 3)), Ok(Some(Player::Black)));
        assert_eq!(session.board().get(c(3, 4)), Ok(Some(Player::Black)));
    }

    #[test]
    fn test_undo_replaces_stale_engine_turn() {
        let config = GameConfig {
            match_type: MatchType::ComputerVsComputer,
            ..GameConfig::default()
        };
        let mut session = GameSession::new(config);
        session.take_events();

        session.apply_move_text("(b, C3) i → NW", Duration::ZERO).unwrap();
        assert!(session.undo());

        let start = session.wire_string().unwrap();
        assert!(start.starts_with("b\n"));
        assert_eq!(session.take_events(), vec![SessionEvent::EngineTurn(start)]);
    }

    #[test]
    fn test_undo_human_turn_queues_nothing() {
        let config = GameConfig {
            match_type: MatchType::HumanVsComputer,
            ..GameConfig::default()
        };
        let mut session = GameSession::new(config);
        session.apply_move_text("(b, C3) i → NW", Duration::ZERO).unwrap();
        assert!(session.undo());
        assert!(session.take_events().is_empty());
    }
}
