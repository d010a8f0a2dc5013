//! Game state management for the Abalone GUI
//!
//! Wraps a [`GameSession`] with what only the front-end needs: the move
//! timer, the AI worker thread and a status line.

use crate::board::{Coord, Player};
use crate::config::GameConfig;
use crate::engine::{timed_search, RandomMover, SearchReply};
use crate::error::Result;
use crate::session::{ClickResult, GameSession, SessionEvent};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::warn;

use super::board_view::BoardClick;

/// AI computation state
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<Result<SearchReply>>,
        start_time: Instant,
    },
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    /// Set while the clock is frozen
    pub paused_at: Option<Instant>,
    pub last_move_duration: Option<Duration>,
    pub ai_thinking_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            paused_at: None,
            last_move_duration: None,
            ai_thinking_time: None,
        }
    }
}

impl MoveTimer {
    /// Restart the count from zero, staying paused if paused
    pub fn start(&mut self) {
        let now = Instant::now();
        self.start_time = Some(now);
        if self.paused_at.is_some() {
            self.paused_at = Some(now);
        }
    }

    pub fn stop(&mut self) -> Duration {
        let duration = self.elapsed();
        self.last_move_duration = Some(duration);
        self.start_time = None;
        duration
    }

    pub fn elapsed(&self) -> Duration {
        let Some(start) = self.start_time else {
            return Duration::ZERO;
        };
        match self.paused_at {
            Some(paused) => paused.saturating_duration_since(start),
            None => start.elapsed(),
        }
    }

    pub fn pause(&mut self) {
        if self.paused_at.is_none() {
            self.paused_at = Some(Instant::now());
        }
    }

    /// Continue counting, excluding the paused interval
    pub fn resume(&mut self) {
        if let Some(paused) = self.paused_at.take() {
            self.start_time = self.start_time.map(|start| start + paused.elapsed());
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    pub fn set_ai_time(&mut self, duration: Duration) {
        self.ai_thinking_time = Some(duration);
    }
}

/// Main game state
pub struct GameState {
    pub session: GameSession,
    pub ai_state: AiState,
    pub move_timer: MoveTimer,
    pub last_reply: Option<SearchReply>,
    /// Cells entered by the most recent move
    pub last_move: Vec<Coord>,
    /// Description of the most recent move
    pub last_description: Option<String>,
    pub message: Option<String>,
    /// Wire board waiting to be handed to the AI
    pending_search: Option<String>,
}

impl GameState {
    pub fn new(config: GameConfig) -> Self {
        let mut state = Self {
            session: GameSession::new(config),
            ai_state: AiState::Idle,
            move_timer: MoveTimer::default(),
            last_reply: None,
            last_move: Vec::new(),
            last_description: None,
            message: None,
            pending_search: None,
        };
        state.pump_events();
        state
    }

    /// Restart with the current configuration
    pub fn reset(&mut self) {
        self.session.reset();
        self.clear_transient();
        self.pump_events();
    }

    /// Restart with a new configuration
    pub fn restart_with(&mut self, config: GameConfig) {
        self.session.reconfigure(config);
        self.clear_transient();
        self.pump_events();
    }

    fn clear_transient(&mut self) {
        self.ai_state = AiState::Idle;
        self.move_timer = MoveTimer::default();
        self.last_reply = None;
        self.last_move.clear();
        self.last_description = None;
        self.message = None;
        self.pending_search = None;
    }

    /// Check if a human may act now
    pub fn is_human_turn(&self) -> bool {
        !self.session.is_computer_turn()
    }

    /// Check if AI is currently thinking
    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    pub fn is_game_over(&self) -> bool {
        self.session.outcome().is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.move_timer.is_paused()
    }

    /// Freeze or unfreeze the clock. A paused game takes no moves and a
    /// finished search is held until play resumes.
    pub fn toggle_pause(&mut self) {
        if self.is_paused() {
            self.move_timer.resume();
            self.message = None;
        } else if !self.is_game_over() {
            self.move_timer.pause();
            self.message = Some("Paused".to_string());
        }
    }

    /// Time left on the mover's clock
    pub fn clock_remaining(&self) -> Duration {
        self.session.turn_clock().saturating_sub(self.move_timer.elapsed())
    }

    /// Route session notifications to the UI
    fn pump_events(&mut self) {
        for event in self.session.take_events() {
            match event {
                SessionEvent::MoveCompleted(description) => {
                    self.last_description = Some(description);
                }
                SessionEvent::EngineTurn(wire) => {
                    self.pending_search = Some(wire);
                }
            }
        }
    }

    /// Handle a click on the board
    pub fn handle_click(&mut self, click: BoardClick) {
        if self.is_paused() {
            self.message = Some("Paused".to_string());
            return;
        }
        if self.is_ai_thinking() || !self.is_human_turn() {
            self.message = Some("Not your turn".to_string());
            return;
        }

        match self.session.click(click.coord, click.extend, self.move_timer.elapsed()) {
            Ok(ClickResult::Moved(record)) => {
                self.last_move = record.to;
                self.move_timer.stop();
                self.move_timer.start();
                self.message = None;
            }
            Ok(ClickResult::Selected | ClickResult::Cleared) => {
                self.message = None;
            }
            Err(err) => {
                self.message = Some(err.to_string());
            }
        }
        self.pump_events();
    }

    /// Start AI thinking if a search is pending
    pub fn start_ai_thinking(&mut self) {
        if self.is_ai_thinking() || self.is_game_over() || self.is_paused() {
            return;
        }
        let Some(wire) = self.pending_search.take() else {
            return;
        };

        let (tx, rx) = channel();

        thread::spawn(move || {
            let mut engine = RandomMover::new();
            let result = timed_search(&mut engine, &wire);
            let _ = tx.send(result);
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Check if AI has finished thinking
    pub fn check_ai_result(&mut self) {
        if self.is_paused() {
            return;
        }
        let result = match &self.ai_state {
            AiState::Thinking { receiver, start_time } => match receiver.try_recv() {
                Ok(result) => Some((result, start_time.elapsed())),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    self.ai_state = AiState::Idle;
                    self.message = Some("AI error".to_string());
                    return;
                }
            },
            AiState::Idle => None,
        };

        let Some((result, elapsed)) = result else {
            return;
        };
        self.ai_state = AiState::Idle;
        self.move_timer.set_ai_time(elapsed);

        let applied = result.and_then(|reply| {
            let record = self.session.apply_move_text(&reply.move_text, elapsed);
            self.last_reply = Some(reply);
            record
        });
        match applied {
            Ok(record) => {
                self.last_move = record.to;
                self.move_timer.start();
                self.message = None;
            }
            Err(err) => {
                warn!("AI turn aborted: {}", err);
                self.message = Some(format!("AI move rejected: {err}"));
            }
        }
        self.pump_events();
    }

    /// Get AI thinking elapsed time
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Undo last move. Against the computer, undo back to the human's turn.
    pub fn undo(&mut self) {
        if !self.session.can_undo() {
            return;
        }
        // Abandon any search in flight; its reply is for the old position
        self.ai_state = AiState::Idle;

        self.session.undo();
        while self.session.is_computer_turn() && !self.all_computer() && self.session.undo() {}

        self.last_move.clear();
        self.last_description = self.session.move_log().last().map(|r| r.to_string());
        self.message = None;
        self.move_timer.start();
        self.pending_search = None;
        self.pump_events();
    }

    fn all_computer(&self) -> bool {
        let config = self.session.config();
        config.is_computer(Player::Black) && config.is_computer(Player::White)
    }
}
