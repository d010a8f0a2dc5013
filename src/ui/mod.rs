//! GUI module for the Abalone game
//!
//! This module provides a native Rust GUI using egui/eframe.

mod app;
mod board_view;
mod game_state;
mod theme;

pub use app::AbaloneApp;
pub use board_view::{BoardClick, BoardOverlay, BoardView};
pub use game_state::{AiState, GameState, MoveTimer};
