//! Game rules for Abalone
//!
//! This module implements the move rules:
//! - Selection validation (1-3 own marbles in a contiguous line)
//! - Move generation (single steps, inline pushes, broadside moves)
//! - Move execution (pushes, captures, group relocation)

pub mod execute;
pub mod movegen;
pub mod selection;

// Re-exports for convenient access
pub use execute::{apply, PushOutcome};
pub use movegen::{generate_moves, move_in_direction, moves_for, MoveKind, MoveOption};
pub use selection::{validate, Selection, MAX_SELECTION};
