//! Error types for the Abalone rules engine
//!
//! Every fallible operation validates fully before mutating anything, so an
//! `Err` always leaves the board, scores and history exactly as they were.

use thiserror::Error;

/// Errors raised by the board, rules, session and notation layers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AbaloneError {
    /// A coordinate outside the 61 playable cells was queried or mutated.
    /// Always a caller bug, never a user-input problem.
    #[error("invalid coordinate ({col}, {row})")]
    InvalidCoordinate { col: i8, row: i8 },

    /// Selection violates size, ownership or collinearity rules
    #[error("invalid selection: {reason}")]
    InvalidSelection { reason: String },

    /// Confirmation requested a move that was not generated for the selection
    #[error("no such move: {requested}")]
    NoSuchMove { requested: String },

    /// Wire-format token is not `<letter><digits><b|w>`
    #[error("malformed wire token: {token:?}")]
    MalformedWireToken { token: String },

    /// Engine move description did not match the move-text grammar
    #[error("unparsable move text {text:?}: {reason}")]
    UnparsableMoveText { text: String, reason: String },

    /// Configuration file could not be read or decoded
    #[error("configuration error: {message}")]
    Config { message: String },

    /// External move-search implementation failed
    #[error("engine error: {message}")]
    Engine { message: String },
}

impl AbaloneError {
    pub(crate) fn selection(reason: impl Into<String>) -> Self {
        AbaloneError::InvalidSelection { reason: reason.into() }
    }

    pub(crate) fn no_such_move(requested: impl Into<String>) -> Self {
        AbaloneError::NoSuchMove { requested: requested.into() }
    }

    pub(crate) fn move_text(text: &str, reason: impl Into<String>) -> Self {
        AbaloneError::UnparsableMoveText {
            text: text.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for AbaloneError {
    fn from(err: std::io::Error) -> Self {
        AbaloneError::Config { message: err.to_string() }
    }
}

impl From<serde_json::Error> for AbaloneError {
    fn from(err: serde_json::Error) -> Self {
        AbaloneError::Config { message: err.to_string() }
    }
}

/// Result type alias for rules engine operations
pub type Result<T> = std::result::Result<T, AbaloneError>;
