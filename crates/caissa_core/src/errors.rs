//! Error types for the rules core.

use crate::types::Move;

#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChessError {
    /// The move is not among the legal moves of the current position.
    #[error("illegal move {0}")]
    IllegalMove(Move),

    /// Undo was requested but no applied move is left on the history stack.
    #[error("no move to undo")]
    EmptyHistory,
}

/// Result type for fallible core operations.
pub type ChessResult<T> = Result<T, ChessError>;
