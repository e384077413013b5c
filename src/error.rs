//! Error types for the rules engine and the game session.

use thiserror::Error;

use crate::board::{Color, Square};

/// Errors surfaced by board mutators, move application and the AI entry point.
///
/// Every variant is a caller error; the engine has no recoverable or degraded paths.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Square label outside `A1`..`H8`
    #[error("Invalid square: {0}")]
    InvalidSquare(String),

    /// Piece glyph outside `PNBRQK` / `pnbrqk`
    #[error("Invalid piece: {0}")]
    InvalidPiece(String),

    /// `move` requires a piece on the origin square
    #[error("There is no piece at {0}")]
    EmptySquare(Square),

    #[error("Invalid level {level}. You can choose {valid}")]
    InvalidLevel { level: u8, valid: String },

    #[error("Invalid move from {from} to {to} for {color}")]
    IllegalMove { from: Square, to: Square, color: Color },

    #[error("Game is already finished")]
    GameFinished,

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] serde_json::Error),
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
