//! Error types for game module
//!
//! Illegal clicks are not errors; they only produce a reject marker. These
//! errors cover inputs the game cannot route and bookkeeping that fell out
//! of step with the board.

use checkers_engine::{Coord, EngineError};

/// Errors that can occur in game logic
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Pick id that names no tracked piece
    #[error("Unknown piece id {id}")]
    UnknownPiece { id: u8 },

    /// Pick target the game does not handle
    #[error("Cannot route pick target: {target}")]
    UnroutablePick { target: String },

    /// No tracked piece where the board says a piece moved from
    #[error("Piece tracker has no piece at ({}, {})", .at.0, .at.1)]
    TrackerDesync { at: Coord },

    /// Board rejected a move the state machine offered or replayed
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
