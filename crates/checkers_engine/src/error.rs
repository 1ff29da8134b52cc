//! Error types for the checkers engine

use thiserror::Error;

use crate::types::Coord;

/// Errors that can occur when mutating the board
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Coordinate outside the 8x8 grid
    #[error("Coordinate ({x}, {y}) is outside the board")]
    OutOfBounds { x: u8, y: u8 },

    /// No piece on the source cell
    #[error("No piece at ({x}, {y})")]
    NoPieceAt { x: u8, y: u8 },

    /// The move is not one the piece can make from its current cell
    #[error("Illegal move from {from:?} to {to:?}")]
    IllegalMove { from: Coord, to: Coord },

    /// Attempt to place a piece on a white (unplayable) cell
    #[error("Cell ({x}, {y}) is not playable")]
    Unplayable { x: u8, y: u8 },
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
