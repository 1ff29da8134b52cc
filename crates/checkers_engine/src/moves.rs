//! Move value objects
//!
//! A [`Move`] is just a pair of squares. Once the board commits it, the
//! result is a [`CompletedMove`] carrying everything needed to reverse it
//! exactly: which piece was jumped, whether the mover was promoted and the
//! draw counter at that point.

use serde::{Deserialize, Serialize};

use crate::types::{Coord, Piece, Player};

/// A board transition from one square to another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
}

impl Move {
    pub fn new(from: Coord, to: Coord) -> Self {
        Self { from, to }
    }

    /// Unit diagonal direction of the move
    pub fn direction(&self) -> (i8, i8) {
        (
            (self.to.0 as i8 - self.from.0 as i8).signum(),
            (self.to.1 as i8 - self.from.1 as i8).signum(),
        )
    }

    /// Number of diagonal steps covered by the move
    pub fn distance(&self) -> u8 {
        (self.to.0 as i8 - self.from.0 as i8).unsigned_abs()
    }
}

/// A piece removed by a capture, kept so undo can put it back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CapturedPiece {
    pub at: Coord,
    pub piece: Piece,
}

/// A move the board has committed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompletedMove {
    pub from: Coord,
    pub to: Coord,
    /// Whether an opponent piece was jumped
    pub captured: bool,
    /// Whether a man reached its promotion row with this move
    pub promoted: bool,
    /// Player who made the move
    pub by: Player,
    /// Consecutive king moves without capture or promotion, including this one
    pub consecutive_queen_moves: u32,
    /// The jumped piece, present exactly when `captured` is set
    pub captured_piece: Option<CapturedPiece>,
}

impl CompletedMove {
    pub fn as_move(&self) -> Move {
        Move::new(self.from, self.to)
    }
}

impl From<CompletedMove> for Move {
    fn from(completed: CompletedMove) -> Self {
        completed.as_move()
    }
}
