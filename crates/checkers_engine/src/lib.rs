//! Checkers rules engine
//!
//! Pure board logic for the forced-capture checkers variant played by
//! `xfcheckers`: the 8x8 cell grid, per-piece move generation, and the
//! move / undo / redo history. Nothing in here knows about rendering,
//! animation or turn timing; the state machine in the main crate drives it.
//!
//! # Module Organization
//!
//! - `types` - players, piece kinds, cells, coordinates
//! - `moves` - [`Move`] and [`CompletedMove`] value objects
//! - `move_gen` - direction walking, capture detection, forced capture
//! - `board` - [`BoardModel`] with move application and reversal
//! - `error` - [`EngineError`]

pub mod board;
pub mod error;
pub mod move_gen;
pub mod moves;
pub mod types;


pub use board::{BoardModel, BOARD_SIZE};
pub use error::{EngineError, EngineResult};
pub use move_gen::ValidMoves;
pub use moves::{CapturedPiece, CompletedMove, Move};
pub use types::{Cell, Coord, Piece, PieceKind, Player};
