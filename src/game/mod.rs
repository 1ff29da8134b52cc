//! Checkers game
//!
//! Turn flow, selection, animation sequencing, undo/redo and replay layered
//! over the `checkers_engine` board.
//!
//! # Module Organization
//!
//! - `state` - [`GameState`] variants and the transition table
//! - `world` - [`GameWorld`]: board, piece tracker, animations, tweens
//! - `model` - [`CheckersGame`] resource and its click/command entry points
//! - `pieces` - stable piece ids and board/discard placement
//! - `film` - relocation plan run before a replay
//! - `tween` - piece arcs, flips and reject markers
//! - `scoreboard` - [`Scoreboard`] snapshot
//! - `plugin` - [`CheckersPlugin`]
//! - `error` - [`GameError`]

pub mod error;
pub mod film;
pub mod model;
pub mod pieces;
pub mod plugin;
pub mod scoreboard;
pub mod state;
pub mod tween;
pub mod world;

#[cfg(test)]
mod tests;

pub use error::{GameError, GameResult};
pub use model::CheckersGame;
pub use pieces::{PieceId, PieceTracker, Placement, TrackedPiece};
pub use plugin::CheckersPlugin;
pub use scoreboard::Scoreboard;
pub use state::{FilmCursor, GameEvent, GameState, TurnClock};
pub use tween::{PiecePose, RejectMarker};
pub use world::GameWorld;
