//! Core board types
//!
//! Coordinates are zero-based `(col, row)` pairs, the same `(u8, u8)` shape
//! the rest of the game uses for board squares. Player 1 starts on rows 0-2
//! and moves towards higher rows; player 2 starts on rows 5-7 and moves
//! towards lower rows.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Board coordinate as `(col, row)`
pub type Coord = (u8, u8);

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Numeric player id (1 or 2), as shown on the scoreboard
    pub fn id(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// Parse a numeric player id
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Row delta of this player's forward direction
    pub fn forward(self) -> i8 {
        match self {
            Player::One => 1,
            Player::Two => -1,
        }
    }

    /// The row on which a man of this player is promoted
    pub fn promotion_row(self) -> u8 {
        match self {
            Player::One => 7,
            Player::Two => 0,
        }
    }

    /// Rows occupied by this player at the start of a game
    pub fn starting_rows(self) -> std::ops::RangeInclusive<u8> {
        match self {
            Player::One => 0..=2,
            Player::Two => 5..=7,
        }
    }

    /// Array index used for per-player tables
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.id())
    }
}

/// Piece kind: men move forward one step, kings slide in all four diagonals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Man,
    King,
}

/// A piece on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub owner: Player,
    pub kind: PieceKind,
}

impl Piece {
    pub fn man(owner: Player) -> Self {
        Self {
            owner,
            kind: PieceKind::Man,
        }
    }

    pub fn king(owner: Player) -> Self {
        Self {
            owner,
            kind: PieceKind::King,
        }
    }

    pub fn is_king(&self) -> bool {
        self.kind == PieceKind::King
    }
}

/// Contents of a single board cell
///
/// Together with the two [`PieceKind`]s and two [`Player`]s this gives the six
/// cell states of the board: empty, unplayable, and a man or king of either
/// player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    /// White square; never holds a piece and never changes
    Unplayable,
    Occupied(Piece),
}

impl Cell {
    pub fn piece(&self) -> Option<Piece> {
        match self {
            Cell::Occupied(piece) => Some(*piece),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn owner(&self) -> Option<Player> {
        self.piece().map(|p| p.owner)
    }

    /// Single character used by the text rendering of the board
    pub fn symbol(&self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Unplayable => ' ',
            Cell::Occupied(Piece {
                owner: Player::One,
                kind: PieceKind::Man,
            }) => 'o',
            Cell::Occupied(Piece {
                owner: Player::One,
                kind: PieceKind::King,
            }) => 'O',
            Cell::Occupied(Piece {
                owner: Player::Two,
                kind: PieceKind::Man,
            }) => 'x',
            Cell::Occupied(Piece {
                owner: Player::Two,
                kind: PieceKind::King,
            }) => 'X',
        }
    }
}

/// Whether `(x, y)` is a dark, playable square
#[inline]
pub fn is_playable(x: u8, y: u8) -> bool {
    (x as u16 + y as u16) % 2 == 0
}
