//! Move generation
//!
//! ## Algorithm
//!
//! For every diagonal direction a piece may use, walk outward one cell at a
//! time:
//! 1. Empty cell: a non-capture move. Kings keep sliding, men stop.
//! 2. Opponent piece: if the next cell in that direction is empty, a capture
//!    landing there. The scan stops either way.
//! 3. Own piece or the board edge: the scan stops.
//!
//! Men use their player's two forward diagonals only; kings use all four
//! (both players' forward sets). Forced capture is applied per player in
//! [`valid_moves`]: as soon as any capture exists, only captures are offered.

use smallvec::SmallVec;

use crate::board::BoardModel;
use crate::moves::Move;
use crate::types::{Coord, Piece, PieceKind, Player};

/// Diagonal step deltas
pub type Directions = SmallVec<[(i8, i8); 4]>;

/// Moves available to a single piece, split by kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidMoves {
    pub capture_moves: Vec<Move>,
    pub non_capture_moves: Vec<Move>,
}

impl ValidMoves {
    pub fn is_empty(&self) -> bool {
        self.capture_moves.is_empty() && self.non_capture_moves.is_empty()
    }

    pub fn has_captures(&self) -> bool {
        !self.capture_moves.is_empty()
    }

    /// Captures if there are any, otherwise the non-capture moves
    pub fn forced(self) -> Vec<Move> {
        if self.capture_moves.is_empty() {
            self.non_capture_moves
        } else {
            self.capture_moves
        }
    }
}

/// Diagonals a piece may move along
pub fn directions_for(piece: Piece) -> Directions {
    let forward = |player: Player| {
        let dy = player.forward();
        [(-1, dy), (1, dy)]
    };

    let mut dirs = Directions::new();
    dirs.extend(forward(piece.owner));
    if piece.kind == PieceKind::King {
        dirs.extend(forward(piece.owner.opponent()));
    }
    dirs
}

#[inline]
fn step(from: Coord, dir: (i8, i8), n: i8) -> Option<Coord> {
    let x = from.0 as i8 + dir.0 * n;
    let y = from.1 as i8 + dir.1 * n;
    if (0..8).contains(&x) && (0..8).contains(&y) {
        Some((x as u8, y as u8))
    } else {
        None
    }
}

/// Capture and non-capture moves for the piece at `(x, y)`
///
/// Returns empty lists for an empty or unplayable cell.
pub fn valid_moves_for(board: &BoardModel, x: u8, y: u8) -> ValidMoves {
    let mut moves = ValidMoves::default();
    let Some(piece) = board.piece_at(x, y) else {
        return moves;
    };
    let from = (x, y);

    for dir in directions_for(piece) {
        let mut n = 1;
        while let Some(cell) = step(from, dir, n) {
            match board.cell(cell.0, cell.1).piece() {
                None => {
                    moves.non_capture_moves.push(Move::new(from, cell));
                    if piece.kind == PieceKind::Man {
                        break;
                    }
                    n += 1;
                }
                Some(other) if other.owner != piece.owner => {
                    if let Some(landing) = step(from, dir, n + 1) {
                        if board.cell(landing.0, landing.1).is_empty() {
                            moves.capture_moves.push(Move::new(from, landing));
                        }
                    }
                    break;
                }
                Some(_) => break,
            }
        }
    }

    moves
}

/// Every move `player` may make, with forced capture applied
pub fn valid_moves(board: &BoardModel, player: Player) -> Vec<Move> {
    let mut captures = Vec::new();
    let mut quiet = Vec::new();

    for (x, y, piece) in board.pieces() {
        if piece.owner != player {
            continue;
        }
        let piece_moves = valid_moves_for(board, x, y);
        captures.extend(piece_moves.capture_moves);
        quiet.extend(piece_moves.non_capture_moves);
    }

    if captures.is_empty() {
        quiet
    } else {
        captures
    }
}

/// Whether `player` has any capture available anywhere on the board
pub fn player_has_captures(board: &BoardModel, player: Player) -> bool {
    board
        .pieces()
        .filter(|(_, _, piece)| piece.owner == player)
        .any(|(x, y, _)| valid_moves_for(board, x, y).has_captures())
}

/// The square jumped by a capture move, if the move is one
///
/// For a sliding king the jumped piece sits right before the landing cell.
pub fn jumped_square(board: &BoardModel, mv: &Move) -> Option<Coord> {
    let dir = mv.direction();
    let before = step(mv.to, (-dir.0, -dir.1), 1)?;
    if before == mv.from {
        return None;
    }
    let mover = board.piece_at(mv.from.0, mv.from.1)?;
    match board.piece_at(before.0, before.1) {
        Some(other) if other.owner != mover.owner => Some(before),
        _ => None,
    }
}
