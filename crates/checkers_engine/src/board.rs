//! Board model
//!
//! Owns the 8x8 grid, the per-player scores and the two history stacks.
//! The grid is only ever mutated through [`BoardModel::move_piece`],
//! [`BoardModel::undo`] and [`BoardModel::redo`], and the last two are exact
//! inverses of each other: reverting a [`CompletedMove`] restores the moved
//! piece (demoting it if the move promoted it), the jumped piece, the score
//! and the draw counter.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{EngineError, EngineResult};
use crate::move_gen::{self, ValidMoves};
use crate::moves::{CapturedPiece, CompletedMove, Move};
use crate::types::{is_playable, Cell, Coord, Piece, PieceKind, Player};

/// Width and height of the board
pub const BOARD_SIZE: u8 = 8;

/// Checkers board with move history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardModel {
    /// Indexed `[row][col]`
    cells: [[Cell; 8]; 8],
    scores: [u32; 2],
    consecutive_queen_moves: u32,
    previous_moves: Vec<CompletedMove>,
    next_moves: Vec<CompletedMove>,
}

impl Default for BoardModel {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardModel {
    /// Standard starting layout: player 1 on rows 0-2, player 2 on rows 5-7
    pub fn new() -> Self {
        let mut board = Self::empty();
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                if !is_playable(x, y) {
                    continue;
                }
                let owner = if Player::One.starting_rows().contains(&y) {
                    Player::One
                } else if Player::Two.starting_rows().contains(&y) {
                    Player::Two
                } else {
                    continue;
                };
                board.cells[y as usize][x as usize] = Cell::Occupied(Piece::man(owner));
            }
        }
        board
    }

    /// A board with no pieces and no history
    pub fn empty() -> Self {
        let mut cells = [[Cell::Empty; 8]; 8];
        for (y, row) in cells.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                if !is_playable(x as u8, y as u8) {
                    *cell = Cell::Unplayable;
                }
            }
        }
        Self {
            cells,
            scores: [0; 2],
            consecutive_queen_moves: 0,
            previous_moves: Vec::new(),
            next_moves: Vec::new(),
        }
    }

    /// Put the board back to the starting layout, dropping all history
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Cell at `(x, y)`, or `None` when off the board
    pub fn get(&self, x: u8, y: u8) -> Option<Cell> {
        if x < BOARD_SIZE && y < BOARD_SIZE {
            Some(self.cells[y as usize][x as usize])
        } else {
            None
        }
    }

    /// Cell at `(x, y)`; off-board coordinates read as unplayable
    pub fn cell(&self, x: u8, y: u8) -> Cell {
        self.get(x, y).unwrap_or(Cell::Unplayable)
    }

    pub fn piece_at(&self, x: u8, y: u8) -> Option<Piece> {
        self.get(x, y).and_then(|cell| cell.piece())
    }

    pub fn cells(&self) -> &[[Cell; 8]; 8] {
        &self.cells
    }

    /// Place a piece on a playable cell, replacing whatever was there
    pub fn place(&mut self, x: u8, y: u8, piece: Piece) -> EngineResult<()> {
        self.check_bounds((x, y))?;
        if !is_playable(x, y) {
            return Err(EngineError::Unplayable { x, y });
        }
        self.cells[y as usize][x as usize] = Cell::Occupied(piece);
        Ok(())
    }

    /// Remove the piece at `(x, y)`, returning it
    pub fn remove(&mut self, x: u8, y: u8) -> Option<Piece> {
        let piece = self.piece_at(x, y)?;
        self.cells[y as usize][x as usize] = Cell::Empty;
        Some(piece)
    }

    /// All pieces on the board in row-major order
    pub fn pieces(&self) -> impl Iterator<Item = (u8, u8, Piece)> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(x, cell)| cell.piece().map(|p| (x as u8, y as u8, p)))
        })
    }

    pub fn piece_count(&self, player: Player) -> usize {
        self.pieces().filter(|(_, _, p)| p.owner == player).count()
    }

    /// Pieces captured by `player`
    pub fn score(&self, player: Player) -> u32 {
        self.scores[player.index()]
    }

    pub fn consecutive_queen_moves(&self) -> u32 {
        self.consecutive_queen_moves
    }

    pub fn valid_moves_for(&self, x: u8, y: u8) -> ValidMoves {
        move_gen::valid_moves_for(self, x, y)
    }

    pub fn valid_moves(&self, player: Player) -> Vec<Move> {
        move_gen::valid_moves(self, player)
    }

    /// Moves of the piece at `(x, y)` that are legal under forced capture
    pub fn forced_moves_for(&self, x: u8, y: u8) -> Vec<Move> {
        let Some(piece) = self.piece_at(x, y) else {
            return Vec::new();
        };
        let own = self.valid_moves_for(x, y);
        if move_gen::player_has_captures(self, piece.owner) {
            own.capture_moves
        } else {
            own.non_capture_moves
        }
    }

    /// Commit a move of the piece on `mv.from`
    ///
    /// The move must be one of the piece's own capture or non-capture moves.
    /// Forced capture across pieces is the caller's policy; the state machine
    /// only ever offers moves from [`BoardModel::valid_moves`]. Any redo history
    /// is discarded.
    pub fn move_piece(&mut self, mv: Move) -> EngineResult<CompletedMove> {
        self.check_bounds(mv.from)?;
        self.check_bounds(mv.to)?;
        let piece = self
            .piece_at(mv.from.0, mv.from.1)
            .ok_or(EngineError::NoPieceAt {
                x: mv.from.0,
                y: mv.from.1,
            })?;

        let options = self.valid_moves_for(mv.from.0, mv.from.1);
        let illegal = EngineError::IllegalMove {
            from: mv.from,
            to: mv.to,
        };
        let captured_piece = if options.capture_moves.contains(&mv) {
            let at = move_gen::jumped_square(self, &mv).ok_or(illegal.clone())?;
            let jumped = self.piece_at(at.0, at.1).ok_or(illegal)?;
            Some(CapturedPiece { at, piece: jumped })
        } else if options.non_capture_moves.contains(&mv) {
            None
        } else {
            return Err(illegal);
        };

        let captured = captured_piece.is_some();
        let promoted = piece.kind == PieceKind::Man && mv.to.1 == piece.owner.promotion_row();
        let consecutive_queen_moves = if piece.is_king() && !captured && !promoted {
            self.consecutive_queen_moves + 1
        } else {
            0
        };

        let completed = CompletedMove {
            from: mv.from,
            to: mv.to,
            captured,
            promoted,
            by: piece.owner,
            consecutive_queen_moves,
            captured_piece,
        };
        self.apply(&completed);
        self.previous_moves.push(completed);
        self.next_moves.clear();
        Ok(completed)
    }

    /// Revert the last committed move, making it available to [`Self::redo`]
    pub fn undo(&mut self) -> Option<CompletedMove> {
        let last = self.previous_moves.pop()?;
        self.revert(&last);
        self.next_moves.push(last);
        Some(last)
    }

    /// Re-apply the most recently undone move
    pub fn redo(&mut self) -> Option<CompletedMove> {
        let next = self.next_moves.pop()?;
        self.apply(&next);
        self.previous_moves.push(next);
        Some(next)
    }

    /// Undo every committed move, returning how many were undone
    ///
    /// Afterwards the board is in its starting layout and the whole game sits
    /// on the redo stack, so it can be replayed with `redo`.
    pub fn rewind(&mut self) -> usize {
        let mut count = 0;
        while self.undo().is_some() {
            count += 1;
        }
        count
    }

    pub fn previous_moves(&self) -> &[CompletedMove] {
        &self.previous_moves
    }

    pub fn next_moves(&self) -> &[CompletedMove] {
        &self.next_moves
    }

    pub fn last_move(&self) -> Option<&CompletedMove> {
        self.previous_moves.last()
    }

    /// The move `redo` would apply next
    pub fn peek_redo(&self) -> Option<&CompletedMove> {
        self.next_moves.last()
    }

    fn apply(&mut self, mv: &CompletedMove) {
        let Some(piece) = self.remove(mv.from.0, mv.from.1) else {
            return;
        };
        if let Some(jumped) = mv.captured_piece {
            self.cells[jumped.at.1 as usize][jumped.at.0 as usize] = Cell::Empty;
            self.scores[mv.by.index()] += 1;
        }
        let placed = if mv.promoted {
            Piece::king(piece.owner)
        } else {
            piece
        };
        self.cells[mv.to.1 as usize][mv.to.0 as usize] = Cell::Occupied(placed);
        self.consecutive_queen_moves = mv.consecutive_queen_moves;
    }

    fn revert(&mut self, mv: &CompletedMove) {
        if let Some(piece) = self.remove(mv.to.0, mv.to.1) {
            let restored = if mv.promoted {
                Piece::man(piece.owner)
            } else {
                piece
            };
            self.cells[mv.from.1 as usize][mv.from.0 as usize] = Cell::Occupied(restored);
        }
        if let Some(jumped) = mv.captured_piece {
            self.cells[jumped.at.1 as usize][jumped.at.0 as usize] = Cell::Occupied(jumped.piece);
            let score = &mut self.scores[mv.by.index()];
            *score = score.saturating_sub(1);
        }
        self.consecutive_queen_moves = self
            .previous_moves
            .last()
            .map(|m| m.consecutive_queen_moves)
            .unwrap_or(0);
    }

    fn check_bounds(&self, (x, y): Coord) -> EngineResult<()> {
        if x < BOARD_SIZE && y < BOARD_SIZE {
            Ok(())
        } else {
            Err(EngineError::OutOfBounds { x, y })
        }
    }
}

impl fmt::Display for BoardModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..BOARD_SIZE).rev() {
            write!(f, "{y} ")?;
            for x in 0..BOARD_SIZE {
                write!(f, "{}", self.cell(x, y).symbol())?;
            }
            writeln!(f)?;
        }
        write!(f, "  01234567")
    }
}
