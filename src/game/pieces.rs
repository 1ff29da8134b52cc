//! Piece identities and where each piece currently sits
//!
//! The board only knows cell contents. The tracker gives every piece a
//! stable id so the renderer can animate the same piece across moves, and
//! it remembers captured pieces in per-player discard areas beside the
//! board. It is updated in lock-step with every move, undo and redo.

use bevy::math::Vec3;
use checkers_engine::{BoardModel, CompletedMove, Coord, PieceKind, Player};

use crate::game::error::{GameError, GameResult};

/// Pieces per discard column
const DISCARD_COLUMN_LEN: usize = 6;

/// Stable id of a piece for the lifetime of a game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u8);

/// Where a piece is
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placement {
    Board(Coord),
    /// Slot in the discard area of the piece's owner
    Discard(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackedPiece {
    pub id: PieceId,
    pub owner: Player,
    pub kind: PieceKind,
    pub placement: Placement,
}

/// One piece going from one placement to another
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PieceStep {
    pub piece: PieceId,
    pub owner: Player,
    pub from: Placement,
    pub to: Placement,
}

/// Everything that moved when a move was applied or reverted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PieceMotion {
    pub mover: PieceStep,
    pub captured: Option<PieceStep>,
    /// The mover became a king (forward) or stopped being one (undo)
    pub kind_change: Option<PieceKind>,
}

/// World position of a placement, board cells one unit apart on the XZ plane
pub fn world_position(owner: Player, placement: Placement) -> Vec3 {
    match placement {
        Placement::Board((x, y)) => Vec3::new(x as f32, 0.0, y as f32),
        Placement::Discard(slot) => {
            let column = (slot / DISCARD_COLUMN_LEN) as f32;
            let row = (slot % DISCARD_COLUMN_LEN) as f32 + 1.0;
            match owner {
                Player::One => Vec3::new(-1.5 - column, 0.0, row),
                Player::Two => Vec3::new(8.5 + column, 0.0, 7.0 - row),
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PieceTracker {
    pieces: Vec<TrackedPiece>,
}

impl Default for PieceTracker {
    fn default() -> Self {
        Self::from_board(&BoardModel::new())
    }
}

impl PieceTracker {
    /// Number pieces in row-major order of the board's layout
    pub fn from_board(board: &BoardModel) -> Self {
        let pieces = board
            .pieces()
            .enumerate()
            .map(|(i, (x, y, piece))| TrackedPiece {
                id: PieceId(i as u8),
                owner: piece.owner,
                kind: piece.kind,
                placement: Placement::Board((x, y)),
            })
            .collect();
        Self { pieces }
    }

    pub fn pieces(&self) -> &[TrackedPiece] {
        &self.pieces
    }

    pub fn get(&self, id: PieceId) -> Option<&TrackedPiece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    /// Piece on board cell `at`
    pub fn at(&self, at: Coord) -> Option<&TrackedPiece> {
        self.index_at(at).map(|i| &self.pieces[i])
    }

    pub(crate) fn index_at(&self, at: Coord) -> Option<usize> {
        self.pieces
            .iter()
            .position(|p| p.placement == Placement::Board(at))
    }

    pub(crate) fn index_of(&self, id: PieceId) -> Option<usize> {
        self.pieces.iter().position(|p| p.id == id)
    }

    pub(crate) fn set(&mut self, index: usize, placement: Placement, kind: PieceKind) {
        let piece = &mut self.pieces[index];
        piece.placement = placement;
        piece.kind = kind;
    }

    /// Pieces of `owner` in its discard area
    pub fn discarded(&self, owner: Player) -> impl Iterator<Item = &TrackedPiece> {
        self.pieces
            .iter()
            .filter(move |p| p.owner == owner && matches!(p.placement, Placement::Discard(_)))
    }

    /// First discard slot past every occupied one
    pub fn next_discard_slot(&self, owner: Player) -> usize {
        self.discarded(owner)
            .filter_map(|p| match p.placement {
                Placement::Discard(slot) => Some(slot + 1),
                Placement::Board(_) => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// Follow a move the board has just applied
    pub fn apply(&mut self, mv: &CompletedMove) -> GameResult<PieceMotion> {
        let captured = match mv.captured_piece {
            Some(jumped) => {
                let index = self
                    .index_at(jumped.at)
                    .ok_or(GameError::TrackerDesync { at: jumped.at })?;
                let piece = self.pieces[index];
                let to = Placement::Discard(self.next_discard_slot(piece.owner));
                self.set(index, to, piece.kind);
                Some(PieceStep {
                    piece: piece.id,
                    owner: piece.owner,
                    from: piece.placement,
                    to,
                })
            }
            None => None,
        };

        let index = self
            .index_at(mv.from)
            .ok_or(GameError::TrackerDesync { at: mv.from })?;
        let piece = self.pieces[index];
        let kind = if mv.promoted { PieceKind::King } else { piece.kind };
        self.set(index, Placement::Board(mv.to), kind);

        Ok(PieceMotion {
            mover: PieceStep {
                piece: piece.id,
                owner: piece.owner,
                from: piece.placement,
                to: Placement::Board(mv.to),
            },
            captured,
            kind_change: mv.promoted.then_some(PieceKind::King),
        })
    }

    /// Follow a move the board has just reverted
    ///
    /// The captured piece comes back from the top of its owner's discard
    /// area; undo order guarantees it is the last one discarded.
    pub fn revert(&mut self, mv: &CompletedMove) -> GameResult<PieceMotion> {
        let index = self
            .index_at(mv.to)
            .ok_or(GameError::TrackerDesync { at: mv.to })?;
        let piece = self.pieces[index];
        let kind = if mv.promoted { PieceKind::Man } else { piece.kind };
        self.set(index, Placement::Board(mv.from), kind);

        let captured = match mv.captured_piece {
            Some(jumped) => {
                let owner = jumped.piece.owner;
                let top = Placement::Discard(self.next_discard_slot(owner).saturating_sub(1));
                let index = self
                    .pieces
                    .iter()
                    .position(|p| p.owner == owner && p.placement == top)
                    .ok_or(GameError::TrackerDesync { at: jumped.at })?;
                let restored = self.pieces[index];
                self.set(index, Placement::Board(jumped.at), jumped.piece.kind);
                Some(PieceStep {
                    piece: restored.id,
                    owner,
                    from: top,
                    to: Placement::Board(jumped.at),
                })
            }
            None => None,
        };

        Ok(PieceMotion {
            mover: PieceStep {
                piece: piece.id,
                owner: piece.owner,
                from: Placement::Board(mv.to),
                to: Placement::Board(mv.from),
            },
            captured,
            kind_change: mv.promoted.then_some(PieceKind::Man),
        })
    }

    /// Whether on-board pieces match the board cell for cell
    pub fn matches_board(&self, board: &BoardModel) -> bool {
        let on_board = self
            .pieces
            .iter()
            .filter(|p| matches!(p.placement, Placement::Board(_)))
            .count();
        on_board == board.pieces().count()
            && board.pieces().all(|(x, y, piece)| {
                self.at((x, y))
                    .is_some_and(|p| p.owner == piece.owner && p.kind == piece.kind)
            })
    }
}
