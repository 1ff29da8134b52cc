//! Setting the pieces up for a replay
//!
//! Before a recorded game is replayed, every piece, including captured ones
//! in the discard areas, has to get back to the layout the game started
//! from. Pieces already on a starting cell of their owner stay put. The
//! rest are assigned the remaining starting cells of their owner in id
//! order and walked there one at a time. A piece whose target cell is taken
//! by an opposing piece first relocates that piece; if that chain of
//! displacements comes back to a piece that is itself waiting, the waiting
//! piece is parked in its discard area and finishes its walk from there.

use checkers_engine::{BoardModel, Coord, PieceKind, Player};
use std::collections::VecDeque;

use crate::game::pieces::{Placement, PieceStep, PieceTracker};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Status {
    Pending,
    Walking,
    Done,
}

struct Planner<'a> {
    tracker: &'a mut PieceTracker,
    targets: Vec<Option<(Coord, PieceKind)>>,
    status: Vec<Status>,
    steps: Vec<PieceStep>,
}

impl Planner<'_> {
    fn relocate(&mut self, index: usize) {
        if self.status[index] != Status::Pending {
            return;
        }
        let Some((slot, kind)) = self.targets[index] else {
            self.status[index] = Status::Done;
            return;
        };
        self.status[index] = Status::Walking;

        if let Some(occupant) = self.tracker.index_at(slot).filter(|&o| o != index) {
            match self.status[occupant] {
                Status::Pending => self.relocate(occupant),
                Status::Walking => self.park(occupant),
                Status::Done => {}
            }
        }

        self.step(index, Placement::Board(slot), kind);
        self.status[index] = Status::Done;
    }

    fn park(&mut self, index: usize) {
        let piece = self.tracker.pieces()[index];
        let slot = self.tracker.next_discard_slot(piece.owner);
        self.step(index, Placement::Discard(slot), piece.kind);
    }

    fn step(&mut self, index: usize, to: Placement, kind: PieceKind) {
        let piece = self.tracker.pieces()[index];
        self.tracker.set(index, to, kind);
        self.steps.push(PieceStep {
            piece: piece.id,
            owner: piece.owner,
            from: piece.placement,
            to,
        });
    }
}

/// Move every tracked piece to the layout of `start`, returning the walks in order
///
/// `tracker` ends up matching `start`. Kept pieces that differ in kind from
/// the starting piece are reset in place without a step.
pub fn plan_film_setup(tracker: &mut PieceTracker, start: &BoardModel) -> Vec<PieceStep> {
    let count = tracker.pieces().len();
    let mut targets = vec![None; count];
    let mut status = vec![Status::Pending; count];

    for (index, piece) in tracker.pieces().iter().enumerate() {
        if let Placement::Board((x, y)) = piece.placement {
            if let Some(start_piece) = start.piece_at(x, y).filter(|s| s.owner == piece.owner) {
                targets[index] = Some(((x, y), start_piece.kind));
                status[index] = Status::Done;
            }
        }
    }
    for (index, target) in targets.iter().enumerate() {
        if let Some((at, kind)) = target {
            tracker.set(index, Placement::Board(*at), *kind);
        }
    }

    for owner in [Player::One, Player::Two] {
        let mut free: VecDeque<(Coord, PieceKind)> = start
            .pieces()
            .filter(|(_, _, p)| p.owner == owner)
            .filter(|&(x, y, _)| {
                !tracker.pieces().iter().enumerate().any(|(i, p)| {
                    status[i] == Status::Done && p.placement == Placement::Board((x, y))
                })
            })
            .map(|(x, y, p)| ((x, y), p.kind))
            .collect();
        for (index, piece) in tracker.pieces().iter().enumerate() {
            if piece.owner == owner && status[index] == Status::Pending {
                targets[index] = free.pop_front();
            }
        }
    }

    let mut planner = Planner {
        tracker,
        targets,
        status,
        steps: Vec::new(),
    };
    for index in 0..count {
        planner.relocate(index);
    }
    planner.steps
}
