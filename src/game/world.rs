//! Everything the state machine acts on
//!
//! [`GameWorld`] bundles the board, the piece tracker, running animations
//! and what the renderer needs to draw them. State transitions mutate the
//! world through the `commit_*` and `begin_film` helpers, which keep board,
//! tracker and tweens in step.

use checkers_engine::{BoardModel, CompletedMove, Coord, Move, PieceKind, Player};
use std::f32::consts::PI;
use tracing::{debug, info};

use crate::animation::{
    Animation, AnimationId, AnimationSet, Easing, EventAnimation, EventAnimationChain,
};
use crate::core::GameSettings;
use crate::game::error::GameResult;
use crate::game::film::plan_film_setup;
use crate::game::pieces::{world_position, PieceId, PieceMotion, PieceTracker};
use crate::game::state::TurnClock;
use crate::game::tween::{PiecePose, PieceTween, RejectMarker, TweenDriver};

#[derive(Debug, Clone)]
pub struct GameWorld {
    pub(crate) board: BoardModel,
    pub(crate) tracker: PieceTracker,
    pub(crate) animations: AnimationSet,
    pub(crate) tweens: Vec<PieceTween>,
    pub(crate) rejects: Vec<RejectMarker>,
    pub(crate) settings: GameSettings,
}

impl GameWorld {
    pub fn new(settings: GameSettings) -> Self {
        Self::with_board(settings, BoardModel::new())
    }

    /// World starting from an arbitrary position
    pub fn with_board(settings: GameSettings, board: BoardModel) -> Self {
        Self {
            tracker: PieceTracker::from_board(&board),
            board,
            animations: AnimationSet::new(),
            tweens: Vec::new(),
            rejects: Vec::new(),
            settings,
        }
    }

    pub fn board(&self) -> &BoardModel {
        &self.board
    }

    pub fn tracker(&self) -> &PieceTracker {
        &self.tracker
    }

    pub fn animations(&self) -> &AnimationSet {
        &self.animations
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Turn clock for `player` starting at `now`
    pub fn turn_clock(&self, player: Player, now: f64) -> TurnClock {
        let legal = self.board.valid_moves(player).len();
        TurnClock::new(now, self.settings.turn_limit(legal))
    }

    /// Commit a move and start animating it
    pub(crate) fn commit_move(&mut self, mv: Move, now: f64) -> GameResult<(CompletedMove, AnimationId)> {
        let done = self.board.move_piece(mv)?;
        let motion = self.tracker.apply(&done)?;
        let animation = self.animate(&motion, self.settings.move_animation_secs, now);
        debug!("[GAME] {} moved {:?} -> {:?}", done.by, done.from, done.to);
        Ok((done, animation))
    }

    /// Redo the next move, if any, and start animating it
    pub(crate) fn commit_redo(&mut self, now: f64) -> GameResult<Option<(CompletedMove, AnimationId)>> {
        let Some(done) = self.board.redo() else {
            return Ok(None);
        };
        let motion = self.tracker.apply(&done)?;
        let animation = self.animate(&motion, self.settings.move_animation_secs, now);
        Ok(Some((done, animation)))
    }

    /// Undo the last move, if any, and start animating it backwards
    pub(crate) fn commit_undo(&mut self, now: f64) -> GameResult<Option<(CompletedMove, AnimationId)>> {
        let Some(undone) = self.board.undo() else {
            return Ok(None);
        };
        let motion = self.tracker.revert(&undone)?;
        let animation = self.animate(&motion, self.settings.undo_animation_secs, now);
        debug!("[GAME] Undid {} move {:?} -> {:?}", undone.by, undone.from, undone.to);
        Ok(Some((undone, animation)))
    }

    fn animate(&mut self, motion: &PieceMotion, duration: f64, now: f64) -> AnimationId {
        let id = self
            .animations
            .start_event(EventAnimation::new(now, duration).with_easing(Easing::EaseInOutQuad));
        let driver = TweenDriver::Event(id);

        let step = motion.mover;
        let mut tween = PieceTween::arc(
            step.piece,
            world_position(step.owner, step.from),
            world_position(step.owner, step.to),
            driver,
        );
        match motion.kind_change {
            Some(PieceKind::King) => tween = tween.with_flip(0.0, PI),
            Some(PieceKind::Man) => tween = tween.with_flip(PI, 0.0),
            None => {
                let resting = if self.is_king(step.piece) { PI } else { 0.0 };
                tween = tween.with_flip(resting, resting);
            }
        }
        self.tweens.push(tween);

        if let Some(captured) = motion.captured {
            let resting = if self.is_king(captured.piece) { PI } else { 0.0 };
            self.tweens.push(
                PieceTween::slide(
                    captured.piece,
                    world_position(captured.owner, captured.from),
                    world_position(captured.owner, captured.to),
                    driver,
                )
                .with_flip(resting, resting),
            );
        }
        id
    }

    fn is_king(&self, piece: PieceId) -> bool {
        self.tracker
            .get(piece)
            .is_some_and(|p| p.kind == PieceKind::King)
    }

    /// Rewind the board and start walking every piece back to its start cell
    ///
    /// Returns the number of recorded moves to replay and the setup chain,
    /// or `None` when there is nothing to replay.
    pub(crate) fn begin_film(&mut self, now: f64) -> Option<(usize, AnimationId)> {
        if self.board.previous_moves().is_empty() {
            return None;
        }
        for marker in std::mem::take(&mut self.rejects) {
            self.animations.interrupt(marker.animation);
        }
        for tween in std::mem::take(&mut self.tweens) {
            self.animations.interrupt(tween.driver.animation());
        }

        let total = self.board.rewind();
        let steps = plan_film_setup(&mut self.tracker, &self.board);

        let link = self.settings.film_setup_animation_secs;
        let durations = if steps.is_empty() {
            vec![link]
        } else {
            vec![link; steps.len()]
        };
        let chain = self
            .animations
            .start_chain(EventAnimationChain::new(now, durations));
        for (k, step) in steps.iter().enumerate() {
            self.tweens.push(PieceTween::arc(
                step.piece,
                world_position(step.owner, step.from),
                world_position(step.owner, step.to),
                TweenDriver::Link(chain, k),
            ));
        }
        info!("[FILM] Setting up replay of {} moves: {} pieces to relocate", total, steps.len());
        Some((total, chain))
    }

    /// Show a reject cross on `tile`
    pub(crate) fn reject(&mut self, tile: Coord, now: f64) {
        let animation = self
            .animations
            .start_event(EventAnimation::new(now, self.settings.reject_animation_secs));
        self.rejects.push(RejectMarker { tile, animation });
        debug!("[GAME] Rejected click on {:?}", tile);
    }

    /// Forget tweens and markers driven by a finished animation
    pub(crate) fn on_animation_finished(&mut self, id: AnimationId) {
        self.tweens.retain(|t| t.driver.animation() != id);
        self.rejects.retain(|r| r.animation != id);
    }

    pub fn reject_markers(&self) -> &[RejectMarker] {
        &self.rejects
    }

    /// Where the renderer should draw `piece` at time `t`
    pub fn piece_pose(&self, piece: PieceId, t: f64) -> Option<PiecePose> {
        let tracked = self.tracker.get(piece)?;
        for tween in self.tweens.iter().filter(|tw| tw.piece == piece) {
            match tween.driver {
                TweenDriver::Event(id) => {
                    if let Some(progress) = self.animations.event_progress(id, t) {
                        return Some(tween.pose(progress));
                    }
                }
                TweenDriver::Link(id, link) => {
                    if let Some(Animation::Chain(chain)) = self.animations.get(id) {
                        if link >= chain.current_index() {
                            return Some(tween.pose(chain.link_progress(link, t)));
                        }
                    }
                }
            }
        }
        Some(PiecePose::at_rest(
            world_position(tracked.owner, tracked.placement),
            tracked.kind == PieceKind::King,
        ))
    }
}
