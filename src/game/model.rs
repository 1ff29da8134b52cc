//! The game as a single resource
//!
//! [`CheckersGame`] owns the [`GameWorld`] and the current [`GameState`].
//! Everything that changes the game goes through [`CheckersGame::dispatch`]:
//! ticks, clicks and commands become [`GameEvent`]s, the current state
//! computes its successor and the successor replaces it whole.

use bevy::math::Vec3;
use bevy::prelude::Resource;
use checkers_engine::{BoardModel, Move, Player};
use tracing::{debug, error, info};

use crate::animation::{AnimationId, PeriodicAnimation};
use crate::core::GameSettings;
use crate::game::error::{GameError, GameResult};
use crate::game::pieces::{PieceId, PieceTracker, Placement};
use crate::game::scoreboard::Scoreboard;
use crate::game::state::{GameEvent, GameState};
use crate::game::tween::{PiecePose, RejectMarker};
use crate::game::world::GameWorld;
use crate::scene::PickTarget;

#[derive(Resource, Debug, Clone)]
pub struct CheckersGame {
    world: GameWorld,
    state: GameState,
    now: f64,
    pulse: Option<AnimationId>,
}

impl Default for CheckersGame {
    fn default() -> Self {
        Self::new(GameSettings::default())
    }
}

impl CheckersGame {
    /// New game from the standard layout, player 1 to move at time 0
    pub fn new(settings: GameSettings) -> Self {
        Self::with_board(settings, BoardModel::new(), Player::One)
    }

    /// Game starting from an arbitrary position with `first` to move
    pub fn with_board(settings: GameSettings, board: BoardModel, first: Player) -> Self {
        let world = GameWorld::with_board(settings, board);
        let state = GameState::PlayerTurn {
            player: first,
            clock: world.turn_clock(first, 0.0),
        };
        Self {
            world,
            state,
            now: 0.0,
            pulse: None,
        }
    }

    /// Start over from the standard layout at time `now`
    pub fn restart(&mut self, now: f64) {
        let settings = self.world.settings.clone();
        self.world = GameWorld::new(settings);
        self.state = GameState::initial(&self.world, now);
        self.now = now;
        self.pulse = None;
        info!("[GAME] New game");
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn world(&self) -> &GameWorld {
        &self.world
    }

    pub fn board(&self) -> &BoardModel {
        &self.world.board
    }

    pub fn pieces(&self) -> &PieceTracker {
        &self.world.tracker
    }

    pub fn settings(&self) -> &GameSettings {
        &self.world.settings
    }

    /// Replace the settings; clocks already running keep their limit
    pub fn set_settings(&mut self, settings: GameSettings) {
        self.world.settings = settings;
    }

    /// Time of the last update
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Advance to time `t`
    ///
    /// Completed animations are delivered first, in deadline order, then
    /// a tick checks deadlines and resumes paused replays.
    pub fn update(&mut self, t: f64) {
        self.now = t;
        for event in self.world.animations.update(t) {
            if let Some(id) = event.finished_id() {
                self.world.on_animation_finished(id);
                self.dispatch(GameEvent::AnimationFinished(id));
            }
        }
        self.dispatch(GameEvent::Tick);
        self.sync_selection_pulse();
    }

    /// Route a click on the piece standing on `(x, y)`
    pub fn select_piece(&mut self, x: u8, y: u8) {
        self.dispatch(GameEvent::PieceClicked((x, y)));
        self.sync_selection_pulse();
    }

    /// Route a click on the tile `(x, y)`
    pub fn select_tile(&mut self, x: u8, y: u8) {
        self.dispatch(GameEvent::TileClicked((x, y)));
        self.sync_selection_pulse();
    }

    pub fn trigger_undo(&mut self) {
        self.dispatch(GameEvent::Undo);
        self.sync_selection_pulse();
    }

    pub fn trigger_redo(&mut self) {
        self.dispatch(GameEvent::Redo);
        self.sync_selection_pulse();
    }

    pub fn trigger_replay(&mut self) {
        self.dispatch(GameEvent::Replay);
        self.sync_selection_pulse();
    }

    /// Route a pick result to [`Self::select_piece`] or [`Self::select_tile`]
    ///
    /// Clicking a captured piece in a discard area does nothing.
    pub fn handle_pick(&mut self, target: &PickTarget) -> GameResult<()> {
        match target {
            PickTarget::Tile { x, y } => {
                self.select_tile(*x, *y);
                Ok(())
            }
            PickTarget::Piece(id) => {
                let piece = self
                    .world
                    .tracker
                    .get(PieceId(*id))
                    .ok_or(GameError::UnknownPiece { id: *id })?;
                if let Placement::Board((x, y)) = piece.placement {
                    self.select_piece(x, y);
                }
                Ok(())
            }
            PickTarget::Component(_) => Err(GameError::UnroutablePick {
                target: target.to_string(),
            }),
        }
    }

    /// Apply one event to the current state
    pub fn dispatch(&mut self, event: GameEvent) {
        match self.state.on_event(&event, &mut self.world, self.now) {
            Ok(Some(next)) => {
                debug!("[GAME] {} -> {} on {:?}", self.state.name(), next.name(), event);
                self.state = next;
            }
            Ok(None) => {}
            Err(e) => error!("[GAME] {} failed to handle {:?}: {}", self.state.name(), event, e),
        }
    }

    fn sync_selection_pulse(&mut self) {
        let selecting = matches!(self.state, GameState::PieceSelected { film: None, .. });
        match (selecting, self.pulse) {
            (true, None) => {
                let period = self.world.settings.highlight_pulse_period_secs;
                self.pulse = Some(
                    self.world
                        .animations
                        .start_periodic(PeriodicAnimation::new(self.now, period)),
                );
            }
            (false, Some(id)) => {
                self.world.animations.interrupt(id);
                self.pulse = None;
            }
            _ => {}
        }
    }

    /// Phase of the selected-piece highlight pulse, while a piece is selected
    pub fn selection_pulse(&self, t: f64) -> Option<f32> {
        self.pulse.and_then(|id| self.world.animations.phase(id, t))
    }

    /// Moves offered for the selected piece
    pub fn move_hints(&self) -> &[Move] {
        match &self.state {
            GameState::PieceSelected {
                moves, film: None, ..
            } => moves.as_slice(),
            _ => &[],
        }
    }

    pub fn reject_markers(&self) -> &[RejectMarker] {
        self.world.reject_markers()
    }

    pub fn piece_pose(&self, piece: PieceId, t: f64) -> Option<PiecePose> {
        self.world.piece_pose(piece, t)
    }

    /// World position of `piece` at time `t`, mid-animation included
    pub fn piece_position(&self, piece: PieceId, t: f64) -> Option<Vec3> {
        self.piece_pose(piece, t).map(|pose| pose.translation)
    }

    pub fn scoreboard(&self) -> Scoreboard {
        let winner = match self.state {
            GameState::GameOver { winner } => winner,
            _ => None,
        };
        Scoreboard {
            scores: [
                self.world.board.score(Player::One),
                self.world.board.score(Player::Two),
            ],
            current_player: self.state.current_player(),
            remaining_time: self.state.remaining_time(self.now),
            game_over: self.state.is_game_over(),
            winner,
        }
    }
}
