//! Turn and animation state machine
//!
//! [`GameState`] is a closed set of variants and [`GameState::on_event`] is
//! the whole transition table: given the current state and one
//! [`GameEvent`], it returns the next state, or `None` to stay. States are
//! never edited in place; the owner swaps in whatever `on_event` returns.
//!
//! Animation completion reaches the machine as
//! [`GameEvent::AnimationFinished`], produced from the animation set's
//! update on the same tick.

use checkers_engine::{CompletedMove, Coord, Move, Player};
use tracing::{debug, info, warn};

use crate::animation::AnimationId;
use crate::game::error::GameResult;
use crate::game::world::GameWorld;

/// Deadline of the current turn
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurnClock {
    pub started_at: f64,
    pub limit: f64,
}

impl TurnClock {
    pub fn new(started_at: f64, limit: f64) -> Self {
        Self { started_at, limit }
    }

    /// `max(0, limit - elapsed)`
    pub fn remaining(&self, now: f64) -> f64 {
        (self.limit - (now - self.started_at)).max(0.0)
    }

    pub fn expired(&self, now: f64) -> bool {
        self.remaining(now) <= 0.0
    }
}

/// Position within a replay paused on a multicapture step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilmCursor {
    /// Index of the next recorded move to replay
    pub next: usize,
    pub total: usize,
}

/// Inputs the state machine reacts to
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    /// Time advanced; checks turn deadlines and resumes paused replays
    Tick,
    AnimationFinished(AnimationId),
    /// A piece was clicked; carries the cell it stands on
    PieceClicked(Coord),
    TileClicked(Coord),
    Undo,
    Redo,
    Replay,
}

/// The single current state of a game
#[derive(Clone, Debug, PartialEq)]
pub enum GameState {
    /// Waiting for `player` to pick a piece with a legal move
    ///
    /// Valid transitions: → PieceSelected, → PieceMovingUndo (undo),
    /// → PieceMoving (redo), → BeginFilm (replay), → GameOver (timeout)
    PlayerTurn { player: Player, clock: TurnClock },

    /// A piece is picked and its legal moves are shown
    ///
    /// `chained` marks a multicapture continuation: the piece cannot be
    /// deselected and only its captures are offered, but undo and redo still
    /// step through the chain. With `film` set this is a pause inside a
    /// replay and resumes on the next tick.
    ///
    /// Valid transitions: → PlayerTurn (deselect or illegal tile),
    /// → PieceSelected (other own piece), → PieceMoving, → Film,
    /// → PieceMovingUndo (chained), → GameOver (timeout)
    PieceSelected {
        player: Player,
        piece: Coord,
        moves: Vec<Move>,
        chained: bool,
        clock: TurnClock,
        film: Option<FilmCursor>,
    },

    /// A committed move is being animated
    ///
    /// Valid transitions: → PieceSelected (chain continues),
    /// → PlayerTurn (opponent), → GameOver
    PieceMoving { mv: CompletedMove, animation: AnimationId },

    /// An undone move is being animated backwards
    ///
    /// Valid transitions: → PieceSelected (the undone move's mover)
    PieceMovingUndo { mv: CompletedMove, animation: AnimationId },

    /// Pieces are walking back to the start layout before a replay
    ///
    /// Valid transitions: → Film
    BeginFilm { total: usize, animation: AnimationId },

    /// Recorded move `index` of `total` is being replayed
    ///
    /// Valid transitions: → Film, → PieceSelected (multicapture pause),
    /// → PlayerTurn, → GameOver
    Film {
        mv: CompletedMove,
        index: usize,
        total: usize,
        animation: AnimationId,
    },

    /// The game ended; `winner` is `None` for a draw
    ///
    /// Valid transitions: → PieceMovingUndo, → PieceMoving (redo),
    /// → BeginFilm
    GameOver { winner: Option<Player> },
}

impl GameState {
    /// Player 1 to move, clock starting at `now`
    pub fn initial(world: &GameWorld, now: f64) -> Self {
        GameState::PlayerTurn {
            player: Player::One,
            clock: world.turn_clock(Player::One, now),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GameState::PlayerTurn { .. } => "PlayerTurn",
            GameState::PieceSelected { .. } => "PieceSelected",
            GameState::PieceMoving { .. } => "PieceMoving",
            GameState::PieceMovingUndo { .. } => "PieceMovingUndo",
            GameState::BeginFilm { .. } => "BeginFilm",
            GameState::Film { .. } => "Film",
            GameState::GameOver { .. } => "GameOver",
        }
    }

    /// Player whose turn it is, if a turn is in progress
    pub fn current_player(&self) -> Option<Player> {
        match self {
            GameState::PlayerTurn { player, .. } | GameState::PieceSelected { player, .. } => {
                Some(*player)
            }
            GameState::PieceMoving { mv, .. }
            | GameState::PieceMovingUndo { mv, .. }
            | GameState::Film { mv, .. } => Some(mv.by),
            GameState::BeginFilm { .. } | GameState::GameOver { .. } => None,
        }
    }

    /// Time left on the running turn clock
    pub fn remaining_time(&self, now: f64) -> Option<f64> {
        match self {
            GameState::PlayerTurn { clock, .. }
            | GameState::PieceSelected {
                clock, film: None, ..
            } => Some(clock.remaining(now)),
            _ => None,
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, GameState::GameOver { .. })
    }

    /// Compute the transition for `event` at time `now`
    pub fn on_event(
        &self,
        event: &GameEvent,
        world: &mut GameWorld,
        now: f64,
    ) -> GameResult<Option<GameState>> {
        match self {
            GameState::PlayerTurn { player, clock } => {
                player_turn(*player, *clock, event, world, now)
            }
            GameState::PieceSelected {
                player,
                piece,
                moves,
                chained,
                clock,
                film,
            } => match film {
                Some(cursor) => match event {
                    GameEvent::Tick => film_step(world, cursor.next, cursor.total, now).map(Some),
                    _ => Ok(None),
                },
                None => piece_selected(*player, *piece, moves, *chained, *clock, event, world, now),
            },
            GameState::PieceMoving { mv, animation } => match event {
                GameEvent::AnimationFinished(id) if id == animation => {
                    Ok(Some(after_move(mv, world, now)))
                }
                _ => Ok(None),
            },
            GameState::PieceMovingUndo { mv, animation } => match event {
                GameEvent::AnimationFinished(id) if id == animation => {
                    Ok(Some(after_undo(mv, world, now)))
                }
                _ => Ok(None),
            },
            GameState::BeginFilm { total, animation } => match event {
                GameEvent::AnimationFinished(id) if id == animation => {
                    film_step(world, 0, *total, now).map(Some)
                }
                _ => Ok(None),
            },
            GameState::Film {
                mv,
                index,
                total,
                animation,
            } => match event {
                GameEvent::AnimationFinished(id) if id == animation => {
                    film_continue(mv, *index, *total, world, now).map(Some)
                }
                _ => Ok(None),
            },
            GameState::GameOver { .. } => match event {
                GameEvent::Undo => start_undo(world, now),
                GameEvent::Redo => start_redo(world, now),
                GameEvent::Replay => start_film(world, now),
                _ => Ok(None),
            },
        }
    }
}

fn player_turn(
    player: Player,
    clock: TurnClock,
    event: &GameEvent,
    world: &mut GameWorld,
    now: f64,
) -> GameResult<Option<GameState>> {
    match event {
        GameEvent::Tick if clock.expired(now) => Ok(Some(timeout(player))),
        GameEvent::PieceClicked(at) => Ok(select(player, *at, clock, world, now)),
        GameEvent::Undo => start_undo(world, now),
        GameEvent::Redo => start_redo(world, now),
        GameEvent::Replay => start_film(world, now),
        _ => Ok(None),
    }
}

#[allow(clippy::too_many_arguments)]
fn piece_selected(
    player: Player,
    piece: Coord,
    moves: &[Move],
    chained: bool,
    clock: TurnClock,
    event: &GameEvent,
    world: &mut GameWorld,
    now: f64,
) -> GameResult<Option<GameState>> {
    let deselected = || GameState::PlayerTurn { player, clock };
    match event {
        GameEvent::Tick if clock.expired(now) => Ok(Some(timeout(player))),
        GameEvent::PieceClicked(at) if *at == piece => {
            Ok((!chained).then(deselected))
        }
        GameEvent::Undo if chained => start_undo(world, now),
        GameEvent::Redo if chained => start_redo(world, now),
        GameEvent::PieceClicked(at) => {
            let own = world.board.piece_at(at.0, at.1).map(|p| p.owner) == Some(player);
            if chained {
                world.reject(*at, now);
                Ok(None)
            } else if own {
                Ok(select(player, *at, clock, world, now))
            } else {
                world.reject(*at, now);
                Ok(Some(deselected()))
            }
        }
        GameEvent::TileClicked(at) => match moves.iter().find(|m| m.to == *at) {
            Some(mv) => {
                let (done, animation) = world.commit_move(*mv, now)?;
                Ok(Some(GameState::PieceMoving {
                    mv: done,
                    animation,
                }))
            }
            None => {
                world.reject(*at, now);
                Ok((!chained).then(deselected))
            }
        },
        _ => Ok(None),
    }
}

/// Selection of the piece on `at` by `player`, rejecting it if unusable
fn select(
    player: Player,
    at: Coord,
    clock: TurnClock,
    world: &mut GameWorld,
    now: f64,
) -> Option<GameState> {
    let owned = world
        .board
        .piece_at(at.0, at.1)
        .is_some_and(|p| p.owner == player);
    let moves = if owned {
        world.board.forced_moves_for(at.0, at.1)
    } else {
        Vec::new()
    };
    if moves.is_empty() {
        world.reject(at, now);
        return None;
    }
    debug!("[GAME] {} selected {:?} ({} moves)", player, at, moves.len());
    Some(GameState::PieceSelected {
        player,
        piece: at,
        moves,
        chained: false,
        clock,
        film: None,
    })
}

fn timeout(player: Player) -> GameState {
    info!("[TIMER] {} ran out of time, {} wins", player, player.opponent());
    GameState::GameOver {
        winner: Some(player.opponent()),
    }
}

/// State after `mv` finished animating
///
/// A capture that did not promote continues if the landing square has more
/// captures; promotion always ends the turn.
fn after_move(mv: &CompletedMove, world: &mut GameWorld, now: f64) -> GameState {
    if mv.captured && !mv.promoted {
        let captures = world.board.valid_moves_for(mv.to.0, mv.to.1).capture_moves;
        if !captures.is_empty() {
            info!("[GAME] {} continues capturing from {:?}", mv.by, mv.to);
            return GameState::PieceSelected {
                player: mv.by,
                piece: mv.to,
                clock: TurnClock::new(now, world.settings.turn_limit(captures.len())),
                moves: captures,
                chained: true,
                film: None,
            };
        }
    }
    end_of_turn(mv, world, now)
}

fn end_of_turn(mv: &CompletedMove, world: &mut GameWorld, now: f64) -> GameState {
    let opponent = mv.by.opponent();
    if world.board.valid_moves(opponent).is_empty() {
        info!("[GAME] {} has no legal moves, {} wins", opponent, mv.by);
        return GameState::GameOver {
            winner: Some(mv.by),
        };
    }
    if mv.consecutive_queen_moves >= world.settings.draw_queen_move_threshold {
        info!(
            "[GAME] Draw after {} consecutive king moves",
            mv.consecutive_queen_moves
        );
        return GameState::GameOver { winner: None };
    }
    debug!("[GAME] {} to move", opponent);
    GameState::PlayerTurn {
        player: opponent,
        clock: world.turn_clock(opponent, now),
    }
}

/// State after an undone move finished animating: its mover selects it again
///
/// If the move before it was an earlier step of the same capture chain, the
/// selection is a chained one offering captures only.
fn after_undo(mv: &CompletedMove, world: &mut GameWorld, now: f64) -> GameState {
    let (x, y) = mv.from;
    let mid_chain = world.board.last_move().is_some_and(|prev| {
        prev.by == mv.by && prev.captured && !prev.promoted && prev.to == mv.from
    });
    let moves = if mid_chain {
        world.board.valid_moves_for(x, y).capture_moves
    } else {
        world.board.forced_moves_for(x, y)
    };
    let clock = if mid_chain {
        TurnClock::new(now, world.settings.turn_limit(moves.len()))
    } else {
        world.turn_clock(mv.by, now)
    };
    if moves.is_empty() {
        warn!("[GAME] Undone piece at {:?} has no moves", mv.from);
        return GameState::PlayerTurn {
            player: mv.by,
            clock,
        };
    }
    GameState::PieceSelected {
        player: mv.by,
        piece: mv.from,
        moves,
        chained: mid_chain,
        clock,
        film: None,
    }
}

fn start_undo(world: &mut GameWorld, now: f64) -> GameResult<Option<GameState>> {
    Ok(world
        .commit_undo(now)?
        .map(|(mv, animation)| GameState::PieceMovingUndo { mv, animation }))
}

fn start_redo(world: &mut GameWorld, now: f64) -> GameResult<Option<GameState>> {
    Ok(world
        .commit_redo(now)?
        .map(|(mv, animation)| GameState::PieceMoving { mv, animation }))
}

fn start_film(world: &mut GameWorld, now: f64) -> GameResult<Option<GameState>> {
    Ok(world
        .begin_film(now)
        .map(|(total, animation)| GameState::BeginFilm { total, animation }))
}

/// Replay recorded move `index`
fn film_step(world: &mut GameWorld, index: usize, total: usize, now: f64) -> GameResult<GameState> {
    match world.commit_redo(now)? {
        Some((mv, animation)) => {
            info!("[FILM] Replaying move {}/{}", index + 1, total);
            Ok(GameState::Film {
                mv,
                index,
                total,
                animation,
            })
        }
        None => {
            warn!("[FILM] Recorded history ended at move {} of {}", index, total);
            Ok(match world.board.last_move().copied() {
                Some(last) => after_move(&last, world, now),
                None => GameState::initial(world, now),
            })
        }
    }
}

/// State after replayed move `index` finished animating
fn film_continue(
    mv: &CompletedMove,
    index: usize,
    total: usize,
    world: &mut GameWorld,
    now: f64,
) -> GameResult<GameState> {
    let next = index + 1;
    if next >= total {
        info!("[FILM] Replay finished");
        return Ok(after_move(mv, world, now));
    }

    let continues = mv.captured
        && !mv.promoted
        && world
            .board
            .peek_redo()
            .is_some_and(|n| n.by == mv.by && n.from == mv.to);
    if continues {
        let moves = world.board.valid_moves_for(mv.to.0, mv.to.1).capture_moves;
        return Ok(GameState::PieceSelected {
            player: mv.by,
            piece: mv.to,
            clock: TurnClock::new(now, world.settings.turn_limit(moves.len())),
            moves,
            chained: true,
            film: Some(FilmCursor { next, total }),
        });
    }
    film_step(world, next, total, now)
}
