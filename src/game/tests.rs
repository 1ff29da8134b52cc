//! Game state machine tests
//!
//! # Test Organization
//!
//! - `test_select_*` - selection, deselection and reject markers
//! - `test_capture_*` / `test_promotion_*` - turn hand-over after moves
//! - `test_timer_*` - turn deadlines
//! - `test_undo_*` / `test_redo_*` - history navigation
//! - `test_replay_*` / `test_film_*` - replay setup and playback
//! - `test_tracker_*` - piece identities across moves

use std::collections::HashMap;

use checkers_engine::{BoardModel, Coord, Move, Piece, PieceKind, Player};

use super::film::plan_film_setup;
use super::*;
use crate::core::GameSettings;
use crate::scene::PickTarget;

fn board_with(pieces: &[(Coord, Piece)]) -> BoardModel {
    let mut board = BoardModel::empty();
    for &((x, y), piece) in pieces {
        board.place(x, y, piece).expect("test pieces must be on playable cells");
    }
    board
}

fn is_animating(state: &GameState) -> bool {
    matches!(
        state,
        GameState::PieceMoving { .. }
            | GameState::PieceMovingUndo { .. }
            | GameState::BeginFilm { .. }
            | GameState::Film { .. }
    )
}

/// Advance time in small steps until no animation state is current
fn settle(game: &mut CheckersGame) {
    let mut t = game.now();
    for _ in 0..400 {
        if !is_animating(game.state()) {
            return;
        }
        t += 0.1;
        game.update(t);
    }
    panic!("game never left {}", game.state().name());
}

fn play(game: &mut CheckersGame, from: Coord, to: Coord) {
    game.select_piece(from.0, from.1);
    game.select_tile(to.0, to.1);
    assert!(
        matches!(game.state(), GameState::PieceMoving { .. }),
        "move {from:?} -> {to:?} was not accepted, state is {}",
        game.state().name()
    );
    settle(game);
}

/// Two-step capture for player 1 with one spare player 2 piece
fn double_capture_game() -> CheckersGame {
    let board = board_with(&[
        ((1, 1), Piece::man(Player::One)),
        ((2, 2), Piece::man(Player::Two)),
        ((4, 4), Piece::man(Player::Two)),
        ((7, 7), Piece::man(Player::Two)),
    ]);
    CheckersGame::with_board(GameSettings::default(), board, Player::One)
}

/// Opening with one capture each
fn exchange_game() -> CheckersGame {
    let mut game = CheckersGame::default();
    play(&mut game, (2, 2), (3, 3));
    play(&mut game, (5, 5), (4, 4));
    play(&mut game, (3, 3), (5, 5));
    play(&mut game, (6, 6), (4, 4));
    game
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_select_and_deselect() {
    //! Clicking a movable piece selects it, clicking it again releases it
    let mut game = CheckersGame::default();

    game.select_piece(2, 2);
    match game.state() {
        GameState::PieceSelected {
            player,
            piece,
            moves,
            chained,
            ..
        } => {
            assert_eq!(*player, Player::One);
            assert_eq!(*piece, (2, 2));
            assert!(!chained);
            assert_eq!(moves.len(), 2);
        }
        other => panic!("expected PieceSelected, got {}", other.name()),
    }
    assert_eq!(game.move_hints().len(), 2);
    assert!(game.selection_pulse(0.25).is_some(), "Selected piece should pulse");

    game.select_piece(2, 2);
    assert!(matches!(game.state(), GameState::PlayerTurn { player: Player::One, .. }));
    assert!(game.selection_pulse(0.25).is_none(), "Pulse stops on deselect");
    assert!(game.move_hints().is_empty());
}

#[test]
fn test_select_blocked_piece_rejects() {
    //! A back-row piece has no legal move and cannot be selected
    let mut game = CheckersGame::default();

    game.select_piece(1, 1);
    assert!(matches!(game.state(), GameState::PlayerTurn { .. }));
    assert_eq!(game.reject_markers().len(), 1);
    assert_eq!(game.reject_markers()[0].tile, (1, 1));
}

#[test]
fn test_select_opponent_piece_rejects() {
    let mut game = CheckersGame::default();

    game.select_piece(1, 5);
    assert!(matches!(game.state(), GameState::PlayerTurn { player: Player::One, .. }));
    assert_eq!(game.reject_markers().len(), 1);
}

#[test]
fn test_select_illegal_tile_returns_to_turn() {
    //! A tile outside the offered moves rejects and drops the selection
    //! without restarting the turn clock
    let mut game = CheckersGame::default();
    let before = game.state().remaining_time(0.0);

    game.select_piece(2, 2);
    game.select_tile(5, 5);
    assert!(matches!(game.state(), GameState::PlayerTurn { player: Player::One, .. }));
    assert_eq!(game.state().remaining_time(0.0), before);
    assert_eq!(game.reject_markers().len(), 1);
    assert_eq!(game.board(), &BoardModel::new(), "Rejected click must not move anything");
}

#[test]
fn test_reject_marker_expires() {
    let mut game = CheckersGame::default();
    game.select_piece(1, 1);
    assert_eq!(game.reject_markers().len(), 1);

    game.update(game.settings().reject_animation_secs + 0.01);
    assert!(game.reject_markers().is_empty(), "Marker should clear when its animation ends");
}

#[test]
fn test_select_other_own_piece_switches_selection() {
    let mut game = CheckersGame::default();
    game.select_piece(2, 2);
    game.select_piece(4, 2);

    assert!(matches!(
        game.state(),
        GameState::PieceSelected { piece: (4, 2), .. }
    ));
    assert!(game.reject_markers().is_empty());
}

// ============================================================================
// Captures and promotion
// ============================================================================

#[test]
fn test_capture_chain_continues_with_same_piece() {
    //! A capture landing where another capture is available keeps the turn
    let mut game = double_capture_game();
    play(&mut game, (1, 1), (3, 3));

    match game.state() {
        GameState::PieceSelected {
            player,
            piece,
            moves,
            chained,
            film,
            ..
        } => {
            assert_eq!(*player, Player::One);
            assert_eq!(*piece, (3, 3));
            assert!(*chained);
            assert!(film.is_none());
            assert_eq!(moves, &vec![Move::new((3, 3), (5, 5))]);
        }
        other => panic!("expected chained PieceSelected, got {}", other.name()),
    }

    // The chained piece cannot be released
    game.select_piece(3, 3);
    assert!(matches!(game.state(), GameState::PieceSelected { chained: true, .. }));

    // A wrong tile is rejected without leaving the chain
    game.select_tile(2, 4);
    assert!(matches!(game.state(), GameState::PieceSelected { chained: true, .. }));
    assert_eq!(game.reject_markers().len(), 1);

    play(&mut game, (3, 3), (5, 5));
    assert!(matches!(game.state(), GameState::PlayerTurn { player: Player::Two, .. }));
    assert_eq!(game.board().score(Player::One), 2);
}

#[test]
fn test_capture_without_follow_up_passes_turn() {
    let board = board_with(&[
        ((1, 1), Piece::man(Player::One)),
        ((2, 2), Piece::man(Player::Two)),
        ((6, 6), Piece::man(Player::Two)),
    ]);
    let mut game = CheckersGame::with_board(GameSettings::default(), board, Player::One);
    play(&mut game, (1, 1), (3, 3));

    assert!(matches!(game.state(), GameState::PlayerTurn { player: Player::Two, .. }));
    assert_eq!(game.board().piece_at(2, 2), None);
}

#[test]
fn test_promotion_ends_capture_chain() {
    //! Landing on the promotion row ends the turn even when the new king
    //! could capture again
    let board = board_with(&[
        ((3, 5), Piece::man(Player::One)),
        ((4, 6), Piece::man(Player::Two)),
        ((6, 6), Piece::man(Player::Two)),
    ]);
    let mut game = CheckersGame::with_board(GameSettings::default(), board, Player::One);
    play(&mut game, (3, 5), (5, 7));

    assert_eq!(game.board().piece_at(5, 7), Some(Piece::king(Player::One)));
    assert!(matches!(game.state(), GameState::PlayerTurn { player: Player::Two, .. }));

    let id = game.pieces().at((5, 7)).map(|p| p.id).expect("promoted piece is tracked");
    let pose = game.piece_pose(id, game.now()).expect("pose");
    assert!((pose.flip - std::f32::consts::PI).abs() < 1e-6, "King rests flipped");
}

#[test]
fn test_capture_last_piece_wins() {
    let board = board_with(&[
        ((1, 1), Piece::man(Player::One)),
        ((2, 2), Piece::man(Player::Two)),
    ]);
    let mut game = CheckersGame::with_board(GameSettings::default(), board, Player::One);
    play(&mut game, (1, 1), (3, 3));

    assert_eq!(game.state(), &GameState::GameOver { winner: Some(Player::One) });
    let scoreboard = game.scoreboard();
    assert!(scoreboard.game_over);
    assert_eq!(scoreboard.winner, Some(Player::One));
    assert!(!scoreboard.is_draw());
}

#[test]
fn test_consecutive_king_moves_draw() {
    //! Reaching the king-move threshold ends the game without a winner
    let settings = GameSettings {
        draw_queen_move_threshold: 2,
        ..GameSettings::default()
    };
    let board = board_with(&[
        ((0, 0), Piece::king(Player::One)),
        ((7, 1), Piece::king(Player::Two)),
    ]);
    let mut game = CheckersGame::with_board(settings, board, Player::One);

    play(&mut game, (0, 0), (1, 1));
    assert!(matches!(game.state(), GameState::PlayerTurn { player: Player::Two, .. }));
    play(&mut game, (7, 1), (6, 0));

    assert_eq!(game.state(), &GameState::GameOver { winner: None });
    assert!(game.scoreboard().is_draw());
}

// ============================================================================
// Timer
// ============================================================================

#[test]
fn test_timer_expiry_gives_opponent_the_win() {
    let mut game = CheckersGame::default();
    let limit = game.settings().turn_time_limit_secs;

    game.update(limit - 1.0);
    assert!(matches!(game.state(), GameState::PlayerTurn { .. }));
    let remaining = game.scoreboard().remaining_time.expect("clock is running");
    assert!((remaining - 1.0).abs() < 1e-9);

    game.update(limit + 0.5);
    assert_eq!(game.state(), &GameState::GameOver { winner: Some(Player::Two) });
}

#[test]
fn test_timer_single_move_uses_short_limit() {
    //! With exactly one legal move the turn gets the one-move limit
    let board = board_with(&[
        ((0, 0), Piece::man(Player::One)),
        ((7, 7), Piece::man(Player::Two)),
    ]);
    let mut game = CheckersGame::with_board(GameSettings::default(), board, Player::One);
    let short = game.settings().one_move_time_limit_secs;

    game.update(short - 0.5);
    assert!(matches!(game.state(), GameState::PlayerTurn { .. }));
    game.update(short + 0.5);
    assert_eq!(game.state(), &GameState::GameOver { winner: Some(Player::Two) });
}

#[test]
fn test_timer_expires_while_selected() {
    let mut game = CheckersGame::default();
    game.select_piece(2, 2);

    game.update(game.settings().turn_time_limit_secs + 0.1);
    assert_eq!(game.state(), &GameState::GameOver { winner: Some(Player::Two) });
    assert!(game.selection_pulse(game.now()).is_none());
}

// ============================================================================
// Undo / redo
// ============================================================================

#[test]
fn test_undo_with_empty_history_is_noop() {
    let mut game = CheckersGame::default();
    let before = game.state().clone();

    game.trigger_undo();
    assert_eq!(game.state(), &before);
}

#[test]
fn test_undo_reselects_mover() {
    //! Undo animates the move back and leaves its mover with the piece selected
    let mut game = CheckersGame::default();
    play(&mut game, (2, 2), (3, 3));

    game.trigger_undo();
    assert!(matches!(game.state(), GameState::PieceMovingUndo { .. }));
    assert_eq!(game.board(), &{
        let mut expected = BoardModel::new();
        expected.move_piece(Move::new((2, 2), (3, 3))).unwrap();
        expected.undo();
        expected
    });

    settle(&mut game);
    match game.state() {
        GameState::PieceSelected {
            player,
            piece,
            chained,
            ..
        } => {
            assert_eq!(*player, Player::One);
            assert_eq!(*piece, (2, 2));
            assert!(!chained);
        }
        other => panic!("expected PieceSelected, got {}", other.name()),
    }
    assert_eq!(game.board().cells(), BoardModel::new().cells());
    assert!(game.pieces().matches_board(game.board()));
}

#[test]
fn test_undo_restores_captured_piece() {
    let mut game = exchange_game();
    assert_eq!(game.board().score(Player::Two), 1);

    game.trigger_undo();
    settle(&mut game);

    assert_eq!(game.board().score(Player::Two), 0);
    assert_eq!(game.board().piece_at(5, 5), Some(Piece::man(Player::One)));
    assert!(game.pieces().matches_board(game.board()));
    assert_eq!(game.pieces().discarded(Player::One).count(), 0);
}

#[test]
fn test_undo_mid_chain_selects_chained() {
    //! Undoing the second capture of a chain resumes the chain
    let mut game = double_capture_game();
    play(&mut game, (1, 1), (3, 3));
    play(&mut game, (3, 3), (5, 5));

    game.trigger_undo();
    settle(&mut game);
    assert!(matches!(
        game.state(),
        GameState::PieceSelected {
            piece: (3, 3),
            chained: true,
            ..
        }
    ));
}

#[test]
fn test_undo_unwinds_whole_chain() {
    //! A chained selection reached by undo keeps accepting undo
    let mut game = double_capture_game();
    play(&mut game, (1, 1), (3, 3));
    play(&mut game, (3, 3), (5, 5));

    game.trigger_undo();
    settle(&mut game);
    assert_eq!(game.board().previous_moves().len(), 1);

    game.trigger_undo();
    assert!(matches!(game.state(), GameState::PieceMovingUndo { .. }));
    settle(&mut game);
    assert_eq!(
        game.board().previous_moves().len(),
        0,
        "both capture steps should be undone"
    );
    assert_eq!(game.board().next_moves().len(), 2);
    assert!(matches!(
        game.state(),
        GameState::PieceSelected {
            piece: (1, 1),
            chained: false,
            ..
        }
    ));
    assert_eq!(game.board().piece_at(2, 2), Some(Piece::man(Player::Two)));
    assert_eq!(game.board().piece_at(4, 4), Some(Piece::man(Player::Two)));
}

#[test]
fn test_undo_chain_then_redo_restores_capture() {
    let mut game = double_capture_game();
    play(&mut game, (1, 1), (3, 3));
    play(&mut game, (3, 3), (5, 5));
    game.trigger_undo();
    settle(&mut game);

    game.trigger_redo();
    assert!(matches!(game.state(), GameState::PieceMoving { .. }));
    settle(&mut game);
    assert_eq!(game.board().piece_at(5, 5), Some(Piece::man(Player::One)));
    assert!(matches!(game.state(), GameState::PlayerTurn { player: Player::Two, .. }));
}

#[test]
fn test_undo_mid_chain_clock_counts_captures() {
    //! The restored chain gets the clock a forward continuation would
    // (5,1) over (6,2) is a second capture, so player 1 has two legal moves
    let board = board_with(&[
        ((1, 1), Piece::man(Player::One)),
        ((5, 1), Piece::man(Player::One)),
        ((2, 2), Piece::man(Player::Two)),
        ((4, 4), Piece::man(Player::Two)),
        ((6, 2), Piece::man(Player::Two)),
        ((7, 7), Piece::man(Player::Two)),
    ]);
    let mut game = CheckersGame::with_board(GameSettings::default(), board, Player::One);
    play(&mut game, (1, 1), (3, 3));
    play(&mut game, (3, 3), (5, 5));

    game.trigger_undo();
    settle(&mut game);
    let short = game.settings().one_move_time_limit_secs;
    match game.state() {
        GameState::PieceSelected {
            piece: (3, 3),
            chained: true,
            moves,
            clock,
            ..
        } => {
            assert_eq!(moves.len(), 1);
            assert_eq!(clock.limit, short, "one capture left means the short clock");
        }
        other => panic!("expected a chained selection, got {other:?}"),
    }
}

#[test]
fn test_redo_replays_undone_move() {
    let mut game = CheckersGame::default();
    play(&mut game, (2, 2), (3, 3));
    game.trigger_undo();
    settle(&mut game);

    // Release the re-selected piece so the turn accepts commands
    game.select_piece(2, 2);
    game.trigger_redo();
    assert!(matches!(game.state(), GameState::PieceMoving { .. }));

    settle(&mut game);
    assert!(matches!(game.state(), GameState::PlayerTurn { player: Player::Two, .. }));
    assert_eq!(game.board().piece_at(3, 3), Some(Piece::man(Player::One)));
    assert!(game.board().next_moves().is_empty());
}

#[test]
fn test_redo_without_history_is_noop() {
    let mut game = CheckersGame::default();
    game.trigger_redo();
    assert!(matches!(game.state(), GameState::PlayerTurn { .. }));
}

#[test]
fn test_undo_from_game_over() {
    let board = board_with(&[
        ((1, 1), Piece::man(Player::One)),
        ((2, 2), Piece::man(Player::Two)),
    ]);
    let mut game = CheckersGame::with_board(GameSettings::default(), board, Player::One);
    play(&mut game, (1, 1), (3, 3));
    assert!(game.state().is_game_over());

    game.trigger_undo();
    assert!(matches!(game.state(), GameState::PieceMovingUndo { .. }));
    settle(&mut game);
    assert!(matches!(
        game.state(),
        GameState::PieceSelected {
            player: Player::One,
            ..
        }
    ));
}

// ============================================================================
// Replay
// ============================================================================

#[test]
fn test_replay_without_history_is_noop() {
    let mut game = CheckersGame::default();
    game.trigger_replay();
    assert!(matches!(game.state(), GameState::PlayerTurn { .. }));
}

#[test]
fn test_replay_reproduces_game() {
    //! Replay rewinds to the start layout, walks every piece home and
    //! replays the recorded moves in order
    let mut game = exchange_game();
    let final_cells = *game.board().cells();
    let final_scores = [game.board().score(Player::One), game.board().score(Player::Two)];

    game.trigger_replay();
    match game.state() {
        GameState::BeginFilm { total, .. } => assert_eq!(*total, 4),
        other => panic!("expected BeginFilm, got {}", other.name()),
    }
    assert_eq!(game.board().cells(), BoardModel::new().cells());
    assert!(game.pieces().matches_board(game.board()));

    let mut seen_film = Vec::new();
    let mut t = game.now();
    for _ in 0..400 {
        if !is_animating(game.state()) {
            break;
        }
        if let GameState::Film { index, .. } = game.state() {
            if seen_film.last() != Some(index) {
                seen_film.push(*index);
            }
        }
        t += 0.1;
        game.update(t);
    }

    assert_eq!(seen_film, vec![0, 1, 2, 3]);
    assert!(matches!(game.state(), GameState::PlayerTurn { player: Player::One, .. }));
    assert_eq!(game.board().cells(), &final_cells);
    assert_eq!(
        [game.board().score(Player::One), game.board().score(Player::Two)],
        final_scores
    );
    assert!(game.pieces().matches_board(game.board()));
}

#[test]
fn test_replay_keeps_redo_history() {
    let mut game = exchange_game();
    game.trigger_undo();
    settle(&mut game);
    game.select_piece(6, 6);
    assert!(matches!(game.state(), GameState::PlayerTurn { player: Player::Two, .. }));

    game.trigger_replay();
    settle(&mut game);

    assert_eq!(game.board().previous_moves().len(), 3);
    assert_eq!(game.board().next_moves().len(), 1, "Undone move stays redoable");
}

#[test]
fn test_replay_through_capture_chain() {
    let mut game = double_capture_game();
    play(&mut game, (1, 1), (3, 3));
    play(&mut game, (3, 3), (5, 5));
    let final_cells = *game.board().cells();

    game.trigger_replay();
    settle(&mut game);

    assert!(matches!(game.state(), GameState::PlayerTurn { player: Player::Two, .. }));
    assert_eq!(game.board().cells(), &final_cells);
    assert!(game.pieces().matches_board(game.board()));
}

#[test]
fn test_film_setup_never_stacks_pieces() {
    //! Every planned walk lands on a free cell and the tracker ends up
    //! matching the start layout
    let mut board = BoardModel::new();
    let mut tracker = PieceTracker::from_board(&board);
    for (from, to) in [((2, 2), (3, 3)), ((5, 5), (4, 4)), ((3, 3), (5, 5)), ((6, 6), (4, 4))] {
        let done = board.move_piece(Move::new(from, to)).unwrap();
        tracker.apply(&done).unwrap();
    }
    board.rewind();

    let mut occupied: HashMap<Coord, PieceId> = tracker
        .pieces()
        .iter()
        .filter_map(|p| match p.placement {
            Placement::Board(at) => Some((at, p.id)),
            Placement::Discard(_) => None,
        })
        .collect();

    let steps = plan_film_setup(&mut tracker, &board);
    assert!(!steps.is_empty());
    for step in &steps {
        if let Placement::Board(from) = step.from {
            assert_eq!(occupied.remove(&from), Some(step.piece));
        }
        if let Placement::Board(to) = step.to {
            assert!(
                occupied.insert(to, step.piece).is_none(),
                "{:?} walked onto an occupied cell {to:?}",
                step.piece
            );
        }
    }
    assert!(tracker.matches_board(&board));
    assert_eq!(tracker.discarded(Player::One).count(), 0);
    assert_eq!(tracker.discarded(Player::Two).count(), 0);
}

#[test]
fn test_film_setup_keeps_pieces_at_home() {
    let board = BoardModel::new();
    let mut tracker = PieceTracker::from_board(&board);
    assert!(plan_film_setup(&mut tracker, &board).is_empty());
}

// ============================================================================
// Tracker, poses and picking
// ============================================================================

#[test]
fn test_tracker_discards_and_restores() {
    let mut board = board_with(&[
        ((1, 1), Piece::man(Player::One)),
        ((2, 2), Piece::man(Player::Two)),
        ((6, 6), Piece::man(Player::Two)),
    ]);
    let mut tracker = PieceTracker::from_board(&board);
    let victim = tracker.at((2, 2)).unwrap().id;

    let done = board.move_piece(Move::new((1, 1), (3, 3))).unwrap();
    let motion = tracker.apply(&done).unwrap();
    let captured = motion.captured.expect("capture recorded");
    assert_eq!(captured.piece, victim);
    assert_eq!(captured.to, Placement::Discard(0));
    assert_eq!(tracker.next_discard_slot(Player::Two), 1);

    let undone = board.undo().unwrap();
    tracker.revert(&undone).unwrap();
    assert_eq!(tracker.get(victim).unwrap().placement, Placement::Board((2, 2)));
    assert!(tracker.matches_board(&board));
}

#[test]
fn test_piece_position_mid_animation() {
    //! A moving piece is between its cells and lifted off the board
    let mut game = CheckersGame::default();
    let id = game.pieces().at((2, 2)).unwrap().id;
    game.select_piece(2, 2);
    game.select_tile(3, 3);

    let duration = game.settings().move_animation_secs;
    let mid = game.piece_position(id, duration / 2.0).unwrap();
    assert!(mid.x > 2.0 && mid.x < 3.0);
    assert!(mid.z > 2.0 && mid.z < 3.0);
    assert!(mid.y > 0.0, "Piece should hop");

    game.update(duration + 0.01);
    let rest = game.piece_position(id, duration + 0.01).unwrap();
    assert_eq!(rest, bevy::math::Vec3::new(3.0, 0.0, 3.0));
}

#[test]
fn test_captured_piece_rests_in_discard_area() {
    let game = exchange_game();
    let discarded: Vec<_> = game.pieces().discarded(Player::Two).collect();
    assert_eq!(discarded.len(), 1);

    let position = game.piece_position(discarded[0].id, game.now()).unwrap();
    assert!(position.x > 8.0, "Player 2 discards sit right of the board");
}

#[test]
fn test_handle_pick_routes_to_selection() {
    let mut game = CheckersGame::default();
    let id = game.pieces().at((2, 2)).unwrap().id;

    game.handle_pick(&PickTarget::Piece(id.0)).unwrap();
    assert!(matches!(game.state(), GameState::PieceSelected { piece: (2, 2), .. }));

    game.handle_pick(&PickTarget::Tile { x: 3, y: 3 }).unwrap();
    assert!(matches!(game.state(), GameState::PieceMoving { .. }));
}

#[test]
fn test_handle_pick_errors() {
    let mut game = CheckersGame::default();

    assert!(matches!(
        game.handle_pick(&PickTarget::Piece(200)),
        Err(GameError::UnknownPiece { id: 200 })
    ));
    assert!(matches!(
        game.handle_pick(&PickTarget::Component("board".to_string())),
        Err(GameError::UnroutablePick { .. })
    ));
}

#[test]
fn test_scoreboard_display() {
    let game = exchange_game();
    let scoreboard = game.scoreboard();

    assert_eq!(scoreboard.score(Player::One), 1);
    assert_eq!(scoreboard.score(Player::Two), 1);
    assert_eq!(scoreboard.current_player, Some(Player::One));
    assert!(scoreboard.to_string().starts_with("P1 1 - 1 P2 | Player 1"));
}

#[test]
fn test_restart_resets_everything() {
    let mut game = exchange_game();
    game.restart(100.0);

    assert_eq!(game.board(), &BoardModel::new());
    assert_eq!(game.pieces(), &PieceTracker::default());
    assert!(matches!(game.state(), GameState::PlayerTurn { player: Player::One, .. }));
    let limit = game.settings().turn_time_limit_secs;
    assert_eq!(game.state().remaining_time(100.0), Some(limit));
}

#[test]
fn test_king_kind_survives_tracker() {
    let mut board = board_with(&[
        ((5, 5), Piece::man(Player::One)),
        ((0, 6), Piece::man(Player::Two)),
    ]);
    let mut tracker = PieceTracker::from_board(&board);
    let done = board.move_piece(Move::new((5, 5), (6, 6))).unwrap();
    tracker.apply(&done).unwrap();
    let done = board.move_piece(Move::new((0, 6), (1, 5))).unwrap();
    tracker.apply(&done).unwrap();
    let done = board.move_piece(Move::new((6, 6), (7, 7))).unwrap();
    let motion = tracker.apply(&done).unwrap();

    assert_eq!(motion.kind_change, Some(PieceKind::King));
    assert_eq!(tracker.at((7, 7)).unwrap().kind, PieceKind::King);
    assert!(tracker.matches_board(&board));
}
