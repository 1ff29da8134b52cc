//! Game Flow Integration Tests
//!
//! Tests for full game flows including:
//! - Turn alternation
//! - Forced capture through the public click API
//! - Pick routing from a rendered scene
//! - Replay after the game ended

use checkers_engine::{BoardModel, Piece, Player};
use xfcheckers::core::GameSettings;
use xfcheckers::game::{CheckersGame, GameState};
use xfcheckers::scene::PickTarget;

/// Advance in 0.1s steps until the game is no longer animating
fn settle(game: &mut CheckersGame) {
    let mut t = game.now();
    for _ in 0..500 {
        match game.state() {
            GameState::PieceMoving { .. }
            | GameState::PieceMovingUndo { .. }
            | GameState::BeginFilm { .. }
            | GameState::Film { .. } => {
                t += 0.1;
                game.update(t);
            }
            _ => return,
        }
    }
    panic!("game stuck in {}", game.state().name());
}

fn click_move(game: &mut CheckersGame, from: (u8, u8), to: (u8, u8)) {
    game.select_piece(from.0, from.1);
    game.select_tile(to.0, to.1);
    settle(game);
}

// ============================================================================
// Turn Alternation Tests
// ============================================================================

#[test]
fn test_turns_alternate() {
    let mut game = CheckersGame::default();
    assert_eq!(game.state().current_player(), Some(Player::One));

    click_move(&mut game, (2, 2), (3, 3));
    assert_eq!(game.state().current_player(), Some(Player::Two));

    click_move(&mut game, (5, 5), (4, 4));
    assert_eq!(game.state().current_player(), Some(Player::One));
    assert_eq!(game.board().previous_moves().len(), 2);
}

#[test]
fn test_player_two_cannot_move_on_player_one_turn() {
    let mut game = CheckersGame::default();

    click_move(&mut game, (5, 5), (4, 4));
    assert_eq!(game.board(), &BoardModel::new());
    assert_eq!(game.state().current_player(), Some(Player::One));
}

// ============================================================================
// Forced Capture Tests
// ============================================================================

#[test]
fn test_quiet_move_refused_when_capture_exists() {
    //! Once a capture is available anywhere, quiet moves are not offered

    let mut game = CheckersGame::default();
    click_move(&mut game, (2, 2), (3, 3));
    click_move(&mut game, (5, 5), (4, 4));

    // (0, 2) could step forward, but (3, 3) must capture
    game.select_piece(0, 2);
    assert!(matches!(game.state(), GameState::PlayerTurn { .. }));
    assert_eq!(game.reject_markers().len(), 1);

    click_move(&mut game, (3, 3), (5, 5));
    assert_eq!(game.scoreboard().score(Player::One), 1);
}

// ============================================================================
// Pick Routing Tests
// ============================================================================

#[test]
fn test_game_driven_by_picks() {
    //! A renderer reports piece and tile picks; the game routes them

    let mut game = CheckersGame::default();
    let piece = game.pieces().at((4, 2)).map(|p| p.id).unwrap();

    game.handle_pick(&PickTarget::Piece(piece.0)).unwrap();
    game.handle_pick(&PickTarget::Tile { x: 5, y: 3 }).unwrap();
    settle(&mut game);

    assert_eq!(game.board().piece_at(5, 3), Some(Piece::man(Player::One)));
    let tracked = game.pieces().get(piece).unwrap();
    assert_eq!(tracked.placement, xfcheckers::game::Placement::Board((5, 3)));
}

// ============================================================================
// End of Game Tests
// ============================================================================

#[test]
fn test_replay_after_timeout_resumes_play() {
    //! A game lost on time can be replayed; play resumes after the last
    //! recorded move with a fresh clock

    let mut game = CheckersGame::default();
    click_move(&mut game, (2, 2), (3, 3));

    let deadline = game.now() + game.settings().turn_time_limit_secs + 1.0;
    game.update(deadline);
    assert_eq!(game.state(), &GameState::GameOver { winner: Some(Player::One) });

    game.trigger_replay();
    assert!(matches!(game.state(), GameState::BeginFilm { total: 1, .. }));
    settle(&mut game);

    assert!(matches!(game.state(), GameState::PlayerTurn { player: Player::Two, .. }));
    let remaining = game.scoreboard().remaining_time.unwrap();
    assert_eq!(remaining, game.settings().turn_time_limit_secs);
}

#[test]
fn test_custom_settings_shorten_turns() {
    let settings = GameSettings {
        turn_time_limit_secs: 3.0,
        ..GameSettings::default()
    };
    let mut game = CheckersGame::new(settings);

    game.update(2.5);
    assert!(!game.state().is_game_over());
    game.update(3.5);
    assert_eq!(game.state(), &GameState::GameOver { winner: Some(Player::Two) });
}

#[test]
fn test_restart_after_game_over() {
    let mut game = CheckersGame::default();
    game.update(100.0);
    assert!(game.state().is_game_over());

    game.restart(100.0);
    assert!(matches!(game.state(), GameState::PlayerTurn { player: Player::One, .. }));
    assert!(!game.scoreboard().game_over);
}
