//! Scoreboard snapshot for the UI

use checkers_engine::Player;
use std::fmt;

/// Scores and turn status at one instant
#[derive(Clone, Debug, PartialEq)]
pub struct Scoreboard {
    /// Pieces captured by each player, indexed by [`Player::index`]
    pub scores: [u32; 2],
    pub current_player: Option<Player>,
    /// Seconds left on the running turn clock
    pub remaining_time: Option<f64>,
    pub game_over: bool,
    /// Set when the game is over and not drawn
    pub winner: Option<Player>,
}

impl Scoreboard {
    pub fn score(&self, player: Player) -> u32 {
        self.scores[player.index()]
    }

    pub fn is_draw(&self) -> bool {
        self.game_over && self.winner.is_none()
    }
}

impl fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P1 {} - {} P2",
            self.score(Player::One),
            self.score(Player::Two)
        )?;
        if self.game_over {
            return match self.winner {
                Some(winner) => write!(f, " | {winner} wins"),
                None => write!(f, " | draw"),
            };
        }
        if let Some(player) = self.current_player {
            write!(f, " | {player}")?;
        }
        if let Some(remaining) = self.remaining_time {
            write!(f, " ({remaining:.1}s)")?;
        }
        Ok(())
    }
}
