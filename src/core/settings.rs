//! Game settings resource
//!
//! The tunable constants of the game: turn clocks, the draw threshold and
//! every animation duration. They are plain configuration, persisted as JSON
//! by [`crate::core::settings_persistence`].

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::error::{CoreError, CoreResult};

/// Resource holding the game's tunable values
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Seconds a player has to move
    pub turn_time_limit_secs: f64,

    /// Seconds a player has when only one legal move exists
    pub one_move_time_limit_secs: f64,

    /// Consecutive king moves without capture or promotion that end the game in a draw
    pub draw_queen_move_threshold: u32,

    /// Duration of a forward piece move
    pub move_animation_secs: f64,

    /// Duration of an undone piece move
    pub undo_animation_secs: f64,

    /// Duration of each piece relocation before a replay
    pub film_setup_animation_secs: f64,

    /// Duration of the cross shown on a rejected tile
    pub reject_animation_secs: f64,

    /// Period of the selected-piece highlight pulse
    pub highlight_pulse_period_secs: f64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            turn_time_limit_secs: 30.0,
            one_move_time_limit_secs: 10.0,
            draw_queen_move_threshold: 20,
            move_animation_secs: 0.6,
            undo_animation_secs: 0.4,
            film_setup_animation_secs: 0.3,
            reject_animation_secs: 0.5,
            highlight_pulse_period_secs: 1.0,
        }
    }
}

impl GameSettings {
    /// Check every value is usable by the state machine
    pub fn validate(&self) -> CoreResult<()> {
        let durations = [
            ("turn_time_limit_secs", self.turn_time_limit_secs),
            ("one_move_time_limit_secs", self.one_move_time_limit_secs),
            ("move_animation_secs", self.move_animation_secs),
            ("undo_animation_secs", self.undo_animation_secs),
            ("film_setup_animation_secs", self.film_setup_animation_secs),
            ("reject_animation_secs", self.reject_animation_secs),
            ("highlight_pulse_period_secs", self.highlight_pulse_period_secs),
        ];
        for (field, value) in durations {
            if !value.is_finite() || value <= 0.0 {
                return Err(CoreError::InvalidSettings {
                    field,
                    message: format!("must be a positive number of seconds, got {value}"),
                });
            }
        }
        if self.draw_queen_move_threshold == 0 {
            return Err(CoreError::InvalidSettings {
                field: "draw_queen_move_threshold",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Time allowed for a turn given how many legal moves the player has
    pub fn turn_limit(&self, legal_moves: usize) -> f64 {
        if legal_moves == 1 {
            self.one_move_time_limit_secs
        } else {
            self.turn_time_limit_secs
        }
    }
}
