//! Game plugin
//!
//! Inserts the [`GameSettings`] and [`CheckersGame`] resources and drives
//! them from bevy's clock. Each `Update`, the scene graph (when a
//! [`SceneGraph`] resource exists) samples its keyframe animations, then the
//! game advances its state machine to the same time.
//!
//! # System Organization
//!
//! - [`sync_game_settings`] - push changed settings into the game
//! - [`advance_scene_animations`] - `SceneGraph::update(t)`
//! - [`advance_game`] - `CheckersGame::update(t)`
//!
//! Systems run chained in that order.

use bevy::prelude::*;

use crate::core::GameSettings;
use crate::game::model::CheckersGame;
use crate::scene::SceneGraph;

/// Plugin running a checkers game on bevy's `Update` schedule
#[derive(Debug, Clone, Default)]
pub struct CheckersPlugin {
    pub settings: GameSettings,
}

impl CheckersPlugin {
    pub fn new(settings: GameSettings) -> Self {
        Self { settings }
    }
}

impl Plugin for CheckersPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.settings.clone())
            .insert_resource(CheckersGame::new(self.settings.clone()))
            .add_systems(
                Update,
                (sync_game_settings, advance_scene_animations, advance_game).chain(),
            );
    }
}

/// Copy settings into the game when the resource changed
pub fn sync_game_settings(settings: Res<GameSettings>, mut game: ResMut<CheckersGame>) {
    if settings.is_changed() && game.settings() != settings.as_ref() {
        game.set_settings(settings.clone());
    }
}

pub fn advance_scene_animations(time: Res<Time>, scene: Option<ResMut<SceneGraph>>) {
    if let Some(mut scene) = scene {
        scene.update(time.elapsed_secs_f64());
    }
}

pub fn advance_game(time: Res<Time>, mut game: ResMut<CheckersGame>) {
    game.update(time.elapsed_secs_f64());
}
