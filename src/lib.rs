pub mod animation;
pub mod core;
pub mod game;
pub mod scene;

pub use crate::core::GameSettings;
pub use game::{CheckersGame, CheckersPlugin};
pub use scene::SceneGraph;
