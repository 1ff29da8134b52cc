//! Core module - settings and their persistence
//!
//! - [`GameSettings`] - turn clocks, draw threshold and animation durations
//! - [`settings_persistence`] - JSON load/save in the platform config directory
//! - [`CoreError`] - settings I/O, serialization and validation failures

pub mod error;
pub mod settings;
pub mod settings_persistence;

pub use error::{CoreError, CoreResult};
pub use settings::GameSettings;
pub use settings_persistence::{load_settings, load_settings_from, save_settings, save_settings_to, settings_path};
