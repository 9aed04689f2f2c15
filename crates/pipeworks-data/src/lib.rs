//! Data-driven configuration for Pipeworks.
//!
//! Reads `game.config.{json,ron,toml}`, resolves it into
//! [`pipeworks_core::config::SimulationConfig`], and keeps presentation
//! settings alongside for the renderer.

pub mod loader;
pub mod schema;

pub use loader::{
    DataLoadError, GameConfig, PresentationConfig, load_game_config, load_game_config_dir,
};
