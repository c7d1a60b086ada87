//! Terminal rendering module
//!
//! Draws the playfield on a ratatui canvas scaled to the simulation's screen units.

pub mod scene;
pub mod shapes;
pub mod sprite;

pub use scene::{GameOverSummary, render_game, render_game_over};
pub use sprite::{PlayerSprite, Sprite, SpriteError};
