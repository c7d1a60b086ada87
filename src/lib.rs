//! Doodle Jump - a single-screen vertical platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, landings, scrolling, spawning)
//! - `renderer`: Terminal rendering of the playfield
//! - `platform`: Terminal input mapping
//! - `settings`: Tunables and front-end preferences

pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::{ConfigError, Settings, SettingsError, WorldConfig};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (screen units, y grows downward)
    pub const SCREEN_WIDTH: f32 = 400.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Fixed tick interval (~60 Hz)
    pub const TICK_INTERVAL_MS: u64 = 16;

    /// Actor defaults
    pub const ACTOR_WIDTH: f32 = 70.0;
    pub const ACTOR_HEIGHT: f32 = 70.0;
    /// Downward acceleration per tick while airborne
    pub const GRAVITY: f32 = 0.5;
    /// Upward velocity set by a jump
    pub const JUMP_FORCE: f32 = 14.0;
    /// Horizontal translation per move action
    pub const MOVE_STEP: f32 = 5.0;

    /// Platform defaults
    pub const PLATFORM_WIDTH: f32 = 80.0;
    pub const PLATFORM_HEIGHT: f32 = 15.0;

    /// The actor is pinned to this line while the world scrolls
    pub const SCROLL_TRIGGER_Y: f32 = 250.0;
    /// Extra slack below the platform top that still counts as a landing
    pub const LANDING_TOLERANCE: f32 = 5.0;
    /// Platforms this far below the bottom edge are pruned
    pub const PRUNE_MARGIN: f32 = 50.0;

    /// Spawner defaults
    pub const MIN_PLATFORM_SPACING: f32 = 40.0;
    pub const MAX_PLATFORM_SPACING: f32 = 100.0;
    pub const MAX_JUMP_HEIGHT: f32 = 230.0;
    pub const MIN_VISIBLE_PLATFORMS: usize = 12;
    pub const SPAWN_INSET: f32 = 50.0;
    /// Spawns before breakable platforms may appear
    pub const GUARANTEED_NORMAL_SPAWNS: u32 = 8;
    pub const BREAKABLE_CHANCE: f64 = 0.2;

    /// Start platform placement
    pub const START_PLATFORM_X: f32 = 150.0;
    pub const START_PLATFORM_Y: f32 = SCREEN_HEIGHT - 100.0;
    /// Gap between the start platform and the first pre-filled one
    pub const FIRST_PLATFORM_GAP: f32 = 60.0;
}
