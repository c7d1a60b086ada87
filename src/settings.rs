//! Game settings and tunables
//!
//! Loaded from an optional JSON file. Every field has a default, so a config
//! file only needs to name the values it changes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Default location of the player sprite, relative to the working directory
pub const DEFAULT_SPRITE_PATH: &str = "assets/player.txt";

/// A world configuration that would produce an ill-formed game
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("min_spacing ({min}) is greater than max_spacing ({max})")]
    SpacingRange { min: f32, max: f32 },
    #[error("min_spacing ({min}) must be below max_jump_height ({jump}) or no platform can ever be placed")]
    UnreachableSpacing { min: f32, jump: f32 },
    #[error("first_platform_gap ({gap}) exceeds max_jump_height ({jump})")]
    UnreachableStart { gap: f32, jump: f32 },
    #[error("spawn_inset ({inset}) leaves no room for a {platform}-wide platform")]
    NoSpawnRoom { inset: f32, platform: f32 },
    #[error("scroll_trigger_y ({0}) must lie inside the screen")]
    TriggerOutsideScreen(f32),
    #[error("min_visible_platforms must be at least 1")]
    NoVisiblePlatforms,
    #[error("breakable_chance ({0}) must be within [0, 1]")]
    BreakableChance(f64),
}

/// Errors while loading settings from disk
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid world config: {0}")]
    Invalid(#[from] ConfigError),
}

/// Everything that shapes gameplay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub screen_width: f32,
    pub screen_height: f32,

    // === Actor ===
    pub actor_width: f32,
    pub actor_height: f32,
    pub gravity: f32,
    pub jump_force: f32,
    pub move_step: f32,

    // === Platforms ===
    pub platform_width: f32,
    pub platform_height: f32,
    pub landing_tolerance: f32,

    // === Scrolling ===
    pub scroll_trigger_y: f32,
    pub prune_margin: f32,

    // === Spawner ===
    pub min_spacing: f32,
    pub max_spacing: f32,
    pub max_jump_height: f32,
    pub min_visible_platforms: usize,
    pub spawn_inset: f32,
    pub guaranteed_normal_spawns: u32,
    pub breakable_chance: f64,

    // === New game layout ===
    pub start_platform_x: f32,
    pub start_platform_y: f32,
    pub first_platform_gap: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            actor_width: ACTOR_WIDTH,
            actor_height: ACTOR_HEIGHT,
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            move_step: MOVE_STEP,

            platform_width: PLATFORM_WIDTH,
            platform_height: PLATFORM_HEIGHT,
            landing_tolerance: LANDING_TOLERANCE,

            scroll_trigger_y: SCROLL_TRIGGER_Y,
            prune_margin: PRUNE_MARGIN,

            min_spacing: MIN_PLATFORM_SPACING,
            max_spacing: MAX_PLATFORM_SPACING,
            max_jump_height: MAX_JUMP_HEIGHT,
            min_visible_platforms: MIN_VISIBLE_PLATFORMS,
            spawn_inset: SPAWN_INSET,
            guaranteed_normal_spawns: GUARANTEED_NORMAL_SPAWNS,
            breakable_chance: BREAKABLE_CHANCE,

            start_platform_x: START_PLATFORM_X,
            start_platform_y: START_PLATFORM_Y,
            first_platform_gap: FIRST_PLATFORM_GAP,
        }
    }
}

impl WorldConfig {
    /// Reject configurations the simulation can't run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("actor_width", self.actor_width),
            ("actor_height", self.actor_height),
            ("gravity", self.gravity),
            ("jump_force", self.jump_force),
            ("platform_width", self.platform_width),
            ("platform_height", self.platform_height),
            ("min_spacing", self.min_spacing),
            ("max_jump_height", self.max_jump_height),
        ];
        for (field, value) in positive {
            // Written this way so NaN is rejected too
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        if self.min_spacing > self.max_spacing {
            return Err(ConfigError::SpacingRange {
                min: self.min_spacing,
                max: self.max_spacing,
            });
        }
        if self.min_spacing >= self.max_jump_height {
            return Err(ConfigError::UnreachableSpacing {
                min: self.min_spacing,
                jump: self.max_jump_height,
            });
        }
        if self.first_platform_gap > self.max_jump_height {
            return Err(ConfigError::UnreachableStart {
                gap: self.first_platform_gap,
                jump: self.max_jump_height,
            });
        }
        if self.spawn_x_range().is_none() {
            return Err(ConfigError::NoSpawnRoom {
                inset: self.spawn_inset,
                platform: self.platform_width,
            });
        }
        if !(self.scroll_trigger_y > 0.0 && self.scroll_trigger_y < self.screen_height) {
            return Err(ConfigError::TriggerOutsideScreen(self.scroll_trigger_y));
        }
        if self.min_visible_platforms == 0 {
            return Err(ConfigError::NoVisiblePlatforms);
        }
        if !(0.0..=1.0).contains(&self.breakable_chance) {
            return Err(ConfigError::BreakableChance(self.breakable_chance));
        }
        Ok(())
    }

    /// Inclusive range of left edges a spawned platform may take, if any
    pub fn spawn_x_range(&self) -> Option<(f32, f32)> {
        let lo = self.spawn_inset;
        let hi = self.screen_width - self.spawn_inset - self.platform_width;
        (lo >= 0.0 && lo <= hi).then_some((lo, hi))
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Gameplay tunables
    pub world: WorldConfig,
    /// Milliseconds between simulation ticks
    pub tick_interval_ms: u64,
    /// Text-art sprite for the player
    pub sprite_path: PathBuf,
    /// Write logs here instead of stderr
    pub log_file: Option<PathBuf>,
    /// Fixed RNG seed (random when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            tick_interval_ms: TICK_INTERVAL_MS,
            sprite_path: PathBuf::from(DEFAULT_SPRITE_PATH),
            log_file: None,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.tick_interval_ms = settings.tick_interval_ms.max(1);
        settings.world.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings if the file exists, otherwise use defaults
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::info!("No settings at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}
