//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::settings::{ConfigError, WorldConfig};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Nothing started yet
    Idle,
    /// Active gameplay
    Playing,
    /// Actor fell off the screen; needs a new game
    GameOver,
}

/// Logical player actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
}

/// Things that happened during a tick, drained by the front end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Landed { platform_id: u32 },
    PlatformBroken { platform_id: u32 },
    Scrolled { dy: f32, score: u64 },
    PlatformsSpawned { count: usize },
    GameOver { score: u64 },
}

/// Per-actor physics constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActorPhysics {
    pub gravity: f32,
    pub jump_force: f32,
    pub move_step: f32,
}

impl ActorPhysics {
    pub fn from_config(config: &WorldConfig) -> Self {
        Self {
            gravity: config.gravity,
            jump_force: config.jump_force,
            move_step: config.move_step,
        }
    }
}

/// The player-controlled entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// Top-left corner
    pub pos: Vec2,
    /// Vertical velocity (positive = falling)
    pub vy: f32,
    pub grounded: bool,
    pub size: Vec2,
    pub physics: ActorPhysics,
}

impl Actor {
    pub fn new(pos: Vec2, size: Vec2, physics: ActorPhysics) -> Self {
        Self {
            pos,
            vy: 0.0,
            grounded: false,
            size,
            physics,
        }
    }

    /// Apply gravity and integrate position. Only advances while airborne.
    pub fn update(&mut self) {
        if !self.grounded {
            self.vy += self.physics.gravity;
            self.pos.y += self.vy;
        }
    }

    /// Launch upward; no-op unless grounded
    pub fn jump(&mut self) {
        if self.grounded {
            self.vy = -self.physics.jump_force;
            self.grounded = false;
        }
    }

    pub fn move_left(&mut self) {
        self.pos.x -= self.physics.move_step;
    }

    pub fn move_right(&mut self) {
        self.pos.x += self.physics.move_step;
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Platform variants and their per-variant state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlatformKind {
    #[default]
    Normal,
    /// Bounces the actor once, then disappears
    Breakable { used: bool },
}

/// A landing surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: PlatformKind,
}

impl Platform {
    pub fn new(id: u32, pos: Vec2, size: Vec2, kind: PlatformKind) -> Self {
        Self { id, pos, size, kind }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// React to the actor landing on this platform.
    ///
    /// Returns `true` while the platform should stay in the world. The caller
    /// has already snapped the actor onto the platform and grounded it.
    pub fn on_land(&mut self, actor: &mut Actor) -> bool {
        match &mut self.kind {
            PlatformKind::Normal => true,
            PlatformKind::Breakable { used } => {
                if !*used {
                    *used = true;
                    actor.jump();
                }
                false
            }
        }
    }

    /// Consumed breakables are no longer drawn
    pub fn is_drawn(&self) -> bool {
        match self.kind {
            PlatformKind::Normal => true,
            PlatformKind::Breakable { used } => !used,
        }
    }

    pub fn is_breakable(&self) -> bool {
        matches!(self.kind, PlatformKind::Breakable { .. })
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub config: WorldConfig,
    pub phase: GamePhase,
    pub actor: Actor,
    /// Live platforms in spawn order
    pub platforms: Vec<Platform>,
    /// Platforms spawned this game (never decreases)
    pub platforms_spawned: u32,
    /// Y coordinate of the next spawned platform
    pub spawn_cursor_y: f32,
    /// Total distance scrolled
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create an idle game. Call `start_new_game` to begin playing.
    pub fn new(config: WorldConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let actor = Actor::new(
            Vec2::ZERO,
            Vec2::new(config.actor_width, config.actor_height),
            ActorPhysics::from_config(&config),
        );
        Ok(Self {
            seed,
            phase: GamePhase::Idle,
            actor,
            platforms: Vec::new(),
            platforms_spawned: 0,
            spawn_cursor_y: 0.0,
            score: 0,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            config,
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Apply a player action immediately. Ignored unless playing.
    pub fn apply_action(&mut self, action: Action) {
        if self.phase != GamePhase::Playing {
            return;
        }
        match action {
            Action::MoveLeft => self.actor.move_left(),
            Action::MoveRight => self.actor.move_right(),
        }
    }

    /// Platforms counted towards `min_visible_platforms`.
    ///
    /// This is not the on-screen count: every platform whose top is at or above
    /// the bottom edge is stocked, including those queued above the top edge.
    /// Platforms below the bottom edge wait to be pruned and don't count.
    pub fn stocked_platform_count(&self) -> usize {
        let bottom = self.config.screen_height;
        self.platforms.iter().filter(|p| p.pos.y <= bottom).count()
    }

    pub fn platform(&self, id: u32) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.id == id)
    }

    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }
}
