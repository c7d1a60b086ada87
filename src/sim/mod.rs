//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or terminal dependencies

pub mod collision;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{is_landing, snap_onto, wrap_horizontal};
pub use rect::Rect;
pub use spawn::{sample_spacing, spawn_random, start_new_game, top_up};
pub use state::{
    Action, Actor, ActorPhysics, GameEvent, GamePhase, GameState, Platform, PlatformKind,
};
pub use tick::tick;
