//! Procedural platform generation and new-game setup

use glam::Vec2;
use rand::Rng;

use super::state::{Actor, ActorPhysics, GameEvent, GamePhase, GameState, Platform, PlatformKind};
use crate::settings::WorldConfig;

/// Pick a vertical gap between consecutive platforms.
///
/// Uniform over `[min_spacing, max_spacing]` conditioned on the gap being
/// reachable with a single jump, drawn directly from the clipped range (the
/// same distribution as redrawing until a gap fits). `WorldConfig::validate`
/// guarantees the clipped range is non-empty.
pub fn sample_spacing<R: Rng>(rng: &mut R, config: &WorldConfig) -> f32 {
    let max = config.max_spacing.min(config.max_jump_height);
    rng.random_range(config.min_spacing..=max)
}

/// Choose the variant of the next spawned platform
fn choose_kind(state: &mut GameState) -> PlatformKind {
    if state.platforms_spawned < state.config.guaranteed_normal_spawns {
        PlatformKind::Normal
    } else if state.rng.random_bool(state.config.breakable_chance) {
        PlatformKind::Breakable { used: false }
    } else {
        PlatformKind::Normal
    }
}

/// Spawn one platform at the spawn cursor and advance the cursor upward.
///
/// Returns the new platform's ID.
pub fn spawn_random(state: &mut GameState) -> u32 {
    spawn(state, None)
}

fn spawn(state: &mut GameState, kind: Option<PlatformKind>) -> u32 {
    let (x_min, x_max) = state.config.spawn_x_range().unwrap_or((0.0, 0.0));
    let x = state.rng.random_range(x_min..=x_max);
    let spacing = sample_spacing(&mut state.rng, &state.config);
    let y = state.spawn_cursor_y;

    let kind = match kind {
        Some(kind) => kind,
        None => choose_kind(state),
    };

    let id = state.next_entity_id();
    let size = Vec2::new(state.config.platform_width, state.config.platform_height);
    state.platforms.push(Platform::new(id, Vec2::new(x, y), size, kind));
    state.platforms_spawned += 1;
    state.spawn_cursor_y -= spacing;

    log::debug!("Spawned platform {} ({:?}) at ({:.0}, {:.0})", id, kind, x, y);
    id
}

/// Spawn platforms until the visible count reaches the configured minimum.
///
/// Returns how many were spawned.
pub fn top_up(state: &mut GameState) -> usize {
    // A spawn below the bottom edge would not count and the loop would never end
    state.spawn_cursor_y = state.spawn_cursor_y.min(state.config.screen_height);

    let mut spawned = 0;
    while state.stocked_platform_count() < state.config.min_visible_platforms {
        spawn_random(state);
        spawned += 1;
    }
    spawned
}

/// Reset everything and enter `Playing`.
///
/// Places a normal start platform with the actor centered on top of it, then
/// fills the screen above it with normal platforms.
pub fn start_new_game(state: &mut GameState) {
    state.platforms.clear();
    state.events.clear();
    state.platforms_spawned = 0;
    state.score = 0;
    state.time_ticks = 0;

    let config = state.config.clone();
    let start_pos = Vec2::new(config.start_platform_x, config.start_platform_y);
    let platform_size = Vec2::new(config.platform_width, config.platform_height);
    let start_id = state.next_entity_id();
    state
        .platforms
        .push(Platform::new(start_id, start_pos, platform_size, PlatformKind::Normal));
    state.platforms_spawned += 1;

    let actor_size = Vec2::new(config.actor_width, config.actor_height);
    let mut actor = Actor::new(
        Vec2::new(
            start_pos.x + (platform_size.x - actor_size.x) / 2.0,
            start_pos.y - actor_size.y,
        ),
        actor_size,
        ActorPhysics::from_config(&config),
    );
    actor.grounded = true;
    state.actor = actor;

    state.spawn_cursor_y = start_pos.y - config.first_platform_gap;
    for _ in 1..config.min_visible_platforms {
        spawn(state, Some(PlatformKind::Normal));
    }

    state.phase = GamePhase::Playing;
    state.events.push(GameEvent::PlatformsSpawned {
        count: state.platforms.len(),
    });
    log::info!(
        "New game (seed {}) with {} platforms",
        state.seed,
        state.platforms.len()
    );
}
