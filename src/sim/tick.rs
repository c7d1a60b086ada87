//! Fixed timestep simulation tick
//!
//! Per tick: integrate the actor, wrap it horizontally, resolve landings,
//! scroll the world, then check for the actor falling off the bottom.

use super::collision::{is_landing, snap_onto, wrap_horizontal};
use super::spawn::top_up;
use super::state::{GameEvent, GamePhase, GameState};

/// Advance the game state by one tick. Does nothing unless playing.
pub fn tick(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    state.actor.grounded = false;
    state.actor.update();
    wrap_horizontal(&mut state.actor, state.config.screen_width);

    resolve_landings(state);
    resolve_scroll(state);

    if state.actor.pos.y > state.config.screen_height {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { score: state.score });
        log::info!(
            "Game over after {} ticks, score {}",
            state.time_ticks,
            state.score
        );
    }
}

/// Test every live platform against the actor's bounds from before this pass.
///
/// Every hit is applied, so overlapping platforms can each trigger in the same tick.
fn resolve_landings(state: &mut GameState) {
    let actor_bounds = state.actor.bounds();
    let vy = state.actor.vy;
    let tolerance = state.config.landing_tolerance;

    let mut removed = Vec::new();
    for platform in state.platforms.iter_mut() {
        let bounds = platform.bounds();
        if !is_landing(&actor_bounds, vy, &bounds, tolerance) {
            continue;
        }

        snap_onto(&mut state.actor, &bounds);
        state.events.push(GameEvent::Landed {
            platform_id: platform.id,
        });

        if !platform.on_land(&mut state.actor) {
            removed.push(platform.id);
            state.events.push(GameEvent::PlatformBroken {
                platform_id: platform.id,
            });
        }
    }

    if removed.len() > 1 {
        log::debug!("Removed {} platforms in one tick", removed.len());
    }
    if !removed.is_empty() {
        state.platforms.retain(|p| !removed.contains(&p.id));
    }
}

/// Keep the actor pinned at the trigger line by moving the world down
fn resolve_scroll(state: &mut GameState) {
    let trigger = state.config.scroll_trigger_y;
    if state.actor.pos.y >= trigger {
        return;
    }

    let dy = trigger - state.actor.pos.y;
    state.actor.pos.y = trigger;
    for platform in &mut state.platforms {
        platform.pos.y += dy;
    }
    state.spawn_cursor_y += dy;
    state.score += dy as u64;
    state.events.push(GameEvent::Scrolled {
        dy,
        score: state.score,
    });

    let cutoff = state.config.screen_height + state.config.prune_margin;
    state.platforms.retain(|p| p.pos.y <= cutoff);

    let spawned = top_up(state);
    if spawned > 0 {
        state.events.push(GameEvent::PlatformsSpawned { count: spawned });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::WorldConfig;
    use crate::sim::spawn::start_new_game;
    use crate::sim::state::{Platform, PlatformKind};
    use glam::Vec2;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(WorldConfig::default(), seed).unwrap();
        start_new_game(&mut state);
        state.events.clear();
        state
    }

    fn add_platform(state: &mut GameState, x: f32, y: f32, kind: PlatformKind) -> u32 {
        let id = state.next_entity_id();
        state
            .platforms
            .push(Platform::new(id, Vec2::new(x, y), Vec2::new(80.0, 15.0), kind));
        id
    }

    #[test]
    fn test_idle_and_game_over_do_not_tick() {
        let mut state = GameState::new(WorldConfig::default(), 1).unwrap();
        tick(&mut state);
        assert_eq!(state.time_ticks, 0);

        let mut state = playing(1);
        state.phase = GamePhase::GameOver;
        let y = state.actor.pos.y;
        tick(&mut state);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.actor.pos.y, y);
    }

    #[test]
    fn test_actor_rests_on_start_platform() {
        let mut state = playing(2);
        let start_y = state.actor.pos.y;
        for _ in 0..120 {
            tick(&mut state);
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.actor.pos.y, start_y);
        assert!(state.actor.grounded);
        assert_eq!(state.actor.vy, 0.0);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_actor_falls_when_walking_off_platform() {
        let mut state = playing(3);
        state.platforms.truncate(1);
        state.actor.pos.x = 0.0; // right edge 70, start platform begins at 150
        tick(&mut state);
        assert!(!state.actor.grounded);
        assert_eq!(state.actor.vy, 0.5);
    }

    #[test]
    fn test_breakable_launches_and_disappears() {
        let mut state = playing(4);
        state.platforms.clear();
        let id = add_platform(&mut state, 100.0, 500.0, PlatformKind::Breakable { used: false });
        // After gravity: vy 2.5, bottom edge at 501.5
        state.actor.pos = Vec2::new(110.0, 429.0);
        state.actor.vy = 2.0;
        state.actor.grounded = false;

        tick(&mut state);

        assert!(state.platform(id).is_none());
        assert_eq!(state.actor.vy, -14.0);
        assert!(!state.actor.grounded);
        assert_eq!(state.actor.pos.y, 430.0);
        assert!(state.events.contains(&GameEvent::Landed { platform_id: id }));
        assert!(
            state
                .events
                .contains(&GameEvent::PlatformBroken { platform_id: id })
        );
    }

    #[test]
    fn test_overlapping_platforms_both_trigger() {
        let mut state = playing(5);
        state.platforms.clear();
        let breakable = add_platform(&mut state, 100.0, 500.0, PlatformKind::Breakable { used: false });
        let normal = add_platform(&mut state, 120.0, 502.0, PlatformKind::Normal);
        // After gravity: vy 1.5, bottom edge at 503, inside both landing bands
        state.actor.pos = Vec2::new(110.0, 431.5);
        state.actor.vy = 1.0;
        state.actor.grounded = false;

        tick(&mut state);

        let landed: Vec<_> = state
            .events
            .iter()
            .filter_map(|e| match e {
                GameEvent::Landed { platform_id } => Some(*platform_id),
                _ => None,
            })
            .collect();
        assert_eq!(landed, vec![breakable, normal]);
        // The later normal landing wins the final position and cancels the bounce
        assert!(state.platform(breakable).is_none());
        assert!(state.platform(normal).is_some());
        assert_eq!(state.actor.bounds().bottom(), 502.0);
        assert!(state.actor.grounded);
        assert_eq!(state.actor.vy, 0.0);
    }

    #[test]
    fn test_scroll_pins_actor_and_moves_world() {
        let mut state = playing(6);
        let platform_ys: Vec<f32> = state.platforms.iter().map(|p| p.pos.y).collect();
        let cursor = state.spawn_cursor_y;
        state.actor.pos = Vec2::new(300.0, 200.0);
        state.actor.vy = -10.0;
        state.actor.grounded = false;

        tick(&mut state);

        // Moved up by 9.5 to y = 190.5, then pinned back to 250
        let dy = 250.0 - 190.5;
        assert_eq!(state.actor.pos.y, 250.0);
        assert_eq!(state.score, 59);
        assert_eq!(state.spawn_cursor_y, cursor + dy);
        for (platform, y) in state.platforms.iter().zip(&platform_ys) {
            assert_eq!(platform.pos.y, y + dy);
        }
        assert!(state.stocked_platform_count() >= 12);
    }

    #[test]
    fn test_scroll_prunes_and_respawns() {
        let mut state = playing(7);
        let start_id = state.platforms[0].id;
        state.actor.pos = Vec2::new(300.0, 100.0);
        state.actor.vy = -200.0;
        state.actor.grounded = false;

        tick(&mut state);

        // Start platform moved from 500 past 650 and was pruned
        assert!(state.platform(start_id).is_none());
        assert!(state.platforms.iter().all(|p| p.pos.y <= 650.0));
        assert!(state.stocked_platform_count() >= 12);
        assert!(
            state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::PlatformsSpawned { .. }))
        );
    }

    #[test]
    fn test_score_truncates_each_step() {
        let mut state = playing(8);
        state.platforms.clear();
        state.actor.grounded = false;
        // Gravity cancels the velocity, so the actor stays at 249.1 and scrolls by 0.9
        state.actor.pos.y = 249.1;
        state.actor.vy = -0.5;
        tick(&mut state);
        assert_eq!(state.score, 0);
        assert_eq!(state.actor.pos.y, 250.0);
    }

    #[test]
    fn test_falling_off_screen_ends_game() {
        let mut state = playing(9);
        state.platforms.clear();
        state.actor.pos.y = 599.0;
        state.actor.vy = 5.0;
        state.actor.grounded = false;
        state.score = 123;

        tick(&mut state);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.events.last(), Some(&GameEvent::GameOver { score: 123 }));

        // Terminal until a new game is started
        tick(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        start_new_game(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_wrap_during_tick() {
        let mut state = playing(10);
        state.actor.pos.x = -75.0;
        tick(&mut state);
        assert_eq!(state.actor.pos.x, 400.0);
    }

    #[test]
    fn test_determinism() {
        let mut a = playing(12345);
        let mut b = playing(12345);
        for state in [&mut a, &mut b] {
            state.actor.pos = Vec2::new(200.0, 100.0);
            state.actor.vy = -150.0;
            state.actor.grounded = false;
            for _ in 0..200 {
                tick(state);
            }
        }

        assert_eq!(a.score, b.score);
        assert_eq!(a.platforms.len(), b.platforms.len());
        for (pa, pb) in a.platforms.iter().zip(&b.platforms) {
            assert_eq!(pa.pos, pb.pos);
            assert_eq!(pa.kind, pb.kind);
        }
    }
}
