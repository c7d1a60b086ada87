//! Landing detection and screen-edge wrapping
//!
//! Landings are one-way: the actor passes up through platforms and only
//! collides with a platform's top edge while falling.

use super::rect::Rect;
use super::state::Actor;

/// Check whether an actor with the given bounds and vertical velocity lands on a platform.
///
/// The actor must be falling with its bottom edge inside a thin band starting at
/// the platform top. The band is `vy + tolerance` deep so a fast fall that overshoots
/// the top edge within one tick still counts.
pub fn is_landing(actor: &Rect, vy: f32, platform: &Rect, tolerance: f32) -> bool {
    let vertical_hit = vy > 0.0
        && actor.bottom() >= platform.top()
        && actor.bottom() <= platform.top() + vy + tolerance;

    vertical_hit && actor.overlaps_horizontally(platform)
}

/// Rest the actor on top of a platform
pub fn snap_onto(actor: &mut Actor, platform: &Rect) {
    actor.pos.y = platform.top() - actor.size.y;
    actor.vy = 0.0;
    actor.grounded = true;
}

/// Teleport the actor to the opposite side once it is fully off-screen.
///
/// Returns true if the actor wrapped.
pub fn wrap_horizontal(actor: &mut Actor, screen_width: f32) -> bool {
    if actor.pos.x < -actor.size.x {
        actor.pos.x = screen_width;
        true
    } else if actor.pos.x > screen_width {
        actor.pos.x = -actor.size.x;
        true
    } else {
        false
    }
}
