//! Shape generation for playfield primitives
//!
//! Converts screen-space geometry (y down) into canvas shapes (y up), clipped
//! to the playfield so partially visible shapes still draw.

use glam::Vec2;
use ratatui::style::Color;
use ratatui::widgets::canvas::{Circle, Rectangle};

use crate::sim::{Actor, Platform, PlatformKind, Rect};

pub const NORMAL_PLATFORM_COLOR: Color = Color::Rgb(135, 206, 235); // sky blue
pub const BREAKABLE_PLATFORM_COLOR: Color = Color::Rgb(205, 92, 92); // indian red
pub const PLACEHOLDER_COLOR: Color = Color::Green;

/// Clip a screen-space rect to the playfield and flip it into canvas space
pub fn canvas_rect(rect: &Rect, screen: Vec2, color: Color) -> Option<Rectangle> {
    let left = rect.left().max(0.0);
    let right = rect.right().min(screen.x);
    let top = rect.top().max(0.0);
    let bottom = rect.bottom().min(screen.y);
    if left >= right || top >= bottom {
        return None;
    }

    Some(Rectangle {
        x: left as f64,
        y: (screen.y - bottom) as f64,
        width: (right - left) as f64,
        height: (bottom - top) as f64,
        color,
    })
}

pub fn platform_color(kind: PlatformKind) -> Color {
    match kind {
        PlatformKind::Normal => NORMAL_PLATFORM_COLOR,
        PlatformKind::Breakable { .. } => BREAKABLE_PLATFORM_COLOR,
    }
}

/// Canvas shape for a platform, or None if it is off-screen or not drawn
pub fn platform_shape(platform: &Platform, screen: Vec2) -> Option<Rectangle> {
    if !platform.is_drawn() {
        return None;
    }
    canvas_rect(&platform.bounds(), screen, platform_color(platform.kind))
}

/// Green circle standing in for a missing sprite
pub fn actor_placeholder(actor: &Actor, screen: Vec2) -> Circle {
    let center = actor.bounds().center();
    Circle {
        x: center.x as f64,
        y: (screen.y - center.y) as f64,
        radius: (actor.size.x.min(actor.size.y) / 2.0) as f64,
        color: PLACEHOLDER_COLOR,
    }
}

/// Canvas position of the first sprite row: centered on the actor, top-aligned.
///
/// `sprite_width` is in canvas units.
pub fn sprite_origin(actor: &Actor, sprite_width: f32, screen: Vec2) -> (f64, f64) {
    let bounds = actor.bounds();
    let x = bounds.center().x - sprite_width / 2.0;
    let y = screen.y - bounds.top();
    (x as f64, y as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::WorldConfig;
    use crate::sim::ActorPhysics;

    const SCREEN: Vec2 = Vec2::new(400.0, 600.0);

    #[test]
    fn test_canvas_rect_flips_y() {
        let rect = Rect::new(Vec2::new(150.0, 500.0), Vec2::new(80.0, 15.0));
        let shape = canvas_rect(&rect, SCREEN, Color::White).unwrap();
        assert_eq!(shape.x, 150.0);
        assert_eq!(shape.y, 85.0);
        assert_eq!(shape.width, 80.0);
        assert_eq!(shape.height, 15.0);
    }

    #[test]
    fn test_canvas_rect_clips() {
        let rect = Rect::new(Vec2::new(-20.0, -5.0), Vec2::new(80.0, 15.0));
        let shape = canvas_rect(&rect, SCREEN, Color::White).unwrap();
        assert_eq!(shape.x, 0.0);
        assert_eq!(shape.width, 60.0);
        assert_eq!(shape.height, 10.0);
        assert_eq!(shape.y, 590.0);

        let above = Rect::new(Vec2::new(10.0, -100.0), Vec2::new(80.0, 15.0));
        assert!(canvas_rect(&above, SCREEN, Color::White).is_none());
    }

    #[test]
    fn test_consumed_breakable_not_drawn() {
        let mut platform = Platform::new(
            1,
            Vec2::new(10.0, 10.0),
            Vec2::new(80.0, 15.0),
            PlatformKind::Breakable { used: false },
        );
        let shape = platform_shape(&platform, SCREEN).unwrap();
        assert_eq!(shape.color, BREAKABLE_PLATFORM_COLOR);

        platform.kind = PlatformKind::Breakable { used: true };
        assert!(platform_shape(&platform, SCREEN).is_none());
    }

    #[test]
    fn test_placeholder_centered_on_actor() {
        let actor = Actor::new(
            Vec2::new(100.0, 200.0),
            Vec2::new(70.0, 70.0),
            ActorPhysics::from_config(&WorldConfig::default()),
        );
        let circle = actor_placeholder(&actor, SCREEN);
        assert_eq!(circle.x, 135.0);
        assert_eq!(circle.y, 365.0);
        assert_eq!(circle.radius, 35.0);

        let (x, y) = sprite_origin(&actor, 30.0, SCREEN);
        assert_eq!(x, 120.0);
        assert_eq!(y, 400.0);
    }
}
