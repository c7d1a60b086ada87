//! Terminal scene: playfield canvas, score readout, status bar and overlays

use glam::Vec2;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, Paragraph,
        canvas::{Canvas, Context},
    },
};

use super::shapes::{actor_placeholder, platform_shape, sprite_origin};
use super::sprite::PlayerSprite;
use crate::sim::GameState;

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f32 = 2.0;

/// What the game-over overlay shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOverSummary {
    pub score: u64,
    /// Leaderboard rank, if the run placed
    pub rank: Option<usize>,
    pub best: Option<u64>,
}

/// Largest bordered rect with the playfield's aspect ratio, centered
/// horizontally, leaving the bottom row for the status bar.
pub fn playfield_area(area: Rect, screen: Vec2) -> Rect {
    let avail_w = area.width.saturating_sub(2) as f32;
    let avail_h = area.height.saturating_sub(3) as f32;
    let cols_per_row = screen.x / screen.y * CELL_ASPECT;

    let mut rows = avail_h;
    let mut cols = (rows * cols_per_row).round();
    if cols > avail_w {
        cols = avail_w;
        rows = (cols / cols_per_row).round().min(avail_h);
    }

    let width = (cols as u16 + 2).min(area.width);
    let height = (rows as u16 + 2).min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y,
        width,
        height,
    }
}

/// Render the running game
pub fn render_game(
    frame: &mut Frame,
    state: &GameState,
    sprite: &PlayerSprite,
    notice: Option<&str>,
) {
    let area = frame.size();
    let screen = Vec2::new(state.config.screen_width, state.config.screen_height);
    let field = playfield_area(area, screen);

    let block = Block::default()
        .title(" Doodle Jump ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(field);
    frame.render_widget(block, field);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let canvas = Canvas::default()
        .x_bounds([0.0, screen.x as f64])
        .y_bounds([0.0, screen.y as f64])
        .paint(|ctx| {
            for platform in &state.platforms {
                if let Some(shape) = platform_shape(platform, screen) {
                    ctx.draw(&shape);
                }
            }
            ctx.layer();
            draw_actor(ctx, state, sprite, screen, inner);
        });
    frame.render_widget(canvas, inner);

    let score = format!("Score: {}", state.score);
    let score_area = Rect {
        width: (score.len() as u16).min(inner.width),
        height: 1,
        ..inner
    };
    frame.render_widget(
        Paragraph::new(Span::styled(
            score,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        score_area,
    );

    if field.bottom() < area.bottom() {
        let status_area = Rect {
            y: field.bottom(),
            height: 1,
            ..field
        };
        render_status_bar(frame, status_area, notice);
    }
}

fn draw_actor(ctx: &mut Context, state: &GameState, sprite: &PlayerSprite, screen: Vec2, inner: Rect) {
    match sprite {
        PlayerSprite::Art(art) => {
            let col_w = screen.x / inner.width as f32;
            let row_h = screen.y / inner.height as f32;
            let (x, y) = sprite_origin(&state.actor, art.width() as f32 * col_w, screen);
            let style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
            for (i, row) in art.rows().iter().enumerate() {
                ctx.print(
                    x,
                    y - i as f64 * row_h as f64,
                    Line::from(Span::styled(row.clone(), style)),
                );
            }
        }
        PlayerSprite::Placeholder => ctx.draw(&actor_placeholder(&state.actor, screen)),
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, notice: Option<&str>) {
    let mut spans = vec![Span::styled(
        "←/A →/D move   Esc quit",
        Style::default().fg(Color::DarkGray),
    )];
    if let Some(notice) = notice {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            notice.to_string(),
            Style::default().fg(Color::Yellow),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Centered end-of-session box over the playfield
pub fn render_game_over(frame: &mut Frame, screen: Vec2, summary: &GameOverSummary) {
    let field = playfield_area(frame.size(), screen);
    let width = 34.min(field.width);
    let height = 9.min(field.height);
    let area = Rect {
        x: field.x + (field.width - width) / 2,
        y: field.y + (field.height - height) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let standing = match (summary.rank, summary.best) {
        (Some(1), _) => "New best!".to_string(),
        (Some(rank), Some(best)) => format!("Rank #{} (best {})", rank, best),
        (Some(rank), None) => format!("Rank #{}", rank),
        (None, Some(best)) => format!("Best: {}", best),
        (None, None) => String::new(),
    };

    let lines = vec![
        Line::from(Span::styled(
            "Game Over!",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Score: {}", summary.score),
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(standing, Style::default().fg(Color::Cyan))),
        Line::from(""),
        Line::from(Span::styled(
            "[N] New game  [any key] Quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
