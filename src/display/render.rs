//! Game-view drawing
//!
//! Everything here is incremental: the frame loop repaints only what moved
//! (ball, paddle strip, touched bricks, header when flagged). The full view
//! is redrawn only after screens that wipe it (pause, leaderboard, level load).

use glam::Vec2;

use super::{Color, Display, TextSize};
use crate::config::GameConfig;
use crate::sim::ball::Ball;
use crate::sim::bricks::BrickGrid;
use crate::sim::paddle::Paddle;
use crate::sim::pause::PauseMenu;
use crate::sim::state::GameState;

/// Durability tier colors
pub fn brick_color(durability: u8) -> Color {
    match durability {
        0 => Color::Black,
        1 => Color::Red,
        2 => Color::Orange,
        _ => Color::Green,
    }
}

/// Left x that centers `text` horizontally
pub fn centered_x(text: &str, size: TextSize, screen_width: i32) -> i32 {
    let (w, _) = size.glyph();
    (screen_width - text.chars().count() as i32 * w) / 2
}

fn centered_text<D: Display + ?Sized>(
    d: &mut D,
    config: &GameConfig,
    text: &str,
    y: i32,
    size: TextSize,
    color: Color,
) {
    let x = centered_x(text, size, config.screen_width);
    d.text(text, x, y, size, color);
}

/// Level, points and remaining balls on the header strip
pub fn draw_header<D: Display + ?Sized>(d: &mut D, state: &GameState) {
    let config = &state.config;
    d.fill_rect(0, 0, config.screen_width, config.header_height, Color::Blue);
    d.text(
        &format!("Level: {}", state.level_index + 1),
        5,
        3,
        TextSize::Small,
        Color::White,
    );
    d.text(
        &format!("Points: {}", state.points),
        80,
        3,
        TextSize::Small,
        Color::White,
    );

    // Extra lives beyond the starting count are green, lost ones grayed
    let r = config.ball_radius as i32;
    for i in 0..config.max_lives {
        let x = 180 + i32::from(i) * 10;
        let y = config.header_height / 2;
        if i < state.lives {
            let color = if i < config.starter_lives {
                Color::White
            } else {
                Color::Green
            };
            d.fill_circle(x, y, r, color);
        } else if i < config.starter_lives {
            d.fill_circle(x, y, r, Color::Gray);
        }
    }
}

/// Red line the lowest brick row must not reach
pub fn draw_loss_boundary<D: Display + ?Sized>(d: &mut D, config: &GameConfig) {
    d.line(
        0,
        config.min_brick_height,
        config.screen_width,
        config.min_brick_height,
        Color::Red,
    );
}

pub fn draw_brick<D: Display + ?Sized>(d: &mut D, grid: &BrickGrid, row: usize, col: usize) {
    let (x, y) = grid.cell_origin(row, col);
    d.fill_rect(
        x,
        y,
        grid.brick_width,
        grid.brick_height,
        brick_color(grid.durability(row, col)),
    );
}

pub fn draw_bricks<D: Display + ?Sized>(d: &mut D, grid: &BrickGrid) {
    for row in 0..grid.rows {
        for col in 0..grid.cols {
            draw_brick(d, grid, row, col);
        }
    }
}

/// Blank every cell at the grid's current offset (before it moves)
pub fn clear_bricks<D: Display + ?Sized>(d: &mut D, grid: &BrickGrid) {
    for row in 0..grid.rows {
        for col in 0..grid.cols {
            let (x, y) = grid.cell_origin(row, col);
            d.fill_rect(x, y, grid.brick_width, grid.brick_height, Color::Black);
        }
    }
}

#[inline]
fn pixel(pos: Vec2) -> (i32, i32) {
    (pos.x.round() as i32, pos.y.round() as i32)
}

pub fn draw_ball<D: Display + ?Sized>(d: &mut D, pos: Vec2, radius: f32) {
    let (x, y) = pixel(pos);
    d.fill_circle(x, y, radius as i32, Color::White);
}

pub fn erase_ball<D: Display + ?Sized>(d: &mut D, pos: Vec2, radius: f32) {
    let (x, y) = pixel(pos);
    d.fill_circle(x, y, radius as i32, Color::Black);
}

pub fn draw_paddle<D: Display + ?Sized>(d: &mut D, paddle: &Paddle) {
    d.fill_rect(
        paddle.x as i32,
        paddle.y,
        paddle.width,
        paddle.height,
        Color::White,
    );
}

/// Blank the strip the paddle uncovered moving from `old_x`, then draw it
pub fn draw_paddle_moved<D: Display + ?Sized>(d: &mut D, paddle: &Paddle, old_x: f32) {
    let old = old_x as i32;
    let new = paddle.x as i32;
    if new > old {
        d.fill_rect(old, paddle.y, new - old, paddle.height, Color::Black);
    } else if new < old {
        d.fill_rect(new + paddle.width, paddle.y, old - new, paddle.height, Color::Black);
    }
    draw_paddle(d, paddle);
}

/// Remove the aim line, if one is on screen
pub fn erase_aim_indicator<D: Display + ?Sized>(d: &mut D, ball: &mut Ball) {
    if let Some((x1, y1)) = ball.aim_end.take() {
        let (x0, y0) = pixel(ball.pos);
        d.line(x0, y0, x1, y1, Color::Black);
    }
}

/// Draw the aim line for the current angle, erasing a stale one first.
/// The ball is repainted since the erase crosses it.
pub fn draw_aim_indicator<D: Display + ?Sized>(d: &mut D, ball: &mut Ball, len: f32) {
    let end = ball.aim_endpoint(len);
    if ball.aim_end == Some(end) {
        return;
    }
    erase_aim_indicator(d, ball);
    let (x0, y0) = pixel(ball.pos);
    d.line(x0, y0, end.0, end.1, Color::Yellow);
    ball.aim_end = Some(end);
    draw_ball(d, ball.pos, ball.radius);
}

/// Attract-mode prompt
pub fn draw_start_text<D: Display + ?Sized>(d: &mut D, config: &GameConfig) {
    let (_, h) = TextSize::Large.glyph();
    centered_text(
        d,
        config,
        "PRESS START",
        (config.screen_height - h) / 2,
        TextSize::Large,
        Color::White,
    );
}

/// Boot screen
pub fn draw_title<D: Display + ?Sized>(d: &mut D, config: &GameConfig, paddle: &Paddle) {
    d.fill_screen(Color::Black);
    let (_, h) = TextSize::Large.glyph();
    centered_text(
        d,
        config,
        "BRICKFALL",
        (config.screen_height - h) / 2 - 3 * h,
        TextSize::Large,
        Color::Green,
    );
    draw_start_text(d, config);
    draw_paddle(d, paddle);
}

/// Score summary shown on game over
pub fn draw_leaderboard<D: Display + ?Sized>(
    d: &mut D,
    config: &GameConfig,
    score: u32,
    best: u32,
    new_high_score: bool,
) {
    d.fill_screen(Color::Black);
    let (_, large_h) = TextSize::Large.glyph();
    let (_, small_h) = TextSize::Small.glyph();
    let mut y = (config.screen_height - large_h) / 2;
    centered_text(d, config, "GAME OVER!", y, TextSize::Large, Color::White);

    y += large_h * 2;
    centered_text(
        d,
        config,
        &format!("SCORE: {}", score),
        y,
        TextSize::Small,
        Color::White,
    );
    y += small_h + 2;
    centered_text(
        d,
        config,
        &format!("MAX SCORE: {}", best),
        y,
        TextSize::Small,
        Color::White,
    );
    if new_high_score {
        y += small_h + 2;
        centered_text(d, config, "NEW BEST!", y, TextSize::Small, Color::Yellow);
    }
}

/// Pause menu with the selected entry highlighted
pub fn draw_pause_menu<D: Display + ?Sized>(d: &mut D, config: &GameConfig, menu: &PauseMenu) {
    d.fill_screen(Color::Black);
    let (_, large_h) = TextSize::Large.glyph();
    let (_, small_h) = TextSize::Small.glyph();
    centered_text(d, config, "PAUSED", 60, TextSize::Large, Color::White);

    let mut y = 60 + large_h * 2;
    for (i, option) in menu.options().iter().enumerate() {
        let selected = i == menu.selected_index();
        let label = if selected {
            format!("> {} <", option.label())
        } else {
            option.label().to_string()
        };
        let color = if selected { Color::Yellow } else { Color::Gray };
        centered_text(d, config, &label, y, TextSize::Small, color);
        y += small_h * 2;
    }
}

/// Repaint the whole playfield. Any aim line on screen is forgotten.
pub fn draw_game_view<D: Display + ?Sized>(d: &mut D, state: &mut GameState) {
    d.fill_screen(Color::Black);
    draw_header(d, state);
    state.redraw_header = false;
    draw_loss_boundary(d, &state.config);
    draw_bricks(d, &state.grid);
    draw_paddle(d, &state.paddle);
    state.ball.aim_end = None;
    draw_ball(d, state.ball.pos, state.ball.radius);
    if state.is_attract() {
        draw_start_text(d, &state.config);
    }
}
