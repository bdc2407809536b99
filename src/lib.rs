//! Brickfall - brick-breaker simulation core for a small SPI display
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `display`: Drawing primitives and the game-view renderer
//! - `config`: Validated tuning parameters
//! - `highscores`: Persisted best score
//! - `runner`: Cooperative frame loop with pacing and battery gate

pub mod config;
pub mod display;
pub mod highscores;
pub mod input;
pub mod runner;
pub mod sim;
pub mod system;
pub mod util;

pub use config::{ConfigError, GameConfig};
pub use highscores::{HighScoreStore, JsonFileStore, MemoryStore, StoreError};
pub use input::{Buttons, InputTracker};
pub use runner::FrameLoop;
pub use util::{Clock, FramePacer, GameRng};

/// Reference tuning values (the defaults of [`GameConfig`])
pub mod consts {
    /// Canvas dimensions of the reference panel
    pub const SCREEN_WIDTH: i32 = 240;
    pub const SCREEN_HEIGHT: i32 = 320;
    /// Score/lives strip at the top; the ball bounces off its lower edge
    pub const HEADER_HEIGHT: i32 = 15;
    /// Gap between the header and the first brick row
    pub const TOP_BUFFER: i32 = 15;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 3.0;
    pub const STARTER_SPEED: f32 = 3.5;
    pub const MAX_SPEED: f32 = 7.0;
    /// Added to the ball speed on every level advance
    pub const SPEED_INCREMENT: f32 = 0.15;

    /// Paddle defaults
    pub const PADDLE_WIDTH: i32 = 50;
    pub const PADDLE_HEIGHT: i32 = 5;
    /// Paddle top sits this far above the bottom of the screen
    pub const PADDLE_BOTTOM_MARGIN: i32 = 10;
    pub const PADDLE_SPEED_MUL: f32 = 1.6;
    pub const BOUNCE_FACTOR: f32 = 0.9;

    /// Lives
    pub const STARTER_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 6;

    /// Points for a destroyed brick
    pub const BRICK_POINTS: u32 = 10;
    /// Highest durability tier
    pub const MAX_DURABILITY: u8 = 3;

    /// Descending floor
    pub const BRICK_DROP: i32 = 5;
    pub const MIN_BRICK_HEIGHT: i32 = 265;
    pub const DEFAULT_INTERVAL_MS: u32 = 10_000;
    pub const MIN_INTERVAL_MS: u32 = 3_000;
    pub const DELTA_INTERVAL_MS: u32 = 500;

    /// Aiming
    pub const LAUNCH_ANGLE_MIN: f32 = 30.0;
    pub const LAUNCH_ANGLE_MAX: f32 = 150.0;
    pub const LAUNCH_ANGLE_STEP: f32 = 5.0;
    pub const AIM_INDICATOR_LEN: f32 = 20.0;

    /// Modal timings
    pub const AUTO_LAUNCH_DELAY_MS: u64 = 2_500;
    pub const TITLE_MS: u64 = 5_000;
    pub const LEADERBOARD_MS: u64 = 3_000;

    /// Frame budget (~60 Hz)
    pub const FRAME_MS: u64 = 16;
}

/// Convert a launch angle in degrees (0 = right, 90 = straight up) to a
/// velocity with the given magnitude. Screen y grows downward.
#[inline]
pub fn velocity_from_angle(angle_deg: f32, speed: f32) -> glam::Vec2 {
    let rad = angle_deg.to_radians();
    glam::Vec2::new(speed * rad.cos(), -speed * rad.sin())
}
