//! Game tuning parameters
//!
//! One explicit configuration struct, constructed once at startup and
//! validated before the simulation sees it. Loadable from a JSON file so a
//! board build can ship its own tuning without recompiling.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Configuration problems
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A single field is outside its accepted range
    #[error("{field} = {value} is out of range (expected {expected})")]
    OutOfRange {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    /// Two or more fields contradict each other
    #[error("inconsistent config: {0}")]
    Inconsistent(String),

    /// Config file could not be read
    #[error("read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for this struct
    #[error("parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

fn out_of_range(field: &'static str, value: impl ToString, expected: &'static str) -> ConfigError {
    ConfigError::OutOfRange {
        field,
        value: value.to_string(),
        expected,
    }
}

/// All tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Canvas ===
    /// Canvas width in pixels
    pub screen_width: i32,
    /// Canvas height in pixels
    pub screen_height: i32,
    /// Height of the score strip; the top wall sits on its lower edge
    pub header_height: i32,
    /// Gap between the header and the first brick row
    pub top_buffer: i32,

    // === Ball ===
    pub ball_radius: f32,
    /// Speed at the start of a run (pixels per frame)
    pub starter_speed: f32,
    /// Speed cap reached through level advances
    pub max_speed: f32,
    /// Speed added on each level advance
    pub speed_increment: f32,

    // === Paddle ===
    pub paddle_width: i32,
    pub paddle_height: i32,
    /// Distance from the bottom of the canvas to the paddle top
    pub paddle_bottom_margin: i32,
    /// Paddle speed = sqrt(ball speed) * this
    pub paddle_speed_mul: f32,
    /// Share of the ball speed that an edge hit turns into horizontal motion
    pub bounce_factor: f32,

    // === Scoring ===
    pub starter_lives: u8,
    pub max_lives: u8,
    /// Points per destroyed brick
    pub brick_points: u32,

    // === Descending floor ===
    /// Pixels the grid moves down per interval tick
    pub brick_drop: i32,
    /// A surviving brick whose bottom reaches this y costs a life
    pub min_brick_height: i32,
    pub default_interval_ms: u32,
    pub min_interval_ms: u32,
    pub delta_interval_ms: u32,

    // === Aiming ===
    pub launch_angle_min: f32,
    pub launch_angle_max: f32,
    pub launch_angle_step: f32,
    pub aim_indicator_len: f32,

    // === Modal timings ===
    /// Attract-mode wait before the ball launches itself
    pub auto_launch_delay_ms: u64,
    /// How long the title screen waits for A before attract mode
    pub title_ms: u64,
    /// How long the game-over summary stays up
    pub leaderboard_ms: u64,
    /// Frame budget for pacing
    pub frame_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            header_height: HEADER_HEIGHT,
            top_buffer: TOP_BUFFER,

            ball_radius: BALL_RADIUS,
            starter_speed: STARTER_SPEED,
            max_speed: MAX_SPEED,
            speed_increment: SPEED_INCREMENT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_bottom_margin: PADDLE_BOTTOM_MARGIN,
            paddle_speed_mul: PADDLE_SPEED_MUL,
            bounce_factor: BOUNCE_FACTOR,

            starter_lives: STARTER_LIVES,
            max_lives: MAX_LIVES,
            brick_points: BRICK_POINTS,

            brick_drop: BRICK_DROP,
            min_brick_height: MIN_BRICK_HEIGHT,
            default_interval_ms: DEFAULT_INTERVAL_MS,
            min_interval_ms: MIN_INTERVAL_MS,
            delta_interval_ms: DELTA_INTERVAL_MS,

            launch_angle_min: LAUNCH_ANGLE_MIN,
            launch_angle_max: LAUNCH_ANGLE_MAX,
            launch_angle_step: LAUNCH_ANGLE_STEP,
            aim_indicator_len: AIM_INDICATOR_LEN,

            auto_launch_delay_ms: AUTO_LAUNCH_DELAY_MS,
            title_ms: TITLE_MS,
            leaderboard_ms: LEADERBOARD_MS,
            frame_ms: FRAME_MS,
        }
    }
}

impl GameConfig {
    /// Y of the paddle's top edge
    #[inline]
    pub fn paddle_y(&self) -> i32 {
        self.screen_height - self.paddle_bottom_margin
    }

    /// Y of the first brick row before any descent
    #[inline]
    pub fn grid_top(&self) -> i32 {
        self.header_height + self.top_buffer
    }

    /// Check every field range and cross-field constraint
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(64..=4096).contains(&self.screen_width) {
            return Err(out_of_range("screen_width", self.screen_width, "64..=4096"));
        }
        if !(64..=4096).contains(&self.screen_height) {
            return Err(out_of_range("screen_height", self.screen_height, "64..=4096"));
        }
        if self.header_height < 0 || self.header_height >= self.screen_height / 4 {
            return Err(out_of_range("header_height", self.header_height, "0..screen_height/4"));
        }
        if self.top_buffer < 0 {
            return Err(out_of_range("top_buffer", self.top_buffer, ">= 0"));
        }
        if !(1.0..=16.0).contains(&self.ball_radius) {
            return Err(out_of_range("ball_radius", self.ball_radius, "1.0..=16.0"));
        }
        if self.starter_speed <= 0.0 || !self.starter_speed.is_finite() {
            return Err(out_of_range("starter_speed", self.starter_speed, "> 0"));
        }
        if self.max_speed < self.starter_speed {
            return Err(ConfigError::Inconsistent(format!(
                "max_speed {} below starter_speed {}",
                self.max_speed, self.starter_speed
            )));
        }
        if self.speed_increment < 0.0 {
            return Err(out_of_range("speed_increment", self.speed_increment, ">= 0"));
        }
        // The tracker picks a target in [3r, width - 3r]
        let min_paddle = (6.0 * self.ball_radius).ceil() as i32 + 1;
        if self.paddle_width < min_paddle || self.paddle_width > self.screen_width {
            return Err(out_of_range("paddle_width", self.paddle_width, "6*ball_radius < w <= screen_width"));
        }
        if self.paddle_height < 1 {
            return Err(out_of_range("paddle_height", self.paddle_height, ">= 1"));
        }
        if self.paddle_bottom_margin < self.paddle_height || self.paddle_bottom_margin >= self.screen_height / 2 {
            return Err(out_of_range(
                "paddle_bottom_margin",
                self.paddle_bottom_margin,
                "paddle_height..screen_height/2",
            ));
        }
        if self.paddle_speed_mul <= 0.0 {
            return Err(out_of_range("paddle_speed_mul", self.paddle_speed_mul, "> 0"));
        }
        if !(self.bounce_factor > 0.0 && self.bounce_factor <= 1.0) {
            return Err(out_of_range("bounce_factor", self.bounce_factor, "0 < f <= 1"));
        }
        if self.max_lives == 0 {
            return Err(out_of_range("max_lives", self.max_lives, ">= 1"));
        }
        if self.starter_lives > self.max_lives {
            return Err(ConfigError::Inconsistent(format!(
                "starter_lives {} exceeds max_lives {}",
                self.starter_lives, self.max_lives
            )));
        }
        if self.brick_drop < 0 {
            return Err(out_of_range("brick_drop", self.brick_drop, ">= 0"));
        }
        if self.min_brick_height <= self.grid_top() || self.min_brick_height >= self.paddle_y() {
            return Err(out_of_range(
                "min_brick_height",
                self.min_brick_height,
                "grid top < y < paddle y",
            ));
        }
        if self.min_interval_ms == 0 {
            return Err(out_of_range("min_interval_ms", self.min_interval_ms, ">= 1"));
        }
        if self.min_interval_ms > self.default_interval_ms {
            return Err(ConfigError::Inconsistent(format!(
                "min_interval_ms {} exceeds default_interval_ms {}",
                self.min_interval_ms, self.default_interval_ms
            )));
        }
        if self.launch_angle_min < 0.0 {
            return Err(out_of_range("launch_angle_min", self.launch_angle_min, ">= 0"));
        }
        if self.launch_angle_max > 180.0 {
            return Err(out_of_range("launch_angle_max", self.launch_angle_max, "<= 180"));
        }
        if self.launch_angle_min >= self.launch_angle_max {
            return Err(ConfigError::Inconsistent(format!(
                "launch_angle_min {} not below launch_angle_max {}",
                self.launch_angle_min, self.launch_angle_max
            )));
        }
        if self.launch_angle_step <= 0.0 {
            return Err(out_of_range("launch_angle_step", self.launch_angle_step, "> 0"));
        }
        if self.frame_ms == 0 {
            return Err(out_of_range("frame_ms", self.frame_ms, ">= 1"));
        }
        Ok(())
    }

    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Load a config file, falling back to defaults. The error (if any) is
    /// returned so the caller can log it.
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<ConfigError>) {
        match Self::load_from_file(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
}
