//! The player's paddle
//!
//! Fixed height band near the bottom of the playfield; only x moves, always
//! clamped to `[0, screen_width - width]`.

use super::ball::Ball;
use super::collision::Aabb;
use crate::config::GameConfig;
use crate::util::GameRng;

/// Paddle speed for a given ball speed (grows sub-linearly)
#[inline]
pub fn speed_for(ball_speed: f32, multiplier: f32) -> f32 {
    ball_speed.max(0.0).sqrt() * multiplier
}

#[derive(Debug, Clone)]
pub struct Paddle {
    pub width: i32,
    pub height: i32,
    /// Left edge (sub-pixel)
    pub x: f32,
    /// Top edge
    pub y: i32,
    /// Max pixels per frame
    pub speed: f32,
    /// Where on the paddle (offset from its left edge) the tracker aims to
    /// catch the ball next
    pub target_coord: i32,
    /// Oscillation direction
    pub left: bool,
    /// Oscillation turn-around margins
    pub left_bound: i32,
    pub right_bound: i32,
    speed_mul: f32,
}

impl Paddle {
    pub fn new(config: &GameConfig, ball_speed: f32) -> Self {
        Self {
            width: config.paddle_width,
            height: config.paddle_height,
            x: ((config.screen_width - config.paddle_width) / 2) as f32,
            y: config.paddle_y(),
            speed: speed_for(ball_speed, config.paddle_speed_mul),
            target_coord: config.paddle_width / 2,
            left: true,
            left_bound: 5,
            right_bound: 5,
            speed_mul: config.paddle_speed_mul,
        }
    }

    /// Recenter and retune speed for a new ball speed
    pub fn reset(&mut self, screen_width: i32, ball_speed: f32) {
        self.x = ((screen_width - self.width) / 2) as f32;
        self.retune(ball_speed);
    }

    pub fn retune(&mut self, ball_speed: f32) {
        self.speed = speed_for(ball_speed, self.speed_mul);
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y as f32, self.width as f32, self.height as f32)
    }

    /// Move by `delta` pixels, clamped to the screen. Returns the previous x
    /// when the paddle actually moved (so the caller can skip redraws).
    pub fn move_by(&mut self, delta: f32, screen_width: i32) -> Option<f32> {
        let old = self.x;
        let max_x = (screen_width - self.width) as f32;
        self.x = (self.x + delta).clamp(0.0, max_x);
        (self.x != old).then_some(old)
    }

    /// Ball vs paddle test. On a hit the ball is redirected by where it
    /// landed: center sends it straight up, the inflated edges send it at
    /// `bounce_factor` of its speed sideways. Speed is preserved.
    ///
    /// The vertical test also catches a ball whose bottom jumped past the
    /// whole band in one frame.
    pub fn collide(&mut self, ball: &mut Ball, rng: &mut GameRng, bounce_factor: f32) -> bool {
        ball.hit_paddle = false;
        if ball.on_paddle || ball.vel.y <= 0.0 {
            return false;
        }

        let r = ball.radius;
        let top = self.y as f32;
        let band_bottom = (self.y + self.height) as f32;
        let bottom = ball.pos.y + r;
        let prev_bottom = ball.prev_pos.y + r;

        let in_band = bottom >= top && bottom <= band_bottom;
        let crossed = prev_bottom < top && bottom >= top;
        let over = ball.pos.x >= self.x - r && ball.pos.x <= self.x + self.width as f32 + r;
        if !(over && (in_band || crossed)) {
            return false;
        }

        if bottom > band_bottom {
            ball.pos.y = top - r;
        }

        let half = self.width as f32 / 2.0;
        let offset = ((ball.pos.x - (self.x + half)) / (half + r)).clamp(-1.0, 1.0);
        let speed = ball.speed;
        ball.vel.x = speed * offset * bounce_factor;
        ball.vel.y = -(speed * speed - ball.vel.x * ball.vel.x).max(0.0).sqrt();

        let margin = (3.0 * r) as i32;
        self.target_coord = rng.int_inclusive(margin, self.width - margin);
        ball.hit_paddle = true;
        log::trace!("paddle hit offset={:.2} next target={}", offset, self.target_coord);
        true
    }

    /// Autonomous steering: head for `target_coord` under the ball, then
    /// shadow the ball's horizontal motion inside a dead zone of one radius.
    pub fn track(&mut self, ball: &Ball, config: &GameConfig) -> Option<f32> {
        let engaged = !ball.on_paddle
            && (ball.vel.y > 0.0
                || ball.vel.x.abs() > self.speed
                || ball.pos.y >= (config.screen_height / 2) as f32);
        if !engaged {
            return None;
        }

        let padding = ball.radius;
        let aim = self.x + self.target_coord as f32;
        let delta = if ball.pos.x < aim - padding {
            -self.speed
        } else if ball.pos.x > aim + padding {
            self.speed
        } else {
            ball.vel.x.clamp(-self.speed, self.speed)
        };
        self.move_by(delta, config.screen_width)
    }

    /// Sweep back and forth between the turn-around margins
    pub fn oscillate(&mut self, screen_width: i32) -> Option<f32> {
        let moved = if self.left {
            self.move_by(-self.speed, screen_width)
        } else {
            self.move_by(self.speed, screen_width)
        };
        if self.left && self.x <= self.left_bound as f32 {
            self.left = false;
        } else if !self.left && self.x + self.width as f32 >= (screen_width - self.right_bound) as f32 {
            self.left = true;
        }
        moved
    }
}
