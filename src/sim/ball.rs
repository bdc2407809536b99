//! Ball kinematics
//!
//! Positions are sub-pixel floats; the display rounds when drawing. The
//! velocity magnitude always equals `speed` except for the instant between
//! a speed change and the next launch/renormalize.

use glam::Vec2;

use super::collision::Aabb;
use super::paddle::Paddle;
use crate::config::GameConfig;
use crate::velocity_from_angle;

/// Which walls the ball touched this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    pub side: bool,
    pub top: bool,
    /// Ball overlapped the header strip and may have smeared it
    pub header_dirty: bool,
}

#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    /// Position before the last integration step
    pub prev_pos: Vec2,
    pub vel: Vec2,
    pub speed: f32,
    pub radius: f32,
    /// Riding the paddle, waiting for launch
    pub on_paddle: bool,
    /// Bounced off the paddle this frame
    pub hit_paddle: bool,
    /// Degrees from the +x axis, opening upward
    pub launch_angle: f32,
    /// Last drawn aim indicator end point (erased before redraw)
    pub aim_end: Option<(i32, i32)>,
    /// Last brick cell touched, repainted after the ball leaves it
    pub last_collided: Option<(usize, usize)>,
}

impl Ball {
    pub fn new(config: &GameConfig) -> Self {
        let launch_angle = config.launch_angle_max;
        Self {
            pos: Vec2::ZERO,
            prev_pos: Vec2::ZERO,
            vel: velocity_from_angle(launch_angle, config.starter_speed),
            speed: config.starter_speed,
            radius: config.ball_radius,
            on_paddle: true,
            hit_paddle: false,
            launch_angle,
            aim_end: None,
            last_collided: None,
        }
    }

    /// Park the ball on top of the paddle, centered
    pub fn rest_on(&mut self, paddle: &Paddle) {
        self.pos = Vec2::new(
            paddle.x + paddle.width as f32 / 2.0,
            (paddle.y - paddle.height) as f32 - self.radius - 1.0,
        );
        self.prev_pos = self.pos;
        self.on_paddle = true;
        self.hit_paddle = false;
    }

    /// Leave the paddle along `launch_angle` at the current speed
    pub fn launch(&mut self) {
        self.vel = velocity_from_angle(self.launch_angle, self.speed);
        self.on_paddle = false;
        self.hit_paddle = false;
    }

    /// Nudge the aim, clamped to `[min, max]`. Returns whether it moved.
    pub fn adjust_aim(&mut self, delta: f32, min: f32, max: f32) -> bool {
        let angle = (self.launch_angle + delta).clamp(min, max);
        let changed = angle != self.launch_angle;
        self.launch_angle = angle;
        changed
    }

    /// Change speed, keeping the current direction
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
        let len = self.vel.length();
        if len > f32::EPSILON {
            self.vel = self.vel / len * speed;
        }
    }

    /// Advance one frame (no sub-stepping)
    #[inline]
    pub fn integrate(&mut self) {
        self.prev_pos = self.pos;
        self.pos += self.vel;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::around(self.pos, self.radius)
    }

    pub fn prev_bounds(&self) -> Aabb {
        Aabb::around(self.prev_pos, self.radius)
    }

    /// Bounce off the side walls and the header's lower edge. Only a ball
    /// moving outward is reflected, so one that is already turning back is
    /// left alone.
    pub fn reflect_walls(&mut self, config: &GameConfig) -> WallContact {
        let mut contact = WallContact::default();
        let width = config.screen_width as f32;
        let ceiling = config.header_height as f32;

        if self.pos.x - self.radius <= 0.0 && self.vel.x < 0.0 {
            self.vel.x = -self.vel.x;
            contact.side = true;
        }
        if self.pos.x + self.radius >= width && self.vel.x > 0.0 {
            self.vel.x = -self.vel.x;
            contact.side = true;
        }
        if self.pos.y - self.radius <= ceiling && self.vel.y < 0.0 {
            self.vel.y = -self.vel.y;
            contact.top = true;
        }
        if self.prev_pos.y - self.radius <= ceiling || self.pos.y - self.radius <= ceiling {
            contact.header_dirty = true;
        }
        contact
    }

    /// Bottom edge reached the floor while falling, without a paddle save
    pub fn is_lost(&self, screen_height: i32) -> bool {
        self.pos.y + self.radius >= screen_height as f32 && self.vel.y > 0.0 && !self.hit_paddle
    }

    /// End point of an aim indicator of the given length
    pub fn aim_endpoint(&self, len: f32) -> (i32, i32) {
        let rad = self.launch_angle.to_radians();
        (
            (self.pos.x + len * rad.cos()) as i32,
            (self.pos.y - len * rad.sin()) as i32,
        )
    }
}
