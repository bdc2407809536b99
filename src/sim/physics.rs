//! One physics step for the ball in flight
//!
//! Integrate, bounce off walls, detect a floor miss, then resolve at most
//! one brick. Scoring and level transitions are left to the state machine.

use glam::Vec2;

use super::ball::{Ball, WallContact};
use super::bricks::{BrickGrid, BrickHit};
use super::collision::{Face, HitKind, rebound, resolve_face, separate, swept_hit};
use crate::config::GameConfig;

/// A brick the ball hit this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrickContact {
    pub hit: BrickHit,
    pub kind: HitKind,
    /// Face bounced off (`None` means dy was flipped as a fallback)
    pub face: Option<Face>,
    /// This hit emptied the grid
    pub cleared: bool,
}

/// Everything that happened during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub walls: WallContact,
    /// Ball reached the floor without a paddle save
    pub lost: bool,
    pub brick: Option<BrickContact>,
}

/// Advance the ball one frame against walls, floor and bricks
pub fn step(ball: &mut Ball, grid: &mut BrickGrid, config: &GameConfig) -> StepOutcome {
    ball.integrate();
    let walls = ball.reflect_walls(config);

    if ball.is_lost(config.screen_height) {
        return StepOutcome {
            walls,
            lost: true,
            brick: None,
        };
    }

    StepOutcome {
        walls,
        lost: false,
        brick: collide_bricks(ball, grid),
    }
}

/// Scan live bricks in row-major order and resolve the first one hit
pub fn collide_bricks(ball: &mut Ball, grid: &mut BrickGrid) -> Option<BrickContact> {
    let cur = ball.bounds();
    let prev = ball.prev_bounds();
    if !grid.in_band(cur.top.min(prev.top)) {
        return None;
    }

    let mut first_hit = None;
    let mut lingering = None;
    for (row, col) in grid.active_cells() {
        let rect = grid.cell_rect(row, col);
        if let Some(kind) = swept_hit(&prev, &cur, &rect) {
            first_hit = Some((row, col, kind, rect));
            break;
        }
        if lingering.is_none() && prev.overlaps(&rect) {
            lingering = Some((row, col));
        }
    }

    let Some((row, col, kind, rect)) = first_hit else {
        if lingering.is_some() {
            ball.last_collided = lingering;
        }
        return None;
    };

    let face = resolve_face(kind, &prev, &cur, &rect, ball.vel);
    ball.vel = match face {
        Some(face) => {
            // Back out through the face so the next frame cannot meet it again
            ball.pos = separate(ball.pos, ball.radius, &rect, face);
            rebound(ball.vel, face)
        }
        None => Vec2::new(ball.vel.x, -ball.vel.y),
    };
    ball.last_collided = Some((row, col));

    let hit = grid.hit(row, col)?;
    let cleared = hit.destroyed() && grid.is_cleared();
    log::debug!(
        "brick ({}, {}) hit via {:?} face {:?}, {} left",
        row,
        col,
        kind,
        face,
        hit.remaining
    );
    Some(BrickContact {
        hit,
        kind,
        face,
        cleared,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::levels::LevelDescriptor;

    static SINGLE: LevelDescriptor = LevelDescriptor {
        rows: 1,
        cols: 1,
        durability: &[2],
        brick_width: 20,
        brick_height: 6,
        spacing: 2,
    };

    static TALL: LevelDescriptor = LevelDescriptor {
        rows: 1,
        cols: 1,
        durability: &[2],
        brick_width: 20,
        brick_height: 10,
        spacing: 2,
    };

    static THIN: LevelDescriptor = LevelDescriptor {
        rows: 1,
        cols: 1,
        durability: &[3],
        brick_width: 40,
        brick_height: 4,
        spacing: 2,
    };

    fn setup() -> (GameConfig, Ball, BrickGrid) {
        let config = GameConfig::default();
        let grid = BrickGrid::from_descriptor(&SINGLE, &config);
        let mut ball = Ball::new(&config);
        ball.on_paddle = false;
        (config, ball, grid)
    }

    #[test]
    fn test_skips_scan_below_band() {
        let (config, mut ball, mut grid) = setup();
        ball.pos = Vec2::new(120.0, 200.0);
        ball.vel = Vec2::new(1.0, -3.0);
        let out = step(&mut ball, &mut grid, &config);
        assert_eq!(out.brick, None);
        assert!(!out.lost);
    }

    #[test]
    fn test_hit_from_below_flips_dy() {
        let (config, mut ball, mut grid) = setup();
        // Grid cell spans x 110..130, y 30..36
        ball.pos = Vec2::new(120.0, 41.0);
        ball.vel = Vec2::new(0.0, -3.0);
        ball.speed = 3.0;
        let out = step(&mut ball, &mut grid, &config);
        let contact = out.brick.unwrap();
        assert_eq!(contact.face, Some(Face::Bottom));
        assert_eq!(contact.hit.remaining, 1);
        assert!(!contact.cleared);
        assert_eq!(ball.vel, Vec2::new(0.0, 3.0));
        assert_eq!(ball.last_collided, Some((0, 0)));
    }

    #[test]
    fn test_side_hit_flips_dx() {
        let (config, mut ball, mut grid) = setup();
        ball.pos = Vec2::new(106.0, 33.0);
        ball.vel = Vec2::new(2.0, 0.5);
        let out = step(&mut ball, &mut grid, &config);
        assert_eq!(out.brick.unwrap().face, Some(Face::Left));
        assert!(ball.vel.x < 0.0);
    }

    #[test]
    fn test_last_hit_clears_grid() {
        let (config, mut ball, mut grid) = setup();
        grid.hit(0, 0);
        ball.pos = Vec2::new(120.0, 41.0);
        ball.vel = Vec2::new(0.0, -3.0);
        let contact = step(&mut ball, &mut grid, &config).brick.unwrap();
        assert!(contact.hit.destroyed());
        assert!(contact.cleared);
    }

    #[test]
    fn test_floor_miss_skips_bricks() {
        let (config, mut ball, mut grid) = setup();
        ball.pos = Vec2::new(120.0, 315.0);
        ball.vel = Vec2::new(0.0, 3.0);
        let out = step(&mut ball, &mut grid, &config);
        assert!(out.lost);
        assert_eq!(grid.durability(0, 0), 2);
    }

    #[test]
    fn test_corner_graze_takes_one_point() {
        let config = GameConfig::default();
        // Cell spans x 110..130, y 30..40
        let mut grid = BrickGrid::from_descriptor(&TALL, &config);
        let mut ball = Ball::new(&config);
        ball.on_paddle = false;
        ball.pos = Vec2::new(107.2, 43.0);
        ball.vel = Vec2::new(3.0, -3.0);
        ball.speed = ball.vel.length();

        let mut hits = 0;
        for _ in 0..6 {
            if let Some(contact) = step(&mut ball, &mut grid, &config).brick {
                assert_eq!(contact.face, Some(Face::Bottom));
                hits += 1;
            }
        }
        assert_eq!(hits, 1);
        assert_eq!(grid.durability(0, 0), 1);
        assert!(ball.vel.y > 0.0);
    }

    #[test]
    fn test_fast_ball_through_thin_brick_hits_once() {
        let config = GameConfig {
            max_speed: 14.0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_ok());
        // Cell spans x 100..140, y 30..34
        let mut grid = BrickGrid::from_descriptor(&THIN, &config);
        let mut ball = Ball::new(&config);
        ball.on_paddle = false;
        ball.pos = Vec2::new(120.0, 38.0);
        ball.vel = Vec2::new(0.0, -12.0);
        ball.speed = 12.0;

        let contact = step(&mut ball, &mut grid, &config).brick.unwrap();
        assert_eq!(contact.kind, HitKind::SweptY);
        assert_eq!(ball.pos, Vec2::new(120.0, 37.0));
        assert_eq!(ball.vel, Vec2::new(0.0, 12.0));

        for _ in 0..5 {
            assert_eq!(step(&mut ball, &mut grid, &config).brick, None);
        }
        assert_eq!(grid.durability(0, 0), 2);
    }

    #[test]
    fn test_leaving_a_brick_marks_it_for_repaint() {
        let (config, mut ball, mut grid) = setup();
        // Box y 35..41 still overlaps the cell bottom at 36
        ball.pos = Vec2::new(120.0, 38.0);
        ball.vel = Vec2::new(0.0, 3.0);
        ball.last_collided = None;
        let out = step(&mut ball, &mut grid, &config);
        assert_eq!(out.brick, None);
        assert_eq!(ball.last_collided, Some((0, 0)));
        assert_eq!(grid.durability(0, 0), 2);
    }
}
