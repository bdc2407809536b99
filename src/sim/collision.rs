//! Collision detection and response for axis-aligned geometry
//!
//! Bricks and the paddle are rectangles, the ball is treated as its
//! bounding square. The brick test is swept: it looks at both the previous
//! and current ball box so a fast ball cannot skip over a thin brick
//! between two frames.

use glam::Vec2;

/// Horizontal faces win a rebound tie if their penetration is within this
/// many pixels of the best vertical face
pub const TIE_EPSILON: f32 = 0.5;

/// Axis-aligned box in screen pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            left: x,
            top: y,
            right: x + w,
            bottom: y + h,
        }
    }

    /// Bounding box of a circle
    pub fn around(center: Vec2, radius: f32) -> Self {
        Self {
            left: center.x - radius,
            top: center.y - radius,
            right: center.x + radius,
            bottom: center.y + radius,
        }
    }

    #[inline]
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.right > other.left && self.left < other.right
    }

    #[inline]
    pub fn overlaps_y(&self, other: &Aabb) -> bool {
        self.bottom > other.top && self.top < other.bottom
    }

    /// Strict overlap (touching edges do not count)
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other)
    }
}

/// How a moving box met a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitKind {
    /// Current box overlaps the target
    Overlap,
    /// Crossed a left/right edge during the frame while vertically aligned
    SweptX,
    /// Crossed a top/bottom edge during the frame while horizontally aligned
    SweptY,
}

/// Swept box test between the previous and current ball box
pub fn swept_hit(prev: &Aabb, cur: &Aabb, target: &Aabb) -> Option<HitKind> {
    if cur.overlaps(target) {
        return Some(HitKind::Overlap);
    }

    let crossed_x = (prev.right <= target.left && cur.right >= target.left)
        || (prev.left >= target.right && cur.left <= target.right);
    let crossed_y = (prev.bottom <= target.top && cur.bottom >= target.top)
        || (prev.top >= target.bottom && cur.top <= target.bottom);

    if crossed_x && cur.overlaps_y(target) {
        Some(HitKind::SweptX)
    } else if crossed_y && cur.overlaps_x(target) {
        Some(HitKind::SweptY)
    } else {
        None
    }
}

/// Face of a target the ball bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Left,
    Right,
    Top,
    Bottom,
}

impl Face {
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Face::Left | Face::Right)
    }
}

/// How deep the ball box reaches past each face of the target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Penetration {
    pub fn between(ball: &Aabb, target: &Aabb) -> Self {
        Self {
            left: ball.right - target.left,
            right: target.right - ball.left,
            top: ball.bottom - target.top,
            bottom: target.bottom - ball.top,
        }
    }
}

/// Pick the face to bounce off.
///
/// Only faces the ball is moving toward are candidates. The shallowest one
/// wins; a horizontal face wins a near-tie. `None` when the ball is not
/// moving toward any face.
pub fn rebound_face(pen: &Penetration, vel: Vec2) -> Option<Face> {
    let horizontal = if vel.x > 0.0 {
        Some((Face::Left, pen.left))
    } else if vel.x < 0.0 {
        Some((Face::Right, pen.right))
    } else {
        None
    };
    let vertical = if vel.y > 0.0 {
        Some((Face::Top, pen.top))
    } else if vel.y < 0.0 {
        Some((Face::Bottom, pen.bottom))
    } else {
        None
    };

    match (horizontal, vertical) {
        (Some((h, dh)), Some((v, dv))) => Some(if dh <= dv + TIE_EPSILON { h } else { v }),
        (Some((h, _)), None) => Some(h),
        (None, Some((v, _))) => Some(v),
        (None, None) => None,
    }
}

/// Face to bounce off for a given hit.
///
/// For an overlap, the previous box decides first: if it was already
/// aligned with the target on one axis, the ball can only have entered
/// through a face on the other axis. Penetration depth breaks the rest.
pub fn resolve_face(
    kind: HitKind,
    prev: &Aabb,
    cur: &Aabb,
    target: &Aabb,
    vel: Vec2,
) -> Option<Face> {
    match kind {
        HitKind::Overlap => {
            let vertical = if vel.y > 0.0 {
                Some(Face::Top)
            } else if vel.y < 0.0 {
                Some(Face::Bottom)
            } else {
                None
            };
            let horizontal = if vel.x > 0.0 {
                Some(Face::Left)
            } else if vel.x < 0.0 {
                Some(Face::Right)
            } else {
                None
            };
            match (prev.overlaps_x(target), prev.overlaps_y(target)) {
                (true, false) if vertical.is_some() => vertical,
                (false, true) if horizontal.is_some() => horizontal,
                _ => rebound_face(&Penetration::between(cur, target), vel),
            }
        }
        HitKind::SweptX => Some(if vel.x > 0.0 { Face::Left } else { Face::Right }),
        HitKind::SweptY => Some(if vel.y > 0.0 { Face::Top } else { Face::Bottom }),
    }
}

/// Centre position that puts a ball of `radius` just outside `face`,
/// keeping the other coordinate
pub fn separate(center: Vec2, radius: f32, target: &Aabb, face: Face) -> Vec2 {
    match face {
        Face::Left => Vec2::new(target.left - radius, center.y),
        Face::Right => Vec2::new(target.right + radius, center.y),
        Face::Top => Vec2::new(center.x, target.top - radius),
        Face::Bottom => Vec2::new(center.x, target.bottom + radius),
    }
}

/// Velocity after bouncing off `face`: the component points away from it
#[inline]
pub fn rebound(vel: Vec2, face: Face) -> Vec2 {
    match face {
        Face::Left => Vec2::new(-vel.x.abs(), vel.y),
        Face::Right => Vec2::new(vel.x.abs(), vel.y),
        Face::Top => Vec2::new(vel.x, -vel.y.abs()),
        Face::Bottom => Vec2::new(vel.x, vel.y.abs()),
    }
}
