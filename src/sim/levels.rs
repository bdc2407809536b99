//! Built-in level table
//!
//! Read-only templates; the active level is a [`BrickGrid`](super::BrickGrid)
//! copied from one of these at level start.

/// Static level template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelDescriptor {
    pub rows: usize,
    pub cols: usize,
    /// Row-major durability per cell (0 = empty)
    pub durability: &'static [u8],
    pub brick_width: i32,
    pub brick_height: i32,
    pub spacing: i32,
}

impl LevelDescriptor {
    /// Pixel width of the grid (no trailing spacing)
    pub fn grid_width(&self) -> i32 {
        self.cols as i32 * (self.brick_width + self.spacing) - self.spacing
    }

    /// Number of cells that start with durability > 0
    pub fn brick_count(&self) -> usize {
        self.durability.iter().filter(|&&d| d > 0).count()
    }
}

#[rustfmt::skip]
const LEVEL_1: [u8; 32] = [
    2, 2, 2, 2, 2, 2, 2, 2,
    1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1,
];

#[rustfmt::skip]
const LEVEL_2: [u8; 45] = [
    3, 0, 3, 0, 3, 0, 3, 0, 3,
    2, 2, 2, 2, 2, 2, 2, 2, 2,
    1, 2, 1, 2, 1, 2, 1, 2, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1,
    0, 1, 0, 1, 0, 1, 0, 1, 0,
];

#[rustfmt::skip]
const LEVEL_3: [u8; 60] = [
    3, 2, 3, 2, 3, 2, 3, 2, 3, 2,
    2, 3, 2, 3, 2, 3, 2, 3, 2, 3,
    3, 2, 3, 2, 3, 2, 3, 2, 3, 2,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
];

#[rustfmt::skip]
const LEVEL_4: [u8; 48] = [
    0, 0, 0, 3, 3, 0, 0, 0,
    0, 0, 3, 2, 2, 3, 0, 0,
    0, 3, 2, 1, 1, 2, 3, 0,
    3, 2, 1, 1, 1, 1, 2, 3,
    0, 3, 2, 1, 1, 2, 3, 0,
    0, 0, 3, 3, 3, 3, 0, 0,
];

/// Levels in play order; the index wraps around after the last one
pub static LEVELS: [LevelDescriptor; 4] = [
    LevelDescriptor {
        rows: 4,
        cols: 8,
        durability: &LEVEL_1,
        brick_width: 24,
        brick_height: 8,
        spacing: 4,
    },
    LevelDescriptor {
        rows: 5,
        cols: 9,
        durability: &LEVEL_2,
        brick_width: 22,
        brick_height: 8,
        spacing: 3,
    },
    LevelDescriptor {
        rows: 6,
        cols: 10,
        durability: &LEVEL_3,
        brick_width: 20,
        brick_height: 7,
        spacing: 3,
    },
    LevelDescriptor {
        rows: 6,
        cols: 8,
        durability: &LEVEL_4,
        brick_width: 24,
        brick_height: 8,
        spacing: 4,
    },
];
