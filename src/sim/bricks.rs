//! Active brick grid
//!
//! A mutable copy of a [`LevelDescriptor`] plus its runtime offsets. Cells
//! are addressed by (row, col) for the life of the level; a cell that
//! reaches durability 0 stays empty until the next level load.

use super::collision::Aabb;
use super::levels::LevelDescriptor;
use crate::config::GameConfig;
use crate::consts::MAX_DURABILITY;

/// Result of hitting a live brick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrickHit {
    pub row: usize,
    pub col: usize,
    /// Durability left after the hit
    pub remaining: u8,
}

impl BrickHit {
    pub fn destroyed(&self) -> bool {
        self.remaining == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrickGrid {
    pub rows: usize,
    pub cols: usize,
    /// Row-major durability counters
    cells: Vec<u8>,
    pub brick_width: i32,
    pub brick_height: i32,
    pub spacing: i32,
    /// Left edge of column 0, centers the grid
    pub offset_x: i32,
    /// Top edge of row 0, grows as the floor descends
    pub offset_y: i32,
}

impl BrickGrid {
    /// Instantiate a level template for the given canvas
    pub fn from_descriptor(desc: &LevelDescriptor, config: &GameConfig) -> Self {
        let cells = (0..desc.rows * desc.cols)
            .map(|i| desc.durability.get(i).copied().unwrap_or(0).min(MAX_DURABILITY))
            .collect();
        Self {
            rows: desc.rows,
            cols: desc.cols,
            cells,
            brick_width: desc.brick_width,
            brick_height: desc.brick_height,
            spacing: desc.spacing,
            offset_x: (config.screen_width - desc.grid_width()) / 2,
            offset_y: config.grid_top(),
        }
    }

    /// Grid with no rows (before the first level load)
    pub fn empty() -> Self {
        Self {
            rows: 0,
            cols: 0,
            cells: Vec::new(),
            brick_width: 0,
            brick_height: 0,
            spacing: 0,
            offset_x: 0,
            offset_y: 0,
        }
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// Durability of a cell; out-of-range cells read as empty
    pub fn durability(&self, row: usize, col: usize) -> u8 {
        self.index(row, col).map(|i| self.cells[i]).unwrap_or(0)
    }

    /// Top-left pixel of a cell
    pub fn cell_origin(&self, row: usize, col: usize) -> (i32, i32) {
        (
            self.offset_x + col as i32 * (self.brick_width + self.spacing),
            self.offset_y + row as i32 * (self.brick_height + self.spacing),
        )
    }

    pub fn cell_rect(&self, row: usize, col: usize) -> Aabb {
        let (x, y) = self.cell_origin(row, col);
        Aabb::new(x as f32, y as f32, self.brick_width as f32, self.brick_height as f32)
    }

    /// Live cells in scan order (row-major, top to bottom)
    pub fn active_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &d)| d > 0)
            .map(|(i, _)| (i / self.cols, i % self.cols))
    }

    /// Take one point of durability off a live cell
    pub fn hit(&mut self, row: usize, col: usize) -> Option<BrickHit> {
        let i = self.index(row, col)?;
        if self.cells[i] == 0 {
            return None;
        }
        self.cells[i] -= 1;
        Some(BrickHit {
            row,
            col,
            remaining: self.cells[i],
        })
    }

    pub fn is_cleared(&self) -> bool {
        self.cells.iter().all(|&d| d == 0)
    }

    pub fn active_count(&self) -> usize {
        self.cells.iter().filter(|&&d| d > 0).count()
    }

    /// Bottom edge of the lowest row that still has a live brick
    pub fn lowest_active_bottom(&self) -> Option<i32> {
        (0..self.rows).rev().find_map(|r| {
            (0..self.cols)
                .any(|c| self.durability(r, c) > 0)
                .then(|| self.cell_origin(r, 0).1 + self.brick_height)
        })
    }

    /// Bottom edge of the whole grid (live or not)
    pub fn bottom(&self) -> i32 {
        if self.rows == 0 {
            return self.offset_y;
        }
        self.cell_origin(self.rows - 1, 0).1 + self.brick_height
    }

    /// Whether a ball whose top edge is at `ball_top` can reach any brick
    #[inline]
    pub fn in_band(&self, ball_top: f32) -> bool {
        self.rows > 0 && ball_top <= self.bottom() as f32
    }

    /// Move the whole grid down
    pub fn descend(&mut self, amount: i32) {
        self.offset_y += amount;
    }
}
