//! Armor grid cell mapping
//!
//! A ship's armor is a fixed-size grid of cells centered on the ship in its
//! local, unrotated frame. Damage lookups translate a world point into that
//! frame and then into cell indices.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geom::collision::is_point_within_bounds;
use crate::geom::shapes::EntityHandle;
use crate::math::vector::rotate;

/// Address of one armor cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellIndex {
    pub x: usize,
    pub y: usize,
}

impl CellIndex {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Per-ship armor cells (dimensions fixed for the ship's lifetime)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmorGrid {
    /// Row-major: `cells[y * width + x]`
    cells: Vec<f32>,
    width: usize,
    height: usize,
    cell_size: f32,
    max_per_cell: f32,
}

impl ArmorGrid {
    /// Grid with every cell at full armor
    pub fn new(width: usize, height: usize, cell_size: f32, max_per_cell: f32) -> Self {
        let max_per_cell = max_per_cell.max(0.0);
        Self {
            cells: vec![max_per_cell; width * height],
            width,
            height,
            cell_size,
            max_per_cell,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    #[inline]
    pub fn max_per_cell(&self) -> f32 {
        self.max_per_cell
    }

    fn offset(&self, cell: CellIndex) -> Option<usize> {
        (cell.x < self.width && cell.y < self.height).then(|| cell.y * self.width + cell.x)
    }

    /// Current armor in a cell
    pub fn cell(&self, cell: CellIndex) -> Option<f32> {
        self.offset(cell).map(|i| self.cells[i])
    }

    /// Set a cell, clamped to `[0, max_per_cell]`. Returns false out of range.
    pub fn set_cell(&mut self, cell: CellIndex, value: f32) -> bool {
        match self.offset(cell) {
            Some(i) => {
                self.cells[i] = value.clamp(0.0, self.max_per_cell);
                true
            }
            None => false,
        }
    }

    /// Remove armor from a cell; returns how much was actually absorbed
    pub fn apply_damage(&mut self, cell: CellIndex, amount: f32) -> f32 {
        let Some(i) = self.offset(cell) else {
            return 0.0;
        };
        let absorbed = amount.max(0.0).min(self.cells[i]);
        self.cells[i] -= absorbed;
        absorbed
    }

    /// Sum of all cells
    pub fn total_armor(&self) -> f32 {
        self.cells.iter().sum()
    }

    /// Mean of `current / max` over all cells (0 for an empty grid)
    pub fn average_fraction(&self) -> f32 {
        let capacity = self.max_per_cell * self.cells.len() as f32;
        if capacity <= 0.0 {
            return 0.0;
        }
        self.total_armor() / capacity
    }
}

/// Armor cell under a world point, or `None` when the point is outside the
/// ship's bounds or maps outside the grid
pub fn cell_at_world_point(
    ship: &EntityHandle,
    grid: &ArmorGrid,
    world_point: Vec2,
) -> Option<CellIndex> {
    if !is_point_within_bounds(world_point, ship) || !(grid.cell_size > 0.0) {
        return None;
    }

    let local = rotate(world_point - ship.location, -ship.facing);
    let fx = local.x / grid.cell_size + grid.width as f32 / 2.0;
    let fy = local.y / grid.cell_size + grid.height as f32 / 2.0;
    // Also rejects NaN
    if !(fx >= 0.0 && fy >= 0.0) {
        return None;
    }

    let cell = CellIndex::new(fx as usize, fy as usize);
    grid.offset(cell).map(|_| cell)
}

/// World position of a cell's center (inverse of [`cell_at_world_point`])
pub fn cell_center_world(ship: &EntityHandle, grid: &ArmorGrid, cell: CellIndex) -> Option<Vec2> {
    grid.offset(cell)?;
    let local = Vec2::new(
        (cell.x as f32 + 0.5 - grid.width as f32 / 2.0) * grid.cell_size,
        (cell.y as f32 + 0.5 - grid.height as f32 / 2.0) * grid.cell_size,
    );
    Some(rotate(local, ship.facing) + ship.location)
}

/// Current armor at a world point
pub fn armor_value(ship: &EntityHandle, grid: &ArmorGrid, world_point: Vec2) -> Option<f32> {
    cell_at_world_point(ship, grid, world_point).and_then(|cell| grid.cell(cell))
}

/// Armor missing at a world point (`max_per_cell - current`)
pub fn armor_damage(ship: &EntityHandle, grid: &ArmorGrid, world_point: Vec2) -> Option<f32> {
    armor_value(ship, grid, world_point).map(|current| grid.max_per_cell - current)
}

/// Armor remaining at a world point as a fraction of `max_per_cell`
pub fn armor_fraction(ship: &EntityHandle, grid: &ArmorGrid, world_point: Vec2) -> Option<f32> {
    armor_value(ship, grid, world_point).map(|current| {
        if grid.max_per_cell > 0.0 {
            current / grid.max_per_cell
        } else {
            0.0
        }
    })
}
