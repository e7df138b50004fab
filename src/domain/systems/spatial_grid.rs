// Uniform-cell index over movable hazards.

use crate::domain::state::Asteroid;
use std::collections::HashMap;

/// Maps integer cell coordinates to the hazard handles inside them.
///
/// Queries are conservative: everything within one cell width of the query
/// point is returned, along with some hazards that are farther away. Callers
/// re-filter by exact distance.
#[derive(Debug, Clone)]
pub struct SpatialGrid<H = usize> {
    cell_size: f64,
    cells: HashMap<(i64, i64), Vec<H>>,
}

impl<H: Copy> SpatialGrid<H> {
    pub fn new(cell_size: f64) -> Self {
        assert!(cell_size > 0.0, "grid cell size must be positive");
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    fn cell_of(&self, x: f64, y: f64) -> (i64, i64) {
        (
            (x / self.cell_size).floor() as i64,
            (y / self.cell_size).floor() as i64,
        )
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn insert(&mut self, handle: H, x: f64, y: f64) {
        let cell = self.cell_of(x, y);
        self.cells.entry(cell).or_default().push(handle);
    }

    /// Union of the 3x3 block of cells around the query point's cell.
    pub fn query_neighborhood(&self, x: f64, y: f64) -> Vec<H> {
        let (cx, cy) = self.cell_of(x, y);
        let mut nearby = Vec::new();
        for i in -1..=1 {
            for j in -1..=1 {
                if let Some(cell) = self.cells.get(&(cx + i, cy + j)) {
                    nearby.extend_from_slice(cell);
                }
            }
        }
        nearby
    }

    pub fn len(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.values().all(Vec::is_empty)
    }
}

impl SpatialGrid<usize> {
    /// Rebuilds the grid so handle `i` refers to `asteroids[i]`.
    pub fn rebuild(&mut self, asteroids: &[Asteroid]) {
        self.clear();
        for (i, a) in asteroids.iter().enumerate() {
            self.insert(i, a.x, a.y);
        }
    }
}
