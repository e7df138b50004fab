/// Procedural world layout.
#[derive(Debug, Clone, Copy)]
pub struct WorldTuning {
    /// Radius of the plasma barrier; nothing may live beyond it.
    pub map_limit: f64,

    pub asteroid_count: usize,

    /// Inner edge of the asteroid belt.
    pub belt_inner: f64,

    /// Outer edge of the belt as a fraction of `map_limit`.
    pub belt_outer_fraction: f64,

    /// Numerator of the `sqrt(k / dist)` orbital speed heuristic.
    pub orbital_speed_constant: f64,

    /// Full width of the uniform jitter added to orbital speed.
    pub orbital_speed_jitter: f64,

    /// Full width of the uniform rotation speed range, centred on zero.
    pub rotation_speed_spread: f64,

    /// Probability that an asteroid is drawn from the giant size range.
    pub giant_chance: f64,

    pub black_hole_count: usize,
    pub black_hole_inner: f64,
    pub black_hole_outer_fraction: f64,

    /// Cell size of the hazard grid. Must cover the largest asteroid radius
    /// plus the ship radius for collision queries to be exact.
    pub grid_cell_size: f64,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            map_limit: 110_000_000.0,
            asteroid_count: 30_000,
            belt_inner: 1_000_000.0,
            belt_outer_fraction: 1.0,
            orbital_speed_constant: 50_000_000_000.0,
            orbital_speed_jitter: 400.0,
            rotation_speed_spread: 0.5,
            giant_chance: 0.05,
            black_hole_count: 12,
            black_hole_inner: 15_000_000.0,
            black_hole_outer_fraction: 1.0,
            grid_cell_size: 20_000.0,
        }
    }
}

/// Per-connection view window used by the broadcaster.
#[derive(Debug, Clone, Copy)]
pub struct InterestTuning {
    /// Half-width of the axis-aligned box around the ship.
    pub view_distance: f64,
}

impl Default for InterestTuning {
    fn default() -> Self {
        Self {
            view_distance: 70_000.0,
        }
    }
}
