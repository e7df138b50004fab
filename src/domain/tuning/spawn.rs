/// Constraints for the spawn placement search.

#[derive(Debug, Clone, Copy)]
pub struct SpawnTuning {
    pub max_attempts: u32,

    /// Fraction of the map limit that bounds the sampling disk.
    pub radius_fraction: f64,

    /// Clearance added to a planet's radius.
    pub planet_margin: f64,

    /// Clearance added to a black hole's radius.
    pub black_hole_margin: f64,

    /// Clearance added to an asteroid's radius.
    pub asteroid_margin: f64,

    /// Used when no candidate passes. Roughly on Earth's orbit.
    pub fallback: (f64, f64),
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            max_attempts: 1000,
            radius_fraction: 0.85,
            planet_margin: 400_000.0,
            black_hole_margin: 1_000_000.0,
            asteroid_margin: 8000.0,
            fallback: (15_100_000.0, 100_000.0),
        }
    }
}
