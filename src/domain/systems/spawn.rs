// Rejection sampling for a spawn point clear of every hazard.

use crate::domain::state::{Asteroid, BlackHole, Body};
use crate::domain::tuning::SpawnTuning;
use rand::Rng;
use std::f64::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnOutcome {
    pub x: f64,
    pub y: f64,
    /// Candidates drawn, including the accepted one.
    pub attempts: u32,
    /// True when the budget ran out and the fixed fallback was used.
    pub fallback: bool,
}

pub struct SpawnObstacles<'a> {
    pub planets: &'a [Body],
    pub black_holes: &'a [BlackHole],
    pub asteroids: &'a [Asteroid],
}

impl SpawnObstacles<'_> {
    /// Whether a point keeps every clearance the tuning asks for.
    pub fn is_clear(&self, x: f64, y: f64, tuning: &SpawnTuning) -> bool {
        let planets_clear = self
            .planets
            .iter()
            .all(|p| (x - p.x).hypot(y - p.y) >= p.radius + tuning.planet_margin);
        if !planets_clear {
            return false;
        }

        let holes_clear = self
            .black_holes
            .iter()
            .all(|bh| (x - bh.x).hypot(y - bh.y) >= bh.radius + tuning.black_hole_margin);
        if !holes_clear {
            return false;
        }

        // Squared distances only; this is the long list.
        self.asteroids.iter().all(|a| {
            let dx = x - a.x;
            let dy = y - a.y;
            let safe = a.radius + tuning.asteroid_margin;
            dx * dx + dy * dy >= safe * safe
        })
    }
}

/// Samples the spawn disk uniformly by area until a clear point is found.
///
/// Never fails: an exhausted budget returns `tuning.fallback` with
/// `fallback = true`.
pub fn find_spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    map_limit: f64,
    obstacles: &SpawnObstacles<'_>,
    tuning: &SpawnTuning,
) -> SpawnOutcome {
    let disk = map_limit * tuning.radius_fraction;

    for attempt in 1..=tuning.max_attempts {
        let angle = rng.random::<f64>() * TAU;
        let r = rng.random::<f64>().sqrt() * disk;
        let x = angle.cos() * r;
        let y = angle.sin() * r;

        if obstacles.is_clear(x, y, tuning) {
            return SpawnOutcome {
                x,
                y,
                attempts: attempt,
                fallback: false,
            };
        }
    }

    SpawnOutcome {
        x: tuning.fallback.0,
        y: tuning.fallback.1,
        attempts: tuning.max_attempts,
        fallback: true,
    }
}
