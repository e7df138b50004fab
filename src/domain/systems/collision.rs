use crate::domain::state::{Asteroid, DeathCause, LargeBody};
use crate::domain::systems::spatial_grid::SpatialGrid;
use crate::domain::tuning::CollisionTuning;

/// Read-only view of every hazard for one tick.
///
/// `grid` must have been rebuilt from `asteroids` so its handles index into it.
#[derive(Clone, Copy)]
pub struct HazardField<'a> {
    pub large_bodies: &'a [LargeBody],
    pub asteroids: &'a [Asteroid],
    pub grid: &'a SpatialGrid<usize>,
}

impl<'a> HazardField<'a> {
    /// Asteroids in the grid neighbourhood of a point (conservative).
    pub fn nearby_asteroids(&self, x: f64, y: f64) -> impl Iterator<Item = &'a Asteroid> + 'a {
        let asteroids = self.asteroids;
        self.grid
            .query_neighborhood(x, y)
            .into_iter()
            .filter_map(move |i| asteroids.get(i))
    }
}

/// Returns the first hazard the ship overlaps, large bodies before asteroids.
pub fn check_collision(x: f64, y: f64, field: &HazardField<'_>, tuning: &CollisionTuning) -> Option<DeathCause> {
    let ship_radius = tuning.ship_radius;

    for body in field.large_bodies {
        let dx = x - body.x;
        let dy = y - body.y;
        let reach = body.radius + ship_radius + tuning.large_body_slack;
        if dx.abs() > reach || dy.abs() > reach {
            continue;
        }
        if dx * dx + dy * dy < body.radius * body.radius {
            return Some(DeathCause::for_body(body.kind));
        }
    }

    for rock in field.nearby_asteroids(x, y) {
        let dx = x - rock.x;
        let dy = y - rock.y;
        let reach = rock.radius + ship_radius;
        if dx.abs() > reach || dy.abs() > reach {
            continue;
        }
        if dx * dx + dy * dy < rock.radius * rock.radius {
            return Some(DeathCause::AsteroidImpact);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::state::BodyKind;
    use std::sync::Arc;

    fn large(x: f64, y: f64, radius: f64, kind: BodyKind) -> LargeBody {
        LargeBody {
            x,
            y,
            radius,
            kind,
            gravity: true,
        }
    }

    fn rock(x: f64, y: f64, radius: f64) -> Asteroid {
        Asteroid {
            id: 1,
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            radius,
            rotation: 0.0,
            rotation_speed: 0.0,
            outline: Arc::from(Vec::new()),
        }
    }

    fn grid_for(asteroids: &[Asteroid]) -> SpatialGrid {
        let mut grid = SpatialGrid::new(20_000.0);
        grid.rebuild(asteroids);
        grid
    }

    #[test]
    fn reports_reason_per_body_kind() {
        let tuning = CollisionTuning::default();
        let grid = grid_for(&[]);
        for (kind, cause) in [
            (BodyKind::BlackHole, DeathCause::TidalForces),
            (BodyKind::Star, DeathCause::StellarHeat),
            (BodyKind::Planet, DeathCause::PlanetaryImpact),
        ] {
            let bodies = [large(0.0, 0.0, 1000.0, kind)];
            let field = HazardField {
                large_bodies: &bodies,
                asteroids: &[],
                grid: &grid,
            };
            assert_eq!(check_collision(999.0, 0.0, &field, &tuning), Some(cause));
            assert_eq!(check_collision(1000.0, 0.0, &field, &tuning), None);
        }
    }

    #[test]
    fn hits_nearby_asteroid() {
        let tuning = CollisionTuning::default();
        let rocks = [rock(50_000.0, 50_000.0, 500.0)];
        let grid = grid_for(&rocks);
        let field = HazardField {
            large_bodies: &[],
            asteroids: &rocks,
            grid: &grid,
        };
        assert_eq!(
            check_collision(50_300.0, 50_300.0, &field, &tuning),
            Some(DeathCause::AsteroidImpact)
        );
        assert_eq!(check_collision(50_400.0, 50_400.0, &field, &tuning), None);
    }

    #[test]
    fn large_body_wins_over_simultaneous_asteroid_hit() {
        let tuning = CollisionTuning::default();
        let bodies = [large(0.0, 0.0, 60_000.0, BodyKind::Planet)];
        let rocks = [rock(100.0, 0.0, 800.0)];
        let grid = grid_for(&rocks);
        let field = HazardField {
            large_bodies: &bodies,
            asteroids: &rocks,
            grid: &grid,
        };
        assert_eq!(
            check_collision(0.0, 0.0, &field, &tuning),
            Some(DeathCause::PlanetaryImpact)
        );
    }

    #[test]
    fn clear_space_reports_nothing() {
        let tuning = CollisionTuning::default();
        let bodies = [large(1.0e6, 0.0, 60_000.0, BodyKind::Planet)];
        let rocks = [rock(-30_000.0, 0.0, 800.0)];
        let grid = grid_for(&rocks);
        let field = HazardField {
            large_bodies: &bodies,
            asteroids: &rocks,
            grid: &grid,
        };
        assert_eq!(check_collision(0.0, 0.0, &field, &tuning), None);
    }
}
