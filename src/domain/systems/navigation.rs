// Obstacle avoidance heuristic producing a unit steering vector.

use crate::domain::systems::collision::HazardField;
use crate::domain::systems::gravity::GravityField;
use crate::domain::tuning::NavigationTuning;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steering {
    pub x: f64,
    pub y: f64,
    pub threat: bool,
    /// 1 once inside an obstacle's safety margin, else 0.
    pub urgency: u8,
}

impl Steering {
    /// 0 when clear, 1 with an obstacle ahead, 2 inside its safety margin.
    pub fn threat_level(&self) -> u8 {
        if self.threat { 1 + self.urgency } else { 0 }
    }
}

/// Where the ship wants to go and how it is currently pointed.
#[derive(Debug, Clone, Copy)]
pub struct NavigationRequest {
    pub ship_x: f64,
    pub ship_y: f64,
    pub target_x: f64,
    pub target_y: f64,
    /// Unit heading vector.
    pub heading: (f64, f64),
    pub gravity: GravityField,
}

#[derive(Debug, Clone, Copy)]
struct Obstacle {
    x: f64,
    y: f64,
    radius: f64,
}

impl Obstacle {
    fn safe_distance(&self, tuning: &NavigationTuning) -> f64 {
        self.radius * tuning.safe_size_factor + tuning.safe_base
    }
}

/// Closest obstacle that is inside its safety margin or lies ahead.
fn most_threatening(
    req: &NavigationRequest,
    obstacles: impl Iterator<Item = Obstacle>,
    tuning: &NavigationTuning,
) -> Option<Obstacle> {
    let mut closest = f64::INFINITY;
    let mut threat = None;

    for obs in obstacles {
        let ox = obs.x - req.ship_x;
        let oy = obs.y - req.ship_y;
        let dist_sq = ox * ox + oy * oy;
        let detect = tuning.detect_base + obs.radius * tuning.detect_size_factor;
        if dist_sq > detect * detect {
            continue;
        }

        let dist = dist_sq.sqrt();
        let dot = if dist > 0.0 {
            (ox * req.heading.0 + oy * req.heading.1) / dist
        } else {
            1.0
        };
        if (dist < obs.safe_distance(tuning) || dot > tuning.ahead_dot) && dist < closest {
            closest = dist;
            threat = Some(obs);
        }
    }

    threat
}

/// Steering toward the target that bends around the nearest threat and leans
/// against the current gravity pull.
///
/// Large bodies are scanned first; asteroids are considered only when no large
/// body threatens. The body at `ignore` (the navigation target, if it is a
/// body) is never treated as an obstacle.
pub fn navigation_vector(
    req: &NavigationRequest,
    field: &HazardField<'_>,
    ignore: Option<(f64, f64)>,
    tuning: &NavigationTuning,
) -> Steering {
    let dx = req.target_x - req.ship_x;
    let dy = req.target_y - req.ship_y;
    let to_target = dx.hypot(dy);
    let (mut nav_x, mut nav_y) = if to_target > 0.0 {
        (dx / to_target, dy / to_target)
    } else {
        (0.0, 0.0)
    };
    let mut threat_detected = false;
    let mut urgency = 0;

    let not_ignored = |o: &Obstacle| ignore != Some((o.x, o.y));

    let large = field
        .large_bodies
        .iter()
        .map(|b| Obstacle {
            x: b.x,
            y: b.y,
            radius: b.radius,
        })
        .filter(not_ignored);
    let threat = most_threatening(req, large, tuning).or_else(|| {
        let rocks = field
            .nearby_asteroids(req.ship_x, req.ship_y)
            .map(|a| Obstacle {
                x: a.x,
                y: a.y,
                radius: a.radius,
            })
            .filter(not_ignored);
        most_threatening(req, rocks, tuning)
    });

    if let Some(obs) = threat {
        threat_detected = true;
        let ox = obs.x - req.ship_x;
        let oy = obs.y - req.ship_y;
        let dist = ox.hypot(oy);
        if dist > 0.0 {
            // Perpendicular to the obstacle bearing, on the side the target already leans to.
            let ortho_x = -oy / dist;
            let ortho_y = ox / dist;
            let side = if ortho_x * nav_x + ortho_y * nav_y > 0.0 { 1.0 } else { -1.0 };

            let safe = obs.safe_distance(tuning);
            let danger = (1.0 - dist / (safe * 1.5)).max(0.0);
            let evasion = tuning.evasion_base + danger * tuning.evasion_gain;
            nav_x = ortho_x * side * evasion + nav_x * tuning.direct_weight;
            nav_y = ortho_y * side * evasion + nav_y * tuning.direct_weight;

            if dist < safe {
                urgency = 1;
                nav_x -= ox / dist * tuning.repulsion;
                nav_y -= oy / dist * tuning.repulsion;
            }
        } else {
            urgency = 1;
        }
    }

    if !req.gravity.is_zero() {
        nav_x -= req.gravity.ax * tuning.anti_gravity_scale;
        nav_y -= req.gravity.ay * tuning.anti_gravity_scale;
    }

    let len = nav_x.hypot(nav_y);
    let len = if len > 0.0 { len } else { 1.0 };
    Steering {
        x: nav_x / len,
        y: nav_y / len,
        threat: threat_detected,
        urgency,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::state::{Asteroid, BodyKind, LargeBody};
    use crate::domain::systems::spatial_grid::SpatialGrid;
    use std::sync::Arc;

    fn planet(x: f64, y: f64, radius: f64) -> LargeBody {
        LargeBody {
            x,
            y,
            radius,
            kind: BodyKind::Planet,
            gravity: true,
        }
    }

    fn request(target_x: f64, target_y: f64) -> NavigationRequest {
        NavigationRequest {
            ship_x: 0.0,
            ship_y: 0.0,
            target_x,
            target_y,
            heading: (1.0, 0.0),
            gravity: GravityField::default(),
        }
    }

    fn length(s: &Steering) -> f64 {
        s.x.hypot(s.y)
    }

    #[test]
    fn open_space_points_straight_at_target() {
        let grid = SpatialGrid::new(20_000.0);
        let field = HazardField {
            large_bodies: &[],
            asteroids: &[],
            grid: &grid,
        };
        let s = navigation_vector(&request(3.0, 4.0), &field, None, &NavigationTuning::default());
        assert!((s.x - 0.6).abs() < 1e-12 && (s.y - 0.8).abs() < 1e-12);
        assert!(!s.threat);
        assert_eq!(s.urgency, 0);
        assert_eq!(s.threat_level(), 0);
    }

    #[test]
    fn body_ahead_bends_course_sideways() {
        let grid = SpatialGrid::new(20_000.0);
        let bodies = [planet(50_000.0, 0.0, 1000.0)];
        let field = HazardField {
            large_bodies: &bodies,
            asteroids: &[],
            grid: &grid,
        };
        // Target slightly to the +y side of the planet.
        let s = navigation_vector(&request(100_000.0, 1000.0), &field, None, &NavigationTuning::default());
        assert!(s.threat);
        assert_eq!(s.urgency, 0);
        assert_eq!(s.threat_level(), 1);
        assert!(s.y > 0.9, "expected evasion toward +y, got {s:?}");
        assert!((length(&s) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn inside_safety_margin_pushes_away_with_urgency() {
        let grid = SpatialGrid::new(20_000.0);
        // Behind the ship, safe distance 1000*3.5+3000 = 6500.
        let bodies = [planet(-4000.0, 0.0, 1000.0)];
        let field = HazardField {
            large_bodies: &bodies,
            asteroids: &[],
            grid: &grid,
        };
        let s = navigation_vector(&request(0.0, 100_000.0), &field, None, &NavigationTuning::default());
        assert!(s.threat);
        assert_eq!(s.urgency, 1);
        assert_eq!(s.threat_level(), 2);
        assert!(s.x > 0.0, "repulsion should push away from the body");
    }

    #[test]
    fn body_behind_and_outside_margin_is_ignored() {
        let grid = SpatialGrid::new(20_000.0);
        let bodies = [planet(-30_000.0, 0.0, 1000.0)];
        let field = HazardField {
            large_bodies: &bodies,
            asteroids: &[],
            grid: &grid,
        };
        let s = navigation_vector(&request(10.0, 0.0), &field, None, &NavigationTuning::default());
        assert!(!s.threat);
        assert!((s.x - 1.0).abs() < 1e-12);
    }

    #[test]
    fn target_body_is_not_an_obstacle() {
        let grid = SpatialGrid::new(20_000.0);
        let bodies = [planet(40_000.0, 0.0, 1000.0)];
        let field = HazardField {
            large_bodies: &bodies,
            asteroids: &[],
            grid: &grid,
        };
        let s = navigation_vector(
            &request(40_000.0, 0.0),
            &field,
            Some((40_000.0, 0.0)),
            &NavigationTuning::default(),
        );
        assert!(!s.threat);
    }

    #[test]
    fn asteroids_considered_when_no_large_body_threatens() {
        let rocks = [Asteroid {
            id: 3,
            x: 3000.0,
            y: 0.0,
            vx: 0.0,
            vy: 0.0,
            radius: 400.0,
            rotation: 0.0,
            rotation_speed: 0.0,
            outline: Arc::from(Vec::new()),
        }];
        let mut grid = SpatialGrid::new(20_000.0);
        grid.rebuild(&rocks);
        let field = HazardField {
            large_bodies: &[],
            asteroids: &rocks,
            grid: &grid,
        };
        let s = navigation_vector(&request(100_000.0, 0.0), &field, None, &NavigationTuning::default());
        assert!(s.threat);
        assert_eq!(s.urgency, 1);
    }

    #[test]
    fn anti_gravity_leans_against_the_pull() {
        let grid = SpatialGrid::new(20_000.0);
        let field = HazardField {
            large_bodies: &[],
            asteroids: &[],
            grid: &grid,
        };
        let mut req = request(1.0, 0.0);
        req.gravity = GravityField {
            ax: 0.0,
            ay: 0.5,
            danger: 0.3,
        };
        let s = navigation_vector(&req, &field, None, &NavigationTuning::default());
        // Direct (1,0) minus 6 * (0,0.5) = (1,-3).
        let n = 10f64.sqrt();
        assert!((s.x - 1.0 / n).abs() < 1e-12);
        assert!((s.y + 3.0 / n).abs() < 1e-12);
    }
}
