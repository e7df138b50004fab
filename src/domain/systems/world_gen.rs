// Procedural placement of the star system, the asteroid belt and black holes.

use crate::domain::state::{Asteroid, BlackHole, Body, BodyKind, OutlinePoint};
use crate::domain::tuning::WorldTuning;
use rand::Rng;
use std::f64::consts::{FRAC_PI_2, TAU};
use std::sync::Arc;

struct BodySpec {
    name: &'static str,
    radius: f64,
    orbital_radius: Option<f64>,
    kind: BodyKind,
    color: &'static str,
    ring_color: Option<&'static str>,
}

const SOLAR_SYSTEM: [BodySpec; 9] = [
    BodySpec {
        name: "Sun",
        radius: 800_000.0,
        orbital_radius: None,
        kind: BodyKind::Star,
        color: "#ffaa00",
        ring_color: None,
    },
    BodySpec {
        name: "Mercury",
        radius: 25_000.0,
        orbital_radius: Some(5_000_000.0),
        kind: BodyKind::Planet,
        color: "#9aa0a6",
        ring_color: None,
    },
    BodySpec {
        name: "Venus",
        radius: 55_000.0,
        orbital_radius: Some(9_000_000.0),
        kind: BodyKind::Planet,
        color: "#e3b27a",
        ring_color: None,
    },
    BodySpec {
        name: "Earth",
        radius: 60_000.0,
        orbital_radius: Some(15_000_000.0),
        kind: BodyKind::Planet,
        color: "#4aa1ff",
        ring_color: None,
    },
    BodySpec {
        name: "Mars",
        radius: 35_000.0,
        orbital_radius: Some(22_000_000.0),
        kind: BodyKind::Planet,
        color: "#ff8a5a",
        ring_color: None,
    },
    BodySpec {
        name: "Jupiter",
        radius: 350_000.0,
        orbital_radius: Some(40_000_000.0),
        kind: BodyKind::Planet,
        color: "#d9c19b",
        ring_color: None,
    },
    BodySpec {
        name: "Saturn",
        radius: 300_000.0,
        orbital_radius: Some(60_000_000.0),
        kind: BodyKind::Planet,
        color: "#f1e1b8",
        ring_color: Some("rgba(200, 180, 150, 0.4)"),
    },
    BodySpec {
        name: "Uranus",
        radius: 140_000.0,
        orbital_radius: Some(80_000_000.0),
        kind: BodyKind::Planet,
        color: "#9fe3e8",
        ring_color: Some("rgba(150, 220, 255, 0.3)"),
    },
    BodySpec {
        name: "Neptune",
        radius: 135_000.0,
        orbital_radius: Some(100_000_000.0),
        kind: BodyKind::Planet,
        color: "#557ee6",
        ring_color: None,
    },
];

pub struct GeneratedWorld {
    pub planets: Vec<Body>,
    pub black_holes: Vec<BlackHole>,
    pub asteroids: Vec<Asteroid>,
}

/// Builds the whole population. Shape is fixed, placement depends on `rng`.
pub fn generate_world<R: Rng + ?Sized>(rng: &mut R, tuning: &WorldTuning) -> GeneratedWorld {
    GeneratedWorld {
        planets: generate_planets(rng),
        black_holes: generate_black_holes(rng, tuning),
        asteroids: generate_asteroids(rng, tuning),
    }
}

/// Star at the origin plus the catalogue planets at random orbital angles.
pub fn generate_planets<R: Rng + ?Sized>(rng: &mut R) -> Vec<Body> {
    SOLAR_SYSTEM
        .iter()
        .map(|spec| {
            let (x, y) = match spec.orbital_radius {
                Some(orbit) => {
                    let angle = rng.random::<f64>() * TAU;
                    (angle.cos() * orbit, angle.sin() * orbit)
                }
                None => (0.0, 0.0),
            };
            Body {
                name: spec.name,
                x,
                y,
                radius: spec.radius,
                orbital_radius: spec.orbital_radius,
                kind: spec.kind,
                color: spec.color,
                has_rings: spec.ring_color.is_some(),
                ring_color: spec.ring_color,
            }
        })
        .collect()
}

pub fn generate_asteroids<R: Rng + ?Sized>(rng: &mut R, tuning: &WorldTuning) -> Vec<Asteroid> {
    let inner = tuning.belt_inner;
    let outer = (tuning.map_limit * tuning.belt_outer_fraction).max(inner);

    (0..tuning.asteroid_count)
        .map(|i| {
            let angle = rng.random::<f64>() * TAU;
            let dist = inner + rng.random::<f64>() * (outer - inner);

            // Mostly small rocks, a few giants.
            let radius = if rng.random::<f64>() < tuning.giant_chance {
                1500.0 + rng.random::<f64>() * 3000.0
            } else {
                200.0 + rng.random::<f64>() * 600.0
            };

            // Closer to the centre means faster, tangent to the orbit.
            let base_speed = (tuning.orbital_speed_constant / dist).sqrt();
            let speed = base_speed + (rng.random::<f64>() - 0.5) * tuning.orbital_speed_jitter;
            let orbit_angle = angle + FRAC_PI_2;

            Asteroid {
                id: i as u32,
                x: angle.cos() * dist,
                y: angle.sin() * dist,
                vx: orbit_angle.cos() * speed,
                vy: orbit_angle.sin() * speed,
                radius,
                rotation: rng.random::<f64>() * TAU,
                rotation_speed: (rng.random::<f64>() - 0.5) * tuning.rotation_speed_spread,
                outline: generate_outline(rng, radius),
            }
        })
        .collect()
}

pub fn generate_black_holes<R: Rng + ?Sized>(rng: &mut R, tuning: &WorldTuning) -> Vec<BlackHole> {
    let inner = tuning.black_hole_inner;
    let outer = (tuning.map_limit * tuning.black_hole_outer_fraction).max(inner);

    (0..tuning.black_hole_count)
        .map(|j| {
            let angle = rng.random::<f64>() * TAU;
            let dist = inner + rng.random::<f64>() * (outer - inner);
            BlackHole {
                id: format!("bh_{j}"),
                x: angle.cos() * dist,
                y: angle.sin() * dist,
                radius: 3000.0 + rng.random::<f64>() * 8000.0,
            }
        })
        .collect()
}

/// Irregular 5-9 vertex polygon, evenly spaced angles with jittered radius.
fn generate_outline<R: Rng + ?Sized>(rng: &mut R, radius: f64) -> Arc<[OutlinePoint]> {
    let count = rng.random_range(5..=9);
    (0..count)
        .map(|j| {
            let a = (j as f64 / count as f64) * TAU;
            let r = radius * (0.6 + rng.random::<f64>() * 0.4);
            OutlinePoint {
                x: a.cos() * r,
                y: a.sin() * r,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn small_tuning() -> WorldTuning {
        WorldTuning {
            asteroid_count: 2000,
            ..WorldTuning::default()
        }
    }

    #[test]
    fn asteroids_stay_inside_belt_bounds() {
        let tuning = small_tuning();
        let mut rng = Pcg32::seed_from_u64(1);
        let world = generate_world(&mut rng, &tuning);

        assert_eq!(world.asteroids.len(), 2000);
        for a in &world.asteroids {
            let d = a.x.hypot(a.y);
            // Tiny slack for the cos/sin round trip.
            assert!(d >= tuning.belt_inner - 1e-3, "asteroid {} too close: {d}", a.id);
            assert!(d < tuning.map_limit, "asteroid {} outside the barrier: {d}", a.id);
            assert!(a.rotation_speed.abs() <= 0.25);
        }
        // The belt runs all the way out to the barrier.
        let outermost = world
            .asteroids
            .iter()
            .map(|a| a.x.hypot(a.y))
            .fold(0.0, f64::max);
        assert!(outermost > 0.99 * tuning.map_limit, "outermost asteroid at {outermost}");
    }

    #[test]
    fn black_holes_stay_strictly_inside_barrier() {
        let tuning = small_tuning();
        let mut rng = Pcg32::seed_from_u64(2);
        let holes = generate_black_holes(&mut rng, &tuning);

        assert_eq!(holes.len(), 12);
        for bh in &holes {
            let d = bh.x.hypot(bh.y);
            assert!(d >= tuning.black_hole_inner - 1e-3);
            assert!(d < tuning.map_limit);
            assert!((3000.0..11_000.0).contains(&bh.radius));
        }
        assert_eq!(holes[3].id, "bh_3");
    }

    #[test]
    fn planets_sit_on_their_orbits() {
        let mut rng = Pcg32::seed_from_u64(3);
        let planets = generate_planets(&mut rng);

        assert_eq!(planets.len(), 9);
        assert_eq!(planets[0].kind, BodyKind::Star);
        assert_eq!((planets[0].x, planets[0].y), (0.0, 0.0));
        for p in planets.iter().skip(1) {
            let orbit = p.orbital_radius.expect("planets have an orbit");
            assert!((p.x.hypot(p.y) - orbit).abs() < 1.0, "{} off orbit", p.name);
        }
        let saturn = planets.iter().find(|p| p.name == "Saturn").expect("saturn");
        assert!(saturn.has_rings);
    }

    #[test]
    fn asteroid_velocity_is_tangent_and_shrinks_with_distance() {
        let tuning = WorldTuning {
            orbital_speed_jitter: 0.0,
            ..small_tuning()
        };
        let mut rng = Pcg32::seed_from_u64(4);
        let asteroids = generate_asteroids(&mut rng, &tuning);

        for a in asteroids.iter().take(200) {
            let dist = a.x.hypot(a.y);
            let radial = (a.x * a.vx + a.y * a.vy) / dist;
            assert!(radial.abs() < 1e-6, "velocity should be tangential");
            let expected = (tuning.orbital_speed_constant / dist).sqrt();
            assert!((a.vx.hypot(a.vy) - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn outlines_have_five_to_nine_vertices_within_radius() {
        let mut rng = Pcg32::seed_from_u64(5);
        let asteroids = generate_asteroids(&mut rng, &small_tuning());

        for a in &asteroids {
            assert!((5..=9).contains(&a.outline.len()));
            for p in a.outline.iter() {
                let r = p.x.hypot(p.y);
                assert!(r >= a.radius * 0.6 - 1e-6 && r <= a.radius + 1e-6);
            }
        }
    }

    #[test]
    fn same_seed_gives_same_world() {
        let tuning = WorldTuning {
            asteroid_count: 50,
            ..WorldTuning::default()
        };
        let a = generate_world(&mut Pcg32::seed_from_u64(9), &tuning);
        let b = generate_world(&mut Pcg32::seed_from_u64(9), &tuning);
        assert_eq!(a.asteroids[17].x, b.asteroids[17].x);
        assert_eq!(a.black_holes[5].y, b.black_holes[5].y);
        assert_eq!(a.planets[4].x, b.planets[4].x);
    }
}
