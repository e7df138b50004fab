// Domain-level simulation entities and input/snapshot types.

use std::f64::consts::PI;
use std::sync::Arc;

/// Visual/behavioural class of a large body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Star,
    Planet,
    BlackHole,
}

/// Star or planet. Immutable once the world is generated.
#[derive(Debug, Clone)]
pub struct Body {
    pub name: &'static str,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    /// `None` for the central star.
    pub orbital_radius: Option<f64>,
    pub kind: BodyKind,
    pub color: &'static str,
    pub has_rings: bool,
    pub ring_color: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct BlackHole {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// One vertex of an asteroid outline, relative to its centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlinePoint {
    pub x: f64,
    pub y: f64,
}

/// Moving belt object. Collision math treats it as a circle of `radius`;
/// `outline` is cosmetic only.
#[derive(Debug, Clone)]
pub struct Asteroid {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    pub rotation: f64,
    pub rotation_speed: f64,
    pub outline: Arc<[OutlinePoint]>,
}

/// Flattened view of a star, planet or black hole as seen by the hazard engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LargeBody {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub kind: BodyKind,
    /// Whether the body contributes to the gravity field.
    pub gravity: bool,
}

impl From<&Body> for LargeBody {
    fn from(b: &Body) -> Self {
        Self {
            x: b.x,
            y: b.y,
            radius: b.radius,
            kind: b.kind,
            gravity: true,
        }
    }
}

impl From<&BlackHole> for LargeBody {
    fn from(bh: &BlackHole) -> Self {
        Self {
            x: bh.x,
            y: bh.y,
            radius: bh.radius,
            kind: BodyKind::BlackHole,
            gravity: true,
        }
    }
}

/// Immutable part of the world, shared read-only by every connection.
#[derive(Debug, Clone)]
pub struct StaticWorld {
    pub map_limit: f64,
    pub planets: Vec<Body>,
    pub black_holes: Vec<BlackHole>,
    /// Stars and planets first, then black holes.
    pub large_bodies: Vec<LargeBody>,
}

impl StaticWorld {
    pub fn new(map_limit: f64, planets: Vec<Body>, black_holes: Vec<BlackHole>) -> Self {
        let large_bodies = planets
            .iter()
            .map(LargeBody::from)
            .chain(black_holes.iter().map(LargeBody::from))
            .collect();
        Self {
            map_limit,
            planets,
            black_holes,
            large_bodies,
        }
    }
}

/// Last intent received from a client. Overwritten, never queued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShipInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl ShipInput {
    pub fn is_idle(&self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }
}

/// Why a ship was destroyed. Terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    PlasmaBarrier,
    TidalForces,
    StellarHeat,
    PlanetaryImpact,
    AsteroidImpact,
}

impl DeathCause {
    pub fn for_body(kind: BodyKind) -> Self {
        match kind {
            BodyKind::BlackHole => DeathCause::TidalForces,
            BodyKind::Star => DeathCause::StellarHeat,
            BodyKind::Planet => DeathCause::PlanetaryImpact,
        }
    }

    /// Player-facing message sent with `gameOver`.
    pub fn reason(&self) -> &'static str {
        match self {
            DeathCause::PlasmaBarrier => "DISINTEGRATED - PLASMA BARRIER",
            DeathCause::TidalForces => "Torn apart by tidal forces.",
            DeathCause::StellarHeat => "Vaporized by stellar heat.",
            DeathCause::PlanetaryImpact => "Planetary collision.",
            DeathCause::AsteroidImpact => "Critical impact with an asteroid.",
        }
    }
}

/// Authoritative player ship.
#[derive(Debug, Clone)]
pub struct Ship {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    /// Heading in (-PI, PI].
    pub angle: f64,
    /// Scalar speed in [0, max_speed].
    pub speed: f64,
    pub input: ShipInput,
    pub alive: bool,
    /// Strongest gravity danger ratio felt on the last tick.
    pub gravity_danger: f64,
}

impl Ship {
    pub fn new(id: u64, x: f64, y: f64, angle: f64) -> Self {
        Self {
            id,
            x,
            y,
            angle: wrap_angle(angle),
            speed: 0.0,
            input: ShipInput::default(),
            alive: true,
            gravity_danger: 0.0,
        }
    }

    pub fn heading(&self) -> (f64, f64) {
        (self.angle.cos(), self.angle.sin())
    }
}

/// What other connections get to see about a ship.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipSnapshot {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub angle: f64,
    pub speed: f64,
    pub input: ShipInput,
    pub alive: bool,
    pub navigating: bool,
    /// Autopilot threat level from [`Steering::threat_level`], 0 when not navigating.
    ///
    /// [`Steering::threat_level`]: crate::domain::systems::navigation::Steering::threat_level
    pub nav_threat: u8,
    pub gravity_danger: f64,
}

/// Wraps an angle into (-PI, PI].
pub fn wrap_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let mut a = angle % (2.0 * PI);
    if a <= -PI {
        a += 2.0 * PI;
    } else if a > PI {
        a -= 2.0 * PI;
    }
    a
}

/// Signed shortest rotation from `from` to `to`, in (-PI, PI].
pub fn angle_difference(from: f64, to: f64) -> f64 {
    wrap_angle(to - from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_angle_stays_in_half_open_range() {
        for raw in [-10.0, -PI, -PI + 0.001, 0.0, PI, PI + 0.001, 7.5, 100.0] {
            let a = wrap_angle(raw);
            assert!(a > -PI && a <= PI, "{raw} wrapped to {a}");
        }
        assert_eq!(wrap_angle(-PI), PI);
    }

    #[test]
    fn angle_difference_takes_short_way_round() {
        let d = angle_difference(PI - 0.1, -PI + 0.1);
        assert!((d - 0.2).abs() < 1e-9);
    }

    #[test]
    fn large_bodies_list_planets_before_black_holes() {
        let sun = Body {
            name: "Sun",
            x: 0.0,
            y: 0.0,
            radius: 10.0,
            orbital_radius: None,
            kind: BodyKind::Star,
            color: "#ffaa00",
            has_rings: false,
            ring_color: None,
        };
        let bh = BlackHole {
            id: "bh_0".to_string(),
            x: 5.0,
            y: 5.0,
            radius: 3.0,
        };
        let world = StaticWorld::new(100.0, vec![sun], vec![bh]);
        let kinds: Vec<BodyKind> = world.large_bodies.iter().map(|b| b.kind).collect();
        assert_eq!(kinds, vec![BodyKind::Star, BodyKind::BlackHole]);
    }
}
