use crate::domain::state::{BodyKind, LargeBody};
use crate::domain::tuning::GravityTuning;

/// Summed pull at a point plus how deep inside any pull radius it sits.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GravityField {
    pub ax: f64,
    pub ay: f64,
    /// Max over contributing bodies of `1 - dist / pull_radius`, 0 when none.
    pub danger: f64,
}

impl GravityField {
    pub fn is_zero(&self) -> bool {
        self.ax == 0.0 && self.ay == 0.0
    }
}

pub fn pull_radius(body: &LargeBody, tuning: &GravityTuning) -> f64 {
    body.radius * tuning.pull_radius_factor
}

pub fn body_mass(body: &LargeBody, tuning: &GravityTuning) -> f64 {
    let factor = match body.kind {
        BodyKind::BlackHole => tuning.black_hole_mass_factor,
        BodyKind::Star | BodyKind::Planet => tuning.planet_mass_factor,
    };
    body.radius * factor
}

/// Accumulates attraction from every gravity-bearing body whose pull radius
/// contains the point.
pub fn accumulate_gravity(x: f64, y: f64, bodies: &[LargeBody], tuning: &GravityTuning) -> GravityField {
    let mut field = GravityField::default();

    for body in bodies.iter().filter(|b| b.gravity) {
        let dx = body.x - x;
        let dy = body.y - y;
        let dist_sq = dx * dx + dy * dy;
        let pull = pull_radius(body, tuning);
        if dist_sq >= pull * pull {
            continue;
        }

        let dist = dist_sq.sqrt();
        let ratio = 1.0 - dist / pull;
        if ratio > field.danger {
            field.danger = ratio;
        }
        // Sitting on the centre: no defined direction.
        if dist == 0.0 {
            continue;
        }

        let force = tuning.g * body_mass(body, tuning) / dist_sq.max(tuning.min_dist_sq);
        field.ax += dx / dist * force;
        field.ay += dy / dist * force;
    }

    field
}
