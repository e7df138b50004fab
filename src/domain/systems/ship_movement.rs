use crate::domain::state::{DeathCause, Ship, wrap_angle};
use crate::domain::tuning::ShipTuning;

/// Applies stored intent, integrates position and enforces the barrier.
///
/// Returns `Some(DeathCause::PlasmaBarrier)` on the tick the ship crosses
/// `map_limit`; the ship is marked dead and later calls are no-ops.
pub fn tick_ship(ship: &mut Ship, dt: f64, tuning: &ShipTuning, map_limit: f64) -> Option<DeathCause> {
    if !ship.alive {
        return None;
    }

    // rotation
    if ship.input.left {
        ship.angle -= tuning.turn_rate * dt;
    }
    if ship.input.right {
        ship.angle += tuning.turn_rate * dt;
    }
    ship.angle = wrap_angle(ship.angle);

    // thrust wins over reverse when both are held
    if ship.input.up {
        ship.speed += tuning.acceleration * dt;
    } else if ship.input.down {
        ship.speed -= tuning.acceleration * dt;
    }
    ship.speed = ship.speed.clamp(0.0, tuning.max_speed);

    // position integrate
    let (hx, hy) = ship.heading();
    ship.x += hx * ship.speed * dt;
    ship.y += hy * ship.speed * dt;

    if ship.x.hypot(ship.y) > map_limit {
        ship.alive = false;
        ship.speed = 0.0;
        return Some(DeathCause::PlasmaBarrier);
    }

    None
}
