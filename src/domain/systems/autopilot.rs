// Server-side autopilot: turns the navigation vector into ship input.

use crate::domain::state::{Ship, ShipInput, angle_difference};
use crate::domain::systems::collision::HazardField;
use crate::domain::systems::gravity::GravityField;
use crate::domain::systems::navigation::{NavigationRequest, Steering, navigation_vector};
use crate::domain::tuning::NavigationTuning;

/// Active navigation order for one ship.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavTarget {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AutopilotStep {
    /// Close enough; the order should be dropped and the ship left idle.
    Arrived,
    Steer { input: ShipInput, steering: Steering },
}

/// Decides this tick's input for a ship flying toward `target`.
pub fn autopilot_step(
    ship: &Ship,
    target: NavTarget,
    gravity: GravityField,
    field: &HazardField<'_>,
    tuning: &NavigationTuning,
) -> AutopilotStep {
    let dist = (target.x - ship.x).hypot(target.y - ship.y);
    if dist < tuning.arrival_radius {
        return AutopilotStep::Arrived;
    }

    let req = NavigationRequest {
        ship_x: ship.x,
        ship_y: ship.y,
        target_x: target.x,
        target_y: target.y,
        heading: ship.heading(),
        gravity,
    };
    let ignore = field
        .large_bodies
        .iter()
        .find(|b| (b.x - target.x).hypot(b.y - target.y) <= b.radius)
        .map(|b| (b.x, b.y));
    let steering = navigation_vector(&req, field, ignore, tuning);

    let desired = steering.y.atan2(steering.x);
    let diff = angle_difference(ship.angle, desired);
    let mut input = ShipInput::default();
    if diff.abs() > tuning.turn_deadband {
        if diff > 0.0 {
            input.right = true;
        } else {
            input.left = true;
        }
    }
    if diff.abs() < tuning.thrust_cone {
        input.up = true;
    }

    AutopilotStep::Steer { input, steering }
}
