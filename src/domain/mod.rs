// Domain layer: core simulation types and rules.

pub mod state;
pub mod systems;
pub mod tuning;

pub use state::{
    Asteroid, BlackHole, Body, BodyKind, DeathCause, LargeBody, OutlinePoint, Ship, ShipInput,
    ShipSnapshot, StaticWorld,
};
