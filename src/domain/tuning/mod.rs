// Gameplay tuning, kept apart from runtime/server configuration.

pub mod hazard;
pub mod ship;
pub mod spawn;
pub mod world;

pub use hazard::{CollisionTuning, GravityTuning, NavigationTuning};
pub use ship::ShipTuning;
pub use spawn::SpawnTuning;
pub use world::{InterestTuning, WorldTuning};

/// Everything the game loop needs to simulate a tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimTuning {
    pub ship: ShipTuning,
    pub gravity: GravityTuning,
    pub collision: CollisionTuning,
    pub navigation: NavigationTuning,
    pub spawn: SpawnTuning,
    pub interest: InterestTuning,
}
