// Use cases layer: world bootstrap, physics worker and the authoritative loop.

pub mod game;
pub mod physics_worker;
pub mod types;
pub mod world;

pub use types::{
    GameEvent, GameOver, HazardSnapshot, NavOrder, PilotControls, PlayerFeed, PlayerLink, PlayerUpdate,
    SimError,
};
pub use world::{WorldHandle, WorldSettings, WorldTasks, spawn_world};
