// World bootstrap: generate once, then start the physics worker and game loop.

use super::game::{Simulation, world_task};
use super::physics_worker::physics_task;
use super::types::{GameEvent, HazardSnapshot, SimError};
use crate::domain::StaticWorld;
use crate::domain::systems::world_gen::generate_world;
use crate::domain::tuning::{SimTuning, WorldTuning};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::info;

/// Settings for spawning the single shared world.
#[derive(Debug, Clone)]
pub struct WorldSettings {
    pub world: WorldTuning,
    pub tuning: SimTuning,
    /// Fixed seed for generation and spawn search; random when `None`.
    pub seed: Option<u64>,
    /// Capacity for join and leave events. Controls travel per connection.
    pub input_channel_capacity: usize,
    pub game_tick: Duration,
    pub physics_tick: Duration,
    pub stats_interval: Duration,
}

/// What connections need to join the world.
#[derive(Clone)]
pub struct WorldHandle {
    pub input_tx: mpsc::Sender<GameEvent>,
    /// Planets and black holes; never change after generation.
    pub world: Arc<StaticWorld>,
}

/// Background tasks driving the world.
pub struct WorldTasks {
    pub physics: JoinHandle<()>,
    pub game: JoinHandle<Result<(), SimError>>,
}

/// Generates the world and spawns both simulation tasks.
///
/// Must be called from inside a tokio runtime.
pub fn spawn_world(settings: &WorldSettings) -> (WorldHandle, WorldTasks) {
    let mut rng = match settings.seed {
        Some(seed) => Pcg32::seed_from_u64(seed),
        None => Pcg32::from_rng(&mut rand::rng()),
    };

    let generated = generate_world(&mut rng, &settings.world);
    info!(
        seed = ?settings.seed,
        planets = generated.planets.len(),
        black_holes = generated.black_holes.len(),
        asteroids = generated.asteroids.len(),
        "world generated"
    );

    let world = Arc::new(StaticWorld::new(
        settings.world.map_limit,
        generated.planets,
        generated.black_holes,
    ));

    // Seed the channel with tick 0 so joins before the first physics tick
    // still see every asteroid.
    let (hazards_tx, hazards_rx) = watch::channel(Arc::new(HazardSnapshot {
        tick: 0,
        asteroids: generated.asteroids.clone(),
    }));
    let physics = tokio::spawn(physics_task(
        generated.asteroids,
        settings.world.map_limit,
        settings.physics_tick,
        hazards_tx,
    ));

    let (input_tx, input_rx) = mpsc::channel::<GameEvent>(settings.input_channel_capacity);
    let sim = Simulation::new(
        world.clone(),
        settings.tuning,
        settings.world.grid_cell_size,
        rng,
    );
    let game = tokio::spawn(world_task(
        input_rx,
        hazards_rx,
        sim,
        settings.game_tick,
        settings.stats_interval,
    ));

    (WorldHandle { input_tx, world }, WorldTasks { physics, game })
}
