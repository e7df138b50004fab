use super::types::{
    GameEvent, GameOver, HazardSnapshot, NavOrder, PilotControls, PlayerLink, PlayerUpdate, SimError,
};
use crate::domain::systems::autopilot::{AutopilotStep, NavTarget, autopilot_step};
use crate::domain::systems::collision::{HazardField, check_collision};
use crate::domain::systems::gravity::accumulate_gravity;
use crate::domain::systems::interest::visible_asteroids;
use crate::domain::systems::ship_movement::tick_ship;
use crate::domain::systems::spatial_grid::SpatialGrid;
use crate::domain::systems::spawn::{SpawnObstacles, find_spawn_position};
use crate::domain::tuning::SimTuning;
use crate::domain::{DeathCause, Ship, ShipInput, ShipSnapshot, StaticWorld};
use rand_pcg::Pcg32;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

struct PlayerSlot {
    ship: Ship,
    nav: Option<NavTarget>,
    // Threat level of the last autopilot step.
    nav_threat: u8,
    link: PlayerLink,
    // Sequence numbers of the last applied controls.
    keys_seq: u64,
    nav_seq: u64,
}

impl PlayerSlot {
    fn new(ship: Ship, link: PlayerLink) -> Self {
        Self {
            ship,
            nav: None,
            nav_threat: 0,
            link,
            keys_seq: 0,
            nav_seq: 0,
        }
    }

    /// Applies whatever the connection wrote since the last call.
    fn apply_controls(&mut self) {
        // A closed sender means the connection is gone and Leave is on its way.
        if !self.link.controls.has_changed().unwrap_or(false) {
            return;
        }
        let controls: PilotControls = *self.link.controls.borrow_and_update();
        let keys = (controls.keys_seq > self.keys_seq).then_some(controls.keys);
        let nav = (controls.nav_seq > self.nav_seq).then_some(controls.nav);
        self.keys_seq = controls.keys_seq;
        self.nav_seq = controls.nav_seq;

        // Dead ships stay frozen.
        if !self.ship.alive {
            return;
        }
        if controls.keys_seq < controls.nav_seq {
            self.apply_keys(keys);
            self.apply_nav(nav);
        } else {
            self.apply_nav(nav);
            self.apply_keys(keys);
        }
    }

    fn apply_keys(&mut self, keys: Option<ShipInput>) {
        let Some(keys) = keys else { return };
        self.ship.input = keys;
        // Manual control takes over from the autopilot.
        if !keys.is_idle() {
            self.nav = None;
        }
    }

    fn apply_nav(&mut self, order: Option<NavOrder>) {
        match order {
            Some(NavOrder::Engage(target)) if target.x.is_finite() && target.y.is_finite() => {
                self.nav = Some(target);
            }
            Some(NavOrder::Cancel) => {
                self.nav = None;
                self.ship.input = ShipInput::default();
            }
            _ => {}
        }
    }

    fn snapshot(&self) -> ShipSnapshot {
        ShipSnapshot {
            id: self.ship.id,
            x: self.ship.x,
            y: self.ship.y,
            angle: self.ship.angle,
            speed: self.ship.speed,
            input: self.ship.input,
            alive: self.ship.alive,
            navigating: self.nav.is_some(),
            nav_threat: if self.nav.is_some() { self.nav_threat } else { 0 },
            gravity_danger: self.ship.gravity_danger,
        }
    }

    fn kill(&mut self, cause: DeathCause) {
        self.ship.alive = false;
        self.ship.speed = 0.0;
        self.ship.input = ShipInput::default();
        self.nav = None;
        if let Some(tx) = self.link.game_over.take() {
            // Receiver may already be gone if the socket closed this tick.
            let _ = tx.send(GameOver {
                reason: cause.reason(),
            });
        }
        info!(player_id = self.ship.id, cause = ?cause, x = self.ship.x, y = self.ship.y, "player died");
    }
}

/// Authoritative simulation state. Owned by the game loop task.
pub struct Simulation {
    world: Arc<StaticWorld>,
    tuning: SimTuning,
    grid: SpatialGrid,
    players: BTreeMap<u64, PlayerSlot>,
    rng: Pcg32,
    tick: u64,
}

impl Simulation {
    pub fn new(world: Arc<StaticWorld>, tuning: SimTuning, grid_cell_size: f64, rng: Pcg32) -> Self {
        Self {
            world,
            tuning,
            grid: SpatialGrid::new(grid_cell_size),
            players: BTreeMap::new(),
            rng,
            tick: 0,
        }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn ship(&self, player_id: u64) -> Option<&Ship> {
        self.players.get(&player_id).map(|slot| &slot.ship)
    }

    /// Applies one event from the network. Spawn placement uses `hazards`.
    pub fn handle_event(&mut self, ev: GameEvent, hazards: &HazardSnapshot) {
        match ev {
            GameEvent::Join { player_id, link } => {
                if self.players.contains_key(&player_id) {
                    warn!(player_id, "duplicate join ignored");
                    return;
                }
                let obstacles = SpawnObstacles {
                    planets: &self.world.planets,
                    black_holes: &self.world.black_holes,
                    asteroids: &hazards.asteroids,
                };
                let spawn = find_spawn_position(
                    &mut self.rng,
                    self.world.map_limit,
                    &obstacles,
                    &self.tuning.spawn,
                );
                if spawn.fallback {
                    warn!(player_id, attempts = spawn.attempts, "no safe spawn found; using fallback");
                } else {
                    debug!(player_id, attempts = spawn.attempts, "safe spawn found");
                }
                info!(player_id, x = spawn.x, y = spawn.y, "player joined");

                let ship = Ship::new(player_id, spawn.x, spawn.y, self.tuning.ship.initial_angle);
                self.players.insert(player_id, PlayerSlot::new(ship, link));
            }
            GameEvent::Leave { player_id } => {
                if self.players.remove(&player_id).is_some() {
                    info!(player_id, "player left");
                }
            }
        }
    }

    /// Picks up the latest controls of every connection.
    pub fn apply_controls(&mut self) {
        for slot in self.players.values_mut() {
            slot.apply_controls();
        }
    }

    /// Advances every live ship by `dt`. Returns who died this tick.
    pub fn step(&mut self, dt: f64, hazards: &HazardSnapshot) -> Vec<(u64, DeathCause)> {
        self.tick += 1;

        let Self {
            world,
            tuning,
            grid,
            players,
            ..
        } = self;

        // Grid reflects hazard positions as of the start of this tick.
        grid.rebuild(&hazards.asteroids);
        let field = HazardField {
            large_bodies: &world.large_bodies,
            asteroids: &hazards.asteroids,
            grid: &*grid,
        };

        let mut deaths = Vec::new();
        for slot in players.values_mut().filter(|s| s.ship.alive) {
            let gravity = accumulate_gravity(slot.ship.x, slot.ship.y, field.large_bodies, &tuning.gravity);
            slot.ship.gravity_danger = gravity.danger;

            if let Some(target) = slot.nav {
                match autopilot_step(&slot.ship, target, gravity, &field, &tuning.navigation) {
                    AutopilotStep::Arrived => {
                        debug!(player_id = slot.ship.id, "autopilot arrived");
                        slot.nav = None;
                        slot.ship.input = ShipInput::default();
                    }
                    AutopilotStep::Steer { input, steering } => {
                        slot.ship.input = input;
                        slot.nav_threat = steering.threat_level();
                    }
                }
            }

            let cause = tick_ship(&mut slot.ship, dt, &tuning.ship, world.map_limit).or_else(|| {
                if tuning.collision.enabled {
                    check_collision(slot.ship.x, slot.ship.y, &field, &tuning.collision)
                } else {
                    None
                }
            });

            if let Some(cause) = cause {
                slot.kill(cause);
                deaths.push((slot.ship.id, cause));
            }
        }

        deaths
    }

    /// Sends each player their own state, the roster and their visible asteroids.
    pub fn broadcast(&self, hazards: &HazardSnapshot) {
        let roster: Arc<[ShipSnapshot]> = self.players.values().map(PlayerSlot::snapshot).collect();
        let view = self.tuning.interest.view_distance;

        for slot in self.players.values() {
            let asteroids = visible_asteroids(&hazards.asteroids, slot.ship.x, slot.ship.y, view)
                .cloned()
                .collect();
            let update = PlayerUpdate {
                tick: self.tick,
                me: slot.snapshot(),
                roster: roster.clone(),
                asteroids,
            };
            // Overwrites anything the connection has not read yet.
            slot.link.updates.send_replace(Some(Arc::new(update)));
        }
    }
}

/// Fixed-rate authoritative loop.
///
/// Each tick: take the newest hazard snapshot, drain joins and leaves, pick up
/// every connection's latest controls, step the simulation, broadcast. Ends with `Ok` when every event sender is gone and
/// with `SimError::PhysicsWorkerLost` when the worker stops publishing.
pub async fn world_task(
    mut input_rx: mpsc::Receiver<GameEvent>,
    mut hazards_rx: watch::Receiver<Arc<HazardSnapshot>>,
    mut sim: Simulation,
    tick_interval: Duration,
    stats_interval: Duration,
) -> Result<(), SimError> {
    let mut interval = tokio::time::interval(tick_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let dt = tick_interval.as_secs_f64();
    let mut last_stats = Instant::now();

    info!(hz = 1.0 / dt, "world loop started");

    loop {
        interval.tick().await;

        if hazards_rx.has_changed().is_err() {
            error!(tick = sim.tick(), "physics worker channel closed");
            return Err(SimError::PhysicsWorkerLost);
        }
        let hazards = hazards_rx.borrow_and_update().clone();

        loop {
            match input_rx.try_recv() {
                Ok(ev) => sim.handle_event(ev, &hazards),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    info!("event channel closed; world loop exiting");
                    return Ok(());
                }
            }
        }

        sim.apply_controls();
        sim.step(dt, &hazards);
        sim.broadcast(&hazards);

        if last_stats.elapsed() >= stats_interval {
            last_stats = Instant::now();
            info!(
                tick = sim.tick(),
                hazard_tick = hazards.tick,
                asteroids = hazards.asteroids.len(),
                players = sim.player_count(),
                "world stats"
            );
        }
    }
}
