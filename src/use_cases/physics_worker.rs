// Independently ticked asteroid simulation.

use super::types::HazardSnapshot;
use crate::domain::Asteroid;
use crate::domain::systems::asteroid_motion::advance_asteroids;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Owns the asteroid population and publishes a full snapshot after each tick.
///
/// Publishing never waits for the consumer; an unread snapshot is simply
/// replaced. The task ends once nobody is subscribed any more.
pub async fn physics_task(
    mut asteroids: Vec<Asteroid>,
    map_limit: f64,
    tick_interval: Duration,
    hazards_tx: watch::Sender<Arc<HazardSnapshot>>,
) {
    let mut interval = tokio::time::interval(tick_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let dt = tick_interval.as_secs_f64();
    let mut tick = hazards_tx.borrow().tick;

    info!(asteroids = asteroids.len(), hz = 1.0 / dt, "physics worker started");

    loop {
        interval.tick().await;

        advance_asteroids(&mut asteroids, dt, map_limit);
        tick += 1;

        let snapshot = Arc::new(HazardSnapshot {
            tick,
            asteroids: asteroids.clone(),
        });
        if hazards_tx.send(snapshot).is_err() {
            debug!(tick, "no hazard subscribers left");
            break;
        }
    }

    info!("physics worker stopped");
}
