// Use-case level inputs/outputs for the game loop and physics worker.

use crate::domain::systems::autopilot::NavTarget;
use crate::domain::{Asteroid, ShipInput, ShipSnapshot};
use std::sync::Arc;
use tokio::sync::{oneshot, watch};

#[derive(Debug)]
pub enum GameEvent {
    Join { player_id: u64, link: PlayerLink },
    Leave { player_id: u64 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum NavOrder {
    #[default]
    None,
    Engage(NavTarget),
    Cancel,
}

/// Latest control intent of one connection.
///
/// Overwritten in place, never queued: a client can only ever replace its own
/// pending intent. Each field carries the sequence number of the write that
/// set it, so the game loop can replay a key change and a navigation order
/// that landed in the same tick in the order they were sent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PilotControls {
    pub keys: ShipInput,
    pub keys_seq: u64,
    pub nav: NavOrder,
    pub nav_seq: u64,
}

impl PilotControls {
    fn next_seq(&self) -> u64 {
        self.keys_seq.max(self.nav_seq) + 1
    }

    pub fn set_keys(&mut self, keys: ShipInput) {
        self.keys_seq = self.next_seq();
        self.keys = keys;
    }

    pub fn navigate(&mut self, target: NavTarget) {
        self.nav_seq = self.next_seq();
        self.nav = NavOrder::Engage(target);
    }

    pub fn cancel_navigation(&mut self) {
        self.nav_seq = self.next_seq();
        self.nav = NavOrder::Cancel;
    }
}

/// Asteroid positions as of one physics tick.
#[derive(Debug, Clone)]
pub struct HazardSnapshot {
    pub tick: u64,
    pub asteroids: Vec<Asteroid>,
}

/// Everything one connection receives for a game tick.
#[derive(Debug, Clone)]
pub struct PlayerUpdate {
    pub tick: u64,
    pub me: ShipSnapshot,
    /// Every connected ship, including `me`. Shared across connections.
    pub roster: Arc<[ShipSnapshot]>,
    /// Already filtered to this player's view window.
    pub asteroids: Vec<Asteroid>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOver {
    pub reason: &'static str,
}

pub type UpdateSlot = Option<Arc<PlayerUpdate>>;

/// Game-loop side of a connection's channels.
///
/// Updates and controls use latest-value semantics in both directions: a
/// slow connection only ever sees the newest update, and the loop only ever
/// sees the newest controls. Game over is delivered at most once.
#[derive(Debug)]
pub struct PlayerLink {
    pub updates: watch::Sender<UpdateSlot>,
    pub game_over: Option<oneshot::Sender<GameOver>>,
    pub controls: watch::Receiver<PilotControls>,
}

/// Connection side of a [`PlayerLink`].
#[derive(Debug)]
pub struct PlayerFeed {
    pub updates: watch::Receiver<UpdateSlot>,
    pub game_over: oneshot::Receiver<GameOver>,
    pub controls: watch::Sender<PilotControls>,
}

impl PlayerLink {
    pub fn channel() -> (PlayerLink, PlayerFeed) {
        let (updates_tx, updates_rx) = watch::channel::<UpdateSlot>(None);
        let (game_over_tx, game_over_rx) = oneshot::channel();
        let (controls_tx, controls_rx) = watch::channel(PilotControls::default());
        (
            PlayerLink {
                updates: updates_tx,
                game_over: Some(game_over_tx),
                controls: controls_rx,
            },
            PlayerFeed {
                updates: updates_rx,
                game_over: game_over_rx,
                controls: controls_tx,
            },
        )
    }
}

/// Failures that end the simulation.
#[derive(Debug)]
pub enum SimError {
    /// The physics worker stopped publishing; hazards would freeze forever.
    PhysicsWorkerLost,
}
