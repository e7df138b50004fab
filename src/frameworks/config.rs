use crate::domain::tuning::{SimTuning, WorldTuning};
use crate::use_cases::WorldSettings;
use std::{env, time::Duration};

// Runtime/server constants (not gameplay tuning).

pub fn http_port() -> u16 {
    env::var("SPACE_SERVER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000)
}

/// Fixed world seed; unset or unparsable means a fresh random world.
pub fn world_seed() -> Option<u64> {
    env::var("WORLD_SEED").ok().and_then(|v| v.parse().ok())
}

pub fn asteroid_count() -> usize {
    env::var("ASTEROID_COUNT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(WorldTuning::default().asteroid_count)
}

pub const INPUT_CHANNEL_CAPACITY: usize = 1024;

pub const GAME_TICK_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / 30);
pub const PHYSICS_TICK_INTERVAL: Duration = Duration::from_millis(1000 / 20);
pub const STATS_LOG_INTERVAL: Duration = Duration::from_secs(5);

/// Settings for the shared world, with environment overrides applied.
pub fn world_settings() -> WorldSettings {
    WorldSettings {
        world: WorldTuning {
            asteroid_count: asteroid_count(),
            ..WorldTuning::default()
        },
        tuning: SimTuning::default(),
        seed: world_seed(),
        input_channel_capacity: INPUT_CHANNEL_CAPACITY,
        game_tick: GAME_TICK_INTERVAL,
        physics_tick: PHYSICS_TICK_INTERVAL,
        stats_interval: STATS_LOG_INTERVAL,
    }
}
