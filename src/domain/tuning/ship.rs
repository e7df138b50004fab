/// Gameplay tuning for player-controlled ships.
///
/// Keep this separate from runtime/server configuration (tick rates, buffer sizes, etc.).

#[derive(Debug, Clone, Copy)]
pub struct ShipTuning {
    /// Maximum forward speed in world units per second.
    pub max_speed: f64,

    /// Linear acceleration (and braking) in units per second squared.
    pub acceleration: f64,

    /// Rotation speed in radians per second.
    pub turn_rate: f64,

    /// Heading given to freshly spawned ships.
    pub initial_angle: f64,
}

impl Default for ShipTuning {
    fn default() -> Self {
        Self {
            max_speed: 100_000.0,
            acceleration: 1200.0,
            turn_rate: 2.5,
            initial_angle: -std::f64::consts::FRAC_PI_2,
        }
    }
}
