/// Tuning for the proximity & hazard engine.
///
/// These values were picked for gameplay feel; none of them are physical.

#[derive(Debug, Clone, Copy)]
pub struct GravityTuning {
    pub g: f64,

    /// Mass per unit of radius for stars and planets.
    pub planet_mass_factor: f64,

    /// Mass per unit of radius for black holes.
    pub black_hole_mass_factor: f64,

    /// Default pull radius as a multiple of the body radius.
    pub pull_radius_factor: f64,

    /// Lower bound on squared distance, keeps the force finite near the centre.
    pub min_dist_sq: f64,
}

impl Default for GravityTuning {
    fn default() -> Self {
        Self {
            g: 50_000.0,
            planet_mass_factor: 10.0,
            black_hole_mass_factor: 80.0,
            pull_radius_factor: 20.0,
            min_dist_sq: 5000.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CollisionTuning {
    /// When false the game loop only enforces the world boundary.
    pub enabled: bool,

    /// Ship radius used by the bounding-box pre-filters.
    pub ship_radius: f64,

    /// Extra slack on the large-body pre-filter.
    pub large_body_slack: f64,
}

impl Default for CollisionTuning {
    fn default() -> Self {
        Self {
            enabled: true,
            ship_radius: 50.0,
            large_body_slack: 200.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NavigationTuning {
    pub detect_base: f64,
    pub detect_size_factor: f64,
    pub safe_base: f64,
    pub safe_size_factor: f64,

    /// Minimum cosine between heading and obstacle bearing for "ahead".
    pub ahead_dot: f64,

    pub evasion_base: f64,
    pub evasion_gain: f64,

    /// Weight kept on the direct bearing once evasion kicks in.
    pub direct_weight: f64,

    /// Push-away strength once inside the safety margin.
    pub repulsion: f64,

    pub anti_gravity_scale: f64,

    /// Autopilot: turn only when the heading error exceeds this.
    pub turn_deadband: f64,

    /// Autopilot: thrust only while the heading error is below this.
    pub thrust_cone: f64,

    /// Autopilot disengages within this distance of the target.
    pub arrival_radius: f64,
}

impl Default for NavigationTuning {
    fn default() -> Self {
        Self {
            detect_base: 60_000.0,
            detect_size_factor: 8.0,
            safe_base: 3000.0,
            safe_size_factor: 3.5,
            ahead_dot: 0.5,
            evasion_base: 2.0,
            evasion_gain: 30.0,
            direct_weight: 0.3,
            repulsion: 10.0,
            anti_gravity_scale: 6.0,
            turn_deadband: 0.05,
            thrust_cone: 0.5,
            arrival_radius: 10_000.0,
        }
    }
}
