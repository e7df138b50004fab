// Pure simulation systems. No I/O, no async; the use-case layer drives them.

pub mod asteroid_motion;
pub mod autopilot;
pub mod collision;
pub mod gravity;
pub mod interest;
pub mod navigation;
pub mod ship_movement;
pub mod spatial_grid;
pub mod spawn;
pub mod world_gen;
