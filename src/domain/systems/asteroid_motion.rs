use crate::domain::state::Asteroid;

/// Advances orbital drift and spin for one physics tick.
///
/// Velocity components are reflected independently whenever the matching
/// coordinate is beyond `map_limit` on either side. A component that already
/// points back inside is left alone so a rock sitting on the limit cannot
/// flip-flop in place.
pub fn advance_asteroids(asteroids: &mut [Asteroid], dt: f64, map_limit: f64) {
    for a in asteroids.iter_mut() {
        a.x += a.vx * dt;
        a.y += a.vy * dt;
        a.rotation += a.rotation_speed * dt;

        if a.x > map_limit {
            a.vx = -a.vx.abs();
        } else if a.x < -map_limit {
            a.vx = a.vx.abs();
        }
        if a.y > map_limit {
            a.vy = -a.vy.abs();
        } else if a.y < -map_limit {
            a.vy = a.vy.abs();
        }
    }
}
