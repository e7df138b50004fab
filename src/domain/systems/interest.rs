use crate::domain::state::Asteroid;

/// Asteroids inside the axis-aligned view box centred on `(x, y)`.
///
/// Box test only; no radius check. Bounds are strict.
pub fn visible_asteroids<'a>(
    asteroids: &'a [Asteroid],
    x: f64,
    y: f64,
    view_distance: f64,
) -> impl Iterator<Item = &'a Asteroid> + 'a {
    asteroids
        .iter()
        .filter(move |a| (a.x - x).abs() < view_distance && (a.y - y).abs() < view_distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn rock(id: u32, x: f64, y: f64) -> Asteroid {
        Asteroid {
            id,
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            radius: 300.0,
            rotation: 0.0,
            rotation_speed: 0.0,
            outline: Arc::from(Vec::new()),
        }
    }

    #[test]
    fn keeps_only_rocks_inside_box_on_both_axes() {
        let rocks = vec![
            rock(1, 69_000.0, -69_000.0),
            rock(2, 70_000.0, 0.0),
            rock(3, 0.0, -71_000.0),
            rock(4, 150_000.0, 150_000.0),
            // Corner of the box lies outside the circle of the same radius.
            rock(5, 60_000.0, 60_000.0),
        ];
        let ids: Vec<u32> = visible_asteroids(&rocks, 0.0, 0.0, 70_000.0)
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec![1, 5]);
    }

    #[test]
    fn box_follows_the_viewer() {
        let rocks = vec![rock(1, 1_000_000.0, 1_000_000.0)];
        assert_eq!(visible_asteroids(&rocks, 0.0, 0.0, 70_000.0).count(), 0);
        assert_eq!(
            visible_asteroids(&rocks, 950_000.0, 1_050_000.0, 70_000.0).count(),
            1
        );
    }
}
