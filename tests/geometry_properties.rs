use arcwire::render::geometry::rotate_point;
use arcwire::{Direction, Position};
use proptest::prelude::*;

fn all_directions() -> [Direction; 4] {
    [Direction::Right, Direction::Down, Direction::Left, Direction::Up]
}

proptest! {
    #[test]
    fn rotate_point_is_its_own_inverse_at_the_opposite_angle(
        px in -500.0f64..500.0,
        py in -500.0f64..500.0,
        cx in -500.0f64..500.0,
        cy in -500.0f64..500.0,
        angle in -720.0f64..720.0,
    ) {
        let point = Position::new(px, py);
        let center = Position::new(cx, cy);
        let forward = rotate_point(point, center, angle);
        let back = rotate_point(forward, center, -angle);
        prop_assert!((back.x - point.x).abs() < 1e-6);
        prop_assert!((back.y - point.y).abs() < 1e-6);
    }

    #[test]
    fn rotating_by_360_is_the_identity(steps in -8i64..8) {
        for direction in all_directions() {
            let angle = (steps * 360) as f64;
            prop_assert_eq!(direction.rotate(angle), direction);
        }
    }

    #[test]
    fn rotating_twice_composes_like_adding_the_angles(a in -720.0f64..720.0, b in -720.0f64..720.0) {
        // Snapping happens to the nearest 90-degree step, so round each
        // angle to its own 90-degree step before comparing the composition.
        let snap = |x: f64| (x / 90.0).round() * 90.0;
        for direction in all_directions() {
            let sequential = direction.rotate(a).rotate(b);
            let combined = direction.rotate(snap(a) + snap(b));
            prop_assert_eq!(sequential, combined);
        }
    }
}
