use crate::model::circuit::Position;

/// Canonical egress direction of a port, always one of the four cardinal
/// directions. Rotation snaps to this set in 90-degree steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    /// The cycle rotation snapping walks: right -> down -> left -> up -> right.
    const CYCLE: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    fn index(self) -> usize {
        Self::CYCLE.iter().position(|d| *d == self).expect("Direction is one of CYCLE")
    }

    /// Rotates this direction by `angle_deg`, snapped to the nearest 90-degree
    /// step around the cycle right -> down -> left -> up.
    pub fn rotate(self, angle_deg: f64) -> Direction {
        let steps = (angle_deg / 90.0).round() as i64;
        let len = Self::CYCLE.len() as i64;
        let idx = ((self.index() as i64 + steps) % len + len) % len;
        Self::CYCLE[idx as usize]
    }

    pub fn as_unit_vector(self) -> (i64, i64) {
        match self {
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
        }
    }
}

/// Rotates `point` around `center` by `angle_deg` degrees (clockwise, since
/// the drawing's y axis points down).
pub fn rotate_point(point: Position, center: Position, angle_deg: f64) -> Position {
    if angle_deg == 0.0 {
        return point;
    }
    let radians = angle_deg.to_radians();
    let (sin, cos) = radians.sin_cos();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    Position::new(
        center.x + dx * cos - dy * sin,
        center.y + dx * sin + dy * cos,
    )
}

/// Resolves a renderer-local port position and direction (pre-rotation, in
/// world offset from the component's placement) into final world coordinates
/// by applying the component's placement and rotation.
pub fn resolve_world_port(
    component_position: Position,
    rotation_deg: f64,
    local_port_position: Position,
    local_direction: Direction,
) -> (Position, Direction) {
    let world_unrotated = Position::new(
        component_position.x + local_port_position.x,
        component_position.y + local_port_position.y,
    );
    let world = rotate_point(world_unrotated, component_position, rotation_deg);
    let direction = local_direction.rotate(rotation_deg);
    (world, direction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_point_by_90_swaps_axes_around_center() {
        let center = Position::new(10.0, 10.0);
        let point = Position::new(20.0, 10.0);
        let rotated = rotate_point(point, center, 90.0);
        assert!((rotated.x - 10.0).abs() < 1e-9);
        assert!((rotated.y - 20.0).abs() < 1e-9);
    }

    #[test]
    fn direction_rotate_cycles_through_four_steps() {
        assert_eq!(Direction::Right.rotate(90.0), Direction::Down);
        assert_eq!(Direction::Right.rotate(180.0), Direction::Left);
        assert_eq!(Direction::Right.rotate(270.0), Direction::Up);
        assert_eq!(Direction::Right.rotate(360.0), Direction::Right);
        assert_eq!(Direction::Up.rotate(90.0), Direction::Right);
    }

    #[test]
    fn direction_rotate_handles_negative_angles() {
        assert_eq!(Direction::Right.rotate(-90.0), Direction::Up);
    }
}
