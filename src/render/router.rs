use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::render::geometry::Direction;
use crate::render::grid::{Cell, Grid};

const ADJACENT_HARD_PENALTY: f64 = 1000.0;
const WRONG_START_EGRESS_PENALTY: f64 = 500.0;
const TURN_PENALTY: f64 = 100.0;
const TURN_PENALTY_NEAR_END: f64 = 1000.0;
const NEAR_END_RADIUS: i64 = 2;
const OFF_AXIS_BIAS: f64 = 20.0;
const PROXIMITY_SCAN_RADIUS: i64 = 3;
const PROXIMITY_WEIGHT: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct HeapNode {
    f: f64,
    cell: Cell,
}

impl Eq for HeapNode {}

impl Ord for HeapNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so `BinaryHeap`, a max-heap, pops the lowest `f` first.
        other
            .f
            .partial_cmp(&self.f)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for HeapNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn manhattan(a: Cell, b: Cell) -> i64 {
    (a.0 - b.0).abs() + (a.1 - b.1).abs()
}

fn direction_between(from: Cell, to: Cell) -> Direction {
    match (to.0 - from.0, to.1 - from.1) {
        (1, 0) => Direction::Right,
        (-1, 0) => Direction::Left,
        (0, 1) => Direction::Down,
        (0, -1) => Direction::Up,
        other => panic!("direction_between called on non-adjacent cells: {:?}", other),
    }
}

fn neighbors(cell: Cell) -> [Cell; 4] {
    [
        (cell.0 + 1, cell.1),
        (cell.0 - 1, cell.1),
        (cell.0, cell.1 + 1),
        (cell.0, cell.1 - 1),
    ]
}

#[allow(clippy::too_many_arguments)]
fn cost_to_move(
    grid: &Grid,
    current: Cell,
    neighbor: Cell,
    parent: Option<Cell>,
    end: Cell,
    start_direction: Option<Direction>,
) -> f64 {
    let mut cost = 1.0;

    let mut adjacent_to_hard = false;
    'probe: for dx in -1..=1 {
        for dy in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let probe = (neighbor.0 + dx, neighbor.1 + dy);
            if grid.is_hard(probe) {
                adjacent_to_hard = true;
                break 'probe;
            }
        }
    }
    if adjacent_to_hard {
        cost += ADJACENT_HARD_PENALTY;
    }

    if parent.is_none() {
        if let Some(expected) = start_direction {
            if direction_between(current, neighbor) != expected {
                cost += WRONG_START_EGRESS_PENALTY;
            }
        }
    }

    if let Some(p) = parent {
        let previous_direction = direction_between(p, current);
        let move_direction = direction_between(current, neighbor);
        if previous_direction != move_direction {
            cost += if manhattan(current, end) <= NEAR_END_RADIUS {
                TURN_PENALTY_NEAR_END
            } else {
                TURN_PENALTY
            };
        }
    }

    if grid.is_soft(neighbor) {
        cost += grid.soft_cost();
    }

    let total_dx = (current.0 - end.0).abs() as f64;
    let total_dy = (current.1 - end.1).abs() as f64;
    let move_dx = neighbor.0 - current.0;
    let move_dy = neighbor.1 - current.1;
    if total_dx > total_dy {
        if move_dy != 0 && total_dx > 0.0 {
            cost += OFF_AXIS_BIAS * (1.0 - total_dy / total_dx);
        }
    } else if move_dx != 0 && total_dy > 0.0 {
        cost += OFF_AXIS_BIAS * (1.0 - total_dx / total_dy);
    }

    for dx in -PROXIMITY_SCAN_RADIUS..=PROXIMITY_SCAN_RADIUS {
        for dy in -PROXIMITY_SCAN_RADIUS..=PROXIMITY_SCAN_RADIUS {
            let distance = dx.abs() + dy.abs();
            if distance <= 1 {
                continue;
            }
            let probe = (neighbor.0 + dx, neighbor.1 + dy);
            if grid.is_hard(probe) {
                cost += PROXIMITY_WEIGHT / (distance * distance) as f64;
            }
        }
    }

    cost
}

/// Removes intermediate points that lie on the same straight run as their
/// neighbors, keeping only the start, end and turn points.
fn smooth_corners(path: &[Cell]) -> Vec<Cell> {
    if path.len() <= 2 {
        return path.to_vec();
    }
    let mut smoothed = vec![path[0]];
    for window in path.windows(3) {
        let (a, b, c) = (window[0], window[1], window[2]);
        let same_row = a.1 == b.1 && b.1 == c.1;
        let same_col = a.0 == b.0 && b.0 == c.0;
        if !(same_row || same_col) {
            smoothed.push(b);
        }
    }
    smoothed.push(*path.last().unwrap());
    smoothed
}

/// Finds an orthogonal path from `start` to `end` on `grid` using A* with the
/// priority-ordered cost function described by the module's constants.
///
/// Clears a chevron-shaped obstacle pocket around `start` and `end` first so
/// a component's own footprint never traps its own wires. Returns the
/// smoothed cell path (including `start` and `end`), or `None` if no path
/// exists given the current obstacle state.
pub fn find_path(
    grid: &mut Grid,
    start: Cell,
    end: Cell,
    start_direction: Option<Direction>,
    _end_direction: Option<Direction>,
) -> Option<Vec<Cell>> {
    grid.clear_chevron(start);
    grid.clear_chevron(end);

    if start == end {
        return Some(vec![start]);
    }

    let mut open_heap = BinaryHeap::new();
    let mut came_from: HashMap<Cell, Option<Cell>> = HashMap::new();
    let mut g_score: HashMap<Cell, f64> = HashMap::new();

    came_from.insert(start, None);
    g_score.insert(start, 0.0);
    open_heap.push(HeapNode {
        f: manhattan(start, end) as f64,
        cell: start,
    });

    while let Some(HeapNode { cell: current, .. }) = open_heap.pop() {
        if current == end {
            let mut path = vec![current];
            let mut cursor = current;
            while let Some(prev) = came_from.get(&cursor).copied().flatten() {
                path.push(prev);
                cursor = prev;
            }
            path.reverse();
            return Some(smooth_corners(&path));
        }

        let current_g = *g_score.get(&current).unwrap_or(&f64::INFINITY);

        for neighbor in neighbors(current) {
            if !grid.in_bounds(neighbor) {
                continue;
            }
            if grid.is_hard(neighbor) && neighbor != end {
                continue;
            }

            let parent = came_from.get(&current).copied().flatten();
            let step_cost = cost_to_move(grid, current, neighbor, parent, end, start_direction);
            let tentative_g = current_g + step_cost;

            if tentative_g < *g_score.get(&neighbor).unwrap_or(&f64::INFINITY) {
                came_from.insert(neighbor, Some(current));
                g_score.insert(neighbor, tentative_g);
                let f = tentative_g + manhattan(neighbor, end) as f64;
                open_heap.push(HeapNode { f, cell: neighbor });
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn empty_grid(size: i64) -> Grid {
        Grid::new((size * 10) as f64, (size * 10) as f64, 10, HashSet::new())
    }

    #[test]
    fn very_simple_path_is_a_straight_line() {
        let mut grid = empty_grid(10);
        let path = find_path(&mut grid, (0, 0), (5, 0), None, None).unwrap();
        assert_eq!(*path.first().unwrap(), (0, 0));
        assert_eq!(*path.last().unwrap(), (5, 0));
    }

    #[test]
    fn path_with_clear_grid_has_no_unnecessary_turns() {
        let mut grid = empty_grid(10);
        let path = find_path(&mut grid, (0, 0), (5, 5), None, None).unwrap();
        // Exactly one turn is unavoidable on a clear diagonal-ish grid.
        let turns = path.len().saturating_sub(2);
        assert!(turns <= 2);
    }

    #[test]
    fn hard_and_soft_obstacles_are_routed_around_or_through() {
        let mut grid = empty_grid(10);
        for y in 0..8 {
            grid.add_obstacle(
                crate::model::circuit::Position::new(30.0, (y * 10) as f64),
                (0.0, 0.0),
                0,
                0,
            );
        }
        let path = find_path(&mut grid, (0, 0), (6, 0), None, None);
        assert!(path.is_some());
    }

    #[test]
    fn no_path_through_a_complete_wall_far_from_both_endpoints() {
        let mut grid = empty_grid(20);
        for y in 0..20 {
            grid.add_obstacle(
                crate::model::circuit::Position::new(100.0, (y * 10) as f64),
                (0.0, 0.0),
                0,
                0,
            );
        }
        let path = find_path(&mut grid, (0, 10), (19, 10), None, None);
        assert!(path.is_none());
    }
}
