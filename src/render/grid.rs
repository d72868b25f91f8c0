use std::collections::HashSet;

use crate::model::circuit::Position;

pub type Cell = (i64, i64);

/// The obstacle-aware routing grid.
///
/// Hard, soft and port membership are disjoint conceptually but stored as
/// three independent sets: a cell can be in `hard` and `soft` at once (the
/// more restrictive hard membership wins), but a cell in `ports` is never
/// treated as an obstacle of either kind, regardless of stamping order.
#[derive(Debug, Clone)]
pub struct Grid {
    width: i64,
    height: i64,
    cell_size: i64,
    hard: HashSet<Cell>,
    soft: HashSet<Cell>,
    ports: HashSet<Cell>,
    soft_cost: f64,
}

impl Grid {
    pub fn new(width_units: f64, height_units: f64, cell_size: i64, ports: HashSet<Cell>) -> Self {
        let width = (width_units as i64).div_euclid(cell_size) + 1;
        let height = (height_units as i64).div_euclid(cell_size) + 1;
        Grid {
            width,
            height,
            cell_size,
            hard: HashSet::new(),
            soft: HashSet::new(),
            ports,
            soft_cost: 5.0,
        }
    }

    pub fn cell_size(&self) -> i64 {
        self.cell_size
    }

    pub fn width(&self) -> i64 {
        self.width
    }

    pub fn height(&self) -> i64 {
        self.height
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.0 >= 0 && cell.0 < self.width && cell.1 >= 0 && cell.1 < self.height
    }

    pub fn to_cell(&self, position: Position) -> Cell {
        (
            (position.x as i64).div_euclid(self.cell_size),
            (position.y as i64).div_euclid(self.cell_size),
        )
    }

    pub fn cell_center(&self, cell: Cell) -> Position {
        Position::new(
            (cell.0 * self.cell_size + self.cell_size / 2) as f64,
            (cell.1 * self.cell_size + self.cell_size / 2) as f64,
        )
    }

    pub fn is_port(&self, cell: Cell) -> bool {
        self.ports.contains(&cell)
    }

    pub fn is_hard(&self, cell: Cell) -> bool {
        !self.is_port(cell) && self.hard.contains(&cell)
    }

    pub fn is_soft(&self, cell: Cell) -> bool {
        !self.is_port(cell) && self.soft.contains(&cell)
    }

    pub fn set_soft_cost(&mut self, cost: f64) {
        self.soft_cost = cost;
    }

    pub fn soft_cost(&self) -> f64 {
        self.soft_cost
    }

    /// Stamps a component's axis-aligned footprint onto the grid: cells
    /// under `local_bbox` (centered on `world_center`) inflated by
    /// `hard_margin` cells become hard obstacles; a further ring inflated by
    /// `soft_margin` cells (Moore neighborhood of the hard footprint) becomes
    /// soft.
    pub fn add_obstacle(
        &mut self,
        world_center: Position,
        local_bbox: (f64, f64),
        hard_margin: i64,
        soft_margin: i64,
    ) {
        let (width, height) = local_bbox;
        let min = Position::new(world_center.x - width / 2.0, world_center.y - height / 2.0);
        let max = Position::new(world_center.x + width / 2.0, world_center.y + height / 2.0);
        let min_cell = self.to_cell(min);
        let max_cell = self.to_cell(max);

        let mut hard_cells = HashSet::new();
        for gx in (min_cell.0 - hard_margin)..=(max_cell.0 + hard_margin) {
            for gy in (min_cell.1 - hard_margin)..=(max_cell.1 + hard_margin) {
                hard_cells.insert((gx, gy));
            }
        }

        if soft_margin > 0 {
            for &(hx, hy) in &hard_cells {
                for dx in -soft_margin..=soft_margin {
                    for dy in -soft_margin..=soft_margin {
                        let cell = (hx + dx, hy + dy);
                        if !hard_cells.contains(&cell) {
                            self.soft.insert(cell);
                        }
                    }
                }
            }
        }

        self.hard.extend(hard_cells);
    }

    /// Marks a completed route's cells as soft obstacles so subsequent
    /// (lower-priority) connections avoid crossing it but can still if no
    /// other path exists.
    pub fn add_soft_obstacle_path(&mut self, cells: &[Cell]) {
        self.soft.extend(cells.iter().copied());
    }

    /// Clears hard/soft membership from the roughly-5x5 chevron (the 5x3
    /// core block plus the two ends of the perpendicular arm, corners
    /// excluded) centered on `cell`, so the router always has somewhere to
    /// leave a component or destination from even if it was stamped over.
    pub fn clear_chevron(&mut self, cell: Cell) {
        let mut to_clear = HashSet::new();
        to_clear.insert(cell);
        for dx in [-1, 0, 1, -2, 2] {
            for dy in [-1, 0, 1] {
                if dx == 0 && dy == 0 {
                    continue;
                }
                to_clear.insert((cell.0 + dx, cell.1 + dy));
            }
        }
        for dx in [-1, 0, 1] {
            for dy in [-2, 2] {
                to_clear.insert((cell.0 + dx, cell.1 + dy));
            }
        }
        for c in to_clear {
            self.hard.remove(&c);
            self.soft.remove(&c);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_cells_are_never_obstacles() {
        let mut ports = HashSet::new();
        ports.insert((2, 2));
        let mut grid = Grid::new(100.0, 100.0, 5, ports);
        grid.add_obstacle(Position::new(10.0, 10.0), (10.0, 10.0), 1, 1);
        assert!(!grid.is_hard((2, 2)));
        assert!(!grid.is_soft((2, 2)));
    }

    #[test]
    fn hard_obstacle_gets_soft_ring() {
        let mut grid = Grid::new(100.0, 100.0, 5, HashSet::new());
        grid.add_obstacle(Position::new(25.0, 25.0), (10.0, 10.0), 0, 1);
        let center_cell = grid.to_cell(Position::new(25.0, 25.0));
        assert!(grid.is_hard(center_cell));
        assert!(grid.is_soft((center_cell.0 - 2, center_cell.1)));
    }

    #[test]
    fn clear_chevron_removes_obstacle_membership() {
        let mut grid = Grid::new(100.0, 100.0, 5, HashSet::new());
        grid.add_obstacle(Position::new(25.0, 25.0), (30.0, 30.0), 0, 1);
        let center_cell = grid.to_cell(Position::new(25.0, 25.0));
        grid.clear_chevron(center_cell);
        assert!(!grid.is_hard(center_cell));
    }
}
