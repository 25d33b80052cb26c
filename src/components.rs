use crate::cell::Position;
use crate::grid::CellGrid;
use grid_util::point::Point;
use itertools::iproduct;
use log::debug;
use petgraph::unionfind::UnionFind;

/// Orthogonally connected regions of walkable cells, kept in a [UnionFind] over cell indices.
/// Lets a search reject a goal that lies in another region without flood-filling the grid.
#[derive(Clone, Debug)]
pub struct Components {
    components: UnionFind<usize>,
}

impl Components {
    /// Links every walkable cell to its walkable right and lower neighbours.
    pub fn generate(grid: &CellGrid) -> Components {
        let mut components = UnionFind::new(grid.width() * grid.height());
        for (row, col) in iproduct!(0..grid.height() as i32, 0..grid.width() as i32) {
            let point = Point::new(row, col);
            let Some(parent_ix) = grid.get_ix_point(&point) else {
                continue;
            };
            if grid.is_blocked(&point) {
                continue;
            }
            for p in [Point::new(row + 1, col), Point::new(row, col + 1)] {
                if grid.can_move_to(&p) {
                    if let Some(ix) = grid.get_ix_point(&p) {
                        components.union(parent_ix, ix);
                    }
                }
            }
        }
        Components { components }
    }

    /// Retrieves the component id a given [Position] belongs to.
    pub fn get_component(&self, grid: &CellGrid, point: &Position) -> Option<usize> {
        grid.get_ix_point(point).map(|ix| self.components.find(ix))
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, grid: &CellGrid, start: &Position, goal: &Position) -> bool {
        !self.unreachable(grid, start, goal)
    }

    /// Checks if start and goal are not on the same component. Positions outside the grid are
    /// unreachable.
    pub fn unreachable(&self, grid: &CellGrid, start: &Position, goal: &Position) -> bool {
        match (grid.get_ix_point(start), grid.get_ix_point(goal)) {
            (Some(start_ix), Some(goal_ix)) => {
                let equiv = self.components.equiv(start_ix, goal_ix);
                if !equiv {
                    debug!("{} and {} are on different components", start, goal);
                }
                !equiv
            }
            _ => true,
        }
    }
}
