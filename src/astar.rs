//! Orthogonal A* over a [CellGrid].
//!
//! The grid is the only place search state is kept: the frontier stores positions together with
//! the costs they were pushed with, and an entry whose cost no longer matches its cell is simply
//! skipped when popped. A cell that has been closed is never reopened.
use crate::cell::{role, Position, VisitState};
use crate::components::Components;
use crate::grid::CellGrid;
use crate::STEP_COST;
use log::{debug, info, warn};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use thiserror::Error;

/// Why a search did not produce a path.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("start {0} is out of bounds")]
    StartOutOfBounds(Position),
    #[error("goal {0} is out of bounds")]
    GoalOutOfBounds(Position),
    #[error("start {0} is not walkable")]
    StartBlocked(Position),
    #[error("goal {0} is not walkable")]
    GoalBlocked(Position),
    #[error("{goal} is not reachable from {start}")]
    Unreachable { start: Position, goal: Position },
    #[error("frontier exhausted before reaching the goal")]
    Exhausted,
}

struct FrontierEntry {
    total_cost: i32,
    cost: i32,
    position: Position,
}

impl Eq for FrontierEntry {}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.total_cost == other.total_cost && self.cost == other.cost
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Lowest total cost first; among equals, the entry furthest from the start
        match other.total_cost.cmp(&self.total_cost) {
            Ordering::Equal => self.cost.cmp(&other.cost),
            s => s,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AstarSolver {
    /// Cost added per orthogonal step.
    pub step_cost: i32,
    /// Rejects start/goal pairs on different connected components before searching.
    pub check_components: bool,
}

impl Default for AstarSolver {
    fn default() -> AstarSolver {
        AstarSolver::new()
    }
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            step_cost: STEP_COST,
            check_components: true,
        }
    }

    /// Unscaled Manhattan distance.
    pub fn heuristic(&self, p1: &Position, p2: &Position) -> i32 {
        p1.manhattan_distance(p2)
    }

    /// Searches a shortest orthogonal path from `start` to `goal` and marks it on the grid: the
    /// cells in between get [role::PATH], the endpoints [role::PATH_START] and [role::PATH_GOAL].
    /// Invalid input and a missing path both return `false`; use
    /// [try_find_path](Self::try_find_path) to tell them apart.
    pub fn find_path(&self, grid: &mut CellGrid, start: Position, goal: Position) -> bool {
        match self.try_find_path(grid, start, goal) {
            Ok(()) => true,
            Err(err) => {
                info!("No path from {} to {}: {}", start, goal, err);
                false
            }
        }
    }

    /// Same search as [find_path](Self::find_path), reporting the reason for a failure. When
    /// `start == goal` and it lies on the grid the search succeeds with an empty path and leaves
    /// the grid untouched.
    pub fn try_find_path(
        &self,
        grid: &mut CellGrid,
        start: Position,
        goal: Position,
    ) -> Result<(), SearchError> {
        if start == goal {
            return if grid.in_bounds(&start) {
                debug!("Start and goal coincide at {}", start);
                Ok(())
            } else {
                Err(SearchError::StartOutOfBounds(start))
            };
        }
        self.check_preconditions(grid, &start, &goal)?;

        let mut to_see = BinaryHeap::new();
        let h = self.heuristic(&start, &goal);
        grid[start].discover(start, 0, h);
        to_see.push(FrontierEntry {
            total_cost: h,
            cost: 0,
            position: start,
        });
        while let Some(FrontierEntry { cost, position, .. }) = to_see.pop() {
            let current = &mut grid[position];
            // Stale duplicate of a cell that was improved or already expanded
            if current.state == VisitState::Closed || cost > current.cost_from_start {
                continue;
            }
            current.state = VisitState::Closed;
            if position == goal {
                self.mark_path(grid, &start, &goal);
                return Ok(());
            }
            let new_cost = cost + self.step_cost;
            for neighbour in grid.neumann_neighborhood(&position) {
                let h = self.heuristic(&neighbour, &goal);
                let cell = &mut grid[neighbour];
                if cell.is_blocked() || cell.state == VisitState::Closed {
                    continue;
                }
                if cell.state == VisitState::Unseen || new_cost < cell.cost_from_start {
                    cell.discover(position, new_cost, h);
                    to_see.push(FrontierEntry {
                        total_cost: cell.total_cost,
                        cost: new_cost,
                        position: neighbour,
                    });
                }
            }
        }
        if self.check_components {
            warn!(
                "Reachable goal {} could not be pathed to from {}, is the component check correct?",
                goal, start
            );
        }
        Err(SearchError::Exhausted)
    }

    fn check_preconditions(
        &self,
        grid: &CellGrid,
        start: &Position,
        goal: &Position,
    ) -> Result<(), SearchError> {
        if !grid.in_bounds(start) {
            return Err(SearchError::StartOutOfBounds(*start));
        }
        if !grid.in_bounds(goal) {
            return Err(SearchError::GoalOutOfBounds(*goal));
        }
        if grid.is_blocked(start) {
            return Err(SearchError::StartBlocked(*start));
        }
        if grid.is_blocked(goal) {
            return Err(SearchError::GoalBlocked(*goal));
        }
        if self.check_components && Components::generate(grid).unreachable(grid, start, goal) {
            return Err(SearchError::Unreachable {
                start: *start,
                goal: *goal,
            });
        }
        Ok(())
    }

    /// Walks the parent chain from the goal, marking every cell before the start as path.
    fn mark_path(&self, grid: &mut CellGrid, start: &Position, goal: &Position) {
        let mut current = *goal;
        let mut steps = 0;
        let limit = grid.cells().len();
        while current != *start {
            if steps > limit {
                warn!("Parent chain from {} does not lead back to {}", goal, start);
                break;
            }
            let cell = &mut grid[current];
            cell.role = role::PATH;
            current = cell.parent;
            steps += 1;
        }
        grid[*start].role = role::PATH_START;
        grid[*goal].role = role::PATH_GOAL;
        debug!("Marked path of {} steps from {} to {}", steps, start, goal);
    }

    /// Sums the step costs along `path`, as returned by [CellGrid::traced_path].
    pub fn get_path_cost(&self, path: &[Position]) -> i32 {
        path.windows(2)
            .map(|w| w[0].manhattan_distance(&w[1]) * self.step_cost)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_util::point::Point;

    fn count_role(grid: &CellGrid, code: i32) -> usize {
        grid.cells().iter().filter(|c| c.role == code).count()
    }

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        let mut grid = CellGrid::new(1, 1);
        let solver = AstarSolver::new();
        let start = Point::new(0, 0);
        assert!(solver.find_path(&mut grid, start, start));
        assert_eq!(grid, CellGrid::new(1, 1));
        let outside = Point::new(-1, -1);
        assert_eq!(
            solver.try_find_path(&mut grid, outside, outside),
            Err(SearchError::StartOutOfBounds(outside))
        );
    }

    /// Asserts that the optimal 4 step solution is found around a central obstacle.
    #[test]
    fn solve_simple_problem() {
        let mut grid = CellGrid::new(3, 3);
        grid[Point::new(1, 1)].role = role::BLOCKED;
        let solver = AstarSolver::new();
        let start = Point::new(0, 0);
        let end = Point::new(2, 2);
        assert!(solver.find_path(&mut grid, start, end));
        let path = grid.traced_path(&start, &end).unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(solver.get_path_cost(&path), 40);
        assert_eq!(grid[end].cost_from_start, 40);
        assert_eq!(count_role(&grid, role::PATH), 3);
        assert_eq!(grid[start].role, role::PATH_START);
        assert_eq!(grid[end].role, role::PATH_GOAL);
        assert_eq!(grid[Point::new(1, 1)].role, role::BLOCKED);
    }

    #[test]
    fn adjacent_goal_has_no_intermediate_path() {
        let mut grid = CellGrid::new(2, 1);
        let solver = AstarSolver::new();
        assert!(solver.find_path(&mut grid, Point::new(0, 0), Point::new(0, 1)));
        assert_eq!(count_role(&grid, role::PATH), 0);
        assert_eq!(grid[Point::new(0, 0)].role, role::PATH_START);
        assert_eq!(grid[Point::new(0, 1)].role, role::PATH_GOAL);
    }

    #[test]
    fn test_complex() {
        // |S.........|
        // |.#...#....|
        // |.....#....|
        // |..........|
        // |#.........|
        // |#######.##|
        // |..........|
        // |.......G..|
        let mut grid = CellGrid::new(10, 8);
        for p in [(1, 1), (1, 5), (2, 5), (4, 0)] {
            grid[Point::new(p.0, p.1)].role = role::BLOCKED;
        }
        for col in (0..10).filter(|&c| c != 7) {
            grid[Point::new(5, col)].role = role::BLOCKED;
        }
        let solver = AstarSolver::new();
        let start = Point::new(0, 0);
        let end = Point::new(7, 7);
        assert!(solver.find_path(&mut grid, start, end));
        let path = grid.traced_path(&start, &end).unwrap();
        assert_eq!(path.len(), 15);
        assert!(path.contains(&Point::new(5, 7)));
        assert!(path.iter().all(|p| !grid.is_blocked(p)));
    }

    #[test]
    fn rejects_invalid_endpoints() {
        let mut grid = CellGrid::new(3, 3);
        grid[Point::new(0, 2)].role = role::BLOCKED;
        grid[Point::new(2, 0)].role = role::BLOCKED;
        let solver = AstarSolver::new();
        let (centre, outside, below) = (Point::new(1, 1), Point::new(-1, -1), Point::new(3, 0));
        let (wall_a, wall_b) = (Point::new(0, 2), Point::new(2, 0));
        let cases = [
            (outside, centre, SearchError::StartOutOfBounds(outside)),
            (centre, below, SearchError::GoalOutOfBounds(below)),
            (wall_a, centre, SearchError::StartBlocked(wall_a)),
            (centre, wall_b, SearchError::GoalBlocked(wall_b)),
        ];
        for (start, goal, expected) in cases {
            assert_eq!(solver.try_find_path(&mut grid, start, goal), Err(expected));
            assert!(!solver.find_path(&mut grid, start, goal));
        }
        // Rejected before any bookkeeping
        assert_eq!(grid.cells().iter().filter(|c| c.state != VisitState::Unseen).count(), 0);
    }

    /// Without the component check a walled-off goal exhausts the frontier instead.
    #[test]
    fn unreachable_and_exhausted() {
        let codes = [-1, -1, -1, 3, 3, 3, -1, -1, -1];
        let start = Point::new(0, 0);
        let goal = Point::new(2, 2);

        let mut grid = CellGrid::from_codes(3, 3, &codes);
        let solver = AstarSolver::new();
        assert_eq!(
            solver.try_find_path(&mut grid, start, goal),
            Err(SearchError::Unreachable { start, goal })
        );

        let mut grid = CellGrid::from_codes(3, 3, &codes);
        let solver = AstarSolver {
            check_components: false,
            ..AstarSolver::new()
        };
        assert_eq!(
            solver.try_find_path(&mut grid, start, goal),
            Err(SearchError::Exhausted)
        );
        // Every cell above the wall was expanded, none below was touched
        for col in 0..3 {
            assert_eq!(grid[Point::new(0, col)].state, VisitState::Closed);
            assert_eq!(grid[Point::new(2, col)].state, VisitState::Unseen);
            assert_eq!(grid[Point::new(1, col)].role, role::BLOCKED);
        }
    }

    #[test]
    fn markers_are_walkable() {
        let mut grid = CellGrid::from_codes(3, 1, &[role::START, role::WALKABLE, role::GOAL]);
        let solver = AstarSolver::new();
        assert!(solver.find_path(&mut grid, Point::new(0, 0), Point::new(0, 2)));
        assert_eq!(grid[Point::new(0, 1)].role, role::PATH);
    }
}
