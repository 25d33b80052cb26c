use crate::cell::{role, Cell, Position};
use crate::N_SMALLVEC_SIZE;
use core::fmt;
use grid_util::point::Point;
use itertools::{iproduct, Itertools};
use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

/// Row, column offsets of the orthogonal moves: up, down, left, right.
const NEUMANN_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// [CellGrid] owns every [Cell] of a `width x height` map in row-major order. Cells are addressed
/// by [Position] and the cell stored at a slot always carries that slot's position, which makes
/// the grid the single source of truth for search state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl CellGrid {
    /// Creates a grid in which every cell is walkable.
    pub fn new(width: usize, height: usize) -> CellGrid {
        let cells = iproduct!(0..height as i32, 0..width as i32)
            .map(|(row, col)| Cell::new(Point::new(row, col), role::WALKABLE))
            .collect();
        CellGrid {
            width,
            height,
            cells,
        }
    }

    /// Lays out `codes` row-major. Missing trailing codes are filled in as walkable and surplus
    /// codes are ignored.
    pub fn from_codes(width: usize, height: usize, codes: &[i32]) -> CellGrid {
        let mut grid = CellGrid::new(width, height);
        for (cell, &code) in grid.cells.iter_mut().zip(codes) {
            cell.role = code;
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn in_bounds(&self, pos: &Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.height && (pos.y as usize) < self.width
    }

    /// Index of `pos` in the row-major cell storage.
    pub fn get_ix_point(&self, pos: &Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.x as usize * self.width + pos.y as usize)
        } else {
            None
        }
    }

    pub fn get(&self, pos: &Position) -> Option<&Cell> {
        self.get_ix_point(pos).map(|ix| &self.cells[ix])
    }

    pub fn get_mut(&mut self, pos: &Position) -> Option<&mut Cell> {
        self.get_ix_point(pos).map(move |ix| &mut self.cells[ix])
    }

    /// Out-of-bounds positions count as blocked.
    pub fn is_blocked(&self, pos: &Position) -> bool {
        self.get(pos).map_or(true, Cell::is_blocked)
    }

    pub fn can_move_to(&self, pos: &Position) -> bool {
        !self.is_blocked(pos)
    }

    /// The in-bounds orthogonal neighbours of `pos`, in the order up, down, left, right.
    pub fn neumann_neighborhood(&self, pos: &Position) -> SmallVec<[Position; N_SMALLVEC_SIZE]> {
        NEUMANN_OFFSETS
            .iter()
            .map(|&(dr, dc)| Point::new(pos.x + dr, pos.y + dc))
            .filter(|p| self.in_bounds(p))
            .collect()
    }

    /// Follows parent pointers from `goal` back to `start` and returns the positions from start to
    /// goal. Returns [None] if the chain leaves the grid or does not reach `start` within as many
    /// steps as there are cells, as is the case when no search has connected the two.
    pub fn traced_path(&self, start: &Position, goal: &Position) -> Option<Vec<Position>> {
        let mut current = self.get(goal)?;
        let mut path = vec![current.position];
        while current.position != *start {
            if path.len() > self.cells.len() {
                return None;
            }
            current = self.get(&current.parent)?;
            path.push(current.position);
        }
        path.reverse();
        Some(path)
    }
}

impl Index<Position> for CellGrid {
    type Output = Cell;

    fn index(&self, pos: Position) -> &Cell {
        match self.get_ix_point(&pos) {
            Some(ix) => &self.cells[ix],
            None => panic!(
                "position {} out of bounds for {}x{} grid",
                pos, self.width, self.height
            ),
        }
    }
}

impl IndexMut<Position> for CellGrid {
    fn index_mut(&mut self, pos: Position) -> &mut Cell {
        match self.get_ix_point(&pos) {
            Some(ix) => &mut self.cells[ix],
            None => panic!(
                "position {} out of bounds for {}x{} grid",
                pos, self.width, self.height
            ),
        }
    }
}

impl fmt::Display for CellGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Grid ({}x{}):", self.width, self.height)?;
        if self.width == 0 {
            return Ok(());
        }
        for row in self.cells.chunks(self.width) {
            writeln!(f, "{}", row.iter().map(|c| format!("{:>3}", c.role)).join(""))?;
        }
        Ok(())
    }
}
