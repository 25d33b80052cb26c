use crate::cell::{role, Role};
use crate::grid::CellGrid;
use itertools::Itertools;
use std::io::{self, Write};

/// Flattens the grid into `height` rows of `width` role codes.
pub fn project(grid: &CellGrid) -> Vec<Vec<i32>> {
    if grid.width() == 0 {
        return Vec::new();
    }
    grid.cells()
        .chunks(grid.width())
        .map(|row| row.iter().map(|c| c.role).collect())
        .collect()
}

/// Consumer of projected role codes.
pub trait Renderer {
    fn render(&mut self, codes: &[Vec<i32>]) -> io::Result<()>;
}

/// Draws one character per cell:
/// `#` blocked, `S` path start, `*` path, `G` path goal, `s`/`g` start and goal markers of a
/// search that found nothing, `.` anything walkable.
#[derive(Debug)]
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> TextRenderer<W> {
        TextRenderer { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn glyph(code: i32) -> char {
        match Role::of(code) {
            Role::Blocked => '#',
            Role::PathStart => 'S',
            Role::Path => '*',
            Role::PathGoal => 'G',
            Role::Start => 's',
            Role::Goal => 'g',
            Role::Walkable => '.',
        }
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, codes: &[Vec<i32>]) -> io::Result<()> {
        for row in codes {
            writeln!(self.out, "{}", row.iter().map(|&c| Self::glyph(c)).join(""))?;
        }
        self.out.flush()
    }
}

/// Number of steps of the path marked in projected codes, or [None] if no path is marked.
pub fn marked_path_steps(codes: &[Vec<i32>]) -> Option<usize> {
    let flat = codes.iter().flatten();
    let has_start = flat.clone().any(|&c| c == role::PATH_START);
    let has_goal = flat.clone().any(|&c| c == role::PATH_GOAL);
    if has_start && has_goal {
        Some(flat.filter(|&&c| c == role::PATH).count() + 1)
    } else {
        None
    }
}
