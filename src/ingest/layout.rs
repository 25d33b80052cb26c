use super::{IngestConfig, IngestError, Ingested};
use crate::cell::{role, unset_position, Position};
use crate::grid::CellGrid;
use grid_util::point::Point;
use log::debug;

/// Normalizes raw codes in place: the first start and goal markers are kept, repeated markers
/// and every code outside {start, goal, blocked} become walkable.
pub fn normalize_roles(codes: &mut [i32]) {
    let mut found_start = false;
    let mut found_goal = false;
    for code in codes.iter_mut() {
        *code = match *code {
            role::START if !found_start => {
                found_start = true;
                role::START
            }
            role::GOAL if !found_goal => {
                found_goal = true;
                role::GOAL
            }
            role::BLOCKED => role::BLOCKED,
            _ => role::WALKABLE,
        };
    }
}

/// Width and height for `n` entries: the width is `sqrt(n)` rounded, the height `sqrt(n)` rounded
/// up. Their product is never smaller than `n`.
pub fn grid_dimensions(n: usize) -> (usize, usize) {
    let side = (n as f64).sqrt();
    (side.round() as usize, side.ceil() as usize)
}

/// Normalizes `codes`, pads them with walkable cells to fill the derived dimensions and lays them
/// out row-major, recording where the start and goal markers landed.
pub fn build(mut codes: Vec<i32>, config: &IngestConfig) -> Result<Ingested, IngestError> {
    if codes.len() > config.max_entries() {
        return Err(IngestError::Oversized {
            len: codes.len(),
            max: config.max_entries(),
        });
    }
    normalize_roles(&mut codes);
    let (width, height) = grid_dimensions(codes.len());
    let padding = width * height - codes.len();
    debug!(
        "Laying out {} codes as {}x{} with {} padding cells",
        codes.len(),
        width,
        height,
        padding
    );
    codes.resize(width * height, role::WALKABLE);

    let mut start = unset_position();
    let mut goal = unset_position();
    for (ix, &code) in codes.iter().enumerate() {
        let pos = index_to_position(ix, width);
        match code {
            role::START => start = pos,
            role::GOAL => goal = pos,
            _ => {}
        }
    }
    Ok(Ingested {
        grid: CellGrid::from_codes(width, height, &codes),
        start,
        goal,
    })
}

fn index_to_position(ix: usize, width: usize) -> Position {
    Point::new((ix / width) as i32, (ix % width) as i32)
}
