//! # grid_astar
//!
//! A* pathfinding on rectangular tile maps whose cells carry integer role codes
//! (walkable, blocked, start, goal). Maps are ingested either from a JSON
//! document holding a flat `"data"` layer or from a seeded random generator,
//! searched with an orthogonal
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) using the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as
//! heuristic, and projected back to a plain 2D array of codes in which the found
//! path is marked. Connected components are computed up front so that
//! unreachable goals are rejected without flood-filling the map.
//!
//! ```
//! use grid_astar::{ingest::JsonSource, solve, AstarSolver};
//!
//! let mut source = JsonSource::from_text(r#"{"layers":[{"data":[0,-1,-1,-1,3,-1,-1,-1,8]}]}"#);
//! let codes = solve(&mut source, &AstarSolver::new());
//! assert_eq!(codes[0][0], grid_astar::cell::role::PATH_START);
//! assert_eq!(codes[2][2], grid_astar::cell::role::PATH_GOAL);
//! ```
pub mod astar;
pub mod cell;
pub mod components;
pub mod grid;
pub mod ingest;
pub mod project;

pub use crate::astar::{AstarSolver, SearchError};
pub use crate::cell::{Cell, Position, VisitState};
pub use crate::grid::CellGrid;
pub use crate::ingest::{GridSource, IngestConfig, IngestError, Ingested};
pub use crate::project::{project, Renderer, TextRenderer};

use log::{debug, info, warn};

/// Cost of a single orthogonal step. The heuristic is left unscaled, which keeps it admissible.
pub const STEP_COST: i32 = 10;
/// Default bound on both grid dimensions. Searches are exercised up to 200x200.
pub const DEFAULT_MAX_SIZE: usize = 50;
/// Inline capacity for neighbourhoods; an orthogonal neighbourhood never exceeds it.
pub const N_SMALLVEC_SIZE: usize = 4;

/// Runs a full request: ingests a grid from `source`, searches it with `solver` and returns the
/// projected role codes. A failed ingestion yields an empty result; a failed search still yields
/// the projected grid, just without a marked path.
pub fn solve<S>(source: &mut S, solver: &AstarSolver) -> Vec<Vec<i32>>
where
    S: GridSource + ?Sized,
{
    let Ingested {
        mut grid,
        start,
        goal,
    } = match source.ingest() {
        Ok(ingested) => ingested,
        Err(err) => {
            warn!("Ingestion failed: {}", err);
            return Vec::new();
        }
    };
    let found = solver.find_path(&mut grid, start, goal);
    info!(
        "Search on {}x{} grid from {} to {}: found = {}",
        grid.width(),
        grid.height(),
        start,
        goal,
        found
    );
    debug!("{}", grid);
    project(&grid)
}
