use super::{GridSource, IngestConfig, IngestError, Ingested};
use crate::cell::role;
use crate::grid::CellGrid;
use grid_util::point::Point;
use log::debug;
use rand::Rng;

/// Generates square grids of side `max_size` in which each cell is independently walkable with
/// the configured probability. Start and goal are drawn uniformly and stamped onto the grid after
/// the fill, so they may coincide but never sit on a blocked cell.
#[derive(Clone, Debug)]
pub struct RandomSource<R: Rng> {
    rng: R,
    config: IngestConfig,
}

impl<R: Rng> RandomSource<R> {
    pub fn new(rng: R) -> RandomSource<R> {
        RandomSource {
            rng,
            config: IngestConfig::default(),
        }
    }

    pub fn with_config(mut self, config: IngestConfig) -> RandomSource<R> {
        self.config = config;
        self
    }

    fn random_point(&mut self, size: usize) -> Point {
        Point::new(
            self.rng.gen_range(0..size) as i32,
            self.rng.gen_range(0..size) as i32,
        )
    }
}

impl<R: Rng> GridSource for RandomSource<R> {
    fn ingest(&mut self) -> Result<Ingested, IngestError> {
        let size = self.config.max_size;
        if size == 0 {
            return Err(IngestError::InvalidSize { size });
        }
        // gen_ratio panics on a ratio above one or a zero denominator
        let den = self.config.walkable_denominator.max(1);
        let num = self.config.walkable_numerator.min(den);
        let start = self.random_point(size);
        let goal = self.random_point(size);
        let codes = (0..size * size)
            .map(|_| {
                if self.rng.gen_ratio(num, den) {
                    role::WALKABLE
                } else {
                    role::BLOCKED
                }
            })
            .collect::<Vec<i32>>();
        let mut grid = CellGrid::from_codes(size, size, &codes);
        grid[start].role = role::START;
        grid[goal].role = role::GOAL;
        debug!(
            "Generated {}x{} grid with start {} and goal {}",
            size, size, start, goal
        );
        Ok(Ingested { grid, start, goal })
    }
}
