//! Producers turning external data into a [CellGrid] plus a start and goal.
//!
//! Two sources are provided: [JsonSource] reads the `"data"` layer of a tile-map document and
//! [RandomSource] fills a square map from an injected random number generator. Both honour the
//! size bound of [IngestConfig].
use crate::cell::Position;
use crate::grid::CellGrid;
use crate::DEFAULT_MAX_SIZE;
use thiserror::Error;

pub mod json;
pub mod layout;
pub mod random;

pub use json::JsonSource;
pub use random::RandomSource;

/// A freshly built grid ready to be searched.
#[derive(Clone, Debug)]
pub struct Ingested {
    pub grid: CellGrid,
    pub start: Position,
    pub goal: Position,
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("could not read source: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse source: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no data layer found")]
    NoDataLayer,
    #[error("data layer holds {len} entries, at most {max} are allowed")]
    Oversized { len: usize, max: usize },
    #[error("grid size {size} must be at least 1")]
    InvalidSize { size: usize },
}

/// Anything able to supply a grid for a search.
pub trait GridSource {
    fn ingest(&mut self) -> Result<Ingested, IngestError>;
}

/// Size bound and random fill settings shared by the producers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IngestConfig {
    /// Upper bound on both grid dimensions, which caps a data layer at `max_size²` entries.
    /// Random grids are generated at exactly this size.
    pub max_size: usize,
    /// A random cell is walkable with probability `walkable_numerator / walkable_denominator`.
    pub walkable_numerator: u32,
    pub walkable_denominator: u32,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            walkable_numerator: 7,
            walkable_denominator: 8,
        }
    }
}

impl IngestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn with_walkable_ratio(mut self, numerator: u32, denominator: u32) -> Self {
        self.walkable_numerator = numerator;
        self.walkable_denominator = denominator;
        self
    }

    /// Largest number of entries a data layer may hold.
    pub fn max_entries(&self) -> usize {
        self.max_size * self.max_size
    }
}
