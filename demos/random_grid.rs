use grid_astar::ingest::{IngestConfig, RandomSource};
use grid_astar::{solve, AstarSolver, Renderer, TextRenderer};
use rand::rngs::StdRng;
use rand::SeedableRng;

// In this example a random 20x20 map is generated, where
// - # marks an obstacle (one cell in eight on average)
// - S marks the start and G the goal of the found path
// - * marks the path itself
//
// The seed can be passed as the first argument. Set RUST_LOG=debug for search details.

fn main() {
    env_logger::init();
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0);
    let mut source = RandomSource::new(StdRng::seed_from_u64(seed))
        .with_config(IngestConfig::default().with_max_size(20));
    let codes = solve(&mut source, &AstarSolver::new());
    let mut renderer = TextRenderer::new(std::io::stdout());
    if let Err(err) = renderer.render(&codes) {
        eprintln!("Could not render grid: {err}");
    }
}
