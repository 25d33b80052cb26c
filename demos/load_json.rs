use grid_astar::ingest::JsonSource;
use grid_astar::project::marked_path_steps;
use grid_astar::{solve, AstarSolver, Renderer, TextRenderer};

// Loads a tile map such as
//
// {"layers": [{"data": [0, -1, -1,
//                       -1, 3, -1,
//                       -1, -1, 8]}]}
//
// whose start is marked 0, goal 8 and obstacles 3, and prints the solved map.
// Usage: cargo run --example load_json -- path/to/map.json

fn main() {
    env_logger::init();
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Usage: load_json <map.json>");
        return;
    };
    let codes = solve(&mut JsonSource::from_path(path), &AstarSolver::new());
    if codes.is_empty() {
        eprintln!("No grid could be loaded");
        return;
    }
    let mut renderer = TextRenderer::new(std::io::stdout());
    if let Err(err) = renderer.render(&codes) {
        eprintln!("Could not render grid: {err}");
        return;
    }
    match marked_path_steps(&codes) {
        Some(steps) => println!("Path of {steps} steps"),
        None => println!("No path"),
    }
}
