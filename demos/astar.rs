//! Generate a random walled grid, search it with A*, and print the result.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use gridstar_demos::{DemoError, DemoResult, GenConfig, Trace, generate_grid, random_endpoints, render};
use gridstar_paths::{AStar, GridProblem, Heuristic};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Command line arguments for the A* demo.
#[derive(Parser, Debug)]
#[command(name = "astar")]
#[command(about = "Shortest paths on a random grid with A*")]
#[command(version)]
struct Args {
    /// JSON config file; flags below override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<i32>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<i32>,

    /// Chance for each cell to be a wall, in [0, 1]
    #[arg(short, long)]
    walls: Option<f64>,

    /// Random seed for grid generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Heuristic: manhattan, euclidean or null
    #[arg(long)]
    heuristic: Option<Heuristic>,

    /// Give up after this many expansions
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Delay between visualization steps, in milliseconds
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// Skip the visualized search and the map printout
    #[arg(long)]
    quiet: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn load_config(args: &Args) -> DemoResult<GenConfig> {
    let mut config = match &args.config {
        Some(path) => GenConfig::load(path)?,
        None => GenConfig::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(walls) = args.walls {
        config.wall_probability = walls;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(heuristic) = args.heuristic {
        config.heuristic = heuristic;
    }
    if let Some(max) = args.max_expansions {
        config.limits.max_expansions = Some(max);
    }
    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> DemoResult<()> {
    let config = load_config(args)?;
    let seed = config.seed.unwrap_or_else(rand::random);
    log::info!(
        "generating {}x{} grid (walls {:.0}%, seed {seed})",
        config.width,
        config.height,
        config.wall_probability * 100.0
    );

    let mut rng = StdRng::seed_from_u64(seed);
    let grid = generate_grid(&config, &mut rng)?;
    let (start, goal) = random_endpoints(&grid, &mut rng)
        .ok_or_else(|| DemoError::Config("grid has no walkable cell".to_string()))?;
    log::debug!("grid:\n{grid}");

    let problem = GridProblem::with_endpoints(&grid, start, goal)?.with_heuristic(config.heuristic);
    log::info!("searching {start} -> {goal} with {} heuristic", config.heuristic);

    let result = AStar::new(&problem).search_limited(config.limits);
    log::info!("Path is {} nodes long", result.path.len());
    log::info!("{} nodes were expanded to find the path", result.expanded);
    if !result.is_found() {
        log::info!("search ended with {:?}", result.status);
    } else {
        log::info!("path cost {}", result.cost);
    }

    if args.quiet {
        return Ok(());
    }

    let delay = Duration::from_millis(args.delay_ms);
    let mut trace = Trace::new();
    AStar::new(&problem).search_visualize_limited(config.limits, |p, phase| {
        trace.record(p, phase);
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    });
    log::debug!("{} visualization steps", trace.steps());
    print!("{}", render(&grid, start, goal, &trace));
    Ok(())
}
