//! Grid construction and presentation helpers shared by the gridstar demos.
//!
//! This is the collaborator the search crates deliberately leave out:
//! random wall placement, random start/goal selection, configuration loading
//! and a plain-text rendering of a visualized search.

use std::collections::HashMap;
use std::path::Path;

use gridstar_core::{Grid, GridError, Point};
use gridstar_paths::{Heuristic, Phase, SearchLimits};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SIZE: i32 = 50;
pub const DEFAULT_WALL_PROBABILITY: f64 = 0.1;

/// Errors raised by the demos.
#[derive(thiserror::Error, Debug)]
pub enum DemoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Grid(#[from] GridError),

    /// The configuration is well-formed but unusable.
    #[error("invalid config: {0}")]
    Config(String),
}

pub type DemoResult<T> = Result<T, DemoError>;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// How to build and search a random grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenConfig {
    pub width: i32,
    pub height: i32,
    /// Chance for each cell to be a wall, in `[0, 1]`.
    pub wall_probability: f64,
    /// Fixed RNG seed; a random one is drawn when absent.
    pub seed: Option<u64>,
    pub heuristic: Heuristic,
    pub limits: SearchLimits,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            wall_probability: DEFAULT_WALL_PROBABILITY,
            seed: None,
            heuristic: Heuristic::Manhattan,
            limits: SearchLimits::unlimited(),
        }
    }
}

impl GenConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> DemoResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: GenConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DemoResult<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(GridError::InvalidSize {
                width: self.width,
                height: self.height,
            }
            .into());
        }
        if !(0.0..=1.0).contains(&self.wall_probability) {
            return Err(DemoError::Config(format!(
                "wall_probability must be within [0, 1], got {}",
                self.wall_probability
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Build a grid where each cell is a wall with `config.wall_probability`.
pub fn generate_grid(config: &GenConfig, rng: &mut impl Rng) -> DemoResult<Grid> {
    config.validate()?;
    let mut grid = Grid::new(config.width, config.height)?;
    for p in grid.bounds() {
        let wall = rng.random_bool(config.wall_probability);
        grid.set_walkable(p, !wall)?;
    }
    Ok(grid)
}

/// Draw random start and goal cells until both are walkable.
///
/// Returns `None` when the grid has no walkable cell at all. Start and goal
/// may coincide.
pub fn random_endpoints(grid: &Grid, rng: &mut impl Rng) -> Option<(Point, Point)> {
    if grid.walkable_count() == 0 {
        return None;
    }
    let (width, height) = (grid.width(), grid.height());
    let mut draw = || Point::new(rng.random_range(0..width), rng.random_range(0..height));
    loop {
        let (start, goal) = (draw(), draw());
        if grid.is_walkable(start) && grid.is_walkable(goal) {
            return Some((start, goal));
        }
    }
}

// ---------------------------------------------------------------------------
// Trace / rendering
// ---------------------------------------------------------------------------

/// The last [`Phase`] reported for each cell during a visualized search.
#[derive(Debug, Clone, Default)]
pub struct Trace {
    phases: HashMap<Point, Phase>,
    steps: usize,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a visualization callback.
    pub fn record(&mut self, p: Point, phase: Phase) {
        self.phases.insert(p, phase);
        self.steps += 1;
    }

    pub fn phase(&self, p: Point) -> Option<Phase> {
        self.phases.get(&p).copied()
    }

    /// Number of callbacks recorded.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn count(&self, phase: Phase) -> usize {
        self.phases.values().filter(|&&ph| ph == phase).count()
    }
}

/// Render the grid top row first: `S` start, `G` goal, `*` path,
/// `+` expanded, `?` considered, `#` wall, `.` floor.
pub fn render(grid: &Grid, start: Point, goal: Point, trace: &Trace) -> String {
    let mut out = String::with_capacity(grid.len() + grid.height() as usize);
    for y in (0..grid.height()).rev() {
        for x in 0..grid.width() {
            let p = Point::new(x, y);
            let ch = if p == start {
                'S'
            } else if p == goal {
                'G'
            } else if !grid[p].walkable {
                '#'
            } else {
                match trace.phase(p) {
                    Some(Phase::Path) => '*',
                    Some(Phase::Expanding) => '+',
                    Some(Phase::Considering) => '?',
                    None => '.',
                }
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridstar_paths::{AStar, GridProblem, SearchProblem};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn config(width: i32, height: i32, wall_probability: f64) -> GenConfig {
        GenConfig {
            width,
            height,
            wall_probability,
            ..GenConfig::default()
        }
    }

    #[test]
    fn default_config_matches_demo_scene() {
        let c = GenConfig::default();
        assert_eq!((c.width, c.height), (50, 50));
        assert_eq!(c.wall_probability, 0.1);
        assert_eq!(c.heuristic, Heuristic::Manhattan);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn config_validation() {
        assert!(matches!(
            config(0, 5, 0.1).validate(),
            Err(DemoError::Grid(GridError::InvalidSize { .. }))
        ));
        assert!(matches!(
            config(5, 5, 1.5).validate(),
            Err(DemoError::Config(_))
        ));
    }

    #[test]
    fn partial_json_config_uses_defaults() {
        let c: GenConfig =
            serde_json::from_str(r#"{"width": 12, "heuristic": "euclidean", "seed": 7}"#).unwrap();
        assert_eq!(c.width, 12);
        assert_eq!(c.height, DEFAULT_SIZE);
        assert_eq!(c.seed, Some(7));
        assert_eq!(c.heuristic, Heuristic::Euclidean);
        assert_eq!(c.limits, SearchLimits::unlimited());
    }

    #[test]
    fn load_config_file() {
        let path = std::env::temp_dir().join(format!("gridstar-demo-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"height": 9, "limits": {"max_expansions": 40}}"#).unwrap();
        let c = GenConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(c.height, 9);
        assert_eq!(c.limits.max_expansions, Some(40));

        assert!(matches!(
            GenConfig::load(std::env::temp_dir().join("gridstar-missing.json")),
            Err(DemoError::Io(_))
        ));
    }

    #[test]
    fn wall_probability_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        let open = generate_grid(&config(8, 6, 0.0), &mut rng).unwrap();
        assert_eq!(open.walkable_count(), 48);

        let closed = generate_grid(&config(8, 6, 1.0), &mut rng).unwrap();
        assert_eq!(closed.walkable_count(), 0);
        assert_eq!(random_endpoints(&closed, &mut rng), None);
    }

    #[test]
    fn generation_is_seeded() {
        let c = config(20, 20, 0.3);
        let a = generate_grid(&c, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = generate_grid(&c, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a.to_string(), b.to_string());
        let walls = a.len() - a.walkable_count();
        assert!(walls > 0 && walls < a.len());
    }

    #[test]
    fn endpoints_are_walkable() {
        let mut rng = StdRng::seed_from_u64(3);
        let grid = generate_grid(&config(15, 10, 0.4), &mut rng).unwrap();
        for _ in 0..20 {
            let (start, goal) = random_endpoints(&grid, &mut rng).unwrap();
            assert!(grid.is_walkable(start));
            assert!(grid.is_walkable(goal));
        }
    }

    #[test]
    fn render_visualized_search() {
        let grid: Grid = "
            ...
            .#.
            ...
        "
        .parse()
        .unwrap();
        let problem = GridProblem::new(&grid);
        let mut trace = Trace::new();
        let result = AStar::new(&problem).search_visualize(|p, phase| trace.record(p, phase));
        assert!(result.is_found());
        assert_eq!(trace.count(Phase::Path), 3);

        let text = render(&grid, problem.start(), problem.goal(), &trace);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(&lines[1][1..2], "#");
        assert!(lines[0].ends_with('G'));
        assert!(lines[2].starts_with('S'));
        assert_eq!(text.matches('*').count(), 3);
    }
}
