//! A* shortest-path search for gridstar grids.
//!
//! The engine is generic: [`AStar`] solves any [`SearchProblem`], pulling
//! successors lazily and ordering its frontier with the comparator-driven
//! [`MinHeap`]. [`GridProblem`] is the realization over a
//! [`gridstar_core::Grid`], with 4-connected movement and a selectable
//! [`Heuristic`].
//!
//! ```
//! use gridstar_core::{Grid, Point};
//! use gridstar_paths::{AStar, GridProblem};
//!
//! let mut grid = Grid::new(3, 3).unwrap();
//! grid.set_walkable(Point::new(1, 1), false).unwrap();
//! let problem = GridProblem::new(&grid);
//! let result = AStar::new(&problem).search();
//! assert_eq!(result.path.len(), 5);
//! assert_eq!(result.cost, 4.0);
//! ```
//!
//! Besides [`AStar::search`], the engine can be driven one iteration at a
//! time with [`AStar::step`], observed with [`AStar::search_visualize`], or
//! cancelled with [`AStar::search_until`] / [`AStar::search_limited`].

mod astar;
mod distance;
mod problem;
mod queue;
mod traits;

pub use astar::{AStar, Phase, SearchLimits, SearchResult, SearchStatus, Step};
pub use distance::{euclidean, manhattan};
pub use problem::{GridProblem, Heuristic};
pub use queue::MinHeap;
pub use traits::SearchProblem;
