//! [`GridProblem`], the grid realization of [`SearchProblem`].

use std::fmt;
use std::str::FromStr;

use gridstar_core::{Cost, Grid, GridError, Point, Result};

use crate::distance::{euclidean, manhattan};
use crate::traits::SearchProblem;

/// Which estimate [`GridProblem::heuristic`] uses.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Heuristic {
    /// L1 distance; admissible and consistent on 4-connected unit grids.
    #[default]
    Manhattan,
    /// Straight-line distance; admissible but less informed than Manhattan.
    Euclidean,
    /// Always zero, which turns A* into uniform-cost search.
    Null,
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Heuristic::Manhattan => "manhattan",
            Heuristic::Euclidean => "euclidean",
            Heuristic::Null => "null",
        })
    }
}

impl FromStr for Heuristic {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "manhattan" => Ok(Heuristic::Manhattan),
            "euclidean" => Ok(Heuristic::Euclidean),
            "null" | "none" => Ok(Heuristic::Null),
            other => Err(format!(
                "unknown heuristic {other:?} (expected manhattan, euclidean or null)"
            )),
        }
    }
}

/// A shortest-path problem on a borrowed [`Grid`].
///
/// Start and goal are always in bounds. Their walkability is left to the
/// caller: a blocked start is still expanded, a blocked goal is never
/// generated as a successor and so is never found.
#[derive(Debug, Clone)]
pub struct GridProblem<'g> {
    grid: &'g Grid,
    start: Point,
    goal: Point,
    heuristic: Heuristic,
}

impl<'g> GridProblem<'g> {
    /// A problem from the bottom-left corner to the top-right corner.
    pub fn new(grid: &'g Grid) -> Self {
        Self {
            grid,
            start: Point::ZERO,
            goal: Point::new(grid.width() - 1, grid.height() - 1),
            heuristic: Heuristic::default(),
        }
    }

    /// A problem between two explicit points.
    pub fn with_endpoints(grid: &'g Grid, start: Point, goal: Point) -> Result<Self> {
        let mut problem = Self::new(grid);
        problem.set_start(start)?;
        problem.set_goal(goal)?;
        Ok(problem)
    }

    /// Use `heuristic` for [`SearchProblem::heuristic`] (builder).
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    #[inline]
    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    #[inline]
    pub fn heuristic_kind(&self) -> Heuristic {
        self.heuristic
    }

    pub fn set_heuristic(&mut self, heuristic: Heuristic) {
        self.heuristic = heuristic;
    }

    /// Move the start. Out-of-bounds points are rejected.
    pub fn set_start(&mut self, p: Point) -> Result<()> {
        self.check_bounds(p)?;
        self.start = p;
        Ok(())
    }

    /// Move the goal. Out-of-bounds points are rejected.
    pub fn set_goal(&mut self, p: Point) -> Result<()> {
        self.check_bounds(p)?;
        self.goal = p;
        Ok(())
    }

    fn check_bounds(&self, p: Point) -> Result<()> {
        if self.grid.contains(p) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                pos: p,
                width: self.grid.width(),
                height: self.grid.height(),
            })
        }
    }

    pub fn manhattan_heuristic(&self, p: Point) -> Cost {
        manhattan(p, self.goal)
    }

    pub fn euclidean_heuristic(&self, p: Point) -> Cost {
        euclidean(p, self.goal)
    }

    pub fn null_heuristic(&self, _p: Point) -> Cost {
        0.0
    }
}

impl SearchProblem for GridProblem<'_> {
    type State = Point;

    #[inline]
    fn start(&self) -> Point {
        self.start
    }

    #[inline]
    fn goal(&self) -> Point {
        self.goal
    }

    fn successors(&self, state: Point, buf: &mut Vec<Point>) {
        self.grid.neighbors(state, buf);
    }

    /// Sum of the walk cost of every cell but the last: a step is paid for
    /// when leaving a cell, never when entering the goal.
    fn path_cost(&self, path: &[Point]) -> Cost {
        match path.split_last() {
            Some((_, walked)) => walked.iter().map(|&p| self.grid[p].walk_cost).sum(),
            None => 0.0,
        }
    }

    fn heuristic(&self, state: Point) -> Cost {
        match self.heuristic {
            Heuristic::Manhattan => self.manhattan_heuristic(state),
            Heuristic::Euclidean => self.euclidean_heuristic(state),
            Heuristic::Null => self.null_heuristic(state),
        }
    }
}
