//! The [`Cell`] type: one grid position with walkability and walk cost.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::geom::Point;

/// Traversal cost unit shared by grids and searches.
pub type Cost = f64;

/// Walk cost of a freshly created cell.
pub const DEFAULT_WALK_COST: Cost = 1.0;

/// A grid cell.
///
/// Identity is the position: two cells compare equal iff their positions
/// match, whatever their cost or walkability.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pos: Point,
    /// Cost charged for leaving this cell along a path.
    pub walk_cost: Cost,
    pub walkable: bool,
}

impl Cell {
    /// A walkable cell at `pos` with the default walk cost.
    #[inline]
    pub const fn new(pos: Point) -> Self {
        Self {
            pos,
            walk_cost: DEFAULT_WALK_COST,
            walkable: true,
        }
    }

    #[inline]
    pub const fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub const fn x(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub const fn y(&self) -> i32 {
        self.pos.y
    }

    /// Set the walk cost (builder).
    #[inline]
    pub const fn with_walk_cost(mut self, walk_cost: Cost) -> Self {
        self.walk_cost = walk_cost;
        self
    }

    /// Set walkability (builder).
    #[inline]
    pub const fn with_walkable(mut self, walkable: bool) -> Self {
        self.walkable = walkable;
        self
    }
}

impl PartialEq for Cell {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pos.hash(state);
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.pos.fmt(f)
    }
}
