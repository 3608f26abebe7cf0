//! **gridstar-core**: the walkable grid model used by gridstar searches.
//!
//! This crate provides geometry primitives, the [`Cell`] type carrying
//! walkability and walk cost, the fixed-size [`Grid`] that owns its cells,
//! and the [`GridError`] raised on invalid access.

pub mod cell;
pub mod error;
pub mod geom;
pub mod grid;

pub use cell::{Cell, Cost, DEFAULT_WALK_COST};
pub use error::{GridError, Result};
pub use geom::{Point, Range, RangeIter};
pub use grid::Grid;
