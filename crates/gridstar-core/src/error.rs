use crate::cell::Cost;
use crate::geom::Point;

/// Errors raised by the grid model.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// A coordinate lies outside the grid.
    #[error("point {pos} is outside the {width}x{height} grid")]
    OutOfBounds { pos: Point, width: i32, height: i32 },

    /// Grid dimensions must both be positive.
    #[error("invalid grid size {width}x{height}")]
    InvalidSize { width: i32, height: i32 },

    /// Walk costs must be finite and strictly positive.
    #[error("invalid walk cost {cost} at {pos}")]
    InvalidCost { pos: Point, cost: Cost },

    /// A text map could not be parsed.
    #[error("map parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

/// Result type used throughout the grid model.
pub type Result<T> = std::result::Result<T, GridError>;
