//! The [`Grid`] type: a fixed-size 2D grid of [`Cell`]s.
//!
//! Cells are stored densely in row-major order, bottom row first. A grid is
//! built and configured up front, then borrowed immutably by any number of
//! searches.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use crate::cell::{Cell, Cost};
use crate::error::{GridError, Result};
use crate::geom::{Point, Range};

/// A 2D grid of [`Cell`]s.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<Cell>,
    bounds: Range,
}

impl Grid {
    /// Create a grid of walkable cells with the default walk cost.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidSize { width, height });
        }
        let bounds = Range::new(0, 0, width, height);
        Ok(Self {
            cells: bounds.iter().map(Cell::new).collect(),
            bounds,
        })
    }

    /// The bounding range of this grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Size of the grid as a `Point`.
    #[inline]
    pub fn size(&self) -> Point {
        self.bounds.size()
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: grids have at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some((p.y as usize) * (self.width() as usize) + (p.x as usize))
    }

    fn out_of_bounds(&self, pos: Point) -> GridError {
        GridError::OutOfBounds {
            pos,
            width: self.width(),
            height: self.height(),
        }
    }

    /// The cell at `p`, or `None` if `p` is outside the grid.
    #[inline]
    pub fn get(&self, p: Point) -> Option<&Cell> {
        self.index(p).map(|i| &self.cells[i])
    }

    /// The cell at `p`, failing with [`GridError::OutOfBounds`].
    pub fn cell(&self, p: Point) -> Result<&Cell> {
        self.get(p).ok_or_else(|| self.out_of_bounds(p))
    }

    fn cell_mut(&mut self, p: Point) -> Result<&mut Cell> {
        match self.index(p) {
            Some(i) => Ok(&mut self.cells[i]),
            None => Err(self.out_of_bounds(p)),
        }
    }

    /// Set the walk cost of the cell at `p`.
    ///
    /// The cost must be finite and strictly positive.
    pub fn set_walk_cost(&mut self, p: Point, cost: Cost) -> Result<()> {
        if !cost.is_finite() || cost <= 0.0 {
            return Err(GridError::InvalidCost { pos: p, cost });
        }
        self.cell_mut(p)?.walk_cost = cost;
        Ok(())
    }

    /// Mark the cell at `p` walkable or blocked.
    pub fn set_walkable(&mut self, p: Point, walkable: bool) -> Result<()> {
        self.cell_mut(p)?.walkable = walkable;
        Ok(())
    }

    /// Whether `p` is in bounds and walkable.
    #[inline]
    pub fn is_walkable(&self, p: Point) -> bool {
        self.get(p).is_some_and(|c| c.walkable)
    }

    /// Append the walkable cardinal neighbours of `p` into `buf`, in the
    /// order +x, -x, +y, -y. The caller clears `buf` before calling.
    pub fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        for n in p.cardinal_neighbors() {
            if self.is_walkable(n) {
                buf.push(n);
            }
        }
    }

    /// Number of walkable cells.
    pub fn walkable_count(&self) -> usize {
        self.cells.iter().filter(|c| c.walkable).count()
    }

    /// Row-major iterator over all cells, bottom row first.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }
}

impl Index<Point> for Grid {
    type Output = Cell;

    #[track_caller]
    fn index(&self, p: Point) -> &Cell {
        match self.get(p) {
            Some(cell) => cell,
            None => panic!("{}", self.out_of_bounds(p)),
        }
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Prints the top row (`y = height - 1`) first, ` o ` for walkable cells
/// and ` x ` for walls.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.height()).rev() {
            for x in 0..self.width() {
                let glyph = if self[Point::new(x, y)].walkable {
                    " o "
                } else {
                    " x "
                };
                f.write_str(glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses a compact map, top row first: `.` or `o` is walkable, `#` or `x`
/// is a wall. Blank lines and surrounding whitespace are ignored.
impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self> {
        let rows: Vec<(usize, &str)> = s
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty())
            .collect();
        let Some(&(first_line, first)) = rows.first() else {
            return Err(GridError::Parse {
                line: 1,
                reason: "empty map".to_string(),
            });
        };
        let width = first.chars().count();
        let height = rows.len();
        if width > i32::MAX as usize || height > i32::MAX as usize {
            return Err(GridError::Parse {
                line: first_line,
                reason: "map too large".to_string(),
            });
        }

        let mut grid = Grid::new(width as i32, height as i32)?;
        for (row, &(line_no, line)) in rows.iter().enumerate() {
            if line.chars().count() != width {
                return Err(GridError::Parse {
                    line: line_no,
                    reason: format!("expected {width} columns, found {}", line.chars().count()),
                });
            }
            let y = (height - 1 - row) as i32;
            for (x, ch) in line.chars().enumerate() {
                let walkable = match ch {
                    '.' | 'o' => true,
                    '#' | 'x' => false,
                    other => {
                        return Err(GridError::Parse {
                            line: line_no,
                            reason: format!("unexpected character {other:?}"),
                        });
                    }
                };
                grid.set_walkable(Point::new(x as i32, y), walkable)?;
            }
        }
        Ok(grid)
    }
}
