use gridstar_core::{Cost, Point};

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> Cost {
    Cost::from((a.x - b.x).abs() + (a.y - b.y).abs())
}

/// Euclidean (L2) distance between two points.
#[inline]
pub fn euclidean(a: Point, b: Point) -> Cost {
    let dx = Cost::from(a.x - b.x);
    let dy = Cost::from(a.y - b.y);
    dx.hypot(dy)
}
