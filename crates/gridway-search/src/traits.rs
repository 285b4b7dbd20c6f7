use gridway_core::{Grid, Point};

/// Minimal grid interface the search engines consume — dimensions plus a
/// per-cell blocked predicate.
pub trait BlockedGrid {
    /// Width of the grid in cells.
    fn width(&self) -> i32;

    /// Height of the grid in cells.
    fn height(&self) -> i32;

    /// Whether `p` is blocked. Out-of-bounds positions must count as
    /// blocked.
    fn is_blocked(&self, p: Point) -> bool;

    /// Whether `p` lies inside the grid.
    #[inline]
    fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width() && p.y >= 0 && p.y < self.height()
    }
}

impl BlockedGrid for Grid {
    #[inline]
    fn width(&self) -> i32 {
        Grid::width(self)
    }

    #[inline]
    fn height(&self) -> i32 {
        Grid::height(self)
    }

    #[inline]
    fn is_blocked(&self, p: Point) -> bool {
        Grid::is_blocked(self, p)
    }
}
