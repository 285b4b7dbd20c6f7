//! The obstacle grid: a width×height map of free/blocked cells.
//!
//! Cells are addressed either by [`Point`] or by the dense index
//! `y * width + x`. The grid is a plain value type: the search engines
//! treat it as read-only for the duration of a run, while callers may
//! edit obstacles freely between runs.

use crate::Point;

/// A 2D obstacle map with dense row-major storage.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    width: i32,
    height: i32,
    blocked: Vec<bool>,
}

impl Grid {
    /// Create a new grid with every cell free.
    ///
    /// Negative dimensions are clamped to zero.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            blocked: vec![false; (width as usize) * (height as usize)],
        }
    }

    /// Width of the grid.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height of the grid.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.blocked.len()
    }

    /// Whether the grid has zero cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty()
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    /// Whether `p` is blocked. Out-of-bounds positions count as blocked,
    /// so callers never need a separate bounds check first.
    #[inline]
    pub fn is_blocked(&self, p: Point) -> bool {
        match self.to_index(p) {
            Some(i) => self.blocked[i],
            None => true,
        }
    }

    /// Convert a point to its dense index. Returns `None` if out of bounds.
    #[inline]
    pub fn to_index(&self, p: Point) -> Option<usize> {
        if !self.in_bounds(p) {
            return None;
        }
        Some((p.y as usize) * (self.width as usize) + p.x as usize)
    }

    /// Convert a dense index back to a point.
    ///
    /// The inverse of [`Grid::to_index`] for in-bounds points.
    #[inline]
    pub fn from_index(&self, idx: usize) -> Point {
        let w = self.width as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    /// Set the blocked state of `p`. Out-of-bounds positions are ignored.
    pub fn set_blocked(&mut self, p: Point, blocked: bool) {
        if let Some(i) = self.to_index(p) {
            self.blocked[i] = blocked;
        }
    }

    /// Flip the blocked state of `p`. Out-of-bounds positions are ignored.
    pub fn toggle_blocked(&mut self, p: Point) {
        if let Some(i) = self.to_index(p) {
            self.blocked[i] = !self.blocked[i];
        }
    }

    /// Remove every obstacle.
    pub fn clear(&mut self) {
        self.blocked.fill(false);
    }

    /// Row-major iterator over every point in the grid.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        let w = self.width;
        (0..self.len()).map(move |i| Point::new((i as i32) % w, (i as i32) / w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_and_blocking() {
        let mut g = Grid::new(4, 3);
        assert!(g.in_bounds(Point::new(0, 0)));
        assert!(g.in_bounds(Point::new(3, 2)));
        assert!(!g.in_bounds(Point::new(4, 0)));
        assert!(!g.in_bounds(Point::new(0, 3)));
        assert!(!g.in_bounds(Point::new(-1, 0)));

        // Out of bounds counts as blocked.
        assert!(g.is_blocked(Point::new(-1, 0)));
        assert!(g.is_blocked(Point::new(4, 2)));

        assert!(!g.is_blocked(Point::new(2, 1)));
        g.set_blocked(Point::new(2, 1), true);
        assert!(g.is_blocked(Point::new(2, 1)));
        g.toggle_blocked(Point::new(2, 1));
        assert!(!g.is_blocked(Point::new(2, 1)));
    }

    #[test]
    fn set_blocked_out_of_bounds_is_ignored() {
        let mut g = Grid::new(2, 2);
        g.set_blocked(Point::new(5, 5), true);
        g.toggle_blocked(Point::new(-1, 0));
        assert!(g.points().all(|p| !g.is_blocked(p)));
    }

    #[test]
    fn index_mapping_is_bijective() {
        let g = Grid::new(5, 4);
        for (i, p) in g.points().enumerate() {
            assert_eq!(g.to_index(p), Some(i));
            assert_eq!(g.from_index(i), p);
        }
        assert_eq!(g.to_index(Point::new(5, 0)), None);
        assert_eq!(g.to_index(Point::new(0, 4)), None);
    }

    #[test]
    fn clear_removes_all_obstacles() {
        let mut g = Grid::new(3, 3);
        g.set_blocked(Point::new(1, 1), true);
        g.set_blocked(Point::new(2, 0), true);
        g.clear();
        assert!(g.points().all(|p| !g.is_blocked(p)));
    }

    #[test]
    fn zero_sized_grid() {
        let g = Grid::new(0, 5);
        assert!(g.is_empty());
        assert!(!g.in_bounds(Point::ZERO));
        assert!(g.is_blocked(Point::ZERO));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let mut g = Grid::new(3, 2);
        g.set_blocked(Point::new(1, 1), true);
        let json = serde_json::to_string(&g).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(g, back);
    }
}
