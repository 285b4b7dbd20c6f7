use gridway_core::Point;

use crate::RequestError;
use crate::heap::IndexedMinHeap;
use crate::traits::BlockedGrid;

/// Sentinel cost meaning "not yet reached" in the A* score arrays.
pub const UNREACHABLE: i32 = i32::MAX;

/// Parent-link sentinel marking the start of a path.
pub(crate) const NO_PARENT: i32 = -1;

/// One observable transition of a stepwise search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A new cell entered the search (discovered by BFS, finalized by A*).
    Explored(Point),
    /// The end cell was reached; the run's `path()` is now available.
    Found,
    /// The search space is exhausted without reaching the end cell.
    NoPath,
}

impl Step {
    /// Whether this step ends the run.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Step::Found | Step::NoPath)
    }
}

/// Outcome of a completed run: either an ordered start-to-end path or the
/// normal "no path exists" result.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathResult {
    /// A shortest path, start and end inclusive.
    Found(Vec<Point>),
    /// Every reachable cell was explored without reaching the end.
    NoPath,
}

impl PathResult {
    /// Whether a path was found.
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, PathResult::Found(_))
    }

    /// Borrow the path, if any.
    pub fn path(&self) -> Option<&[Point]> {
        match self {
            PathResult::Found(p) => Some(p),
            PathResult::NoPath => None,
        }
    }

    /// Consume the result, yielding the path if any.
    pub fn into_path(self) -> Option<Vec<Point>> {
        match self {
            PathResult::Found(p) => Some(p),
            PathResult::NoPath => None,
        }
    }
}

/// Central coordinator for pathfinding over a grid.
///
/// `PathField` owns every run-scoped buffer — the generation-stamped
/// visited set, parent links, FIFO frontier storage, A* score arrays and
/// the open-set heap — sized to the grid's cell count. Buffers are
/// reallocated only when the grid dimensions change; otherwise runs reuse
/// them with zero allocation, which keeps per-frame stepping cheap.
///
/// A field supports one run at a time. Abandoning a run mid-way is fine:
/// the next run's generation bump (BFS) or full reset (A*) supersedes
/// whatever was left behind.
pub struct PathField {
    width: i32,
    height: i32,
    // BFS state: stamp == generation means "visited this run".
    pub(crate) stamps: Vec<u32>,
    pub(crate) generation: u32,
    pub(crate) frontier: Vec<u32>,
    // Shared parent links, NO_PARENT at the start cell.
    pub(crate) parent: Vec<i32>,
    // A* state, fully reset per run.
    pub(crate) g: Vec<i32>,
    pub(crate) f: Vec<i32>,
    pub(crate) h: Vec<i32>,
    pub(crate) closed: Vec<bool>,
    pub(crate) heap: IndexedMinHeap,
}

impl Default for PathField {
    fn default() -> Self {
        Self::new()
    }
}

impl PathField {
    /// Create an empty field. Buffers are sized lazily on first use.
    pub fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            stamps: Vec::new(),
            generation: 0,
            frontier: Vec::new(),
            parent: Vec::new(),
            g: Vec::new(),
            f: Vec::new(),
            h: Vec::new(),
            closed: Vec::new(),
            heap: IndexedMinHeap::new(),
        }
    }

    /// Size every run-scoped buffer for a `width` × `height` grid.
    ///
    /// No-op when the dimensions are unchanged. When only the shape
    /// changes (same cell count) the buffers are kept and the generation
    /// bumped so stale stamps are ignored; when the cell count changes
    /// everything is reallocated and counters reset.
    pub fn ensure_capacity(&mut self, width: i32, height: i32) {
        let width = width.max(0);
        let height = height.max(0);
        if width == self.width && height == self.height {
            return;
        }
        let len = (width as usize) * (height as usize);
        let old_len = self.stamps.len();
        self.width = width;
        self.height = height;

        if len == old_len {
            // Goes through the overflow wrap so a bump at the generation
            // limit still clears the stamps.
            self.next_generation();
            return;
        }

        self.stamps.clear();
        self.stamps.resize(len, 0);
        self.generation = 0;

        self.frontier.clear();
        self.frontier.resize(len, 0);

        self.parent.clear();
        self.parent.resize(len, NO_PARENT);

        self.g.clear();
        self.g.resize(len, UNREACHABLE);
        self.f.clear();
        self.f.resize(len, UNREACHABLE);
        self.h.clear();
        self.h.resize(len, 0);
        self.closed.clear();
        self.closed.resize(len, false);

        self.heap.ensure_capacity(len);
    }

    /// Dimensions the buffers are currently sized for.
    #[inline]
    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    /// Begin a new visited-set generation.
    ///
    /// On reaching the maximum representable generation the stamp array is
    /// cleared and the counter wraps to 1, so an old stamp can never
    /// produce a false "already visited" match.
    pub(crate) fn next_generation(&mut self) -> u32 {
        if self.generation == u32::MAX {
            self.stamps.fill(0);
            self.generation = 1;
        } else {
            self.generation += 1;
        }
        self.generation
    }

    /// Convert a point to a flat index. Returns `None` if out of bounds.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if p.x < 0 || p.x >= self.width || p.y < 0 || p.y >= self.height {
            return None;
        }
        Some((p.y as usize) * (self.width as usize) + p.x as usize)
    }

    /// Convert a flat index back to a point.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let w = self.width as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    /// Reject a request before any exploration happens.
    ///
    /// Returns the flat indices of the endpoints when both are in bounds
    /// and unblocked.
    pub(crate) fn validate<G: BlockedGrid>(
        &self,
        grid: &G,
        from: Point,
        to: Point,
    ) -> Result<(usize, usize), RequestError> {
        for p in [from, to] {
            if !grid.in_bounds(p) {
                return Err(RequestError::OutOfBounds(p));
            }
            if grid.is_blocked(p) {
                return Err(RequestError::Blocked(p));
            }
        }
        // In-bounds for the grid implies in-bounds for the sized buffers.
        match (self.idx(from), self.idx(to)) {
            (Some(s), Some(e)) => Ok((s, e)),
            (None, _) => Err(RequestError::OutOfBounds(from)),
            (_, None) => Err(RequestError::OutOfBounds(to)),
        }
    }

    /// Walk the parent links backward from `goal` and return the path in
    /// start-to-end order.
    ///
    /// Panics if the chain fails to terminate within the grid size. That
    /// means the visited/parent bookkeeping is corrupt, which is a bug in
    /// the engine, not a caller error.
    pub(crate) fn reconstruct(&self, goal: usize) -> Vec<Point> {
        let cap = self.stamps.len();
        let mut path = Vec::new();
        let mut cur = goal as i32;
        while cur != NO_PARENT {
            if path.len() > cap {
                log::error!(
                    "parent chain from cell {} exceeds grid size {}",
                    goal,
                    cap
                );
                panic!("path reconstruction failed: corrupt parent links");
            }
            path.push(self.point(cur as usize));
            cur = self.parent[cur as usize];
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridway_core::Grid;

    #[test]
    fn ensure_capacity_reuses_on_same_size() {
        let mut field = PathField::new();
        field.ensure_capacity(10, 8);
        field.generation = 5;
        field.stamps[3] = 5;

        field.ensure_capacity(10, 8);
        assert_eq!(field.generation, 5);
        assert_eq!(field.stamps[3], 5);
    }

    #[test]
    fn ensure_capacity_reallocates_on_resize() {
        let mut field = PathField::new();
        field.ensure_capacity(4, 4);
        field.generation = 7;

        field.ensure_capacity(9, 9);
        assert_eq!(field.size(), (9, 9));
        assert_eq!(field.stamps.len(), 81);
        assert_eq!(field.generation, 0);
        assert!(field.g.iter().all(|&v| v == UNREACHABLE));
        assert!(field.parent.iter().all(|&v| v == NO_PARENT));
    }

    #[test]
    fn ensure_capacity_same_len_different_shape_bumps_generation() {
        let mut field = PathField::new();
        field.ensure_capacity(4, 3);
        field.generation = 2;
        field.stamps[5] = 2;

        field.ensure_capacity(3, 4);
        assert_eq!(field.size(), (3, 4));
        assert_eq!(field.stamps.len(), 12);
        // Stale stamps survive but can no longer match.
        assert_eq!(field.generation, 3);
    }

    #[test]
    fn reshape_at_max_generation_clears_stamps() {
        let mut field = PathField::new();
        field.ensure_capacity(4, 3);
        field.generation = u32::MAX;
        field.stamps.fill(u32::MAX);

        // Same cell count, different shape: the bump wraps with a clear
        // instead of sliding past the limit.
        field.ensure_capacity(3, 4);
        assert_eq!(field.generation, 1);
        assert!(field.stamps.iter().all(|&s| s == 0));
    }

    #[test]
    fn generation_wraps_with_full_clear() {
        let mut field = PathField::new();
        field.ensure_capacity(3, 3);
        field.generation = u32::MAX;
        field.stamps.fill(u32::MAX);

        assert_eq!(field.next_generation(), 1);
        assert!(field.stamps.iter().all(|&s| s == 0));
    }

    #[test]
    fn index_round_trip() {
        let mut field = PathField::new();
        field.ensure_capacity(5, 3);
        for i in 0..15 {
            let p = field.point(i);
            assert_eq!(field.idx(p), Some(i));
        }
        assert_eq!(field.idx(Point::new(5, 0)), None);
        assert_eq!(field.idx(Point::new(0, 3)), None);
        assert_eq!(field.idx(Point::new(-1, 1)), None);
    }

    #[test]
    fn validate_rejects_bad_endpoints() {
        let mut grid = Grid::new(4, 4);
        grid.set_blocked(Point::new(2, 2), true);
        let mut field = PathField::new();
        field.ensure_capacity(4, 4);

        assert_eq!(
            field.validate(&grid, Point::new(-1, 0), Point::new(3, 3)),
            Err(RequestError::OutOfBounds(Point::new(-1, 0)))
        );
        assert_eq!(
            field.validate(&grid, Point::new(0, 0), Point::new(4, 0)),
            Err(RequestError::OutOfBounds(Point::new(4, 0)))
        );
        assert_eq!(
            field.validate(&grid, Point::new(2, 2), Point::new(0, 0)),
            Err(RequestError::Blocked(Point::new(2, 2)))
        );
        assert!(field.validate(&grid, Point::new(0, 0), Point::new(3, 3)).is_ok());
    }

    #[test]
    fn validate_blames_the_endpoint_that_fails_to_map() {
        // A grid whose claimed bounds exceed its width forces the index
        // fallback; the error must name the endpoint that failed.
        struct Oversold;
        impl crate::BlockedGrid for Oversold {
            fn width(&self) -> i32 {
                2
            }
            fn height(&self) -> i32 {
                2
            }
            fn is_blocked(&self, _p: Point) -> bool {
                false
            }
            fn in_bounds(&self, _p: Point) -> bool {
                true
            }
        }
        let mut field = PathField::new();
        field.ensure_capacity(2, 2);
        assert_eq!(
            field.validate(&Oversold, Point::new(9, 0), Point::new(1, 1)),
            Err(RequestError::OutOfBounds(Point::new(9, 0)))
        );
        assert_eq!(
            field.validate(&Oversold, Point::new(1, 1), Point::new(0, 9)),
            Err(RequestError::OutOfBounds(Point::new(0, 9)))
        );
    }

    #[test]
    #[should_panic(expected = "corrupt parent links")]
    fn reconstruct_panics_on_parent_cycle() {
        let mut field = PathField::new();
        field.ensure_capacity(2, 2);
        field.parent[0] = 1;
        field.parent[1] = 0;
        let _ = field.reconstruct(0);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn path_result_round_trip() {
        let found = PathResult::Found(vec![Point::new(0, 0), Point::new(1, 0)]);
        let json = serde_json::to_string(&found).unwrap();
        assert_eq!(found, serde_json::from_str::<PathResult>(&json).unwrap());

        let none = PathResult::NoPath;
        let json = serde_json::to_string(&none).unwrap();
        assert_eq!(none, serde_json::from_str::<PathResult>(&json).unwrap());
    }
}
