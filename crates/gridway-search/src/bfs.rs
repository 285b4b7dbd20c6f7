use gridway_core::Point;

use crate::PathField;
use crate::error::RequestError;
use crate::field::{NO_PARENT, PathResult, Step};
use crate::traits::BlockedGrid;

impl PathField {
    /// Begin a stepwise breadth-first search from `from` to `to`.
    ///
    /// BFS explores the grid in concentric rings over 4-connected
    /// neighbours with unit edge cost, so the first path found is shortest
    /// by hop count. Neighbours expand in `+x, -x, +y, -y` order, which
    /// decides which of several equal-length paths is reported
    /// (implementation-defined, not a compatibility contract).
    ///
    /// The request is rejected up front if either endpoint is out of
    /// bounds or blocked; no exploration happens in that case.
    pub fn bfs<'a, G: BlockedGrid>(
        &'a mut self,
        grid: &'a G,
        from: Point,
        to: Point,
    ) -> Result<BfsRun<'a, G>, RequestError> {
        self.ensure_capacity(grid.width(), grid.height());
        let (start, goal) = self.validate(grid, from, to)?;

        let generation = self.next_generation();
        self.stamps[start] = generation;
        self.parent[start] = NO_PARENT;
        self.frontier[0] = start as u32;

        Ok(BfsRun {
            terminal: if start == goal { Some(Step::Found) } else { None },
            field: self,
            grid,
            goal,
            generation,
            head: 0,
            tail: 1,
            current: None,
            dir: 0,
            start_reported: false,
        })
    }

    /// Compute the shortest path by hop count from `from` to `to`.
    ///
    /// Runs a full BFS in one call. Prefer [`PathField::bfs`] when the
    /// search should be paced or observed step by step.
    pub fn bfs_path<G: BlockedGrid>(
        &mut self,
        grid: &G,
        from: Point,
        to: Point,
    ) -> Result<PathResult, RequestError> {
        self.bfs_path_with(grid, from, to, |_| {})
    }

    /// Like [`PathField::bfs_path`], invoking `on_explored` once per
    /// explored cell, in discovery order.
    pub fn bfs_path_with<G: BlockedGrid>(
        &mut self,
        grid: &G,
        from: Point,
        to: Point,
        mut on_explored: impl FnMut(Point),
    ) -> Result<PathResult, RequestError> {
        let mut run = self.bfs(grid, from, to)?;
        let mut explored = 0usize;
        let found = loop {
            match run.step() {
                Step::Explored(p) => {
                    explored += 1;
                    on_explored(p);
                }
                Step::Found => break true,
                Step::NoPath => break false,
            }
        };
        let result = match run.path() {
            Some(path) => PathResult::Found(path),
            None => PathResult::NoPath,
        };
        log::debug!(
            "bfs {}x{} {from}->{to}: explored {explored}, found: {found}",
            grid.width(),
            grid.height(),
        );
        Ok(result)
    }
}

/// A resumable breadth-first search borrowing a [`PathField`].
///
/// Call [`BfsRun::step`] until it returns a terminal [`Step`]. Terminal
/// steps are sticky: further calls keep returning the same value. The run
/// may be dropped at any point; the field's next run supersedes whatever
/// state is left behind.
pub struct BfsRun<'a, G: BlockedGrid> {
    field: &'a mut PathField,
    grid: &'a G,
    goal: usize,
    generation: u32,
    /// FIFO cursors into the field's frontier buffer.
    head: usize,
    tail: usize,
    /// Cell being expanded and the next neighbour direction to try.
    current: Option<usize>,
    dir: usize,
    start_reported: bool,
    terminal: Option<Step>,
}

impl<G: BlockedGrid> BfsRun<'_, G> {
    /// Advance until the next observable event.
    ///
    /// Every mutation between two calls is complete (stamp, parent link,
    /// enqueue), so a driver may stop calling at any point without
    /// corrupting the field. The search succeeds the instant the end cell
    /// is discovered, without expanding its neighbours.
    pub fn step(&mut self) -> Step {
        if let Some(t) = self.terminal {
            return t;
        }
        if !self.start_reported {
            self.start_reported = true;
            // The start cell is the first discovery of the run.
            if let Some(cur) = self.current_or_dequeue() {
                return Step::Explored(self.field.point(cur));
            }
        }
        loop {
            let Some(cur) = self.current_or_dequeue() else {
                self.terminal = Some(Step::NoPath);
                return Step::NoPath;
            };
            let cp = self.field.point(cur);
            while self.dir < 4 {
                let np = cp.neighbors_4()[self.dir];
                self.dir += 1;
                let Some(ni) = self.field.idx(np) else {
                    continue;
                };
                if self.grid.is_blocked(np) || self.field.stamps[ni] == self.generation {
                    continue;
                }
                self.field.stamps[ni] = self.generation;
                self.field.parent[ni] = cur as i32;
                if ni == self.goal {
                    self.terminal = Some(Step::Found);
                    return Step::Found;
                }
                self.field.frontier[self.tail] = ni as u32;
                self.tail += 1;
                return Step::Explored(np);
            }
            self.current = None;
        }
    }

    /// The ordered start-to-end path, available once `step` has returned
    /// [`Step::Found`].
    pub fn path(&self) -> Option<Vec<Point>> {
        match self.terminal {
            Some(Step::Found) => Some(self.field.reconstruct(self.goal)),
            _ => None,
        }
    }

    fn current_or_dequeue(&mut self) -> Option<usize> {
        if let Some(cur) = self.current {
            return Some(cur);
        }
        if self.head == self.tail {
            return None;
        }
        let cur = self.field.frontier[self.head] as usize;
        self.head += 1;
        self.current = Some(cur);
        self.dir = 0;
        Some(cur)
    }
}
