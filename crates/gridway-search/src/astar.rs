use gridway_core::Point;

use crate::PathField;
use crate::distance::manhattan;
use crate::error::RequestError;
use crate::field::{NO_PARENT, PathResult, Step, UNREACHABLE};
use crate::traits::BlockedGrid;

impl PathField {
    /// Begin a stepwise A* search from `from` to `to`.
    ///
    /// The open set is an indexed min-heap keyed by `g + h`, where `h` is
    /// the Manhattan distance to the goal — admissible and consistent on a
    /// 4-connected unit-cost grid, so the first time the goal is popped the
    /// path is optimal. Equal estimates break toward the smaller `h`,
    /// which narrows the explored region around the goal.
    ///
    /// Unlike BFS, every A* array is reset for the whole grid at the start
    /// of the run.
    pub fn astar<'a, G: BlockedGrid>(
        &'a mut self,
        grid: &'a G,
        from: Point,
        to: Point,
    ) -> Result<AstarRun<'a, G>, RequestError> {
        self.ensure_capacity(grid.width(), grid.height());
        let (start, goal) = self.validate(grid, from, to)?;

        self.g.fill(UNREACHABLE);
        self.f.fill(UNREACHABLE);
        self.h.fill(0);
        self.parent.fill(NO_PARENT);
        self.closed.fill(false);
        self.heap.clear();

        self.g[start] = 0;
        self.h[start] = manhattan(from, to);
        self.f[start] = self.h[start];
        self.heap.push(start, &self.f, &self.h);

        Ok(AstarRun {
            terminal: if start == goal { Some(Step::Found) } else { None },
            field: self,
            grid,
            goal,
            goal_point: to,
        })
    }

    /// Compute the shortest path from `from` to `to` using A*.
    ///
    /// Runs a full search in one call. Prefer [`PathField::astar`] when
    /// the search should be paced or observed step by step.
    pub fn astar_path<G: BlockedGrid>(
        &mut self,
        grid: &G,
        from: Point,
        to: Point,
    ) -> Result<PathResult, RequestError> {
        self.astar_path_with(grid, from, to, |_| {})
    }

    /// Like [`PathField::astar_path`], invoking `on_explored` once per
    /// finalized cell, in finalization order.
    pub fn astar_path_with<G: BlockedGrid>(
        &mut self,
        grid: &G,
        from: Point,
        to: Point,
        mut on_explored: impl FnMut(Point),
    ) -> Result<PathResult, RequestError> {
        let mut run = self.astar(grid, from, to)?;
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
            "astar {}x{} {from}->{to}: explored {explored}, found: {found}",
            grid.width(),
            grid.height(),
        );
        Ok(result)
    }
}

/// A resumable A* search borrowing a [`PathField`].
///
/// Call [`AstarRun::step`] until it returns a terminal [`Step`]. Terminal
/// steps are sticky. Dropping the run mid-way is safe; the next run's
/// full reset supersedes the leftover state.
pub struct AstarRun<'a, G: BlockedGrid> {
    field: &'a mut PathField,
    grid: &'a G,
    goal: usize,
    goal_point: Point,
    terminal: Option<Step>,
}

impl<G: BlockedGrid> AstarRun<'_, G> {
    /// Advance by one pop/expand cycle.
    ///
    /// Pops the open-set minimum, finalizes it, relaxes its unblocked
    /// in-bounds neighbours (insert or decrease-key on strict
    /// improvement), and reports the finalized cell. The run succeeds only
    /// when the goal itself is popped as the minimum, which is what
    /// guarantees optimality under the consistent heuristic.
    pub fn step(&mut self) -> Step {
        if let Some(t) = self.terminal {
            return t;
        }
        loop {
            let Some(cur) = self.field.heap.pop_min(&self.field.f, &self.field.h) else {
                self.terminal = Some(Step::NoPath);
                return Step::NoPath;
            };
            // The position table keeps one slot per cell, so this guard
            // only fires if insertion order ever races finalization.
            if self.field.closed[cur] {
                continue;
            }
            if cur == self.goal {
                self.terminal = Some(Step::Found);
                return Step::Found;
            }
            self.field.closed[cur] = true;

            let cp = self.field.point(cur);
            let cur_g = self.field.g[cur];
            for np in cp.neighbors_4() {
                let Some(ni) = self.field.idx(np) else {
                    continue;
                };
                if self.grid.is_blocked(np) || self.field.closed[ni] {
                    continue;
                }
                let tentative = cur_g + 1;
                if tentative >= self.field.g[ni] {
                    continue;
                }
                let first_visit = !self.field.heap.contains(ni);
                self.field.g[ni] = tentative;
                self.field.h[ni] = manhattan(np, self.goal_point);
                self.field.f[ni] = tentative + self.field.h[ni];
                self.field.parent[ni] = cur as i32;
                if first_visit {
                    self.field.heap.push(ni, &self.field.f, &self.field.h);
                } else {
                    self.field.heap.decrease_key(ni, &self.field.f, &self.field.h);
                }
            }
            return Step::Explored(cp);
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
}
