//! Incremental pathfinding on 2D obstacle grids.
//!
//! This crate computes shortest paths between a start and an end cell,
//! either by unweighted breadth-first search or by A* with the Manhattan
//! heuristic:
//!
//! - **BFS** shortest path by hop count ([`PathField::bfs_path`])
//! - **A\*** shortest path by estimated total cost ([`PathField::astar_path`])
//!
//! Both engines operate through [`PathField`], which owns every run-scoped
//! buffer (visited stamps, parent links, frontier storage, cost arrays, the
//! open-set heap) so that repeated queries on a stable grid incur zero
//! allocations.
//!
//! # Stepwise execution
//!
//! Each engine also comes in a resumable form ([`PathField::bfs`],
//! [`PathField::astar`]) returning a run value whose `step()` method
//! advances the search by one observable event. A driver loop decides
//! pacing and may abandon the run at any point; the next run supersedes
//! whatever state was left behind. This is what a step-by-step visualizer
//! builds on.
//!
//! | Step | Meaning |
//! |---|---|
//! | [`Step::Explored`] | one new cell entered the search |
//! | [`Step::Found`] | the end cell was reached; `path()` is available |
//! | [`Step::NoPath`] | the search space is exhausted |

mod astar;
mod bfs;
mod distance;
mod error;
mod field;
mod heap;
mod traits;

pub use astar::AstarRun;
pub use bfs::BfsRun;
pub use distance::manhattan;
pub use error::RequestError;
pub use field::{PathField, PathResult, Step, UNREACHABLE};
pub use heap::IndexedMinHeap;
pub use traits::BlockedGrid;
