use std::fmt;

use gridway_core::Point;

/// A search request rejected before any exploration took place.
///
/// Distinct from a search that ran and found nothing — that is the normal
/// [`PathResult::NoPath`](crate::PathResult::NoPath) outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestError {
    /// Start or end cell lies outside the grid.
    OutOfBounds(Point),
    /// Start or end cell is an obstacle.
    Blocked(Point),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::OutOfBounds(p) => write!(f, "cell {p} is out of bounds"),
            RequestError::Blocked(p) => write!(f, "cell {p} is blocked"),
        }
    }
}

impl std::error::Error for RequestError {}
