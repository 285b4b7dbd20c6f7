//! **gridway-core** — Geometry and obstacle-grid types for the gridway
//! pathfinding engine.
//!
//! This crate provides the two value types the search crate builds on:
//! [`Point`], a 2D integer coordinate, and [`Grid`], a width×height
//! obstacle map with dense 1D indexing.

pub mod geom;
pub mod grid;

pub use geom::Point;
pub use grid::Grid;
