//! # Spatial Partitioning
//!
//! Uniform grid bucketing occupant ids by the cell containing their
//! position, so interaction queries only look at near neighbours.

mod cell;
mod grid;
mod report;

pub use cell::{CellCoord, Occupant, Position};
pub use grid::{Relocation, SpatialGrid};
pub use report::{CellReport, GridReport};
