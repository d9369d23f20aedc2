//! Positions, cell coordinates and occupants.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::OccupantId;

/// A point on the 2D plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Position {
    /// Creates a new position.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Column/row address of a grid cell.
///
/// Cells are stored column-major: the flat index is `num_cells * x + y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    /// Cell column, `floor(x / cell_size)`.
    pub x: usize,
    /// Cell row, `floor(y / cell_size)`.
    pub y: usize,
}

impl CellCoord {
    /// Creates a new cell coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Flattened storage index.
    #[inline]
    #[must_use]
    pub const fn flat_index(self, num_cells: usize) -> usize {
        num_cells * self.x + self.y
    }

    /// Inverse of [`CellCoord::flat_index`].
    #[inline]
    #[must_use]
    pub const fn from_flat(index: usize, num_cells: usize) -> Self {
        Self {
            x: index / num_cells,
            y: index % num_cells,
        }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An id with its last known position.
///
/// Occupants are owned by the caller. The grid only stores their ids.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Occupant {
    /// Identifier stored in the grid.
    pub id: OccupantId,
    /// Current position.
    pub position: Position,
}

impl Occupant {
    /// Creates a new occupant.
    #[inline]
    #[must_use]
    pub const fn new(id: OccupantId, position: Position) -> Self {
        Self { id, position }
    }
}
