//! # Spatial Grid
//!
//! Uniform partition of a bounded square into `num_cells x num_cells`
//! cells of side `cell_size`. Each cell keeps the ordered list of occupant
//! ids located inside it.
//!
//! ## Bounds Policy
//!
//! Coordinates must lie in `[0, num_cells * cell_size)` on both axes.
//! Anything else (negative, too large, NaN, infinite) is rejected with
//! [`TesseraError::OutOfBounds`] before any cell is touched. Positions are
//! never clamped or wrapped.
//!
//! ## Interaction Scope
//!
//! Pair queries only pair occupants sharing a cell. Two occupants a hair
//! apart on either side of a cell border never interact.

use tracing::{trace, warn};

use super::cell::{CellCoord, Occupant, Position};
use super::report::{CellReport, GridReport};
use crate::config::GridConfig;
use crate::error::{TesseraError, TesseraResult};
use crate::id::OccupantId;

/// Structural effect of a [`SpatialGrid::relocate`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relocation {
    /// Old and new position share a cell. Nothing moved.
    Stayed(CellCoord),
    /// The id was erased from `from` and appended to `to`.
    Migrated {
        /// Previous cell.
        from: CellCoord,
        /// New cell.
        to: CellCoord,
    },
    /// The id was not found in the cell of its old position. Nothing was
    /// erased, but the id was still appended to `to`.
    Adopted {
        /// New cell.
        to: CellCoord,
    },
}

impl Relocation {
    /// Cell holding the id after the call.
    #[inline]
    #[must_use]
    pub const fn cell(self) -> CellCoord {
        match self {
            Self::Stayed(cell) | Self::Migrated { to: cell, .. } | Self::Adopted { to: cell } => {
                cell
            }
        }
    }
}

/// Fixed grid of occupant buckets.
///
/// # Thread Safety
///
/// Not thread-safe. Callers needing shared access serialize it externally.
///
/// # Example
///
/// ```rust,ignore
/// let mut grid = SpatialGrid::new(GridConfig::default());
/// grid.insert(OccupantId(1), Position::new(5.0, 5.0))?;
/// grid.relocate(OccupantId(1), Position::new(5.0, 5.0), Position::new(25.0, 5.0))?;
/// grid.for_each_cell_pair(|a, b| println!("{a} meets {b}"));
/// ```
#[derive(Clone, Debug)]
pub struct SpatialGrid {
    config: GridConfig,
    /// `num_cells * num_cells` buckets, flat index `num_cells * x + y`.
    cells: Box<[Vec<OccupantId>]>,
    /// Total ids across all buckets.
    population: usize,
}

impl SpatialGrid {
    /// Creates an empty grid.
    ///
    /// # Panics
    ///
    /// Panics if `config` does not pass [`GridConfig::validate`].
    #[must_use]
    pub fn new(config: GridConfig) -> Self {
        assert!(
            config.validate().is_ok(),
            "Grid must have a positive finite cell size and at least one cell"
        );

        let cells = vec![Vec::new(); config.num_cells * config.num_cells].into_boxed_slice();

        Self {
            config,
            cells,
            population: 0,
        }
    }

    /// Creates an empty grid, validating `config` first.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::InvalidConfig`] if the dimensions are invalid.
    pub fn try_new(config: GridConfig) -> TesseraResult<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Grid dimensions.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Number of ids stored across all cells.
    #[inline]
    #[must_use]
    pub const fn population(&self) -> usize {
        self.population
    }

    /// Maps a position to its cell.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::OutOfBounds`] for coordinates outside
    /// `[0, extent)` on either axis.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn cell_of(&self, position: Position) -> TesseraResult<CellCoord> {
        let extent = self.config.extent();
        let inside = |v: f64| (0.0..extent).contains(&v);
        if !inside(position.x) || !inside(position.y) {
            return Err(TesseraError::OutOfBounds {
                x: position.x,
                y: position.y,
                extent,
            });
        }

        // Division can round up to num_cells just below the far edge.
        let last = self.config.num_cells - 1;
        let x = ((position.x / self.config.cell_size).floor() as usize).min(last);
        let y = ((position.y / self.config.cell_size).floor() as usize).min(last);
        Ok(CellCoord::new(x, y))
    }

    /// Occupants of `cell` in insertion order, or `None` outside the grid.
    #[inline]
    #[must_use]
    pub fn occupants(&self, cell: CellCoord) -> Option<&[OccupantId]> {
        if cell.x >= self.config.num_cells || cell.y >= self.config.num_cells {
            return None;
        }
        Some(&self.cells[cell.flat_index(self.config.num_cells)])
    }

    /// Appends `id` to the cell containing `position`. O(1) amortized.
    ///
    /// The grid does not check for an id already present elsewhere; keeping
    /// each id in one cell is up to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::OutOfBounds`] without modifying the grid.
    pub fn insert(&mut self, id: OccupantId, position: Position) -> TesseraResult<CellCoord> {
        let cell = self.cell_of(position)?;
        self.push(cell, id);
        Ok(cell)
    }

    /// Inserts an occupant at its current position.
    ///
    /// # Errors
    ///
    /// Same as [`SpatialGrid::insert`].
    pub fn place(&mut self, occupant: &Occupant) -> TesseraResult<CellCoord> {
        self.insert(occupant.id, occupant.position)
    }

    /// Moves `id` from the cell of `from` to the cell of `to`.
    ///
    /// Same-cell moves leave every bucket untouched. Otherwise the id is
    /// erased from the old bucket (O(bucket size)) and appended to the new
    /// one. An id missing from the old bucket is only logged; it is still
    /// appended to the new bucket and [`Relocation::Adopted`] is returned.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::OutOfBounds`] if either position is outside
    /// the grid. Nothing is modified in that case.
    pub fn relocate(
        &mut self,
        id: OccupantId,
        from: Position,
        to: Position,
    ) -> TesseraResult<Relocation> {
        let old_cell = self.cell_of(from)?;
        let new_cell = self.cell_of(to)?;

        if old_cell == new_cell {
            return Ok(Relocation::Stayed(new_cell));
        }

        let found = self.erase(old_cell, id);
        self.push(new_cell, id);

        if found {
            trace!(%id, from = %old_cell, to = %new_cell, "occupant migrated");
            Ok(Relocation::Migrated {
                from: old_cell,
                to: new_cell,
            })
        } else {
            warn!(%id, expected = %old_cell, to = %new_cell, "occupant missing from its old cell");
            Ok(Relocation::Adopted { to: new_cell })
        }
    }

    /// Relocates an occupant and records its new position.
    ///
    /// The position is only written when the relocation succeeds.
    ///
    /// # Errors
    ///
    /// Same as [`SpatialGrid::relocate`].
    pub fn move_occupant(
        &mut self,
        occupant: &mut Occupant,
        to: Position,
    ) -> TesseraResult<Relocation> {
        let relocation = self.relocate(occupant.id, occupant.position, to)?;
        occupant.position = to;
        Ok(relocation)
    }

    /// Calls `f(a, b)` for every ordered pair of distinct ids sharing a cell.
    ///
    /// Cells are visited in flat index order. A cell with `n` occupants
    /// yields `n * (n - 1)` pairs.
    pub fn for_each_cell_pair<F>(&self, mut f: F)
    where
        F: FnMut(OccupantId, OccupantId),
    {
        self.for_each_pair_in_cells(|_, a, b| f(a, b));
    }

    /// Like [`SpatialGrid::for_each_cell_pair`], also passing the shared cell.
    pub fn for_each_pair_in_cells<F>(&self, mut f: F)
    where
        F: FnMut(CellCoord, OccupantId, OccupantId),
    {
        let num_cells = self.config.num_cells;
        for (index, ids) in self.cells.iter().enumerate() {
            if ids.len() < 2 {
                continue;
            }
            let cell = CellCoord::from_flat(index, num_cells);
            for &a in ids {
                for &b in ids {
                    if a != b {
                        f(cell, a, b);
                    }
                }
            }
        }
    }

    /// Finds the first cell holding `id`. O(population).
    #[must_use]
    pub fn locate(&self, id: OccupantId) -> Option<CellCoord> {
        let num_cells = self.config.num_cells;
        self.cells
            .iter()
            .position(|ids| ids.contains(&id))
            .map(|index| CellCoord::from_flat(index, num_cells))
    }

    /// Snapshot of every non-empty cell.
    #[must_use]
    pub fn dump(&self) -> GridReport {
        let num_cells = self.config.num_cells;
        let cells = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, ids)| !ids.is_empty())
            .map(|(index, ids)| CellReport {
                cell: CellCoord::from_flat(index, num_cells),
                occupants: ids.clone(),
            })
            .collect();
        GridReport { cells }
    }

    fn push(&mut self, cell: CellCoord, id: OccupantId) {
        let index = cell.flat_index(self.config.num_cells);
        self.cells[index].push(id);
        self.population += 1;
    }

    fn erase(&mut self, cell: CellCoord, id: OccupantId) -> bool {
        let bucket = &mut self.cells[cell.flat_index(self.config.num_cells)];
        let Some(pos) = bucket.iter().position(|&other| other == id) else {
            return false;
        };
        bucket.remove(pos);
        self.population -= 1;
        true
    }
}
