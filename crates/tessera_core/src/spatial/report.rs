//! Diagnostic snapshot of grid membership.

use std::fmt;

use serde::Serialize;

use super::cell::CellCoord;
use crate::id::OccupantId;

/// Contents of one non-empty cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CellReport {
    /// Cell address.
    pub cell: CellCoord,
    /// Occupant ids in insertion order.
    pub occupants: Vec<OccupantId>,
}

/// Every non-empty cell, in flat index order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GridReport {
    /// Non-empty cells.
    pub cells: Vec<CellReport>,
}

impl GridReport {
    /// Looks up the occupants of `cell`. Empty cells are absent.
    #[must_use]
    pub fn occupants(&self, cell: CellCoord) -> Option<&[OccupantId]> {
        self.cells
            .iter()
            .find(|report| report.cell == cell)
            .map(|report| report.occupants.as_slice())
    }

    /// Total number of ids across all cells.
    #[must_use]
    pub fn population(&self) -> usize {
        self.cells.iter().map(|report| report.occupants.len()).sum()
    }
}

impl fmt::Display for GridReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for report in &self.cells {
            for id in &report.occupants {
                writeln!(f, "occupant id: {id}")?;
            }
            writeln!(
                f,
                "cell {} occupant count: {}",
                report.cell,
                report.occupants.len()
            )?;
        }
        Ok(())
    }
}
