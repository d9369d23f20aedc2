//! # Occupant Identifiers
//!
//! Ids are handed out by an [`IdSequence`] owned by whoever creates
//! occupants. There is no process-wide counter.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TesseraError, TesseraResult};

/// Identifier of a grid occupant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OccupantId(pub u32);

impl fmt::Display for OccupantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic id generator. The first id issued is `1`.
#[derive(Clone, Debug)]
pub struct IdSequence {
    /// Next id to hand out, `None` once `u32::MAX` has been issued.
    next: Option<u32>,
    issued: u32,
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSequence {
    /// Creates a sequence starting at 1.
    #[must_use]
    pub const fn new() -> Self {
        Self::starting_at(1)
    }

    /// Creates a sequence whose first id is `first`.
    #[must_use]
    pub const fn starting_at(first: u32) -> Self {
        Self {
            next: Some(first),
            issued: 0,
        }
    }

    /// Issues the next id.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::IdsExhausted`] once `u32::MAX` has been
    /// issued. The sequence stays exhausted.
    pub fn next_id(&mut self) -> TesseraResult<OccupantId> {
        let id = self.next.ok_or(TesseraError::IdsExhausted)?;
        self.next = id.checked_add(1);
        self.issued = self.issued.saturating_add(1);
        Ok(OccupantId(id))
    }

    /// Number of ids issued so far.
    #[inline]
    #[must_use]
    pub const fn issued(&self) -> u32 {
        self.issued
    }
}
