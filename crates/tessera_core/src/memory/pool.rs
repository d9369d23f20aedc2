//! # Slab Pool
//!
//! Fixed-capacity slab of records with an intrusive free list.
//!
//! Each slot is either free, holding the index of the next free slot, or in
//! use, holding a payload and its remaining lifetime. The two states never
//! coexist:
//!
//! ```text
//! free_head -> [3] -> [0] -> [5] -> None
//!
//! slot:   0     1        2        3     4        5
//!       Free  InUse{2}  InUse{4}  Free  InUse{1}  Free
//! ```
//!
//! Following `free_head` visits exactly the free slots, each once.

use std::fmt;

use tracing::debug;

use super::particle::{Particle, Payload};
use crate::config::PoolConfig;
use crate::error::{TesseraError, TesseraResult};

/// One slot of the slab.
#[derive(Clone, Debug, PartialEq)]
pub enum Record<P> {
    /// Unused slot, linked into the free list.
    Free {
        /// Index of the next free slot, or `None` at the tail.
        next: Option<usize>,
    },
    /// Live slot.
    InUse {
        /// Ticks left before the slot is released. Always at least 1.
        lifetime: u32,
        /// The pooled value.
        payload: P,
    },
}

impl<P> Record<P> {
    /// Returns true if the slot holds a live payload.
    #[inline]
    #[must_use]
    pub const fn is_in_use(&self) -> bool {
        matches!(self, Self::InUse { .. })
    }
}

/// Handle to an acquired slot.
///
/// Handles carry no generation. Once the slot expires and is acquired
/// again, an old handle reads the new record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PoolHandle {
    index: usize,
}

impl PoolHandle {
    /// Slot index inside the slab.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }
}

/// Outcome of one [`SlabPool::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Live records that were stepped.
    pub advanced: usize,
    /// Records whose lifetime ran out and went back on the free list.
    pub released: usize,
}

/// Per-slot view used for status reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotStatus {
    /// The slot is on the free list.
    Free,
    /// The slot is live with `remaining` ticks to go.
    InUse {
        /// Remaining lifetime.
        remaining: u32,
    },
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => write!(f, "free"),
            Self::InUse { remaining } => write!(f, "in use: {remaining}"),
        }
    }
}

/// A slab pool for short-lived records.
///
/// `acquire` pops the free-list head, `tick` scans the whole slab and pushes
/// expired slots back onto the head. Both are allocation-free.
///
/// # Thread Safety
///
/// This pool is NOT thread-safe. Wrap it in a mutex if it must be shared.
///
/// # Example
///
/// ```rust,ignore
/// let mut pool: SlabPool<Particle> = SlabPool::new(8);
///
/// // Lives for 3 ticks
/// pool.acquire(3, Particle::new(1.0, 2.0, 0.1, 0.2))?;
///
/// for _ in 0..3 {
///     pool.tick();
/// }
/// assert_eq!(pool.count_in_use(), 0);
/// ```
pub struct SlabPool<P = Particle> {
    /// The slab. Never grows or shrinks.
    records: Box<[Record<P>]>,
    /// First free slot, `None` when exhausted.
    free_head: Option<usize>,
    /// Number of `InUse` records.
    in_use: usize,
}

impl<P: Payload> SlabPool<P> {
    /// Creates a pool with `capacity` free records.
    ///
    /// Slots are linked in ascending order, so the first acquisitions fill
    /// slots 0, 1, 2, ...
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");

        let records: Vec<Record<P>> = (0..capacity)
            .map(|index| Record::Free {
                next: (index + 1 < capacity).then_some(index + 1),
            })
            .collect();

        Self {
            records: records.into_boxed_slice(),
            free_head: Some(0),
            in_use: 0,
        }
    }

    /// Creates a pool sized by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::InvalidConfig`] if the capacity is zero.
    pub fn from_config(config: &PoolConfig) -> TesseraResult<Self> {
        config.validate()?;
        Ok(Self::new(config.capacity))
    }

    /// Returns the total capacity.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.records.len()
    }

    /// Number of live records.
    #[inline]
    #[must_use]
    pub const fn count_in_use(&self) -> usize {
        self.in_use
    }

    /// Number of records on the free list.
    #[inline]
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.capacity() - self.in_use
    }

    /// Claims the free-list head for `payload`, alive for `lifetime` ticks.
    ///
    /// O(1). On failure nothing is modified.
    ///
    /// # Errors
    ///
    /// - [`TesseraError::InvalidLifetime`] if `lifetime` is zero.
    /// - [`TesseraError::PoolExhausted`] if every record is in use.
    ///
    /// # Panics
    ///
    /// Panics if the free-list head is an in-use record. Only `acquire`
    /// and `tick` relink the list and both keep it free-only.
    pub fn acquire(&mut self, lifetime: u32, payload: P) -> TesseraResult<PoolHandle> {
        if lifetime == 0 {
            debug!("acquire rejected: zero lifetime");
            return Err(TesseraError::InvalidLifetime);
        }

        let Some(index) = self.free_head else {
            debug!(capacity = self.capacity(), "acquire rejected: pool exhausted");
            return Err(TesseraError::PoolExhausted {
                capacity: self.capacity(),
            });
        };

        let next = match &self.records[index] {
            Record::Free { next } => *next,
            Record::InUse { .. } => unreachable!("free list head {index} is in use"),
        };

        self.free_head = next;
        self.records[index] = Record::InUse { lifetime, payload };
        self.in_use += 1;

        Ok(PoolHandle { index })
    }

    /// Steps every live record once, in slot order.
    ///
    /// Each live record loses one tick of lifetime and its payload advances.
    /// Records reaching zero are pushed onto the free-list head. O(capacity).
    pub fn tick(&mut self) -> TickStats {
        let mut stats = TickStats::default();

        for index in 0..self.records.len() {
            let expired = match &mut self.records[index] {
                Record::InUse { lifetime, payload } => {
                    *lifetime -= 1;
                    payload.step();
                    stats.advanced += 1;
                    *lifetime == 0
                }
                Record::Free { .. } => false,
            };

            if expired {
                self.records[index] = Record::Free {
                    next: self.free_head,
                };
                self.free_head = Some(index);
                self.in_use -= 1;
                stats.released += 1;
            }
        }

        if stats.released > 0 {
            debug!(
                released = stats.released,
                in_use = self.in_use,
                "pool tick released records"
            );
        }

        stats
    }

    /// Gets the payload of a live record.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: PoolHandle) -> Option<&P> {
        match self.records.get(handle.index)? {
            Record::InUse { payload, .. } => Some(payload),
            Record::Free { .. } => None,
        }
    }

    /// Gets the payload of a live record mutably.
    #[inline]
    pub fn get_mut(&mut self, handle: PoolHandle) -> Option<&mut P> {
        match self.records.get_mut(handle.index)? {
            Record::InUse { payload, .. } => Some(payload),
            Record::Free { .. } => None,
        }
    }

    /// Remaining lifetime of a live record.
    #[inline]
    #[must_use]
    pub fn remaining_lifetime(&self, handle: PoolHandle) -> Option<u32> {
        match self.records.get(handle.index)? {
            Record::InUse { lifetime, .. } => Some(*lifetime),
            Record::Free { .. } => None,
        }
    }

    /// Raw view of the slab, in slot order.
    #[inline]
    #[must_use]
    pub fn records(&self) -> &[Record<P>] {
        &self.records
    }

    /// Status of every slot, in slot order.
    pub fn status(&self) -> impl Iterator<Item = SlotStatus> + '_ {
        self.records.iter().map(|record| match record {
            Record::InUse { lifetime, .. } => SlotStatus::InUse {
                remaining: *lifetime,
            },
            Record::Free { .. } => SlotStatus::Free,
        })
    }

    /// Iterates over live records as `(handle, remaining lifetime, payload)`.
    pub fn iter(&self) -> impl Iterator<Item = (PoolHandle, u32, &P)> {
        self.records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| match record {
                Record::InUse { lifetime, payload } => {
                    Some((PoolHandle { index }, *lifetime, payload))
                }
                Record::Free { .. } => None,
            })
    }

    /// Walks the free list from its head.
    ///
    /// The walk stops after `capacity` steps even if the links were to cycle.
    #[must_use]
    pub fn free_indices(&self) -> FreeIndices<'_, P> {
        FreeIndices {
            records: &self.records,
            cursor: self.free_head,
            remaining: self.records.len(),
        }
    }
}

/// Iterator over free slot indices, in free-list order.
pub struct FreeIndices<'a, P> {
    records: &'a [Record<P>],
    cursor: Option<usize>,
    remaining: usize,
}

impl<P> Iterator for FreeIndices<'_, P> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.cursor?;
        self.remaining -= 1;
        self.cursor = match self.records.get(index)? {
            Record::Free { next } => *next,
            Record::InUse { .. } => None,
        };
        Some(index)
    }
}
