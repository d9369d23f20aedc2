//! # TESSERA Core
//!
//! Bounded, pre-allocated, index-based resource management for many
//! short-lived objects:
//! - [`SlabPool`]: fixed-capacity records with an intrusive free list
//! - [`SpatialGrid`]: uniform cells bucketing occupant ids by position
//!
//! The two structures are independent. A simulation driver composes them.
//!
//! ## Architecture Rules
//!
//! 1. **Fixed capacity** - Pool slots and grid cells are allocated at construction
//! 2. **Indices, not pointers** - Free-list links are slot indices
//! 3. **Reject before mutate** - A failed operation leaves the structure untouched
//!
//! ## Example
//!
//! ```rust,ignore
//! use tessera_core::{SlabPool, Particle, SpatialGrid, GridConfig, OccupantId, Position};
//!
//! let mut pool: SlabPool<Particle> = SlabPool::new(8);
//! pool.acquire(3, Particle::new(1.0, 2.0, 0.1, 0.2))?;
//! pool.tick();
//!
//! let mut grid = SpatialGrid::new(GridConfig::default());
//! grid.insert(OccupantId(1), Position::new(5.0, 5.0))?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod id;
pub mod memory;
pub mod spatial;

pub use config::{GridConfig, PoolConfig, TesseraConfig};
pub use error::{TesseraError, TesseraResult};
pub use id::{IdSequence, OccupantId};
pub use memory::{Particle, Payload, PoolHandle, Record, SlabPool, SlotStatus, TickStats};
pub use spatial::{
    CellCoord, CellReport, GridReport, Occupant, Position, Relocation, SpatialGrid,
};
