//! # Memory Management
//!
//! Pre-allocated slab storage for short-lived records.
//!
//! ## Design Philosophy
//!
//! All records are allocated once, at construction. During a simulation:
//! - No heap allocations
//! - Free slots are linked by index, never by pointer
//! - Acquire and release are O(1)

mod particle;
mod pool;

pub use particle::{Particle, Payload};
pub use pool::{FreeIndices, PoolHandle, Record, SlabPool, SlotStatus, TickStats};
