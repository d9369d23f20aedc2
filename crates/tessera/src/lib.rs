//! # TESSERA Simulation Driver
//!
//! Composes the core structures into small simulations:
//! - [`Battlefield`]: units on a [`SpatialGrid`](tessera_core::SpatialGrid),
//!   fighting whoever shares their cell
//! - [`ParticleField`]: short-lived particles in a
//!   [`SlabPool`](tessera_core::SlabPool)
//!
//! Each simulation owns its own id sequence and structures. Nothing is
//! global.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod battlefield;
pub mod particles;

pub use battlefield::{Battlefield, Encounter, Unit};
pub use particles::ParticleField;
