//! # Particle Field
//!
//! Spawn/advance loop over a [`SlabPool`]. A full pool drops spawn
//! requests instead of failing the frame.

use tracing::trace;

use tessera_core::{
    Particle, PoolConfig, PoolHandle, SlabPool, TesseraError, TesseraResult, TickStats,
};

/// Particles with bounded lifetimes.
pub struct ParticleField {
    pool: SlabPool<Particle>,
    frame: u64,
    spawned: u64,
    dropped: u64,
}

impl ParticleField {
    /// Creates a field backed by a pool sized from `config`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the capacity is zero.
    pub fn new(config: &PoolConfig) -> TesseraResult<Self> {
        Ok(Self {
            pool: SlabPool::from_config(config)?,
            frame: 0,
            spawned: 0,
            dropped: 0,
        })
    }

    /// Emits a particle living for `lifetime` frames.
    ///
    /// Returns `Ok(None)` when the pool is full; the request is counted as
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns `InvalidLifetime` for a zero lifetime.
    pub fn spawn(
        &mut self,
        lifetime: u32,
        particle: Particle,
    ) -> TesseraResult<Option<PoolHandle>> {
        match self.pool.acquire(lifetime, particle) {
            Ok(handle) => {
                self.spawned += 1;
                Ok(Some(handle))
            }
            Err(TesseraError::PoolExhausted { .. }) => {
                self.dropped += 1;
                trace!(frame = self.frame, "particle spawn dropped");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Advances every live particle by one frame.
    pub fn advance(&mut self) -> TickStats {
        self.frame += 1;
        self.pool.tick()
    }

    /// The backing pool.
    #[inline]
    #[must_use]
    pub const fn pool(&self) -> &SlabPool<Particle> {
        &self.pool
    }

    /// Frames advanced so far.
    #[inline]
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Successful spawns so far.
    #[inline]
    #[must_use]
    pub const fn spawned(&self) -> u64 {
        self.spawned
    }

    /// Spawn requests dropped because the pool was full.
    #[inline]
    #[must_use]
    pub const fn dropped(&self) -> u64 {
        self.dropped
    }
}
