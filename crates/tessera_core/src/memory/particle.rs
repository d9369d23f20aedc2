//! # Pooled Payloads
//!
//! Records in a [`SlabPool`](super::SlabPool) carry a payload that evolves
//! by one step per tick.

use bytemuck::{Pod, Zeroable};

/// Data stored in an in-use pool record.
///
/// `step` is called exactly once per [`SlabPool::tick`](super::SlabPool::tick)
/// for every live record, before its lifetime is checked.
pub trait Payload {
    /// Advances the payload by one simulation step.
    fn step(&mut self);
}

/// A point particle moving at constant velocity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Particle {
    /// X position.
    pub x: f32,
    /// Y position.
    pub y: f32,
    /// X velocity, in units per tick.
    pub vx: f32,
    /// Y velocity, in units per tick.
    pub vy: f32,
}

impl Particle {
    /// Creates a particle at `(x, y)` moving by `(vx, vy)` each tick.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, vx: f32, vy: f32) -> Self {
        Self { x, y, vx, vy }
    }
}

impl Payload for Particle {
    #[inline]
    fn step(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_step() {
        let mut p = Particle::new(1.0, 2.0, 0.5, -0.25);
        p.step();
        assert_eq!(p, Particle::new(1.5, 1.75, 0.5, -0.25));
    }

    #[test]
    fn test_particle_is_pod() {
        let p = Particle::new(1.0, 2.0, 3.0, 4.0);
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&p));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 4.0]);
    }
}
