//! # Slab Pool Integration Tests
//!
//! Lifetime countdown, capacity bounds and free-list integrity over
//! arbitrary acquire/tick sequences.

use std::collections::HashSet;

use proptest::prelude::*;
use tessera_core::{Particle, SlabPool, SlotStatus, TesseraError};

fn nub() -> Particle {
    Particle::new(1.0, 2.0, 0.1, 0.2)
}

/// Free list and live slots must partition the slab.
fn assert_free_list_consistent(pool: &SlabPool) {
    let free: Vec<usize> = pool.free_indices().collect();
    let unique: HashSet<usize> = free.iter().copied().collect();
    assert_eq!(unique.len(), free.len(), "duplicate index in free list: {free:?}");

    for (index, status) in pool.status().enumerate() {
        match status {
            SlotStatus::Free => assert!(unique.contains(&index), "free slot {index} unreachable"),
            SlotStatus::InUse { remaining } => {
                assert!(remaining > 0);
                assert!(!unique.contains(&index), "live slot {index} on free list");
            }
        }
    }
    assert_eq!(free.len() + pool.count_in_use(), pool.capacity());
}

/// Test: The reference scenario with an 8-slot pool.
#[test]
fn test_reference_scenario() {
    let mut pool: SlabPool = SlabPool::new(8);

    for lifetime in [3, 2, 5, 5] {
        pool.acquire(lifetime, nub()).unwrap();
    }
    assert_eq!(pool.count_in_use(), 4);

    for _ in 0..3 {
        pool.tick();
    }
    assert_eq!(pool.count_in_use(), 2);
    let remaining: Vec<u32> = pool.iter().map(|(_, lifetime, _)| lifetime).collect();
    assert_eq!(remaining, vec![2, 2]);

    for lifetime in [4, 7, 8] {
        pool.acquire(lifetime, nub()).unwrap();
    }
    assert_eq!(pool.count_in_use(), 5);
    assert_eq!(pool.free_count(), 3);

    for _ in 0..2 {
        pool.tick();
    }
    assert_eq!(pool.count_in_use(), 3);
    assert_free_list_consistent(&pool);
}

/// Test: capacity + 1 concurrent acquisitions fail exactly once.
#[test]
fn test_capacity_bound() {
    let mut pool: SlabPool = SlabPool::new(8);
    for _ in 0..8 {
        pool.acquire(10, nub()).unwrap();
    }
    assert_eq!(
        pool.acquire(10, nub()),
        Err(TesseraError::PoolExhausted { capacity: 8 })
    );

    // Freeing one record makes room for exactly one more.
    let mut short: SlabPool = SlabPool::new(2);
    short.acquire(1, nub()).unwrap();
    short.acquire(5, nub()).unwrap();
    assert!(short.acquire(1, nub()).is_err());
    short.tick();
    assert!(short.acquire(1, nub()).is_ok());
    assert!(short.acquire(1, nub()).is_err());
}

/// Test: L ticks free a record acquired with lifetime L, L - 1 do not.
#[test]
fn test_lifetime_countdown() {
    for lifetime in 1..=6 {
        let mut pool: SlabPool = SlabPool::new(1);
        let handle = pool.acquire(lifetime, nub()).unwrap();

        for _ in 0..lifetime - 1 {
            pool.tick();
        }
        assert_eq!(pool.remaining_lifetime(handle), Some(1));

        pool.tick();
        assert_eq!(pool.remaining_lifetime(handle), None);
        assert_eq!(pool.count_in_use(), 0);
    }
}

#[derive(Clone, Debug)]
enum Op {
    Acquire(u32),
    Tick,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (1u32..6).prop_map(Op::Acquire),
        2 => Just(Op::Tick),
    ]
}

proptest! {
    /// Free-list integrity and lifetimes against a shadow model.
    #[test]
    fn prop_free_list_matches_model(
        capacity in 1usize..12,
        ops in prop::collection::vec(op(), 0..200),
    ) {
        let mut pool: SlabPool = SlabPool::new(capacity);
        let mut model: Vec<Option<u32>> = vec![None; capacity];

        for op in ops {
            match op {
                Op::Acquire(lifetime) => {
                    let had_room = model.iter().any(Option::is_none);
                    match pool.acquire(lifetime, nub()) {
                        Ok(handle) => {
                            prop_assert!(had_room);
                            prop_assert!(model[handle.index()].is_none());
                            model[handle.index()] = Some(lifetime);
                        }
                        Err(err) => {
                            prop_assert!(!had_room);
                            prop_assert_eq!(err, TesseraError::PoolExhausted { capacity });
                        }
                    }
                }
                Op::Tick => {
                    pool.tick();
                    for slot in &mut model {
                        *slot = match *slot {
                            Some(1) | None => None,
                            Some(n) => Some(n - 1),
                        };
                    }
                }
            }

            let status: Vec<SlotStatus> = pool.status().collect();
            let expected: Vec<SlotStatus> = model
                .iter()
                .map(|slot| match slot {
                    Some(remaining) => SlotStatus::InUse { remaining: *remaining },
                    None => SlotStatus::Free,
                })
                .collect();
            prop_assert_eq!(status, expected);
            assert_free_list_consistent(&pool);
        }
    }
}
