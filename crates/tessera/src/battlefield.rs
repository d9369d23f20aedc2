//! # Battlefield
//!
//! Units on a spatial grid. Units sharing a cell fight each other; units in
//! different cells never do, however close they stand.

use std::collections::HashMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use tessera_core::{
    CellCoord, GridConfig, IdSequence, Occupant, OccupantId, Position, Relocation, SpatialGrid,
    TesseraResult,
};

/// A combatant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Unit {
    /// Grid identity and position.
    pub occupant: Occupant,
    /// Hit points. A unit at zero neither attacks nor is attacked.
    pub health: u32,
}

impl Unit {
    /// Returns true while the unit has health left.
    #[inline]
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.health > 0
    }
}

/// One attack resolved during [`Battlefield::resolve_encounters`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Encounter {
    /// Cell both units stand in.
    pub cell: CellCoord,
    /// Attacking unit.
    pub attacker: OccupantId,
    /// Unit taking the damage.
    pub defender: OccupantId,
}

/// Owns the grid, the unit registry and the id sequence.
pub struct Battlefield {
    grid: SpatialGrid,
    units: HashMap<OccupantId, Unit>,
    ids: IdSequence,
}

impl Battlefield {
    /// Creates an empty battlefield.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the grid dimensions are invalid.
    pub fn new(config: GridConfig) -> TesseraResult<Self> {
        Self::with_ids(config, IdSequence::new())
    }

    /// Creates an empty battlefield issuing ids from `ids`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the grid dimensions are invalid.
    pub fn with_ids(config: GridConfig, ids: IdSequence) -> TesseraResult<Self> {
        Ok(Self {
            grid: SpatialGrid::try_new(config)?,
            units: HashMap::new(),
            ids,
        })
    }

    /// The underlying grid.
    #[inline]
    #[must_use]
    pub const fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// Number of registered units, dead or alive.
    #[inline]
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Looks up a unit.
    #[must_use]
    pub fn unit(&self, id: OccupantId) -> Option<&Unit> {
        self.units.get(&id)
    }

    /// Places a new unit. No id is consumed if the position is rejected.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `position` lies outside the grid, and
    /// `IdsExhausted` once the id sequence has run dry.
    pub fn spawn(&mut self, position: Position, health: u32) -> TesseraResult<OccupantId> {
        self.grid.cell_of(position)?;

        let occupant = Occupant::new(self.ids.next_id()?, position);
        self.grid.place(&occupant)?;
        self.units.insert(occupant.id, Unit { occupant, health });
        Ok(occupant.id)
    }

    /// Places `count` units at pseudo-random positions derived from `seed`.
    ///
    /// The same seed always yields the same layout.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Battlefield::spawn`].
    pub fn scatter(
        &mut self,
        count: usize,
        health: u32,
        seed: u64,
    ) -> TesseraResult<Vec<OccupantId>> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let extent = self.grid.config().extent();

        (0..count)
            .map(|_| {
                let position =
                    Position::new(rng.gen_range(0.0..extent), rng.gen_range(0.0..extent));
                self.spawn(position, health)
            })
            .collect()
    }

    /// Moves a unit, keeping the grid in sync.
    ///
    /// Returns `Ok(None)` for ids that were never spawned.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `to` lies outside the grid. The unit keeps
    /// its old position.
    pub fn move_unit(
        &mut self,
        id: OccupantId,
        to: Position,
    ) -> TesseraResult<Option<Relocation>> {
        let Some(unit) = self.units.get_mut(&id) else {
            return Ok(None);
        };
        self.grid.move_occupant(&mut unit.occupant, to).map(Some)
    }

    /// Lets every living unit attack every other living unit in its cell.
    ///
    /// Attacks resolve in pair order, so a unit killed early in its cell
    /// does not strike back later in the same pass. Ids unknown to the
    /// registry are skipped.
    pub fn resolve_encounters(&mut self, damage: u32) -> Vec<Encounter> {
        let units = &mut self.units;
        let mut encounters = Vec::new();

        self.grid.for_each_pair_in_cells(|cell, attacker, defender| {
            let attacker_alive = units.get(&attacker).is_some_and(Unit::is_alive);
            if !attacker_alive {
                return;
            }
            let Some(target) = units.get_mut(&defender) else {
                return;
            };
            if !target.is_alive() {
                return;
            }
            target.health = target.health.saturating_sub(damage);
            encounters.push(Encounter {
                cell,
                attacker,
                defender,
            });
        });

        debug!(encounters = encounters.len(), "battle resolved");
        encounters
    }
}
