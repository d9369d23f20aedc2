//! # Driver Scenario Tests
//!
//! The two scenarios replayed by `tessera_demo`, checked end to end.

use tessera::{Battlefield, ParticleField};
use tessera_core::{CellCoord, OccupantId, Particle, Position, TesseraConfig};

/// Test: Units march along the diagonal, then battle cell by cell.
#[test]
fn test_diagonal_battle() {
    let config = TesseraConfig::default();
    let mut field = Battlefield::new(config.grid).unwrap();

    let ids: Vec<OccupantId> = (0..10)
        .map(|_| field.spawn(Position::new(1.0, 1.0), 100).unwrap())
        .collect();

    let mut step = 3.0;
    for &id in &ids {
        assert!(field.move_unit(id, Position::new(step, step)).unwrap().is_some());
        step += 7.0;
    }

    let encounters = field.resolve_encounters(10);
    assert_eq!(encounters.len(), 18);

    let cells: Vec<CellCoord> = {
        let mut cells: Vec<CellCoord> = encounters.iter().map(|e| e.cell).collect();
        cells.dedup();
        cells
    };
    assert_eq!(
        cells,
        vec![CellCoord::new(0, 0), CellCoord::new(1, 1), CellCoord::new(2, 2)]
    );

    // The lone unit in (3, 3) is untouched.
    assert_eq!(field.unit(ids[9]).unwrap().health, 100);
    assert_eq!(field.unit(ids[0]).unwrap().health, 80);
}

/// Test: A 2-slot pool drops the third concurrent spawn and recovers.
#[test]
fn test_particle_field_from_toml() {
    let config = TesseraConfig::from_toml_str("[pool]\ncapacity = 2\n").unwrap();
    let mut field = ParticleField::new(&config.pool).unwrap();
    let spark = Particle::new(0.0, 0.0, 1.0, 1.0);

    for _ in 0..3 {
        field.spawn(1, spark).unwrap();
    }
    assert_eq!(field.dropped(), 1);

    field.advance();
    assert!(field.spawn(1, spark).unwrap().is_some());
    assert_eq!(field.spawned(), 3);
}
