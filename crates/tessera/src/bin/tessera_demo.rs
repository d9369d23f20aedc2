//! # TESSERA Demo
//!
//! Replays the particle pool and grid battle scenarios.
//!
//! Usage: `tessera_demo [config.toml]`

use tessera::{Battlefield, ParticleField};
use tessera_core::{Particle, Position, TesseraConfig, TesseraResult};

const UNIT_COUNT: usize = 10;
const UNIT_HEALTH: u32 = 100;
const ATTACK_DAMAGE: u32 = 10;

fn main() {
    let config = match std::env::args().nth(1) {
        Some(path) => match TesseraConfig::from_toml_file(&path) {
            Ok(config) => config,
            Err(e) => {
                println!("Error: {e}");
                return;
            }
        },
        None => TesseraConfig::default(),
    };

    println!("=== particle pool (capacity {}) ===", config.pool.capacity);
    if let Err(e) = run_particles(&config) {
        println!("Error: {e}");
        return;
    }

    println!();
    println!(
        "=== grid battle ({0} x {0} cells of {1}) ===",
        config.grid.num_cells, config.grid.cell_size
    );
    if let Err(e) = run_battle(&config) {
        println!("Error: {e}");
    }
}

fn print_pool(field: &ParticleField) {
    for (slot, status) in field.pool().status().enumerate() {
        println!("  slot {slot}: {status}");
    }
    println!("  in use count: {}", field.pool().count_in_use());
}

fn run_particles(config: &TesseraConfig) -> TesseraResult<()> {
    let mut field = ParticleField::new(&config.pool)?;
    let nub = Particle::new(1.0, 2.0, 0.1, 0.2);

    for lifetime in [3, 2, 5, 5] {
        field.spawn(lifetime, nub)?;
    }
    print_pool(&field);

    for _ in 0..3 {
        field.advance();
    }
    println!("after 3 frames:");
    print_pool(&field);

    for lifetime in [2, 7, 8] {
        field.spawn(lifetime, nub)?;
    }
    println!("after 3 more spawns:");
    print_pool(&field);

    for _ in 0..3 {
        field.advance();
    }
    println!("after 3 more frames:");
    print_pool(&field);

    println!(
        "spawned {}, dropped {}, frames {}",
        field.spawned(),
        field.dropped(),
        field.frame()
    );
    Ok(())
}

fn run_battle(config: &TesseraConfig) -> TesseraResult<()> {
    let mut field = Battlefield::new(config.grid)?;

    let start = Position::new(1.0, 1.0);
    let ids = (0..UNIT_COUNT)
        .map(|_| field.spawn(start, UNIT_HEALTH))
        .collect::<TesseraResult<Vec<_>>>()?;
    println!("spawned:");
    print!("{}", field.grid().dump());

    let mut step = 3.0;
    for id in ids {
        if let Err(e) = field.move_unit(id, Position::new(step, step)) {
            println!("unit {id} stays put: {e}");
        }
        step += 7.0;
    }
    println!("after march:");
    print!("{}", field.grid().dump());

    println!("battle log:");
    for encounter in field.resolve_encounters(ATTACK_DAMAGE) {
        println!(
            "  cell {}: attack {} -> {}",
            encounter.cell, encounter.attacker, encounter.defender
        );
    }
    Ok(())
}
