//! Regolith Headless Mission Harness
//!
//! Runs a complete scripted mission in-process — no rendering, no
//! interactive input — and sweeps the core invariants: event ordering,
//! occupancy consistency, termination.
//!
//! Usage:
//!   cargo run -p regolith-simtest
//!   cargo run -p regolith-simtest -- --verbose   (also prints the JSON snapshot)

use rand::rngs::StdRng;
use rand::SeedableRng;

use regolith_core::components::{Body, Direction, ItemTag, Location};
use regolith_core::control::{Command, ScriptedControl};
use regolith_core::engine::{MissionEngine, MissionError, RoverConfig};
use regolith_core::map::MapConfig;

struct CheckResult {
    name: &'static str,
    passed: bool,
    detail: String,
}

fn check(name: &'static str, passed: bool, detail: String) -> CheckResult {
    CheckResult {
        name,
        passed,
        detail,
    }
}

fn main() {
    env_logger::init();
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Regolith Mission Harness ===\n");

    let mut results = Vec::new();

    // 1. Configuration errors surface, never silently corrected
    results.extend(validate_config_errors());

    // 2. Full scripted mission
    let mut rng = StdRng::seed_from_u64(7_000_001);
    let config = MapConfig {
        width: 12,
        length: 12,
        max_elevation: 30.0,
        precision: 2,
    };
    let mut engine = MissionEngine::new(&config, &mut rng).expect("valid map config");

    let prototypes = vec![
        Body::new("Rock", 2.0, 0.001),
        Body::new("Meteorite", 8.5, 0.003),
        Body::new("Regolith Sample", 0.5, 0.0005),
    ];
    let scattered = engine.scatter_items(&prototypes, 0.4, 3, &mut rng);
    results.push(check(
        "scattering stays within per-square bound",
        engine.map().iter().all(|(_, sq)| sq.occupants().len() <= 3),
        format!("{} items over {} squares", scattered, 12 * 12),
    ));

    let script = ScriptedControl::new(vec![
        Command::Move(Direction::East),
        Command::Move(Direction::East),
        Command::Move(Direction::North),
        Command::PickUp("Rock".to_string()),
        Command::Move(Direction::West),
        Command::Drop("Rock".to_string()),
        Command::Wait,
    ]);
    let rover = engine
        .add_rover(RoverConfig::default(), Box::new(script), 6, 6)
        .expect("start square on the grid");

    let applied = engine.run();
    results.push(check(
        "event loop drains",
        engine.queue_len() == 0,
        format!("{} events applied", applied),
    ));
    results.push(check(
        "one event per command plus termination",
        applied == 8 && engine.commands_executed() == 7,
        format!(
            "{} events applied, {} commands executed",
            applied,
            engine.commands_executed()
        ),
    ));
    results.push(check(
        "rover ends where the script drove it",
        engine.location_of(rover) == Some(Location { x: 7, y: 7 }),
        format!("final location {:?}", engine.location_of(rover)),
    ));

    // 3. Occupancy consistency: every located entity is in exactly one
    //    occupant list, and it is the one its Location names
    let mut consistent = true;
    for (entity, location) in engine.world().query::<&Location>().iter() {
        let listed = engine
            .map()
            .iter()
            .filter(|(_, sq)| sq.occupants().contains(&entity))
            .count();
        let here = engine
            .map()
            .square(location.x, location.y)
            .map(|sq| sq.occupants().contains(&entity))
            .unwrap_or(false);
        if listed != 1 || !here {
            consistent = false;
        }
    }
    results.push(check(
        "occupant lists agree with locations",
        consistent,
        String::from("checked every located entity"),
    ));

    // 4. Carried items left their squares
    let on_map = engine
        .world()
        .query::<&ItemTag>()
        .iter()
        .filter(|(e, _)| engine.world().get::<&Location>(*e).is_ok())
        .count();
    results.push(check(
        "carried items have no map location",
        on_map as u32 == scattered, // the picked-up Rock was dropped again
        format!("{} of {} items on the map", on_map, scattered),
    ));

    let snapshot = engine.snapshot();
    if verbose {
        println!(
            "{}",
            serde_json::to_string_pretty(&snapshot).expect("snapshot serializes")
        );
    }

    // Summary
    println!();
    let mut failed = 0;
    for result in &results {
        let mark = if result.passed { "PASS" } else { "FAIL" };
        println!("[{}] {} — {}", mark, result.name, result.detail);
        if !result.passed {
            failed += 1;
        }
    }
    println!(
        "\n{} checks, {} failed, final sim time {}ms",
        results.len(),
        failed,
        engine.sim_time()
    );
    if failed > 0 {
        std::process::exit(1);
    }
}

fn validate_config_errors() -> Vec<CheckResult> {
    let mut rng = StdRng::seed_from_u64(1);
    let mut results = Vec::new();

    let bad = MapConfig {
        width: 0,
        length: 4,
        max_elevation: 10.0,
        precision: 2,
    };
    results.push(check(
        "zero-width map is rejected",
        matches!(
            MissionEngine::new(&bad, &mut rng),
            Err(MissionError::InvalidDimensions { .. })
        ),
        String::from("MissionEngine::new(width = 0)"),
    ));

    let good = MapConfig {
        width: 4,
        length: 4,
        max_elevation: 10.0,
        precision: 2,
    };
    let mut engine = MissionEngine::new(&good, &mut rng).expect("valid map config");
    results.push(check(
        "off-grid start square is rejected",
        matches!(
            engine.add_rover(
                RoverConfig::default(),
                Box::new(ScriptedControl::new(vec![])),
                -1,
                0
            ),
            Err(MissionError::StartOutOfBounds { .. })
        ),
        String::from("add_rover at (-1, 0)"),
    ));

    results
}
