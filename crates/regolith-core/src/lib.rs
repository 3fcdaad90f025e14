//! Regolith Core - Rover Mission Simulation Engine
//!
//! A discrete-event simulation of a rover mission on a procedurally
//! generated terrain grid. The rover executes commands supplied by a
//! control interface; the simulation advances strictly in logical-time
//! order, one event at a time.
//!
//! # Architecture
//!
//! Physical objects (items, rovers, landers) are entities in a `hecs`
//! world. The terrain is a plain [`map::MapGrid`] resource held next to
//! the world: each square owns its occupant list, and an entity's
//! [`components::Location`] is only a cache kept consistent through
//! [`systems::set_location`].
//!
//! Progress is driven entirely by the [`events::EventQueue`], a priority
//! queue ordered by `(timestamp, sequence)`. Applying an event may mutate
//! the world and enqueue successor events; the engine loop runs until the
//! queue drains.
//!
//! # Example
//!
//! ```rust
//! use rand::SeedableRng;
//! use regolith_core::prelude::*;
//! use regolith_core::control::{Command, ScriptedControl};
//! use regolith_core::components::Direction;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let mut engine = MissionEngine::new(&MapConfig::default(), &mut rng).unwrap();
//!
//! let script = ScriptedControl::new(vec![Command::Move(Direction::East)]);
//! engine.add_rover(RoverConfig::default(), Box::new(script), 5, 5).unwrap();
//!
//! // Run until the rover exhausts its commands
//! engine.run();
//! ```

pub mod components;
pub mod control;
pub mod engine;
pub mod events;
pub mod map;
pub mod snapshot;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::{Body, Location};
    pub use crate::engine::{
        LanderConfig, MissionEngine, MissionError, RoverConfig,
    };
    pub use crate::events::{EventQueue, SimTime};
    pub use crate::map::{MapConfig, MapGrid};
}
