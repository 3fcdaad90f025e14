//! Mission engine - composes the map, entities and event queue into a
//! runnable simulation
//!
//! The engine owns everything: the ECS world, the terrain grid and the
//! event queue. [`MissionEngine::run`] is the whole control flow of a
//! simulation — pop the earliest event, apply it, repeat until the queue
//! drains. One event at a time, run to completion, no other driver.

use hecs::World;
use log::info;
use rand::Rng;

use crate::components::{Body, Controller, ItemTag, LanderTag, Location, Rover, RoverTag};
use crate::control::ControlInterface;
use crate::events::{CommandEvent, EventQueue, SimTime};
use crate::map::{MapConfig, MapGrid};
use crate::snapshot::MissionSnapshot;
use crate::systems::set_location;

/// Fatal configuration errors.
///
/// Simulation setup is assumed correct before the loop starts; these are
/// surfaced immediately at construction time and never retried. There is
/// no silent fallback: a bad start square is a caller defect, not a
/// runtime condition.
#[derive(Debug)]
pub enum MissionError {
    InvalidDimensions {
        width: u32,
        length: u32,
        max_elevation: f64,
    },
    StartOutOfBounds {
        x: i32,
        y: i32,
    },
}

impl std::fmt::Display for MissionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissionError::InvalidDimensions {
                width,
                length,
                max_elevation,
            } => write!(
                f,
                "invalid map dimensions: {}x{}, max elevation {}",
                width, length, max_elevation
            ),
            MissionError::StartOutOfBounds { x, y } => {
                write!(f, "start square ({}, {}) is not on the grid", x, y)
            }
        }
    }
}

impl std::error::Error for MissionError {}

/// Stock rover: mass and bulk of a mid-size six-wheeler, 100 kg of cargo
/// capacity
#[derive(Debug, Clone)]
pub struct RoverConfig {
    pub name: String,
    /// Mass in kilograms
    pub mass: f64,
    /// Bulk in cubic meters
    pub bulk: f64,
    /// Cargo capacity in kilograms
    pub capacity: f64,
}

impl Default for RoverConfig {
    fn default() -> Self {
        Self {
            name: "Rover".to_string(),
            mass: 185.0,
            bulk: 5.52,
            capacity: 100.0,
        }
    }
}

/// Stock lander: stays where it touches down for the whole mission
#[derive(Debug, Clone)]
pub struct LanderConfig {
    pub name: String,
    pub mass: f64,
    pub bulk: f64,
}

impl Default for LanderConfig {
    fn default() -> Self {
        Self {
            name: "Lander".to_string(),
            mass: 348.0,
            bulk: 11.236,
        }
    }
}

/// The mutable state events apply against: the ECS world plus the terrain
/// grid held beside it
pub struct MissionState {
    pub world: World,
    pub map: MapGrid,
    /// Commands fetched and executed so far, across all rovers. The event
    /// that finds a rover's supply exhausted does not count.
    pub commands_executed: u64,
}

/// The simulation engine
pub struct MissionEngine {
    state: MissionState,
    queue: EventQueue,
    sim_time: SimTime,
    events_applied: u64,
}

impl MissionEngine {
    /// Create a mission over a freshly generated terrain grid.
    ///
    /// The rng drives elevation generation; seed it for a reproducible
    /// map. Fails fast on invalid map dimensions.
    pub fn new(config: &MapConfig, rng: &mut impl Rng) -> Result<Self, MissionError> {
        let map = MapGrid::generate(config, rng)?;
        Ok(Self {
            state: MissionState {
                world: World::new(),
                map,
                commands_executed: 0,
            },
            queue: EventQueue::new(),
            sim_time: 0,
            events_applied: 0,
        })
    }

    /// Land a rover (and its lander) on the square at (x, y) and seed the
    /// queue with the rover's first command event.
    ///
    /// Fails with [`MissionError::StartOutOfBounds`] if the square does
    /// not exist.
    pub fn add_rover(
        &mut self,
        spec: RoverConfig,
        controller: Box<dyn ControlInterface>,
        x: i32,
        y: i32,
    ) -> Result<hecs::Entity, MissionError> {
        if self.state.map.square(x, y).is_none() {
            return Err(MissionError::StartOutOfBounds { x, y });
        }

        let lander_spec = LanderConfig::default();
        let lander = self.state.world.spawn((
            LanderTag,
            Body::new(lander_spec.name, lander_spec.mass, lander_spec.bulk),
        ));
        set_location(&mut self.state.world, &mut self.state.map, lander, x, y);

        let rover = self.state.world.spawn((
            RoverTag,
            Body::new(spec.name.clone(), spec.mass, spec.bulk),
            Rover::new(spec.capacity),
            Controller(controller),
        ));
        set_location(&mut self.state.world, &mut self.state.map, rover, x, y);

        self.queue
            .push(Box::new(CommandEvent::new(self.sim_time, rover)));
        info!("rover {:?} ({}) landed at ({}, {})", rover, spec.name, x, y);
        Ok(rover)
    }

    /// Scatter item copies across the map (see
    /// [`MapGrid::scatter_items`]). Returns how many items were placed.
    pub fn scatter_items(
        &mut self,
        prototypes: &[Body],
        probability: f64,
        max_per_square: u32,
        rng: &mut impl Rng,
    ) -> u32 {
        self.state.map.scatter_items(
            &mut self.state.world,
            prototypes,
            probability,
            max_per_square,
            rng,
        )
    }

    /// The event loop. Runs until the queue drains — which happens once
    /// every rover has exhausted its command supply — and returns the
    /// number of events applied by this call.
    pub fn run(&mut self) -> u64 {
        let mut applied = 0;
        while let Some(event) = self.queue.pop_next() {
            self.sim_time = event.time();
            event.apply(&mut self.state, &mut self.queue);
            applied += 1;
        }
        self.events_applied += applied;
        info!(
            "event loop drained at t={}ms after {} events",
            self.sim_time, applied
        );
        applied
    }

    /// Current logical time: the timestamp of the last applied event
    pub fn sim_time(&self) -> SimTime {
        self.sim_time
    }

    /// Events applied over the engine's lifetime
    pub fn events_applied(&self) -> u64 {
        self.events_applied
    }

    /// Commands executed over the engine's lifetime
    pub fn commands_executed(&self) -> u64 {
        self.state.commands_executed
    }

    /// Pending events
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn map(&self) -> &MapGrid {
        &self.state.map
    }

    pub fn world(&self) -> &World {
        &self.state.world
    }

    pub fn rover_count(&self) -> usize {
        self.state.world.query::<&RoverTag>().iter().count()
    }

    pub fn lander_count(&self) -> usize {
        self.state.world.query::<&LanderTag>().iter().count()
    }

    /// Items in the world, on squares or carried
    pub fn item_count(&self) -> usize {
        self.state.world.query::<&ItemTag>().iter().count()
    }

    /// Read-only snapshot of map and entity state, for external
    /// renderers and persistence
    pub fn snapshot(&self) -> MissionSnapshot {
        MissionSnapshot::capture(&self.state, self.sim_time)
    }

    /// Where the given entity currently sits, if it is on the map
    pub fn location_of(&self, entity: hecs::Entity) -> Option<Location> {
        self.state.world.get::<&Location>(entity).ok().map(|l| *l)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Direction;
    use crate::control::{Command, ScriptedControl};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn map_config(width: u32, length: u32) -> MapConfig {
        MapConfig {
            width,
            length,
            max_elevation: 10.0,
            precision: 2,
        }
    }

    #[test]
    fn test_engine_creation() {
        let mut rng = StdRng::seed_from_u64(1);
        let engine = MissionEngine::new(&map_config(5, 5), &mut rng).unwrap();
        assert_eq!(engine.rover_count(), 0);
        assert_eq!(engine.sim_time(), 0);
        assert_eq!(engine.queue_len(), 0);
    }

    #[test]
    fn test_engine_rejects_bad_dimensions() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = MissionEngine::new(&map_config(0, 5), &mut rng);
        assert!(matches!(
            result,
            Err(MissionError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_add_rover_rejects_bad_start_square() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut engine = MissionEngine::new(&map_config(5, 5), &mut rng).unwrap();
        let script = ScriptedControl::new(vec![]);

        let result = engine.add_rover(RoverConfig::default(), Box::new(script), 5, 2);
        assert!(matches!(
            result,
            Err(MissionError::StartOutOfBounds { x: 5, y: 2 })
        ));
        // Nothing landed, nothing queued
        assert_eq!(engine.rover_count(), 0);
        assert_eq!(engine.lander_count(), 0);
        assert_eq!(engine.queue_len(), 0);
    }

    #[test]
    fn test_n_commands_mean_n_events() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut engine = MissionEngine::new(&map_config(5, 5), &mut rng).unwrap();
        let script = ScriptedControl::new(vec![Command::Wait; 4]);
        engine
            .add_rover(RoverConfig::default(), Box::new(script), 2, 2)
            .unwrap();

        let applied = engine.run();

        // 4 command events plus the final one that found the supply empty
        assert_eq!(applied, 5);
        assert_eq!(engine.commands_executed(), 4);
        assert_eq!(engine.queue_len(), 0);
        assert_eq!(engine.events_applied(), 5);
    }

    #[test]
    fn test_sim_time_advances_by_command_duration() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut engine = MissionEngine::new(&map_config(5, 5), &mut rng).unwrap();
        let script = ScriptedControl::new(vec![Command::Wait; 3]).with_step_ms(200);
        engine
            .add_rover(RoverConfig::default(), Box::new(script), 2, 2)
            .unwrap();

        engine.run();
        // Last event fires at 3 * 200ms
        assert_eq!(engine.sim_time(), 600);
    }

    #[test]
    fn test_rover_with_no_commands_still_terminates() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut engine = MissionEngine::new(&map_config(3, 3), &mut rng).unwrap();
        let script = ScriptedControl::new(vec![]);
        let rover = engine
            .add_rover(RoverConfig::default(), Box::new(script), 1, 1)
            .unwrap();

        assert_eq!(engine.run(), 1);
        assert_eq!(engine.location_of(rover), Some(Location { x: 1, y: 1 }));
    }

    #[test]
    fn test_two_rovers_interleave_deterministically() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut engine = MissionEngine::new(&map_config(5, 5), &mut rng).unwrap();

        let first = engine
            .add_rover(
                RoverConfig {
                    name: "Alpha".to_string(),
                    ..RoverConfig::default()
                },
                Box::new(ScriptedControl::new(vec![Command::Move(Direction::East)])),
                1, 1,
            )
            .unwrap();
        let second = engine
            .add_rover(
                RoverConfig {
                    name: "Beta".to_string(),
                    ..RoverConfig::default()
                },
                Box::new(ScriptedControl::new(vec![Command::Move(Direction::North)])),
                3, 3,
            )
            .unwrap();

        engine.run();

        assert_eq!(engine.location_of(first), Some(Location { x: 2, y: 1 }));
        assert_eq!(engine.location_of(second), Some(Location { x: 3, y: 4 }));
        assert_eq!(engine.queue_len(), 0);
    }
}
