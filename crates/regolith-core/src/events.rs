//! Discrete events and the queue that drives the simulation
//!
//! Events are ordered by `(timestamp, sequence)`: strictly earliest first,
//! with insertion order breaking ties. The total order makes runs
//! reproducible, which the tests lean on heavily.
//!
//! An event is applied exactly once. Applying it may mutate the mission
//! state and enqueue successor events; there is no way to re-enter an
//! applied event, only to construct a new one.

use hecs::Entity;
use log::{debug, info};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::components::Controller;
use crate::engine::MissionState;
use crate::systems;

/// Logical simulation time in milliseconds. Not wall-clock time; only the
/// ordering matters.
pub type SimTime = u64;

/// A unit of simulated work scheduled for a point in logical time.
///
/// Implementations must not assume anything about previously applied
/// events beyond what the current mission state encodes.
pub trait Event {
    /// When this event fires
    fn time(&self) -> SimTime;

    /// Carry out the event's effect, exactly once.
    ///
    /// Consumes the event. Successors go through `queue`.
    fn apply(self: Box<Self>, state: &mut MissionState, queue: &mut EventQueue);
}

struct Scheduled {
    time: SimTime,
    /// Tie-break key: lower values were inserted earlier
    sequence: u64,
    event: Box<dyn Event>,
}

// Min-heap on (time, sequence): BinaryHeap is a max-heap, so reverse.
impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.sequence == other.sequence
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .time
            .cmp(&self.time)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Priority queue of pending events, earliest first
#[derive(Default)]
pub struct EventQueue {
    heap: BinaryHeap<Scheduled>,
    next_sequence: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an event, keyed by its own timestamp
    pub fn push(&mut self, event: Box<dyn Event>) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(Scheduled {
            time: event.time(),
            sequence,
            event,
        });
    }

    /// Remove and return the pending event with the smallest timestamp,
    /// FIFO among equal timestamps
    pub fn pop_next(&mut self) -> Option<Box<dyn Event>> {
        self.heap.pop().map(|scheduled| scheduled.event)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

/// Fetch-execute-reschedule cycle for one rover.
///
/// Applying a `CommandEvent` asks the rover's control interface for its
/// next command. If the supply is exhausted nothing is enqueued and the
/// rover falls silent; otherwise the command is executed against the
/// mission state and a successor `CommandEvent` is scheduled at
/// `time + duration`.
pub struct CommandEvent {
    time: SimTime,
    rover: Entity,
}

impl CommandEvent {
    pub fn new(time: SimTime, rover: Entity) -> Self {
        Self { time, rover }
    }
}

impl Event for CommandEvent {
    fn time(&self) -> SimTime {
        self.time
    }

    fn apply(self: Box<Self>, state: &mut MissionState, queue: &mut EventQueue) {
        // Borrow the controller only long enough to fetch the command and
        // its duration; execution needs the world mutably.
        let fetched = state
            .world
            .get::<&mut Controller>(self.rover)
            .ok()
            .and_then(|mut controller| {
                controller.0.next_command().map(|command| {
                    let duration = controller.0.command_duration(&command);
                    (command, duration)
                })
            });

        let Some((command, duration)) = fetched else {
            info!("rover {:?} is out of commands", self.rover);
            return;
        };

        let outcome = systems::execute(&mut state.world, &mut state.map, self.rover, &command);
        state.commands_executed += 1;
        debug!(
            "t={}ms rover {:?}: {} -> {:?}",
            self.time,
            self.rover,
            command.verb(),
            outcome
        );

        queue.push(Box::new(CommandEvent::new(self.time + duration, self.rover)));
    }
}
