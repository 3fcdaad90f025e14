//! Rover control boundary: commands and the interface that supplies them
//!
//! The core never decides what a rover does next. A [`ControlInterface`]
//! implementation (interactive, scripted, programmatic) feeds it commands
//! and prices each command in logical time. Running out of commands is the
//! normal way a simulation ends, not an error.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::components::Direction;
use crate::events::SimTime;

/// A single rover command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Drive one square in the given direction
    Move(Direction),
    /// Stay put for the command's duration
    Wait,
    /// Pick up an item by name from the current square
    PickUp(String),
    /// Drop a carried item by name onto the current square
    Drop(String),
}

impl Command {
    /// Short verb for logging
    pub fn verb(&self) -> &'static str {
        match self {
            Command::Move(_) => "move",
            Command::Wait => "wait",
            Command::PickUp(_) => "pick up",
            Command::Drop(_) => "drop",
        }
    }
}

/// Supplies a rover's commands and their durations.
///
/// `next_command` may block or return immediately; the engine only sees
/// the result. `None` signals an exhausted command supply, which ends the
/// rover's participation in the simulation.
pub trait ControlInterface: Send + Sync {
    /// The rover's next command, or `None` when the supply is exhausted
    fn next_command(&mut self) -> Option<Command>;

    /// How much logical time (ms) the command takes to carry out
    fn command_duration(&self, command: &Command) -> SimTime;
}

/// A control interface that replays a fixed list of commands.
///
/// Used by the headless harness and by tests; a stand-in for the
/// interactive controller that lives outside the core.
pub struct ScriptedControl {
    commands: VecDeque<Command>,
    step_ms: SimTime,
}

impl ScriptedControl {
    /// Script the given commands, each taking one second of logical time
    pub fn new(commands: Vec<Command>) -> Self {
        Self {
            commands: commands.into(),
            step_ms: 1_000,
        }
    }

    /// Override the per-command duration
    pub fn with_step_ms(mut self, step_ms: SimTime) -> Self {
        self.step_ms = step_ms;
        self
    }
}

impl ControlInterface for ScriptedControl {
    fn next_command(&mut self) -> Option<Command> {
        self.commands.pop_front()
    }

    fn command_duration(&self, _command: &Command) -> SimTime {
        self.step_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_control_replays_in_order() {
        let mut control = ScriptedControl::new(vec![
            Command::Move(Direction::North),
            Command::Wait,
        ]);
        assert_eq!(
            control.next_command(),
            Some(Command::Move(Direction::North))
        );
        assert_eq!(control.next_command(), Some(Command::Wait));
        assert_eq!(control.next_command(), None);
        // Stays exhausted
        assert_eq!(control.next_command(), None);
    }

    #[test]
    fn test_scripted_control_duration_override() {
        let control = ScriptedControl::new(vec![Command::Wait]).with_step_ms(250);
        assert_eq!(control.command_duration(&Command::Wait), 250);
    }
}
