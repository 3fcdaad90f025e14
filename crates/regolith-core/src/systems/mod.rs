//! Systems that mutate mission state: movement and cargo handling

pub mod cargo;
pub mod movement;

pub use cargo::{carried_mass, drop_item, pick_up};
pub use movement::{move_rover, set_location};

use hecs::{Entity, World};

use crate::control::Command;
use crate::map::MapGrid;

/// What became of an executed command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command took effect
    Completed,
    /// The command could not be carried out; state is unchanged
    Blocked,
}

/// Execute one rover command against the world and map.
///
/// Commands only touch the rover's own state and the squares it
/// legitimately interacts with: its current square, and the adjacent
/// square for movement.
pub fn execute(
    world: &mut World,
    map: &mut MapGrid,
    rover: Entity,
    command: &Command,
) -> CommandOutcome {
    match command {
        Command::Move(direction) => move_rover(world, map, rover, *direction),
        Command::Wait => CommandOutcome::Completed,
        Command::PickUp(name) => pick_up(world, map, rover, name),
        Command::Drop(name) => drop_item(world, map, rover, name),
    }
}
