//! Movement: the single place occupancy is allowed to change

use hecs::{Entity, World};
use log::debug;

use crate::components::{Direction, Location};
use crate::map::MapGrid;
use crate::systems::CommandOutcome;

/// Place an entity on the square at (x, y).
///
/// Removes the entity from its previous square's occupant list (if it had
/// one), adds it to the new square's, and updates the entity's `Location`
/// cache. This is the sole movement mechanism: after it returns `true`,
/// the entity is a member of exactly one occupant list grid-wide.
///
/// Returns `false` without mutating anything if the target square does
/// not exist.
pub fn set_location(world: &mut World, map: &mut MapGrid, entity: Entity, x: i32, y: i32) -> bool {
    if map.square(x, y).is_none() {
        return false;
    }

    let previous = world.get::<&Location>(entity).ok().map(|loc| *loc);
    if let Some(Location { x: px, y: py }) = previous {
        if let Some(square) = map.square_mut(px, py) {
            square.remove_occupant(entity);
        }
    }

    if let Some(square) = map.square_mut(x, y) {
        square.add_occupant(entity);
    }
    let _ = world.insert_one(entity, Location { x, y });
    true
}

/// Drive the rover one square in the given direction.
///
/// Blocked (state unchanged) at the edge of the grid.
pub fn move_rover(
    world: &mut World,
    map: &mut MapGrid,
    rover: Entity,
    direction: Direction,
) -> CommandOutcome {
    let Some(from) = world.get::<&Location>(rover).ok().map(|loc| *loc) else {
        return CommandOutcome::Blocked;
    };

    let (dx, dy) = direction.offset();
    let (tx, ty) = (from.x + dx, from.y + dy);
    if set_location(world, map, rover, tx, ty) {
        CommandOutcome::Completed
    } else {
        debug!(
            "rover {:?} blocked moving {} from ({}, {})",
            rover,
            direction.name(),
            from.x,
            from.y
        );
        CommandOutcome::Blocked
    }
}
