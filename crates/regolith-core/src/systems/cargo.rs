//! Cargo handling: moving items between squares and the rover's hold
//!
//! Picking an item up removes it from its square's occupant list; the
//! entity lives on in the rover's cargo with no `Location` until dropped.

use hecs::{Entity, World};
use log::debug;

use crate::components::{Body, ItemTag, Location, Rover};
use crate::map::MapGrid;
use crate::systems::CommandOutcome;

/// Total mass currently in the rover's hold, in kilograms
pub fn carried_mass(world: &World, rover: Entity) -> f64 {
    let cargo: Vec<Entity> = match world.get::<&Rover>(rover) {
        Ok(state) => state.cargo.clone(),
        Err(_) => return 0.0,
    };
    cargo
        .iter()
        .filter_map(|&item| world.get::<&Body>(item).ok().map(|body| body.mass()))
        .sum()
}

/// Pick up a named item from the rover's current square.
///
/// Blocked if no such item is present or if taking it would push the
/// total carried mass over the rover's capacity.
pub fn pick_up(world: &mut World, map: &mut MapGrid, rover: Entity, name: &str) -> CommandOutcome {
    let Some(here) = world.get::<&Location>(rover).ok().map(|loc| *loc) else {
        return CommandOutcome::Blocked;
    };

    let found = map.square(here.x, here.y).and_then(|square| {
        square.occupants().iter().copied().find(|&entity| {
            world.get::<&ItemTag>(entity).is_ok()
                && world
                    .get::<&Body>(entity)
                    .map(|body| body.name() == name)
                    .unwrap_or(false)
        })
    });
    let Some(item) = found else {
        debug!("no item named {:?} at ({}, {})", name, here.x, here.y);
        return CommandOutcome::Blocked;
    };

    let item_mass = world.get::<&Body>(item).map(|b| b.mass()).unwrap_or(0.0);
    let capacity = world
        .get::<&Rover>(rover)
        .map(|r| r.capacity)
        .unwrap_or(0.0);
    if carried_mass(world, rover) + item_mass > capacity {
        debug!("rover {:?} over capacity picking up {:?}", rover, name);
        return CommandOutcome::Blocked;
    }

    if let Some(square) = map.square_mut(here.x, here.y) {
        square.remove_occupant(item);
    }
    let _ = world.remove_one::<Location>(item);
    if let Ok(mut state) = world.get::<&mut Rover>(rover) {
        state.cargo.push(item);
    }
    CommandOutcome::Completed
}

/// Drop a named item from the rover's hold onto its current square
pub fn drop_item(
    world: &mut World,
    map: &mut MapGrid,
    rover: Entity,
    name: &str,
) -> CommandOutcome {
    let Some(here) = world.get::<&Location>(rover).ok().map(|loc| *loc) else {
        return CommandOutcome::Blocked;
    };

    let cargo: Vec<Entity> = match world.get::<&Rover>(rover) {
        Ok(state) => state.cargo.clone(),
        Err(_) => return CommandOutcome::Blocked,
    };
    let found = cargo.iter().copied().find(|&entity| {
        world
            .get::<&Body>(entity)
            .map(|body| body.name() == name)
            .unwrap_or(false)
    });
    let Some(item) = found else {
        return CommandOutcome::Blocked;
    };

    if let Ok(mut state) = world.get::<&mut Rover>(rover) {
        state.cargo.retain(|&e| e != item);
    }
    if let Some(square) = map.square_mut(here.x, here.y) {
        square.add_occupant(item);
    }
    let _ = world.insert_one(item, here);
    CommandOutcome::Completed
}
