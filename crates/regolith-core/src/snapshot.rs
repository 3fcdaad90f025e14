//! Read-only snapshots of mission state
//!
//! External collaborators (renderers, persistence) consume the simulation
//! through these plain serializable structs rather than touching the ECS
//! world or the grid directly.

use serde::{Deserialize, Serialize};

use crate::components::{Body, ItemTag, LanderTag, Rover, RoverTag};
use crate::engine::MissionState;
use crate::events::SimTime;

/// What kind of physical object a snapshot entry describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    Item,
    Rover,
    Lander,
}

/// One physical object: the body triple plus its kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectSnapshot {
    pub name: String,
    pub mass: f64,
    pub bulk: f64,
    pub kind: ObjectKind,
}

/// One map square with its occupants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SquareSnapshot {
    pub x: i32,
    pub y: i32,
    pub elevation: f64,
    pub occupants: Vec<ObjectSnapshot>,
}

/// A rover with its current position and cargo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoverSnapshot {
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub capacity: f64,
    pub cargo: Vec<ObjectSnapshot>,
}

/// Full read-only view of the simulation at one point in logical time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionSnapshot {
    pub sim_time: SimTime,
    pub width: u32,
    pub length: u32,
    pub squares: Vec<SquareSnapshot>,
    pub rovers: Vec<RoverSnapshot>,
}

impl MissionSnapshot {
    pub(crate) fn capture(state: &MissionState, sim_time: SimTime) -> Self {
        let world = &state.world;

        let object = |entity: hecs::Entity| -> Option<ObjectSnapshot> {
            let body = world.get::<&Body>(entity).ok()?;
            let kind = if world.get::<&RoverTag>(entity).is_ok() {
                ObjectKind::Rover
            } else if world.get::<&LanderTag>(entity).is_ok() {
                ObjectKind::Lander
            } else if world.get::<&ItemTag>(entity).is_ok() {
                ObjectKind::Item
            } else {
                return None;
            };
            Some(ObjectSnapshot {
                name: body.name().to_string(),
                mass: body.mass(),
                bulk: body.bulk(),
                kind,
            })
        };

        let squares = state
            .map
            .iter()
            .map(|((x, y), square)| SquareSnapshot {
                x,
                y,
                elevation: square.elevation(),
                occupants: square
                    .occupants()
                    .iter()
                    .filter_map(|&entity| object(entity))
                    .collect(),
            })
            .collect();

        let rovers = world
            .query::<(&RoverTag, &Body, &Rover, &crate::components::Location)>()
            .iter()
            .map(|(_, (_, body, rover, location))| RoverSnapshot {
                name: body.name().to_string(),
                x: location.x,
                y: location.y,
                capacity: rover.capacity,
                cargo: rover
                    .cargo
                    .iter()
                    .filter_map(|&entity| object(entity))
                    .collect(),
            })
            .collect();

        Self {
            sim_time,
            width: state.map.width(),
            length: state.map.length(),
            squares,
            rovers,
        }
    }
}
