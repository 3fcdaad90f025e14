//! Components attached to simulation entities

pub mod common;
pub mod physical;

pub use common::Direction;
pub use physical::{Body, Controller, ItemTag, LanderTag, Location, Rover, RoverTag};
