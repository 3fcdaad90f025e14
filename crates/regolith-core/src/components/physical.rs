//! Physical object components: Body, entity markers, Location, Rover state
//!
//! Anything that can occupy a map square carries a [`Body`]: a name plus
//! mass and bulk. Items are inert; rovers and landers add behavior through
//! further components.

use hecs::Entity;
use serde::{Deserialize, Serialize};

use crate::control::ControlInterface;

/// Physical presence of an object: name, mass and bulk.
///
/// Immutable once constructed. Cloning a `Body` is how item prototypes are
/// instantiated during scattering: the copy shares nothing with the
/// prototype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    name: String,
    mass: f64,
    bulk: f64,
}

impl Body {
    /// Makes a new body with the given name, mass (kg) and bulk (m³).
    ///
    /// Panics if the name is empty or mass/bulk is negative. Those values
    /// are caller defects, not runtime conditions the engine recovers from.
    pub fn new(name: impl Into<String>, mass: f64, bulk: f64) -> Self {
        let name = name.into();
        assert!(!name.is_empty(), "a body needs a non-empty name");
        assert!(mass >= 0.0, "negative mass: {}", mass);
        assert!(bulk >= 0.0, "negative bulk: {}", bulk);
        Self { name, mass, bulk }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mass in kilograms
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Rough boxy volume estimate in cubic meters
    pub fn bulk(&self) -> f64 {
        self.bulk
    }
}

/// Marker for inert items that can be picked up and carried
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ItemTag;

/// Marker for landers. A lander never moves once placed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LanderTag;

/// Marker for rovers
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RoverTag;

/// Grid coordinates of the square an entity currently occupies.
///
/// This is a denormalized cache: the square's occupant list is canonical,
/// and the two are kept consistent only through
/// [`crate::systems::set_location`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

/// Rover-specific state: carrying capacity and cargo hold.
///
/// Holds raw entity ids, so it stays out of the serde surface; snapshots
/// resolve cargo into plain data.
#[derive(Debug, Clone)]
pub struct Rover {
    /// Maximum total mass the rover can carry, in kilograms
    pub capacity: f64,
    /// Entities currently carried (items removed from their squares)
    pub cargo: Vec<Entity>,
}

impl Rover {
    pub fn new(capacity: f64) -> Self {
        Self {
            capacity,
            cargo: Vec::new(),
        }
    }
}

/// The rover's bound control interface, as an ECS component.
///
/// The implementation behind the trait object is entirely external to the
/// core: interactive, scripted, whatever supplies commands.
pub struct Controller(pub Box<dyn ControlInterface>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_accessors() {
        let body = Body::new("Rock", 2.5, 0.001);
        assert_eq!(body.name(), "Rock");
        assert_eq!(body.mass(), 2.5);
        assert_eq!(body.bulk(), 0.001);
    }

    #[test]
    fn test_body_clone_is_independent() {
        let proto = Body::new("Sample", 1.0, 0.1);
        let copy = proto.clone();
        assert_eq!(proto, copy);
        drop(proto);
        assert_eq!(copy.name(), "Sample");
    }

    #[test]
    #[should_panic]
    fn test_negative_mass_rejected() {
        Body::new("Antirock", -1.0, 0.5);
    }

    #[test]
    #[should_panic]
    fn test_empty_name_rejected() {
        Body::new("", 1.0, 0.5);
    }
}
