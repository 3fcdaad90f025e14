//! Terrain grid: square storage, procedural elevation, item scattering
//!
//! The grid is a plain resource held next to the ECS world. Each square
//! owns its occupant list; occupant membership is mutated only by
//! [`crate::systems::set_location`] and by scattering.

use hecs::{Entity, World};
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::components::{Body, ItemTag, Location};
use crate::engine::MissionError;

/// Configuration for terrain generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Grid width in squares (x axis)
    pub width: u32,
    /// Grid length in squares (y axis)
    pub length: u32,
    /// Maximum elevation of any generated square, in meters
    pub max_elevation: f64,
    /// Decimal digits of elevation precision (2 gives e.g. 12.34)
    pub precision: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 10,
            length: 10,
            max_elevation: 25.0,
            precision: 2,
        }
    }
}

/// One square of terrain
#[derive(Debug, Clone)]
pub struct MapSquare {
    elevation: f64,
    occupants: Vec<Entity>,
}

impl MapSquare {
    /// Elevation in meters
    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    /// Entities currently on this square, in no particular order
    pub fn occupants(&self) -> &[Entity] {
        &self.occupants
    }

    pub(crate) fn add_occupant(&mut self, entity: Entity) {
        self.occupants.push(entity);
    }

    pub(crate) fn remove_occupant(&mut self, entity: Entity) {
        if let Some(pos) = self.occupants.iter().position(|&e| e == entity) {
            self.occupants.swap_remove(pos);
        }
    }
}

/// The mission terrain: a fixed-size 2D grid of squares.
///
/// Dimensions never change after generation. Lookups are bounds-checked
/// and return `None` for coordinates off the grid, including negatives;
/// callers branch on the result.
#[derive(Debug)]
pub struct MapGrid {
    width: u32,
    length: u32,
    squares: Vec<MapSquare>,
}

impl MapGrid {
    /// Generate a terrain grid, drawing each square's elevation uniformly
    /// from `[0, max_elevation]` rounded to the configured precision.
    ///
    /// Determinism is up to the caller: pass a seeded rng to reproduce a
    /// map. Non-positive dimensions or elevation are configuration errors.
    pub fn generate(config: &MapConfig, rng: &mut impl Rng) -> Result<Self, MissionError> {
        if config.width == 0 || config.length == 0 || config.max_elevation <= 0.0 {
            return Err(MissionError::InvalidDimensions {
                width: config.width,
                length: config.length,
                max_elevation: config.max_elevation,
            });
        }

        let count = (config.width * config.length) as usize;
        let mut squares = Vec::with_capacity(count);
        for _ in 0..count {
            let raw = rng.gen_range(0.0..=config.max_elevation);
            squares.push(MapSquare {
                elevation: round_to(raw, config.precision),
                occupants: Vec::new(),
            });
        }

        debug!(
            "generated {}x{} terrain, max elevation {}",
            config.width, config.length, config.max_elevation
        );

        Ok(Self {
            width: config.width,
            length: config.length,
            squares,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    /// The square at (x, y), or `None` if the coordinates are off the grid
    pub fn square(&self, x: i32, y: i32) -> Option<&MapSquare> {
        self.index(x, y).map(|i| &self.squares[i])
    }

    pub fn square_mut(&mut self, x: i32, y: i32) -> Option<&mut MapSquare> {
        self.index(x, y).map(move |i| &mut self.squares[i])
    }

    /// Iterate all squares with their coordinates, row-major
    pub fn iter(&self) -> impl Iterator<Item = ((i32, i32), &MapSquare)> {
        let width = self.width as i32;
        self.squares.iter().enumerate().map(move |(i, square)| {
            let x = i as i32 % width;
            let y = i as i32 / width;
            ((x, y), square)
        })
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.length as i32 {
            return None;
        }
        Some((y as u32 * self.width + x as u32) as usize)
    }

    /// Scatter fresh copies of item prototypes across the grid.
    ///
    /// Every square independently receives items with probability
    /// `probability`; a receiving square gets between 1 and
    /// `max_per_square` items, each a fresh copy of a uniformly chosen
    /// prototype. Additive to whatever already occupies a square; the
    /// prototypes themselves are never mutated. Returns how many items
    /// were spawned.
    pub fn scatter_items(
        &mut self,
        world: &mut World,
        prototypes: &[Body],
        probability: f64,
        max_per_square: u32,
        rng: &mut impl Rng,
    ) -> u32 {
        if prototypes.is_empty() || max_per_square == 0 {
            return 0;
        }

        let mut spawned = 0;
        for i in 0..self.squares.len() {
            if !rng.gen_bool(probability) {
                continue;
            }
            let count = rng.gen_range(1..=max_per_square);
            let x = i as i32 % self.width as i32;
            let y = i as i32 / self.width as i32;
            for _ in 0..count {
                let proto = &prototypes[rng.gen_range(0..prototypes.len())];
                let item = world.spawn((ItemTag, proto.clone(), Location { x, y }));
                self.squares[i].add_occupant(item);
                spawned += 1;
            }
        }

        debug!("scattered {} items across the grid", spawned);
        spawned
    }
}

/// Round to a fixed number of decimal digits
fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}
