//! # Generation Module
//!
//! Procedural content generation for dungeon floors.
//!
//! A floor is built in two passes: the room/corridor generator carves the
//! grid and reports the rooms it accepted, then the population pass scatters
//! monsters and items into those rooms using depth-scaled weight tables.

pub mod dungeon;
pub mod encounters;
pub mod items;
pub mod population;
pub mod tables;

pub use dungeon::*;
pub use encounters::*;
pub use items::*;
pub use population::*;
pub use tables::*;

use crate::config;
use crate::game::{Grid, Position};
use crate::{DelveError, DelveResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Configuration for floor layout generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Grid width in tiles
    pub map_width: u32,
    /// Grid height in tiles
    pub map_height: u32,
    /// Minimum room side, walls included
    pub min_room_size: i32,
    /// Maximum room side, walls included
    pub max_room_size: i32,
    /// Number of placement attempts; not every attempt yields a room
    pub max_rooms: u32,
}

impl GenerationConfig {
    /// Creates the standard configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::GenerationConfig;
    ///
    /// let config = GenerationConfig::new();
    /// assert!(config.min_room_size >= 3);
    /// assert!(config.max_room_size >= config.min_room_size);
    /// ```
    pub fn new() -> Self {
        Self {
            map_width: config::MAP_WIDTH,
            map_height: config::MAP_HEIGHT,
            min_room_size: config::ROOM_MIN_SIZE,
            max_room_size: config::ROOM_MAX_SIZE,
            max_rooms: config::MAX_ROOMS,
        }
    }

    /// Creates a configuration for testing with smaller, simpler floors.
    pub fn for_testing() -> Self {
        Self {
            map_width: 40,
            map_height: 24,
            min_room_size: 4,
            max_room_size: 8,
            max_rooms: 10,
        }
    }

    /// Checks that a room of the largest size still fits on the grid.
    pub fn validate(&self) -> DelveResult<()> {
        if self.min_room_size < 3 || self.max_room_size < self.min_room_size {
            return Err(DelveError::GenerationFailed(format!(
                "Invalid room size bounds {}..={}",
                self.min_room_size, self.max_room_size
            )));
        }
        if self.map_width as i32 <= self.max_room_size || self.map_height as i32 <= self.max_room_size {
            return Err(DelveError::GenerationFailed(format!(
                "Map {}x{} is too small for rooms of size {}",
                self.map_width, self.map_height, self.max_room_size
            )));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Axis-aligned rectangle used while carving rooms.
///
/// The edges are the room's walls; only the interior is carved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    /// Gets the center position, rounded towards the top-left.
    pub fn center(&self) -> Position {
        Position::new((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    /// Returns true if the rectangles overlap, touching edges included.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }

    /// Iterates over the carved interior, `x1+1..=x2-1` by `y1+1..=y2-1`.
    pub fn interior_positions(&self) -> impl Iterator<Item = Position> {
        let (x1, x2) = (self.x1 + 1, self.x2 - 1);
        (self.y1 + 1..=self.y2 - 1).flat_map(move |y| (x1..=x2).map(move |x| Position::new(x, y)))
    }

    /// Returns true if the position lies inside the carved interior.
    pub fn contains_interior(&self, pos: Position) -> bool {
        pos.x > self.x1 && pos.x < self.x2 && pos.y > self.y1 && pos.y < self.y2
    }
}

/// Common interface for generation systems.
pub trait Generator<T> {
    /// Generates content from the configuration and random stream.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> DelveResult<T>;

    /// Checks generated content against the generator's guarantees.
    fn validate(&self, content: &T, config: &GenerationConfig) -> DelveResult<()>;

    /// Short name used in logs.
    fn generator_type(&self) -> &'static str;
}

/// Creates the session random stream from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Validates that a floor has somewhere to stand.
pub fn validate_grid(grid: &Grid) -> DelveResult<()> {
    if grid.open_tile_count() == 0 {
        return Err(DelveError::GenerationFailed("Floor has no open tiles".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_generation_config_creation() {
        let config = GenerationConfig::new();
        assert_eq!(config.map_width, 80);
        assert_eq!(config.map_height, 43);
        assert!(config.validate().is_ok());
        assert!(GenerationConfig::for_testing().validate().is_ok());
    }

    #[test]
    fn test_config_rejects_oversized_rooms() {
        let config = GenerationConfig {
            map_width: 10,
            ..GenerationConfig::new()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rect_geometry() {
        let rect = Rect::new(5, 5, 10, 8);
        assert_eq!(rect.x2, 15);
        assert_eq!(rect.y2, 13);
        assert_eq!(rect.center(), Position::new(10, 9));
        assert_eq!(rect.interior_positions().count(), 9 * 7);
        assert!(rect.contains_interior(Position::new(6, 6)));
        assert!(!rect.contains_interior(Position::new(5, 6)));
    }

    #[test]
    fn test_rect_intersection_includes_edges() {
        let a = Rect::new(0, 0, 5, 5);
        let touching = Rect::new(5, 0, 5, 5);
        let apart = Rect::new(6, 0, 5, 5);

        assert!(a.intersects(&touching));
        assert!(touching.intersects(&a));
        assert!(!a.intersects(&apart));
    }

    #[test]
    fn test_rng_is_reproducible() {
        let mut a = create_rng(7);
        let mut b = create_rng(7);
        let xs: Vec<u32> = (0..5).map(|_| a.gen_range(0..100)).collect();
        let ys: Vec<u32> = (0..5).map(|_| b.gen_range(0..100)).collect();
        assert_eq!(xs, ys);
    }
}
