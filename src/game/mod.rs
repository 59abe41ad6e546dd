//! # Game Module
//!
//! Core session state, the dungeon grid, the entity model and the turn engine.
//!
//! This module contains the fundamental building blocks of Delve:
//! - Session state and the per-turn protocol
//! - Grid and tile representation with exploration memory
//! - Capability-based entities (fighter, AI, item, equipment)
//! - Combat, monster AI, consumable effects and inventory handling
//! - Field-of-view computation and the snapshot contract for persistence

pub mod actions;
pub mod ai;
pub mod combat;
pub mod effects;
pub mod entities;
pub mod fov;
pub mod inventory;
pub mod menu;
pub mod messages;
pub mod snapshot;
pub mod state;
pub mod world;

pub use actions::*;
pub use ai::*;
pub use combat::*;
pub use effects::*;
pub use entities::*;
pub use fov::*;
pub use inventory::*;
pub use menu::*;
pub use messages::*;
pub use snapshot::*;
pub use state::*;
pub use world::*;

use serde::{Deserialize, Serialize};

/// Represents a 2D coordinate on the dungeon grid.
///
/// # Examples
///
/// ```
/// use delve::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
///
/// let adjacent = pos.adjacent_positions();
/// assert_eq!(adjacent.len(), 8); // All 8 surrounding positions
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the position shifted by the given delta.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Calculates the Euclidean distance to another position.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::Position;
    ///
    /// let pos1 = Position::new(0, 0);
    /// let pos2 = Position::new(3, 4);
    /// assert_eq!(pos1.distance_to(pos2), 5.0);
    /// ```
    pub fn distance_to(self, other: Position) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// Returns all 8 adjacent positions (including diagonals).
    pub fn adjacent_positions(self) -> Vec<Position> {
        Direction::all()
            .into_iter()
            .map(|direction| self + direction.to_delta())
            .collect()
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// Directions for movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Northeast,
    Northwest,
    Southeast,
    Southwest,
}

impl Direction {
    /// Converts a direction to a unit position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Direction, Position};
    ///
    /// let delta = Direction::North.to_delta();
    /// assert_eq!(delta, Position::new(0, -1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::North => Position::new(0, -1),
            Direction::South => Position::new(0, 1),
            Direction::East => Position::new(1, 0),
            Direction::West => Position::new(-1, 0),
            Direction::Northeast => Position::new(1, -1),
            Direction::Northwest => Position::new(-1, -1),
            Direction::Southeast => Position::new(1, 1),
            Direction::Southwest => Position::new(-1, 1),
        }
    }

    /// Converts a position delta to a direction.
    ///
    /// Returns None if the delta doesn't correspond to a valid direction.
    pub fn from_delta(delta: Position) -> Option<Direction> {
        match (delta.x, delta.y) {
            (0, -1) => Some(Direction::North),
            (0, 1) => Some(Direction::South),
            (1, 0) => Some(Direction::East),
            (-1, 0) => Some(Direction::West),
            (1, -1) => Some(Direction::Northeast),
            (-1, -1) => Some(Direction::Northwest),
            (1, 1) => Some(Direction::Southeast),
            (-1, 1) => Some(Direction::Southwest),
            _ => None,
        }
    }

    /// Returns all 8 directions.
    pub fn all() -> Vec<Direction> {
        vec![
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::Northeast,
            Direction::Northwest,
            Direction::Southeast,
            Direction::Southwest,
        ]
    }
}

/// Non-owning handle to an entity held by the session.
///
/// Handles stay valid while an entity moves between the map and the
/// inventory; the session's entity list remains the single owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An opaque RGB colour used for glyphs and narration.
///
/// The render collaborator maps these onto whatever its backend uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const LIGHT_GRAY: Rgb = Rgb::new(191, 191, 191);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const DARK_RED: Rgb = Rgb::new(128, 0, 0);
    pub const LIGHT_RED: Rgb = Rgb::new(255, 115, 115);
    pub const ORANGE: Rgb = Rgb::new(255, 127, 0);
    pub const DARKER_ORANGE: Rgb = Rgb::new(127, 63, 0);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
    pub const LIGHT_YELLOW: Rgb = Rgb::new(255, 255, 115);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const LIGHT_GREEN: Rgb = Rgb::new(115, 255, 115);
    pub const DARK_GREEN: Rgb = Rgb::new(0, 128, 0);
    pub const SKY: Rgb = Rgb::new(0, 191, 255);
    pub const LIGHT_BLUE: Rgb = Rgb::new(115, 115, 255);
    pub const VIOLET: Rgb = Rgb::new(127, 0, 255);
    pub const LIGHT_VIOLET: Rgb = Rgb::new(185, 115, 255);
    pub const DESATURATED_GREEN: Rgb = Rgb::new(63, 127, 63);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_creation() {
        let pos = Position::new(5, 10);
        assert_eq!(pos.x, 5);
        assert_eq!(pos.y, 10);
    }

    #[test]
    fn test_position_distance() {
        let pos1 = Position::new(0, 0);
        let pos2 = Position::new(3, 4);
        assert_eq!(pos1.distance_to(pos2), 5.0);
        assert_eq!(pos2.distance_to(pos1), 5.0);
    }

    #[test]
    fn test_position_adjacent() {
        let pos = Position::new(5, 5);
        let adjacent = pos.adjacent_positions();
        assert_eq!(adjacent.len(), 8);
        assert!(adjacent.contains(&Position::new(4, 4)));
        assert!(adjacent.contains(&Position::new(6, 6)));
        assert!(!adjacent.contains(&pos));
    }

    #[test]
    fn test_position_arithmetic() {
        let pos1 = Position::new(5, 10);
        let pos2 = Position::new(3, 2);
        assert_eq!(pos1 + pos2, Position::new(8, 12));
        assert_eq!(pos1 - pos2, Position::new(2, 8));
        assert_eq!(pos1.offset(-1, 1), Position::new(4, 11));
    }

    #[test]
    fn test_direction_round_trip() {
        for direction in Direction::all() {
            assert_eq!(Direction::from_delta(direction.to_delta()), Some(direction));
        }
        assert_eq!(Direction::from_delta(Position::new(0, 0)), None);
        assert_eq!(Direction::from_delta(Position::new(2, 0)), None);
    }
}
