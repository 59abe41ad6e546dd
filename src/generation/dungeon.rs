//! # Dungeon Generation
//!
//! Room-and-corridor floor layout.
//!
//! Rooms are placed by repeated random attempts with inclusive-edge collision
//! rejection. Each accepted room after the first is joined to the previous one
//! by an L-shaped corridor, and the stairs go in the centre of the last room.

use super::{validate_grid, GenerationConfig, Generator, Rect};
use crate::game::{Grid, Position};
use crate::utils::is_reachable;
use crate::{DelveError, DelveResult};
use log::debug;
use rand::{rngs::StdRng, Rng};

/// A freshly generated floor: the carved grid, the rooms in acceptance order
/// and the stairs position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFloor {
    pub grid: Grid,
    pub rooms: Vec<Rect>,
    pub stairs: Position,
}

impl GeneratedFloor {
    /// The centre of the first accepted room, where the player starts.
    pub fn player_start(&self) -> Position {
        self.rooms.first().map(Rect::center).unwrap_or(self.stairs)
    }
}

/// Corridor shape joining two room centres.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorridorOrder {
    /// Along the previous room's row, then down the new room's column
    HorizontalFirst,
    /// Down the previous room's column, then along the new room's row
    VerticalFirst,
}

/// Room-and-corridor floor generator.
#[derive(Debug, Clone)]
pub struct RoomCorridorGenerator {
    /// Whether to check that the stairs can be reached from the start
    pub ensure_connectivity: bool,
}

impl RoomCorridorGenerator {
    /// Creates a new dungeon generator with default settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{create_rng, GenerationConfig, Generator, RoomCorridorGenerator};
    ///
    /// let generator = RoomCorridorGenerator::new();
    /// let mut rng = create_rng(1);
    /// let floor = generator.generate(&GenerationConfig::new(), &mut rng).unwrap();
    /// assert!(!floor.rooms.is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            ensure_connectivity: true,
        }
    }

    /// Samples one candidate room that lies inside the grid.
    fn room_candidate(&self, config: &GenerationConfig, rng: &mut StdRng) -> Rect {
        let w = rng.gen_range(config.min_room_size..=config.max_room_size);
        let h = rng.gen_range(config.min_room_size..=config.max_room_size);
        let x = rng.gen_range(0..=config.map_width as i32 - w - 1);
        let y = rng.gen_range(0..=config.map_height as i32 - h - 1);
        Rect::new(x, y, w, h)
    }

    /// Opens the interior of a room.
    fn carve_room(&self, grid: &mut Grid, room: &Rect) {
        for pos in room.interior_positions() {
            grid.carve(pos);
        }
    }

    fn carve_horizontal(&self, grid: &mut Grid, x1: i32, x2: i32, y: i32) {
        for x in x1.min(x2)..=x1.max(x2) {
            grid.carve(Position::new(x, y));
        }
    }

    fn carve_vertical(&self, grid: &mut Grid, y1: i32, y2: i32, x: i32) {
        for y in y1.min(y2)..=y1.max(y2) {
            grid.carve(Position::new(x, y));
        }
    }

    /// Carves an L-shaped corridor from `from` to `to`.
    pub fn carve_corridor(&self, grid: &mut Grid, from: Position, to: Position, order: CorridorOrder) {
        match order {
            CorridorOrder::HorizontalFirst => {
                self.carve_horizontal(grid, from.x, to.x, from.y);
                self.carve_vertical(grid, from.y, to.y, to.x);
            }
            CorridorOrder::VerticalFirst => {
                self.carve_vertical(grid, from.y, to.y, from.x);
                self.carve_horizontal(grid, from.x, to.x, to.y);
            }
        }
    }

    /// Runs the placement attempts, returning the accepted rooms in order.
    fn place_rooms(&self, grid: &mut Grid, config: &GenerationConfig, rng: &mut StdRng) -> Vec<Rect> {
        let mut rooms: Vec<Rect> = Vec::new();

        for _ in 0..config.max_rooms {
            let candidate = self.room_candidate(config, rng);
            if rooms.iter().any(|other| candidate.intersects(other)) {
                continue;
            }

            self.carve_room(grid, &candidate);

            if let Some(previous) = rooms.last() {
                let order = if rng.gen_range(0..=1) == 1 {
                    CorridorOrder::HorizontalFirst
                } else {
                    CorridorOrder::VerticalFirst
                };
                self.carve_corridor(grid, previous.center(), candidate.center(), order);
            }

            rooms.push(candidate);
        }

        rooms
    }
}

impl Generator<GeneratedFloor> for RoomCorridorGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> DelveResult<GeneratedFloor> {
        config.validate()?;

        let mut grid = Grid::new_filled(config.map_width, config.map_height);
        let rooms = self.place_rooms(&mut grid, config, rng);

        let stairs = rooms
            .last()
            .map(Rect::center)
            .ok_or_else(|| DelveError::GenerationFailed("No rooms were placed".to_string()))?;

        debug!(
            "{} generated floor {}x{} with {} rooms out of {} attempts",
            self.generator_type(),
            config.map_width,
            config.map_height,
            rooms.len(),
            config.max_rooms
        );

        let floor = GeneratedFloor { grid, rooms, stairs };
        self.validate(&floor, config)?;
        Ok(floor)
    }

    fn validate(&self, floor: &GeneratedFloor, _config: &GenerationConfig) -> DelveResult<()> {
        validate_grid(&floor.grid)?;

        if let Some(room) = floor.rooms.iter().find(|room| {
            room.interior_positions().any(|pos| floor.grid.is_blocked(pos))
        }) {
            return Err(DelveError::GenerationFailed(format!(
                "Room at ({}, {}) was not fully carved",
                room.x1, room.y1
            )));
        }

        if self.ensure_connectivity && !is_reachable(&floor.grid, floor.player_start(), floor.stairs) {
            return Err(DelveError::GenerationFailed(
                "Stairs are not reachable from the starting room".to_string(),
            ));
        }

        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "RoomCorridorGenerator"
    }
}

impl Default for RoomCorridorGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::create_rng;

    #[test]
    fn test_generation_with_small_level() {
        let generator = RoomCorridorGenerator::new();
        let config = GenerationConfig::for_testing();
        let mut rng = create_rng(12345);

        let floor = generator.generate(&config, &mut rng).unwrap();
        assert_eq!(floor.grid.width, config.map_width);
        assert_eq!(floor.grid.height, config.map_height);
        assert!(!floor.rooms.is_empty());
        assert_eq!(floor.stairs, floor.rooms.last().unwrap().center());
        assert!(floor.grid.open_tile_count() > 0);
        assert_eq!(generator.generator_type(), "RoomCorridorGenerator");
    }

    #[test]
    fn test_rooms_never_overlap() {
        let generator = RoomCorridorGenerator::new();
        let config = GenerationConfig::new();
        for seed in 0..20 {
            let mut rng = create_rng(seed);
            let floor = generator.generate(&config, &mut rng).unwrap();
            for (i, a) in floor.rooms.iter().enumerate() {
                for b in &floor.rooms[i + 1..] {
                    assert!(!a.intersects(b), "seed {} produced overlapping rooms", seed);
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_floor() {
        let generator = RoomCorridorGenerator::new();
        let config = GenerationConfig::new();
        let a = generator.generate(&config, &mut create_rng(99)).unwrap();
        let b = generator.generate(&config, &mut create_rng(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_room_floor() {
        let generator = RoomCorridorGenerator::new();
        let config = GenerationConfig {
            max_rooms: 1,
            ..GenerationConfig::for_testing()
        };
        let floor = generator.generate(&config, &mut create_rng(3)).unwrap();
        assert_eq!(floor.rooms.len(), 1);
        assert_eq!(floor.stairs, floor.player_start());
    }

    #[test]
    fn test_no_attempts_fails() {
        let generator = RoomCorridorGenerator::new();
        let config = GenerationConfig {
            max_rooms: 0,
            ..GenerationConfig::for_testing()
        };
        assert!(generator.generate(&config, &mut create_rng(3)).is_err());
    }

    #[test]
    fn test_l_corridor_carving() {
        let generator = RoomCorridorGenerator::new();
        let mut grid = Grid::new_filled(20, 20);
        let start = Position::new(5, 5);
        let end = Position::new(15, 12);

        generator.carve_corridor(&mut grid, start, end, CorridorOrder::HorizontalFirst);
        assert!(!grid.is_blocked(start));
        assert!(!grid.is_blocked(Position::new(15, 5))); // the elbow
        assert!(!grid.is_blocked(end));
        assert!(grid.is_blocked(Position::new(5, 12)));

        let mut grid = Grid::new_filled(20, 20);
        generator.carve_corridor(&mut grid, start, end, CorridorOrder::VerticalFirst);
        assert!(!grid.is_blocked(Position::new(5, 12)));
        assert!(grid.is_blocked(Position::new(15, 5)));
        assert_eq!(grid.open_tile_count(), 11 + 7);
    }

    #[test]
    fn test_validation_rejects_empty_grid() {
        let generator = RoomCorridorGenerator::new();
        let floor = GeneratedFloor {
            grid: Grid::new_filled(10, 10),
            rooms: Vec::new(),
            stairs: Position::new(5, 5),
        };
        assert!(generator.validate(&floor, &GenerationConfig::for_testing()).is_err());
    }
}
