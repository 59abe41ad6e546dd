//! # World Module
//!
//! The dungeon grid: a fixed-size 2D array of tiles with movement, sight and
//! exploration state. One grid exists per dungeon floor and it is replaced
//! wholesale on descent.

use super::Position;
use crate::{DelveError, DelveResult};
use serde::{Deserialize, Serialize};

/// A single map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Whether movement into this tile is blocked
    pub blocked: bool,
    /// Whether this tile stops line of sight
    pub blocks_sight: bool,
    /// Whether the player has ever seen this tile (never reset once set)
    pub explored: bool,
}

impl Tile {
    /// Creates a solid wall tile.
    pub fn wall() -> Self {
        Self {
            blocked: true,
            blocks_sight: true,
            explored: false,
        }
    }

    /// Creates an open floor tile.
    pub fn floor() -> Self {
        Self {
            blocked: false,
            blocks_sight: false,
            explored: false,
        }
    }

    /// Clears movement and sight blocking, leaving exploration untouched.
    pub fn carve(&mut self) {
        self.blocked = false;
        self.blocks_sight = false;
    }

    /// Marks the tile as explored.
    pub fn explore(&mut self) {
        self.explored = true;
    }
}

/// Fixed-size grid of tiles for one dungeon floor.
///
/// Tiles are stored row-major; positions outside the grid are treated as
/// blocked by every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: u32,
    pub height: u32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Creates a grid with every tile set to solid wall.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Grid, Position};
    ///
    /// let grid = Grid::new_filled(10, 8);
    /// assert!(grid.is_blocked(Position::new(3, 3)));
    /// assert!(grid.is_blocked(Position::new(-1, 3)));
    /// ```
    pub fn new_filled(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::wall(); (width * height) as usize],
        }
    }

    /// Returns true if the position lies inside the grid.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.y as usize * self.width as usize + pos.x as usize)
        } else {
            None
        }
    }

    /// Gets the tile at the given position.
    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        self.index(pos).map(|idx| &self.tiles[idx])
    }

    /// Gets the tile at the given position mutably.
    pub fn tile_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        self.index(pos).map(move |idx| &mut self.tiles[idx])
    }

    /// Replaces the tile at the given position.
    pub fn set_tile(&mut self, pos: Position, tile: Tile) -> DelveResult<()> {
        let slot = self.tile_mut(pos).ok_or_else(|| {
            DelveError::InvalidState(format!("Position ({}, {}) is outside the grid", pos.x, pos.y))
        })?;
        *slot = tile;
        Ok(())
    }

    /// Opens the tile at the given position for movement and sight.
    ///
    /// Out-of-bounds positions are ignored.
    pub fn carve(&mut self, pos: Position) {
        if let Some(tile) = self.tile_mut(pos) {
            tile.carve();
        }
    }

    /// Checks whether movement into the tile is blocked by terrain.
    pub fn is_blocked(&self, pos: Position) -> bool {
        self.tile(pos).map(|tile| tile.blocked).unwrap_or(true)
    }

    /// Checks whether the tile stops line of sight.
    pub fn blocks_sight(&self, pos: Position) -> bool {
        self.tile(pos).map(|tile| tile.blocks_sight).unwrap_or(true)
    }

    /// Checks whether the tile has been explored.
    pub fn is_explored(&self, pos: Position) -> bool {
        self.tile(pos).map(|tile| tile.explored).unwrap_or(false)
    }

    /// Iterates over every position of the grid, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height as i32)
            .flat_map(move |y| (0..self.width as i32).map(move |x| Position::new(x, y)))
    }

    /// Counts the tiles that can be walked on.
    pub fn open_tile_count(&self) -> usize {
        self.tiles.iter().filter(|tile| !tile.blocked).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_solid() {
        let grid = Grid::new_filled(20, 10);
        assert_eq!(grid.open_tile_count(), 0);
        assert!(grid.positions().all(|pos| grid.is_blocked(pos) && grid.blocks_sight(pos)));
        assert_eq!(grid.positions().count(), 200);
    }

    #[test]
    fn test_carve_opens_tile() {
        let mut grid = Grid::new_filled(5, 5);
        let pos = Position::new(2, 3);
        grid.carve(pos);
        assert!(!grid.is_blocked(pos));
        assert!(!grid.blocks_sight(pos));
        assert_eq!(grid.open_tile_count(), 1);

        // Carving outside the grid is a no-op
        grid.carve(Position::new(9, 9));
        assert_eq!(grid.open_tile_count(), 1);
    }

    #[test]
    fn test_out_of_bounds_queries() {
        let grid = Grid::new_filled(5, 5);
        assert!(grid.tile(Position::new(5, 0)).is_none());
        assert!(grid.is_blocked(Position::new(0, -1)));
        assert!(!grid.is_explored(Position::new(-3, 2)));
    }

    #[test]
    fn test_set_tile_bounds() {
        let mut grid = Grid::new_filled(4, 4);
        assert!(grid.set_tile(Position::new(1, 1), Tile::floor()).is_ok());
        assert!(grid.set_tile(Position::new(4, 1), Tile::floor()).is_err());
    }

    #[test]
    fn test_exploration_is_preserved_by_carving() {
        let mut grid = Grid::new_filled(4, 4);
        let pos = Position::new(1, 2);
        grid.tile_mut(pos).unwrap().explore();
        grid.carve(pos);
        assert!(grid.is_explored(pos));
    }
}
