//! # Pathfinding Algorithms
//!
//! Breadth-first reachability over the dungeon grid, used to validate
//! generated floors.

use crate::game::{Grid, Position};
use ::pathfinding::prelude::bfs;

/// Finds a shortest 8-connected walking path between two tiles.
///
/// Only terrain is considered; entities never block a path. The returned
/// path includes both endpoints.
pub fn find_path(grid: &Grid, start: Position, goal: Position) -> Option<Vec<Position>> {
    if grid.is_blocked(start) || grid.is_blocked(goal) {
        return None;
    }

    bfs(
        &start,
        |pos| {
            pos.adjacent_positions()
                .into_iter()
                .filter(|next| !grid.is_blocked(*next))
                .collect::<Vec<_>>()
        },
        |pos| *pos == goal,
    )
}

/// Returns true if `goal` can be walked to from `start`.
pub fn is_reachable(grid: &Grid, start: Position, goal: Position) -> bool {
    find_path(grid, start, goal).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_along_corridor() {
        let mut grid = Grid::new_filled(10, 5);
        for x in 1..9 {
            grid.carve(Position::new(x, 2));
        }

        let path = find_path(&grid, Position::new(1, 2), Position::new(8, 2)).unwrap();
        assert_eq!(path.first(), Some(&Position::new(1, 2)));
        assert_eq!(path.last(), Some(&Position::new(8, 2)));
        assert_eq!(path.len(), 8);
    }

    #[test]
    fn test_unreachable_behind_wall() {
        let mut grid = Grid::new_filled(10, 5);
        grid.carve(Position::new(1, 1));
        grid.carve(Position::new(5, 1));
        assert!(!is_reachable(&grid, Position::new(1, 1), Position::new(5, 1)));
        assert!(is_reachable(&grid, Position::new(1, 1), Position::new(1, 1)));
    }
}
