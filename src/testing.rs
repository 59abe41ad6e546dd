//! Fixtures shared by the unit tests.

use crate::game::{GameConfig, GameState, Grid, Position};
use crate::generation::create_rng;

/// A 30x20 floor with one open room spanning the interior, the player at
/// `player` and the stairs in the far corner. Sight covers the whole room.
pub(crate) fn open_room_state(player: Position) -> GameState {
    open_room_state_with_sight(player, 40)
}

/// Same floor as [`open_room_state`] with a torch of the given radius, lit
/// from the start so only tiles near `player` are explored.
pub(crate) fn open_room_state_with_sight(player: Position, torch_radius: i32) -> GameState {
    let mut grid = Grid::new_filled(30, 20);
    for y in 1..19 {
        for x in 1..29 {
            grid.carve(Position::new(x, y));
        }
    }
    let config = GameConfig {
        torch_radius,
        ..GameConfig::default()
    };
    GameState::with_grid(grid, player, Position::new(28, 18), config, create_rng(42))
}
