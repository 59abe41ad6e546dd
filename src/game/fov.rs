//! # Field of View
//!
//! Symmetric shadowcasting over the dungeon grid and the per-tile visibility
//! map derived from it.
//!
//! The map is recomputed lazily: moving the player marks it dirty and the next
//! refresh recasts from the player's tile. Every tile that becomes visible is
//! also marked explored on the grid, and exploration is never cleared.

use super::{Grid, Position};
use log::debug;
use serde::{Deserialize, Serialize};

/// Which tiles are currently in view, plus the parameters used to cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FovMap {
    width: u32,
    height: u32,
    visible: Vec<bool>,
    /// Sight radius in tiles; zero or less means unlimited
    pub radius: i32,
    /// Whether the walls bounding the view are themselves visible
    pub light_walls: bool,
    dirty: bool,
}

impl FovMap {
    /// Creates an empty, dirty visibility map sized for the grid.
    pub fn for_grid(grid: &Grid, radius: i32, light_walls: bool) -> Self {
        Self {
            width: grid.width,
            height: grid.height,
            visible: vec![false; (grid.width * grid.height) as usize],
            radius,
            light_walls,
            dirty: true,
        }
    }

    /// Requests a recompute on the next refresh.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns true if the tile is in the current field of view.
    pub fn is_visible(&self, pos: Position) -> bool {
        if pos.x < 0 || pos.y < 0 || pos.x as u32 >= self.width || pos.y as u32 >= self.height {
            return false;
        }
        self.visible[pos.y as usize * self.width as usize + pos.x as usize]
    }

    /// Number of tiles currently in view.
    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|v| **v).count()
    }

    /// Recomputes only if the map is dirty. Returns whether a recompute ran.
    pub fn refresh(&mut self, grid: &mut Grid, origin: Position) -> bool {
        if !self.dirty {
            return false;
        }
        self.recompute(grid, origin);
        true
    }

    /// Recasts the field of view from `origin` and marks what is seen as explored.
    pub fn recompute(&mut self, grid: &mut Grid, origin: Position) {
        if grid.width != self.width || grid.height != self.height {
            self.width = grid.width;
            self.height = grid.height;
            self.visible = vec![false; (grid.width * grid.height) as usize];
        } else {
            self.visible.iter_mut().for_each(|v| *v = false);
        }

        let width = self.width as usize;
        let mut seen = Vec::new();
        {
            let grid_ref: &Grid = grid;
            compute_fov(
                origin,
                self.radius,
                self.light_walls,
                &|pos| grid_ref.blocks_sight(pos),
                &|pos| grid_ref.in_bounds(pos),
                &mut |pos| seen.push(pos),
            );
        }

        for pos in seen {
            self.visible[pos.y as usize * width + pos.x as usize] = true;
            if let Some(tile) = grid.tile_mut(pos) {
                tile.explore();
            }
        }

        self.dirty = false;
        debug!(
            "FOV recomputed from ({}, {}): {} tiles visible",
            origin.x,
            origin.y,
            self.visible_count()
        );
    }
}

/// How a tile should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileAppearance {
    /// Never seen; draw nothing
    Unexplored,
    /// Seen before but not in view; draw dimmed
    Remembered { wall: bool },
    /// Currently in view
    Lit { wall: bool },
}

/// Casts symmetric shadows from `origin`, calling `reveal` for every tile in view.
///
/// `blocks_sight` reports opaque tiles and `in_bounds` limits what may be
/// revealed; tiles outside the bounds are treated as opaque. With a positive
/// `radius` only tiles within that Euclidean distance are revealed. When
/// `light_walls` is false, opaque tiles are never revealed. A tile may be
/// reported more than once.
pub fn compute_fov(
    origin: Position,
    radius: i32,
    light_walls: bool,
    blocks_sight: &dyn Fn(Position) -> bool,
    in_bounds: &dyn Fn(Position) -> bool,
    reveal: &mut dyn FnMut(Position),
) {
    if !in_bounds(origin) {
        return;
    }
    reveal(origin);

    let mut caster = ShadowCaster {
        origin,
        radius,
        light_walls,
        blocks_sight,
        in_bounds,
        reveal,
    };

    for cardinal in [Cardinal::North, Cardinal::East, Cardinal::South, Cardinal::West] {
        let first = Row {
            depth: 1,
            start: Slope::new(-1, 1),
            end: Slope::new(1, 1),
        };
        caster.scan(cardinal, first);
    }
}

#[derive(Debug, Clone, Copy)]
enum Cardinal {
    North,
    East,
    South,
    West,
}

/// Exact rational slope `num / den` with `den > 0`.
#[derive(Debug, Clone, Copy)]
struct Slope {
    num: i32,
    den: i32,
}

impl Slope {
    fn new(num: i32, den: i32) -> Self {
        Self { num, den }
    }

    /// Slope of the edge of the tile at `col` in a row at `depth`.
    fn at_tile_edge(depth: i32, col: i32) -> Self {
        Self::new(2 * col - 1, 2 * depth)
    }
}

#[derive(Debug, Clone, Copy)]
struct Row {
    depth: i32,
    start: Slope,
    end: Slope,
}

impl Row {
    fn min_col(&self) -> i32 {
        // round half up of depth * start
        (2 * self.depth * self.start.num + self.start.den).div_euclid(2 * self.start.den)
    }

    fn max_col(&self) -> i32 {
        // round half down of depth * end
        let numerator = 2 * self.depth * self.end.num - self.end.den;
        -((-numerator).div_euclid(2 * self.end.den))
    }

    fn is_symmetric(&self, col: i32) -> bool {
        col * self.start.den >= self.depth * self.start.num
            && col * self.end.den <= self.depth * self.end.num
    }

    fn next(&self) -> Row {
        Row {
            depth: self.depth + 1,
            ..*self
        }
    }
}

struct ShadowCaster<'a> {
    origin: Position,
    radius: i32,
    light_walls: bool,
    blocks_sight: &'a dyn Fn(Position) -> bool,
    in_bounds: &'a dyn Fn(Position) -> bool,
    reveal: &'a mut dyn FnMut(Position),
}

impl ShadowCaster<'_> {
    fn transform(&self, cardinal: Cardinal, depth: i32, col: i32) -> Position {
        let Position { x, y } = self.origin;
        match cardinal {
            Cardinal::North => Position::new(x + col, y - depth),
            Cardinal::South => Position::new(x + col, y + depth),
            Cardinal::East => Position::new(x + depth, y + col),
            Cardinal::West => Position::new(x - depth, y + col),
        }
    }

    fn is_opaque(&self, pos: Position) -> bool {
        !(self.in_bounds)(pos) || (self.blocks_sight)(pos)
    }

    fn within_radius(&self, pos: Position) -> bool {
        if self.radius <= 0 {
            return true;
        }
        let dx = pos.x - self.origin.x;
        let dy = pos.y - self.origin.y;
        dx * dx + dy * dy <= self.radius * self.radius
    }

    fn scan(&mut self, cardinal: Cardinal, mut row: Row) {
        if self.radius > 0 && row.depth > self.radius {
            return;
        }

        let mut previous_opaque: Option<bool> = None;
        for col in row.min_col()..=row.max_col() {
            let pos = self.transform(cardinal, row.depth, col);
            let opaque = self.is_opaque(pos);

            if (opaque || row.is_symmetric(col))
                && (self.in_bounds)(pos)
                && self.within_radius(pos)
                && (self.light_walls || !opaque)
            {
                (self.reveal)(pos);
            }

            match previous_opaque {
                Some(true) if !opaque => {
                    row.start = Slope::at_tile_edge(row.depth, col);
                }
                Some(false) if opaque => {
                    let mut next = row.next();
                    next.end = Slope::at_tile_edge(row.depth, col);
                    self.scan(cardinal, next);
                }
                _ => {}
            }
            previous_opaque = Some(opaque);
        }

        if previous_opaque == Some(false) {
            // Stop when nothing in bounds remains to be cast into
            if !self.row_leaves_grid(cardinal, &row) {
                self.scan(cardinal, row.next());
            }
        }
    }

    /// True once the next row lies entirely outside the bounds.
    fn row_leaves_grid(&self, cardinal: Cardinal, row: &Row) -> bool {
        let next = row.next();
        (next.min_col()..=next.max_col()).all(|col| !(self.in_bounds)(self.transform(cardinal, next.depth, col)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_grid(width: u32, height: u32) -> Grid {
        let mut grid = Grid::new_filled(width, height);
        for y in 1..height as i32 - 1 {
            for x in 1..width as i32 - 1 {
                grid.carve(Position::new(x, y));
            }
        }
        grid
    }

    #[test]
    fn test_open_room_fully_visible() {
        let mut grid = open_grid(11, 11);
        let mut fov = FovMap::for_grid(&grid, 0, true);
        fov.recompute(&mut grid, Position::new(5, 5));

        for pos in grid.positions().collect::<Vec<_>>() {
            assert!(fov.is_visible(pos), "{:?} should be visible", pos);
            assert!(grid.is_explored(pos));
        }
    }

    #[test]
    fn test_radius_limits_view() {
        let mut grid = open_grid(30, 30);
        let mut fov = FovMap::for_grid(&grid, 3, true);
        let origin = Position::new(15, 15);
        fov.recompute(&mut grid, origin);

        assert!(fov.is_visible(Position::new(18, 15)));
        assert!(!fov.is_visible(Position::new(19, 15)));
        assert!(!fov.is_visible(Position::new(18, 18)));
        assert!(!grid.is_explored(Position::new(25, 25)));
    }

    #[test]
    fn test_walls_occlude() {
        let mut grid = open_grid(20, 9);
        // A wall across the room with the origin on the left
        for y in 1..8 {
            grid.set_tile(Position::new(10, y), crate::game::Tile::wall()).unwrap();
        }
        let mut fov = FovMap::for_grid(&grid, 0, true);
        fov.recompute(&mut grid, Position::new(3, 4));

        assert!(fov.is_visible(Position::new(9, 4)));
        assert!(fov.is_visible(Position::new(10, 4))); // the wall itself is lit
        assert!(!fov.is_visible(Position::new(11, 4)));
        assert!(!fov.is_visible(Position::new(15, 2)));
    }

    #[test]
    fn test_unlit_walls_stay_hidden() {
        let mut grid = open_grid(9, 9);
        let mut fov = FovMap::for_grid(&grid, 0, false);
        fov.recompute(&mut grid, Position::new(4, 4));

        assert!(fov.is_visible(Position::new(1, 1)));
        assert!(!fov.is_visible(Position::new(0, 4)));
        assert!(!grid.is_explored(Position::new(0, 4)));
    }

    #[test]
    fn test_exploration_is_monotonic() {
        let mut grid = open_grid(30, 5);
        let mut fov = FovMap::for_grid(&grid, 4, true);
        fov.recompute(&mut grid, Position::new(3, 2));
        assert!(grid.is_explored(Position::new(5, 2)));

        fov.mark_dirty();
        assert!(fov.refresh(&mut grid, Position::new(25, 2)));
        assert!(!fov.is_visible(Position::new(5, 2)));
        assert!(grid.is_explored(Position::new(5, 2)));
        assert!(grid.is_explored(Position::new(27, 2)));
    }

    #[test]
    fn test_refresh_only_when_dirty() {
        let mut grid = open_grid(10, 10);
        let mut fov = FovMap::for_grid(&grid, 5, true);
        assert!(fov.is_dirty());
        assert!(fov.refresh(&mut grid, Position::new(5, 5)));
        assert!(!fov.is_dirty());
        assert!(!fov.refresh(&mut grid, Position::new(5, 5)));
    }

    #[test]
    fn test_pillar_casts_symmetric_shadow() {
        let mut grid = open_grid(21, 21);
        grid.set_tile(Position::new(12, 10), crate::game::Tile::wall()).unwrap();
        let origin = Position::new(10, 10);
        let mut fov = FovMap::for_grid(&grid, 0, true);
        fov.recompute(&mut grid, origin);

        let hidden = Position::new(16, 10);
        assert!(!fov.is_visible(hidden));

        // Seen from the hidden tile, the origin is hidden too
        let mut reverse = FovMap::for_grid(&grid, 0, true);
        reverse.recompute(&mut grid, hidden);
        assert!(!reverse.is_visible(origin));
    }
}
