//! # Population
//!
//! Scatters monsters and items into accepted rooms.

use super::{
    item_chances, max_items_per_room, max_monsters_per_room, monster_chances, random_choice_at_depth,
    Rect,
};
use crate::game::{Entity, Grid, IdAllocator, Position};
use rand::Rng;

/// How many entities a population pass actually placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopulationCounts {
    pub monsters: usize,
    pub items: usize,
}

impl std::ops::AddAssign for PopulationCounts {
    fn add_assign(&mut self, other: Self) {
        self.monsters += other.monsters;
        self.items += other.items;
    }
}

fn is_occupied(grid: &Grid, entities: &[Entity], pos: Position) -> bool {
    grid.is_blocked(pos) || entities.iter().any(|entity| entity.blocks && entity.position == pos)
}

fn random_interior<R: Rng + ?Sized>(room: &Rect, rng: &mut R) -> Position {
    let x = rng.gen_range(room.x1 + 1..=room.x2 - 1);
    let y = rng.gen_range(room.y1 + 1..=room.y2 - 1);
    Position::new(x, y)
}

/// Populates one room at the given depth, appending to `entities`.
///
/// Monster and item counts are rolled uniformly up to the depth's maximum.
/// Each slot picks a random interior tile and is skipped if that tile is
/// blocked by terrain or a blocking entity.
pub fn populate_room<R: Rng + ?Sized>(
    room: &Rect,
    depth: u32,
    grid: &Grid,
    entities: &mut Vec<Entity>,
    ids: &mut IdAllocator,
    rng: &mut R,
) -> PopulationCounts {
    let mut counts = PopulationCounts::default();

    let monster_table = monster_chances();
    let num_monsters = rng.gen_range(0..=max_monsters_per_room().value_at(depth));
    for _ in 0..num_monsters {
        let pos = random_interior(room, rng);
        if is_occupied(grid, entities, pos) {
            continue;
        }
        if let Some(kind) = random_choice_at_depth(&monster_table, depth, rng) {
            entities.push(kind.spawn(ids.allocate(), pos));
            counts.monsters += 1;
        }
    }

    let item_table = item_chances();
    let num_items = rng.gen_range(0..=max_items_per_room().value_at(depth));
    for _ in 0..num_items {
        let pos = random_interior(room, rng);
        if is_occupied(grid, entities, pos) {
            continue;
        }
        if let Some(kind) = random_choice_at_depth(&item_table, depth, rng) {
            entities.push(kind.spawn(ids.allocate(), pos));
            counts.items += 1;
        }
    }

    counts
}

/// Populates every room in acceptance order.
pub fn populate_floor<R: Rng + ?Sized>(
    rooms: &[Rect],
    depth: u32,
    grid: &Grid,
    entities: &mut Vec<Entity>,
    ids: &mut IdAllocator,
    rng: &mut R,
) -> PopulationCounts {
    let mut total = PopulationCounts::default();
    for room in rooms {
        total += populate_room(room, depth, grid, entities, ids, rng);
    }
    log::debug!(
        "Populated {} rooms at depth {}: {} monsters, {} items",
        rooms.len(),
        depth,
        total.monsters,
        total.items
    );
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{EntityId, Rgb};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn carved(room: &Rect) -> Grid {
        let mut grid = Grid::new_filled(30, 30);
        for pos in room.interior_positions() {
            grid.carve(pos);
        }
        grid
    }

    #[test]
    fn test_population_stays_in_room_interior() {
        let room = Rect::new(2, 2, 10, 8);
        let grid = carved(&room);
        let mut rng = StdRng::seed_from_u64(21);

        for depth in [1, 4, 10] {
            let mut entities = Vec::new();
            let mut ids = IdAllocator::new();
            let counts = populate_room(&room, depth, &grid, &mut entities, &mut ids, &mut rng);

            assert_eq!(entities.len(), counts.monsters + counts.items);
            assert!(counts.monsters as u32 <= max_monsters_per_room().value_at(depth));
            assert!(counts.items as u32 <= max_items_per_room().value_at(depth));
            assert!(entities.iter().all(|e| room.contains_interior(e.position)));
        }
    }

    #[test]
    fn test_blocking_entities_never_share_a_tile() {
        let room = Rect::new(0, 0, 4, 4);
        let grid = carved(&room);
        let mut rng = StdRng::seed_from_u64(8);
        let mut ids = IdAllocator::new();
        let mut entities = vec![Entity::new(ids.allocate(), Position::new(2, 2), '@', "player", Rgb::WHITE).blocking()];

        for _ in 0..50 {
            populate_room(&room, 6, &grid, &mut entities, &mut ids, &mut rng);
        }

        let blockers: Vec<_> = entities.iter().filter(|e| e.blocks).map(|e| e.position).collect();
        for (i, pos) in blockers.iter().enumerate() {
            assert!(!blockers[i + 1..].contains(pos));
        }
        assert_eq!(entities[0].id, EntityId(0));
    }

    #[test]
    fn test_population_is_deterministic() {
        let rooms = vec![Rect::new(1, 1, 8, 8), Rect::new(12, 12, 10, 10)];
        let mut grid = Grid::new_filled(30, 30);
        for room in &rooms {
            for pos in room.interior_positions() {
                grid.carve(pos);
            }
        }

        let run = |seed| {
            let mut entities = Vec::new();
            let mut ids = IdAllocator::new();
            populate_floor(&rooms, 3, &grid, &mut entities, &mut ids, &mut StdRng::seed_from_u64(seed));
            entities
        };
        assert_eq!(run(4), run(4));
    }
}
