//! # Snapshot
//!
//! Everything needed to resume a session, in a plain serializable shape.
//!
//! Entity handles are not part of the contract: the player and the stairs are
//! identified by their index in the entity list. Restoring validates those
//! indices and rebuilds the visibility map from the restored grid.

use super::{Entity, GameConfig, GameState, GameStatus, Grid, IdAllocator, Inventory, MessageLog, FovMap};
use crate::{config, DelveError, DelveResult};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Captured session state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub grid: Grid,
    pub entities: Vec<Entity>,
    pub player_index: usize,
    pub stairs_index: usize,
    pub inventory: Vec<Entity>,
    pub messages: MessageLog,
    pub status: GameStatus,
    pub depth: u32,
    /// A level-up choice that had not been made yet
    #[serde(default)]
    pub pending_level_up: bool,
}

impl GameState {
    /// Captures the session.
    pub fn snapshot(&self) -> DelveResult<Snapshot> {
        let player_index = self
            .index_of(self.player_id)
            .ok_or_else(|| DelveError::InvalidState("Player is missing from the floor".to_string()))?;
        let stairs_index = self
            .index_of(self.stairs_id)
            .ok_or_else(|| DelveError::InvalidState("Stairs are missing from the floor".to_string()))?;

        Ok(Snapshot {
            grid: self.grid.clone(),
            entities: self.entities.clone(),
            player_index,
            stairs_index,
            inventory: self.inventory.items().to_vec(),
            messages: self.messages.clone(),
            status: self.status,
            depth: self.depth,
            pending_level_up: self.pending_level_up,
        })
    }

    /// Rebuilds a session from a snapshot.
    ///
    /// Fails with [`DelveError::InvalidState`] if the player or stairs index
    /// does not point into the entity list, the player cannot fight, or the
    /// inventory holds more than it can.
    pub fn restore(snapshot: Snapshot, config: GameConfig, rng: StdRng) -> DelveResult<Self> {
        let Snapshot {
            grid,
            entities,
            player_index,
            stairs_index,
            inventory,
            messages,
            status,
            depth,
            pending_level_up,
        } = snapshot;

        let player = entities.get(player_index).ok_or_else(|| {
            DelveError::InvalidState(format!(
                "Player index {} is outside the {} saved entities",
                player_index,
                entities.len()
            ))
        })?;
        if player.fighter.is_none() {
            return Err(DelveError::InvalidState("Saved player has no fighter".to_string()));
        }
        let stairs = entities.get(stairs_index).ok_or_else(|| {
            DelveError::InvalidState(format!(
                "Stairs index {} is outside the {} saved entities",
                stairs_index,
                entities.len()
            ))
        })?;

        if inventory.len() > config::INVENTORY_CAPACITY {
            return Err(DelveError::InvalidState(format!(
                "Saved inventory holds {} items, capacity is {}",
                inventory.len(),
                config::INVENTORY_CAPACITY
            )));
        }

        let player_id = player.id;
        let stairs_id = stairs.id;
        let ids = IdAllocator::after(entities.iter().chain(inventory.iter()).map(|e| &e.id));
        let fov = FovMap::for_grid(&grid, config.torch_radius, config.light_walls);

        let mut state = Self {
            grid,
            entities,
            inventory: Inventory::from_items(inventory),
            messages,
            status,
            depth,
            fov,
            config,
            player_id,
            stairs_id,
            pending_level_up,
            ids,
            rng,
        };
        state.ensure_fov();
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Action, Direction, Position};
    use crate::generation::{create_rng, ItemKind, MonsterKind};
    use crate::testing::open_room_state;

    #[test]
    fn test_snapshot_round_trip_preserves_session() {
        let mut state = GameState::new_game(GameConfig::default(), create_rng(31)).unwrap();
        state.perform(Action::Wait).unwrap();

        let snapshot = state.snapshot().unwrap();
        let restored = GameState::restore(snapshot.clone(), GameConfig::default(), create_rng(1)).unwrap();

        assert_eq!(restored.grid, state.grid);
        assert_eq!(restored.entities, state.entities);
        assert_eq!(restored.player_id(), state.player_id());
        assert_eq!(restored.stairs_id(), state.stairs_id());
        assert_eq!(restored.inventory, state.inventory);
        assert_eq!(restored.depth, 1);
        assert_eq!(restored.snapshot().unwrap(), snapshot);
        assert!(!restored.fov.is_dirty());
    }

    #[test]
    fn test_restore_rejects_bad_indices() {
        let state = open_room_state(Position::new(3, 3));
        let mut snapshot = state.snapshot().unwrap();
        snapshot.stairs_index = snapshot.entities.len();
        assert!(matches!(
            GameState::restore(snapshot, GameConfig::default(), create_rng(1)),
            Err(DelveError::InvalidState(_))
        ));

        let mut snapshot = state.snapshot().unwrap();
        snapshot.player_index = snapshot.stairs_index;
        assert!(matches!(
            GameState::restore(snapshot, GameConfig::default(), create_rng(1)),
            Err(DelveError::InvalidState(_))
        ));
    }

    #[test]
    fn test_restore_rejects_overfull_inventory() {
        let mut state = open_room_state(Position::new(3, 3));
        let mut snapshot = state.snapshot().unwrap();
        for _ in 0..config::INVENTORY_CAPACITY + 1 {
            let id = state.ids.allocate();
            snapshot.inventory.push(ItemKind::HealingPotion.spawn(id, Position::new(0, 0)));
        }

        assert!(matches!(
            GameState::restore(snapshot.clone(), GameConfig::default(), create_rng(1)),
            Err(DelveError::InvalidState(_))
        ));

        snapshot.inventory.truncate(config::INVENTORY_CAPACITY);
        let restored = GameState::restore(snapshot, GameConfig::default(), create_rng(1)).unwrap();
        assert!(restored.inventory_menu("Inventory").is_ok());
    }

    #[test]
    fn test_restored_handles_do_not_collide() {
        let mut state = open_room_state(Position::new(3, 3));
        let orc = state.spawn_monster(MonsterKind::Orc, Position::new(9, 9));
        let snapshot = state.snapshot().unwrap();

        let mut restored = GameState::restore(snapshot, state.config.clone(), create_rng(2)).unwrap();
        let goblin = restored.spawn_monster(MonsterKind::Goblin, Position::new(10, 10));
        assert!(goblin > orc);

        restored.perform(Action::Move(Direction::East)).unwrap();
        assert_eq!(restored.player().unwrap().position, Position::new(4, 3));
    }
}
