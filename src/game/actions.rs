//! # Actions
//!
//! Player actions and the per-turn protocol.
//!
//! One call to [`GameState::perform`] is one turn: the player's action is
//! resolved completely, then, if it took a turn, every monster acts once in
//! list order, and finally the level-up threshold is checked.

use super::{Direction, EntityId, GameState, GameStatus, Rgb};
use crate::DelveResult;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// A logical player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Step in a direction, attacking whatever fighter stands there
    Move(Direction),
    /// Let a turn pass
    Wait,
    /// Pick up the first item on the player's tile
    PickUp,
    /// Use the inventory item at this index
    UseItem(usize),
    /// Drop the inventory item at this index
    DropItem(usize),
    /// Go down the stairs the player is standing on
    DescendStairs,
}

/// Whether resolving an action used up the player's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    TookTurn,
    NoTurn,
}

impl GameState {
    /// Resolves one player action and, if it took a turn, the monster sweep.
    ///
    /// Nothing happens once the player is dead or while a level-up choice is
    /// waiting to be made.
    pub fn perform(&mut self, action: Action) -> DelveResult<ActionOutcome> {
        if self.status == GameStatus::Dead || self.is_level_up_pending() {
            return Ok(ActionOutcome::NoTurn);
        }
        self.ensure_fov();

        let outcome = match action {
            Action::Move(direction) => self.move_or_attack(direction)?,
            Action::Wait => ActionOutcome::TookTurn,
            Action::PickUp => self.pick_up()?,
            Action::UseItem(index) => self.use_item(index)?,
            Action::DropItem(index) => self.drop_item(index)?,
            Action::DescendStairs => self.descend()?,
        };
        debug!("{:?} resolved as {:?}", action, outcome);

        if outcome == ActionOutcome::TookTurn {
            self.ensure_fov();
            if self.status == GameStatus::Playing {
                self.run_monster_turns()?;
            }
            self.check_level_up()?;
        }

        self.ensure_fov();
        Ok(outcome)
    }

    /// Moves the player, or attacks the first fighter on the target tile.
    ///
    /// Bumping into a wall still uses the turn.
    fn move_or_attack(&mut self, direction: Direction) -> DelveResult<ActionOutcome> {
        let player_id = self.player_id();
        let target = self.player()?.position + direction.to_delta();

        let defender = self
            .entities
            .iter()
            .find(|e| e.id != player_id && e.fighter.is_some() && e.position == target)
            .map(|e| e.id);

        match defender {
            Some(defender) => {
                self.attack(player_id, defender)?;
            }
            None => {
                let delta = direction.to_delta();
                self.move_entity(player_id, delta.x, delta.y);
            }
        }
        Ok(ActionOutcome::TookTurn)
    }

    /// Descends if the player stands on the stairs.
    fn descend(&mut self) -> DelveResult<ActionOutcome> {
        let on_stairs = match self.entity(self.stairs_id()) {
            Some(stairs) => stairs.position == self.player()?.position,
            None => false,
        };
        if !on_stairs {
            self.message("There are no stairs here.", Rgb::LIGHT_GRAY);
            return Ok(ActionOutcome::NoTurn);
        }

        self.next_level()?;
        info!("Descended to depth {}", self.depth);
        Ok(ActionOutcome::TookTurn)
    }

    /// Gives every entity with an AI one turn, in list order.
    fn run_monster_turns(&mut self) -> DelveResult<()> {
        let actors: Vec<EntityId> = self
            .entities
            .iter()
            .filter(|e| e.ai.is_some())
            .map(|e| e.id)
            .collect();

        for id in actors {
            self.take_ai_turn(id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Position, Tile};
    use crate::generation::MonsterKind;
    use crate::testing::open_room_state;

    #[test]
    fn test_move_into_open_tile() {
        let mut state = open_room_state(Position::new(5, 5));
        assert_eq!(state.perform(Action::Move(Direction::East)).unwrap(), ActionOutcome::TookTurn);
        assert_eq!(state.player().unwrap().position, Position::new(6, 5));
        assert!(state.is_in_fov(Position::new(7, 5)));
    }

    #[test]
    fn test_bumping_wall_takes_turn_without_moving() {
        let mut state = open_room_state(Position::new(1, 1));
        assert_eq!(state.perform(Action::Move(Direction::North)).unwrap(), ActionOutcome::TookTurn);
        assert_eq!(state.player().unwrap().position, Position::new(1, 1));
    }

    #[test]
    fn test_moving_into_monster_attacks() {
        let mut state = open_room_state(Position::new(5, 5));
        let golem = state.spawn_monster(MonsterKind::Golem, Position::new(6, 5));

        state.perform(Action::Move(Direction::East)).unwrap();
        assert_eq!(state.player().unwrap().position, Position::new(5, 5));
        assert_eq!(state.entity(golem).unwrap().position, Position::new(6, 5));
        assert!(state.messages.contains("Player attacks golem"));
    }

    #[test]
    fn test_failed_action_skips_monsters() {
        let mut state = open_room_state(Position::new(5, 5));
        let orc = state.spawn_monster(MonsterKind::Orc, Position::new(12, 5));

        assert_eq!(state.perform(Action::PickUp).unwrap(), ActionOutcome::NoTurn);
        assert_eq!(state.entity(orc).unwrap().position, Position::new(12, 5));

        assert_eq!(state.perform(Action::Wait).unwrap(), ActionOutcome::TookTurn);
        assert_eq!(state.entity(orc).unwrap().position, Position::new(11, 5));
    }

    #[test]
    fn test_descend_requires_stairs() {
        let mut state = open_room_state(Position::new(5, 5));
        assert_eq!(state.perform(Action::DescendStairs).unwrap(), ActionOutcome::NoTurn);
        assert_eq!(state.depth, 1);
        assert!(state.messages.contains("no stairs here"));
    }

    #[test]
    fn test_dead_player_cannot_act() {
        let mut state = open_room_state(Position::new(5, 5));
        let player_id = state.player_id();
        state.damage_entity(player_id, 1000).unwrap();

        assert_eq!(state.perform(Action::Move(Direction::East)).unwrap(), ActionOutcome::NoTurn);
        assert_eq!(state.player().unwrap().position, Position::new(5, 5));
    }

    #[test]
    fn test_walls_block_movement() {
        let mut state = open_room_state(Position::new(5, 5));
        state.grid.set_tile(Position::new(6, 5), Tile::wall()).unwrap();
        state.perform(Action::Move(Direction::East)).unwrap();
        assert_eq!(state.player().unwrap().position, Position::new(5, 5));
    }
}
