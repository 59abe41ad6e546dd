//! # Monster AI
//!
//! Monster behaviour as a small state machine. A confused monster carries the
//! behaviour it had before, and gets it back once the confusion wears off.

use super::{EntityId, GameState, Position, Rgb};
use crate::utils::step_towards;
use crate::DelveResult;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Monster behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ai {
    /// Chase and attack the player while in view
    Basic,
    /// Stumble around at random, then resume `previous`
    Confused { previous: Box<Ai>, remaining_turns: u32 },
}

impl Ai {
    /// Wraps an existing behaviour in a confusion lasting `turns` turns.
    pub fn confused(previous: Ai, turns: u32) -> Self {
        Ai::Confused {
            previous: Box::new(previous),
            remaining_turns: turns,
        }
    }

    pub fn is_confused(&self) -> bool {
        matches!(self, Ai::Confused { .. })
    }
}

impl GameState {
    /// Runs one turn for the entity's AI. Entities without an AI do nothing.
    pub fn take_ai_turn(&mut self, id: EntityId) -> DelveResult<()> {
        let Some(ai) = self.entity(id).and_then(|entity| entity.ai.clone()) else {
            return Ok(());
        };

        match ai {
            Ai::Basic => self.basic_turn(id),
            Ai::Confused {
                previous,
                remaining_turns,
            } if remaining_turns > 0 => {
                let dx = self.rng.gen_range(-1..=1);
                let dy = self.rng.gen_range(-1..=1);
                self.move_entity(id, dx, dy);
                if let Some(entity) = self.entity_mut(id) {
                    entity.ai = Some(Ai::Confused {
                        previous,
                        remaining_turns: remaining_turns - 1,
                    });
                }
                Ok(())
            }
            Ai::Confused { previous, .. } => {
                let name = self.name_of(id);
                if let Some(entity) = self.entity_mut(id) {
                    entity.ai = Some(*previous);
                }
                self.message(format!("The {} is no longer confused!", name), Rgb::RED);
                self.take_ai_turn(id)
            }
        }
    }

    /// Chases the player when in view, attacking once adjacent.
    fn basic_turn(&mut self, id: EntityId) -> DelveResult<()> {
        let Some(position) = self.entity(id).map(|entity| entity.position) else {
            return Ok(());
        };
        if !self.is_in_fov(position) {
            return Ok(());
        }

        let player = self.player()?;
        let target = player.position;
        let player_alive = player.is_alive();

        if position.distance_to(target) >= 2.0 {
            self.move_towards(id, target);
        } else if player_alive {
            let player_id = self.player_id();
            self.attack(id, player_id)?;
        }
        Ok(())
    }

    /// Takes one step towards `target`, if the step is not blocked.
    pub fn move_towards(&mut self, id: EntityId, target: Position) -> bool {
        let Some(position) = self.entity(id).map(|entity| entity.position) else {
            return false;
        };
        let step = step_towards(position, target);
        self.move_entity(id, step.x, step.y)
    }
}
