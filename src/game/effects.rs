//! # Consumable Effects
//!
//! What using a potion or scroll does. Each effect either changes the session
//! and reports [`EffectOutcome::Used`], or finds its precondition unmet and
//! reports [`EffectOutcome::Cancelled`] so the item is kept.

use super::{Ai, EntityId, GameState, Rgb};
use crate::DelveResult;
use serde::{Deserialize, Serialize};

/// Use-effect carried by a consumable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemEffect {
    /// Restore hit points, up to the effective maximum
    Heal { amount: i32 },
    /// Strike the nearest visible monster within range
    Bolt { damage: i32, range: i32 },
    /// Damage every monster within `radius` of the nearest visible monster in range
    Fireball { damage: i32, range: i32, radius: i32 },
    /// Confuse the nearest visible monster within range
    Confuse { range: i32, turns: u32 },
}

/// Result of applying an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectOutcome {
    Used,
    Cancelled,
}

impl GameState {
    /// Finds the nearest fighter other than the player that is inside the
    /// FOV and strictly closer than `range + 1`.
    pub fn closest_monster(&self, range: i32) -> Option<EntityId> {
        let origin = self.entity(self.player_id())?.position;
        let mut closest: Option<(EntityId, f64)> = None;
        let limit = f64::from(range + 1);

        for entity in &self.entities {
            if entity.id == self.player_id() || entity.fighter.is_none() || !self.is_in_fov(entity.position) {
                continue;
            }
            let distance = origin.distance_to(entity.position);
            let best = closest.map(|(_, d)| d).unwrap_or(limit);
            if distance < best {
                closest = Some((entity.id, distance));
            }
        }

        closest.map(|(id, _)| id)
    }

    /// Applies an effect on behalf of the player.
    pub fn apply_effect(&mut self, effect: &ItemEffect) -> DelveResult<EffectOutcome> {
        match *effect {
            ItemEffect::Heal { amount } => self.cast_heal(amount),
            ItemEffect::Bolt { damage, range } => self.cast_bolt(damage, range),
            ItemEffect::Fireball { damage, range, radius } => self.cast_fireball(damage, range, radius),
            ItemEffect::Confuse { range, turns } => self.cast_confuse(range, turns),
        }
    }

    fn cast_heal(&mut self, amount: i32) -> DelveResult<EffectOutcome> {
        let player_id = self.player_id();
        let max_hp = self.max_hp(player_id);
        let player = self.player_mut()?;
        let Some(fighter) = player.fighter.as_mut() else {
            return Ok(EffectOutcome::Cancelled);
        };

        if fighter.hp >= max_hp {
            self.message("You are already at full health.", Rgb::RED);
            return Ok(EffectOutcome::Cancelled);
        }

        fighter.heal(amount, max_hp);
        self.message("Your wounds start to feel better!", Rgb::LIGHT_VIOLET);
        Ok(EffectOutcome::Used)
    }

    fn cast_bolt(&mut self, damage: i32, range: i32) -> DelveResult<EffectOutcome> {
        let Some(target) = self.closest_monster(range) else {
            self.message("No enemy is close enough to strike.", Rgb::RED);
            return Ok(EffectOutcome::Cancelled);
        };

        let name = self.name_of(target);
        self.message(
            format!(
                "A lightning bolt strikes the {} with a loud thunder! The damage is {} hit points.",
                name, damage
            ),
            Rgb::LIGHT_BLUE,
        );
        self.damage_entity(target, damage)?;
        Ok(EffectOutcome::Used)
    }

    fn cast_fireball(&mut self, damage: i32, range: i32, radius: i32) -> DelveResult<EffectOutcome> {
        let Some(center_id) = self.closest_monster(range) else {
            self.message("No enemy is close enough to target.", Rgb::RED);
            return Ok(EffectOutcome::Cancelled);
        };
        let Some(center) = self.entity(center_id).map(|e| e.position) else {
            return Ok(EffectOutcome::Cancelled);
        };

        self.message(
            format!("The fireball explodes, burning everything within {} tiles!", radius),
            Rgb::ORANGE,
        );

        let player_id = self.player_id();
        let victims: Vec<EntityId> = self
            .entities
            .iter()
            .filter(|e| {
                e.id != player_id && e.fighter.is_some() && e.position.distance_to(center) <= f64::from(radius)
            })
            .map(|e| e.id)
            .collect();

        for id in victims {
            let name = self.name_of(id);
            self.message(format!("The {} gets burned for {} hit points.", name, damage), Rgb::ORANGE);
            self.damage_entity(id, damage)?;
        }
        Ok(EffectOutcome::Used)
    }

    fn cast_confuse(&mut self, range: i32, turns: u32) -> DelveResult<EffectOutcome> {
        let Some(target) = self.closest_monster(range) else {
            self.message("No enemy is close enough to confuse.", Rgb::RED);
            return Ok(EffectOutcome::Cancelled);
        };

        let name = self.name_of(target);
        if let Some(entity) = self.entity_mut(target) {
            let previous = entity.ai.take().unwrap_or(Ai::Basic);
            entity.ai = Some(Ai::confused(previous, turns));
        }
        self.message(
            format!("The eyes of the {} look vacant, as it starts to stumble around!", name),
            Rgb::LIGHT_GREEN,
        );
        Ok(EffectOutcome::Used)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Position;
    use crate::generation::MonsterKind;
    use crate::testing::open_room_state;

    #[test]
    fn test_heal_cancelled_at_full_health() {
        let mut state = open_room_state(Position::new(5, 5));
        let outcome = state.apply_effect(&ItemEffect::Heal { amount: 40 }).unwrap();
        assert_eq!(outcome, EffectOutcome::Cancelled);
        assert!(state.messages.contains("already at full health"));
    }

    #[test]
    fn test_bolt_needs_a_visible_target() {
        let mut state = open_room_state(Position::new(5, 5));
        let effect = ItemEffect::Bolt { damage: 40, range: 5 };
        assert_eq!(state.apply_effect(&effect).unwrap(), EffectOutcome::Cancelled);

        // Too far away: distance 6 is not inside range 5
        let far = state.spawn_monster(MonsterKind::Troll, Position::new(11, 5));
        assert_eq!(state.apply_effect(&effect).unwrap(), EffectOutcome::Cancelled);

        let near = state.spawn_monster(MonsterKind::Troll, Position::new(9, 5));
        assert_eq!(state.apply_effect(&effect).unwrap(), EffectOutcome::Used);
        assert_eq!(state.entity(near).unwrap().fighter.as_ref().map(|f| f.hp), None);
        assert_eq!(state.entity(far).unwrap().fighter.as_ref().unwrap().hp, 30);
    }

    #[test]
    fn test_fireball_hits_everything_near_the_target() {
        let mut state = open_room_state(Position::new(5, 5));
        let target = state.spawn_monster(MonsterKind::Ogre, Position::new(10, 5));
        let neighbour = state.spawn_monster(MonsterKind::Ogre, Position::new(12, 6));
        let outside = state.spawn_monster(MonsterKind::Ogre, Position::new(14, 5));

        let effect = ItemEffect::Fireball { damage: 25, range: 8, radius: 3 };
        assert_eq!(state.apply_effect(&effect).unwrap(), EffectOutcome::Used);

        let hp = |state: &GameState, id| state.entity(id).unwrap().fighter.as_ref().unwrap().hp;
        assert_eq!(hp(&state, target), 75);
        assert_eq!(hp(&state, neighbour), 75);
        assert_eq!(hp(&state, outside), 100);
        let player_id = state.player_id();
        assert_eq!(state.entity(player_id).unwrap().fighter.as_ref().unwrap().hp, 100);
    }

    #[test]
    fn test_confuse_wraps_previous_ai() {
        let mut state = open_room_state(Position::new(5, 5));
        let orc = state.spawn_monster(MonsterKind::Orc, Position::new(8, 8));
        let effect = ItemEffect::Confuse { range: 8, turns: 10 };

        assert_eq!(state.apply_effect(&effect).unwrap(), EffectOutcome::Used);
        assert_eq!(
            state.entity(orc).unwrap().ai,
            Some(Ai::Confused {
                previous: Box::new(Ai::Basic),
                remaining_turns: 10
            })
        );
    }

    #[test]
    fn test_closest_monster_prefers_nearer() {
        let mut state = open_room_state(Position::new(5, 5));
        let _far = state.spawn_monster(MonsterKind::Goblin, Position::new(10, 10));
        let near = state.spawn_monster(MonsterKind::Goblin, Position::new(7, 6));
        assert_eq!(state.closest_monster(10), Some(near));
        assert_eq!(state.closest_monster(1), None);
    }
}
