//! # Combat
//!
//! Damage rolls, damage application and death handling.

use super::{DeathPolicy, EntityId, GameState, GameStatus, Rgb};
use crate::utils::capitalize;
use crate::{DelveError, DelveResult};
use log::info;
use rand::Rng;

/// Rolls attack damage.
///
/// `damage = d(0..=2) * (1 + 2*power / (1 + defense)) + d(0..=6)` with integer
/// division, so the result is never negative.
///
/// # Examples
///
/// ```
/// use delve::roll_damage;
/// use rand::rngs::mock::StepRng;
///
/// // Both dice come up zero
/// let mut rng = StepRng::new(0, 0);
/// assert_eq!(roll_damage(4, 1, &mut rng), 0);
/// ```
pub fn roll_damage<R: Rng + ?Sized>(power: i32, defense: i32, rng: &mut R) -> i32 {
    let multiplier = rng.gen_range(0..=2);
    let bonus = rng.gen_range(0..=6);
    let scale = 1 + (2 * power) / (1 + defense).max(1);
    (multiplier * scale + bonus).max(0)
}

impl GameState {
    /// Rolls and applies an attack from one fighter to another.
    ///
    /// Returns the damage dealt.
    pub fn attack(&mut self, attacker: EntityId, target: EntityId) -> DelveResult<i32> {
        let power = self.power(attacker);
        let defense = self.defense(target);
        let damage = roll_damage(power, defense, &mut self.rng);
        self.apply_attack(attacker, target, damage)?;
        Ok(damage)
    }

    /// Narrates an attack and applies an already rolled amount of damage.
    pub fn apply_attack(&mut self, attacker: EntityId, target: EntityId, damage: i32) -> DelveResult<()> {
        let attacker_name = capitalize(&self.name_of(attacker));
        let target_name = self.name_of(target);

        if damage > 0 {
            self.message(
                format!("{} attacks {} for {} hit points.", attacker_name, target_name, damage),
                Rgb::WHITE,
            );
            self.damage_entity(target, damage)
        } else {
            self.message(
                format!("{} attacks {} but it has no effect!", attacker_name, target_name),
                Rgb::WHITE,
            );
            Ok(())
        }
    }

    /// Applies damage to an entity's fighter and fires its death policy on
    /// the killing blow.
    ///
    /// Entities without a fighter are ignored. When anything other than the
    /// player dies, its experience goes to the player.
    pub fn damage_entity(&mut self, id: EntityId, amount: i32) -> DelveResult<()> {
        let index = self
            .index_of(id)
            .ok_or_else(|| DelveError::InvalidState(format!("Entity {} does not exist", id)))?;

        let (policy, xp) = match self.entities[index].fighter.as_mut() {
            Some(fighter) => (fighter.take_damage(amount), fighter.xp),
            None => return Ok(()),
        };

        let Some(policy) = policy else {
            return Ok(());
        };

        match policy {
            DeathPolicy::Player => {
                let player = &mut self.entities[index];
                player.glyph = '%';
                player.color = Rgb::DARK_RED;
                self.status = GameStatus::Dead;
                self.message("You died!", Rgb::RED);
                info!("Player died on depth {}", self.depth);
            }
            DeathPolicy::Monster => {
                let name = capitalize(&self.entities[index].name);
                self.entities[index].into_remains();
                self.message(
                    format!("{} is dead! You gain {} experience points.", name, xp),
                    Rgb::ORANGE,
                );
            }
            DeathPolicy::Inert => {}
        }

        if id != self.player_id() {
            if let Some(fighter) = self.player_mut()?.fighter.as_mut() {
                fighter.xp += xp;
            }
        }
        Ok(())
    }
}
