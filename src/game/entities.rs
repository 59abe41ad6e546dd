//! # Entity Module
//!
//! The universal game-object record and its optional capability components.
//!
//! Every object on the map (the player, monsters, items, stairs, remains) is an
//! [`Entity`]. Behaviour comes from the capabilities it carries rather than from
//! its type: a [`Fighter`] can take and deal damage, an [`Ai`] takes monster
//! turns, an [`Item`] can be picked up and used, and [`Equipment`] can be worn.

use super::{Ai, EntityId, ItemEffect, Position, Rgb};
use serde::{Deserialize, Serialize};

/// What happens when a fighter's hit points reach zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathPolicy {
    /// Nothing further happens; also the state after a policy has fired
    Inert,
    /// The session ends in the `Dead` state
    Player,
    /// The entity becomes non-blocking remains
    Monster,
}

/// Combat capability: hit points, attack and defence.
///
/// The stored values are base values. Effective values add equipment bonuses
/// and are computed by the session, since only the session knows what the
/// owner has equipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fighter {
    pub base_max_hp: i32,
    pub hp: i32,
    pub base_defense: i32,
    pub base_power: i32,
    /// Experience carried (player) or awarded on death (monsters)
    pub xp: i32,
    pub death: DeathPolicy,
}

impl Fighter {
    /// Creates a fighter at full health.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{DeathPolicy, Fighter};
    ///
    /// let fighter = Fighter::new(30, 2, 5, 35, DeathPolicy::Monster);
    /// assert_eq!(fighter.hp, 30);
    /// assert!(fighter.is_alive());
    /// ```
    pub fn new(hp: i32, defense: i32, power: i32, xp: i32, death: DeathPolicy) -> Self {
        Self {
            base_max_hp: hp,
            hp,
            base_defense: defense,
            base_power: power,
            xp,
            death,
        }
    }

    /// Returns true while hit points remain.
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Applies damage and reports the death policy if this blow was fatal.
    ///
    /// The policy is handed out at most once: it is swapped for
    /// [`DeathPolicy::Inert`] as it fires, and further damage to a fighter
    /// already at zero hit points does nothing.
    pub fn take_damage(&mut self, amount: i32) -> Option<DeathPolicy> {
        if amount <= 0 || !self.is_alive() {
            return None;
        }

        self.hp = (self.hp - amount).max(0);
        if self.is_alive() {
            None
        } else {
            Some(std::mem::replace(&mut self.death, DeathPolicy::Inert))
        }
    }

    /// Restores hit points without exceeding `max_hp`.
    pub fn heal(&mut self, amount: i32, max_hp: i32) {
        self.hp = (self.hp + amount).min(max_hp);
    }
}

/// Capability for objects that can be carried in the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// What using the item does; `None` for items with no use of their own
    pub effect: Option<ItemEffect>,
}

impl Item {
    pub fn new(effect: Option<ItemEffect>) -> Self {
        Self { effect }
    }
}

/// Equipment slot. Each slot holds at most one equipped item; different
/// slots never conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Accessories,
    Clothes,
}

impl std::fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EquipmentSlot::Accessories => write!(f, "accessories"),
            EquipmentSlot::Clothes => write!(f, "clothes"),
        }
    }
}

/// Capability for wearable items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub slot: EquipmentSlot,
    pub power_bonus: i32,
    pub defense_bonus: i32,
    pub max_hp_bonus: i32,
    pub equipped: bool,
}

impl Equipment {
    /// Creates unequipped equipment for the given slot.
    pub fn new(slot: EquipmentSlot, power_bonus: i32, defense_bonus: i32, max_hp_bonus: i32) -> Self {
        Self {
            slot,
            power_bonus,
            defense_bonus,
            max_hp_bonus,
            equipped: false,
        }
    }
}

/// Draw layer. Lower layers are drawn first so that actors appear on top
/// of items and remains sharing their tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RenderLayer {
    Remains,
    Floor,
    Actor,
}

/// A game object: position, appearance and optional capabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub position: Position,
    pub glyph: char,
    pub name: String,
    pub color: Rgb,
    /// Whether the entity blocks movement into its tile
    pub blocks: bool,
    /// Whether the entity stays drawn on explored tiles outside the FOV
    pub always_visible: bool,
    pub layer: RenderLayer,
    /// Character level; only meaningful for the player
    #[serde(default = "default_level")]
    pub level: u32,
    pub fighter: Option<Fighter>,
    pub ai: Option<Ai>,
    pub item: Option<Item>,
    pub equipment: Option<Equipment>,
}

fn default_level() -> u32 {
    1
}

impl Entity {
    /// Creates a bare, non-blocking entity with no capabilities.
    pub fn new(id: EntityId, position: Position, glyph: char, name: impl Into<String>, color: Rgb) -> Self {
        Self {
            id,
            position,
            glyph,
            name: name.into(),
            color,
            blocks: false,
            always_visible: false,
            layer: RenderLayer::Floor,
            level: 1,
            fighter: None,
            ai: None,
            item: None,
            equipment: None,
        }
    }

    /// Makes the entity block movement and draws it on the actor layer.
    pub fn blocking(mut self) -> Self {
        self.blocks = true;
        self.layer = RenderLayer::Actor;
        self
    }

    /// Keeps the entity drawn on explored tiles outside the FOV.
    pub fn always_visible(mut self) -> Self {
        self.always_visible = true;
        self
    }

    pub fn with_fighter(mut self, fighter: Fighter) -> Self {
        self.fighter = Some(fighter);
        self
    }

    pub fn with_ai(mut self, ai: Ai) -> Self {
        self.ai = Some(ai);
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.item = Some(item);
        self
    }

    /// Attaches equipment. Equipment is always carried, so an empty item
    /// capability is added when none is present.
    pub fn with_equipment(mut self, equipment: Equipment) -> Self {
        self.equipment = Some(equipment);
        if self.item.is_none() {
            self.item = Some(Item::new(None));
        }
        self
    }

    /// Returns true if the entity has a living fighter capability.
    pub fn is_alive(&self) -> bool {
        self.fighter.as_ref().map(Fighter::is_alive).unwrap_or(false)
    }

    /// Returns true if the entity is equipment that is currently worn.
    pub fn is_equipped(&self) -> bool {
        self.equipment.as_ref().map(|e| e.equipped).unwrap_or(false)
    }

    /// Turns the entity into inert remains: no blocking, fighting or thinking.
    pub fn into_remains(&mut self) {
        self.glyph = '%';
        self.color = Rgb::DARK_RED;
        self.blocks = false;
        self.fighter = None;
        self.ai = None;
        self.layer = RenderLayer::Remains;
        self.name = format!("remains of {}", self.name);
    }
}

/// Hands out fresh entity handles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an allocator that continues after the highest handle seen.
    pub fn after<'a>(ids: impl IntoIterator<Item = &'a EntityId>) -> Self {
        let next = ids.into_iter().map(|id| id.0 + 1).max().unwrap_or(0);
        Self { next }
    }

    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fighter_damage_and_death_fires_once() {
        let mut fighter = Fighter::new(10, 0, 3, 20, DeathPolicy::Monster);

        assert_eq!(fighter.take_damage(4), None);
        assert_eq!(fighter.hp, 6);

        assert_eq!(fighter.take_damage(50), Some(DeathPolicy::Monster));
        assert_eq!(fighter.hp, 0);
        assert_eq!(fighter.death, DeathPolicy::Inert);

        // Repeated blows after death have no further effect
        assert_eq!(fighter.take_damage(5), None);
        assert_eq!(fighter.take_damage(500), None);
        assert_eq!(fighter.hp, 0);
    }

    #[test]
    fn test_fighter_ignores_non_positive_damage() {
        let mut fighter = Fighter::new(10, 0, 3, 20, DeathPolicy::Player);
        assert_eq!(fighter.take_damage(0), None);
        assert_eq!(fighter.take_damage(-3), None);
        assert_eq!(fighter.hp, 10);
    }

    #[test]
    fn test_heal_clamps_to_max() {
        let mut fighter = Fighter::new(40, 0, 1, 0, DeathPolicy::Player);
        fighter.hp = 5;
        fighter.heal(40, 40);
        assert_eq!(fighter.hp, 40);

        fighter.hp = 5;
        fighter.heal(10, 40);
        assert_eq!(fighter.hp, 15);
    }

    #[test]
    fn test_equipment_adds_item_capability() {
        let entity = Entity::new(EntityId(3), Position::new(1, 1), '/', "ring", Rgb::SKY)
            .with_equipment(Equipment::new(EquipmentSlot::Accessories, 2, 0, 0));
        assert!(entity.item.is_some());
        assert!(entity.equipment.is_some());
        assert!(!entity.is_equipped());
    }

    #[test]
    fn test_into_remains() {
        let mut monster = Entity::new(EntityId(1), Position::new(2, 2), 'o', "orc", Rgb::DESATURATED_GREEN)
            .blocking()
            .with_fighter(Fighter::new(10, 0, 3, 35, DeathPolicy::Monster))
            .with_ai(Ai::Basic);

        monster.into_remains();
        assert_eq!(monster.glyph, '%');
        assert_eq!(monster.name, "remains of orc");
        assert!(!monster.blocks);
        assert!(monster.fighter.is_none());
        assert!(monster.ai.is_none());
        assert_eq!(monster.layer, RenderLayer::Remains);
    }

    #[test]
    fn test_id_allocator_continues_after_existing_ids() {
        let ids = [EntityId(0), EntityId(7), EntityId(3)];
        let mut allocator = IdAllocator::after(ids.iter());
        assert_eq!(allocator.allocate(), EntityId(8));
        assert_eq!(allocator.allocate(), EntityId(9));

        let mut empty = IdAllocator::new();
        assert_eq!(empty.allocate(), EntityId(0));
    }
}
