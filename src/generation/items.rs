//! # Item Generation
//!
//! Consumable and equipment presets and their depth-scaled spawn weights.

use super::DepthTable;
use crate::config;
use crate::game::{Entity, EntityId, Equipment, EquipmentSlot, Item, ItemEffect, Position, Rgb};
use serde::{Deserialize, Serialize};

/// Every item that can be spawned on a floor, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    HealingPotion,
    LightningScroll,
    ThunderScroll,
    FireballScroll,
    ConfusionScroll,
    LeatherGloves,
    GoldRing,
    PaddedCloak,
    ChainShirt,
}

impl ItemKind {
    pub const ALL: [ItemKind; 9] = [
        ItemKind::HealingPotion,
        ItemKind::LightningScroll,
        ItemKind::ThunderScroll,
        ItemKind::FireballScroll,
        ItemKind::ConfusionScroll,
        ItemKind::LeatherGloves,
        ItemKind::GoldRing,
        ItemKind::PaddedCloak,
        ItemKind::ChainShirt,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ItemKind::HealingPotion => "healing potion",
            ItemKind::LightningScroll => "scroll of lightning",
            ItemKind::ThunderScroll => "scroll of thunder",
            ItemKind::FireballScroll => "scroll of fireball",
            ItemKind::ConfusionScroll => "scroll of confusion",
            ItemKind::LeatherGloves => "leather gloves",
            ItemKind::GoldRing => "gold ring",
            ItemKind::PaddedCloak => "padded cloak",
            ItemKind::ChainShirt => "chain shirt",
        }
    }

    /// Spawn weight by depth.
    pub fn weights(self) -> DepthTable {
        match self {
            ItemKind::HealingPotion => DepthTable::flat(35),
            ItemKind::LightningScroll => DepthTable(vec![(25, 4), (50, 10)]),
            ItemKind::ThunderScroll => DepthTable(vec![(40, 8)]),
            ItemKind::FireballScroll => DepthTable(vec![(25, 6)]),
            ItemKind::ConfusionScroll => DepthTable(vec![(10, 2)]),
            ItemKind::LeatherGloves => DepthTable(vec![(10, 4)]),
            ItemKind::GoldRing => DepthTable(vec![(15, 10)]),
            ItemKind::PaddedCloak => DepthTable(vec![(10, 5)]),
            ItemKind::ChainShirt => DepthTable(vec![(15, 8)]),
        }
    }

    /// What using the item does, for consumables.
    pub fn effect(self) -> Option<ItemEffect> {
        match self {
            ItemKind::HealingPotion => Some(ItemEffect::Heal {
                amount: config::HEAL_AMOUNT,
            }),
            ItemKind::LightningScroll => Some(ItemEffect::Bolt {
                damage: config::LIGHTNING_DAMAGE,
                range: config::LIGHTNING_RANGE,
            }),
            ItemKind::ThunderScroll => Some(ItemEffect::Bolt {
                damage: config::THUNDER_DAMAGE,
                range: config::THUNDER_RANGE,
            }),
            ItemKind::FireballScroll => Some(ItemEffect::Fireball {
                damage: config::FIREBALL_DAMAGE,
                range: config::FIREBALL_RANGE,
                radius: config::FIREBALL_RADIUS,
            }),
            ItemKind::ConfusionScroll => Some(ItemEffect::Confuse {
                range: config::CONFUSE_RANGE,
                turns: config::CONFUSE_NUM_TURNS,
            }),
            _ => None,
        }
    }

    /// Slot and bonuses, for wearables.
    pub fn equipment(self) -> Option<Equipment> {
        match self {
            ItemKind::LeatherGloves => Some(Equipment::new(EquipmentSlot::Accessories, 5, 1, 10)),
            ItemKind::GoldRing => Some(Equipment::new(EquipmentSlot::Accessories, 8, 2, 20)),
            ItemKind::PaddedCloak => Some(Equipment::new(EquipmentSlot::Clothes, 1, 3, 30)),
            ItemKind::ChainShirt => Some(Equipment::new(EquipmentSlot::Clothes, 2, 4, 50)),
            _ => None,
        }
    }

    fn appearance(self) -> (char, Rgb) {
        match self {
            ItemKind::HealingPotion => ('!', Rgb::VIOLET),
            ItemKind::LightningScroll
            | ItemKind::ThunderScroll
            | ItemKind::FireballScroll
            | ItemKind::ConfusionScroll => ('#', Rgb::LIGHT_YELLOW),
            ItemKind::LeatherGloves | ItemKind::GoldRing => ('/', Rgb::SKY),
            ItemKind::PaddedCloak | ItemKind::ChainShirt => ('[', Rgb::DARKER_ORANGE),
        }
    }

    /// Builds the item entity, visible once its tile has been explored.
    pub fn spawn(self, id: EntityId, position: Position) -> Entity {
        let (glyph, color) = self.appearance();
        let entity = Entity::new(id, position, glyph, self.name(), color).always_visible();
        match self.equipment() {
            Some(equipment) => entity.with_equipment(equipment),
            None => entity.with_item(Item::new(self.effect())),
        }
    }
}

/// Item kinds paired with their weight tables, in declared order.
pub fn item_chances() -> Vec<(ItemKind, DepthTable)> {
    ItemKind::ALL.iter().map(|kind| (*kind, kind.weights())).collect()
}

/// Upper bound on items rolled per room.
pub fn max_items_per_room() -> DepthTable {
    DepthTable(vec![(1, 1), (2, 4), (3, 8)])
}

/// The ring every new character starts with, already equipped.
pub fn starting_ring(id: EntityId) -> Entity {
    let mut equipment = Equipment::new(EquipmentSlot::Accessories, 2, 0, 0);
    equipment.equipped = true;
    Entity::new(id, Position::new(0, 0), '/', "copper ring", Rgb::SKY)
        .always_visible()
        .with_equipment(equipment)
}
