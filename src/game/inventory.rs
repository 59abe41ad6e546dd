//! # Inventory
//!
//! The player's carried items, equipment slots, and the pick-up, drop, use
//! and equip operations.

use super::{ActionOutcome, EffectOutcome, Entity, Equipment, EquipmentSlot, GameState, Menu, Rgb};
use crate::config;
use crate::{DelveError, DelveResult};
use serde::{Deserialize, Serialize};

/// Items carried by the player, in pick-up order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Entity>,
    capacity: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(config::INVENTORY_CAPACITY)
    }
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
        }
    }

    /// Restores an inventory from saved items.
    pub fn from_items(items: Vec<Entity>) -> Self {
        Self {
            items,
            capacity: config::INVENTORY_CAPACITY,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn items(&self) -> &[Entity] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&Entity> {
        self.items.get(index)
    }

    /// Adds an item, handing it back if the inventory is full.
    pub fn try_add(&mut self, item: Entity) -> Result<usize, Entity> {
        if self.is_full() {
            return Err(item);
        }
        self.items.push(item);
        Ok(self.items.len() - 1)
    }

    pub fn remove(&mut self, index: usize) -> Option<Entity> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Index of the item currently equipped in `slot`.
    pub fn equipped_in_slot(&self, slot: EquipmentSlot) -> Option<usize> {
        self.items.iter().position(|item| {
            item.equipment
                .as_ref()
                .map(|e| e.equipped && e.slot == slot)
                .unwrap_or(false)
        })
    }

    /// Every equipped item's equipment record.
    pub fn equipped(&self) -> impl Iterator<Item = &Equipment> {
        self.items
            .iter()
            .filter_map(|item| item.equipment.as_ref())
            .filter(|equipment| equipment.equipped)
    }

    /// Sums one bonus over everything equipped.
    pub fn bonus(&self, pick: impl Fn(&Equipment) -> i32) -> i32 {
        self.equipped().map(pick).sum()
    }

    /// Display names, marking equipped items with their slot.
    pub fn option_names(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|item| match &item.equipment {
                Some(equipment) if equipment.equipped => format!("{} (on {})", item.name, equipment.slot),
                _ => item.name.clone(),
            })
            .collect()
    }
}

impl GameState {
    /// Picks up the first item lying on the player's tile.
    pub fn pick_up(&mut self) -> DelveResult<ActionOutcome> {
        let player_id = self.player_id();
        let position = self.player()?.position;
        let Some(index) = self
            .entities
            .iter()
            .position(|e| e.id != player_id && e.item.is_some() && e.position == position)
        else {
            self.message("There is nothing here to pick up.", Rgb::LIGHT_GRAY);
            return Ok(ActionOutcome::NoTurn);
        };

        if self.inventory.is_full() {
            let name = self.entities[index].name.clone();
            self.message(format!("Your inventory is full, cannot pick up {}.", name), Rgb::RED);
            return Ok(ActionOutcome::NoTurn);
        }

        let item = self.entities.remove(index);
        let name = item.name.clone();
        let free_slot = item
            .equipment
            .as_ref()
            .map(|e| self.inventory.equipped_in_slot(e.slot).is_none())
            .unwrap_or(false);

        let slot_index = self
            .inventory
            .try_add(item)
            .map_err(|_| DelveError::InvalidState("Inventory filled up during pick-up".to_string()))?;
        self.message(format!("You picked up a {}!", name), Rgb::GREEN);

        if free_slot {
            self.equip(slot_index)?;
        }
        Ok(ActionOutcome::TookTurn)
    }

    /// Drops a carried item onto the player's tile, taking it off first.
    pub fn drop_item(&mut self, index: usize) -> DelveResult<ActionOutcome> {
        if self.inventory.get(index).is_none() {
            self.message("You don't have that item.", Rgb::LIGHT_GRAY);
            return Ok(ActionOutcome::NoTurn);
        }

        self.dequip(index)?;
        let position = self.player()?.position;
        let Some(mut item) = self.inventory.remove(index) else {
            return Ok(ActionOutcome::NoTurn);
        };
        item.position = position;
        let name = item.name.clone();
        self.entities.push(item);
        self.message(format!("You dropped a {}.", name), Rgb::YELLOW);
        Ok(ActionOutcome::TookTurn)
    }

    /// Uses a carried item.
    ///
    /// Equipment is toggled on or off and stays in the inventory. Consumables
    /// are applied and destroyed, unless their effect was cancelled.
    pub fn use_item(&mut self, index: usize) -> DelveResult<ActionOutcome> {
        let Some(item) = self.inventory.get(index) else {
            self.message("You don't have that item.", Rgb::LIGHT_GRAY);
            return Ok(ActionOutcome::NoTurn);
        };

        if item.equipment.is_some() {
            self.toggle_equip(index)?;
            return Ok(ActionOutcome::TookTurn);
        }

        let name = item.name.clone();
        let Some(effect) = item.item.as_ref().and_then(|i| i.effect.clone()) else {
            self.message(format!("The {} cannot be used.", name), Rgb::LIGHT_GRAY);
            return Ok(ActionOutcome::NoTurn);
        };

        match self.apply_effect(&effect)? {
            EffectOutcome::Used => {
                self.inventory.remove(index);
                Ok(ActionOutcome::TookTurn)
            }
            EffectOutcome::Cancelled => Ok(ActionOutcome::NoTurn),
        }
    }

    /// Equips or unequips a carried item.
    pub fn toggle_equip(&mut self, index: usize) -> DelveResult<()> {
        let equipped = self.inventory.get(index).map(Entity::is_equipped).unwrap_or(false);
        if equipped {
            self.dequip(index)
        } else {
            self.equip(index)
        }
    }

    /// Equips a carried item, taking off whatever occupies its slot.
    pub fn equip(&mut self, index: usize) -> DelveResult<()> {
        let slot = self
            .inventory
            .get(index)
            .and_then(|item| item.equipment.as_ref())
            .map(|e| e.slot)
            .ok_or_else(|| DelveError::InvalidAction(format!("Item {} cannot be equipped", index)))?;

        if let Some(current) = self.inventory.equipped_in_slot(slot) {
            if current == index {
                return Ok(());
            }
            self.dequip(current)?;
        }

        let item = &mut self.inventory.items[index];
        if let Some(equipment) = item.equipment.as_mut() {
            equipment.equipped = true;
        }
        let name = item.name.clone();
        self.message(format!("Equipped {} on {}.", name, slot), Rgb::LIGHT_GREEN);
        Ok(())
    }

    /// Takes off a carried item. Items that are not worn are left alone.
    pub fn dequip(&mut self, index: usize) -> DelveResult<()> {
        let Some(item) = self.inventory.items.get_mut(index) else {
            return Err(DelveError::InvalidAction(format!("No item at inventory slot {}", index)));
        };
        let Some(equipment) = item.equipment.as_mut().filter(|e| e.equipped) else {
            return Ok(());
        };

        equipment.equipped = false;
        let slot = equipment.slot;
        let name = item.name.clone();
        self.message(format!("Dequipped {} from {}.", name, slot), Rgb::LIGHT_YELLOW);

        // Keep hit points within the lowered maximum
        let player_id = self.player_id();
        let max_hp = self.max_hp(player_id);
        if let Some(fighter) = self.player_mut()?.fighter.as_mut() {
            fighter.hp = fighter.hp.min(max_hp);
        }
        Ok(())
    }

    /// Builds the inventory menu. An empty inventory shows a single
    /// placeholder line that cannot be chosen.
    pub fn inventory_menu(&self, header: &str) -> DelveResult<Menu> {
        if self.inventory.is_empty() {
            return Menu::new(header, vec!["Inventory is empty.".to_string()]);
        }
        Menu::new(header, self.inventory.option_names())
    }

    /// Maps a menu choice to an inventory index.
    pub fn inventory_choice(&self, choice: Option<usize>) -> Option<usize> {
        choice.filter(|index| *index < self.inventory.len())
    }
}
