//! # Encounter Generation
//!
//! Monster presets and their depth-scaled spawn weights.

use super::DepthTable;
use crate::game::{Ai, DeathPolicy, Entity, EntityId, Fighter, Position, Rgb};
use serde::{Deserialize, Serialize};

/// Every monster that can be spawned, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    Goblin,
    Kobold,
    Orc,
    Bandit,
    Troll,
    Ogre,
    Golem,
    Dragon,
}

/// Fixed combat preset for a monster kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonsterStats {
    pub hp: i32,
    pub defense: i32,
    pub power: i32,
    pub xp: i32,
}

const COMMON: &[(u32, u32)] = &[(120, 1), (80, 2), (50, 3), (40, 10)];
const SOLDIER: &[(u32, u32)] = &[(100, 1), (90, 2), (80, 3), (50, 10)];
const BRUTE: &[(u32, u32)] = &[(10, 1), (20, 2), (30, 3), (40, 4), (50, 5), (80, 6), (100, 8), (70, 10)];
const GIANT: &[(u32, u32)] = &[
    (1, 1),
    (2, 2),
    (3, 3),
    (4, 4),
    (5, 5),
    (8, 6),
    (10, 8),
    (30, 10),
    (50, 12),
    (100, 15),
    (200, 20),
];
const WYRM: &[(u32, u32)] = &[(1, 10), (20, 15), (50, 20), (500, 50)];

impl MonsterKind {
    pub const ALL: [MonsterKind; 8] = [
        MonsterKind::Goblin,
        MonsterKind::Kobold,
        MonsterKind::Orc,
        MonsterKind::Bandit,
        MonsterKind::Troll,
        MonsterKind::Ogre,
        MonsterKind::Golem,
        MonsterKind::Dragon,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MonsterKind::Goblin => "goblin",
            MonsterKind::Kobold => "kobold",
            MonsterKind::Orc => "orc",
            MonsterKind::Bandit => "bandit",
            MonsterKind::Troll => "troll",
            MonsterKind::Ogre => "ogre",
            MonsterKind::Golem => "golem",
            MonsterKind::Dragon => "dragon",
        }
    }

    pub fn glyph(self) -> char {
        match self {
            MonsterKind::Goblin => 'g',
            MonsterKind::Kobold => 'k',
            MonsterKind::Orc => 'o',
            MonsterKind::Bandit => 'b',
            MonsterKind::Troll => 'T',
            MonsterKind::Ogre => 'O',
            MonsterKind::Golem => 'G',
            MonsterKind::Dragon => 'D',
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            MonsterKind::Goblin | MonsterKind::Kobold => Rgb::DESATURATED_GREEN,
            MonsterKind::Orc => Rgb::DARK_GREEN,
            MonsterKind::Bandit => Rgb::LIGHT_GRAY,
            MonsterKind::Troll => Rgb::GREEN,
            MonsterKind::Ogre => Rgb::ORANGE,
            MonsterKind::Golem => Rgb::LIGHT_BLUE,
            MonsterKind::Dragon => Rgb::RED,
        }
    }

    pub fn stats(self) -> MonsterStats {
        let (hp, defense, power, xp) = match self {
            MonsterKind::Goblin => (12, 1, 4, 15),
            MonsterKind::Kobold => (15, 1, 1, 10),
            MonsterKind::Orc => (20, 1, 4, 35),
            MonsterKind::Bandit => (20, 2, 2, 45),
            MonsterKind::Troll => (30, 5, 10, 100),
            MonsterKind::Ogre => (100, 10, 20, 250),
            MonsterKind::Golem => (80, 22, 10, 250),
            MonsterKind::Dragon => (300, 12, 50, 5000),
        };
        MonsterStats { hp, defense, power, xp }
    }

    /// Spawn weight by depth.
    pub fn weights(self) -> DepthTable {
        let steps = match self {
            MonsterKind::Goblin | MonsterKind::Kobold => COMMON,
            MonsterKind::Orc | MonsterKind::Bandit => SOLDIER,
            MonsterKind::Troll => BRUTE,
            MonsterKind::Ogre | MonsterKind::Golem => GIANT,
            MonsterKind::Dragon => WYRM,
        };
        DepthTable::from(steps)
    }

    /// Builds a blocking, hostile entity of this kind.
    pub fn spawn(self, id: EntityId, position: Position) -> Entity {
        let stats = self.stats();
        Entity::new(id, position, self.glyph(), self.name(), self.color())
            .blocking()
            .with_fighter(Fighter::new(stats.hp, stats.defense, stats.power, stats.xp, DeathPolicy::Monster))
            .with_ai(Ai::Basic)
    }
}

/// Monster kinds paired with their weight tables, in declared order.
pub fn monster_chances() -> Vec<(MonsterKind, DepthTable)> {
    MonsterKind::ALL.iter().map(|kind| (*kind, kind.weights())).collect()
}

/// Upper bound on monsters rolled per room.
pub fn max_monsters_per_room() -> DepthTable {
    DepthTable(vec![(2, 1), (3, 4), (5, 6)])
}
