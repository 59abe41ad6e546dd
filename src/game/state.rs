//! # Game State Module
//!
//! Central session state and the queries the frontend makes of it.
//!
//! [`GameState`] owns everything that makes up a running game: the current
//! floor's grid and entities, the player's inventory, the message log, the
//! visibility map and the single random stream every system draws from.
//! The grid, entities and stairs are rebuilt on every descent; the inventory,
//! depth and log live for the whole game.

use super::{
    DeathPolicy, Entity, EntityId, Equipment, Fighter, FovMap, Grid, IdAllocator, Inventory, Menu,
    MessageLog, Position, Rgb, TileAppearance,
};
use crate::config;
use crate::generation::{
    populate_floor, starting_ring, GenerationConfig, Generator, ItemKind, MonsterKind, RoomCorridorGenerator,
};
use crate::utils::capitalize;
use crate::{DelveError, DelveResult};
use log::info;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Runtime configuration for a game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Floor layout parameters
    pub generation: GenerationConfig,
    /// Player sight radius; zero means unlimited
    pub torch_radius: i32,
    /// Whether walls at the edge of sight are revealed
    pub light_walls: bool,
    /// Level-up threshold is `level_up_base + level * level_up_factor`
    pub level_up_base: i32,
    pub level_up_factor: i32,
    /// Message log line width in characters
    pub message_width: usize,
    /// Message log length in lines
    pub message_height: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            generation: GenerationConfig::default(),
            torch_radius: config::TORCH_RADIUS,
            light_walls: config::FOV_LIGHT_WALLS,
            level_up_base: config::LEVEL_UP_BASE,
            level_up_factor: config::LEVEL_UP_FACTOR,
            message_width: config::MSG_WIDTH,
            message_height: config::MSG_HEIGHT,
        }
    }
}

impl GameConfig {
    /// Loads a configuration from a JSON file. Missing fields take their
    /// default values.
    pub fn load(path: impl AsRef<Path>) -> DelveResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: GameConfig = serde_json::from_str(&text)?;
        config.generation.validate()?;
        Ok(config)
    }
}

/// Whether the session is still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    /// Terminal; entered only through the player's death
    Dead,
}

/// Central game state for one running game.
#[derive(Debug, Clone)]
pub struct GameState {
    /// The current floor
    pub grid: Grid,
    /// Everything on the current floor; order is AI turn order
    pub entities: Vec<Entity>,
    /// Items carried by the player
    pub inventory: Inventory,
    pub messages: MessageLog,
    pub status: GameStatus,
    /// Current floor, starting at 1
    pub depth: u32,
    pub fov: FovMap,
    pub config: GameConfig,
    pub(crate) player_id: EntityId,
    pub(crate) stairs_id: EntityId,
    pub(crate) pending_level_up: bool,
    pub(crate) ids: IdAllocator,
    pub(crate) rng: StdRng,
}

impl GameState {
    /// Starts a new game on a freshly generated first floor.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{create_rng, GameConfig, GameState, GameStatus};
    ///
    /// let state = GameState::new_game(GameConfig::default(), create_rng(42)).unwrap();
    /// assert_eq!(state.depth, 1);
    /// assert_eq!(state.status, GameStatus::Playing);
    /// assert_eq!(state.inventory.len(), 1);
    /// ```
    pub fn new_game(config: GameConfig, rng: StdRng) -> DelveResult<Self> {
        let grid = Grid::new_filled(config.generation.map_width, config.generation.map_height);
        let mut state = Self::empty(grid, config, rng);
        state.build_floor()?;

        let ring = starting_ring(state.ids.allocate());
        state
            .inventory
            .try_add(ring)
            .map_err(|_| DelveError::InvalidState("New inventory has no room".to_string()))?;

        state.message(
            "Welcome, adventurer! Prepare to perish in the depths below.",
            Rgb::RED,
        );
        state.ensure_fov();
        info!("Started a new game with {} entities on the first floor", state.entities.len());
        Ok(state)
    }

    /// Creates a session on a prepared grid, with the player and stairs at
    /// the given positions and nothing else on the floor.
    pub fn with_grid(grid: Grid, player: Position, stairs: Position, config: GameConfig, rng: StdRng) -> Self {
        let mut state = Self::empty(grid, config, rng);
        if let Some(entity) = state.entities.first_mut() {
            entity.position = player;
        }
        let stairs_entity = Self::create_stairs(state.ids.allocate(), stairs);
        state.stairs_id = stairs_entity.id;
        state.entities.push(stairs_entity);
        state.ensure_fov();
        state
    }

    /// A session holding only the player.
    fn empty(grid: Grid, config: GameConfig, rng: StdRng) -> Self {
        let mut ids = IdAllocator::new();
        let player = Self::create_player(ids.allocate());
        let player_id = player.id;
        let fov = FovMap::for_grid(&grid, config.torch_radius, config.light_walls);
        let messages = MessageLog::new(config.message_height, config.message_width);

        Self {
            grid,
            entities: vec![player],
            inventory: Inventory::default(),
            messages,
            status: GameStatus::Playing,
            depth: 1,
            fov,
            config,
            player_id,
            stairs_id: player_id,
            pending_level_up: false,
            ids,
            rng,
        }
    }

    fn create_player(id: EntityId) -> Entity {
        Entity::new(id, Position::new(0, 0), '@', "player", Rgb::WHITE)
            .blocking()
            .with_fighter(Fighter::new(100, 1, 2, 0, DeathPolicy::Player))
    }

    fn create_stairs(id: EntityId, position: Position) -> Entity {
        Entity::new(id, position, '<', "stairs", Rgb::WHITE).always_visible()
    }

    /// Replaces the grid, entities and stairs with a new floor at the
    /// current depth. The player keeps its state and moves to the first room.
    fn build_floor(&mut self) -> DelveResult<()> {
        let generator = RoomCorridorGenerator::new();
        let floor = generator.generate(&self.config.generation, &mut self.rng)?;

        let mut player = self.player()?.clone();
        player.position = floor.player_start();
        self.entities = vec![player];

        populate_floor(
            &floor.rooms,
            self.depth,
            &floor.grid,
            &mut self.entities,
            &mut self.ids,
            &mut self.rng,
        );

        let stairs = Self::create_stairs(self.ids.allocate(), floor.stairs);
        self.stairs_id = stairs.id;
        self.entities.push(stairs);

        self.fov = FovMap::for_grid(&floor.grid, self.config.torch_radius, self.config.light_walls);
        self.grid = floor.grid;
        Ok(())
    }

    /// Heals the player by half their maximum and moves to a new, deeper floor.
    pub fn next_level(&mut self) -> DelveResult<()> {
        let player_id = self.player_id;
        let max_hp = self.max_hp(player_id);
        if let Some(fighter) = self.player_mut()?.fighter.as_mut() {
            fighter.heal(max_hp / 2, max_hp);
        }
        self.message("You take a moment to rest, and recover your strength.", Rgb::LIGHT_VIOLET);

        self.depth += 1;
        self.message(
            "After a rare moment of peace, you descend deeper into the heart of the dungeon...",
            Rgb::RED,
        );
        self.build_floor()?;
        self.ensure_fov();
        Ok(())
    }

    /// Places a new entity on the floor and returns its handle.
    pub fn spawn(&mut self, build: impl FnOnce(EntityId) -> Entity) -> EntityId {
        let entity = build(self.ids.allocate());
        let id = entity.id;
        self.entities.push(entity);
        id
    }

    pub fn spawn_monster(&mut self, kind: MonsterKind, position: Position) -> EntityId {
        self.spawn(|id| kind.spawn(id, position))
    }

    pub fn spawn_item(&mut self, kind: ItemKind, position: Position) -> EntityId {
        self.spawn(|id| kind.spawn(id, position))
    }

    pub fn player_id(&self) -> EntityId {
        self.player_id
    }

    pub fn stairs_id(&self) -> EntityId {
        self.stairs_id
    }

    pub fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.iter().position(|entity| entity.id == id)
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.id == id)
    }

    pub fn player(&self) -> DelveResult<&Entity> {
        self.entity(self.player_id)
            .ok_or_else(|| DelveError::InvalidState("Player is missing from the floor".to_string()))
    }

    pub fn player_mut(&mut self) -> DelveResult<&mut Entity> {
        let id = self.player_id;
        self.entity_mut(id)
            .ok_or_else(|| DelveError::InvalidState("Player is missing from the floor".to_string()))
    }

    /// The entity's name, or an empty string for an unknown handle.
    pub fn name_of(&self, id: EntityId) -> String {
        self.entity(id).map(|entity| entity.name.clone()).unwrap_or_default()
    }

    /// Sums an equipment bonus for the given entity. Only the player wears
    /// equipment.
    fn equipment_bonus(&self, id: EntityId, pick: impl Fn(&Equipment) -> i32) -> i32 {
        if id == self.player_id {
            self.inventory.bonus(pick)
        } else {
            0
        }
    }

    /// Effective attack power: base plus equipment bonuses.
    pub fn power(&self, id: EntityId) -> i32 {
        let base = self.fighter_stat(id, |f| f.base_power);
        base + self.equipment_bonus(id, |e| e.power_bonus)
    }

    /// Effective defense: base plus equipment bonuses.
    pub fn defense(&self, id: EntityId) -> i32 {
        let base = self.fighter_stat(id, |f| f.base_defense);
        base + self.equipment_bonus(id, |e| e.defense_bonus)
    }

    /// Effective maximum hit points: base plus equipment bonuses.
    pub fn max_hp(&self, id: EntityId) -> i32 {
        let base = self.fighter_stat(id, |f| f.base_max_hp);
        base + self.equipment_bonus(id, |e| e.max_hp_bonus)
    }

    fn fighter_stat(&self, id: EntityId, pick: impl Fn(&Fighter) -> i32) -> i32 {
        self.entity(id)
            .and_then(|entity| entity.fighter.as_ref())
            .map(pick)
            .unwrap_or(0)
    }

    /// Current and maximum hit points of the player.
    pub fn player_health(&self) -> (i32, i32) {
        let hp = self.fighter_stat(self.player_id, |f| f.hp);
        (hp, self.max_hp(self.player_id))
    }

    /// Returns true if terrain or a blocking entity occupies the tile.
    pub fn is_blocked(&self, pos: Position) -> bool {
        self.grid.is_blocked(pos) || self.entities.iter().any(|e| e.blocks && e.position == pos)
    }

    /// Moves an entity by a delta unless the destination is blocked.
    ///
    /// Moving the player marks the field of view for recompute.
    pub fn move_entity(&mut self, id: EntityId, dx: i32, dy: i32) -> bool {
        let Some(from) = self.entity(id).map(|entity| entity.position) else {
            return false;
        };
        let to = from.offset(dx, dy);
        if to == from || self.is_blocked(to) {
            return false;
        }

        if let Some(entity) = self.entity_mut(id) {
            entity.position = to;
        }
        if id == self.player_id {
            self.fov.mark_dirty();
        }
        true
    }

    /// Recomputes the field of view if the player has moved since the last
    /// computation.
    pub fn ensure_fov(&mut self) {
        if let Some(origin) = self.entity(self.player_id).map(|player| player.position) {
            self.fov.refresh(&mut self.grid, origin);
        }
    }

    pub fn is_in_fov(&self, pos: Position) -> bool {
        self.fov.is_visible(pos)
    }

    /// Entities are drawn when in view; always-visible ones are also drawn
    /// on explored tiles.
    pub fn is_entity_visible(&self, entity: &Entity) -> bool {
        self.is_in_fov(entity.position) || (entity.always_visible && self.grid.is_explored(entity.position))
    }

    /// Visible entities in draw order: by layer, list order within a layer,
    /// and the player last.
    pub fn render_order(&self) -> Vec<&Entity> {
        let mut visible: Vec<&Entity> = self
            .entities
            .iter()
            .filter(|entity| entity.id != self.player_id && self.is_entity_visible(entity))
            .collect();
        visible.sort_by_key(|entity| entity.layer);
        if let Some(player) = self.entity(self.player_id) {
            visible.push(player);
        }
        visible
    }

    /// Names of the entities in view at a tile, for the look tooltip.
    pub fn names_at(&self, pos: Position) -> String {
        let names: Vec<&str> = self
            .entities
            .iter()
            .filter(|entity| entity.position == pos && self.is_in_fov(entity.position))
            .map(|entity| entity.name.as_str())
            .collect();
        capitalize(&names.join(", "))
    }

    pub fn tile_appearance(&self, pos: Position) -> TileAppearance {
        let wall = self.grid.blocks_sight(pos);
        if self.is_in_fov(pos) {
            TileAppearance::Lit { wall }
        } else if self.grid.is_explored(pos) {
            TileAppearance::Remembered { wall }
        } else {
            TileAppearance::Unexplored
        }
    }

    /// Adds a line to the message log.
    pub fn message(&mut self, text: impl AsRef<str>, color: Rgb) {
        self.messages.add(text, color);
    }

    /// Experience needed for the player's next level.
    pub fn xp_to_next_level(&self) -> i32 {
        let level = self.entity(self.player_id).map(|p| p.level).unwrap_or(1) as i32;
        self.config.level_up_base + level * self.config.level_up_factor
    }

    pub fn is_level_up_pending(&self) -> bool {
        self.pending_level_up
    }

    /// Raises the player one level if they have enough experience.
    ///
    /// The threshold is subtracted from the experience, keeping any surplus.
    /// Turns are blocked until [`GameState::choose_level_up`] is called.
    pub fn check_level_up(&mut self) -> DelveResult<bool> {
        if self.pending_level_up {
            return Ok(false);
        }
        let threshold = self.xp_to_next_level();
        let player = self.player_mut()?;
        let Some(fighter) = player.fighter.as_mut() else {
            return Ok(false);
        };
        if fighter.xp < threshold {
            return Ok(false);
        }

        fighter.xp -= threshold;
        player.level += 1;
        let level = player.level;
        self.pending_level_up = true;
        self.message(
            format!("Your battle skills grow stronger! You reached level {}!", level),
            Rgb::YELLOW,
        );
        info!("Player reached level {}", level);
        Ok(true)
    }

    /// The three stat choices offered on level-up.
    pub fn level_up_menu(&self) -> DelveResult<Menu> {
        let player = self.player()?;
        let (hp, power, defense) = match player.fighter.as_ref() {
            Some(f) => (f.base_max_hp, f.base_power, f.base_defense),
            None => (0, 0, 0),
        };
        Menu::new(
            "Level up! Choose a stat to raise:",
            vec![
                format!("Constitution (+20 HP, from {})", hp),
                format!("Strength (+1 attack, from {})", power),
                format!("Agility (+1 defense, from {})", defense),
            ],
        )
    }

    /// Applies a level-up choice: 0 for hit points, 1 for power, 2 for defense.
    pub fn choose_level_up(&mut self, choice: usize) -> DelveResult<()> {
        if !self.pending_level_up {
            return Err(DelveError::InvalidAction("No level-up is pending".to_string()));
        }
        if choice > 2 {
            return Err(DelveError::InvalidAction(format!("Unknown level-up choice {}", choice)));
        }

        let fighter = self
            .player_mut()?
            .fighter
            .as_mut()
            .ok_or_else(|| DelveError::InvalidState("Player cannot fight".to_string()))?;
        match choice {
            0 => {
                fighter.base_max_hp += 20;
                fighter.hp += 20;
            }
            1 => fighter.base_power += 1,
            _ => fighter.base_defense += 1,
        }
        self.pending_level_up = false;
        Ok(())
    }

    /// Text for the character sheet.
    pub fn character_sheet(&self) -> DelveResult<String> {
        let player = self.player()?;
        let xp = player.fighter.as_ref().map(|f| f.xp).unwrap_or(0);
        Ok(format!(
            "Character Information\n\nLevel: {}\nExperience: {}\nExperience to level up: {}\n\nMaximum HP: {}\nAttack: {}\nDefense: {}",
            player.level,
            xp,
            self.xp_to_next_level(),
            self.max_hp(self.player_id),
            self.power(self.player_id),
            self.defense(self.player_id),
        ))
    }
}
