//! # Delve
//!
//! A single-player, turn-based dungeon crawler.
//!
//! ## Architecture Overview
//!
//! The crate is split into a deterministic core and thin collaborators:
//!
//! - **Game**: session state, the grid, capability-based entities, field of
//!   view and the turn engine (combat, monster AI, consumables, equipment)
//! - **Generation**: room and corridor layout plus depth-scaled population
//! - **Input / Rendering / Scenes**: the macroquad frontend that feeds logical
//!   inputs to the core and draws what it reports
//! - **Save**: JSON encoding of the core's snapshot contract
//!
//! All randomness flows through a single injected generator owned by the
//! session, so a fixed seed reproduces a game exactly.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod save;
pub mod scenes;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use save::*;
pub use utils::*;

pub use rendering::MacroquadDisplay;

/// Core error type for the Delve game engine.
#[derive(thiserror::Error, Debug)]
pub enum DelveError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Action cannot be performed
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// A menu was given more options than there are letters
    #[error("Cannot have a menu with more than {max} options (got {got})")]
    TooManyMenuOptions { max: usize, got: usize },

    /// Restore was requested but nothing has been saved
    #[error("No saved game to load.")]
    NoSaveGame,

    /// The save file exists but could not be decoded
    #[error("Corrupt save game: {0}")]
    CorruptSave(String),
}

/// Result type used throughout the Delve codebase.
pub type DelveResult<T> = Result<T, DelveError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Dungeon width in tiles
    pub const MAP_WIDTH: u32 = 80;

    /// Dungeon height in tiles
    pub const MAP_HEIGHT: u32 = 43;

    /// Screen width in cells
    pub const SCREEN_WIDTH: u32 = 80;

    /// Screen height in cells
    pub const SCREEN_HEIGHT: u32 = 50;

    /// Height of the status panel below the map
    pub const PANEL_HEIGHT: u32 = 7;

    /// Width of the HP bar in cells
    pub const BAR_WIDTH: u32 = 20;

    /// Column where the message log starts
    pub const MSG_X: u32 = BAR_WIDTH + 2;

    /// Width of the message log in characters
    pub const MSG_WIDTH: usize = (SCREEN_WIDTH - BAR_WIDTH - 2) as usize;

    /// Number of message lines kept and shown
    pub const MSG_HEIGHT: usize = (PANEL_HEIGHT - 1) as usize;

    /// Smallest room side, walls included
    pub const ROOM_MIN_SIZE: i32 = 5;

    /// Largest room side, walls included
    pub const ROOM_MAX_SIZE: i32 = 15;

    /// Number of room placement attempts per floor
    pub const MAX_ROOMS: u32 = 40;

    /// Hit points restored by a healing potion
    pub const HEAL_AMOUNT: i32 = 40;

    pub const LIGHTNING_DAMAGE: i32 = 40;
    pub const LIGHTNING_RANGE: i32 = 5;

    pub const THUNDER_DAMAGE: i32 = 80;
    pub const THUNDER_RANGE: i32 = 4;

    pub const CONFUSE_RANGE: i32 = 8;
    pub const CONFUSE_NUM_TURNS: u32 = 10;

    pub const FIREBALL_RANGE: i32 = 8;
    pub const FIREBALL_RADIUS: i32 = 3;
    pub const FIREBALL_DAMAGE: i32 = 25;

    /// Level-up threshold is `LEVEL_UP_BASE + level * LEVEL_UP_FACTOR`
    pub const LEVEL_UP_BASE: i32 = 200;
    pub const LEVEL_UP_FACTOR: i32 = 150;

    /// Sight radius of the player
    pub const TORCH_RADIUS: i32 = 10;

    /// Whether walls at the edge of sight are revealed
    pub const FOV_LIGHT_WALLS: bool = true;

    /// Inventory slots, one per letter a-z
    pub const INVENTORY_CAPACITY: usize = 26;

    /// Pixel size of one grid cell in the macroquad frontend
    pub const CELL_SIZE: f32 = 12.0;

    /// Default save file location
    pub const DEFAULT_SAVE_PATH: &str = "savegame.json";
}
