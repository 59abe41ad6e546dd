//! # Scene Management System
//!
//! Which screen the player is looking at, and how inputs move between them:
//! the main menu, play, the inventory and level-up menus and message boxes.
//!
//! The transitions are plain methods taking logical inputs, so the whole flow
//! can be driven without a window. [`SceneManager::run`] is the thin loop that
//! polls macroquad and draws.

use crate::game::{Action, ActionOutcome, GameConfig, GameState, GameStatus, Menu};
use crate::generation::create_rng;
use crate::input::{InputHandler, PlayerInput};
use crate::rendering::MacroquadDisplay;
use crate::save::SaveStore;
use crate::{DelveError, DelveResult};
use log::{info, warn};
use macroquad::prelude::*;
use ::rand::rngs::StdRng;
use ::rand::SeedableRng;

const INVENTORY_WIDTH: usize = 50;
const LEVEL_UP_WIDTH: usize = 40;
const MAIN_MENU_WIDTH: usize = 24;
const MESSAGE_BOX_WIDTH: usize = 50;

/// What an inventory menu is open for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryPurpose {
    Use,
    Drop,
}

/// The screen currently shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scene {
    MainMenu,
    Playing,
    Inventory(InventoryPurpose),
    /// Waiting for the player to pick a stat; turns are blocked meanwhile
    LevelUp,
    /// A message dismissed by any key
    MessageBox(String),
}

/// Whether the application should keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Coordinates scenes, the running session and the save file.
pub struct SceneManager {
    scene: Scene,
    session: Option<GameState>,
    config: GameConfig,
    store: SaveStore,
    seed: Option<u64>,
}

impl SceneManager {
    /// Starts at the main menu.
    ///
    /// With a seed, every new game uses the same generator stream.
    pub fn new(config: GameConfig, store: SaveStore, seed: Option<u64>) -> Self {
        Self {
            scene: Scene::MainMenu,
            session: None,
            config,
            store,
            seed,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn session(&self) -> Option<&GameState> {
        self.session.as_ref()
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => create_rng(seed),
            None => StdRng::from_entropy(),
        }
    }

    fn session_mut(&mut self) -> DelveResult<&mut GameState> {
        self.session
            .as_mut()
            .ok_or_else(|| DelveError::InvalidState("No game is running".to_string()))
    }

    fn main_menu() -> DelveResult<Menu> {
        Menu::new(
            "",
            vec![
                "Play a new game".to_string(),
                "Continue last game".to_string(),
                "Quit".to_string(),
            ],
        )
    }

    /// The menu shown by the current scene, if it shows one.
    pub fn current_menu(&self) -> DelveResult<Option<Menu>> {
        let menu = match (&self.scene, self.session.as_ref()) {
            (Scene::MainMenu, _) => Self::main_menu()?,
            (Scene::Inventory(InventoryPurpose::Use), Some(state)) => state.inventory_menu(
                "Press the key next to an item to use it, or any other to cancel.",
            )?,
            (Scene::Inventory(InventoryPurpose::Drop), Some(state)) => state.inventory_menu(
                "Press the key next to an item to drop it, or any other to cancel.",
            )?,
            (Scene::LevelUp, Some(state)) => state.level_up_menu()?,
            _ => return Ok(None),
        };
        Ok(Some(menu))
    }

    /// Handles a menu answer: a typed letter, or `None` for dismissal.
    pub fn choose_menu_option(&mut self, key: Option<char>) -> DelveResult<Flow> {
        let Some(menu) = self.current_menu()? else {
            return Ok(Flow::Continue);
        };
        let choice = key.and_then(|key| menu.index_for_key(key));

        match self.scene.clone() {
            Scene::MainMenu => self.choose_main_menu(choice),
            Scene::Inventory(purpose) => {
                self.scene = Scene::Playing;
                if let Some(index) = self.session_mut()?.inventory_choice(choice) {
                    let action = match purpose {
                        InventoryPurpose::Use => Action::UseItem(index),
                        InventoryPurpose::Drop => Action::DropItem(index),
                    };
                    self.take_action(action)?;
                }
                Ok(Flow::Continue)
            }
            Scene::LevelUp => {
                // The choice cannot be skipped
                if let Some(index) = choice {
                    self.session_mut()?.choose_level_up(index)?;
                    self.scene = Scene::Playing;
                }
                Ok(Flow::Continue)
            }
            Scene::Playing | Scene::MessageBox(_) => Ok(Flow::Continue),
        }
    }

    fn choose_main_menu(&mut self, choice: Option<usize>) -> DelveResult<Flow> {
        match choice {
            Some(0) => {
                self.start_new_game()?;
                Ok(Flow::Continue)
            }
            Some(1) => {
                self.continue_game()?;
                Ok(Flow::Continue)
            }
            Some(2) => Ok(Flow::Exit),
            _ => Ok(Flow::Continue),
        }
    }

    /// Starts a fresh session.
    pub fn start_new_game(&mut self) -> DelveResult<()> {
        let state = GameState::new_game(self.config.clone(), self.rng())?;
        self.session = Some(state);
        self.scene = Scene::Playing;
        Ok(())
    }

    /// Resumes the saved session. Load failures are shown in a message box
    /// and leave the player at the main menu.
    pub fn continue_game(&mut self) -> DelveResult<()> {
        let restored = self
            .store
            .load()
            .and_then(|snapshot| GameState::restore(snapshot, self.config.clone(), self.rng()));

        match restored {
            Ok(state) => {
                let pending = state.is_level_up_pending();
                self.session = Some(state);
                self.scene = if pending { Scene::LevelUp } else { Scene::Playing };
                info!("Continuing saved game");
                Ok(())
            }
            Err(err) => {
                warn!("Could not continue: {}", err);
                self.scene = Scene::MessageBox(err.to_string());
                Ok(())
            }
        }
    }

    /// Handles one input while playing.
    pub fn handle_input(&mut self, input: PlayerInput) -> DelveResult<Flow> {
        if self.scene != Scene::Playing {
            return Ok(Flow::Continue);
        }

        match input {
            PlayerInput::Quit => self.quit_session()?,
            PlayerInput::OpenInventory => self.scene = Scene::Inventory(InventoryPurpose::Use),
            PlayerInput::OpenDropMenu => self.scene = Scene::Inventory(InventoryPurpose::Drop),
            PlayerInput::OpenCharacterSheet => {
                let sheet = self.session_mut()?.character_sheet()?;
                self.scene = Scene::MessageBox(sheet);
            }
            other => {
                if let Some(action) = other.to_action() {
                    self.take_action(action)?;
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn take_action(&mut self, action: Action) -> DelveResult<ActionOutcome> {
        let state = self.session_mut()?;
        let outcome = state.perform(action)?;
        if state.is_level_up_pending() {
            self.scene = Scene::LevelUp;
        }
        Ok(outcome)
    }

    /// Closes the message box.
    pub fn dismiss_message(&mut self) {
        if let Scene::MessageBox(_) = self.scene {
            self.scene = if self.session.is_some() {
                Scene::Playing
            } else {
                Scene::MainMenu
            };
        }
    }

    /// Ends the session and returns to the main menu. A living session is
    /// saved; a finished one removes the save.
    ///
    /// When the save file cannot be written the session stays open and the
    /// failure is shown in a message box.
    pub fn quit_session(&mut self) -> DelveResult<()> {
        let Some(state) = self.session.as_ref() else {
            self.scene = Scene::MainMenu;
            return Ok(());
        };

        let stored = if state.status == GameStatus::Dead {
            self.store.delete().map(|()| {
                info!("Session ended in death at depth {}", state.depth);
            })
        } else {
            state.snapshot().and_then(|snapshot| self.store.save(&snapshot))
        };

        match stored {
            Ok(()) => {
                self.session = None;
                self.scene = Scene::MainMenu;
            }
            Err(err) => {
                warn!("Could not store the session: {}", err);
                self.scene = Scene::MessageBox(err.to_string());
            }
        }
        Ok(())
    }

    /// Runs the main scene loop until the player quits from the main menu.
    pub async fn run(&mut self, display: &MacroquadDisplay, input: &InputHandler) -> DelveResult<()> {
        loop {
            self.render(display)?;

            let flow = match &self.scene {
                Scene::Playing => match input.poll() {
                    Some(player_input) => self.handle_input(player_input)?,
                    None => Flow::Continue,
                },
                Scene::MessageBox(_) => {
                    if input.any_key() {
                        self.dismiss_message();
                    }
                    Flow::Continue
                }
                Scene::MainMenu | Scene::Inventory(_) | Scene::LevelUp => match input.poll_menu() {
                    Some(answer) => self.choose_menu_option(answer)?,
                    None => Flow::Continue,
                },
            };

            if flow == Flow::Exit {
                info!("Leaving the main menu");
                return Ok(());
            }
            next_frame().await;
        }
    }

    fn render(&self, display: &MacroquadDisplay) -> DelveResult<()> {
        match &self.session {
            Some(state) => display.render_game(state),
            None => display.render_title("DELVE", "Turn-based descent into the dark"),
        }

        match &self.scene {
            Scene::MainMenu => {
                if let Some(menu) = self.current_menu()? {
                    display.render_menu(&menu, MAIN_MENU_WIDTH);
                }
            }
            Scene::Inventory(_) => {
                if let Some(menu) = self.current_menu()? {
                    display.render_menu(&menu, INVENTORY_WIDTH);
                }
            }
            Scene::LevelUp => {
                if let Some(menu) = self.current_menu()? {
                    display.render_menu(&menu, LEVEL_UP_WIDTH);
                }
            }
            Scene::MessageBox(text) => display.render_message_box(text, MESSAGE_BOX_WIDTH),
            Scene::Playing => {}
        }
        Ok(())
    }
}
