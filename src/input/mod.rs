//! # Input Module
//!
//! Turns key presses into the discrete logical inputs the game understands.
//!
//! The key tables are plain functions so they can be tested without a window;
//! [`InputHandler::poll`] is the only part that talks to macroquad.

use crate::game::{Action, Direction};
use macroquad::prelude::*;

/// One logical input from the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Step, or attack, in one of the 8 directions
    Move(Direction),
    /// Let a turn pass
    Wait,
    /// Pick up the item underfoot
    PickUp,
    /// Open the inventory to use an item
    OpenInventory,
    /// Open the inventory to drop an item
    OpenDropMenu,
    OpenCharacterSheet,
    DescendStairs,
    /// Leave the session (saving it)
    Quit,
}

impl PlayerInput {
    /// The turn action this input stands for, if it maps to one directly.
    ///
    /// Inputs that open a menu or leave the session return `None`.
    pub fn to_action(self) -> Option<Action> {
        match self {
            PlayerInput::Move(direction) => Some(Action::Move(direction)),
            PlayerInput::Wait => Some(Action::Wait),
            PlayerInput::PickUp => Some(Action::PickUp),
            PlayerInput::DescendStairs => Some(Action::DescendStairs),
            PlayerInput::OpenInventory
            | PlayerInput::OpenDropMenu
            | PlayerInput::OpenCharacterSheet
            | PlayerInput::Quit => None,
        }
    }
}

/// Keyboard front end for the player.
pub struct InputHandler {
    /// Whether to enable Vi-style movement keys (hjkl yubn)
    pub vi_keys_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Direction, InputHandler, PlayerInput};
    ///
    /// let input = InputHandler::new();
    /// assert_eq!(input.map_char('k'), Some(PlayerInput::Move(Direction::North)));
    /// ```
    pub fn new() -> Self {
        Self { vi_keys_enabled: true }
    }

    /// Reads this frame's key press, if any.
    pub fn poll(&self) -> Option<PlayerInput> {
        let typed = get_char_pressed().and_then(|ch| self.map_char(ch));
        if typed.is_some() {
            return typed;
        }
        get_last_key_pressed().and_then(|key| self.map_key(key))
    }

    /// Reads this frame's menu answer.
    ///
    /// Returns `Some(Some(letter))` for a typed letter, `Some(None)` when the
    /// menu is dismissed with Escape or Enter, and `None` while waiting.
    pub fn poll_menu(&self) -> Option<Option<char>> {
        if let Some(ch) = get_char_pressed() {
            if ch.is_ascii_alphabetic() {
                return Some(Some(ch.to_ascii_lowercase()));
            }
        }
        if is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Enter) {
            return Some(None);
        }
        None
    }

    /// Returns true once any key has been pressed this frame.
    pub fn any_key(&self) -> bool {
        get_last_key_pressed().is_some()
    }

    /// Maps a typed character.
    pub fn map_char(&self, ch: char) -> Option<PlayerInput> {
        let input = match ch {
            'g' | ',' => PlayerInput::PickUp,
            'i' => PlayerInput::OpenInventory,
            'd' => PlayerInput::OpenDropMenu,
            'c' => PlayerInput::OpenCharacterSheet,
            '<' | '>' => PlayerInput::DescendStairs,
            '.' | ' ' => PlayerInput::Wait,
            _ if self.vi_keys_enabled => return Self::vi_direction(ch).map(PlayerInput::Move),
            _ => return None,
        };
        Some(input)
    }

    /// Maps a non-character key: arrows, the numeric keypad and Escape.
    pub fn map_key(&self, key: KeyCode) -> Option<PlayerInput> {
        let input = match key {
            KeyCode::Escape => PlayerInput::Quit,
            KeyCode::Up | KeyCode::Kp8 => PlayerInput::Move(Direction::North),
            KeyCode::Down | KeyCode::Kp2 => PlayerInput::Move(Direction::South),
            KeyCode::Left | KeyCode::Kp4 => PlayerInput::Move(Direction::West),
            KeyCode::Right | KeyCode::Kp6 => PlayerInput::Move(Direction::East),
            KeyCode::Home | KeyCode::Kp7 => PlayerInput::Move(Direction::Northwest),
            KeyCode::PageUp | KeyCode::Kp9 => PlayerInput::Move(Direction::Northeast),
            KeyCode::End | KeyCode::Kp1 => PlayerInput::Move(Direction::Southwest),
            KeyCode::PageDown | KeyCode::Kp3 => PlayerInput::Move(Direction::Southeast),
            KeyCode::Kp5 => PlayerInput::Wait,
            _ => return None,
        };
        Some(input)
    }

    fn vi_direction(ch: char) -> Option<Direction> {
        match ch {
            'k' => Some(Direction::North),
            'j' => Some(Direction::South),
            'h' => Some(Direction::West),
            'l' => Some(Direction::East),
            'y' => Some(Direction::Northwest),
            'u' => Some(Direction::Northeast),
            'b' => Some(Direction::Southwest),
            'n' => Some(Direction::Southeast),
            _ => None,
        }
    }
}
