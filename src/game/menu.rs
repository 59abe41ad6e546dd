//! # Menus
//!
//! Letter-addressed option lists handed to the menu collaborator.

use crate::{DelveError, DelveResult};

/// Most options a menu can show, one per letter a-z.
pub const MAX_MENU_OPTIONS: usize = 26;

/// A header and an ordered list of options, addressed by `a`, `b`, ...
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub header: String,
    pub options: Vec<String>,
}

impl Menu {
    /// Creates a menu, rejecting more options than there are letters.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::Menu;
    ///
    /// let menu = Menu::new("Pick one", vec!["Sword".into(), "Shield".into()]).unwrap();
    /// assert_eq!(menu.index_for_key('b'), Some(1));
    /// assert_eq!(menu.index_for_key('c'), None);
    /// ```
    pub fn new(header: impl Into<String>, options: Vec<String>) -> DelveResult<Self> {
        if options.len() > MAX_MENU_OPTIONS {
            return Err(DelveError::TooManyMenuOptions {
                max: MAX_MENU_OPTIONS,
                got: options.len(),
            });
        }
        Ok(Self {
            header: header.into(),
            options,
        })
    }

    /// Letter shown next to the option at `index`.
    pub fn letter_for(index: usize) -> Option<char> {
        if index < MAX_MENU_OPTIONS {
            Some((b'a' + index as u8) as char)
        } else {
            None
        }
    }

    /// Maps a typed letter to an option index, if that option exists.
    pub fn index_for_key(&self, key: char) -> Option<usize> {
        let key = key.to_ascii_lowercase();
        if !key.is_ascii_lowercase() {
            return None;
        }
        let index = (key as u8 - b'a') as usize;
        (index < self.options.len()).then_some(index)
    }

    /// Option lines as displayed, e.g. `(a) Healing potion`.
    pub fn lines(&self) -> Vec<String> {
        self.options
            .iter()
            .enumerate()
            .filter_map(|(index, option)| Self::letter_for(index).map(|letter| format!("({}) {}", letter, option)))
            .collect()
    }
}
