//! # Message Log
//!
//! Bounded log of coloured narration lines shown beneath the map.

use super::Rgb;
use crate::utils::wrap_text;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One line of narration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub color: Rgb,
}

/// Ring of the most recent narration lines.
///
/// Long messages are word-wrapped to `width` columns and each wrapped line
/// takes one slot; the oldest lines are dropped once `capacity` is reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLog {
    lines: VecDeque<Message>,
    capacity: usize,
    width: usize,
}

impl MessageLog {
    /// Creates an empty log.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{MessageLog, Rgb};
    ///
    /// let mut log = MessageLog::new(2, 40);
    /// log.add("first", Rgb::WHITE);
    /// log.add("second", Rgb::WHITE);
    /// log.add("third", Rgb::RED);
    /// let texts: Vec<_> = log.iter().map(|m| m.text.as_str()).collect();
    /// assert_eq!(texts, vec!["second", "third"]);
    /// ```
    pub fn new(capacity: usize, width: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            width: width.max(1),
        }
    }

    /// Adds a message, wrapping it across as many lines as needed.
    pub fn add(&mut self, text: impl AsRef<str>, color: Rgb) {
        for line in wrap_text(text.as_ref(), self.width) {
            if self.lines.len() == self.capacity {
                self.lines.pop_front();
            }
            self.lines.push_back(Message { text: line, color });
        }
    }

    /// Iterates over the stored lines, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.lines.iter()
    }

    /// Returns the most recent line, if any.
    pub fn last(&self) -> Option<&Message> {
        self.lines.back()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns true if any stored line contains the given text.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|message| message.text.contains(needle))
    }
}
