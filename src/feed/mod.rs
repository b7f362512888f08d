//! Shorts feed
//!
//! A static in-memory feed of short videos. One item is "active" at a
//! time, following whichever item is first in the viewport.

use serde::{Deserialize, Serialize};

/// A short video entry in the feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Short {
    pub id: String,
    pub title: String,
    pub username: String,
}

/// The seeded feed content
pub fn seeded_shorts() -> Vec<Short> {
    let entries = [
        ("1", "First Short", "@user1"),
        ("2", "Second Short", "@user2"),
        ("3", "Third Short", "@user3"),
        ("4", "Fourth Short", "@user4"),
        ("5", "Fifth Short", "@user5"),
    ];
    entries
        .into_iter()
        .map(|(id, title, username)| Short {
            id: id.to_string(),
            title: title.to_string(),
            username: username.to_string(),
        })
        .collect()
}

/// Scroll state of the shorts feed
pub struct ShortsFeed {
    shorts: Vec<Short>,
    active_index: usize,
}

impl ShortsFeed {
    pub fn new(shorts: Vec<Short>) -> Self {
        Self {
            shorts,
            active_index: 0,
        }
    }

    pub fn shorts(&self) -> &[Short] {
        &self.shorts
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// The currently active short, if the feed is non-empty
    pub fn active(&self) -> Option<&Short> {
        self.shorts.get(self.active_index)
    }

    /// Whether the item at `index` should play (everything else shows the
    /// play-button overlay)
    pub fn is_active(&self, index: usize) -> bool {
        index == self.active_index && index < self.shorts.len()
    }

    /// Viewport changed; the first visible item becomes active
    pub fn viewable_changed(&mut self, visible: &[usize]) {
        if let Some(&first) = visible.first() {
            if first < self.shorts.len() {
                self.active_index = first;
            }
        }
    }
}

impl Default for ShortsFeed {
    fn default() -> Self {
        Self::new(seeded_shorts())
    }
}
