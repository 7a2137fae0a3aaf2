//! The set of selected emoji.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::EmojiId;

/// Selected emoji, by identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection(BTreeSet<EmojiId>);

impl Selection {
    /// Create an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the emoji if absent, remove it if present.
    ///
    /// Returns whether the emoji is selected afterwards.
    pub fn toggle(&mut self, id: EmojiId) -> bool {
        if self.0.remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }

    /// Whether the emoji is selected.
    #[must_use]
    pub fn contains(&self, id: EmojiId) -> bool {
        self.0.contains(&id)
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Check if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of selected emoji.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the selected identities.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = EmojiId> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<EmojiId> for Selection {
    fn from_iter<I: IntoIterator<Item = EmojiId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
