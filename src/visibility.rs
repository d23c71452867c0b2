//! Tracks which records currently show their secret.

use std::collections::HashSet;

use crate::credentials::RecordId;

/// Character used to mask a hidden secret.
pub const MASK_CHAR: char = '*';

/// Masks a secret with one [`MASK_CHAR`] per character.
pub fn mask(secret: &str) -> String {
    std::iter::repeat_n(MASK_CHAR, secret.chars().count()).collect()
}

/// Set of record ids whose secret is revealed. Never persisted.
#[derive(Debug, Default)]
pub struct VisibilityTracker {
    revealed: HashSet<RecordId>,
}

impl VisibilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reveal(&mut self, id: RecordId) {
        self.revealed.insert(id);
    }

    pub fn hide(&mut self, id: RecordId) {
        self.revealed.remove(&id);
    }

    /// Flips the state and returns whether the secret is now visible.
    pub fn toggle(&mut self, id: RecordId) -> bool {
        if self.revealed.remove(&id) {
            false
        } else {
            self.revealed.insert(id);
            true
        }
    }

    pub fn is_visible(&self, id: RecordId) -> bool {
        self.revealed.contains(&id)
    }

    /// Drops a deleted record. No-op when the id was never revealed.
    pub fn forget(&mut self, id: RecordId) {
        self.revealed.remove(&id);
    }

    pub fn ids(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.revealed.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.revealed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }
}
