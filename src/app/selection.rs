use std::collections::HashSet;

use crate::error::SelectionError;
use crate::model::{DirectoryEntry, EntryKind};

/// Files picked across directories, in pick order, unique by identity key.
#[derive(Debug, Clone, Default)]
pub(crate) struct SelectionSet {
    entries: Vec<DirectoryEntry>,
    keys: HashSet<String>,
}

impl SelectionSet {
    /// Appends `entry` unless an entry with the same identity is present.
    /// Returns whether the set changed.
    pub(crate) fn add(&mut self, entry: DirectoryEntry) -> Result<bool, SelectionError> {
        if entry.kind != EntryKind::File || entry.content_url.is_none() {
            return Err(SelectionError::NotSelectable {
                name: entry.name,
                kind: entry.kind,
            });
        }
        if !self.keys.insert(entry.identity_key().to_string()) {
            return Ok(false);
        }
        self.entries.push(entry);
        Ok(true)
    }

    pub(crate) fn contains(&self, entry: &DirectoryEntry) -> bool {
        self.keys.contains(entry.identity_key())
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> Result<DirectoryEntry, SelectionError> {
        if index >= self.entries.len() {
            return Err(SelectionError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        let removed = self.entries.remove(index);
        self.keys.remove(removed.identity_key());
        Ok(removed)
    }

    pub(crate) fn remove(&mut self, entry: &DirectoryEntry) -> Option<DirectoryEntry> {
        let index = self
            .entries
            .iter()
            .position(|candidate| candidate.identity_key() == entry.identity_key())?;
        self.remove_at(index).ok()
    }

    pub(crate) fn all(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
