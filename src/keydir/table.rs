//! KeyDir implementation
//!
//! HashMap-based index owned by a single store.

use std::collections::HashMap;

use super::KeyEntry;

/// Mapping from key to the entry of its most recent record
#[derive(Debug, Default)]
pub struct KeyDir {
    entries: HashMap<String, KeyEntry>,
}

impl KeyDir {
    /// Create a new empty KeyDir
    pub fn new() -> Self {
        Self::default()
    }

    /// Point `key` at `entry`, returning the entry it replaced
    pub fn insert(&mut self, key: String, entry: KeyEntry) -> Option<KeyEntry> {
        self.entries.insert(key, entry)
    }

    pub fn get(&self, key: &str) -> Option<&KeyEntry> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
