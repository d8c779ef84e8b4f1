//! In-memory state store.
//!
//! `MemStore` implements `StateStore` using a `BTreeMap` for deterministic
//! key ordering. It backs tests and embedders that do not need durability.

use std::collections::BTreeMap;

use datareg_primitives::WriteSet;

use crate::error::HostError;
use crate::state_store::StateStore;

/// In-memory state store backed by `BTreeMap`.
#[derive(Debug, Clone, Default)]
pub struct MemStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a slot directly, bypassing any registry.
    pub fn insert(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.data.insert(key, value);
    }

    /// Remove a slot directly.
    pub fn remove(&mut self, key: &[u8]) {
        self.data.remove(key);
    }

    /// Iterate over slot keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.data.keys().map(Vec::as_slice)
    }

    /// Returns the number of slots.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the store holds no slot.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl StateStore for MemStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, HostError> {
        Ok(self.data.get(key).cloned())
    }

    fn contains(&self, key: &[u8]) -> Result<bool, HostError> {
        Ok(self.data.contains_key(key))
    }

    fn apply(&mut self, writes: WriteSet) -> Result<(), HostError> {
        for (key, value) in writes {
            match value {
                Some(v) => {
                    self.data.insert(key, v);
                }
                None => {
                    self.data.remove(&key);
                }
            }
        }
        Ok(())
    }
}
