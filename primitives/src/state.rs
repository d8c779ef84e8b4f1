//! Per-call write buffer over committed state.
//!
//! Slot writes made during a registry call are staged here and are
//! visible to later reads of the same call. A successful call hands the
//! whole write set to the persistence substrate in one `apply`; a failed
//! call drops the overlay and nothing reaches committed state.

use std::collections::BTreeMap;

/// Staged slot writes: `Some(value)` for a set, `None` for a deletion.
///
/// `BTreeMap` keeps the write set in key order, so applying it is
/// deterministic.
pub type WriteSet = BTreeMap<Vec<u8>, Option<Vec<u8>>>;

/// Transactional write buffer overlaying committed state.
#[derive(Debug, Clone, Default)]
pub struct StateOverlay {
    writes: WriteSet,
    /// Bytes staged so far (keys + values), for the write-byte cap.
    total_write_bytes: u64,
}

/// Result of looking up a slot in the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayResult {
    /// The slot was set in this call.
    Found(Vec<u8>),
    /// The slot was deleted in this call.
    Deleted,
    /// The call has not touched the slot; committed state decides.
    NotInOverlay,
}

fn staged_bytes(key: &[u8], value: Option<&Vec<u8>>) -> u64 {
    key.len() as u64 + value.map_or(0, |v| v.len() as u64)
}

impl StateOverlay {
    /// Create a new empty overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a slot write, replacing anything staged earlier for `key`.
    pub fn set(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.stage(key, Some(value));
    }

    /// Stage a slot deletion. Deletions count their key bytes.
    pub fn delete(&mut self, key: Vec<u8>) {
        self.stage(key, None);
    }

    fn stage(&mut self, key: Vec<u8>, value: Option<Vec<u8>>) {
        let added = staged_bytes(&key, value.as_ref());
        if let Some(prev) = self.writes.get(&key) {
            let removed = staged_bytes(&key, prev.as_ref());
            self.total_write_bytes = self.total_write_bytes.saturating_sub(removed);
        }
        self.total_write_bytes = self.total_write_bytes.saturating_add(added);
        self.writes.insert(key, value);
    }

    /// Look up a slot in the overlay.
    pub fn get(&self, key: &[u8]) -> OverlayResult {
        match self.writes.get(key) {
            Some(Some(value)) => OverlayResult::Found(value.clone()),
            Some(None) => OverlayResult::Deleted,
            None => OverlayResult::NotInOverlay,
        }
    }

    /// Bytes that staging `key = value` would add on top of the current
    /// total, accounting for an entry it replaces.
    pub fn projected_write_bytes(&self, key: &[u8], value_len: Option<usize>) -> u64 {
        let replaced = self
            .writes
            .get(key)
            .map_or(0, |prev| staged_bytes(key, prev.as_ref()));
        let added = key.len() as u64 + value_len.unwrap_or(0) as u64;
        self.total_write_bytes
            .saturating_sub(replaced)
            .saturating_add(added)
    }

    /// Consume the overlay and return the write set in key order.
    pub fn into_writes(self) -> WriteSet {
        self.writes
    }

    /// Returns the number of slots touched.
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    /// Returns true if nothing has been staged.
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Returns the bytes staged so far (keys + values).
    pub fn total_write_bytes(&self) -> u64 {
        self.total_write_bytes
    }
}
