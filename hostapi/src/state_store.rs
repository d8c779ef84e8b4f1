//! Persistence substrate abstraction.
//!
//! `StateStore` holds committed slots. The registry reads through it and,
//! once a call succeeds, hands it the call's whole write set. A backend
//! must apply that write set all-or-nothing: the registry's atomicity per
//! call rests on it.
//!
//! Implementations:
//! - `MemStore` (this crate): in-memory BTreeMap

use datareg_primitives::WriteSet;

use crate::error::HostError;

/// Abstraction over committed slot storage.
pub trait StateStore: Send + Sync {
    /// Get the committed record of a slot.
    ///
    /// Returns `Ok(None)` if the slot does not exist.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, HostError>;

    /// Check if a slot exists.
    ///
    /// Default implementation uses `get()`, but backends may optimize this.
    fn contains(&self, key: &[u8]) -> Result<bool, HostError> {
        Ok(self.get(key)?.is_some())
    }

    /// Atomically apply a call's write set: `Some` sets, `None` deletes.
    ///
    /// On error no entry of `writes` may be visible afterwards.
    fn apply(&mut self, writes: WriteSet) -> Result<(), HostError>;
}
