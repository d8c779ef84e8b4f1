//! Registry configuration: per-call resource limits and packing constants.

use serde::{Deserialize, Serialize};

use datareg_primitives::codec::CHUNK_HEADER_LEN;

use crate::error::ConfigError;

/// Values up to this many bytes are stored inline in the head slot.
pub const DEFAULT_INLINE_THRESHOLD: usize = 64;

/// Size of each chunk slot of a chunked value.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Largest record a single slot may hold.
pub const DEFAULT_MAX_SLOT_LEN: usize = 65_536; // 64 KiB

/// Longest slot key accepted by the substrate.
pub const DEFAULT_MAX_SLOT_KEY_LEN: usize = 256;

/// Longest slot key the registry builds: `data/<key 32>/<index u32>`.
pub const LONGEST_SLOT_KEY_LEN: usize = 5 + 32 + 1 + 4;

/// Limits and packing parameters for a registry.
///
/// Resource limits apply to each call separately; a call that exceeds one
/// is reverted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Maximum gas a single call may consume.
    pub gas_limit: u64,
    /// Maximum notifications a single call may emit.
    pub max_events: u32,
    /// Maximum slot bytes (keys + values) a single call may stage.
    pub max_write_bytes: u64,
    /// Maximum length of a slot key.
    pub max_slot_key_len: usize,
    /// Maximum length of a slot record.
    pub max_slot_len: usize,
    /// Largest value stored inline.
    pub inline_threshold: usize,
    /// Chunk size for values above the inline threshold.
    pub chunk_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            gas_limit: 30_000_000,
            max_events: 1024,
            max_write_bytes: 4 * 1024 * 1024, // 4 MiB
            max_slot_key_len: DEFAULT_MAX_SLOT_KEY_LEN,
            max_slot_len: DEFAULT_MAX_SLOT_LEN,
            inline_threshold: DEFAULT_INLINE_THRESHOLD,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl StoreConfig {
    /// Default limits with different packing parameters.
    pub fn with_packing(inline_threshold: usize, chunk_size: usize) -> Self {
        Self {
            inline_threshold,
            chunk_size,
            ..Self::default()
        }
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gas_limit == 0 {
            return Err(ConfigError::ZeroGasLimit);
        }
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if self.chunk_size > self.max_slot_len || self.chunk_size > u32::MAX as usize {
            return Err(ConfigError::ChunkTooLarge {
                chunk_size: self.chunk_size,
                max_slot_len: self.max_slot_len,
            });
        }
        if self.inline_threshold >= self.max_slot_len {
            return Err(ConfigError::InlineTooLarge {
                inline_threshold: self.inline_threshold,
                max_slot_len: self.max_slot_len,
            });
        }
        if self.max_slot_len < CHUNK_HEADER_LEN {
            return Err(ConfigError::SlotTooSmall {
                max_slot_len: self.max_slot_len,
            });
        }
        if self.max_slot_key_len < LONGEST_SLOT_KEY_LEN {
            return Err(ConfigError::SlotKeyTooShort {
                max_slot_key_len: self.max_slot_key_len,
                required: LONGEST_SLOT_KEY_LEN,
            });
        }
        Ok(())
    }
}
