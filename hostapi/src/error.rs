//! Substrate error types.
//!
//! `HostError` is returned by `StateStore` backends and by slot-limit
//! checks. It wraps a stable `ErrorCode` or carries a message for backend
//! failures that have no code. `ConfigError` reports an invalid
//! `StoreConfig`.

use std::fmt;

use datareg_primitives::{CallError, ErrorCode};

/// Error returned by the persistence substrate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// A coded refusal (slot too large, write limit, ...).
    Code(ErrorCode),
    /// A backend failure with no code.
    Internal(String),
}

impl HostError {
    /// Create a slot-key-too-large error.
    pub fn slot_key_too_large() -> Self {
        Self::Code(ErrorCode::SlotKeyTooLarge)
    }

    /// Create a slot-value-too-large error.
    pub fn slot_value_too_large() -> Self {
        Self::Code(ErrorCode::SlotValueTooLarge)
    }

    /// Create a write-limit error.
    pub fn write_limit() -> Self {
        Self::Code(ErrorCode::WriteLimit)
    }

    /// Create an event-limit error.
    pub fn event_limit() -> Self {
        Self::Code(ErrorCode::EventLimit)
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "host error: {}", code),
            Self::Internal(msg) => write!(f, "internal host error: {}", msg),
        }
    }
}

impl std::error::Error for HostError {}

impl From<ErrorCode> for HostError {
    fn from(code: ErrorCode) -> Self {
        Self::Code(code)
    }
}

impl From<HostError> for CallError {
    fn from(err: HostError) -> Self {
        match err {
            HostError::Code(code) => CallError::Host(code),
            HostError::Internal(msg) => CallError::Backend(msg),
        }
    }
}

/// An invalid `StoreConfig`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("chunk_size must be > 0")]
    ZeroChunkSize,

    #[error("chunk_size {chunk_size} exceeds max_slot_len {max_slot_len}")]
    ChunkTooLarge { chunk_size: usize, max_slot_len: usize },

    #[error("inline records of {inline_threshold} bytes do not fit max_slot_len {max_slot_len}")]
    InlineTooLarge { inline_threshold: usize, max_slot_len: usize },

    #[error("max_slot_len {max_slot_len} cannot hold a chunk header")]
    SlotTooSmall { max_slot_len: usize },

    #[error("max_slot_key_len {max_slot_key_len} is shorter than the longest slot key ({required})")]
    SlotKeyTooShort { max_slot_key_len: usize, required: usize },

    #[error("gas_limit must be > 0")]
    ZeroGasLimit,
}
