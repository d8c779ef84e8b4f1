//! Error types for the DataReg registry.
//!
//! `ErrorCode` names the reason the persistence substrate refused a slot
//! operation. `CallError` is the revert reason of a registry call; every
//! variant aborts the call with no state change and no notification.

use core::fmt;

use crate::types::{to_hex, Address, DataKey};

/// Reason the substrate refused a slot operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidEncoding,
    SlotKeyTooLarge,
    SlotValueTooLarge,
    WriteLimit,
    EventLimit,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEncoding => write!(f, "ERR_INVALID_ENCODING"),
            Self::SlotKeyTooLarge => write!(f, "ERR_SLOT_KEY_TOO_LARGE"),
            Self::SlotValueTooLarge => write!(f, "ERR_SLOT_VALUE_TOO_LARGE"),
            Self::WriteLimit => write!(f, "ERR_WRITE_LIMIT"),
            Self::EventLimit => write!(f, "ERR_EVENT_LIMIT"),
        }
    }
}

/// Revert reason of a registry call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallError {
    /// The immediate caller is not the current owner.
    #[error("caller {} is not the owner", to_hex(.caller))]
    Unauthorized { caller: Address },

    /// Batched write with sequences of different lengths.
    #[error("data keys/values length mismatch: {keys_len} keys, {values_len} values")]
    DataKeysValuesLengthMismatch { keys_len: usize, values_len: usize },

    /// `initialize` was called on an initialized registry.
    #[error("registry is already initialized")]
    AlreadyInitialized,

    /// The call's gas limit was exceeded.
    #[error("out of gas: limit={limit}, used={used}")]
    OutOfGas { limit: u64, used: u64 },

    /// The substrate refused a slot operation.
    #[error("host error: {0}")]
    Host(ErrorCode),

    /// A stored entry does not decode to a consistent value.
    #[error("corrupt entry for data key {}: {reason}", to_hex(.key))]
    CorruptEntry { key: DataKey, reason: String },

    /// The persistence substrate failed.
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl From<ErrorCode> for CallError {
    fn from(code: ErrorCode) -> Self {
        Self::Host(code)
    }
}

/// Convenience result type for registry calls.
pub type CallResult<T> = core::result::Result<T, CallError>;
