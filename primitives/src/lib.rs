//! `datareg-primitives`: foundational types for the DataReg registry.
//!
//! This crate provides the identifiers, revert errors, gas accounting,
//! per-call write overlay, notifications, slot record codec and hashing
//! shared by the persistence substrate and the registry engine.

pub mod types;
pub mod error;
pub mod gas;
pub mod state;
pub mod event;
pub mod codec;
pub mod crypto;

// Re-export commonly used types at the crate root for convenience.
pub use types::{Address, DataKey, DataValue, Hash, InterfaceId, ZERO_ADDRESS};
pub use error::{CallError, CallResult, ErrorCode};
pub use gas::GasMeter;
pub use state::{OverlayResult, StateOverlay, WriteSet};
pub use event::{Event, Receipt};
pub use codec::{ChunkHeader, DecodeError, SlotRecord};
