//! `datareg-hostapi`: the persistence substrate consumed by the DataReg
//! registry.
//!
//! This crate provides:
//!
//! - `StateStore` trait: committed slot storage with atomic write-set apply
//! - `MemStore`: in-memory `StateStore`
//! - `StoreConfig`: per-call resource limits and packing constants
//! - `HostError` / `ConfigError`: substrate and configuration errors

pub mod error;
pub mod types;
pub mod state_store;
pub mod mem_store;

// Re-export commonly used types at the crate root.
pub use error::{ConfigError, HostError};
pub use types::StoreConfig;
pub use state_store::StateStore;
pub use mem_store::MemStore;
