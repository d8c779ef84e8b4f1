//! `datareg-engine`: owner-gated key-value registry.
//!
//! The registry maps 32-byte data keys to byte values of any length. Reads
//! are public; writes require the caller to be the current owner. Values
//! are packed into bounded storage slots: small ones inline, large ones in
//! chunks behind a header carrying their length and digest.
//!
//! ## Architecture
//!
//! - [`host::HostInterface`]: slot access, gas and notifications for one call
//! - [`host::Session`]: per-call overlay over a committed `StateStore`
//! - [`ownership`]: the single-owner gate
//! - [`packing`]: inline/chunked value representation
//! - [`store`]: data read and write operations
//! - [`interface`]: capability discovery
//! - [`call`]: caller identity, the `Call` surface and `Forwarder`
//! - [`executor::Registry`]: atomic call execution and observers

pub mod host;
pub mod ownership;
pub mod packing;
pub mod store;
pub mod interface;
pub mod call;
pub mod error;
pub mod executor;

// Re-export key types for convenience
pub use call::{Call, CallContext, Forwarder};
pub use error::RegistryError;
pub use executor::{EventObserver, Registry};
pub use host::{HostInterface, Session};
