//! Core type aliases and constants for the DataReg registry.
//!
//! These types are shared by the persistence substrate, the packing layer
//! and the registry executor.

use bytes::Bytes;

/// 32-byte hash used for value digests and derived identifiers.
pub type Hash = [u8; 32];

/// 32-byte identity of a caller or owner.
pub type Address = [u8; 32];

/// Fixed-size opaque identifier indexing the data store.
pub type DataKey = [u8; 32];

/// Variable-length value associated with a [`DataKey`].
///
/// `Bytes` so that notifications and batch results share one buffer.
pub type DataValue = Bytes;

/// 4-byte capability identifier answered by `supports_interface`.
pub type InterfaceId = [u8; 4];

/// The "no owner" sentinel. Owner reads return this after renouncement.
pub const ZERO_ADDRESS: Address = [0u8; 32];

/// Interface id that must never be reported as supported.
pub const INVALID_INTERFACE_ID: InterfaceId = [0xff; 4];

/// Convert 32 bytes to a `0x`-prefixed hex string for display purposes.
pub fn to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(2 + bytes.len() * 2);
    s.push_str("0x");
    for byte in bytes {
        use core::fmt::Write;
        let _ = write!(s, "{:02x}", byte);
    }
    s
}

/// Returns true if `addr` is the zero sentinel.
pub fn is_zero_address(addr: &Address) -> bool {
    addr == &ZERO_ADDRESS
}

/// Concatenate byte slices into a single Vec.
pub fn concat_bytes(slices: &[&[u8]]) -> Vec<u8> {
    let total: usize = slices.iter().map(|s| s.len()).sum();
    let mut out = Vec::with_capacity(total);
    for s in slices {
        out.extend_from_slice(s);
    }
    out
}
