//! Hashing for key derivation, value digests and interface ids.
//!
//! - BLAKE3 derives data keys from names and digests chunked values.
//! - Keccak-256 derives 4-byte function selectors; an interface id is the
//!   XOR of the selectors of the functions it groups, so the ids match the
//!   published ERC165 and ERC725Y identifiers.

use sha3::{Digest, Keccak256};

use crate::types::{DataKey, Hash, InterfaceId};

/// Canonical signatures of the data-store interface.
pub const DATA_STORE_SIGNATURES: [&str; 4] = [
    "getData(bytes32)",
    "getDataBatch(bytes32[])",
    "setData(bytes32,bytes)",
    "setDataBatch(bytes32[],bytes[])",
];

/// Canonical signature of the introspection interface.
pub const INTROSPECTION_SIGNATURE: &str = "supportsInterface(bytes4)";

/// Compute BLAKE3 hash of the input data.
pub fn hash_blake3(data: &[u8]) -> Hash {
    *blake3::hash(data).as_bytes()
}

/// Compute Keccak-256 hash of the input data.
pub fn hash_keccak256(data: &[u8]) -> Hash {
    Keccak256::digest(data).into()
}

/// Derive a data key from a human-readable name.
pub fn data_key(name: &str) -> DataKey {
    hash_blake3(name.as_bytes())
}

/// The 4-byte selector of a canonical function signature.
pub fn selector(signature: &str) -> InterfaceId {
    let hash = hash_keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// XOR of the selectors of `signatures`.
pub fn interface_id(signatures: &[&str]) -> InterfaceId {
    signatures.iter().fold([0u8; 4], |mut acc, sig| {
        for (a, b) in acc.iter_mut().zip(selector(sig)) {
            *a ^= b;
        }
        acc
    })
}

/// Interface id of the data store.
pub fn data_store_interface_id() -> InterfaceId {
    interface_id(&DATA_STORE_SIGNATURES)
}

/// Interface id of the introspection query itself.
pub fn introspection_interface_id() -> InterfaceId {
    selector(INTROSPECTION_SIGNATURE)
}
