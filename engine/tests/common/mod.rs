//! Shared test helpers for integration tests.
//!
//! Provides deterministic identities, data keys, value generators, an event
//! recorder and registry factory functions used across all integration
//! test files.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use bytes::Bytes;
use datareg_engine::{CallContext, Registry};
use datareg_hostapi::{MemStore, StoreConfig};
use datareg_primitives::{
    crypto::{data_key, hash_blake3},
    Address, DataKey, Event,
};

// ── Deterministic Identities ──

/// Derive a stable 32-byte identity from a single seed byte.
pub fn identity(seed: u8) -> Address {
    hash_blake3(&[seed; 32])
}

/// Alice: seed=1, deploys and owns the registry in most tests.
pub fn alice() -> Address {
    identity(1)
}

/// Bob: seed=2.
pub fn bob() -> Address {
    identity(2)
}

/// Charlie: seed=3.
pub fn charlie() -> Address {
    identity(3)
}

pub fn as_caller(addr: Address) -> CallContext {
    CallContext::direct(addr)
}

// ── Keys and Values ──

/// Data key derived from a human-readable name.
pub fn key(name: &str) -> DataKey {
    data_key(name)
}

/// Deterministic value of `len` bytes.
pub fn value_of_len(len: usize) -> Bytes {
    (0..len).map(|i| (i % 251) as u8).collect::<Vec<_>>().into()
}

// ── Registry Factories ──

/// Small packing parameters so tests cross every representation boundary
/// with short values.
pub const SMALL_INLINE: usize = 8;
pub const SMALL_CHUNK: usize = 16;

pub fn small_packing() -> StoreConfig {
    StoreConfig::with_packing(SMALL_INLINE, SMALL_CHUNK)
}

/// Registry over a fresh `MemStore`, owned by `owner`.
pub fn deploy_with_config(owner: Address, config: StoreConfig) -> Registry<MemStore> {
    Registry::deploy(MemStore::new(), config, owner).unwrap()
}

/// Registry with default limits, owned by Alice.
pub fn deploy_default() -> Registry<MemStore> {
    deploy_with_config(alice(), StoreConfig::default())
}

// ── Notifications ──

/// Subscribe a recorder to `registry` and return its shared log.
pub fn record_events(registry: &mut Registry<MemStore>) -> Arc<Mutex<Vec<Event>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    registry.subscribe(move |event: &Event| sink.lock().unwrap().push(event.clone()));
    log
}

pub fn data_changed(data_key: DataKey, data_value: impl Into<Bytes>) -> Event {
    Event::DataChanged {
        data_key,
        data_value: data_value.into(),
    }
}

pub fn ownership_transferred(previous_owner: Address, new_owner: Address) -> Event {
    Event::OwnershipTransferred {
        previous_owner,
        new_owner,
    }
}

/// Install a fmt subscriber once; output shows up with `--nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}
