//! Capability discovery.

use std::sync::OnceLock;

use datareg_primitives::{
    crypto::{data_store_interface_id, introspection_interface_id},
    types::INVALID_INTERFACE_ID,
    InterfaceId,
};

static SUPPORTED: OnceLock<[InterfaceId; 2]> = OnceLock::new();

/// Interface ids answered with `true`.
pub fn supported_interfaces() -> &'static [InterfaceId; 2] {
    SUPPORTED.get_or_init(|| [data_store_interface_id(), introspection_interface_id()])
}

/// Whether the registry implements interface `id`.
pub fn supports_interface(id: InterfaceId) -> bool {
    id != INVALID_INTERFACE_ID && supported_interfaces().contains(&id)
}
