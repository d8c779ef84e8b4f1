//! Ownership gate.
//!
//! The owner lives in the reserved slot `meta/owner`. The zero address is
//! the "no owner" sentinel and is stored by deleting the slot, so a fresh
//! or renounced registry reads the same way. `meta/initialized` records
//! that `initialize` ran.
//!
//! The gate is `ensure_owner`: every gated operation calls it before any
//! other slot access. It never passes while the owner is the zero address,
//! which makes renouncement terminal.

use tracing::debug;

use datareg_primitives::{
    types::{is_zero_address, to_hex},
    Address, CallError, CallResult, ErrorCode, Event, ZERO_ADDRESS,
};

use crate::call::CallContext;
use crate::host::HostInterface;

/// Slot holding the current owner.
pub const OWNER_SLOT: &[u8] = b"meta/owner";

/// Slot marking an initialized registry.
pub const INITIALIZED_SLOT: &[u8] = b"meta/initialized";

/// Read the current owner, `ZERO_ADDRESS` if none.
pub fn read_owner(host: &mut dyn HostInterface) -> CallResult<Address> {
    match host.state_get(OWNER_SLOT)? {
        None => Ok(ZERO_ADDRESS),
        Some(raw) => raw
            .as_slice()
            .try_into()
            .map_err(|_| CallError::Host(ErrorCode::InvalidEncoding)),
    }
}

fn write_owner(host: &mut dyn HostInterface, owner: &Address) -> CallResult<()> {
    if is_zero_address(owner) {
        host.state_delete(OWNER_SLOT)
    } else {
        host.state_set(OWNER_SLOT, owner.to_vec())
    }
}

/// Fail with `Unauthorized` unless `ctx.caller` is the current owner.
///
/// Returns the owner on success.
pub fn ensure_owner(host: &mut dyn HostInterface, ctx: &CallContext) -> CallResult<Address> {
    let owner = read_owner(host)?;
    if is_zero_address(&owner) || ctx.caller != owner {
        return Err(CallError::Unauthorized { caller: ctx.caller });
    }
    Ok(owner)
}

fn set_owner(
    host: &mut dyn HostInterface,
    previous_owner: Address,
    new_owner: Address,
) -> CallResult<()> {
    write_owner(host, &new_owner)?;
    debug!(
        previous = %to_hex(&previous_owner),
        new = %to_hex(&new_owner),
        "ownership transferred"
    );
    host.emit_event(Event::OwnershipTransferred {
        previous_owner,
        new_owner,
    })
}

/// Hand ownership to `new_owner`. Any address is accepted, including the
/// current owner.
pub fn transfer_ownership(
    host: &mut dyn HostInterface,
    ctx: &CallContext,
    new_owner: Address,
) -> CallResult<()> {
    let previous_owner = ensure_owner(host, ctx)?;
    set_owner(host, previous_owner, new_owner)
}

/// Give up ownership for good.
pub fn renounce_ownership(host: &mut dyn HostInterface, ctx: &CallContext) -> CallResult<()> {
    let previous_owner = ensure_owner(host, ctx)?;
    set_owner(host, previous_owner, ZERO_ADDRESS)
}

/// Install the first owner. Only succeeds once per registry.
pub fn initialize(host: &mut dyn HostInterface, owner: Address) -> CallResult<()> {
    if host.state_get(INITIALIZED_SLOT)?.is_some() {
        return Err(CallError::AlreadyInitialized);
    }
    host.state_set(INITIALIZED_SLOT, vec![1])?;
    set_owner(host, ZERO_ADDRESS, owner)
}
