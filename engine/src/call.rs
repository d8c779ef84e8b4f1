//! Caller identity and the gated call surface.
//!
//! Every gated call carries a `CallContext`. `caller` is the identity that
//! invoked the registry directly; `origin` is whoever started the chain of
//! calls. The gate only ever looks at `caller`, so a direct call and a call
//! through an intermediary are authorized by the same rule.

use datareg_primitives::{Address, CallResult, DataKey, DataValue, Receipt};
use datareg_hostapi::StateStore;

use crate::executor::Registry;
use crate::host::HostInterface;
use crate::{ownership, store};

/// Who is calling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    /// Immediate caller. Checked by the gate.
    pub caller: Address,
    /// Originator of the call chain. Informational.
    pub origin: Address,
}

impl CallContext {
    /// A call made by `caller` on its own behalf.
    pub fn direct(caller: Address) -> Self {
        Self {
            caller,
            origin: caller,
        }
    }

    /// A call made by `intermediary` on behalf of `origin`.
    pub fn forwarded(intermediary: Address, origin: Address) -> Self {
        Self {
            caller: intermediary,
            origin,
        }
    }
}

/// A gated registry operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    TransferOwnership { new_owner: Address },
    RenounceOwnership,
    SetData { key: DataKey, value: DataValue },
    SetDataBatch { keys: Vec<DataKey>, values: Vec<DataValue> },
}

impl Call {
    /// Operation name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TransferOwnership { .. } => "transfer_ownership",
            Self::RenounceOwnership => "renounce_ownership",
            Self::SetData { .. } => "set_data",
            Self::SetDataBatch { .. } => "set_data_batch",
        }
    }
}

/// Run `call` against `host` on behalf of `ctx`.
pub fn dispatch(host: &mut dyn HostInterface, ctx: &CallContext, call: Call) -> CallResult<()> {
    match call {
        Call::TransferOwnership { new_owner } => ownership::transfer_ownership(host, ctx, new_owner),
        Call::RenounceOwnership => ownership::renounce_ownership(host, ctx),
        Call::SetData { key, value } => store::set_data(host, ctx, key, value),
        Call::SetDataBatch { keys, values } => store::set_data_batch(host, ctx, keys, values),
    }
}

/// A programmatic intermediary with its own address.
///
/// Calls it forwards reach the registry with the forwarder as `caller`, so
/// they pass the gate only when the forwarder itself owns the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Forwarder {
    address: Address,
}

impl Forwarder {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Forward `call` to `registry` on behalf of `origin`.
    pub fn forward<S: StateStore>(
        &self,
        registry: &mut Registry<S>,
        origin: Address,
        call: Call,
    ) -> CallResult<Receipt> {
        registry.execute(&CallContext::forwarded(self.address, origin), call)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_context_constructors() {
        let direct = CallContext::direct([1; 32]);
        assert_eq!(direct.caller, direct.origin);

        let forwarded = CallContext::forwarded([2; 32], [1; 32]);
        assert_eq!(forwarded.caller, [2; 32]);
        assert_eq!(forwarded.origin, [1; 32]);
    }

    #[test]
    fn test_call_names() {
        assert_eq!(Call::RenounceOwnership.name(), "renounce_ownership");
        assert_eq!(
            Call::SetData {
                key: [0; 32],
                value: Bytes::new()
            }
            .name(),
            "set_data"
        );
    }
}
