//! Registry executor: runs each call as one atomic unit.
//!
//! Every call follows the same lifecycle:
//!
//! 1. Open a `Session` over the committed store (fresh gas meter, empty
//!    overlay, no events)
//! 2. Run the operation against the session
//! 3. On failure, drop the session: nothing was written, nothing is
//!    notified
//! 4. On success, apply the overlay with one `StateStore::apply`, then hand
//!    the call's events to every observer in emission order
//!
//! Writes take `&mut self`, so calls on one registry are serialized.

use tracing::debug;

use datareg_hostapi::{StateStore, StoreConfig};
use datareg_primitives::{
    Address, CallResult, DataKey, DataValue, Event, InterfaceId, Receipt,
};

use crate::call::{dispatch, Call, CallContext};
use crate::error::RegistryError;
use crate::host::{HostInterface, Session};
use crate::{interface, ownership, store};

/// Receives the notifications of committed calls.
pub trait EventObserver: Send {
    /// Called once per event, in emission order, after the call commits.
    fn on_event(&mut self, event: &Event);
}

impl<F> EventObserver for F
where
    F: FnMut(&Event) + Send,
{
    fn on_event(&mut self, event: &Event) {
        self(event)
    }
}

/// An owner-gated key-value registry over a `StateStore`.
pub struct Registry<S: StateStore> {
    store: S,
    config: StoreConfig,
    observers: Vec<Box<dyn EventObserver>>,
}

impl<S: StateStore> Registry<S> {
    /// Wrap `store` without initializing it. Until `initialize` runs the
    /// registry has no owner and rejects every gated call.
    pub fn new(store: S, config: StoreConfig) -> Result<Self, RegistryError> {
        config.validate()?;
        Ok(Self {
            store,
            config,
            observers: Vec::new(),
        })
    }

    /// Wrap `store` and install `owner` as its first owner.
    pub fn deploy(store: S, config: StoreConfig, owner: Address) -> Result<Self, RegistryError> {
        let mut registry = Self::new(store, config)?;
        registry.initialize(owner)?;
        Ok(registry)
    }

    /// Register an observer for the events of later committed calls.
    pub fn subscribe(&mut self, observer: impl EventObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// The committed store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Limits and packing parameters applied to every call.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Give the store back, dropping observers.
    pub fn into_store(self) -> S {
        self.store
    }

    /// One-shot initializer. Fails with `AlreadyInitialized` afterwards.
    pub fn initialize(&mut self, owner: Address) -> CallResult<Receipt> {
        self.transact("initialize", |host| ownership::initialize(host, owner))
    }

    /// Current owner, `ZERO_ADDRESS` if renounced or never initialized.
    pub fn owner(&self) -> CallResult<Address> {
        self.view(ownership::read_owner)
    }

    /// Hand ownership to `new_owner`. Owner only; the zero address is
    /// accepted and leaves the registry ownerless.
    pub fn transfer_ownership(&mut self, ctx: &CallContext, new_owner: Address) -> CallResult<Receipt> {
        self.execute(ctx, Call::TransferOwnership { new_owner })
    }

    /// Give up ownership for good. Owner only.
    pub fn renounce_ownership(&mut self, ctx: &CallContext) -> CallResult<Receipt> {
        self.execute(ctx, Call::RenounceOwnership)
    }

    /// Value stored under `key`; empty if never written or cleared.
    pub fn get_data(&self, key: &DataKey) -> CallResult<DataValue> {
        self.view(|host| store::get_data(host, key))
    }

    /// Values stored under `keys`, positionally.
    pub fn get_data_batch(&self, keys: &[DataKey]) -> CallResult<Vec<DataValue>> {
        self.view(|host| store::get_data_batch(host, keys))
    }

    /// Store `value` under `key`. Owner only; an empty value clears the
    /// key. Emits one `DataChanged`.
    pub fn set_data(
        &mut self,
        ctx: &CallContext,
        key: DataKey,
        value: impl Into<DataValue>,
    ) -> CallResult<Receipt> {
        self.execute(
            ctx,
            Call::SetData {
                key,
                value: value.into(),
            },
        )
    }

    /// Store `values[i]` under `keys[i]` in order, all or nothing. Owner
    /// only; the lengths must match. Emits one `DataChanged` per pair.
    pub fn set_data_batch(
        &mut self,
        ctx: &CallContext,
        keys: Vec<DataKey>,
        values: Vec<DataValue>,
    ) -> CallResult<Receipt> {
        self.execute(ctx, Call::SetDataBatch { keys, values })
    }

    /// Whether the registry implements interface `id`. Never true for
    /// `0xffffffff`.
    pub fn supports_interface(&self, id: InterfaceId) -> bool {
        interface::supports_interface(id)
    }

    /// Run a gated call as `ctx`. Failures leave the store untouched and
    /// notify no one.
    pub fn execute(&mut self, ctx: &CallContext, call: Call) -> CallResult<Receipt> {
        let operation = call.name();
        self.transact(operation, |host| dispatch(host, ctx, call))
    }

    fn transact<F>(&mut self, operation: &'static str, f: F) -> CallResult<Receipt>
    where
        F: FnOnce(&mut dyn HostInterface) -> CallResult<()>,
    {
        let mut session = Session::new(&self.store, &self.config);
        if let Err(err) = f(&mut session) {
            debug!(
                operation,
                gas_used = session.gas_meter().consumed(),
                error = %err,
                "call reverted"
            );
            return Err(err);
        }

        let (writes, receipt) = session.finish();
        let slots = writes.len();
        self.store.apply(writes)?;
        debug!(
            operation,
            gas_used = receipt.gas_used,
            slots,
            events = receipt.events.len(),
            "call committed"
        );

        for observer in &mut self.observers {
            for event in &receipt.events {
                observer.on_event(event);
            }
        }
        Ok(receipt)
    }

    fn view<T, F>(&self, f: F) -> CallResult<T>
    where
        F: FnOnce(&mut dyn HostInterface) -> CallResult<T>,
    {
        let mut session = Session::new(&self.store, &self.config);
        f(&mut session)
    }
}
