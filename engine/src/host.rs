//! Host interface: slot access, metering and notification capture for
//! one registry call.
//!
//! The `HostInterface` trait decouples the gate, packing and store logic
//! from how a call is hosted. `Session` is the implementation the
//! `Registry` uses: it layers a `StateOverlay` over the committed
//! `StateStore`, meters gas, enforces the slot and per-call limits of
//! `StoreConfig`, and buffers notifications until the call commits.

use datareg_hostapi::{HostError, StateStore, StoreConfig};
use datareg_primitives::{
    gas::{gas_cost_emit_event, gas_cost_slot_delete, gas_cost_slot_get, gas_cost_slot_set},
    CallResult, Event, GasMeter, OverlayResult, Receipt, StateOverlay, WriteSet,
};

/// Slot access and side effects available to registry logic.
///
/// Every method charges gas before it takes effect, so a call that runs
/// out of gas fails before touching the slot.
pub trait HostInterface {
    /// Read a slot. Reads see writes staged earlier in the same call.
    ///
    /// Gas: `G_SLOT_GET + (key_len + value_len) * G_PER_BYTE`
    fn state_get(&mut self, key: &[u8]) -> CallResult<Option<Vec<u8>>>;

    /// Stage a slot write.
    ///
    /// Gas: `G_SLOT_SET + (key_len + value_len) * G_PER_BYTE`
    fn state_set(&mut self, key: &[u8], value: Vec<u8>) -> CallResult<()>;

    /// Stage a slot deletion.
    ///
    /// Gas: `G_SLOT_DEL + key_len * G_PER_BYTE`
    fn state_delete(&mut self, key: &[u8]) -> CallResult<()>;

    /// Buffer a notification. Bounded by `max_events`.
    ///
    /// Gas: `G_EMIT_EVENT + payload_len * G_PER_BYTE`
    fn emit_event(&mut self, event: Event) -> CallResult<()>;

    /// Limits and packing parameters of the hosting registry.
    fn config(&self) -> &StoreConfig;

    /// Access the gas meter.
    fn gas_meter(&self) -> &GasMeter;
}

/// Per-call host state over committed storage.
///
/// Created fresh for each call. `finish` hands back the staged write set
/// and the receipt; dropping the session instead discards both.
pub struct Session<'s> {
    /// Committed state (read-only during the call).
    committed: &'s dyn StateStore,
    /// Limits and packing parameters.
    config: &'s StoreConfig,
    /// Writes staged by this call.
    overlay: StateOverlay,
    /// Gas consumed by this call.
    gas_meter: GasMeter,
    /// Notifications emitted by this call, in order.
    events: Vec<Event>,
}

impl<'s> Session<'s> {
    /// Open a session over committed state.
    pub fn new(committed: &'s dyn StateStore, config: &'s StoreConfig) -> Self {
        Self {
            committed,
            config,
            overlay: StateOverlay::new(),
            gas_meter: GasMeter::new(config.gas_limit),
            events: Vec::new(),
        }
    }

    /// Access the staged writes.
    pub fn overlay(&self) -> &StateOverlay {
        &self.overlay
    }

    /// Access buffered notifications.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Close the session, returning the write set to commit and the receipt.
    pub fn finish(self) -> (WriteSet, Receipt) {
        let receipt = Receipt {
            gas_used: self.gas_meter.consumed(),
            events: self.events,
        };
        (self.overlay.into_writes(), receipt)
    }

    fn check_key(&self, key: &[u8]) -> CallResult<()> {
        if key.is_empty() || key.len() > self.config.max_slot_key_len {
            return Err(HostError::slot_key_too_large().into());
        }
        Ok(())
    }

    fn check_write_budget(&self, key: &[u8], value_len: Option<usize>) -> CallResult<()> {
        if self.overlay.projected_write_bytes(key, value_len) > self.config.max_write_bytes {
            return Err(HostError::write_limit().into());
        }
        Ok(())
    }
}

impl HostInterface for Session<'_> {
    fn state_get(&mut self, key: &[u8]) -> CallResult<Option<Vec<u8>>> {
        self.check_key(key)?;
        self.gas_meter.consume(gas_cost_slot_get(key.len()))?;

        let value = match self.overlay.get(key) {
            OverlayResult::Found(value) => Some(value),
            OverlayResult::Deleted => None,
            OverlayResult::NotInOverlay => self.committed.get(key)?,
        };
        if let Some(v) = &value {
            self.gas_meter.consume_with_bytes(0, v.len())?;
        }
        Ok(value)
    }

    fn state_set(&mut self, key: &[u8], value: Vec<u8>) -> CallResult<()> {
        self.check_key(key)?;
        if value.len() > self.config.max_slot_len {
            return Err(HostError::slot_value_too_large().into());
        }
        self.check_write_budget(key, Some(value.len()))?;
        self.gas_meter.consume(gas_cost_slot_set(key.len(), value.len()))?;

        self.overlay.set(key.to_vec(), value);
        Ok(())
    }

    fn state_delete(&mut self, key: &[u8]) -> CallResult<()> {
        self.check_key(key)?;
        self.check_write_budget(key, None)?;
        self.gas_meter.consume(gas_cost_slot_delete(key.len()))?;

        self.overlay.delete(key.to_vec());
        Ok(())
    }

    fn emit_event(&mut self, event: Event) -> CallResult<()> {
        if self.events.len() >= self.config.max_events as usize {
            return Err(HostError::event_limit().into());
        }
        self.gas_meter.consume(gas_cost_emit_event(event.payload_len()))?;
        self.events.push(event);
        Ok(())
    }

    fn config(&self) -> &StoreConfig {
        self.config
    }

    fn gas_meter(&self) -> &GasMeter {
        &self.gas_meter
    }
}
