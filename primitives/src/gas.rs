//! Gas accounting for registry calls.
//!
//! Every slot read, slot write, slot deletion and emitted notification is
//! charged a base cost plus `G_PER_BYTE` for each byte it touches. The
//! packing layer touches each value byte once, so the cost of a call grows
//! linearly with the size of the values it reads or writes.

use crate::error::{CallError, CallResult};

// ── Gas cost constants ──

/// Base cost for reading one slot.
pub const G_SLOT_GET: u64 = 200;

/// Base cost for writing one slot.
pub const G_SLOT_SET: u64 = 500;

/// Base cost for deleting one slot.
pub const G_SLOT_DEL: u64 = 300;

/// Per-byte cost added to slot operations and notifications.
pub const G_PER_BYTE: u64 = 3;

/// Base cost for emitting a notification.
pub const G_EMIT_EVENT: u64 = 100;

/// Compute the gas cost for reading a slot.
pub fn gas_cost_slot_get(key_len: usize) -> u64 {
    G_SLOT_GET.saturating_add((key_len as u64).saturating_mul(G_PER_BYTE))
}

/// Compute the gas cost for writing a slot.
pub fn gas_cost_slot_set(key_len: usize, val_len: usize) -> u64 {
    let byte_cost = (key_len as u64)
        .saturating_add(val_len as u64)
        .saturating_mul(G_PER_BYTE);
    G_SLOT_SET.saturating_add(byte_cost)
}

/// Compute the gas cost for deleting a slot.
pub fn gas_cost_slot_delete(key_len: usize) -> u64 {
    G_SLOT_DEL.saturating_add((key_len as u64).saturating_mul(G_PER_BYTE))
}

/// Compute the gas cost for emitting a notification of `payload_len` bytes.
pub fn gas_cost_emit_event(payload_len: usize) -> u64 {
    G_EMIT_EVENT.saturating_add((payload_len as u64).saturating_mul(G_PER_BYTE))
}

/// Tracks gas consumption during one registry call.
#[derive(Debug, Clone)]
pub struct GasMeter {
    limit: u64,
    consumed: u64,
}

impl GasMeter {
    /// Create a new gas meter with the given limit.
    pub fn new(limit: u64) -> Self {
        Self { limit, consumed: 0 }
    }

    /// Consume gas. Returns `OutOfGas` if the limit would be exceeded.
    ///
    /// On error the consumed count is left unchanged.
    pub fn consume(&mut self, amount: u64) -> CallResult<()> {
        let new_consumed = match self.consumed.checked_add(amount) {
            Some(v) if v <= self.limit => v,
            _ => {
                return Err(CallError::OutOfGas {
                    limit: self.limit,
                    used: self.consumed.saturating_add(amount),
                });
            }
        };
        self.consumed = new_consumed;
        Ok(())
    }

    /// Consume gas for a base cost plus a per-byte charge.
    pub fn consume_with_bytes(&mut self, base: u64, byte_count: usize) -> CallResult<()> {
        let byte_cost = (byte_count as u64).saturating_mul(G_PER_BYTE);
        self.consume(base.saturating_add(byte_cost))
    }

    /// Returns the total gas consumed so far.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gas_meter_basic() {
        let mut meter = GasMeter::new(1000);
        assert_eq!(meter.consumed(), 0);

        meter.consume(100).unwrap();
        assert_eq!(meter.consumed(), 100);
    }

    #[test]
    fn test_gas_meter_exact_limit() {
        let mut meter = GasMeter::new(100);
        meter.consume(100).unwrap();
        assert_eq!(meter.consumed(), 100);
        assert!(meter.consume(1).is_err());
    }

    #[test]
    fn test_gas_meter_exceeds_limit() {
        let mut meter = GasMeter::new(100);
        meter.consume(50).unwrap();
        let err = meter.consume(51).unwrap_err();
        assert_eq!(err, CallError::OutOfGas { limit: 100, used: 101 });
        // consumed should not have changed on error
        assert_eq!(meter.consumed(), 50);
    }

    #[test]
    fn test_gas_meter_overflow_protection() {
        let mut meter = GasMeter::new(u64::MAX);
        meter.consume(u64::MAX - 1).unwrap();
        let err = meter.consume(2).unwrap_err();
        assert!(matches!(err, CallError::OutOfGas { .. }));
        assert_eq!(meter.consumed(), u64::MAX - 1);
    }

    #[test]
    fn test_consume_with_bytes() {
        let mut meter = GasMeter::new(10_000);
        // G_SLOT_GET (200) + 10 bytes * G_PER_BYTE (3) = 230
        meter.consume_with_bytes(G_SLOT_GET, 10).unwrap();
        assert_eq!(meter.consumed(), 230);
    }

    #[test]
    fn test_consume_with_huge_byte_count_fails_cleanly() {
        let mut meter = GasMeter::new(1000);
        assert!(meter.consume_with_bytes(100, usize::MAX).is_err());
        assert_eq!(meter.consumed(), 0);
    }

    #[test]
    fn test_cost_functions() {
        assert_eq!(gas_cost_slot_get(0), 200);
        assert_eq!(gas_cost_slot_get(37), 200 + 111);
        assert_eq!(gas_cost_slot_set(10, 20), 500 + 90);
        assert_eq!(gas_cost_slot_set(0, 0), 500);
        assert_eq!(gas_cost_slot_delete(10), 300 + 30);
        assert_eq!(gas_cost_emit_event(50), 100 + 150);
    }

    #[test]
    fn test_set_cost_is_linear_in_value_size() {
        let small = gas_cost_slot_set(37, 1_000);
        let large = gas_cost_slot_set(37, 2_000);
        assert_eq!(large - small, 1_000 * G_PER_BYTE);
    }
}
