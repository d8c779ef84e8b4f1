//! Keyed value store operations.
//!
//! Reads are ungated. Writes pass the ownership gate first, then go
//! through the packing layer and emit one `DataChanged` per written pair.

use datareg_primitives::{CallError, CallResult, DataKey, DataValue, Event};

use crate::call::CallContext;
use crate::host::HostInterface;
use crate::ownership::ensure_owner;
use crate::packing::{read_value, write_value};

/// Read one value; empty for an absent key.
pub fn get_data(host: &mut dyn HostInterface, key: &DataKey) -> CallResult<DataValue> {
    read_value(host, key)
}

/// Read many values positionally. Each occurrence of a repeated key is
/// resolved on its own.
pub fn get_data_batch(host: &mut dyn HostInterface, keys: &[DataKey]) -> CallResult<Vec<DataValue>> {
    keys.iter().map(|key| read_value(host, key)).collect()
}

fn put(host: &mut dyn HostInterface, key: DataKey, value: DataValue) -> CallResult<()> {
    write_value(host, &key, &value)?;
    host.emit_event(Event::DataChanged {
        data_key: key,
        data_value: value,
    })
}

/// Owner-only write of one pair. An empty value clears the key.
pub fn set_data(
    host: &mut dyn HostInterface,
    ctx: &CallContext,
    key: DataKey,
    value: DataValue,
) -> CallResult<()> {
    ensure_owner(host, ctx)?;
    put(host, key, value)
}

/// Owner-only write of many pairs, applied in order.
///
/// The ownership gate runs before the length check, so non-owners always
/// see `Unauthorized`. Repeated keys keep the last value but notify once
/// per pair.
pub fn set_data_batch(
    host: &mut dyn HostInterface,
    ctx: &CallContext,
    keys: Vec<DataKey>,
    values: Vec<DataValue>,
) -> CallResult<()> {
    ensure_owner(host, ctx)?;
    if keys.len() != values.len() {
        return Err(CallError::DataKeysValuesLengthMismatch {
            keys_len: keys.len(),
            values_len: values.len(),
        });
    }
    for (key, value) in keys.into_iter().zip(values) {
        put(host, key, value)?;
    }
    Ok(())
}
