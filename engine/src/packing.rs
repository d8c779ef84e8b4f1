//! Size-tiered value packing.
//!
//! A data value is stored under slots derived from its key:
//!
//! ```text
//! data/<key>                 head slot (inline record or chunk header)
//! data/<key>/<index u32 BE>  chunk slots of a chunked value
//! ```
//!
//! - empty values occupy no slot
//! - values up to `inline_threshold` bytes live in the head slot
//! - larger values are split into `chunk_size` pieces; the head slot holds
//!   the length, chunk layout and BLAKE3 digest of the value
//!
//! Each value byte is copied once on write and once on read, and every
//! slot touched is charged base + per-byte gas, so the cost of both paths
//! is linear in the value length. Overwriting a chunked value deletes the
//! chunk slots the new representation does not reuse.

use bytes::Bytes;
use tracing::{trace, warn};

use datareg_primitives::{
    codec::{decode_slot_record, encode_chunk_header, encode_inline},
    crypto::hash_blake3,
    types::{concat_bytes, to_hex},
    CallError, CallResult, ChunkHeader, DataKey, DataValue, ErrorCode, SlotRecord,
};

use crate::host::HostInterface;

/// Prefix shared by every data slot.
const DATA_PREFIX: &[u8] = b"data/";

/// Build the head slot key of a data key.
pub fn head_key(key: &DataKey) -> Vec<u8> {
    concat_bytes(&[DATA_PREFIX, key])
}

/// Build the slot key of chunk `index` of a data key.
pub fn chunk_key(key: &DataKey, index: u32) -> Vec<u8> {
    concat_bytes(&[DATA_PREFIX, key, b"/", &index.to_be_bytes()])
}

fn corrupt(key: &DataKey, reason: impl Into<String>) -> CallError {
    let reason = reason.into();
    warn!(data_key = %to_hex(key), %reason, "corrupt data entry");
    CallError::CorruptEntry { key: *key, reason }
}

/// Read and decode the head slot of `key`.
fn read_head(host: &mut dyn HostInterface, key: &DataKey) -> CallResult<Option<SlotRecord>> {
    match host.state_get(&head_key(key))? {
        None => Ok(None),
        Some(raw) => decode_slot_record(raw)
            .map(Some)
            .map_err(|e| corrupt(key, e.to_string())),
    }
}

/// Count the chunk slots present under `key`, from index 0 up to the first
/// missing one.
fn count_present_chunks(host: &mut dyn HostInterface, key: &DataKey) -> CallResult<u32> {
    let mut count = 0u32;
    while host.state_get(&chunk_key(key, count))?.is_some() {
        count += 1;
    }
    Ok(count)
}

/// Store `value` under `key`, replacing whatever representation was
/// there before.
pub fn write_value(host: &mut dyn HostInterface, key: &DataKey, value: &[u8]) -> CallResult<()> {
    // A corrupt previous head cannot say which chunks it owned, so the
    // chunk slots actually present are counted instead.
    let previous_chunks = match read_head(host, key) {
        Ok(Some(SlotRecord::Chunked(header))) => header.chunk_count,
        Ok(_) => 0,
        Err(CallError::CorruptEntry { .. }) => count_present_chunks(host, key)?,
        Err(err) => return Err(err),
    };

    let inline_threshold = host.config().inline_threshold;
    let chunk_size = host.config().chunk_size;

    let chunks_written = if value.is_empty() {
        trace!(data_key = %to_hex(key), "clearing value");
        host.state_delete(&head_key(key))?;
        0
    } else if value.len() <= inline_threshold {
        trace!(data_key = %to_hex(key), len = value.len(), "storing inline");
        host.state_set(&head_key(key), encode_inline(value))?;
        0
    } else {
        let chunk_size_u32 =
            u32::try_from(chunk_size).map_err(|_| CallError::Host(ErrorCode::SlotValueTooLarge))?;
        let header = ChunkHeader::new(value.len() as u64, chunk_size_u32, hash_blake3(value))
            .ok_or(CallError::Host(ErrorCode::WriteLimit))?;
        trace!(
            data_key = %to_hex(key),
            len = value.len(),
            chunks = header.chunk_count,
            "storing chunked"
        );
        for (index, chunk) in (0u32..).zip(value.chunks(chunk_size)) {
            host.state_set(&chunk_key(key, index), chunk.to_vec())?;
        }
        host.state_set(&head_key(key), encode_chunk_header(&header))?;
        header.chunk_count
    };

    for index in chunks_written..previous_chunks {
        host.state_delete(&chunk_key(key, index))?;
    }
    Ok(())
}

/// Read the value stored under `key`. Absent keys read as empty bytes.
pub fn read_value(host: &mut dyn HostInterface, key: &DataKey) -> CallResult<DataValue> {
    let header = match read_head(host, key)? {
        None => return Ok(Bytes::new()),
        Some(SlotRecord::Inline(value)) => return Ok(value),
        Some(SlotRecord::Chunked(header)) => header,
    };

    // Bounded by what one call may write, so a damaged header cannot
    // force a huge allocation up front.
    let capacity = header.total_len.min(host.config().max_write_bytes);
    let mut value = Vec::with_capacity(usize::try_from(capacity).unwrap_or(0));

    for index in 0..header.chunk_count {
        let chunk = host
            .state_get(&chunk_key(key, index))?
            .ok_or_else(|| corrupt(key, format!("missing chunk {}", index)))?;
        if Some(chunk.len()) != header.chunk_len(index) {
            return Err(corrupt(
                key,
                format!("chunk {} has {} bytes", index, chunk.len()),
            ));
        }
        value.extend_from_slice(&chunk);
    }

    if hash_blake3(&value) != header.digest {
        return Err(corrupt(key, "digest mismatch"));
    }
    Ok(Bytes::from(value))
}
