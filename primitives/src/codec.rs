//! Slot record encoding for packed data values.
//!
//! A data key's head slot holds one of two records. All integers are
//! little-endian.
//!
//! ```text
//! inline:  [0x01] [value bytes ...]
//! chunked: [0x02] [total_len: u64] [chunk_count: u32] [chunk_size: u32] [digest: 32]
//! ```
//!
//! The inline record is used for values up to the inline threshold. The
//! chunked header describes a value split into `chunk_count` slots of
//! `chunk_size` bytes (the last one may be shorter), and carries the
//! BLAKE3 digest of the whole value so reassembly can be verified.

use bytes::Bytes;

use crate::types::Hash;

/// Tag byte of an inline record.
pub const TAG_INLINE: u8 = 0x01;

/// Tag byte of a chunked header.
pub const TAG_CHUNKED: u8 = 0x02;

/// Encoded size of a chunked header.
pub const CHUNK_HEADER_LEN: usize = 1 + 8 + 4 + 4 + 32;

/// Reasons a slot record fails to decode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("empty slot record")]
    Empty,
    #[error("unknown record tag 0x{0:02x}")]
    UnknownTag(u8),
    #[error("unexpected end of data")]
    UnexpectedEnd,
    #[error("{0} trailing bytes after chunk header")]
    TrailingBytes(usize),
    #[error("inconsistent chunk header: {0}")]
    Inconsistent(&'static str),
}

/// Layout of a chunked value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    /// Length of the whole value in bytes.
    pub total_len: u64,
    /// Number of chunk slots.
    pub chunk_count: u32,
    /// Size of every chunk except possibly the last.
    pub chunk_size: u32,
    /// BLAKE3 digest of the whole value.
    pub digest: Hash,
}

impl ChunkHeader {
    /// Describe a value of `total_len` bytes split into `chunk_size` pieces.
    ///
    /// Returns `None` for an empty value, a zero chunk size, or a value that
    /// would need more than `u32::MAX` chunks.
    pub fn new(total_len: u64, chunk_size: u32, digest: Hash) -> Option<Self> {
        if total_len == 0 || chunk_size == 0 {
            return None;
        }
        let chunk_count = u32::try_from(total_len.div_ceil(chunk_size as u64)).ok()?;
        Some(Self {
            total_len,
            chunk_count,
            chunk_size,
            digest,
        })
    }

    /// Expected length of chunk `index`, or `None` if out of range.
    pub fn chunk_len(&self, index: u32) -> Option<usize> {
        if index >= self.chunk_count {
            return None;
        }
        let start = index as u64 * self.chunk_size as u64;
        let len = (self.total_len - start).min(self.chunk_size as u64);
        Some(len as usize)
    }

    fn validate(&self) -> Result<(), DecodeError> {
        match Self::new(self.total_len, self.chunk_size, self.digest) {
            Some(expected) if expected.chunk_count == self.chunk_count => Ok(()),
            Some(_) => Err(DecodeError::Inconsistent("chunk count does not match length")),
            None => Err(DecodeError::Inconsistent("zero length or chunk size")),
        }
    }
}

/// A decoded head slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotRecord {
    /// The value is stored in the head slot itself.
    Inline(Bytes),
    /// The value is split across chunk slots.
    Chunked(ChunkHeader),
}

/// A cursor for reading bytes during decoding.
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let end = self.pos.checked_add(N).ok_or(DecodeError::UnexpectedEnd)?;
        let slice = self.data.get(self.pos..end).ok_or(DecodeError::UnexpectedEnd)?;
        self.pos = end;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    fn read_u32(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    fn read_u64(&mut self) -> Result<u64, DecodeError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }
}

/// Encode an inline record. The value is copied once.
pub fn encode_inline(value: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(1 + value.len());
    buf.push(TAG_INLINE);
    buf.extend_from_slice(value);
    buf
}

/// Encode a chunked header.
pub fn encode_chunk_header(header: &ChunkHeader) -> Vec<u8> {
    let mut buf = Vec::with_capacity(CHUNK_HEADER_LEN);
    buf.push(TAG_CHUNKED);
    buf.extend_from_slice(&header.total_len.to_le_bytes());
    buf.extend_from_slice(&header.chunk_count.to_le_bytes());
    buf.extend_from_slice(&header.chunk_size.to_le_bytes());
    buf.extend_from_slice(&header.digest);
    buf
}

/// Decode a head slot.
///
/// Inline payloads are sliced out of `raw` without copying.
pub fn decode_slot_record(raw: Vec<u8>) -> Result<SlotRecord, DecodeError> {
    match raw.first().copied() {
        None => Err(DecodeError::Empty),
        Some(TAG_INLINE) => Ok(SlotRecord::Inline(Bytes::from(raw).slice(1..))),
        Some(TAG_CHUNKED) => {
            let mut reader = Reader::new(&raw[1..]);
            let header = ChunkHeader {
                total_len: reader.read_u64()?,
                chunk_count: reader.read_u32()?,
                chunk_size: reader.read_u32()?,
                digest: reader.read_array()?,
            };
            if reader.remaining() != 0 {
                return Err(DecodeError::TrailingBytes(reader.remaining()));
            }
            header.validate()?;
            Ok(SlotRecord::Chunked(header))
        }
        Some(tag) => Err(DecodeError::UnknownTag(tag)),
    }
}
