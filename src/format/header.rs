//! Record header
//!
//! Fixed-width prefix of every record: `timestamp | key_size | value_size`.

use bytes::{Buf, BufMut};

use crate::error::{CaskError, Result};

/// Header size: 3 little-endian u32 fields
pub const HEADER_SIZE: usize = 12;

/// Decoded record header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    /// Seconds since the Unix epoch when the record was written
    pub timestamp: u32,

    /// Length of the key in bytes
    pub key_size: u32,

    /// Length of the value in bytes
    pub value_size: u32,
}

impl RecordHeader {
    pub fn new(timestamp: u32, key_size: u32, value_size: u32) -> Self {
        Self {
            timestamp,
            key_size,
            value_size,
        }
    }

    /// Write the header into `buf`
    pub fn encode_into<B: BufMut>(&self, buf: &mut B) {
        buf.put_u32_le(self.timestamp);
        buf.put_u32_le(self.key_size);
        buf.put_u32_le(self.value_size);
    }

    /// Decode a header from the first `HEADER_SIZE` bytes of `bytes`
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(CaskError::Corruption(format!(
                "Incomplete header: expected {} bytes, got {}",
                HEADER_SIZE,
                bytes.len()
            )));
        }

        let mut buf = &bytes[..HEADER_SIZE];
        Ok(Self {
            timestamp: buf.get_u32_le(),
            key_size: buf.get_u32_le(),
            value_size: buf.get_u32_le(),
        })
    }

    /// Length of the key and value that follow the header
    pub fn payload_size(&self) -> u64 {
        self.key_size as u64 + self.value_size as u64
    }

    /// Total length of the record (header + key + value)
    ///
    /// `u64` because two maximal size fields overflow a `u32`.
    pub fn record_size(&self) -> u64 {
        HEADER_SIZE as u64 + self.payload_size()
    }
}
