//! Record codec
//!
//! Encoding and decoding of complete `(timestamp, key, value)` records.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{CaskError, Result};

use super::{RecordHeader, HEADER_SIZE};

// =============================================================================
// Encoding
// =============================================================================

/// Encode a record to bytes
///
/// Returns the total record size alongside the encoded bytes.
pub fn encode_kv(timestamp: u32, key: &str, value: &str) -> Result<(usize, Bytes)> {
    let key_size = size_field("key", key.len())?;
    let value_size = size_field("value", value.len())?;

    let header = RecordHeader::new(timestamp, key_size, value_size);
    let total_size = HEADER_SIZE + key.len() + value.len();

    let mut buf = BytesMut::with_capacity(total_size);
    header.encode_into(&mut buf);
    buf.put_slice(key.as_bytes());
    buf.put_slice(value.as_bytes());

    Ok((total_size, buf.freeze()))
}

fn size_field(what: &str, len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| {
        CaskError::RecordTooLarge(format!("{} of {} bytes exceeds u32::MAX", what, len))
    })
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode only the header fields: `(timestamp, key_size, value_size)`
pub fn decode_header(bytes: &[u8]) -> Result<(u32, u32, u32)> {
    let header = RecordHeader::decode(bytes)?;
    Ok((header.timestamp, header.key_size, header.value_size))
}

/// Decode the timestamp and key of a record, leaving the value untouched
///
/// Recovery only needs the key, so a value that is not valid text does not
/// stop the log from opening.
pub fn decode_key(bytes: &[u8]) -> Result<(u32, String)> {
    let header = RecordHeader::decode(bytes)?;

    let key_end = HEADER_SIZE + header.key_size as usize;
    if bytes.len() < key_end {
        return Err(CaskError::Corruption(format!(
            "Incomplete key: expected {} bytes, got {}",
            key_end,
            bytes.len()
        )));
    }

    let key = utf8("key", &bytes[HEADER_SIZE..key_end])?;
    Ok((header.timestamp, key))
}

/// Decode a full record: `(timestamp, key, value)`
///
/// `bytes` must hold at least the header-declared record length; anything
/// past that length is ignored.
pub fn decode_kv(bytes: &[u8]) -> Result<(u32, String, String)> {
    let header = RecordHeader::decode(bytes)?;

    let record_size = header.record_size();
    if (bytes.len() as u64) < record_size {
        return Err(CaskError::Corruption(format!(
            "Incomplete record: expected {} bytes, got {}",
            record_size,
            bytes.len()
        )));
    }

    let key_end = HEADER_SIZE + header.key_size as usize;
    let value_end = key_end + header.value_size as usize;

    let key = utf8("key", &bytes[HEADER_SIZE..key_end])?;
    let value = utf8("value", &bytes[key_end..value_end])?;

    Ok((header.timestamp, key, value))
}

fn utf8(what: &str, bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec())
        .map_err(|e| CaskError::Corruption(format!("{} is not valid UTF-8: {}", what, e)))
}
