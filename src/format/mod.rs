//! Record Format Module
//!
//! Pure encode/decode functions for the on-disk record. No I/O, no state.
//!
//! ## File Format
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │ Record 1                                              │
//! │ ┌───────────┬────────────┬────────────┬─────┬───────┐ │
//! │ │ Tstamp(4) │ KeyLen (4) │ ValLen (4) │ Key │ Value │ │
//! │ └───────────┴────────────┴────────────┴─────┴───────┘ │
//! ├───────────────────────────────────────────────────────┤
//! │ Record 2                                              │
//! │ ...                                                   │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! All header fields are little-endian `u32`. There is no magic number,
//! version marker, padding or checksum: a log is nothing but records.

mod codec;
mod header;

pub use codec::{decode_header, decode_key, decode_kv, encode_kv};
pub use header::{RecordHeader, HEADER_SIZE};
