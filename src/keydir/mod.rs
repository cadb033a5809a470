//! KeyDir Module
//!
//! In-memory index from key to the location of its latest record.
//!
//! ## Responsibilities
//! - Point every live key at exactly one record in the log
//! - Last-write-wins: a newer record for a key replaces the old entry
//! - Never store values, only their byte spans
//!
//! ## Data Structure Choice
//! Using a plain HashMap:
//! - Lookups are by exact key only (no range scans)
//! - Insertion order is irrelevant

mod table;

pub use table::KeyDir;

/// Location of a key's latest record in the log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEntry {
    /// Timestamp copied from the record header
    pub timestamp: u32,

    /// Byte offset of the record's first header byte
    pub offset: u32,

    /// Total record length (header + key + value)
    pub size: u32,
}

impl KeyEntry {
    pub fn new(timestamp: u32, offset: u32, size: u32) -> Self {
        Self {
            timestamp,
            offset,
            size,
        }
    }

    /// Offset one past the record's last byte
    pub fn end(&self) -> u64 {
        self.offset as u64 + self.size as u64
    }
}
