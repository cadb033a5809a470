//! Log Writer
//!
//! Handles appending records to the log file.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::error::{CaskError, Result};

/// Appends records to the log file
pub struct LogWriter {
    /// Handle opened in append mode; the OS positions every write at EOF
    file: File,

    /// Offset the next record will be written at
    current_offset: u32,
}

impl LogWriter {
    /// Open an existing log file for appending
    ///
    /// `current_offset` must be the true length of the file, normally the
    /// end offset reported by recovery.
    pub fn open(path: &Path, current_offset: u32) -> Result<Self> {
        let file = OpenOptions::new().append(true).open(path)?;
        Ok(Self::from_file(file, current_offset))
    }

    /// Wrap an already opened handle
    ///
    /// The handle must position writes at `current_offset`, which append
    /// mode guarantees when the offset equals the file length.
    pub fn from_file(file: File, current_offset: u32) -> Self {
        Self {
            file,
            current_offset,
        }
    }

    /// Append an encoded record and sync it to disk
    ///
    /// Returns the offset the record starts at. A failed write or sync is
    /// reported as `SyncFailed`: the bytes may or may not be in the file.
    pub fn append(&mut self, record: &[u8]) -> Result<u32> {
        let offset = self.current_offset;
        let end = offset as u64 + record.len() as u64;
        if end > u32::MAX as u64 {
            return Err(CaskError::LogFull {
                offset,
                size: record.len(),
            });
        }

        self.file.write_all(record).map_err(CaskError::SyncFailed)?;
        self.sync()?;

        self.current_offset = end as u32;
        Ok(offset)
    }

    /// Force sync to disk
    pub fn sync(&mut self) -> Result<()> {
        self.file.sync_all().map_err(CaskError::SyncFailed)
    }

    /// Get the offset the next record will be written at
    pub fn current_offset(&self) -> u32 {
        self.current_offset
    }
}
