//! Log Reader
//!
//! Random-access reads of single records.

use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::{CaskError, Result};
use crate::keydir::KeyEntry;

/// Read handle on the log file
pub struct LogReader {
    file: File,
}

impl LogReader {
    /// Open the log file for reading
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self { file })
    }

    /// Read the full record `entry` points at
    ///
    /// A short read means the file no longer holds the bytes the keydir
    /// promised, which is reported as corruption.
    pub fn read_record(&mut self, entry: &KeyEntry) -> Result<Vec<u8>> {
        self.file.seek(SeekFrom::Start(entry.offset as u64))?;

        let mut buf = vec![0u8; entry.size as usize];
        self.file.read_exact(&mut buf).map_err(|e| match e.kind() {
            ErrorKind::UnexpectedEof => CaskError::Corruption(format!(
                "Short read: record at offset {} ({} bytes) extends past end of log",
                entry.offset, entry.size
            )),
            _ => CaskError::Io(e),
        })?;

        Ok(buf)
    }
}
