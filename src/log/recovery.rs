//! Log Recovery
//!
//! Rebuilds the keydir by replaying every record in the log.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

use tracing::{info, warn};

use crate::error::{CaskError, Result};
use crate::format::{decode_key, RecordHeader, HEADER_SIZE};
use crate::keydir::{KeyDir, KeyEntry};

/// Handles keydir recovery on open
pub struct LogRecovery;

/// Result of a recovery operation
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecoveryResult {
    /// Number of records decoded, including superseded ones
    pub records_recovered: u64,

    /// Number of distinct keys in the rebuilt keydir
    pub live_keys: usize,

    /// Offset one past the last record (the true log length)
    pub end_offset: u32,
}

impl LogRecovery {
    /// Recover the keydir from a log file
    ///
    /// This will:
    /// 1. Read records sequentially from offset 0
    /// 2. Point each record's key at that record (later records win)
    /// 3. Stop cleanly when a header read returns zero bytes
    /// 4. Fail on any partial header or short payload
    pub fn recover(path: &Path, read_buffer_size: usize) -> Result<(KeyDir, RecoveryResult)> {
        let file = File::open(path)?;
        let file_len = file.metadata()?.len();
        let mut reader = BufReader::with_capacity(read_buffer_size, file);

        let mut keydir = KeyDir::new();
        let mut records_recovered = 0u64;
        let mut offset = 0u64;

        loop {
            let mut header_buf = [0u8; HEADER_SIZE];
            let n = read_full(&mut reader, &mut header_buf)?;
            if n == 0 {
                break;
            }
            if n < HEADER_SIZE {
                return Err(corruption(format!(
                    "truncated header at offset {}: got {} of {} bytes",
                    offset, n, HEADER_SIZE
                )));
            }

            let header = RecordHeader::decode(&header_buf)?;
            let end = offset + header.record_size();

            // Checked before allocating so a garbage header cannot request gigabytes
            if end > file_len {
                return Err(corruption(format!(
                    "truncated record at offset {}: needs {} bytes, log has {}",
                    offset,
                    header.record_size(),
                    file_len - offset
                )));
            }
            if end > u32::MAX as u64 {
                return Err(corruption(format!(
                    "record at offset {} ends past the u32 offset space",
                    offset
                )));
            }

            let mut record = vec![0u8; header.record_size() as usize];
            record[..HEADER_SIZE].copy_from_slice(&header_buf);
            reader
                .read_exact(&mut record[HEADER_SIZE..])
                .map_err(|e| match e.kind() {
                    ErrorKind::UnexpectedEof => corruption(format!(
                        "short payload read for record at offset {}",
                        offset
                    )),
                    _ => CaskError::Io(e),
                })?;

            let (timestamp, key) = decode_key(&record)?;
            keydir.insert(
                key,
                KeyEntry::new(timestamp, offset as u32, header.record_size() as u32),
            );

            records_recovered += 1;
            offset = end;
        }

        let result = RecoveryResult {
            records_recovered,
            live_keys: keydir.len(),
            end_offset: offset as u32,
        };

        info!(
            path = %path.display(),
            records = result.records_recovered,
            keys = result.live_keys,
            end_offset = result.end_offset,
            "Log recovery complete"
        );

        Ok((keydir, result))
    }

    /// Verify integrity of a log file without keeping the keydir
    pub fn verify(path: &Path, read_buffer_size: usize) -> Result<RecoveryResult> {
        Self::recover(path, read_buffer_size).map(|(_, result)| result)
    }
}

fn corruption(msg: String) -> CaskError {
    warn!("{}", msg);
    CaskError::Corruption(msg)
}

/// Read until `buf` is full or EOF; returns the number of bytes read
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}
