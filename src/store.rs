//! Store Module
//!
//! The Bitcask engine: one append-only log plus an in-memory keydir.
//!
//! ## Responsibilities
//! - Rebuild the keydir from the log on open (blocking)
//! - Append one record per `set` and point the key at it
//! - Serve `get` with a single seek and read
//! - Refuse further work once a write could not be confirmed

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{CaskError, Result};
use crate::format::{decode_kv, encode_kv};
use crate::keydir::{KeyDir, KeyEntry};
use crate::log::{LogReader, LogRecovery, LogWriter};

/// A log-structured key-value store
///
/// ## Concurrency Model: Single Owner
///
/// Every operation takes `&mut self` (reads move the file cursor), so one
/// owner issues one operation at a time. Use [`SharedStore`] to share a
/// store between threads.
///
/// [`SharedStore`]: crate::SharedStore
pub struct Store {
    /// Store configuration
    config: Config,

    /// Key → location of its latest record
    keydir: KeyDir,

    /// Read handle for seeks
    reader: LogReader,

    /// Append handle, owns the next-write offset
    writer: LogWriter,

    /// Set once a write could not be confirmed on disk
    poisoned: bool,
}

impl Store {
    /// Open or create a store with the given config
    ///
    /// On startup:
    /// 1. Create the log file if missing (when allowed)
    /// 2. Replay the log to rebuild the keydir
    /// 3. Open the append handle at the recovered end of the log
    /// 4. Ready to serve requests
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;
        let path = config.path.as_path();

        // Step 1: Create the log file if it doesn't exist
        if config.create_if_missing && !path.exists() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            OpenOptions::new().create(true).append(true).open(path)?;
            info!(path = %path.display(), "Created new log file");
        }

        // Step 2: Rebuild the keydir
        let (keydir, recovery) = LogRecovery::recover(path, config.read_buffer_size)?;

        // Step 3: Appends continue at the true end of the log
        let writer = LogWriter::open(path, recovery.end_offset)?;
        let reader = LogReader::open(path)?;

        Ok(Self {
            config,
            keydir,
            reader,
            writer,
            poisoned: false,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified log file
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(Config::builder().path(path.as_ref()).build())
    }

    /// Get the value for `key`
    ///
    /// A key that was never written yields an empty string, exactly like a
    /// key whose value is empty.
    pub fn get(&mut self, key: &str) -> Result<String> {
        self.check_poisoned()?;

        let entry = match self.keydir.get(key) {
            Some(entry) => *entry,
            None => return Ok(String::new()),
        };

        let record = self.reader.read_record(&entry)?;
        let (_timestamp, stored_key, value) = decode_kv(&record)?;

        if stored_key != key {
            return Err(CaskError::Corruption(format!(
                "record at offset {} holds key {:?}, expected {:?}",
                entry.offset, stored_key, key
            )));
        }

        Ok(value)
    }

    /// Set `key` to `value`
    ///
    /// Steps:
    /// 1. Encode the record with the current timestamp
    /// 2. Append it to the log and sync to disk
    /// 3. Point the key at the new record
    ///
    /// A failed append poisons the store: the log may now hold bytes the
    /// keydir and offset counter know nothing about.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.check_poisoned()?;

        // Step 1: Encode
        let timestamp = unix_timestamp();
        let (total_size, record) = encode_kv(timestamp, key, value)?;

        // Step 2: Append + sync
        let offset = match self.writer.append(&record) {
            Ok(offset) => offset,
            Err(e) => {
                if e.is_fatal() {
                    error!(key, error = %e, "Log append failed, poisoning store");
                    self.poisoned = true;
                }
                return Err(e);
            }
        };

        // Step 3: Install in keydir (append already bounded total_size to u32)
        let entry = KeyEntry::new(timestamp, offset, total_size as u32);
        self.keydir.insert(key.to_string(), entry);

        debug!(key, offset, size = total_size, "Set key");
        Ok(())
    }

    /// Close the store
    ///
    /// Syncs the log and releases both file handles.
    pub fn close(mut self) -> Result<()> {
        if !self.poisoned {
            self.writer.sync()?;
        }

        info!(
            path = %self.config.path.display(),
            keys = self.keydir.len(),
            end_offset = self.writer.current_offset(),
            "Store closed"
        );

        Ok(())
    }

    fn check_poisoned(&self) -> Result<()> {
        if self.poisoned {
            return Err(CaskError::Poisoned);
        }
        Ok(())
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Get the log file path
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Get the number of distinct keys
    pub fn len(&self) -> usize {
        self.keydir.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keydir.is_empty()
    }

    /// Get the keydir entry for `key`
    pub fn entry(&self, key: &str) -> Option<KeyEntry> {
        self.keydir.get(key).copied()
    }

    /// Get the offset the next record will be written at
    pub fn current_offset(&self) -> u32 {
        self.writer.current_offset()
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Seconds since the Unix epoch, truncated to the u32 header field
fn unix_timestamp() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as u32)
        .unwrap_or(0)
}
