//! Configuration for CaskKV
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{CaskError, Result};

/// Main configuration for a CaskKV store
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Path of the single append-only log file
    pub path: PathBuf,

    /// Create the log file (and its parent directories) when it does not exist
    pub create_if_missing: bool,

    // -------------------------------------------------------------------------
    // Recovery Configuration
    // -------------------------------------------------------------------------
    /// Buffer capacity used while replaying the log on open (in bytes)
    pub read_buffer_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./caskkv.db"),
            create_if_missing: true,
            read_buffer_size: 64 * 1024, // 64 KB
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check that the configuration can be used to open a store
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(CaskError::Config("log path must not be empty".to_string()));
        }
        if self.read_buffer_size == 0 {
            return Err(CaskError::Config(
                "read_buffer_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the log file path
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.path = path.into();
        self
    }

    /// Set whether a missing log file is created on open
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.config.create_if_missing = create;
        self
    }

    /// Set the recovery read buffer size (in bytes)
    pub fn read_buffer_size(mut self, size: usize) -> Self {
        self.config.read_buffer_size = size;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
