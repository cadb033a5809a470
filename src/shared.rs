//! Shared Store
//!
//! Thread-safe handle around a single [`Store`].
//!
//! All operations go through one `parking_lot::Mutex`: writes must be
//! serialized with each other and with offset-dependent reads, and a read
//! moves the shared file cursor anyway.

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::Config;
use crate::error::{CaskError, Result};
use crate::store::Store;

/// Cloneable, thread-safe store handle
#[derive(Clone)]
pub struct SharedStore {
    inner: Arc<Mutex<Store>>,
}

impl SharedStore {
    /// Wrap an already opened store
    pub fn new(store: Store) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Open a store and wrap it
    pub fn open(config: Config) -> Result<Self> {
        Store::open(config).map(Self::new)
    }

    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        Store::open_path(path).map(Self::new)
    }

    pub fn get(&self, key: &str) -> Result<String> {
        self.inner.lock().get(key)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.inner.lock().set(key, value)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Number of live handles on this store
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Close the store if this is the last handle
    ///
    /// Fails with `StillShared` (dropping this handle) while other clones
    /// exist.
    pub fn try_close(self) -> Result<()> {
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => mutex.into_inner().close(),
            Err(_) => Err(CaskError::StillShared),
        }
    }
}
