//! # CaskKV
//!
//! A minimal log-structured key-value store following the Bitcask design:
//! - Append-only record log, synced on every write
//! - In-memory keydir mapping each key to its latest record
//! - Keydir rebuilt by replaying the whole log on open
//! - Last-write-wins, no deletes, no compaction
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Store (get / set)                       │
//! │              (SharedStore: one Mutex around it)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   KeyDir    │          │     Log     │
//!   │ (HashMap)   │◄─replay──│ (append +   │
//!   └─────────────┘          │  seek/read) │
//!                            └──────┬──────┘
//!                                   │
//!                                   ▼
//!                           ┌─────────────┐
//!                           │   Format    │
//!                           │  (codec)    │
//!                           └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use caskkv::Store;
//!
//! let mut store = Store::open_path("books.db")?;
//! store.set("othello", "shakespeare")?;
//! assert_eq!(store.get("othello")?, "shakespeare");
//! store.close()?;
//! # Ok::<(), caskkv::CaskError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod format;
pub mod keydir;
pub mod log;
pub mod store;
pub mod shared;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CaskError, Result};
pub use config::Config;
pub use keydir::KeyEntry;
pub use shared::SharedStore;
pub use store::Store;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of CaskKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
