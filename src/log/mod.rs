//! Log Module
//!
//! File handles for the append-only record log, and startup recovery.
//!
//! ## Responsibilities
//! - Append encoded records and force them to stable storage
//! - Read back exactly the byte span a keydir entry points at
//! - Rebuild the keydir by replaying the log from offset 0
//!
//! The store holds two handles on the same file: a [`LogWriter`] opened in
//! append mode and a [`LogReader`] used for seeks. Offsets are absolute
//! byte positions in the file and must fit in a `u32`.

mod reader;
mod recovery;
mod writer;

pub use reader::LogReader;
pub use recovery::{LogRecovery, RecoveryResult};
pub use writer::LogWriter;
