//! Shared helpers for integration tests

#![allow(dead_code)]

use std::path::PathBuf;

use tempfile::TempDir;

/// Install a test subscriber so `RUST_LOG=caskkv=debug` shows engine logs
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Temp directory plus a log path inside it (the file is not created)
pub fn setup_temp_log() -> (TempDir, PathBuf) {
    init_tracing();
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("test.db");
    (temp_dir, log_path)
}
