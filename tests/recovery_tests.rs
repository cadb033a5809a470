//! Tests for log recovery
//!
//! These tests verify:
//! - Recovery from an empty log
//! - Keydir offsets are prefix sums of record sizes
//! - Last-write-wins during replay
//! - Truncated headers and payloads are reported as corruption

mod common;

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use caskkv::format::{encode_kv, RecordHeader, HEADER_SIZE};
use caskkv::log::LogRecovery;
use caskkv::{CaskError, KeyEntry, Store};
use common::setup_temp_log;

const BUF: usize = 64 * 1024;

// =============================================================================
// Helper Functions
// =============================================================================

/// Write encoded records directly to a file, returning each record's size
fn write_raw_records(path: &Path, records: &[(u32, &str, &str)]) -> Vec<usize> {
    let mut file = File::create(path).unwrap();
    let mut sizes = Vec::new();
    for (timestamp, key, value) in records {
        let (size, bytes) = encode_kv(*timestamp, key, value).unwrap();
        file.write_all(&bytes).unwrap();
        sizes.push(size);
    }
    file.sync_all().unwrap();
    sizes
}

fn truncate_to(path: &Path, len: u64) {
    let file = OpenOptions::new().write(true).open(path).unwrap();
    file.set_len(len).unwrap();
}

// =============================================================================
// Clean Log Tests
// =============================================================================

#[test]
fn test_recover_empty_file() {
    let (_temp, log_path) = setup_temp_log();
    File::create(&log_path).unwrap();

    let (keydir, result) = LogRecovery::recover(&log_path, BUF).unwrap();

    assert!(keydir.is_empty());
    assert_eq!(result.records_recovered, 0);
    assert_eq!(result.live_keys, 0);
    assert_eq!(result.end_offset, 0);
}

#[test]
fn test_recover_offsets_are_prefix_sums() {
    let (_temp, log_path) = setup_temp_log();
    let sizes = write_raw_records(
        &log_path,
        &[(10, "a", "1"), (11, "bb", "22"), (12, "ccc", "333")],
    );

    let (keydir, result) = LogRecovery::recover(&log_path, BUF).unwrap();

    assert_eq!(result.records_recovered, 3);
    assert_eq!(result.live_keys, 3);
    assert_eq!(result.end_offset as usize, sizes.iter().sum::<usize>());

    assert_eq!(keydir.get("a"), Some(&KeyEntry::new(10, 0, sizes[0] as u32)));
    assert_eq!(
        keydir.get("bb"),
        Some(&KeyEntry::new(11, sizes[0] as u32, sizes[1] as u32))
    );
    assert_eq!(
        keydir.get("ccc"),
        Some(&KeyEntry::new(12, (sizes[0] + sizes[1]) as u32, sizes[2] as u32))
    );
}

#[test]
fn test_recover_last_write_wins() {
    let (_temp, log_path) = setup_temp_log();
    let sizes = write_raw_records(
        &log_path,
        &[(1, "key", "old"), (2, "other", "x"), (3, "key", "newer")],
    );

    let (keydir, result) = LogRecovery::recover(&log_path, BUF).unwrap();

    assert_eq!(result.records_recovered, 3);
    assert_eq!(result.live_keys, 2);

    let entry = keydir.get("key").unwrap();
    assert_eq!(entry.timestamp, 3);
    assert_eq!(entry.offset as usize, sizes[0] + sizes[1]);
    assert_eq!(entry.size as usize, sizes[2]);
}

#[test]
fn test_recover_empty_key_and_value() {
    let (_temp, log_path) = setup_temp_log();
    write_raw_records(&log_path, &[(1, "", ""), (2, "k", "")]);

    let (keydir, _) = LogRecovery::recover(&log_path, BUF).unwrap();

    assert_eq!(keydir.get("").unwrap().size as usize, HEADER_SIZE);
    assert_eq!(keydir.get("k").unwrap().size as usize, HEADER_SIZE + 1);
}

#[test]
fn test_recover_with_tiny_buffer() {
    let (_temp, log_path) = setup_temp_log();
    write_raw_records(&log_path, &[(1, "alpha", "beta"), (2, "gamma", "delta")]);

    // A 1-byte buffer forces many short reads per header
    let (keydir, result) = LogRecovery::recover(&log_path, 1).unwrap();

    assert_eq!(result.records_recovered, 2);
    assert!(keydir.contains_key("alpha"));
    assert!(keydir.contains_key("gamma"));
}

#[test]
fn test_recover_non_utf8_value_only_fails_its_key() {
    let (_temp, log_path) = setup_temp_log();
    write_raw_records(&log_path, &[(1, "good", "ok")]);

    // Same record layout, but the value bytes are not valid text
    let mut file = OpenOptions::new().append(true).open(&log_path).unwrap();
    let mut record = Vec::new();
    RecordHeader::new(2, 3, 2).encode_into(&mut record);
    record.extend_from_slice(b"bin");
    record.extend_from_slice(&[0xff, 0xfe]);
    file.write_all(&record).unwrap();
    drop(file);

    let mut store = Store::open_path(&log_path).unwrap();

    assert_eq!(store.len(), 2);
    assert_eq!(store.get("good").unwrap(), "ok");
    assert!(matches!(store.get("bin"), Err(CaskError::Corruption(_))));
}

// =============================================================================
// Corruption Tests
// =============================================================================

#[test]
fn test_recover_truncated_header() {
    let (_temp, log_path) = setup_temp_log();
    let sizes = write_raw_records(&log_path, &[(1, "key1", "value1"), (2, "key2", "value2")]);

    // Cut the second record in the middle of its header
    truncate_to(&log_path, (sizes[0] + HEADER_SIZE / 2) as u64);

    let result = LogRecovery::recover(&log_path, BUF);
    assert!(matches!(result, Err(CaskError::Corruption(_))));
}

#[test]
fn test_recover_truncated_payload() {
    let (_temp, log_path) = setup_temp_log();
    let sizes = write_raw_records(&log_path, &[(1, "key1", "value1"), (2, "key2", "value2")]);

    // Keep the full header of the second record but drop its last byte
    truncate_to(&log_path, (sizes[0] + sizes[1] - 1) as u64);

    let result = LogRecovery::recover(&log_path, BUF);
    assert!(matches!(result, Err(CaskError::Corruption(_))));
}

#[test]
fn test_recover_garbage_header_sizes() {
    let (_temp, log_path) = setup_temp_log();
    let mut file = File::create(&log_path).unwrap();
    let mut header = Vec::new();
    RecordHeader::new(0, u32::MAX, u32::MAX).encode_into(&mut header);
    file.write_all(&header).unwrap();
    drop(file);

    let result = LogRecovery::recover(&log_path, BUF);
    assert!(matches!(result, Err(CaskError::Corruption(_))));
}

#[test]
fn test_recover_missing_file() {
    let (_temp, log_path) = setup_temp_log();

    let result = LogRecovery::recover(&log_path, BUF);
    assert!(matches!(result, Err(CaskError::Io(_))));
}

// =============================================================================
// Verify Tests
// =============================================================================

#[test]
fn test_verify_reports_stats() {
    let (_temp, log_path) = setup_temp_log();
    let sizes = write_raw_records(&log_path, &[(1, "a", "1"), (2, "a", "2")]);

    let result = LogRecovery::verify(&log_path, BUF).unwrap();

    assert_eq!(result.records_recovered, 2);
    assert_eq!(result.live_keys, 1);
    assert_eq!(result.end_offset as usize, sizes[0] + sizes[1]);
}
