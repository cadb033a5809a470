//! Tests for SharedStore
//!
//! These tests verify:
//! - Concurrent writers keep keydir offsets consistent with the log
//! - Concurrent readers see completed writes
//! - Close only succeeds on the last handle

mod common;

use std::fs;
use std::thread;

use caskkv::{CaskError, SharedStore, Store};
use common::setup_temp_log;

#[test]
fn test_shared_set_get() {
    let (_temp, log_path) = setup_temp_log();
    let store = SharedStore::open_path(&log_path).unwrap();

    store.set("othello", "shakespeare").unwrap();

    assert_eq!(store.get("othello").unwrap(), "shakespeare");
    assert_eq!(store.get("missing").unwrap(), "");
    assert_eq!(store.len(), 1);
}

#[test]
fn test_concurrent_writers() {
    let (_temp, log_path) = setup_temp_log();
    let store = SharedStore::open_path(&log_path).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let store = store.clone();
            thread::spawn(move || {
                for i in 0..25 {
                    let key = format!("t{}-key{}", t, i);
                    let value = format!("value-{}-{}", t, i);
                    store.set(&key, &value).unwrap();
                    assert_eq!(store.get(&key).unwrap(), value);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.len(), 100);
    for t in 0..4 {
        for i in 0..25 {
            let key = format!("t{}-key{}", t, i);
            assert_eq!(store.get(&key).unwrap(), format!("value-{}-{}", t, i));
        }
    }

    store.try_close().unwrap();

    // Every record landed where the keydir said it would
    let mut reopened = Store::open_path(&log_path).unwrap();
    assert_eq!(reopened.len(), 100);
    assert_eq!(
        reopened.current_offset() as u64,
        fs::metadata(&log_path).unwrap().len()
    );
    assert_eq!(reopened.get("t3-key24").unwrap(), "value-3-24");
}

#[test]
fn test_try_close_while_shared() {
    let (_temp, log_path) = setup_temp_log();
    let store = SharedStore::open_path(&log_path).unwrap();
    let other = store.clone();
    assert_eq!(other.handle_count(), 2);

    let result = store.try_close();
    assert!(matches!(result, Err(CaskError::StillShared)));

    // The failed close dropped its handle, so the remaining one can close
    assert_eq!(other.handle_count(), 1);
    other.set("key", "value").unwrap();
    other.try_close().unwrap();
}
