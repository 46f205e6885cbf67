//! Concurrency Tests
//!
//! Concurrent load-mutate-save cycles on one FileStore must not lose
//! each other's updates.

use std::sync::{Arc, Barrier};
use std::thread;

use diskkv::store::{FileStore, Store};
use tempfile::TempDir;

#[test]
fn test_two_concurrent_sets_both_survive() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::open_path(temp_dir.path());
    let barrier = Arc::new(Barrier::new(2));

    let handles: Vec<_> = [("left", "1"), ("right", "2")]
        .into_iter()
        .map(|(key, value)| {
            let store = store.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                store.set(key.as_bytes(), value.as_bytes()).unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.get(b"left").unwrap(), b"1");
    assert_eq!(store.get(b"right").unwrap(), b"2");
}

#[test]
fn test_many_concurrent_writers_no_lost_updates() {
    const THREADS: usize = 8;
    const KEYS_PER_THREAD: usize = 25;

    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::open_path(temp_dir.path());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let store = store.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..KEYS_PER_THREAD {
                    let key = format!("t{}-k{}", t, i);
                    store.set(key.as_bytes(), key.as_bytes()).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let mapping = store.load().unwrap();
    assert_eq!(mapping.len(), THREADS * KEYS_PER_THREAD);
    for t in 0..THREADS {
        for i in 0..KEYS_PER_THREAD {
            let key = format!("t{}-k{}", t, i);
            assert_eq!(mapping.get(key.as_bytes()), Some(&key.clone().into_bytes()));
        }
    }
}

#[test]
fn test_concurrent_readers_and_deleters() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::open_path(temp_dir.path());

    for i in 0..20 {
        store.set(format!("key{}", i).as_bytes(), b"value").unwrap();
    }

    let deleter = {
        let store = store.clone();
        thread::spawn(move || {
            for i in (0..20).step_by(2) {
                store.delete(format!("key{}", i).as_bytes()).unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = store.clone();
            thread::spawn(move || {
                for i in 0..20 {
                    let value = store.get(format!("key{}", i).as_bytes()).unwrap();
                    assert!(value.is_empty() || value == b"value");
                }
            })
        })
        .collect();

    deleter.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    let mapping = store.load().unwrap();
    assert_eq!(mapping.len(), 10);
    assert!(mapping.keys().all(|k| {
        let n: usize = std::str::from_utf8(&k[3..]).unwrap().parse().unwrap();
        n % 2 == 1
    }));
}
