//! Tests for [`HandleCache`]: at-most-once creation per name.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use ydb_metrics::cache::HandleCache;

#[test]
fn miss_returns_none() {
    let cache: HandleCache<Arc<u32>> = HandleCache::new();
    assert!(cache.get("driver/conn/dial/total").is_none());
    assert!(!cache.contains("driver/conn/dial/total"));
    assert!(cache.is_empty());
}

#[test]
fn create_runs_once_per_name() {
    let cache: HandleCache<Arc<u32>> = HandleCache::new();
    let calls = AtomicUsize::new(0);

    let first = cache.get_or_create("a", || {
        calls.fetch_add(1, Ordering::SeqCst);
        Arc::new(1)
    });
    let second = cache.get_or_create("a", || {
        calls.fetch_add(1, Ordering::SeqCst);
        Arc::new(2)
    });

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(*second, 1);
}

#[test]
fn distinct_names_get_distinct_handles() {
    let cache: HandleCache<Arc<u32>> = HandleCache::new();
    cache.get_or_create("b", || Arc::new(2));
    cache.get_or_create("a", || Arc::new(1));

    assert_eq!(cache.len(), 2);
    assert_eq!(cache.names(), vec!["a".to_string(), "b".to_string()]);
    assert_eq!(cache.get("b").map(|h| *h), Some(2));
}

#[test]
fn concurrent_first_use_creates_once() {
    const THREADS: usize = 16;

    let cache: Arc<HandleCache<Arc<u32>>> = Arc::new(HandleCache::new());
    let calls = Arc::new(AtomicUsize::new(0));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let cache = Arc::clone(&cache);
            let calls = Arc::clone(&calls);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                cache.get_or_create("table/pool/get/total", || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Arc::new(i as u32)
                })
            })
        })
        .collect();

    let results: Vec<Arc<u32>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(results.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    assert_eq!(cache.len(), 1);
}

#[test]
fn panicking_create_leaves_no_entry() {
    let cache: HandleCache<Arc<u32>> = HandleCache::new();

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        cache.get_or_create("a", || -> Arc<u32> { panic!("registration failed") })
    }));
    assert!(result.is_err());
    assert!(!cache.contains("a"));

    let calls = AtomicUsize::new(0);
    let value = cache.get_or_create("a", || {
        calls.fetch_add(1, Ordering::SeqCst);
        Arc::new(7)
    });
    assert_eq!(*value, 7);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(cache.contains("a"));
}
