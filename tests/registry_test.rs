//! Tests for registration through [`Registry`] and the shared [`Metrics`] state.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use metrics::{Counter, Gauge, Histogram, Label};
use metrics_util::debugging::DebuggingRecorder;

use ydb_metrics::trace::driver::ConnStart;
use ydb_metrics::{
    Details, Done, ErrorClassifier, GlobalRegistry, Instrumentation, Joiner, MetricKind, Metrics,
    NameResolver, RecorderRegistry, Registry, Scope,
};

// ============================================================================
// Mock registry
// ============================================================================

/// Counts registrations and hands out no-op handles.
#[derive(Default)]
struct CountingRegistry {
    gauges: AtomicUsize,
    counters: AtomicUsize,
    histograms: AtomicUsize,
}

impl Registry for CountingRegistry {
    fn gauge(&self, _name: &str, _labels: &[Label]) -> Gauge {
        self.gauges.fetch_add(1, Ordering::SeqCst);
        Gauge::noop()
    }

    fn counter(&self, _name: &str, _labels: &[Label]) -> Counter {
        self.counters.fetch_add(1, Ordering::SeqCst);
        Counter::noop()
    }

    fn histogram(&self, _name: &str, _labels: &[Label]) -> Histogram {
        self.histograms.fetch_add(1, Ordering::SeqCst);
        Histogram::noop()
    }
}

fn metrics_with(registry: Arc<CountingRegistry>) -> Arc<Metrics> {
    Arc::new(Metrics::new(
        NameResolver::default(),
        ErrorClassifier::new("/", None),
        Joiner::default(),
        Vec::new(),
        registry,
    ))
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn handle_kinds_are_cached_separately() {
    let registry = Arc::new(CountingRegistry::default());
    let metrics = metrics_with(Arc::clone(&registry));

    metrics.counter(&["pool", "get"]);
    metrics.counter(&["pool", "get"]);
    metrics.gauge(&["pool", "get"]);
    metrics.histogram(&["pool", "get"]);

    assert_eq!(registry.counters.load(Ordering::SeqCst), 1);
    assert_eq!(registry.gauges.load(Ordering::SeqCst), 1);
    assert_eq!(registry.histograms.load(Ordering::SeqCst), 1);
    assert!(metrics.contains("pool/get"));
    assert_eq!(metrics.names(), vec!["pool/get".to_string()]);
}

#[test]
fn concurrent_lookups_register_once() {
    const THREADS: usize = 8;

    let registry = Arc::new(CountingRegistry::default());
    let metrics = metrics_with(Arc::clone(&registry));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let metrics = Arc::clone(&metrics);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..50 {
                    metrics.counter(&["driver", "conn", "dial", "total"]).increment(1);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(registry.counters.load(Ordering::SeqCst), 1);
}

#[test]
fn scope_prepends_base_parts() {
    let registry = Arc::new(CountingRegistry::default());
    let metrics = metrics_with(registry);
    let scope = Scope::new(Arc::clone(&metrics), &[MetricKind::Table]);

    scope.counter(&["session", "create", "total"]);

    assert!(metrics.contains("table/session/create/total"));
}

#[test]
fn scope_counts_errors_only_when_present() {
    let registry = Arc::new(CountingRegistry::default());
    let metrics = metrics_with(Arc::clone(&registry));
    let scope = Scope::new(Arc::clone(&metrics), &[MetricKind::Driver]);

    scope.count_error(&["discovery"], None);
    assert!(metrics.is_empty());

    let err = std::io::Error::new(std::io::ErrorKind::TimedOut, "deadline");
    scope.count_error(&["discovery"], Some(&err));
    assert!(metrics.contains("driver/discovery/error/timeout"));
}

#[test]
fn arc_registry_is_a_registry() {
    let registry = Arc::new(CountingRegistry::default());
    let trace = Instrumentation::builder(Arc::clone(&registry))
        .details(Details::DRIVER_CONN)
        .build();

    trace
        .driver
        .on_conn_dial
        .start(&ConnStart::default())
        .done(&Done::ok());

    assert_eq!(registry.counters.load(Ordering::SeqCst), 1);
    assert_eq!(registry.histograms.load(Ordering::SeqCst), 1);
    assert_eq!(registry.gauges.load(Ordering::SeqCst), 1);
}

#[test]
fn owned_recorder_sees_registrations() {
    let recorder = Arc::new(DebuggingRecorder::new());
    let snapshotter = recorder.snapshotter();
    let registry = RecorderRegistry::from_arc(Arc::clone(&recorder));

    registry.counter("driver/conn/dial/total", &[]).increment(2);

    let snapshot = snapshotter.snapshot().into_vec();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].0.key().name(), "driver/conn/dial/total");
}

#[test]
fn global_registry_is_noop_without_recorder() {
    // No recorder installed: handles are inert, nothing panics.
    let trace = Instrumentation::builder(GlobalRegistry).build();
    trace
        .driver
        .on_conn_dial
        .start(&ConnStart::default())
        .done(&Done::ok());
    assert!(trace.metrics().contains("driver/conn/dial/total"));
}
