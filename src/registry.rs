//! Metrics backend.
//!
//! The crate records through the [`metrics`] facade. A [`Registry`] turns a
//! joined name plus constant labels into a handle; it is consulted once per
//! distinct name, after which the handle cache serves every lookup.
//!
//! Two registries are provided:
//!
//! - [`GlobalRegistry`]: registers with whatever recorder is installed
//!   process-wide (`metrics::set_global_recorder`, or an exporter's
//!   `install()`). Without a recorder every handle is a no-op.
//! - [`RecorderRegistry`]: registers with a recorder owned by this
//!   instrumentation, independent of the global one.

use std::sync::Arc;

use metrics::{Counter, Gauge, Histogram, Key, Label, Level, Metadata, Recorder};

/// Metadata attached to every registration.
const METADATA: Metadata<'static> =
    Metadata::new(module_path!(), Level::INFO, Some(module_path!()));

/// Get-or-register capability of a metrics backend.
///
/// Implementations may panic when the backend rejects a registration (for
/// example a conflicting definition under the same name). That is a setup
/// mistake and is not caught.
pub trait Registry: Send + Sync {
    fn gauge(&self, name: &str, labels: &[Label]) -> Gauge;

    fn counter(&self, name: &str, labels: &[Label]) -> Counter;

    /// Timer capability; latencies are recorded in milliseconds.
    fn histogram(&self, name: &str, labels: &[Label]) -> Histogram;
}

fn key(name: &str, labels: &[Label]) -> Key {
    Key::from_parts(name.to_owned(), labels.to_vec())
}

/// Registers with the process-wide recorder.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalRegistry;

impl Registry for GlobalRegistry {
    fn gauge(&self, name: &str, labels: &[Label]) -> Gauge {
        let key = key(name, labels);
        metrics::with_recorder(|recorder| recorder.register_gauge(&key, &METADATA))
    }

    fn counter(&self, name: &str, labels: &[Label]) -> Counter {
        let key = key(name, labels);
        metrics::with_recorder(|recorder| recorder.register_counter(&key, &METADATA))
    }

    fn histogram(&self, name: &str, labels: &[Label]) -> Histogram {
        let key = key(name, labels);
        metrics::with_recorder(|recorder| recorder.register_histogram(&key, &METADATA))
    }
}

/// Registers with an owned recorder.
pub struct RecorderRegistry<R> {
    recorder: Arc<R>,
}

impl<R: Recorder> RecorderRegistry<R> {
    pub fn new(recorder: R) -> Self {
        Self {
            recorder: Arc::new(recorder),
        }
    }

    /// Share a recorder that is also used elsewhere.
    pub fn from_arc(recorder: Arc<R>) -> Self {
        Self { recorder }
    }

    pub fn recorder(&self) -> &R {
        &self.recorder
    }
}

impl<R: Recorder + Send + Sync> Registry for RecorderRegistry<R> {
    fn gauge(&self, name: &str, labels: &[Label]) -> Gauge {
        self.recorder.register_gauge(&key(name, labels), &METADATA)
    }

    fn counter(&self, name: &str, labels: &[Label]) -> Counter {
        self.recorder.register_counter(&key(name, labels), &METADATA)
    }

    fn histogram(&self, name: &str, labels: &[Label]) -> Histogram {
        self.recorder.register_histogram(&key(name, labels), &METADATA)
    }
}

impl<T: Registry + ?Sized> Registry for Arc<T> {
    fn gauge(&self, name: &str, labels: &[Label]) -> Gauge {
        (**self).gauge(name, labels)
    }

    fn counter(&self, name: &str, labels: &[Label]) -> Counter {
        (**self).counter(name, labels)
    }

    fn histogram(&self, name: &str, labels: &[Label]) -> Histogram {
        (**self).histogram(name, labels)
    }
}
