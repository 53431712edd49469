//! Name-part sequences to metric handles.
//!
//! [`Metrics`] owns everything the bindings share: the resolver, classifier
//! and joiner built from configuration, the backend registry, and one
//! handle cache per handle kind. [`Scope`] pins the leading name parts of a
//! subsystem (`driver`, `table`, `retry`) so bindings only supply the rest.

use std::fmt;
use std::sync::Arc;

use metrics::{Counter, Gauge, Histogram, Label};
use tracing::debug;

use crate::cache::HandleCache;
use crate::classify::{ErrorClassifier, Failure};
use crate::names::{Joiner, MetricKind, NameResolver};
use crate::registry::Registry;

/// Shared naming and registration state of one instrumentation.
pub struct Metrics {
    resolver: NameResolver,
    classifier: ErrorClassifier,
    joiner: Joiner,
    labels: Vec<Label>,
    registry: Arc<dyn Registry>,
    gauges: HandleCache<Gauge>,
    counters: HandleCache<Counter>,
    histograms: HandleCache<Histogram>,
}

impl Metrics {
    pub fn new(
        resolver: NameResolver,
        classifier: ErrorClassifier,
        joiner: Joiner,
        labels: Vec<Label>,
        registry: Arc<dyn Registry>,
    ) -> Self {
        Self {
            resolver,
            classifier,
            joiner,
            labels,
            registry,
            gauges: HandleCache::new(),
            counters: HandleCache::new(),
            histograms: HandleCache::new(),
        }
    }

    /// Resolve a kind to its name part.
    pub fn name(&self, kind: MetricKind) -> &str {
        self.resolver.resolve(kind)
    }

    /// Classify a failure into a name part.
    pub fn err_name(&self, err: &dyn Failure) -> String {
        self.classifier.classify(err)
    }

    /// Join parts behind the configured prefix.
    pub fn join(&self, parts: &[&str]) -> String {
        self.joiner.join(parts)
    }

    pub fn gauge(&self, parts: &[&str]) -> Gauge {
        let name = self.join(parts);
        self.gauges.get_or_create(&name, || {
            debug!(metric = %name, kind = "gauge", "registering metric");
            self.registry.gauge(&name, &self.labels)
        })
    }

    pub fn counter(&self, parts: &[&str]) -> Counter {
        let name = self.join(parts);
        self.counters.get_or_create(&name, || {
            debug!(metric = %name, kind = "counter", "registering metric");
            self.registry.counter(&name, &self.labels)
        })
    }

    pub fn histogram(&self, parts: &[&str]) -> Histogram {
        let name = self.join(parts);
        self.histograms.get_or_create(&name, || {
            debug!(metric = %name, kind = "histogram", "registering metric");
            self.registry.histogram(&name, &self.labels)
        })
    }

    /// Whether any handle kind has been created under the joined `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.gauges.contains(name) || self.counters.contains(name) || self.histograms.contains(name)
    }

    /// Every joined name created so far, sorted and deduplicated.
    pub fn names(&self) -> Vec<String> {
        let mut names = self.gauges.names();
        names.extend(self.counters.names());
        names.extend(self.histograms.names());
        names.sort();
        names.dedup();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.gauges.is_empty() && self.counters.is_empty() && self.histograms.is_empty()
    }
}

impl fmt::Debug for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Metrics")
            .field("joiner", &self.joiner)
            .field("labels", &self.labels)
            .field("gauges", &self.gauges)
            .field("counters", &self.counters)
            .field("histograms", &self.histograms)
            .finish()
    }
}

/// A subsystem view of [`Metrics`]: every name starts with `base`.
#[derive(Clone)]
pub struct Scope {
    metrics: Arc<Metrics>,
    base: Vec<String>,
}

impl Scope {
    pub fn new(metrics: Arc<Metrics>, base: &[MetricKind]) -> Self {
        let base = base.iter().map(|k| metrics.name(*k).to_owned()).collect();
        Self { metrics, base }
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    pub fn name(&self, kind: MetricKind) -> &str {
        self.metrics.name(kind)
    }

    pub fn err_name(&self, err: &dyn Failure) -> String {
        self.metrics.err_name(err)
    }

    pub fn gauge(&self, parts: &[&str]) -> Gauge {
        self.metrics.gauge(&self.full(parts))
    }

    pub fn counter(&self, parts: &[&str]) -> Counter {
        self.metrics.counter(&self.full(parts))
    }

    pub fn histogram(&self, parts: &[&str]) -> Histogram {
        self.metrics.histogram(&self.full(parts))
    }

    /// Increment `<parts>/error/<classified>` when `err` is set.
    pub fn count_error(&self, parts: &[&str], err: Option<&dyn Failure>) {
        if let Some(err) = err {
            let err_name = self.err_name(err);
            let mut all = parts.to_vec();
            all.push(self.name(MetricKind::Error));
            all.push(&err_name);
            self.counter(&all).increment(1);
        }
    }

    fn full<'a>(&'a self, parts: &[&'a str]) -> Vec<&'a str> {
        let mut all: Vec<&str> = self.base.iter().map(String::as_str).collect();
        all.extend_from_slice(parts);
        all
    }
}
