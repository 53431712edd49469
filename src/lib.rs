//! ydb-metrics - Metrics instrumentation for the YDB database client
//!
//! This crate turns the client's lifecycle events (connection dials, RPC
//! invocations, discovery, session and pool activity, transactions,
//! retries, query service, scheme, scripting, coordination, rate limiter
//! and database/sql calls) into named counters, gauges and histograms recorded through
//! the [`metrics`] facade.
//!
//! Configure once with [`Instrumentation::builder`], hand the resulting
//! [`Trace`] to the client, and every enabled category reports on its own.
//!
//! # Example
//!
//! ```rust
//! use ydb_metrics::{Details, Done, GlobalRegistry, Instrumentation};
//! use ydb_metrics::trace::driver::ConnStart;
//!
//! let trace = Instrumentation::builder(GlobalRegistry)
//!     .prefix("ydb")
//!     .delimiter("_")
//!     .details(Details::DRIVER_EVENTS | Details::TABLE_POOL)
//!     .build();
//!
//! // Inside the client:
//! let dial = trace.driver.on_conn_dial.start(&ConnStart::default());
//! dial.done(&Done::ok());
//!
//! assert!(trace.metrics().contains("ydb_driver_conn_dial_total"));
//! ```

mod bind;
pub mod cache;
pub mod classify;
pub mod config;
pub mod error;
pub mod names;
pub mod registry;
pub mod scope;
pub mod trace;

use std::collections::HashMap;
use std::sync::Arc;

use metrics::Label;
use tracing::debug;

pub use classify::{
    DriverError, ErrorClassifier, ErrorNamer, Failure, OperationStatus, TransportStatus,
    default_error_name,
};
pub use config::{Detailer, Details, MetricsConfig};
pub use error::{Error, Result};
pub use names::{DEFAULT_DELIMITER, JoinFn, Joiner, MetricKind, NameResolver, default_join};
pub use registry::{GlobalRegistry, RecorderRegistry, Registry};
pub use scope::{Metrics, Scope};
pub use trace::{
    Done, Fault, Hook, Notify, OpContext, Pending, PendingStream, Start, StreamHook, Trace,
};

/// Main entry point for creating instrumentation.
pub struct Instrumentation;

impl Instrumentation {
    /// Create a builder that registers metrics with `registry`.
    pub fn builder(registry: impl Registry + 'static) -> InstrumentationBuilder {
        InstrumentationBuilder::new(Arc::new(registry))
    }
}

/// Builder for a bound [`Trace`].
pub struct InstrumentationBuilder {
    registry: Arc<dyn Registry>,
    prefix: Option<String>,
    delimiter: Option<String>,
    names: HashMap<MetricKind, String>,
    detailer: Option<Arc<dyn Detailer>>,
    error_namer: Option<ErrorNamer>,
    joiner: Option<JoinFn>,
    labels: Vec<(String, String)>,
}

impl InstrumentationBuilder {
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        Self {
            registry,
            prefix: None,
            delimiter: None,
            names: HashMap::new(),
            detailer: None,
            error_namer: None,
            joiner: None,
            labels: Vec::new(),
        }
    }

    /// Leading name part for every metric.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Name part delimiter (default: "/"). A blank delimiter counts as unset.
    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = Some(delimiter.into());
        self
    }

    /// Override the name part of one kind.
    pub fn name(mut self, kind: MetricKind, name: impl Into<String>) -> Self {
        self.names.insert(kind, name.into());
        self
    }

    pub fn names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = (MetricKind, S)>,
        S: Into<String>,
    {
        self.names
            .extend(names.into_iter().map(|(kind, name)| (kind, name.into())));
        self
    }

    /// Categories to bind. Replaces any earlier `details` or `detailer`.
    pub fn details(self, details: Details) -> Self {
        self.detailer(Arc::new(details))
    }

    /// Externally owned categories selector, read once by [`build`](Self::build).
    pub fn detailer(mut self, detailer: Arc<dyn Detailer>) -> Self {
        self.detailer = Some(detailer);
        self
    }

    /// Custom error classification. A `None` or blank result falls back to
    /// [`default_error_name`].
    pub fn error_namer(
        mut self,
        namer: impl Fn(&dyn Failure) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.error_namer = Some(Arc::new(namer));
        self
    }

    /// Custom name joining. A `None` result falls back to [`default_join`].
    pub fn joiner(
        mut self,
        join: impl Fn(&[&str]) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.joiner = Some(Arc::new(join));
        self
    }

    /// Constant label attached to every metric.
    pub fn const_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.push((key.into(), value.into()));
        self
    }

    /// Apply a file-loaded section. Options it leaves unset keep their
    /// current values.
    pub fn config(mut self, config: &MetricsConfig) -> Result<Self> {
        if let Some(delimiter) = &config.delimiter {
            if delimiter.trim().is_empty() {
                return Err(Error::InvalidDelimiter(delimiter.clone()));
            }
            self.delimiter = Some(delimiter.clone());
        }
        self.names.extend(config.name_overrides()?);
        if let Some(prefix) = &config.prefix {
            self.prefix = Some(prefix.clone());
        }
        if let Some(details) = config.details {
            self = self.details(details);
        }
        self.labels.extend(
            config
                .labels
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        Ok(self)
    }

    /// Build the trace with every selected category bound.
    pub fn build(self) -> Trace {
        let details = self
            .detailer
            .as_ref()
            .map_or(Details::ALL, |detailer| detailer.details());
        let delimiter = self
            .delimiter
            .filter(|delimiter| !delimiter.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DELIMITER.to_string());

        debug!(
            prefix = self.prefix.as_deref().unwrap_or_default(),
            delimiter = %delimiter,
            overrides = self.names.len(),
            "building metrics trace"
        );

        let metrics = Metrics::new(
            NameResolver::new(self.names),
            ErrorClassifier::new(delimiter.clone(), self.error_namer),
            Joiner::new(delimiter, self.prefix, self.joiner),
            self.labels
                .into_iter()
                .map(|(key, value)| Label::new(key, value))
                .collect(),
            self.registry,
        );
        bind::bind(Arc::new(metrics), details)
    }
}
