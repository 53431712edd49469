//! Event binder.
//!
//! [`BINDINGS`] is the fixed table of event categories. Building a trace
//! walks it once: each entry whose [`Details`] bit is selected installs its
//! callbacks into the [`Trace`]; the others leave their slots unset.
//!
//! # Metric naming
//!
//! Names are built most-general first: scope (`driver`, `table`, `retry`,
//! `query`, `scheme`, ...), subsystem, operation, then the measured
//! dimension:
//!
//! ```text
//! driver/conn/dial/total                      counter
//! driver/conn/dial/latency_ms                 histogram
//! driver/conn/dial/error/transport/unavailable counter
//! driver/conn/in_flight                       gauge
//! table/pool/get/attempts                     gauge
//! ```
//!
//! Every tracked operation records the same done-state set: latency,
//! total, and an error counter scoped by the classified error name.

mod cluster;
mod conn;
mod coordination;
mod credentials;
mod discovery;
mod pool;
mod query;
mod query_service;
mod ratelimiter;
mod retry;
mod scheme;
mod scripting;
mod session;
mod sql;
mod stream;
mod transaction;

use std::sync::Arc;

use tracing::debug;

use crate::classify::Failure;
use crate::config::Details;
use crate::names::MetricKind;
use crate::scope::{Metrics, Scope};
use crate::trace::{Done, Hook, OpContext, Trace};

/// One event category.
pub struct Binding {
    /// Selecting bit.
    pub details: Details,
    /// Category name, for logs.
    pub name: &'static str,
    /// Leading name parts shared by the category's metrics.
    scope: &'static [MetricKind],
    bind: fn(&Scope, &mut Trace),
}

impl Binding {
    pub fn is_enabled(&self, details: Details) -> bool {
        details.contains(self.details)
    }
}

/// All event categories, in installation order.
pub const BINDINGS: &[Binding] = &[
    Binding {
        details: Details::DRIVER_CONN,
        name: "driver_conn",
        scope: &[MetricKind::Driver],
        bind: conn::bind,
    },
    Binding {
        details: Details::DRIVER_DISCOVERY,
        name: "driver_discovery",
        scope: &[MetricKind::Driver],
        bind: discovery::bind,
    },
    Binding {
        details: Details::DRIVER_CLUSTER,
        name: "driver_cluster",
        scope: &[MetricKind::Driver],
        bind: cluster::bind,
    },
    Binding {
        details: Details::DRIVER_CREDENTIALS,
        name: "driver_credentials",
        scope: &[MetricKind::Driver],
        bind: credentials::bind,
    },
    Binding {
        details: Details::TABLE_SESSION,
        name: "table_session",
        scope: &[MetricKind::Table],
        bind: session::bind,
    },
    Binding {
        details: Details::TABLE_QUERY,
        name: "table_query",
        scope: &[MetricKind::Table],
        bind: query::bind,
    },
    Binding {
        details: Details::TABLE_STREAM,
        name: "table_stream",
        scope: &[MetricKind::Table],
        bind: stream::bind,
    },
    Binding {
        details: Details::TABLE_TRANSACTION,
        name: "table_transaction",
        scope: &[MetricKind::Table],
        bind: transaction::bind,
    },
    Binding {
        details: Details::TABLE_POOL,
        name: "table_pool",
        scope: &[MetricKind::Table],
        bind: pool::bind,
    },
    Binding {
        details: Details::RETRY,
        name: "retry",
        scope: &[MetricKind::Retry],
        bind: retry::bind,
    },
    Binding {
        details: Details::QUERY_SESSION,
        name: "query_session",
        scope: &[MetricKind::QueryService],
        bind: query_service::bind_session,
    },
    Binding {
        details: Details::QUERY_EXECUTE,
        name: "query_execute",
        scope: &[MetricKind::QueryService],
        bind: query_service::bind_execute,
    },
    Binding {
        details: Details::QUERY_POOL,
        name: "query_pool",
        scope: &[MetricKind::QueryService],
        bind: query_service::bind_pool,
    },
    Binding {
        details: Details::SCHEME,
        name: "scheme",
        scope: &[MetricKind::Scheme],
        bind: scheme::bind,
    },
    Binding {
        details: Details::SCRIPTING,
        name: "scripting",
        scope: &[MetricKind::Scripting],
        bind: scripting::bind,
    },
    Binding {
        details: Details::COORDINATION,
        name: "coordination",
        scope: &[MetricKind::Coordination],
        bind: coordination::bind,
    },
    Binding {
        details: Details::RATELIMITER,
        name: "ratelimiter",
        scope: &[MetricKind::Ratelimiter],
        bind: ratelimiter::bind,
    },
    Binding {
        details: Details::DATABASE_SQL,
        name: "database_sql",
        scope: &[MetricKind::DatabaseSql],
        bind: sql::bind,
    },
];

/// Build a trace with the categories selected by `details` installed.
pub(crate) fn bind(metrics: Arc<Metrics>, details: Details) -> Trace {
    let mut trace = Trace::empty(Arc::clone(&metrics));
    let mut enabled = Vec::new();
    for binding in BINDINGS {
        if binding.is_enabled(details) {
            let scope = Scope::new(Arc::clone(&metrics), binding.scope);
            (binding.bind)(&scope, &mut trace);
            enabled.push(binding.name);
        } else {
            tracing::trace!(category = binding.name, "category not selected");
        }
    }
    debug!(categories = ?enabled, "metrics trace built");
    trace
}

/// `parts` followed by `more`.
fn path<'a>(parts: &[&'a str], more: &[&'a str]) -> Vec<&'a str> {
    let mut all = Vec::with_capacity(parts.len() + more.len());
    all.extend_from_slice(parts);
    all.extend_from_slice(more);
    all
}

/// Done-state metrics of a tracked operation: latency, total, error.
fn record_done(scope: &Scope, parts: &[&str], ctx: &OpContext, err: Option<&dyn Failure>) {
    scope
        .histogram(&path(parts, &[scope.name(MetricKind::Latency)]))
        .record(ctx.elapsed_ms());
    scope
        .counter(&path(parts, &[scope.name(MetricKind::Total)]))
        .increment(1);
    scope.count_error(parts, err);
}

/// Adjust the `<parts>/in_flight` gauge.
fn in_flight(scope: &Scope, parts: &[&str], delta: f64) {
    scope
        .gauge(&path(parts, &[scope.name(MetricKind::InFlight)]))
        .increment(delta);
}

fn resolve<'a>(scope: &'a Scope, ops: &[MetricKind]) -> Vec<&'a str> {
    ops.iter().map(|kind| scope.name(*kind)).collect()
}

/// Plain start/done operation named by `ops`: latency, total, error.
fn tracked<S: 'static>(scope: &Scope, ops: &'static [MetricKind]) -> Hook<S, Done> {
    let d = scope.clone();
    Hook::new(
        |_: &S| OpContext::new(),
        move |ctx: OpContext, info: &Done| {
            record_done(&d, &resolve(&d, ops), &ctx, info.error());
        },
    )
}

/// Like [`tracked`], with `<ops>/in_flight` held up while the operation runs.
fn tracked_in_flight<S: 'static>(scope: &Scope, ops: &'static [MetricKind]) -> Hook<S, Done> {
    let s = scope.clone();
    let d = scope.clone();
    Hook::new(
        move |_: &S| {
            in_flight(&s, &resolve(&s, ops), 1.0);
            OpContext::new()
        },
        move |ctx: OpContext, info: &Done| {
            let parts = resolve(&d, ops);
            record_done(&d, &parts, &ctx, info.error());
            in_flight(&d, &parts, -1.0);
        },
    )
}
