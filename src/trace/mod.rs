//! Event contract between the database client and the instrumentation.
//!
//! The client reports each tracked operation through a slot:
//!
//! ```text
//! Hook:        start(&S) ─► Pending<D> ─► done(&D)
//! StreamHook:  start(&S) ─► PendingStream<R, D> ─► recv(&R)* ─► done(&D)
//! Notify:      emit(&I)
//! ```
//!
//! `start` returns the operation's [`OpContext`] wrapped in a pending value
//! that the client carries to completion. `done` consumes it, so the done
//! callback runs at most once. Slots left unset by the binder return inert
//! pending values: no clock read, no allocation, nothing recorded.

pub mod coordination;
pub mod driver;
pub mod query;
pub mod ratelimiter;
pub mod retry;
pub mod scheme;
pub mod scripting;
pub mod sql;
pub mod table;

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub use coordination::CoordinationTrace;
pub use driver::DriverTrace;
pub use query::QueryTrace;
pub use ratelimiter::RatelimiterTrace;
pub use retry::RetryTrace;
pub use scheme::SchemeTrace;
pub use scripting::ScriptingTrace;
pub use sql::DatabaseSqlTrace;
pub use table::TableTrace;

use crate::classify::Failure;
use crate::scope::Metrics;

/// A failure attached to an event record.
pub type Fault = Arc<dyn Failure>;

/// Start record for operations that carry no input worth recording.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Start;

/// Done record for operations whose only outcome is success or failure.
#[derive(Debug, Clone, Default)]
pub struct Done {
    pub error: Option<Fault>,
}

impl Done {
    pub fn ok() -> Self {
        Self { error: None }
    }

    pub fn failed(error: impl Failure + 'static) -> Self {
        Self {
            error: Some(Arc::new(error)),
        }
    }

    pub fn error(&self) -> Option<&dyn Failure> {
        self.error.as_deref()
    }
}

/// State carried from an operation's start to its end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpContext {
    /// When the start callback ran.
    pub started: Instant,
    /// Stream messages received so far.
    pub received: u64,
    /// Dynamic name parts captured at start (method, endpoint, state).
    pub parts: Vec<String>,
}

impl OpContext {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            received: 0,
            parts: Vec::new(),
        }
    }

    /// Capture a dynamic name part.
    pub fn with_part(mut self, part: impl Into<String>) -> Self {
        self.parts.push(part.into());
        self
    }

    pub fn part(&self, index: usize) -> &str {
        self.parts.get(index).map(String::as_str).unwrap_or_default()
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Elapsed time in fractional milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for OpContext {
    fn default() -> Self {
        Self::new()
    }
}

type StartFn<S> = dyn Fn(&S) -> OpContext + Send + Sync;
type RecvFn<R> = dyn Fn(&mut OpContext, &R) + Send + Sync;
type DoneFn<D> = dyn Fn(OpContext, &D) + Send + Sync;

/// Start/done slot for one kind of operation.
pub struct Hook<S, D> {
    callbacks: Option<(Arc<StartFn<S>>, Arc<DoneFn<D>>)>,
}

impl<S, D> Hook<S, D> {
    /// An unset slot.
    pub fn none() -> Self {
        Self { callbacks: None }
    }

    pub fn new(
        start: impl Fn(&S) -> OpContext + Send + Sync + 'static,
        done: impl Fn(OpContext, &D) + Send + Sync + 'static,
    ) -> Self {
        let start: Arc<StartFn<S>> = Arc::new(start);
        let done: Arc<DoneFn<D>> = Arc::new(done);
        Self {
            callbacks: Some((start, done)),
        }
    }

    pub fn is_set(&self) -> bool {
        self.callbacks.is_some()
    }

    /// Report the operation's start.
    pub fn start(&self, info: &S) -> Pending<D> {
        Pending {
            inner: self
                .callbacks
                .as_ref()
                .map(|(start, done)| (start(info), Arc::clone(done))),
        }
    }
}

impl<S, D> Default for Hook<S, D> {
    fn default() -> Self {
        Self::none()
    }
}

impl<S, D> fmt::Debug for Hook<S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook").field("set", &self.is_set()).finish()
    }
}

/// A started operation awaiting its done event.
#[must_use = "call `done` when the operation completes"]
pub struct Pending<D> {
    inner: Option<(OpContext, Arc<DoneFn<D>>)>,
}

impl<D> Pending<D> {
    /// Context captured at start; `None` for an unset slot.
    pub fn context(&self) -> Option<&OpContext> {
        self.inner.as_ref().map(|(ctx, _)| ctx)
    }

    /// Report completion.
    pub fn done(self, info: &D) {
        if let Some((ctx, done)) = self.inner {
            done(ctx, info);
        }
    }
}

/// Start/recv/done slot for streaming operations.
pub struct StreamHook<S, R, D> {
    callbacks: Option<(Arc<StartFn<S>>, Arc<RecvFn<R>>, Arc<DoneFn<D>>)>,
}

impl<S, R, D> StreamHook<S, R, D> {
    pub fn none() -> Self {
        Self { callbacks: None }
    }

    pub fn new(
        start: impl Fn(&S) -> OpContext + Send + Sync + 'static,
        recv: impl Fn(&mut OpContext, &R) + Send + Sync + 'static,
        done: impl Fn(OpContext, &D) + Send + Sync + 'static,
    ) -> Self {
        let start: Arc<StartFn<S>> = Arc::new(start);
        let recv: Arc<RecvFn<R>> = Arc::new(recv);
        let done: Arc<DoneFn<D>> = Arc::new(done);
        Self {
            callbacks: Some((start, recv, done)),
        }
    }

    pub fn is_set(&self) -> bool {
        self.callbacks.is_some()
    }

    pub fn start(&self, info: &S) -> PendingStream<R, D> {
        PendingStream {
            inner: self.callbacks.as_ref().map(|(start, recv, done)| {
                (start(info), Arc::clone(recv), Arc::clone(done))
            }),
        }
    }
}

impl<S, R, D> Default for StreamHook<S, R, D> {
    fn default() -> Self {
        Self::none()
    }
}

impl<S, R, D> fmt::Debug for StreamHook<S, R, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamHook")
            .field("set", &self.is_set())
            .finish()
    }
}

/// A started stream awaiting messages and its done event.
#[must_use = "call `done` when the stream completes"]
pub struct PendingStream<R, D> {
    inner: Option<(OpContext, Arc<RecvFn<R>>, Arc<DoneFn<D>>)>,
}

impl<R, D> PendingStream<R, D> {
    pub fn context(&self) -> Option<&OpContext> {
        self.inner.as_ref().map(|(ctx, _, _)| ctx)
    }

    /// Report one received message.
    pub fn recv(&mut self, info: &R) {
        if let Some((ctx, recv, _)) = self.inner.as_mut() {
            recv(ctx, info);
        }
    }

    pub fn done(self, info: &D) {
        if let Some((ctx, _, done)) = self.inner {
            done(ctx, info);
        }
    }
}

/// Slot for instantaneous events.
pub struct Notify<I> {
    callback: Option<Arc<dyn Fn(&I) + Send + Sync>>,
}

impl<I> Notify<I> {
    pub fn none() -> Self {
        Self { callback: None }
    }

    pub fn new(callback: impl Fn(&I) + Send + Sync + 'static) -> Self {
        let callback: Arc<dyn Fn(&I) + Send + Sync> = Arc::new(callback);
        Self {
            callback: Some(callback),
        }
    }

    pub fn is_set(&self) -> bool {
        self.callback.is_some()
    }

    pub fn emit(&self, info: &I) {
        if let Some(callback) = &self.callback {
            callback(info);
        }
    }
}

impl<I> Default for Notify<I> {
    fn default() -> Self {
        Self::none()
    }
}

impl<I> fmt::Debug for Notify<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notify").field("set", &self.is_set()).finish()
    }
}

/// All instrumentation slots, as handed to the database client.
#[derive(Debug)]
pub struct Trace {
    pub driver: DriverTrace,
    pub table: TableTrace,
    pub retry: RetryTrace,
    pub query: QueryTrace,
    pub scheme: SchemeTrace,
    pub scripting: ScriptingTrace,
    pub coordination: CoordinationTrace,
    pub ratelimiter: RatelimiterTrace,
    pub database_sql: DatabaseSqlTrace,
    metrics: Arc<Metrics>,
}

impl Trace {
    /// A trace with every slot unset.
    pub(crate) fn empty(metrics: Arc<Metrics>) -> Self {
        Self {
            driver: DriverTrace::default(),
            table: TableTrace::default(),
            retry: RetryTrace::default(),
            query: QueryTrace::default(),
            scheme: SchemeTrace::default(),
            scripting: ScriptingTrace::default(),
            coordination: CoordinationTrace::default(),
            ratelimiter: RatelimiterTrace::default(),
            database_sql: DatabaseSqlTrace::default(),
            metrics,
        }
    }

    /// The naming and handle state shared by all slots.
    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[test]
    fn unset_hook_is_inert() {
        let hook: Hook<(), ()> = Hook::none();
        let pending = hook.start(&());
        assert!(pending.context().is_none());
        pending.done(&());
    }

    #[test]
    fn hook_passes_context_to_done() {
        let seen = Arc::new(AtomicU64::new(0));
        let seen_done = Arc::clone(&seen);
        let hook: Hook<u64, ()> = Hook::new(
            |n| {
                let mut ctx = OpContext::new();
                ctx.received = *n;
                ctx
            },
            move |ctx, _| seen_done.store(ctx.received, Ordering::SeqCst),
        );
        let pending = hook.start(&7);
        assert_eq!(pending.context().map(|c| c.received), Some(7));
        pending.done(&());
        assert_eq!(seen.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn stream_hook_threads_context_through_recv() {
        let total = Arc::new(AtomicU64::new(0));
        let total_done = Arc::clone(&total);
        let hook: StreamHook<(), (), ()> = StreamHook::new(
            |_| OpContext::new().with_part("read_rows"),
            |ctx, _| ctx.received += 1,
            move |ctx, _| {
                assert_eq!(ctx.part(0), "read_rows");
                total_done.store(ctx.received, Ordering::SeqCst);
            },
        );
        let mut pending = hook.start(&());
        pending.recv(&());
        pending.recv(&());
        pending.recv(&());
        pending.done(&());
        assert_eq!(total.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn notify_runs_callback() {
        let count = Arc::new(AtomicU64::new(0));
        let c = Arc::clone(&count);
        let notify: Notify<u64> = Notify::new(move |n| {
            c.fetch_add(*n, Ordering::SeqCst);
        });
        notify.emit(&2);
        notify.emit(&3);
        assert_eq!(count.load(Ordering::SeqCst), 5);
        Notify::<u64>::none().emit(&1);
    }

    #[test]
    fn missing_part_is_empty() {
        assert_eq!(OpContext::new().part(3), "");
    }
}
