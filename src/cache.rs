//! Metric handle cache.
//!
//! Maps a joined metric name to the one handle registered under it. The
//! first caller for a name runs the `create` closure (a backend
//! registration); concurrent callers for the same name wait for that
//! closure and then share its result, so registration happens at most once
//! per name for the lifetime of the cache.
//!
//! Backed by moka's concurrent cache with no capacity bound and no TTL:
//! entries are never evicted. Cardinality is bounded only by the names the
//! bindings produce, so high-cardinality values (request ids, query text)
//! must never become name parts.

use std::fmt;

use moka::sync::Cache;

/// Joined name → handle, with at-most-once construction per name.
pub struct HandleCache<H> {
    handles: Cache<String, H>,
}

impl<H> HandleCache<H>
where
    H: Clone + Send + Sync + 'static,
{
    /// Create an empty, unbounded cache.
    pub fn new() -> Self {
        Self {
            handles: Cache::builder().build(),
        }
    }

    /// Return the handle stored under `name`, creating it with `create` on
    /// first use.
    ///
    /// `create` runs while other callers for the same name are held back, so
    /// it must be cheap and must not block. A panic in `create` propagates
    /// to the caller and leaves no entry behind.
    pub fn get_or_create(&self, name: &str, create: impl FnOnce() -> H) -> H {
        self.handles.get_with_by_ref(name, create)
    }

    /// Look up a handle without creating one.
    pub fn get(&self, name: &str) -> Option<H> {
        self.handles.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handles.contains_key(name)
    }

    /// Number of cached handles.
    pub fn len(&self) -> u64 {
        self.handles.run_pending_tasks();
        self.handles.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All cached names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handles.iter().map(|(k, _)| (*k).clone()).collect();
        names.sort();
        names
    }
}

impl<H> Default for HandleCache<H>
where
    H: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for HandleCache<H>
where
    H: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandleCache")
            .field("len", &self.len())
            .finish()
    }
}
