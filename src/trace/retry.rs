//! Retry loop events.

use super::{Fault, Hook};

#[derive(Debug, Clone, Default)]
pub struct RetryStart {
    pub idempotent: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RetryDone {
    /// Attempts made, including the first.
    pub attempts: u32,
    pub error: Option<Fault>,
}

/// Retry instrumentation slots.
#[derive(Debug, Default)]
pub struct RetryTrace {
    pub on_retry: Hook<RetryStart, RetryDone>,
}
