//! Query service events: sessions, query execution and the session pool.

use super::{Done, Fault, Hook, Start};

#[derive(Debug, Clone, Default)]
pub struct QuerySessionStart {
    pub session_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct QuerySessionCreateDone {
    pub session_id: Option<String>,
    pub error: Option<Fault>,
}

#[derive(Debug, Clone, Default)]
pub struct ExecuteStart {
    pub session_id: String,
    pub query: String,
}

/// A unit of work run on a pooled session, retried by the pool.
#[derive(Debug, Clone, Default)]
pub struct PoolWithDone {
    pub attempts: u32,
    pub error: Option<Fault>,
}

/// Query service instrumentation slots.
#[derive(Debug, Default)]
pub struct QueryTrace {
    pub on_session_create: Hook<Start, QuerySessionCreateDone>,
    pub on_session_delete: Hook<QuerySessionStart, Done>,

    pub on_execute: Hook<ExecuteStart, Done>,

    pub on_pool_with: Hook<Start, PoolWithDone>,
    pub on_pool_close: Hook<Start, Done>,
}
