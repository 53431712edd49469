//! Table service events: sessions, queries, streams, transactions and the
//! session pool.
//!
//! Session and transaction ids are carried for the host's own use; they are
//! never turned into name parts.

use super::{Done, Fault, Hook, Start, StreamHook};

#[derive(Debug, Clone, Default)]
pub struct SessionStart {
    pub session_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct SessionCreateDone {
    pub session_id: Option<String>,
    pub error: Option<Fault>,
}

#[derive(Debug, Clone, Default)]
pub struct QueryStart {
    pub session_id: String,
    pub query: String,
}

#[derive(Debug, Clone, Default)]
pub struct ExecuteDataDone {
    /// Whether the server used a prepared (cached) query plan.
    pub prepared: bool,
    pub error: Option<Fault>,
}

#[derive(Debug, Clone, Default)]
pub struct TxStart {
    pub session_id: String,
    /// Empty for begin.
    pub tx_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct TxBeginDone {
    pub tx_id: Option<String>,
    pub error: Option<Fault>,
}

#[derive(Debug, Clone, Default)]
pub struct PoolInitDone {
    pub limit: usize,
    pub keep_alive_min_size: usize,
}

#[derive(Debug, Clone, Default)]
pub struct PoolGetDone {
    pub attempts: u32,
    pub error: Option<Fault>,
}

#[derive(Debug, Clone, Default)]
pub struct PoolTakeDone {
    pub took: bool,
    pub error: Option<Fault>,
}

/// Table instrumentation slots.
#[derive(Debug, Default)]
pub struct TableTrace {
    pub on_session_create: Hook<Start, SessionCreateDone>,
    pub on_session_keep_alive: Hook<SessionStart, Done>,
    pub on_session_delete: Hook<SessionStart, Done>,

    pub on_prepare_data_query: Hook<QueryStart, Done>,
    pub on_execute_data_query: Hook<QueryStart, ExecuteDataDone>,

    pub on_stream_read_table: StreamHook<QueryStart, Done, Done>,
    pub on_stream_execute_scan_query: StreamHook<QueryStart, Done, Done>,

    pub on_begin_transaction: Hook<TxStart, TxBeginDone>,
    pub on_commit_transaction: Hook<TxStart, Done>,
    pub on_rollback_transaction: Hook<TxStart, Done>,

    pub on_pool_init: Hook<Start, PoolInitDone>,
    pub on_pool_close: Hook<Start, Done>,
    pub on_pool_get: Hook<Start, PoolGetDone>,
    pub on_pool_put: Hook<SessionStart, Done>,
    pub on_pool_wait: Hook<Start, Done>,
    pub on_pool_take: Hook<SessionStart, PoolTakeDone>,
    pub on_pool_close_session: Hook<SessionStart, Done>,
}
