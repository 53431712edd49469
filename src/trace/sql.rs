//! Events of the `database/sql` style connector: connections, statements
//! and transactions opened through it.

use super::{Done, Hook, Start};

/// A statement run on a connector connection.
#[derive(Debug, Clone, Default)]
pub struct StatementStart {
    pub query: String,
    pub idempotent: bool,
}

#[derive(Debug, Default)]
pub struct DatabaseSqlTrace {
    pub on_connect: Hook<Start, Done>,
    pub on_conn_close: Hook<Start, Done>,
    pub on_conn_ping: Hook<Start, Done>,
    pub on_conn_prepare: Hook<StatementStart, Done>,
    pub on_conn_exec: Hook<StatementStart, Done>,
    pub on_conn_query: Hook<StatementStart, Done>,
    pub on_conn_begin: Hook<Start, Done>,
    pub on_tx_commit: Hook<Start, Done>,
    pub on_tx_rollback: Hook<Start, Done>,
}
