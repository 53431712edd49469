//! Metric name dimensions and their built-in display names.

use std::str::FromStr;

use serde::de::IntoDeserializer;
use serde::de::value::StrDeserializer;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A logical metric dimension.
///
/// Each kind resolves to one name part. The serde form (snake_case variant
/// name) is the identifier used for overrides in config files, e.g.
/// `latency = "duration_ms"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    // Outcome and value dimensions
    Error,
    Attempts,
    Latency,
    Total,
    Balance,
    InFlight,
    Status,
    Messages,
    Recv,
    Limit,
    KeepAliveMinSize,
    Idempotent,
    NonIdempotent,
    Prepared,
    NotPrepared,

    // Driver
    Driver,
    Conn,
    ConnDial,
    ConnDisconnect,
    ConnInvoke,
    ConnStream,
    Cluster,
    ClusterGet,
    ClusterInsert,
    ClusterUpdate,
    ClusterRemove,
    ClusterPessimize,
    GetCredentials,
    Discovery,
    DiscoveryEndpoints,

    // Table
    Table,
    Session,
    SessionCreate,
    SessionKeepAlive,
    SessionDelete,
    Query,
    QueryPrepareData,
    QueryExecuteData,
    Stream,
    StreamReadTable,
    StreamExecuteScan,
    Transaction,
    TransactionBegin,
    TransactionCommit,
    TransactionRollback,
    Pool,
    PoolCreate,
    PoolClose,
    PoolGet,
    PoolWait,
    PoolTake,
    PoolPut,
    PoolCloseSession,

    // Retry
    Retry,

    // Query service
    QueryService,
    QuerySession,
    QuerySessionCreate,
    QuerySessionDelete,
    QueryExecute,
    QueryPool,
    QueryPoolWith,
    QueryPoolClose,

    // Scheme
    Scheme,
    SchemeListDirectory,
    SchemeDescribePath,
    SchemeMakeDirectory,
    SchemeRemoveDirectory,
    SchemeModifyPermissions,

    // Scripting
    Scripting,
    ScriptingExecute,
    ScriptingStreamExecute,
    ScriptingExplain,

    // Coordination
    Coordination,
    CoordinationCreateNode,
    CoordinationAlterNode,
    CoordinationDropNode,
    CoordinationDescribeNode,
    CoordinationSession,

    // Rate limiter
    Ratelimiter,
    RatelimiterAcquire,
    RatelimiterCreateResource,
    RatelimiterAlterResource,
    RatelimiterDropResource,
    RatelimiterDescribeResource,

    // database/sql style connector
    DatabaseSql,
    SqlConnect,
    SqlConn,
    SqlConnClose,
    SqlPing,
    SqlPrepare,
    SqlExec,
    SqlQuery,
    SqlBegin,
    SqlTx,
    SqlCommit,
    SqlRollback,
}

impl MetricKind {
    /// The built-in name part for this kind.
    pub fn default_name(self) -> &'static str {
        match self {
            MetricKind::Error => "error",
            MetricKind::Attempts => "attempts",
            MetricKind::Latency => "latency_ms",
            MetricKind::Total => "total",
            MetricKind::Balance => "balance",
            MetricKind::InFlight => "in_flight",
            MetricKind::Status => "status",
            MetricKind::Messages => "messages",
            MetricKind::Recv => "recv",
            MetricKind::Limit => "limit",
            MetricKind::KeepAliveMinSize => "keep_alive_min_size",
            MetricKind::Idempotent => "idempotent",
            MetricKind::NonIdempotent => "non-idempotent",
            MetricKind::Prepared => "prepared",
            MetricKind::NotPrepared => "not_prepared",

            MetricKind::Driver => "driver",
            MetricKind::Conn => "conn",
            MetricKind::ConnDial => "dial",
            MetricKind::ConnDisconnect => "disconnect",
            MetricKind::ConnInvoke => "invoke",
            MetricKind::ConnStream => "stream",
            MetricKind::Cluster => "cluster",
            MetricKind::ClusterGet => "get",
            MetricKind::ClusterInsert => "insert",
            MetricKind::ClusterUpdate => "update",
            MetricKind::ClusterRemove => "remove",
            MetricKind::ClusterPessimize => "pessimize",
            MetricKind::GetCredentials => "get_credentials",
            MetricKind::Discovery => "discovery",
            MetricKind::DiscoveryEndpoints => "endpoints",

            MetricKind::Table => "table",
            MetricKind::Session => "session",
            MetricKind::SessionCreate => "create",
            MetricKind::SessionKeepAlive => "keep_alive",
            MetricKind::SessionDelete => "delete",
            MetricKind::Query => "query",
            MetricKind::QueryPrepareData => "prepare_data",
            MetricKind::QueryExecuteData => "execute_data",
            MetricKind::Stream => "stream",
            MetricKind::StreamReadTable => "read_table",
            MetricKind::StreamExecuteScan => "execute_scan",
            MetricKind::Transaction => "transaction",
            MetricKind::TransactionBegin => "begin",
            MetricKind::TransactionCommit => "commit",
            MetricKind::TransactionRollback => "rollback",
            MetricKind::Pool => "pool",
            MetricKind::PoolCreate => "create",
            MetricKind::PoolClose => "close",
            MetricKind::PoolGet => "get",
            MetricKind::PoolWait => "wait",
            MetricKind::PoolTake => "take",
            MetricKind::PoolPut => "put",
            MetricKind::PoolCloseSession => "close_session",

            MetricKind::Retry => "retry",

            MetricKind::QueryService => "query",
            MetricKind::QuerySession => "session",
            MetricKind::QuerySessionCreate => "create",
            MetricKind::QuerySessionDelete => "delete",
            MetricKind::QueryExecute => "execute",
            MetricKind::QueryPool => "pool",
            MetricKind::QueryPoolWith => "with",
            MetricKind::QueryPoolClose => "close",

            MetricKind::Scheme => "scheme",
            MetricKind::SchemeListDirectory => "list_directory",
            MetricKind::SchemeDescribePath => "describe_path",
            MetricKind::SchemeMakeDirectory => "make_directory",
            MetricKind::SchemeRemoveDirectory => "remove_directory",
            MetricKind::SchemeModifyPermissions => "modify_permissions",

            MetricKind::Scripting => "scripting",
            MetricKind::ScriptingExecute => "execute",
            MetricKind::ScriptingStreamExecute => "stream_execute",
            MetricKind::ScriptingExplain => "explain",

            MetricKind::Coordination => "coordination",
            MetricKind::CoordinationCreateNode => "create_node",
            MetricKind::CoordinationAlterNode => "alter_node",
            MetricKind::CoordinationDropNode => "drop_node",
            MetricKind::CoordinationDescribeNode => "describe_node",
            MetricKind::CoordinationSession => "session",

            MetricKind::Ratelimiter => "ratelimiter",
            MetricKind::RatelimiterAcquire => "acquire",
            MetricKind::RatelimiterCreateResource => "create_resource",
            MetricKind::RatelimiterAlterResource => "alter_resource",
            MetricKind::RatelimiterDropResource => "drop_resource",
            MetricKind::RatelimiterDescribeResource => "describe_resource",

            MetricKind::DatabaseSql => "database_sql",
            MetricKind::SqlConnect => "connect",
            MetricKind::SqlConn => "conn",
            MetricKind::SqlConnClose => "close",
            MetricKind::SqlPing => "ping",
            MetricKind::SqlPrepare => "prepare",
            MetricKind::SqlExec => "exec",
            MetricKind::SqlQuery => "query",
            MetricKind::SqlBegin => "begin",
            MetricKind::SqlTx => "tx",
            MetricKind::SqlCommit => "commit",
            MetricKind::SqlRollback => "rollback",
        }
    }

    /// Name part for a boolean idempotency flag.
    pub fn idempotency(idempotent: bool) -> Self {
        if idempotent {
            MetricKind::Idempotent
        } else {
            MetricKind::NonIdempotent
        }
    }
}

impl FromStr for MetricKind {
    type Err = Error;

    /// Parse the config-file identifier (`"in_flight"`, `"conn_dial"`, ...).
    fn from_str(s: &str) -> Result<Self> {
        let de: StrDeserializer<'_, serde::de::value::Error> = s.into_deserializer();
        MetricKind::deserialize(de).map_err(|_| Error::UnknownKind(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_stable() {
        assert_eq!(MetricKind::Latency.default_name(), "latency_ms");
        assert_eq!(MetricKind::NonIdempotent.default_name(), "non-idempotent");
        assert_eq!(MetricKind::ConnDial.default_name(), "dial");
        assert_eq!(MetricKind::PoolCloseSession.default_name(), "close_session");
        assert_eq!(MetricKind::DatabaseSql.default_name(), "database_sql");
        assert_eq!(MetricKind::QueryService.default_name(), "query");
    }

    #[test]
    fn parses_config_identifiers() {
        assert_eq!("in_flight".parse::<MetricKind>().unwrap(), MetricKind::InFlight);
        assert_eq!("conn_dial".parse::<MetricKind>().unwrap(), MetricKind::ConnDial);
        assert_eq!(
            "pool_close_session".parse::<MetricKind>().unwrap(),
            MetricKind::PoolCloseSession
        );
        assert_eq!(
            "scheme_list_directory".parse::<MetricKind>().unwrap(),
            MetricKind::SchemeListDirectory
        );
    }

    #[test]
    fn rejects_unknown_identifier() {
        let err = "latency_seconds".parse::<MetricKind>().unwrap_err();
        assert!(matches!(err, Error::UnknownKind(ref s) if s == "latency_seconds"));
    }

    #[test]
    fn idempotency_flag() {
        assert_eq!(MetricKind::idempotency(true), MetricKind::Idempotent);
        assert_eq!(MetricKind::idempotency(false), MetricKind::NonIdempotent);
    }
}
