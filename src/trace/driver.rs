//! Driver events: connections, discovery, cluster membership, credentials.

use std::fmt;

use super::{Done, Fault, Hook, Notify, Start, StreamHook};

/// Connection state as tracked by the driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ConnState {
    #[default]
    Created,
    Online,
    Banned,
    Offline,
    Destroyed,
}

impl ConnState {
    pub fn as_str(self) -> &'static str {
        match self {
            ConnState::Created => "created",
            ConnState::Online => "online",
            ConnState::Banned => "banned",
            ConnState::Offline => "offline",
            ConnState::Destroyed => "destroyed",
        }
    }

    /// Numeric code, recorded as a per-endpoint gauge value.
    pub fn code(self) -> i32 {
        match self {
            ConnState::Created => 0,
            ConnState::Online => 1,
            ConnState::Banned => 2,
            ConnState::Offline => 3,
            ConnState::Destroyed => 4,
        }
    }
}

impl fmt::Display for ConnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A connection was created or closed.
#[derive(Debug, Clone, Default)]
pub struct ConnInfo {
    pub endpoint: String,
    pub state: ConnState,
}

#[derive(Debug, Clone, Default)]
pub struct ConnStateChangeStart {
    pub endpoint: String,
    /// State before the change.
    pub state: ConnState,
}

#[derive(Debug, Clone, Default)]
pub struct ConnStateChangeDone {
    /// State after the change.
    pub state: ConnState,
}

/// Dial or disconnect of a single endpoint.
#[derive(Debug, Clone, Default)]
pub struct ConnStart {
    pub endpoint: String,
    pub state: ConnState,
}

/// A unary call or a server stream on a connection.
#[derive(Debug, Clone, Default)]
pub struct ConnCallStart {
    pub endpoint: String,
    /// Fully qualified RPC method, e.g. `/Ydb.Table.V1.TableService/ExecuteDataQuery`.
    pub method: String,
}

impl ConnCallStart {
    /// Method without the leading slash, used as a name part.
    pub fn method_name(&self) -> &str {
        self.method.trim_start_matches('/')
    }
}

#[derive(Debug, Clone, Default)]
pub struct DiscoveryStart {
    pub address: String,
    pub database: String,
}

#[derive(Debug, Clone, Default)]
pub struct DiscoveryDone {
    pub endpoints: Vec<String>,
    pub error: Option<Fault>,
}

#[derive(Debug, Clone, Default)]
pub struct ClusterGetDone {
    pub endpoint: Option<String>,
    pub error: Option<Fault>,
}

/// An endpoint entering, leaving or changing inside the cluster.
#[derive(Debug, Clone, Default)]
pub struct ClusterEndpoint {
    pub endpoint: String,
}

#[derive(Debug, Clone, Default)]
pub struct ClusterChangeDone {
    /// False when the change was a no-op (already present, already gone).
    pub applied: bool,
    pub state: ConnState,
}

#[derive(Debug, Clone, Default)]
pub struct PessimizeStart {
    pub endpoint: String,
    pub state: ConnState,
    pub cause: Option<Fault>,
}

#[derive(Debug, Clone, Default)]
pub struct PessimizeDone {
    pub state: ConnState,
    pub error: Option<Fault>,
}

/// Driver instrumentation slots.
#[derive(Debug, Default)]
pub struct DriverTrace {
    pub on_conn_new: Notify<ConnInfo>,
    pub on_conn_close: Notify<ConnInfo>,
    pub on_conn_state_change: Hook<ConnStateChangeStart, ConnStateChangeDone>,
    pub on_conn_dial: Hook<ConnStart, Done>,
    pub on_conn_disconnect: Hook<ConnStart, Done>,
    pub on_conn_invoke: Hook<ConnCallStart, Done>,
    pub on_conn_stream: StreamHook<ConnCallStart, Done, Done>,

    pub on_discovery: Hook<DiscoveryStart, DiscoveryDone>,

    pub on_cluster_get: Hook<Start, ClusterGetDone>,
    pub on_cluster_insert: Hook<ClusterEndpoint, ClusterChangeDone>,
    pub on_cluster_update: Hook<ClusterEndpoint, ClusterChangeDone>,
    pub on_cluster_remove: Hook<ClusterEndpoint, ClusterChangeDone>,
    pub on_pessimize_node: Hook<PessimizeStart, PessimizeDone>,

    pub on_get_credentials: Hook<Start, Done>,
}
