//! Coordination service events.

use super::{Done, Hook};

/// An operation on one coordination node.
#[derive(Debug, Clone, Default)]
pub struct NodeStart {
    pub path: String,
}

#[derive(Debug, Default)]
pub struct CoordinationTrace {
    pub on_create_node: Hook<NodeStart, Done>,
    pub on_alter_node: Hook<NodeStart, Done>,
    pub on_drop_node: Hook<NodeStart, Done>,
    pub on_describe_node: Hook<NodeStart, Done>,
    /// Spans the whole lifetime of a coordination session.
    pub on_session: Hook<NodeStart, Done>,
}
