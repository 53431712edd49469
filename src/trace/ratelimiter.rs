//! Rate limiter events.

use super::{Done, Hook};

/// A resource addressed inside a coordination node.
#[derive(Debug, Clone, Default)]
pub struct ResourceStart {
    pub coordination_node: String,
    pub resource: String,
}

#[derive(Debug, Clone, Default)]
pub struct AcquireStart {
    pub coordination_node: String,
    pub resource: String,
    pub amount: u64,
}

#[derive(Debug, Default)]
pub struct RatelimiterTrace {
    pub on_acquire: Hook<AcquireStart, Done>,
    pub on_create_resource: Hook<ResourceStart, Done>,
    pub on_alter_resource: Hook<ResourceStart, Done>,
    pub on_drop_resource: Hook<ResourceStart, Done>,
    pub on_describe_resource: Hook<ResourceStart, Done>,
}
