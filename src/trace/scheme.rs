//! Scheme service events.

use super::{Done, Hook};

/// A scheme operation on one path.
#[derive(Debug, Clone, Default)]
pub struct SchemePathStart {
    pub path: String,
}

#[derive(Debug, Default)]
pub struct SchemeTrace {
    pub on_list_directory: Hook<SchemePathStart, Done>,
    pub on_describe_path: Hook<SchemePathStart, Done>,
    pub on_make_directory: Hook<SchemePathStart, Done>,
    pub on_remove_directory: Hook<SchemePathStart, Done>,
    pub on_modify_permissions: Hook<SchemePathStart, Done>,
}
