//! Scripting service events.

use super::{Done, Hook, StreamHook};

#[derive(Debug, Clone, Default)]
pub struct ScriptStart {
    pub query: String,
}

#[derive(Debug, Default)]
pub struct ScriptingTrace {
    pub on_execute: Hook<ScriptStart, Done>,
    /// Result parts arrive through `recv`.
    pub on_stream_execute: StreamHook<ScriptStart, Done, Done>,
    pub on_explain: Hook<ScriptStart, Done>,
}
