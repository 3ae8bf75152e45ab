//! Query lifecycle observation.
//!
//! The conversation loop reports progress through this trait. Observers must
//! never affect control flow: every method returns unit and the loop ignores
//! whatever the observer does. The CLI installs a console reporter; the
//! default is a no-op.

/// Callbacks fired by the conversation loop, in causal order.
pub trait QueryObserver: Send + Sync {
    /// A query is starting with the given prompt.
    fn query_started(&self, _prompt: &str) {}

    /// An inference round is starting (1-based).
    fn round_started(&self, _round: u32) {}

    /// A tool is about to be invoked with the given input.
    fn tool_invoked(&self, _tool: &str, _input: &serde_json::Value) {}

    /// A tool invocation returned the given raw text.
    fn tool_completed(&self, _tool: &str, _output: &str) {}

    /// The query finished after `rounds` inference rounds and `tool_calls`
    /// invocations.
    fn query_completed(&self, _rounds: u32, _tool_calls: usize) {}
}

/// The default observer: does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl QueryObserver for NoopObserver {}
