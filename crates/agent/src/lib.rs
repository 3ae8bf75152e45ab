//! The core query loop — the heart of askmongo.
//!
//! A natural-language question goes through an ask, act, observe cycle:
//!
//! 1. **Send** the question to the model, along with the tool catalog
//!    the MCP session advertises
//! 2. **If tool use is requested**: invoke each tool through the session,
//!    fold the results back into the conversation, loop back to step 1
//! 3. **If text only**: the answer is final; return it together with the
//!    collected tool telemetry
//!
//! The loop ends when the model stops requesting tools, or when the round
//! limit or the optional wall-clock deadline is hit.

pub mod direct;
pub mod query_loop;

pub use direct::{DEFAULT_FIND_LIMIT, DirectOps};
pub use query_loop::{DEFAULT_SYSTEM_PROMPT, QueryLoop};
