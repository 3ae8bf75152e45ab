//! # askmongo core
//!
//! Domain types, traits, and error definitions for askmongo, the
//! natural-language MongoDB query tool. This crate has **zero framework
//! dependencies** — it defines the domain model that all other crates
//! implement against.
//!
//! ## Design Philosophy
//!
//! The two external collaborators are defined as traits here: the inference
//! service ([`InferenceGateway`]) and the tool-execution session
//! ([`ToolSession`]). Implementations live in their respective crates. This
//! enables:
//! - Testing the conversation loop with scripted/stub collaborators
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod gateway;
pub mod message;
pub mod observer;
pub mod outcome;
pub mod session;

// Re-export key types at crate root for ergonomics
pub use error::{Error, GatewayError, ProtocolViolation, Result, SessionError};
pub use gateway::{ChatRequest, ChatResponse, InferenceGateway, StopReason};
pub use message::{ContentBlock, Conversation, Message, MessageContent, Role};
pub use observer::{NoopObserver, QueryObserver};
pub use outcome::{QueryOutcome, ToolInvocation};
pub use session::{ToolDescriptor, ToolReply, ToolSession};
