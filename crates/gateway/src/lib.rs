//! Inference gateway implementations for askmongo.
//!
//! All gateways implement the `askmongo_core::InferenceGateway` trait.
//! Currently Anthropic's native Messages API is the only backend.

pub mod anthropic;

pub use anthropic::AnthropicGateway;
