//! The multi-round query loop implementation.

use std::sync::Arc;
use std::time::Instant;

use askmongo_core::gateway::{ChatRequest, ChatResponse, InferenceGateway, StopReason};
use askmongo_core::message::{ContentBlock, Conversation, Message};
use askmongo_core::observer::{NoopObserver, QueryObserver};
use askmongo_core::outcome::{QueryOutcome, ToolInvocation};
use askmongo_core::session::ToolSession;
use askmongo_core::{Error, ProtocolViolation, Result};
use tracing::{debug, info, warn};

/// System prompt used when the caller does not supply one.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are a MongoDB expert assistant. When users ask questions about their data:
1. Use the available MongoDB tools to query the database
2. Analyze the results and provide clear, helpful responses
3. If you need to run multiple queries, do so to get complete answers
4. Format numbers and data in a readable way
5. If an error occurs, explain what went wrong and suggest fixes";

/// The core loop that orchestrates model calls and MongoDB tool execution.
pub struct QueryLoop {
    /// The inference gateway to use
    gateway: Arc<dyn InferenceGateway>,

    /// The model to use
    model: String,

    /// Max tokens per model response
    max_tokens: u32,

    /// Maximum tool-use rounds per query
    max_rounds: u32,

    /// Optional wall-clock deadline for a whole query
    deadline: Option<std::time::Duration>,

    /// Observer notified of loop progress
    observer: Arc<dyn QueryObserver>,
}

impl QueryLoop {
    /// Create a new query loop.
    pub fn new(gateway: Arc<dyn InferenceGateway>, model: impl Into<String>) -> Self {
        Self {
            gateway,
            model: model.into(),
            max_tokens: 4096,
            max_rounds: 16,
            deadline: None,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Set the max tokens per model response.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = max;
        self
    }

    /// Set the maximum number of tool-use rounds per query.
    pub fn with_max_rounds(mut self, max: u32) -> Self {
        self.max_rounds = max;
        self
    }

    /// Set a wall-clock deadline covering the whole query.
    pub fn with_deadline(mut self, deadline: std::time::Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Attach an observer for loop progress events.
    pub fn with_observer(mut self, observer: Arc<dyn QueryObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Run a natural-language query to completion.
    ///
    /// This is the main entry point. It:
    /// 1. Seeds a fresh conversation with the user's question
    /// 2. Calls the model with the session's tool catalog
    /// 3. If tool use is requested, invokes each tool and loops
    /// 4. Returns the final text plus the collected tool telemetry
    ///
    /// The tool catalog is snapshotted once at the start; a request for a
    /// tool outside that snapshot aborts the query.
    pub async fn execute(
        &self,
        session: &dyn ToolSession,
        prompt: &str,
        system_prompt: Option<&str>,
    ) -> Result<QueryOutcome> {
        let started = Instant::now();
        let registry = session.tools().to_vec();
        let system = system_prompt.unwrap_or(DEFAULT_SYSTEM_PROMPT);

        info!(tools = registry.len(), "Processing query");
        self.observer.query_started(prompt);

        let mut conversation = Conversation::new();
        conversation.push(Message::user(prompt));

        let mut records: Vec<ToolInvocation> = Vec::new();
        let mut round = 0u32;

        loop {
            round += 1;

            if round > self.max_rounds {
                warn!(limit = self.max_rounds, "Round limit reached, aborting query");
                return Err(Error::RoundLimitExceeded {
                    limit: self.max_rounds,
                });
            }

            debug!(round, "Query loop round");
            self.observer.round_started(round);

            let request = ChatRequest {
                model: self.model.clone(),
                system: Some(system.to_string()),
                max_tokens: self.max_tokens,
                messages: conversation.messages.clone(),
                tools: registry.clone(),
            };

            let response = self
                .bounded(started, self.gateway.complete(request))
                .await?
                .map_err(Error::query)?;

            let tool_uses = collect_tool_uses(&response);

            // Termination tracks block presence, not the reported stop
            // reason. A response without tool_use blocks is final even if
            // the service labels it oddly.
            if tool_uses.is_empty() {
                if response.stop_reason == StopReason::ToolUse {
                    warn!("stop_reason says tool_use but no tool_use blocks arrived");
                }

                let text = response.text();
                let raw_results = records.iter().map(|r| r.raw_result.clone()).collect();

                info!(
                    rounds = round,
                    tool_calls = records.len(),
                    stop_reason = response.stop_reason.as_str(),
                    "Query complete"
                );
                self.observer.query_completed(round, records.len());

                return Ok(QueryOutcome {
                    response: text,
                    tool_calls: records,
                    raw_results,
                });
            }

            conversation.push(Message::assistant_blocks(response.content.clone()));

            let mut results: Vec<ContentBlock> = Vec::with_capacity(tool_uses.len());
            for tool_use in &tool_uses {
                if !registry.iter().any(|t| t.name == tool_use.name) {
                    return Err(Error::query(ProtocolViolation::UnknownTool {
                        name: tool_use.name.clone(),
                    }));
                }

                debug!(tool = %tool_use.name, "Executing tool call");
                self.observer.tool_invoked(&tool_use.name, &tool_use.input);

                let reply = self
                    .bounded(started, session.invoke(&tool_use.name, tool_use.input.clone()))
                    .await?
                    .map_err(Error::query)?;

                let raw = reply.text();
                self.observer.tool_completed(&tool_use.name, &raw);

                records.push(ToolInvocation {
                    tool: tool_use.name.clone(),
                    input: tool_use.input.clone(),
                    raw_result: raw.clone(),
                });

                results.push(ContentBlock::ToolResult {
                    tool_use_id: tool_use.id.clone(),
                    content: raw,
                });
            }

            // One tool_result per tool_use, same order, matched by id
            conversation.push(Message::tool_results(results));

            // Loop back — the model sees the results and decides what to do next
        }
    }

    /// Await a loop step under the query deadline, if one is set.
    async fn bounded<T, E>(
        &self,
        started: Instant,
        fut: impl std::future::Future<Output = std::result::Result<T, E>>,
    ) -> Result<std::result::Result<T, E>> {
        let Some(deadline) = self.deadline else {
            return Ok(fut.await);
        };

        let remaining = deadline.saturating_sub(started.elapsed());
        if remaining.is_zero() {
            return Err(Error::DeadlineExceeded { deadline });
        }

        tokio::time::timeout(remaining, fut)
            .await
            .map_err(|_| Error::DeadlineExceeded { deadline })
    }
}

/// A tool call requested by the model.
struct ToolUse {
    id: String,
    name: String,
    input: serde_json::Value,
}

/// Pull the tool_use blocks out of a response, preserving order.
fn collect_tool_uses(response: &ChatResponse) -> Vec<ToolUse> {
    response
        .content
        .iter()
        .filter_map(|block| match block {
            ContentBlock::ToolUse { id, name, input } => Some(ToolUse {
                id: id.clone(),
                name: name.clone(),
                input: input.clone(),
            }),
            _ => None,
        })
        .collect()
}
