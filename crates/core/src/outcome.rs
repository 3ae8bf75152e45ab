//! Query outcome types.

use serde::{Deserialize, Serialize};

/// One tool invocation performed during a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    /// Tool name as requested by the model
    pub tool: String,

    /// Input payload passed to the tool
    pub input: serde_json::Value,

    /// Raw reply text, unmodified
    pub raw_result: String,
}

/// The structured result of one full conversation-loop execution.
///
/// `raw_results[i]` always equals `tool_calls[i].raw_result`; both follow
/// invocation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryOutcome {
    /// Final response text, all segments concatenated in order
    pub response: String,

    /// Every tool invocation, in execution order
    pub tool_calls: Vec<ToolInvocation>,

    /// Raw reply per invocation, index-aligned with `tool_calls`
    pub raw_results: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_serialization_roundtrip() {
        let outcome = QueryOutcome {
            response: "There are 42 documents.".into(),
            tool_calls: vec![ToolInvocation {
                tool: "count".into(),
                input: serde_json::json!({"database": "mflix", "collection": "movies"}),
                raw_result: "42".into(),
            }],
            raw_results: vec!["42".into()],
        };
        let json = serde_json::to_string(&outcome).unwrap();
        let parsed: QueryOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, outcome);
        assert_eq!(parsed.raw_results[0], parsed.tool_calls[0].raw_result);
    }
}
