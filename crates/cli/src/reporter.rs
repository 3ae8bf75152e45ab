//! Console progress output for the query loop.
//!
//! Prints each tool invocation and a preview of its result as the loop
//! runs, so long queries don't look hung.

use askmongo_core::QueryObserver;
use serde_json::Value;

/// Cap on printed tool output; full results still reach the model.
const RESULT_PREVIEW_CHARS: usize = 500;

pub struct ConsoleReporter;

impl QueryObserver for ConsoleReporter {
    fn query_started(&self, prompt: &str) {
        println!();
        println!("🔍 Query: {prompt}");
    }

    fn tool_invoked(&self, tool: &str, input: &Value) {
        println!();
        println!("⚡ Executing: {tool}");
        let pretty = serde_json::to_string_pretty(input).unwrap_or_else(|_| input.to_string());
        println!("{pretty}");
    }

    fn tool_completed(&self, _tool: &str, output: &str) {
        println!("{}", preview(output));
    }

    fn query_completed(&self, rounds: u32, tool_calls: usize) {
        println!();
        println!("✅ Done in {rounds} round(s), {tool_calls} tool call(s)");
        println!();
    }
}

fn preview(output: &str) -> String {
    if output.chars().count() > RESULT_PREVIEW_CHARS {
        let cut: String = output.chars().take(RESULT_PREVIEW_CHARS).collect();
        format!("{cut}...")
    } else {
        output.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_output_passes_through() {
        assert_eq!(preview("{ \"count\": 42 }"), "{ \"count\": 42 }");
    }

    #[test]
    fn long_output_truncated_with_ellipsis() {
        let long = "x".repeat(1200);
        let shown = preview(&long);
        assert_eq!(shown.len(), RESULT_PREVIEW_CHARS + 3);
        assert!(shown.ends_with("..."));
    }

    #[test]
    fn multibyte_output_truncates_on_char_boundary() {
        let long = "é".repeat(600);
        let shown = preview(&long);
        assert_eq!(shown.chars().count(), RESULT_PREVIEW_CHARS + 3);
        assert!(shown.ends_with("..."));
    }
}
