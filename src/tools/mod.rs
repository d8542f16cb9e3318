//! MCP tool implementations for mcp-bauplan.
//!
//! Each tool module defines its parameters and an `execute` function that
//! runs through the [`QueryExecutor`](crate::query::QueryExecutor) and turns
//! the resulting envelope into a tool result.

pub mod get_schema;
pub mod list_tables;
pub mod run_query;

pub use get_schema::GetSchemaParams;
pub use list_tables::ListTablesParams;
pub use run_query::RunQueryParams;

use std::sync::OnceLock;

use regex::Regex;
use rmcp::model::{CallToolResult, Content};

use crate::error::{BauplanError, Result};
use crate::query::ResponseEnvelope;

/// Wraps an envelope as a tool result.
///
/// The envelope is the single text item; error envelopes set `is_error`.
pub fn to_call_result(envelope: &ResponseEnvelope) -> CallToolResult {
    match envelope.to_json_pretty() {
        Ok(text) if envelope.is_success() => CallToolResult::success(vec![Content::text(text)]),
        Ok(text) => CallToolResult::error(vec![Content::text(text)]),
        Err(e) => CallToolResult::error(vec![Content::text(e.to_string())]),
    }
}

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid")
    })
}

/// Checks that a caller-supplied name is a plain SQL identifier.
///
/// Names end up inside string literals in generated SQL, so anything beyond
/// letters, digits and underscores is refused.
pub fn validate_identifier(kind: &str, name: &str) -> Result<()> {
    if identifier_pattern().is_match(name) {
        Ok(())
    } else {
        Err(BauplanError::rejected(format!(
            "invalid {} name '{}': use letters, digits and underscores only",
            kind, name
        )))
    }
}
