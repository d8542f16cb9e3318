//! List tables tool implementation.

use rmcp::model::CallToolResult;
use rmcp::schemars;

use super::{to_call_result, validate_identifier};
use crate::query::{QueryExecutor, ResponseEnvelope};

/// Parameters for the list_tables tool.
#[derive(Debug, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct ListTablesParams {
    /// Namespace to list (e.g., "bauplan"). Defaults to the configured namespace.
    #[serde(default)]
    pub namespace: Option<String>,
}

/// SQL enumerating the tables of a namespace.
pub fn list_tables_sql(namespace: &str) -> String {
    format!(
        "SELECT table_name FROM information_schema.tables \
         WHERE table_schema = '{}' ORDER BY table_name",
        namespace
    )
}

/// Runs the tool and returns the raw envelope.
pub async fn run(executor: &QueryExecutor, params: &ListTablesParams) -> ResponseEnvelope {
    let namespace = params
        .namespace
        .as_deref()
        .map(str::trim)
        .unwrap_or(&executor.config().namespace);

    if let Err(e) = validate_identifier("namespace", namespace) {
        return executor.reject(e);
    }

    executor.execute(&list_tables_sql(namespace)).await
}

/// Execute the list_tables tool.
pub async fn execute(executor: &QueryExecutor, params: &ListTablesParams) -> CallToolResult {
    to_call_result(&run(executor, params).await)
}
