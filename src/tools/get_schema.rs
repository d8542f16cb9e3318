//! Get schema tool implementation.

use rmcp::model::CallToolResult;
use rmcp::schemars;

use super::{to_call_result, validate_identifier};
use crate::error::Result;
use crate::query::{QueryExecutor, ResponseEnvelope};

/// Parameters for the get_schema tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetSchemaParams {
    /// Table name (e.g., "titanic"), optionally qualified as "namespace.table".
    pub table: String,
}

/// SQL returning the column names and types of a table, in column order.
pub fn get_schema_sql(namespace: &str, table: &str) -> String {
    format!(
        "SELECT column_name, data_type FROM information_schema.columns \
         WHERE table_schema = '{}' AND table_name = '{}' ORDER BY ordinal_position",
        namespace, table
    )
}

/// Splits an optionally qualified table name into `(namespace, table)`.
///
/// Both parts are validated as identifiers.
pub fn resolve_table<'a>(
    default_namespace: &'a str,
    table: &'a str,
) -> Result<(&'a str, &'a str)> {
    let (namespace, table) = match table.split_once('.') {
        Some((namespace, table)) => (namespace, table),
        None => (default_namespace, table),
    };

    validate_identifier("namespace", namespace)?;
    validate_identifier("table", table)?;
    Ok((namespace, table))
}

/// Runs the tool and returns the raw envelope.
pub async fn run(executor: &QueryExecutor, params: &GetSchemaParams) -> ResponseEnvelope {
    let sql = match resolve_table(&executor.config().namespace, params.table.trim()) {
        Ok((namespace, table)) => get_schema_sql(namespace, table),
        Err(e) => return executor.reject(e),
    };

    executor.execute(&sql).await
}

/// Execute the get_schema tool.
pub async fn execute(executor: &QueryExecutor, params: &GetSchemaParams) -> CallToolResult {
    to_call_result(&run(executor, params).await)
}
