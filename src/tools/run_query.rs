//! Run query tool implementation.

use rmcp::model::CallToolResult;
use rmcp::schemars;

use super::to_call_result;
use crate::query::{QueryExecutor, ResponseEnvelope};
use crate::safety::ensure_read_only;

/// Parameters for the run_query tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct RunQueryParams {
    /// SQL SELECT statement to run. Examples:
    /// - "SELECT * FROM titanic LIMIT 10"
    /// - "SELECT Sex, AVG(Age) FROM titanic GROUP BY Sex"
    pub query: String,
}

/// Runs the tool and returns the raw envelope.
///
/// With `read_only` set, anything but a read-only statement is refused
/// without contacting the platform.
pub async fn run(
    executor: &QueryExecutor,
    params: &RunQueryParams,
    read_only: bool,
) -> ResponseEnvelope {
    if read_only {
        if let Err(e) = ensure_read_only(&params.query) {
            return executor.reject(e);
        }
    }

    executor.execute(&params.query).await
}

/// Execute the run_query tool.
pub async fn execute(
    executor: &QueryExecutor,
    params: &RunQueryParams,
    read_only: bool,
) -> CallToolResult {
    to_call_result(&run(executor, params, read_only).await)
}
