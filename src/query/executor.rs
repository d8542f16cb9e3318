//! Query execution with uniform error capture.
//!
//! The executor is the single entry point every tool goes through: it opens a
//! fresh client handle, runs the query, converts the result and always hands
//! back a [`ResponseEnvelope`].

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, warn};

use super::convert::{build_metadata, to_rows};
use super::envelope::ResponseEnvelope;
use crate::config::PlatformConfig;
use crate::connection::create_client;
use crate::error::{BauplanError, Result};
use crate::platform::PlatformConnector;

/// Runs queries against the platform, one client handle per call.
#[derive(Clone)]
pub struct QueryExecutor {
    connector: Arc<dyn PlatformConnector>,
    config: Arc<PlatformConfig>,
}

impl QueryExecutor {
    /// Creates a new query executor.
    pub fn new(connector: Arc<dyn PlatformConnector>, config: Arc<PlatformConfig>) -> Self {
        Self { connector, config }
    }

    /// The configuration queries run with.
    pub fn config(&self) -> &PlatformConfig {
        &self.config
    }

    /// Executes a query and wraps the outcome in an envelope.
    ///
    /// Never fails: connection errors, query errors and conversion errors all
    /// come back as an error envelope.
    pub async fn execute(&self, sql: &str) -> ResponseEnvelope {
        let start = Instant::now();

        match self.execute_immediate(sql).await {
            Ok(envelope) => {
                info!(
                    "Query returned {} rows in {:?}",
                    envelope.row_count(),
                    start.elapsed()
                );
                envelope
            }
            Err(e) => {
                error!("Error executing query: {}", e.message());
                ResponseEnvelope::failure(&e)
            }
        }
    }

    /// Builds the error envelope for a query refused before execution.
    pub fn reject(&self, err: BauplanError) -> ResponseEnvelope {
        warn!("{}", err);
        ResponseEnvelope::failure(&err)
    }

    async fn execute_immediate(&self, sql: &str) -> Result<ResponseEnvelope> {
        let client = create_client(self.connector.as_ref(), &self.config).await?;

        debug!("Executing query: {}", sql);
        let result = client.query(sql, &self.config.branch).await?;

        let data = to_rows(&result);
        let metadata = build_metadata(&result, data.len(), sql);

        Ok(ResponseEnvelope::success(data, metadata))
    }
}
