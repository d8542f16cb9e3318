//! Mock platform collaborators for testing.
//!
//! Provides an in-memory platform for headless runs (`--mock`) and tests, plus
//! a connector that always fails to connect.

use super::{ColumnarResult, PlatformClient, PlatformConnector, Profile};
use crate::config::{PlatformConfig, DEFAULT_BRANCH, DEFAULT_NAMESPACE};
use crate::error::{BauplanError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A mock connector whose clients return predefined results.
///
/// Results are keyed by the trimmed SQL text. Unknown queries return a single
/// `result` column echoing the query back.
#[derive(Clone, Default)]
pub struct MockConnector {
    responses: Arc<HashMap<String, ColumnarResult>>,
    profile: Option<Profile>,
    query_error: Option<String>,
    connects: Arc<AtomicUsize>,
    queries: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockConnector {
    /// Creates a mock connector with no canned results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the result returned for the given SQL.
    pub fn with_result(mut self, sql: &str, result: ColumnarResult) -> Self {
        Arc::make_mut(&mut self.responses).insert(sql.trim().to_string(), result);
        self
    }

    /// Makes clients report this profile instead of the configured one.
    pub fn with_profile(mut self, branch: &str, namespace: &str) -> Self {
        self.profile = Some(Profile {
            branch: branch.to_string(),
            namespace: namespace.to_string(),
        });
        self
    }

    /// Makes every query fail with the given message.
    pub fn failing_queries(mut self, message: impl Into<String>) -> Self {
        self.query_error = Some(message.into());
        self
    }

    /// Number of client handles opened so far.
    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    /// `(sql, reference)` pairs received by clients, in call order.
    pub fn queries(&self) -> Vec<(String, String)> {
        self.queries
            .lock()
            .map(|q| q.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PlatformConnector for MockConnector {
    async fn connect(&self, config: &PlatformConfig) -> Result<Box<dyn PlatformClient>> {
        self.connects.fetch_add(1, Ordering::SeqCst);

        let profile = self.profile.clone().unwrap_or_else(|| Profile {
            branch: or_default(&config.branch, DEFAULT_BRANCH),
            namespace: or_default(&config.namespace, DEFAULT_NAMESPACE),
        });

        Ok(Box::new(MockClient {
            profile,
            responses: Arc::clone(&self.responses),
            query_error: self.query_error.clone(),
            queries: Arc::clone(&self.queries),
        }))
    }
}

fn or_default(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

/// Client handle produced by [`MockConnector`].
struct MockClient {
    profile: Profile,
    responses: Arc<HashMap<String, ColumnarResult>>,
    query_error: Option<String>,
    queries: Arc<Mutex<Vec<(String, String)>>>,
}

#[async_trait]
impl PlatformClient for MockClient {
    fn profile(&self) -> &Profile {
        &self.profile
    }

    async fn query(&self, sql: &str, reference: &str) -> Result<ColumnarResult> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push((sql.to_string(), reference.to_string()));
        }

        if let Some(message) = &self.query_error {
            return Err(BauplanError::query(message.clone()));
        }

        match self.responses.get(sql.trim()) {
            Some(result) => Ok(result.clone()),
            None => Ok(ColumnarResult::new().with_column(
                "result",
                "string",
                [format!("Mock result for: {}", sql)],
            )),
        }
    }
}

/// A connector that never manages to connect.
#[derive(Debug, Clone)]
pub struct FailingConnector {
    message: String,
}

impl FailingConnector {
    /// Creates a connector failing with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl PlatformConnector for FailingConnector {
    async fn connect(&self, _config: &PlatformConfig) -> Result<Box<dyn PlatformClient>> {
        Err(BauplanError::internal(self.message.clone()))
    }
}
