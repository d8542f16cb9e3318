//! HTTP query gateway client.
//!
//! Implements the platform traits over a JSON gateway:
//! `POST {endpoint}/v0/query` with `{"query", "ref", "namespace"}` returns
//! `{"schema": [{"name", "type"}], "columns": [[...], ...]}`.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::{ColumnarResult, Field, PlatformClient, PlatformConnector, Profile, Value};
use crate::config::PlatformConfig;
use crate::error::{BauplanError, Result};

/// Path of the query endpoint, relative to the configured base URL.
const QUERY_PATH: &str = "v0/query";

/// Opens [`HttpClient`] handles against the configured gateway.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpConnector;

#[async_trait]
impl PlatformConnector for HttpConnector {
    async fn connect(&self, config: &PlatformConfig) -> Result<Box<dyn PlatformClient>> {
        let client = HttpClient::new(config)?;
        Ok(Box::new(client))
    }
}

/// Gateway client bound to one branch and namespace.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    query_url: Url,
    profile: Profile,
    timeout: Duration,
}

impl HttpClient {
    /// Builds a client from the resolved configuration.
    ///
    /// No request is made here; credentials are checked by the gateway on the
    /// first query.
    pub fn new(config: &PlatformConfig) -> Result<Self> {
        let endpoint = config.endpoint.as_ref().ok_or_else(|| {
            BauplanError::connection(
                "No query gateway endpoint configured. Set BAUPLAN_ENDPOINT or endpoint in [bauplan]",
            )
        })?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| BauplanError::connection("API key is not a valid HTTP header value"))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| BauplanError::connection(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            query_url: query_url(endpoint)?,
            profile: Profile {
                branch: config.branch.clone(),
                namespace: config.namespace.clone(),
            },
            timeout: config.timeout,
        })
    }
}

#[async_trait]
impl PlatformClient for HttpClient {
    fn profile(&self) -> &Profile {
        &self.profile
    }

    async fn query(&self, sql: &str, reference: &str) -> Result<ColumnarResult> {
        debug!("POST {} ref={}", self.query_url, reference);

        let request = QueryRequest {
            query: sql,
            reference,
            namespace: &self.profile.namespace,
        };

        let response = self
            .client
            .post(self.query_url.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_request_error(e))?;

        if !status.is_success() {
            return Err(parse_error(status, &body));
        }

        decode_response(&body)
    }
}

impl HttpClient {
    fn map_request_error(&self, error: reqwest::Error) -> BauplanError {
        if error.is_timeout() {
            BauplanError::query(format!(
                "Query timed out after {} seconds",
                self.timeout.as_secs()
            ))
        } else {
            BauplanError::query(format!("Request to query gateway failed: {}", error))
        }
    }
}

/// Request body for the query endpoint.
#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
    #[serde(rename = "ref")]
    reference: &'a str,
    namespace: &'a str,
}

/// Successful response from the query endpoint.
#[derive(Debug, Deserialize)]
struct QueryResponse {
    schema: Vec<Field>,
    columns: Vec<Vec<Value>>,
}

/// Error response from the gateway.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Joins the query path onto the endpoint, keeping any base path.
fn query_url(endpoint: &Url) -> Result<Url> {
    let mut base = endpoint.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(QUERY_PATH)
        .map_err(|e| BauplanError::connection(format!("Invalid endpoint '{}': {}", endpoint, e)))
}

/// Decodes a successful response body into a columnar result.
fn decode_response(body: &str) -> Result<ColumnarResult> {
    let response: QueryResponse = serde_json::from_str(body)
        .map_err(|e| BauplanError::internal(format!("Malformed gateway response: {}", e)))?;
    ColumnarResult::from_parts(response.schema, response.columns)
}

/// Turns a non-success response into an error.
fn parse_error(status: StatusCode, body: &str) -> BauplanError {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return BauplanError::query("Authentication failed. Check your BAUPLAN_API_KEY.");
    }

    if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(body) {
        return BauplanError::query(error_response.error);
    }

    BauplanError::query(format!("Gateway error ({}): {}", status, body.trim()))
}
