//! Data platform abstraction for mcp-bauplan.
//!
//! Provides a trait-based interface over the external data platform, allowing
//! the HTTP gateway client and the in-memory mock to be used interchangeably.

pub mod http;
mod mock;
mod types;

pub use http::HttpConnector;
pub use mock::{FailingConnector, MockConnector};
pub use types::{ColumnarResult, Field, Profile, Value};

use crate::config::PlatformConfig;
use crate::error::Result;
use async_trait::async_trait;

/// Opens client handles against the data platform.
///
/// Implementations hold no per-call state; every call to [`connect`] yields a
/// fresh handle owned by the caller.
///
/// [`connect`]: PlatformConnector::connect
#[async_trait]
pub trait PlatformConnector: Send + Sync {
    /// Creates a client bound to the configured branch and namespace.
    async fn connect(&self, config: &PlatformConfig) -> Result<Box<dyn PlatformClient>>;
}

/// A live handle to the data platform.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// The branch and namespace this handle resolved to.
    fn profile(&self) -> &Profile;

    /// Executes a SQL query against the given branch reference.
    async fn query(&self, sql: &str, reference: &str) -> Result<ColumnarResult>;
}
