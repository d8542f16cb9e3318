//! mcp-bauplan - MCP server for querying the Bauplan data platform.
//!
//! This library exposes the core modules for use by the binary and
//! integration tests.

pub mod cli;
pub mod config;
pub mod connection;
pub mod error;
pub mod logging;
pub mod platform;
pub mod query;
pub mod safety;
pub mod server;
pub mod tools;

pub use error::{BauplanError, Result};
pub use query::{QueryExecutor, ResponseEnvelope};
pub use server::BauplanMcpServer;
