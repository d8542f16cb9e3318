//! Query execution and response shaping for mcp-bauplan.
//!
//! This module turns platform results into the JSON envelope handed back to
//! MCP clients.

pub mod convert;
pub mod envelope;
pub mod executor;

pub use convert::{build_metadata, to_rows};
pub use envelope::{QueryMetadata, ResponseEnvelope, Row, Status};
pub use executor::QueryExecutor;
