//! Integration tests for mcp-bauplan.

pub mod executor_test;
pub mod helpers;
pub mod tools_test;
