//! Connection handling for mcp-bauplan.
//!
//! Every tool call opens its own client handle through the factory and drops
//! it when the call ends; nothing is pooled.

pub mod factory;

pub use factory::create_client;
