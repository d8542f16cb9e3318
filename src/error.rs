//! Error types for mcp-bauplan.
//!
//! Defines the main error enum used throughout the server.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for mcp-bauplan operations.
#[derive(Error, Debug)]
pub enum BauplanError {
    /// Platform connection errors (bad credentials, unreachable gateway, etc.)
    #[error("Unable to connect to Bauplan: {0}")]
    Connection(String),

    /// Query execution errors (syntax errors, unknown tables, gateway failures, etc.)
    #[error("Query error: {0}")]
    Query(String),

    /// Queries refused before reaching the platform (non read-only SQL, bad identifiers).
    #[error("Query rejected: {0}")]
    Rejected(String),

    /// Configuration errors (invalid config file, missing API key, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal errors (malformed platform payloads, serialization failures, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BauplanError {
    /// Creates a connection error with the given message.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a rejection error with the given message.
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the bare message without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Connection(msg)
            | Self::Query(msg)
            | Self::Rejected(msg)
            | Self::Config(msg)
            | Self::Internal(msg) => msg,
        }
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Connection(_) => "Connection Error",
            Self::Query(_) => "Query Error",
            Self::Rejected(_) => "Rejected Query",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }

    /// Returns the machine-readable kind reported in error envelopes.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Connection(_) => ErrorKind::Connection,
            Self::Query(_) => ErrorKind::Query,
            Self::Rejected(_) => ErrorKind::Rejected,
            Self::Config(_) => ErrorKind::Config,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// Machine-readable error classification carried in the response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Connection,
    Query,
    Rejected,
    Config,
    Internal,
}

/// Result type alias using BauplanError.
pub type Result<T> = std::result::Result<T, BauplanError>;
