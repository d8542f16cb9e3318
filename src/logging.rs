//! Logging configuration for mcp-bauplan.
//!
//! The stdio transport frames JSON-RPC messages on stdout, and a client
//! treats any other byte there as a protocol error. Subscribers are therefore
//! only ever built with an explicit stderr or file writer, and without ANSI
//! escapes, which MCP clients that capture stderr would show verbatim.

use std::fs::{self, File};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initializes logging to a file.
///
/// Location: `~/.local/state/mcp-bauplan/mcp-bauplan.log` on Linux (XDG state
/// directory), or the platform-appropriate state/config directory elsewhere.
/// Falls back to stderr when the file cannot be created.
pub fn init_file_logging() {
    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("Warning: Could not create log directory: {e}");
            init_stderr_logging();
            return;
        }
    }

    // Truncate on each run to avoid unbounded growth
    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file: {e}");
            init_stderr_logging();
            return;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(log_file)
        .with_ansi(false)
        .init();
}

/// Initializes logging to stderr.
///
/// `tracing_subscriber::fmt()` defaults to stdout, so the writer is set
/// explicitly.
pub fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

/// Returns the path for the log file.
pub fn get_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        return state_dir.join("mcp-bauplan").join("mcp-bauplan.log");
    }

    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("mcp-bauplan").join("mcp-bauplan.log");
    }

    std::env::temp_dir().join("mcp-bauplan.log")
}
