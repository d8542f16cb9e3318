//! Command-line argument parsing for mcp-bauplan.

use crate::config::ConnectionConfig;
use clap::Parser;
use std::path::PathBuf;

/// MCP server exposing Bauplan tables, schemas and SQL queries as tools.
#[derive(Parser, Debug)]
#[command(name = "mcp-bauplan")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Branch to run queries against
    #[arg(short = 'b', long, value_name = "BRANCH")]
    pub branch: Option<String>,

    /// Namespace to look tables up in
    #[arg(short = 'n', long, value_name = "NAMESPACE")]
    pub namespace: Option<String>,

    /// Client timeout in seconds
    #[arg(short = 't', long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Query gateway base URL
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Serve canned results from an in-memory platform (no API key needed)
    #[arg(long)]
    pub mock: bool,

    /// Write logs to the state directory instead of stderr
    #[arg(long)]
    pub log_file: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Converts CLI arguments to a ConnectionConfig.
    ///
    /// Unset flags stay `None` so they do not mask file or environment values.
    /// The API key is never taken from the command line.
    pub fn to_connection_config(&self) -> ConnectionConfig {
        ConnectionConfig {
            api_key: None,
            branch: self.branch.clone(),
            namespace: self.namespace.clone(),
            timeout: self.timeout,
            endpoint: self.endpoint.clone(),
        }
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::config::Config::default_path)
    }
}
