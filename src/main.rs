//! mcp-bauplan - MCP server for querying the Bauplan data platform.

use std::sync::Arc;

use mcp_bauplan::cli::Cli;
use mcp_bauplan::config::Config;
use mcp_bauplan::error::{BauplanError, Result};
use mcp_bauplan::logging;
use mcp_bauplan::platform::{HttpConnector, MockConnector, PlatformConnector};
use mcp_bauplan::query::QueryExecutor;
use mcp_bauplan::server::BauplanMcpServer;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() {
    // A missing .env is fine; the environment may already be set.
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse_args();
    if cli.log_file {
        logging::init_file_logging();
    } else {
        logging::init_stderr_logging();
    }

    if let Ok(path) = dotenv {
        debug!("Loaded environment from {}", path.display());
    }

    if let Err(e) = run(cli).await {
        error!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    // Precedence: CLI flags > config file > environment > defaults
    let mut connection = config.bauplan.clone();
    connection.apply_env_defaults();
    connection.merge(&cli.to_connection_config());

    let platform_config = connection.resolve(!cli.mock)?;
    info!("Bauplan target: {}", connection.display_string());

    let connector: Arc<dyn PlatformConnector> = if cli.mock {
        info!("Using in-memory mock platform");
        Arc::new(MockConnector::new())
    } else {
        Arc::new(HttpConnector)
    };

    let executor = QueryExecutor::new(connector, Arc::new(platform_config));
    BauplanMcpServer::new(executor, &config.server)
        .serve_stdio()
        .await
        .map_err(|e| BauplanError::internal(e.to_string()))
}
