//! Client handle factory.

use tracing::{error, info};

use crate::config::PlatformConfig;
use crate::error::{BauplanError, Result};
use crate::platform::{PlatformClient, PlatformConnector};

/// Opens a client handle bound to the configured branch and namespace.
///
/// Any failure while connecting is logged with full detail and returned as
/// [`BauplanError::Connection`] carrying the underlying message.
pub async fn create_client(
    connector: &dyn PlatformConnector,
    config: &PlatformConfig,
) -> Result<Box<dyn PlatformClient>> {
    info!(
        "Creating Bauplan client connection. branch={}, namespace={}, timeout={}s",
        config.branch,
        config.namespace,
        config.timeout.as_secs()
    );

    match connector.connect(config).await {
        Ok(client) => {
            let profile = client.profile();
            info!(
                "Connected to Bauplan. branch={} - namespace={}",
                profile.branch, profile.namespace
            );
            Ok(client)
        }
        Err(err) => {
            error!(error = ?err, "Failed to connect to Bauplan: {}", err.message());
            Err(BauplanError::connection(err.message()))
        }
    }
}
