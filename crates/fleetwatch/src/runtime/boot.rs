//! Boot — logging init, config load, adapter construction.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;
use crate::conf::WatchConfig;
use crate::director::HttpDirectory;
use crate::error::WatchError;
use crate::tunnel::SshTunnel;
use crate::watch::WatchLogsSession;

/// Initialise the tracing / logging subsystem.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fleetwatch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load config and construct the session with its live adapters.
///
/// Returns `(WatchLogsSession, WatchConfig)` on success.
pub fn boot(cli: &Cli) -> Result<(WatchLogsSession, WatchConfig), WatchError> {
    let config = WatchConfig::load()?;
    config.validate().map_err(WatchError::Config)?;
    info!(director = %cli.director, "configuration loaded");

    let director = HttpDirectory::new(&cli.director, &config)?;
    let tunnel = SshTunnel::new(&config);
    let session = WatchLogsSession::new(Arc::new(director), Arc::new(tunnel));

    Ok((session, config))
}
