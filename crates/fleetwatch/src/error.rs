//! Error — failure taxonomy for the watch pipeline.

use thiserror::Error;

/// Deployment-directory failures.
#[derive(Debug, Error)]
pub enum DirectorError {
    #[error("director request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("director returned status {status} for {path}")]
    UnexpectedStatus { status: u16, path: String },

    #[error("no deployments found on this director")]
    NoDeployments,
}

/// Stream-transport failures. Terminal for the session; retry policy,
/// if any, belongs to the transport itself.
#[derive(Debug, Error)]
pub enum TunnelError {
    #[error("failed to open log tail for {location}: {source}")]
    Open {
        location: String,
        source: std::io::Error,
    },

    #[error("log tail for {0} exposed no output pipes")]
    Pipe(String),

    #[error("stream transport failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level session failures.
#[derive(Debug, Error)]
pub enum WatchError {
    /// The resolved location map was empty. The exact wording is part of
    /// the CLI contract.
    #[error("No locations found.")]
    NoLocations,

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Director(#[from] DirectorError),

    #[error(transparent)]
    Tunnel(#[from] TunnelError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_locations_message_is_verbatim() {
        assert_eq!(WatchError::NoLocations.to_string(), "No locations found.");
    }

    #[test]
    fn director_errors_surface_through_watch_error() {
        let err = WatchError::from(DirectorError::NoDeployments);
        assert_eq!(err.to_string(), "no deployments found on this director");
    }
}
