//! Load — config loading from file and environment variables.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::WatchError;

use super::model::WatchConfig;

impl WatchConfig {
    /// Load configuration from file or environment variables.
    /// Priority: Environment Variables > Config File > Defaults
    pub fn load() -> Result<Self, WatchError> {
        let config_path = std::env::var("FLEETWATCH_CONFIG_FILE")
            .unwrap_or_else(|_| "/etc/fleetwatch/config.toml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            tracing::info!("Loading configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            tracing::info!(
                "Config file not found at {}, using environment variables",
                config_path
            );
            Self::from_env()
        };

        // Environment variables override file config for critical settings
        if let Ok(user) = std::env::var("FLEETWATCH_DIRECTOR_USER") {
            config.director_user = Some(user);
        }
        if let Ok(password) = std::env::var("FLEETWATCH_DIRECTOR_PASSWORD") {
            config.director_password = Some(password);
        }
        if let Ok(user) = std::env::var("FLEETWATCH_GATEWAY_USER") {
            config.gateway_user = user;
        }

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self, WatchError> {
        let mut file = File::open(path)
            .map_err(|err| WatchError::Config(format!("cannot open {path}: {err}")))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|err| WatchError::Config(format!("cannot read {path}: {err}")))?;

        toml::from_str(&contents)
            .map_err(|err| WatchError::Config(format!("cannot parse {path}: {err}")))
    }

    /// Load configuration from environment variables with sensible defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            director_port: std::env::var("FLEETWATCH_DIRECTOR_PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(defaults.director_port),
            director_user: std::env::var("FLEETWATCH_DIRECTOR_USER").ok(),
            director_password: std::env::var("FLEETWATCH_DIRECTOR_PASSWORD").ok(),
            accept_invalid_certs: std::env::var("FLEETWATCH_ACCEPT_INVALID_CERTS")
                .ok()
                .and_then(|flag| flag.parse().ok())
                .unwrap_or(defaults.accept_invalid_certs),
            gateway_user: std::env::var("FLEETWATCH_GATEWAY_USER")
                .unwrap_or(defaults.gateway_user),
            remote_user: std::env::var("FLEETWATCH_REMOTE_USER")
                .unwrap_or(defaults.remote_user),
            log_glob: std::env::var("FLEETWATCH_LOG_GLOB").unwrap_or(defaults.log_glob),
            connect_timeout_secs: std::env::var("FLEETWATCH_CONNECT_TIMEOUT")
                .ok()
                .and_then(|secs| secs.parse().ok())
                .unwrap_or(defaults.connect_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn from_file_reads_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
director_port = 8443
gateway_user = "admin"
accept_invalid_certs = true
"#
        )
        .unwrap();

        let config = WatchConfig::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.director_port, 8443);
        assert_eq!(config.gateway_user, "admin");
        assert!(config.accept_invalid_certs);
        // untouched fields fall back to defaults
        assert_eq!(config.remote_user, "vcap");
    }

    #[test]
    fn from_file_rejects_missing_file() {
        let err = WatchConfig::from_file("/nonexistent/fleetwatch.toml").unwrap_err();
        assert!(matches!(err, WatchError::Config(_)));
    }

    #[test]
    fn from_file_rejects_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "director_port = ").unwrap();

        let err = WatchConfig::from_file(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, WatchError::Config(_)));
    }
}
