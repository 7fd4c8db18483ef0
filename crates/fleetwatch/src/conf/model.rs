//! Model — WatchConfig.

use serde::{Deserialize, Serialize};

use crate::tunnel::gateway::{self, GatewayIdentity};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Director API port used when the endpoint carries none.
    pub director_port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director_user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director_password: Option<String>,
    /// Accept the director's self-signed certificate.
    pub accept_invalid_certs: bool,
    /// Account used for the gateway hop when no --gateway is given.
    pub gateway_user: String,
    /// Account used on the instances themselves.
    pub remote_user: String,
    /// Glob of log files tailed on each instance.
    pub log_glob: String,
    pub connect_timeout_secs: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            director_port: 25555,
            director_user: None,
            director_password: None,
            accept_invalid_certs: false,
            gateway_user: gateway::DEFAULT_GATEWAY_USER.to_string(),
            remote_user: gateway::DEFAULT_GATEWAY_USER.to_string(),
            log_glob: "/var/vcap/sys/log/*/*.log".to_string(),
            connect_timeout_secs: 10,
        }
    }
}

impl WatchConfig {
    /// Gateway identity implied by this config, when it differs from the
    /// conventional default. `None` means "let the session default".
    pub fn gateway_override(&self, director_endpoint: &str) -> Option<String> {
        if self.gateway_user == gateway::DEFAULT_GATEWAY_USER {
            None
        } else {
            Some(GatewayIdentity::for_user(&self.gateway_user, director_endpoint).to_string())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.director_port == 0 {
            return Err("director_port must be > 0".to_string());
        }
        if self.gateway_user.is_empty() {
            return Err("gateway_user must not be empty".to_string());
        }
        if self.remote_user.is_empty() {
            return Err("remote_user must not be empty".to_string());
        }
        if self.log_glob.is_empty() {
            return Err("log_glob must not be empty".to_string());
        }
        if self.connect_timeout_secs == 0 {
            return Err("connect_timeout_secs must be > 0".to_string());
        }
        Ok(())
    }
}
