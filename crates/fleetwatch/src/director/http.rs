//! Http — implements `DirectoryOps` against the director's REST surface.

use std::pin::Pin;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::conf::WatchConfig;
use crate::director::model::{Deployment, InstanceRecord};
use crate::director::ops::DirectoryOps;
use crate::error::DirectorError;

/// Live reqwest-backed directory client.
///
/// Directors commonly run with self-signed certificates;
/// `accept_invalid_certs` opts into accepting them.
pub struct HttpDirectory {
    base_url: String,
    client: reqwest::Client,
    user: Option<String>,
    password: Option<String>,
}

impl HttpDirectory {
    pub fn new(endpoint: &str, config: &WatchConfig) -> Result<Self, DirectorError> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;

        Ok(Self {
            base_url: base_url(endpoint, config.director_port),
            client,
            user: config.director_user.clone(),
            password: config.director_password.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, DirectorError> {
        let mut request = self.client.get(format!("{}{}", self.base_url, path));
        if let Some(user) = &self.user {
            request = request.basic_auth(user, self.password.as_deref());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DirectorError::UnexpectedStatus {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        Ok(response.json().await?)
    }
}

/// `host` or `host:port` → `https://host:port`, applying the configured
/// default port when the endpoint carries none.
fn base_url(endpoint: &str, default_port: u16) -> String {
    if endpoint.contains(':') {
        format!("https://{endpoint}")
    } else {
        format!("https://{endpoint}:{default_port}")
    }
}

impl DirectoryOps for HttpDirectory {
    fn list_deployments(
        &self,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<Deployment>, DirectorError>> + Send + '_>>
    {
        Box::pin(async move { self.get_json("/deployments").await })
    }

    fn fetch_instance_state<'a>(
        &'a self,
        deployment: &'a str,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<InstanceRecord>, DirectorError>> + Send + 'a>>
    {
        Box::pin(async move {
            self.get_json(&format!("/deployments/{deployment}/vms")).await
        })
    }
}
