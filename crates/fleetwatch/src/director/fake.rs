//! Fake — test double for the deployment directory.
//!
//! Provides a deterministic [`FakeDirectory`] that implements
//! [`DirectoryOps`] from in-memory state, so session behavior can be
//! tested without a live director.

use std::collections::HashMap;
use std::pin::Pin;

use tokio::sync::Mutex;

use crate::director::model::{Deployment, InstanceRecord};
use crate::director::ops::DirectoryOps;
use crate::error::DirectorError;

#[derive(Default)]
struct Inner {
    deployments: Vec<Deployment>,
    instances: HashMap<String, Vec<InstanceRecord>>,
}

/// In-memory directory. Builder methods seed deployments and inventories
/// before the code under test runs.
pub struct FakeDirectory {
    inner: Mutex<Inner>,
}

impl FakeDirectory {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Seed a deployment into the listing.
    pub async fn add_deployment(&self, deployment: Deployment) {
        self.inner.lock().await.deployments.push(deployment);
    }

    /// Seed the instance inventory for a deployment.
    pub async fn set_instances(&self, deployment: &str, instances: Vec<InstanceRecord>) {
        self.inner
            .lock()
            .await
            .instances
            .insert(deployment.to_string(), instances);
    }
}

impl Default for FakeDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryOps for FakeDirectory {
    fn list_deployments(
        &self,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<Deployment>, DirectorError>> + Send + '_>>
    {
        Box::pin(async { Ok(self.inner.lock().await.deployments.clone()) })
    }

    fn fetch_instance_state<'a>(
        &'a self,
        deployment: &'a str,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<InstanceRecord>, DirectorError>> + Send + 'a>>
    {
        Box::pin(async move {
            let state = self.inner.lock().await;
            Ok(state.instances.get(deployment).cloned().unwrap_or_default())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::director::model::ReleaseRef;

    #[tokio::test]
    async fn lists_seeded_deployments() {
        let fake = FakeDirectory::new();
        fake.add_deployment(Deployment {
            name: "some-deployment".into(),
            releases: vec![ReleaseRef { name: "cf-release".into() }],
        })
        .await;

        let deployments = fake.list_deployments().await.unwrap();
        assert_eq!(deployments.len(), 1);
        assert_eq!(deployments[0].name, "some-deployment");
    }

    #[tokio::test]
    async fn unknown_deployment_has_empty_inventory() {
        let fake = FakeDirectory::new();
        let instances = fake.fetch_instance_state("nope").await.unwrap();
        assert!(instances.is_empty());
    }
}
