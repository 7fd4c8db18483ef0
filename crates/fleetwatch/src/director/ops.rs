//! Directory trait — abstract interface to the deployment directory.
//!
//! The session reaches the directory only through this trait.
//! `http.rs` provides the real reqwest-backed implementation.
//! `fake.rs` provides a test double.

use std::pin::Pin;

use crate::director::model::{Deployment, InstanceRecord};
use crate::error::DirectorError;

/// Async interface over the deployment directory.
///
/// Object-safe thanks to `Pin<Box<…>>` returns, so a session can hold it
/// behind `Arc<dyn DirectoryOps>`.
pub trait DirectoryOps: Send + Sync {
    fn list_deployments(
        &self,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<Deployment>, DirectorError>> + Send + '_>>;

    fn fetch_instance_state<'a>(
        &'a self,
        deployment: &'a str,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<InstanceRecord>, DirectorError>> + Send + 'a>>;
}
