//! Director module — deployment-directory capability: trait, wire models,
//! live HTTP adapter, and test double.

pub mod fake;
pub mod http;
pub mod model;
pub mod ops;

pub use http::HttpDirectory;
pub use model::{Deployment, InstanceRecord, ReleaseRef};
pub use ops::DirectoryOps;
