//! Tunnel module — secure stream-transport capability: trait, gateway
//! identity, live ssh adapter, and test double.

pub mod fake;
pub mod gateway;
pub mod ops;
pub mod ssh;

pub use gateway::GatewayIdentity;
pub use ops::{LogStream, TunnelOps};
pub use ssh::SshTunnel;
