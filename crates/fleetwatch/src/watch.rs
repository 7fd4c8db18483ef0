//! Watch — session orchestration and the stream coordinator.
//!
//! The session resolves the deployment's inventory into a location map,
//! fails fast when there is nothing to watch, and otherwise drives the
//! coordinator: one multiplexed stream in, one rendered line out per
//! entry.

use std::collections::HashSet;
use std::io::Write;
use std::sync::{Arc, Mutex};

use futures_util::StreamExt;
use tracing::{info, warn};

use crate::director::DirectoryOps;
use crate::error::{DirectorError, TunnelError, WatchError};
use crate::locations::{self, LocationMap};
use crate::logs::{format_entry, LogEntry};
use crate::tunnel::{GatewayIdentity, TunnelOps};

/// Opens the multiplexed stream once and dispatches every arriving entry
/// to a callback. No formatting, no output, no payload interpretation —
/// it only forwards what the transport yields.
pub struct StreamCoordinator {
    tunnel: Arc<dyn TunnelOps>,
}

impl StreamCoordinator {
    pub fn new(tunnel: Arc<dyn TunnelOps>) -> Self {
        Self { tunnel }
    }

    /// Runs until the stream ends or the transport fails terminally.
    /// Cancellation is dropping the returned future.
    pub async fn stream<F>(
        &self,
        gateway: &GatewayIdentity,
        locations: &LocationMap,
        mut on_entry: F,
    ) -> Result<(), TunnelError>
    where
        F: FnMut(LogEntry),
    {
        let mut stream = self.tunnel.open_stream(gateway, locations).await?;
        while let Some(item) = stream.next().await {
            on_entry(item?);
        }
        Ok(())
    }
}

/// Top-level orchestration. Holds the two injected capabilities and the
/// shared output sink; one instance drives one cancellable session.
pub struct WatchLogsSession {
    director: Arc<dyn DirectoryOps>,
    tunnel: Arc<dyn TunnelOps>,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl WatchLogsSession {
    pub fn new(director: Arc<dyn DirectoryOps>, tunnel: Arc<dyn TunnelOps>) -> Self {
        Self::with_sink(director, tunnel, Box::new(std::io::stdout()))
    }

    pub fn with_sink(
        director: Arc<dyn DirectoryOps>,
        tunnel: Arc<dyn TunnelOps>,
        sink: Box<dyn Write + Send>,
    ) -> Self {
        Self {
            director,
            tunnel,
            sink: Mutex::new(sink),
        }
    }

    /// Watch every matching instance of the director's deployment until
    /// cancelled or the transport fails terminally.
    ///
    /// An empty location map is terminal: the tunnel is never opened and
    /// the caller gets [`WatchError::NoLocations`].
    pub async fn run(
        &self,
        director_endpoint: &str,
        gateway_override: Option<&str>,
        components: &[String],
    ) -> Result<(), WatchError> {
        let gateway = match gateway_override {
            Some(identity) => GatewayIdentity::new(identity),
            None => GatewayIdentity::default_for(director_endpoint),
        };

        let deployments = self.director.list_deployments().await?;
        let deployment = deployments.first().ok_or(DirectorError::NoDeployments)?;
        if deployments.len() > 1 {
            let ignored: Vec<&str> = deployments[1..]
                .iter()
                .map(|deployment| deployment.name.as_str())
                .collect();
            warn!(?ignored, "director reported multiple deployments, using the first");
        }

        let instances = self
            .director
            .fetch_instance_state(&deployment.name)
            .await?;

        let filter: HashSet<String> = components.iter().cloned().collect();
        let locations = locations::resolve(&instances, &filter);
        if locations.is_empty() {
            return Err(WatchError::NoLocations);
        }

        info!(
            deployment = %deployment.name,
            locations = locations.len(),
            gateway = %gateway,
            "watching fleet logs"
        );

        let coordinator = StreamCoordinator::new(Arc::clone(&self.tunnel));
        coordinator
            .stream(&gateway, &locations, |entry| self.write_line(&entry))
            .await?;

        Ok(())
    }

    /// One rendered entry, one atomic line. The mutex serializes writers
    /// so concurrent sources never interleave mid-line.
    fn write_line(&self, entry: &LogEntry) {
        let line = format_entry(entry);
        let mut sink = match self.sink.lock() {
            Ok(sink) => sink,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(err) = writeln!(sink, "{line}") {
            warn!("failed to write rendered line: {err}");
        }
    }
}
