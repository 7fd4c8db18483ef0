//! Ssh — implements `TunnelOps` by tailing logs over an ssh gateway.
//!
//! One child process per location, jumped through the gateway identity.
//! Each child's stdout and stderr become ordered per-channel line
//! streams; all sources merge through an unordered `select_all` fan-in,
//! so a silent source never delays the others.

use std::pin::Pin;
use std::process::Stdio;
use std::task::{Context, Poll};

use futures_util::stream::{select, select_all};
use futures_util::StreamExt;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tokio_stream::wrappers::LinesStream;
use tokio_stream::Stream;
use tracing::{debug, info};

use crate::conf::WatchConfig;
use crate::error::TunnelError;
use crate::locations::LocationMap;
use crate::logs::{LogEntry, StreamChannel};
use crate::tunnel::gateway::GatewayIdentity;
use crate::tunnel::ops::{LogStream, TunnelOps};

/// Live ssh-backed transport.
pub struct SshTunnel {
    remote_user: String,
    log_glob: String,
    connect_timeout_secs: u64,
}

impl SshTunnel {
    pub fn new(config: &WatchConfig) -> Self {
        Self {
            remote_user: config.remote_user.clone(),
            log_glob: config.log_glob.clone(),
            connect_timeout_secs: config.connect_timeout_secs,
        }
    }

    fn ssh_args(&self, gateway: &GatewayIdentity, address: &str) -> Vec<String> {
        vec![
            "-o".into(),
            "BatchMode=yes".into(),
            "-o".into(),
            format!("ConnectTimeout={}", self.connect_timeout_secs),
            "-J".into(),
            gateway.to_string(),
            format!("{}@{}", self.remote_user, address),
            "tail".into(),
            "-q".into(),
            "-n".into(),
            "0".into(),
            "-F".into(),
            self.log_glob.clone(),
        ]
    }

    fn spawn_tail(
        &self,
        gateway: &GatewayIdentity,
        location: &str,
        address: &str,
    ) -> Result<Child, TunnelError> {
        debug!(location, address, "spawning log tail");
        Command::new("ssh")
            .args(self.ssh_args(gateway, address))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| TunnelError::Open {
                location: location.to_string(),
                source: err,
            })
    }
}

/// Both channels of one child, merged. Holds the child so that dropping
/// the stream kills the remote tail.
struct SourceStream {
    inner: Pin<Box<dyn Stream<Item = Result<LogEntry, TunnelError>> + Send>>,
    _child: Child,
}

impl SourceStream {
    fn new(source: String, mut child: Child) -> Result<Self, TunnelError> {
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| TunnelError::Pipe(source.clone()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| TunnelError::Pipe(source.clone()))?;

        let out_source = source.clone();
        let out_lines = LinesStream::new(BufReader::new(stdout).lines()).map(move |line| {
            line.map(|raw| LogEntry::new(out_source.clone(), raw, StreamChannel::Stdout))
                .map_err(TunnelError::from)
        });

        let err_source = source;
        let err_lines = LinesStream::new(BufReader::new(stderr).lines()).map(move |line| {
            line.map(|raw| LogEntry::new(err_source.clone(), raw, StreamChannel::Stderr))
                .map_err(TunnelError::from)
        });

        Ok(Self {
            inner: Box::pin(select(out_lines, err_lines)),
            _child: child,
        })
    }
}

impl Stream for SourceStream {
    type Item = Result<LogEntry, TunnelError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().inner.as_mut().poll_next(cx)
    }
}

impl TunnelOps for SshTunnel {
    fn open_stream<'a>(
        &'a self,
        gateway: &'a GatewayIdentity,
        locations: &'a LocationMap,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<LogStream, TunnelError>> + Send + 'a>>
    {
        Box::pin(async move {
            let mut sources = Vec::with_capacity(locations.len());
            for (location, address) in locations {
                let source = location.to_string();
                let child = self.spawn_tail(gateway, &source, address)?;
                sources.push(SourceStream::new(source, child)?);
            }

            info!(sources = sources.len(), gateway = %gateway, "log stream open");
            Ok(LogStream::new(select_all(sources)))
        })
    }
}
