//! Tunnel trait — abstract interface for opening the multiplexed stream.
//!
//! The coordinator reaches the fleet only through this trait.
//! `ssh.rs` provides the real gateway-backed implementation.
//! `fake.rs` provides a test double.

use std::pin::Pin;
use std::task::{Context, Poll};

use tokio_stream::Stream;

use crate::error::TunnelError;
use crate::locations::LocationMap;
use crate::logs::LogEntry;
use crate::tunnel::gateway::GatewayIdentity;

/// One logical channel carrying interleaved entries from every location.
///
/// Per-source order is the transport's responsibility; cross-source order
/// is whatever the merge yields. Dropping the stream tears the whole
/// fan-out down.
pub struct LogStream {
    inner: Pin<Box<dyn Stream<Item = Result<LogEntry, TunnelError>> + Send>>,
}

impl LogStream {
    pub fn new(inner: impl Stream<Item = Result<LogEntry, TunnelError>> + Send + 'static) -> Self {
        Self {
            inner: Box::pin(inner),
        }
    }
}

impl Stream for LogStream {
    type Item = Result<LogEntry, TunnelError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().inner.as_mut().poll_next(cx)
    }
}

/// Async interface over the secure stream transport.
///
/// Object-safe thanks to the `Pin<Box<…>>` return, so a session can hold
/// it behind `Arc<dyn TunnelOps>`.
pub trait TunnelOps: Send + Sync {
    /// Open one multiplexed stream covering every address in `locations`.
    fn open_stream<'a>(
        &'a self,
        gateway: &'a GatewayIdentity,
        locations: &'a LocationMap,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<LogStream, TunnelError>> + Send + 'a>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logs::StreamChannel;
    use futures_util::StreamExt;

    #[tokio::test]
    async fn log_stream_yields_inner_items_in_order() {
        let entries = vec![
            Ok(LogEntry::new("api_z1/0", "one", StreamChannel::Stdout)),
            Ok(LogEntry::new("api_z1/0", "two", StreamChannel::Stderr)),
        ];
        let mut stream = LogStream::new(tokio_stream::iter(entries));

        let first = stream.next().await.unwrap().unwrap();
        assert_eq!(first.raw_payload, "one");
        let second = stream.next().await.unwrap().unwrap();
        assert_eq!(second.raw_payload, "two");
        assert!(stream.next().await.is_none());
    }
}
