//! Fake — test double for the stream transport.
//!
//! Records every `open_stream` call (gateway identity plus the sorted
//! location keys) and yields a canned entry sequence, so session tests
//! can verify what was opened without touching ssh.

use std::pin::Pin;

use tokio::sync::Mutex;

use crate::error::TunnelError;
use crate::locations::LocationMap;
use crate::logs::LogEntry;
use crate::tunnel::gateway::GatewayIdentity;
use crate::tunnel::ops::{LogStream, TunnelOps};

#[derive(Default)]
struct Inner {
    entries: Vec<LogEntry>,
    failure: Option<String>,
    opens: Vec<(String, Vec<String>)>,
}

/// In-memory transport. Seed entries (and optionally a terminal failure)
/// before running the code under test, then inspect `opens`.
pub struct FakeTunnel {
    inner: Mutex<Inner>,
}

impl FakeTunnel {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Seed one entry into the canned stream.
    pub async fn push_entry(&self, entry: LogEntry) {
        self.inner.lock().await.entries.push(entry);
    }

    /// Make the stream end with a terminal transport failure after the
    /// seeded entries.
    pub async fn fail_with(&self, message: &str) {
        self.inner.lock().await.failure = Some(message.to_string());
    }

    /// Every `open_stream` call so far: `(gateway, sorted location keys)`.
    pub async fn opens(&self) -> Vec<(String, Vec<String>)> {
        self.inner.lock().await.opens.clone()
    }
}

impl Default for FakeTunnel {
    fn default() -> Self {
        Self::new()
    }
}

impl TunnelOps for FakeTunnel {
    fn open_stream<'a>(
        &'a self,
        gateway: &'a GatewayIdentity,
        locations: &'a LocationMap,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<LogStream, TunnelError>> + Send + 'a>>
    {
        Box::pin(async move {
            let mut state = self.inner.lock().await;

            let mut keys: Vec<String> = locations.keys().map(|key| key.to_string()).collect();
            keys.sort();
            state.opens.push((gateway.to_string(), keys));

            let mut items: Vec<Result<LogEntry, TunnelError>> =
                state.entries.iter().cloned().map(Ok).collect();
            if let Some(message) = &state.failure {
                items.push(Err(TunnelError::Io(std::io::Error::other(message.clone()))));
            }

            Ok(LogStream::new(tokio_stream::iter(items)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locations::Location;
    use crate::logs::StreamChannel;
    use futures_util::StreamExt;

    #[tokio::test]
    async fn records_gateway_and_sorted_keys_per_open() {
        let fake = FakeTunnel::new();
        let mut locations = LocationMap::new();
        locations.insert(Location::new("runner_z1", 1), "1.2.3.6".into());
        locations.insert(Location::new("api_z1", 0), "1.2.3.4".into());

        fake.open_stream(&GatewayIdentity::new("vcap@d.example"), &locations)
            .await
            .unwrap();

        let opens = fake.opens().await;
        assert_eq!(opens.len(), 1);
        assert_eq!(opens[0].0, "vcap@d.example");
        assert_eq!(opens[0].1, vec!["api_z1/0", "runner_z1/1"]);
    }

    #[tokio::test]
    async fn yields_seeded_entries_then_failure() {
        let fake = FakeTunnel::new();
        fake.push_entry(LogEntry::new("api_z1/0", "line", StreamChannel::Stdout))
            .await;
        fake.fail_with("gateway went away").await;

        let mut stream = fake
            .open_stream(&GatewayIdentity::default_for("d.example"), &LocationMap::new())
            .await
            .unwrap();

        assert!(stream.next().await.unwrap().is_ok());
        assert!(stream.next().await.unwrap().is_err());
        assert!(stream.next().await.is_none());
    }
}
