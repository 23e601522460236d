// Fetcher trait for telemetry snapshots
use crate::domain::snapshot::Snapshot;
use async_trait::async_trait;
use thiserror::Error;

/// Why a poll produced no snapshot. The previous snapshot stays current.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request to telemetry endpoint failed: {0}")]
    Transport(String),
    #[error("telemetry endpoint returned HTTP {status}")]
    Status { status: u16 },
    #[error("malformed telemetry payload: {0}")]
    Decode(String),
    #[error("fetch task aborted: {0}")]
    Aborted(String),
}

#[async_trait]
pub trait SnapshotFetcher: Send + Sync {
    /// Perform one request and decode it. Must not touch shared state.
    async fn fetch(&self) -> Result<Snapshot, FetchError>;
}
