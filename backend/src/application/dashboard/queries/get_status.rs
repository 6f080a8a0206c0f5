use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::application::ports::{
    ConnectionError, FileServerConnector, ProcessInspector, ScopedSession,
};
use crate::domain::{AggregatedStatus, ProcessMetrics, RootDirectory, StatusSnapshot};

#[derive(Debug, Error)]
pub enum GetStatusError {
    #[error("AFS server unavailable: {0}")]
    ServiceUnavailable(#[from] ConnectionError),
    #[error("status collection timed out after {0:?}")]
    TimedOut(Duration),
}

/// Query handler behind `GET /status`.
///
/// Holds only immutable wiring; every call opens its own session and builds
/// its own [`AggregatedStatus`], so concurrent polls never share state.
pub struct GetStatusHandler {
    connector: Arc<dyn FileServerConnector>,
    inspector: Arc<dyn ProcessInspector>,
    process_name: String,
    request_timeout: Option<Duration>,
}

impl GetStatusHandler {
    pub fn new(
        connector: Arc<dyn FileServerConnector>,
        inspector: Arc<dyn ProcessInspector>,
        process_name: impl Into<String>,
    ) -> Self {
        Self {
            connector,
            inspector,
            process_name: process_name.into(),
            request_timeout: None,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Only a failed connect (or the optional overall timeout) is an error.
    /// Failed RPCs and a missing process degrade to empty values.
    #[instrument(skip(self), fields(process = %self.process_name))]
    pub async fn handle(&self) -> Result<AggregatedStatus, GetStatusError> {
        match self.request_timeout {
            Some(limit) => tokio::time::timeout(limit, self.collect())
                .await
                .map_err(|_| GetStatusError::TimedOut(limit))?,
            None => self.collect().await,
        }
    }

    async fn collect(&self) -> Result<AggregatedStatus, GetStatusError> {
        let session = ScopedSession::new(self.connector.open().await?);

        let ((root, snapshot), process) =
            tokio::join!(Self::fetch_server_state(session), self.sample_process());

        let status = AggregatedStatus::assemble(&root, &snapshot, process);
        info!(
            clients = status.connected_clients.len(),
            open_files = status.file_to_clients.len(),
            process_found = status.process.is_some(),
            "status collected"
        );
        Ok(status)
    }

    // Takes the session by value so it is closed as soon as both fetches are done.
    async fn fetch_server_state(mut session: ScopedSession) -> (RootDirectory, StatusSnapshot) {
        let root = match session.fetch_root_directory().await {
            Ok(root) if root.is_unknown() => {
                warn!("AFS server reported an empty root directory, leaving paths absolute");
                root
            }
            Ok(root) => {
                debug!("AFS root directory: {}", root);
                root
            }
            Err(e) => {
                warn!("Failed to fetch root directory, leaving paths absolute: {}", e);
                RootDirectory::unknown()
            }
        };

        let snapshot = match session.fetch_status().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Failed to fetch status snapshot, reporting empty state: {}", e);
                StatusSnapshot::empty()
            }
        };

        (root, snapshot)
    }

    async fn sample_process(&self) -> Option<ProcessMetrics> {
        match self.inspector.locate_and_sample(&self.process_name).await {
            Ok(Some(metrics)) => Some(metrics),
            Ok(None) => {
                debug!("No local process named {}", self.process_name);
                None
            }
            Err(e) => {
                warn!("Process sampling failed for {}: {}", self.process_name, e);
                None
            }
        }
    }
}
