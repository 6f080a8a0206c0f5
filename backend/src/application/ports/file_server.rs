use async_trait::async_trait;
use std::ops::{Deref, DerefMut};
use thiserror::Error;
use tracing::debug;

use crate::domain::{RootDirectory, StatusSnapshot};

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("invalid AFS server address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },
    #[error("cannot reach AFS server at {address}: {reason}")]
    Unreachable { address: String, reason: String },
}

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("session is closed")]
    SessionClosed,
    #[error("{call} failed: {reason}")]
    Call { call: &'static str, reason: String },
}

/// Port for opening sessions against the AFS server
#[async_trait]
pub trait FileServerConnector: Send + Sync {
    /// Establish a fresh connection. Never pooled, never retried.
    async fn open(&self) -> Result<Box<dyn FileServerSession>, ConnectionError>;
}

/// One open connection to the AFS server, scoped to a single status request
#[async_trait]
pub trait FileServerSession: Send {
    /// Ask the server for its managed root directory
    async fn fetch_root_directory(&mut self) -> Result<RootDirectory, RpcError>;

    /// Ask the server which clients are connected and which files they hold
    async fn fetch_status(&mut self) -> Result<StatusSnapshot, RpcError>;

    /// Release the underlying connection. Fetches after this fail with
    /// [`RpcError::SessionClosed`].
    fn close(&mut self);
}

/// Closes the wrapped session when dropped, whatever path the request takes.
pub struct ScopedSession {
    inner: Box<dyn FileServerSession>,
}

impl ScopedSession {
    pub fn new(inner: Box<dyn FileServerSession>) -> Self {
        Self { inner }
    }
}

impl Deref for ScopedSession {
    type Target = dyn FileServerSession;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}

impl DerefMut for ScopedSession {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.inner.as_mut()
    }
}

impl Drop for ScopedSession {
    fn drop(&mut self) {
        debug!("closing AFS session");
        self.inner.close();
    }
}
