//! In-memory AFS server used by handler and router tests.

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::{ConnectionError, FileServerConnector, FileServerSession, RpcError};
use crate::domain::{RootDirectory, StatusSnapshot};

pub type Files = Vec<(&'static str, Vec<&'static str>)>;

#[derive(Clone, Default)]
pub struct Counters {
    opens: Arc<AtomicUsize>,
    closes: Arc<AtomicUsize>,
}

impl Counters {
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

/// `None` for `root` or `files` makes that call fail.
pub struct FakeConnector {
    pub reachable: bool,
    pub root: Option<&'static str>,
    pub clients: Vec<&'static str>,
    pub files: Option<Files>,
    pub status_delay: Option<Duration>,
    pub counters: Counters,
}

impl FakeConnector {
    pub fn healthy(root: &'static str, files: Files) -> Self {
        Self {
            reachable: true,
            root: Some(root),
            clients: vec!["u1", "u2", "u3"],
            files: Some(files),
            status_delay: None,
            counters: Counters::default(),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            reachable: false,
            ..Self::healthy("/srv/afs", vec![])
        }
    }
}

struct FakeSession {
    root: Option<&'static str>,
    snapshot: Option<StatusSnapshot>,
    status_delay: Option<Duration>,
    closes: Arc<AtomicUsize>,
    closed: bool,
}

#[async_trait]
impl FileServerConnector for FakeConnector {
    async fn open(&self) -> Result<Box<dyn FileServerSession>, ConnectionError> {
        self.counters.opens.fetch_add(1, Ordering::SeqCst);
        if !self.reachable {
            return Err(ConnectionError::Unreachable {
                address: "http://localhost:50051".to_string(),
                reason: "connection refused".to_string(),
            });
        }

        let snapshot = self.files.as_ref().map(|files| StatusSnapshot {
            connected_clients: self.clients.iter().map(|c| c.to_string()).collect(),
            file_to_clients: files
                .iter()
                .map(|(path, ids)| {
                    let ids: BTreeSet<String> = ids.iter().map(|c| c.to_string()).collect();
                    (path.to_string(), ids)
                })
                .collect::<BTreeMap<_, _>>(),
        });

        Ok(Box::new(FakeSession {
            root: self.root,
            snapshot,
            status_delay: self.status_delay,
            closes: self.counters.closes.clone(),
            closed: false,
        }))
    }
}

#[async_trait]
impl FileServerSession for FakeSession {
    async fn fetch_root_directory(&mut self) -> Result<RootDirectory, RpcError> {
        if self.closed {
            return Err(RpcError::SessionClosed);
        }
        self.root.map(RootDirectory::new).ok_or(RpcError::Call {
            call: "request_dir",
            reason: "unavailable".to_string(),
        })
    }

    async fn fetch_status(&mut self) -> Result<StatusSnapshot, RpcError> {
        if self.closed {
            return Err(RpcError::SessionClosed);
        }
        if let Some(delay) = self.status_delay {
            tokio::time::sleep(delay).await;
        }
        self.snapshot.clone().ok_or(RpcError::Call {
            call: "GetStatus",
            reason: "unavailable".to_string(),
        })
    }

    fn close(&mut self) {
        self.closed = true;
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}
