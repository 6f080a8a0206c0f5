use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error as StdError;
use std::time::Duration;
use tonic::transport::Endpoint;
use tracing::debug;

use super::proto::{GetStatusRequest, GetStatusResponse, InitialiseRequest, OperatorsClient};
use crate::application::ports::{
    ConnectionError, FileServerConnector, FileServerSession, RpcError,
};
use crate::domain::{RootDirectory, StatusSnapshot};

/// Token the AFS server expects before it hands out its root directory
pub const INITIALISE_TOKEN: &str = "I want input/output directory";

/// Opens one tonic channel per status request
pub struct GrpcFileServerConnector {
    address: String,
    connect_timeout: Duration,
    rpc_timeout: Duration,
}

impl GrpcFileServerConnector {
    pub fn new(address: impl Into<String>, connect_timeout: Duration, rpc_timeout: Duration) -> Self {
        Self {
            address: address.into(),
            connect_timeout,
            rpc_timeout,
        }
    }
}

#[async_trait]
impl FileServerConnector for GrpcFileServerConnector {
    async fn open(&self) -> Result<Box<dyn FileServerSession>, ConnectionError> {
        let endpoint = Endpoint::from_shared(self.address.clone())
            .map_err(|e| ConnectionError::InvalidAddress {
                address: self.address.clone(),
                reason: error_chain(&e),
            })?
            .connect_timeout(self.connect_timeout)
            .timeout(self.rpc_timeout);

        let channel = endpoint
            .connect()
            .await
            .map_err(|e| ConnectionError::Unreachable {
                address: self.address.clone(),
                reason: error_chain(&e),
            })?;

        debug!("Opened AFS session to {}", self.address);
        Ok(Box::new(GrpcFileServerSession {
            client: Some(OperatorsClient::new(channel)),
        }))
    }
}

pub struct GrpcFileServerSession {
    client: Option<OperatorsClient>,
}

impl GrpcFileServerSession {
    fn client(&mut self) -> Result<&mut OperatorsClient, RpcError> {
        self.client.as_mut().ok_or(RpcError::SessionClosed)
    }
}

#[async_trait]
impl FileServerSession for GrpcFileServerSession {
    async fn fetch_root_directory(&mut self) -> Result<RootDirectory, RpcError> {
        // Empty client id: the dashboard must not show up as a connected client
        let request = InitialiseRequest {
            code_to_initialise: INITIALISE_TOKEN.to_string(),
            client_id: String::new(),
        };
        let response = self
            .client()?
            .request_dir(request)
            .await
            .map_err(|status| call_failed("request_dir", status))?;

        Ok(RootDirectory::new(response.root_path))
    }

    async fn fetch_status(&mut self) -> Result<StatusSnapshot, RpcError> {
        let response = self
            .client()?
            .get_status(GetStatusRequest {})
            .await
            .map_err(|status| call_failed("GetStatus", status))?;

        Ok(snapshot_from_response(response))
    }

    fn close(&mut self) {
        if self.client.take().is_some() {
            debug!("Released AFS channel");
        }
    }
}

fn snapshot_from_response(response: GetStatusResponse) -> StatusSnapshot {
    let file_to_clients: BTreeMap<String, BTreeSet<String>> = response
        .file_to_clients
        .into_iter()
        .map(|(path, users)| (path, users.users.into_iter().collect()))
        .collect();

    StatusSnapshot {
        connected_clients: response.connected_clients.into_iter().collect(),
        file_to_clients,
    }
}

fn call_failed(call: &'static str, status: tonic::Status) -> RpcError {
    RpcError::Call {
        call,
        reason: format!("{:?}: {}", status.code(), status.message()),
    }
}

// tonic's transport error only says "transport error"; the cause is further down.
fn error_chain(error: &dyn StdError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
