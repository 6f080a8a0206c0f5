//! Wire types and client stub for the `afs_operation.operators` gRPC service.
//!
//! Only the two calls the dashboard needs are bound here. Field tags follow
//! the server's `afs_operation.proto`.

use std::collections::HashMap;
use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;

const REQUEST_DIR_PATH: &str = "/afs_operation.operators/request_dir";
const GET_STATUS_PATH: &str = "/afs_operation.operators/GetStatus";

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InitialiseRequest {
    #[prost(string, tag = "1")]
    pub code_to_initialise: String,
    #[prost(string, tag = "2")]
    pub client_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InitialiseResponse {
    #[prost(string, tag = "1")]
    pub root_path: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetStatusRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FileUsers {
    #[prost(string, repeated, tag = "1")]
    pub users: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetStatusResponse {
    #[prost(string, repeated, tag = "1")]
    pub connected_clients: Vec<String>,
    #[prost(map = "string, message", tag = "2")]
    pub file_to_clients: HashMap<String, FileUsers>,
}

/// Client stub for `afs_operation.operators`
#[derive(Debug, Clone)]
pub struct OperatorsClient {
    inner: tonic::client::Grpc<Channel>,
}

impl OperatorsClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: tonic::client::Grpc::new(channel),
        }
    }

    pub async fn request_dir(
        &mut self,
        request: InitialiseRequest,
    ) -> Result<InitialiseResponse, tonic::Status> {
        self.unary(request, REQUEST_DIR_PATH).await
    }

    pub async fn get_status(
        &mut self,
        request: GetStatusRequest,
    ) -> Result<GetStatusResponse, tonic::Status> {
        self.unary(request, GET_STATUS_PATH).await
    }

    async fn unary<Req, Resp>(
        &mut self,
        request: Req,
        path: &'static str,
    ) -> Result<Resp, tonic::Status>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        self.inner.ready().await.map_err(|e| {
            tonic::Status::new(tonic::Code::Unknown, format!("Service was not ready: {}", e))
        })?;
        let codec = ProstCodec::<Req, Resp>::default();
        self.inner
            .unary(
                tonic::Request::new(request),
                PathAndQuery::from_static(path),
                codec,
            )
            .await
            .map(tonic::Response::into_inner)
    }
}
