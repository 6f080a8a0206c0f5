pub mod grpc_session;
pub mod proto;

pub use grpc_session::GrpcFileServerConnector;
