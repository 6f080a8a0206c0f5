pub mod afs_rpc;
pub mod process;

pub use afs_rpc::GrpcFileServerConnector;
pub use process::SysinfoProcessInspector;
