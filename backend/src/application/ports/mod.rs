// Application ports - Driven ports (output ports implemented by infrastructure)

pub mod file_server;
pub mod process_inspector;

pub use file_server::{
    ConnectionError, FileServerConnector, FileServerSession, RpcError, ScopedSession,
};
pub use process_inspector::{InspectionError, ProcessInspector};

#[cfg(test)]
pub mod testing;
