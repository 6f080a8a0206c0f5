pub mod protocol;

pub use protocol::{HealthPayload, ProcessPayload, StatusPayload};
