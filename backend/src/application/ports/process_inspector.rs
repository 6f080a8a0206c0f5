use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ProcessMetrics;

#[derive(Debug, Error)]
pub enum InspectionError {
    #[error("process sampling task failed: {0}")]
    Task(String),
}

/// Port for looking up a local OS process and sampling its resource usage
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProcessInspector: Send + Sync {
    /// `Ok(None)` when no process named `process_name` is running, or when it
    /// vanished while being sampled.
    async fn locate_and_sample(
        &self,
        process_name: &str,
    ) -> Result<Option<ProcessMetrics>, InspectionError>;
}
