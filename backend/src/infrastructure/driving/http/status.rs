use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};
use shared::{ProcessPayload, StatusPayload};

use crate::application::dashboard::queries::GetStatusError;
use crate::domain::{AggregatedStatus, ProcessMetrics};
use crate::infrastructure::AppState;

/// `GET /status`: 200 with whatever could be collected, 503 when the AFS
/// server cannot be reached at all.
pub async fn get_status(
    State(state): State<AppState>,
) -> Result<Json<StatusPayload>, (StatusCode, Json<Value>)> {
    match state.get_status.handle().await {
        Ok(status) => Ok(Json(status.into())),
        Err(e) => {
            tracing::error!("[API] status request failed: {}", e);
            let code = match e {
                GetStatusError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                GetStatusError::TimedOut(_) => StatusCode::GATEWAY_TIMEOUT,
            };
            Err((code, Json(json!({ "error": e.to_string() }))))
        }
    }
}

impl From<AggregatedStatus> for StatusPayload {
    fn from(status: AggregatedStatus) -> Self {
        Self {
            connected_clients: status.connected_clients,
            file_to_clients: status.file_to_clients,
            process: status.process.map(ProcessPayload::from),
        }
    }
}

impl From<ProcessMetrics> for ProcessPayload {
    fn from(metrics: ProcessMetrics) -> Self {
        Self {
            pid: metrics.pid,
            cpu_percent: metrics.cpu_percent,
            memory_rss_mb: metrics.memory_rss_mb,
            memory_vms_mb: metrics.memory_vms_mb,
            num_threads: metrics.num_threads,
        }
    }
}
