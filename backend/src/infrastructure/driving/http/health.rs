use axum::Json;
use shared::HealthPayload;

/// Liveness of the bridge itself; never touches the AFS server
pub async fn health_check() -> Json<HealthPayload> {
    Json(HealthPayload::ok())
}
