// Infrastructure layer - external concerns (AFS server, OS processes, HTTP)
// Implements interfaces defined in application layer

use std::sync::Arc;

use crate::application::dashboard::queries::GetStatusHandler;

pub mod driven;    // Output adapters (gRPC session, process inspector)
pub mod driving;   // Input adapters (HTTP)
pub mod settings;
pub mod telemetry;

#[derive(Clone)]
pub struct AppState {
    pub get_status: Arc<GetStatusHandler>,
}
