use crate::domain::entities::{NormalizedFileMap, ProcessMetrics, StatusSnapshot};
use crate::domain::value_objects::RootDirectory;

/// Everything the dashboard shows for one poll.
/// Built fresh per request; nothing here outlives the response.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedStatus {
    pub connected_clients: Vec<String>,
    pub file_to_clients: NormalizedFileMap,
    pub process: Option<ProcessMetrics>,
}

impl AggregatedStatus {
    pub fn assemble(
        root: &RootDirectory,
        snapshot: &StatusSnapshot,
        process: Option<ProcessMetrics>,
    ) -> Self {
        Self {
            connected_clients: snapshot.connected_clients(),
            file_to_clients: snapshot.normalized_files(root),
            process,
        }
    }
}
