pub mod status_snapshot;
pub mod process_metrics;

pub use status_snapshot::{NormalizedFileMap, StatusSnapshot};
pub use process_metrics::ProcessMetrics;
