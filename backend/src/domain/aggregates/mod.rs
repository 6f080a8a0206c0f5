pub mod aggregated_status;

pub use aggregated_status::AggregatedStatus;
