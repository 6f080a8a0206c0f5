// Application layer - use cases
// Orchestrates domain logic, depends on domain layer only

pub mod dashboard;
pub mod ports;
