const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Resource usage of the AFS server process as seen by the local OS
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessMetrics {
    pub pid: u32,
    pub cpu_percent: f32,
    pub memory_rss_mb: f64,
    pub memory_vms_mb: f64,
    pub num_threads: usize,
}

impl ProcessMetrics {
    pub fn from_raw(
        pid: u32,
        cpu_percent: f32,
        rss_bytes: u64,
        vms_bytes: u64,
        num_threads: usize,
    ) -> Self {
        Self {
            pid,
            cpu_percent,
            memory_rss_mb: bytes_to_mb(rss_bytes),
            memory_vms_mb: bytes_to_mb(vms_bytes),
            num_threads,
        }
    }
}

/// Bytes to MiB, rounded to two decimals.
pub fn bytes_to_mb(bytes: u64) -> f64 {
    (bytes as f64 / BYTES_PER_MB * 100.0).round() / 100.0
}
