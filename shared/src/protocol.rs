use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body of `GET /status`, consumed by the dashboard front end
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusPayload {
    /// Client ids currently registered with the AFS server
    pub connected_clients: Vec<String>,
    /// Client-relative path -> ids of the clients holding that file open
    pub file_to_clients: BTreeMap<String, Vec<String>>,
    /// `null` when the server process is not running on this host
    pub process: Option<ProcessPayload>,
}

/// OS-level view of the AFS server process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessPayload {
    pub pid: u32,
    pub cpu_percent: f32,
    pub memory_rss_mb: f64,
    pub memory_vms_mb: f64,
    pub num_threads: usize,
}

/// Body of `GET /health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthPayload {
    pub status: String,
}

impl HealthPayload {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_process_serializes_as_null() {
        let payload = StatusPayload::default();
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            value,
            json!({
                "connected_clients": [],
                "file_to_clients": {},
                "process": null
            })
        );
    }

    #[test]
    fn test_process_field_names() {
        let payload = StatusPayload {
            connected_clients: vec!["u1".to_string()],
            file_to_clients: BTreeMap::from([("/a.txt".to_string(), vec!["u1".to_string()])]),
            process: Some(ProcessPayload {
                pid: 42,
                cpu_percent: 12.5,
                memory_rss_mb: 10.25,
                memory_vms_mb: 200.0,
                num_threads: 4,
            }),
        };
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["file_to_clients"]["/a.txt"], json!(["u1"]));
        assert_eq!(value["process"]["pid"], json!(42));
        assert_eq!(value["process"]["cpu_percent"], json!(12.5));
        assert_eq!(value["process"]["memory_rss_mb"], json!(10.25));
        assert_eq!(value["process"]["memory_vms_mb"], json!(200.0));
        assert_eq!(value["process"]["num_threads"], json!(4));
    }
}
