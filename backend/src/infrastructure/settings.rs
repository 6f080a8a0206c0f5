use config::{Config, ConfigBuilder, Environment, File};
use config::builder::DefaultState;
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

const ENV_PREFIX: &str = "AFS_DASHBOARD";
const CONFIG_PATH_VAR: &str = "AFS_DASHBOARD_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";
const CPU_SAMPLE_LIMIT_MS: u64 = 1000;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),
    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Runtime settings, read once at startup and shared read-only afterwards
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server_address: String,
    pub connect_timeout_ms: u64,
    pub rpc_timeout_ms: u64,
    pub process_name: String,
    pub cpu_sample_ms: u64,
    pub bind_address: String,
    /// 0 disables the overall request timeout
    pub request_timeout_ms: u64,
    pub log_level: String,
}

impl Settings {
    /// Defaults, then `dashboard.toml` (or `$AFS_DASHBOARD_CONFIG`), then
    /// `AFS_DASHBOARD_*` environment variables.
    pub fn load() -> Result<Self, SettingsError> {
        let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let builder = defaults()?
            .add_source(File::with_name(&path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));
        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, SettingsError> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validated()
    }

    fn validated(mut self) -> Result<Self, SettingsError> {
        self.server_address = with_scheme(self.server_address.trim());
        if self.server_address.len() <= "http://".len() {
            return Err(SettingsError::Invalid {
                key: "server_address",
                reason: "address is empty".to_string(),
            });
        }
        if self.process_name.trim().is_empty() {
            return Err(SettingsError::Invalid {
                key: "process_name",
                reason: "process name is empty".to_string(),
            });
        }
        if self.cpu_sample_ms >= CPU_SAMPLE_LIMIT_MS {
            return Err(SettingsError::Invalid {
                key: "cpu_sample_ms",
                reason: format!("must be below {} ms", CPU_SAMPLE_LIMIT_MS),
            });
        }
        self.bind_address
            .parse::<SocketAddr>()
            .map_err(|e| SettingsError::Invalid {
                key: "bind_address",
                reason: e.to_string(),
            })?;
        Ok(self)
    }

    pub fn bind_addr(&self) -> SocketAddr {
        // Checked in `validated`
        self.bind_address
            .parse()
            .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 8000)))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_millis(self.rpc_timeout_ms)
    }

    pub fn cpu_sample(&self) -> Duration {
        Duration::from_millis(self.cpu_sample_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_ms > 0).then(|| Duration::from_millis(self.request_timeout_ms))
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    Config::builder()
        .set_default("server_address", "http://localhost:50051")?
        .set_default("connect_timeout_ms", 2000_i64)?
        .set_default("rpc_timeout_ms", 5000_i64)?
        .set_default("process_name", "filesystem_server")?
        .set_default("cpu_sample_ms", 200_i64)?
        .set_default("bind_address", "0.0.0.0:8000")?
        .set_default("request_timeout_ms", 0_i64)?
        .set_default("log_level", "info")
}

// The AFS tools spell the address as `localhost:50051`; tonic wants a URI.
fn with_scheme(address: &str) -> String {
    if address.starts_with("http://") || address.starts_with("https://") {
        address.to_string()
    } else {
        format!("http://{}", address)
    }
}
