//! Global configuration types for Edulearn.
//!
//! `GlobalConfig` represents the top-level `config.toml` that controls the
//! HTTP listener, log format and telemetry export.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Edulearn server.
///
/// Loaded from `~/.edulearn/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[serde(default)]
    pub enable_otel: bool,

    /// Emit log lines as JSON objects instead of human-readable text.
    #[serde(default)]
    pub json_logs: bool,
}

/// Address the REST API binds to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
