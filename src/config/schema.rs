//! Configuration schema definitions.
//!
//! This module defines the config file structure for the standalone binary.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::settings::{HttpSettings, Overrides};

/// Root of the config file.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FileConfig {
    /// Listener and route settings.
    pub server: ServerConfig,

    /// HTTP transport timeouts.
    pub timeouts: TimeoutConfig,

    /// Graceful shutdown settings.
    pub shutdown: ShutdownConfig,

    /// Checks to register.
    pub probes: Vec<ProbeConfig>,
}

impl FileConfig {
    /// File values become explicit options, so they win over the environment.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            address: self.server.address.clone(),
            readiness_path: self.server.readiness_path.clone(),
            liveness_path: self.server.liveness_path.clone(),
            http: Some(self.timeouts.http_settings()),
        }
    }
}

/// Listener and route configuration. Unset fields defer to env and defaults.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:3674").
    pub address: Option<String>,

    /// Readiness route (e.g., "/ready").
    pub readiness_path: Option<String>,

    /// Liveness route (e.g., "/live").
    pub liveness_path: Option<String>,
}

/// Timeout configuration, in milliseconds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    pub read_ms: u64,
    pub read_header_ms: u64,
    pub idle_ms: u64,
    pub write_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        let http = HttpSettings::default();
        Self {
            read_ms: http.read_timeout.as_millis() as u64,
            read_header_ms: http.read_header_timeout.as_millis() as u64,
            idle_ms: http.idle_timeout.as_millis() as u64,
            write_ms: http.write_timeout.as_millis() as u64,
        }
    }
}

impl TimeoutConfig {
    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            read_timeout: Duration::from_millis(self.read_ms),
            read_header_timeout: Duration::from_millis(self.read_header_ms),
            idle_timeout: Duration::from_millis(self.idle_ms),
            write_timeout: Duration::from_millis(self.write_ms),
        }
    }
}

/// Graceful shutdown configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ShutdownConfig {
    /// How long in-flight requests may take to finish after a stop signal.
    pub drain_secs: u64,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self { drain_secs: 10 }
    }
}

/// Kind of built-in check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeKind {
    /// Dial `address` over TCP.
    Tcp,
    /// Require `path` to exist.
    File,
}

/// A single check definition.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProbeConfig {
    /// Name reported in the readiness payload.
    pub name: String,

    pub kind: ProbeKind,

    /// Target for `tcp` checks (e.g., "db.internal:5432").
    #[serde(default)]
    pub address: Option<String>,

    /// Target for `file` checks.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Dial timeout for `tcp` checks.
    #[serde(default = "default_probe_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_probe_timeout_ms() -> u64 {
    500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_file_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert!(config.server.address.is_none());
        assert!(config.probes.is_empty());
        assert_eq!(config.shutdown.drain_secs, 10);
        assert_eq!(config.timeouts.http_settings(), HttpSettings::default());
    }

    #[test]
    fn probes_parse_with_kind_tag() {
        let config: FileConfig = toml::from_str(
            r#"
            [server]
            address = "127.0.0.1:9999"

            [[probes]]
            name = "redis"
            kind = "tcp"
            address = "127.0.0.1:6379"

            [[probes]]
            name = "migrations"
            kind = "file"
            path = "/var/run/migrated"
            "#,
        )
        .unwrap();

        assert_eq!(config.probes.len(), 2);
        assert_eq!(config.probes[0].kind, ProbeKind::Tcp);
        assert_eq!(config.probes[0].timeout_ms, 500);
        assert_eq!(config.probes[1].kind, ProbeKind::File);

        let overrides = config.overrides();
        assert_eq!(overrides.address.as_deref(), Some("127.0.0.1:9999"));
        assert!(overrides.readiness_path.is_none());
    }
}
