//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from the TOML config
//! file, with defaults matching the reference deployment.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::relay::{BackendTarget, DeadlineTiers};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP listener settings.
    pub listener: ListenerConfig,

    /// Backend control service address.
    pub backend: BackendConfig,

    /// Relay deadline tiers.
    pub deadlines: DeadlineConfig,

    /// Static asset settings.
    pub assets: AssetConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Address to bind (e.g., "0.0.0.0").
    pub host: String,

    /// Listening port. Overridden by the CLI port argument, when given.
    pub port: u16,
}

impl ListenerConfig {
    /// Full bind address string for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Override the listening port (CLI takes precedence over file).
    pub fn set_port(&mut self, port: u16) {
        self.port = port;
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8088,
        }
    }
}

/// Backend control service configuration.
///
/// The control port is not configurable separately: it is always the
/// primary port plus one, matching the backend's own convention.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend host name or address.
    pub host: String,

    /// Primary command port.
    pub port: u16,
}

impl BackendConfig {
    /// Resolve the immutable backend target for the process lifetime.
    pub fn target(&self) -> BackendTarget {
        // "localhost" may resolve to ::1 first; the backend listens on IPv4.
        let host = if self.host == "localhost" {
            "127.0.0.1".to_string()
        } else {
            self.host.clone()
        };
        BackendTarget::new(host, self.port)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9980,
        }
    }
}

/// Relay deadline tiers, in milliseconds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DeadlineConfig {
    /// Deadline for ordinary commands.
    pub default_ms: u64,

    /// Deadline for long-running `player*` commands.
    pub extended_ms: u64,
}

impl DeadlineConfig {
    pub fn tiers(&self) -> DeadlineTiers {
        DeadlineTiers {
            default: Duration::from_millis(self.default_ms),
            extended: Duration::from_millis(self.extended_ms),
        }
    }
}

impl Default for DeadlineConfig {
    fn default() -> Self {
        Self {
            default_ms: 250,
            extended_ms: 500,
        }
    }
}

/// Static asset configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Document root for the web UI files.
    pub doc_root: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            doc_root: PathBuf::from("web"),
        }
    }
}
