//! Configuration schema definitions.
//!
//! Every field carries a default so a harness can start from
//! `TargetConfig::default()` and override only the starting port.

use std::net::Ipv4Addr;

/// First port tried when no starting port is supplied.
pub const DEFAULT_START_PORT: u16 = 9001;

/// Root configuration for one echo target.
#[derive(Debug, Clone, Default)]
pub struct TargetConfig {
    /// Listener settings (host, starting port, probe attempts).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request size limits.
    pub limits: LimitsConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

impl TargetConfig {
    /// Default configuration starting the port search at `start_port`.
    pub fn with_start_port(start_port: u16) -> Self {
        let mut config = Self::default();
        config.listener.start_port = start_port;
        config
    }
}

/// Listener configuration.
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// Interface used for both probing and the real bind.
    pub host: Ipv4Addr,

    /// First port to probe.
    pub start_port: u16,

    /// Number of consecutive ports probed before giving up.
    pub max_attempts: u16,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::LOCALHOST,
            start_port: DEFAULT_START_PORT,
            max_attempts: 10,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    /// Total time allowed for one request, in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Request size limits.
#[derive(Debug, Clone)]
pub struct LimitsConfig {
    /// Largest POST body read into the diagnostic payload.
    pub body_limit_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            body_limit_bytes: 2 * 1024 * 1024,
        }
    }
}

/// Observability settings.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "echo_target=info,tower_http=info".to_string(),
        }
    }
}
