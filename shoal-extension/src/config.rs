//! Connection configuration for extension clients

use serde::{Deserialize, Serialize};

/// Configuration for one client connection pool.
///
/// Each client handle built by the factory owns exactly one pool
/// constructed from one of these.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConnectionConfig {
    /// Address of the cluster the client connects to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port of the cluster
    #[serde(default = "default_port")]
    pub port: u16,

    /// Fail requests whose response carries a deprecation warning
    #[serde(default = "default_strict_deprecation")]
    pub strict_deprecation: bool,

    /// Connection timeout in milliseconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,

    /// Request timeout in milliseconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,

    /// Maximum idle connections kept per host in the pool
    #[serde(default = "default_max_idle_connections")]
    pub max_idle_connections: usize,

    /// TLS posture for this pool
    #[serde(default)]
    pub tls: TlsPolicy,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    9200
}

fn default_strict_deprecation() -> bool {
    true
}

fn default_connect_timeout() -> u64 {
    5000
}

fn default_request_timeout() -> u64 {
    30000
}

fn default_max_idle_connections() -> usize {
    10
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            strict_deprecation: default_strict_deprecation(),
            connect_timeout_ms: default_connect_timeout(),
            request_timeout_ms: default_request_timeout(),
            max_idle_connections: default_max_idle_connections(),
            tls: TlsPolicy::default(),
        }
    }
}

impl ConnectionConfig {
    /// Config for the given host and port with the default posture
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    /// Base URL all request paths are appended to
    pub fn base_url(&self) -> String {
        let scheme = if self.tls.enabled { "https" } else { "http" };
        format!("{}://{}:{}", scheme, self.host, self.port)
    }

    /// Get connection timeout as Duration
    pub fn connect_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.connect_timeout_ms)
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.request_timeout_ms)
    }
}

/// TLS posture for a client connection pool.
///
/// The default matches the cluster's default security configuration:
/// TLS on, peer verification off (self-signed certificates). The policy
/// is a per-pool value rather than process-global state, so a stricter
/// posture can be selected per handle.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsPolicy {
    /// Enable TLS for this pool
    #[serde(default = "default_tls_enabled")]
    pub enabled: bool,

    /// Skip peer certificate and hostname verification (INSECURE)
    #[serde(default = "default_skip_verify")]
    pub skip_verify: bool,
}

fn default_tls_enabled() -> bool {
    true
}

fn default_skip_verify() -> bool {
    true
}

impl Default for TlsPolicy {
    fn default() -> Self {
        Self {
            enabled: default_tls_enabled(),
            skip_verify: default_skip_verify(),
        }
    }
}

impl TlsPolicy {
    /// TLS on, all verification off. The factory default.
    pub fn trust_all() -> Self {
        Self {
            enabled: true,
            skip_verify: true,
        }
    }

    /// TLS on, full peer verification against the system roots
    pub fn strict() -> Self {
        Self {
            enabled: true,
            skip_verify: false,
        }
    }

    /// Plain HTTP, no TLS at all
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            skip_verify: false,
        }
    }
}
