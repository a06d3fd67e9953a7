// ── Store configuration ──

use std::time::Duration;

use url::Url;

use alerta_api::{BackendContract, TlsMode, TransportConfig};

/// TLS verification policy, mirrored into `alerta_api::TlsMode` when the
/// HTTP backend is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsVerification {
    SystemDefaults,
    DangerAcceptInvalid,
}

/// Everything needed to build the data-access layer once at startup.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Backend root including the `/database` segment.
    pub url: Url,
    /// Which wire contract the backend speaks on writes.
    pub contract: BackendContract,
    pub tls: TlsVerification,
    pub timeout: Duration,
    /// Run against the seeded fixture backend instead of the network.
    pub fixtures: bool,
    /// Persisted session token, if a login already happened.
    pub token: Option<String>,
}

impl StoreConfig {
    /// Transport settings for building an HTTP client.
    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: match self.tls {
                TlsVerification::SystemDefaults => TlsMode::System,
                TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
            },
            timeout: self.timeout,
        }
    }
}
