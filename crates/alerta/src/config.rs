//! CLI configuration — thin wrapper around `alerta_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--backend, --fixtures, etc.).

use std::time::Duration;

use alerta_core::{BackendContract, StoreConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use alerta_config::{Config, config_path, load_config_or_default};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Fallback backend URL for fixture mode, where no network is touched.
fn fixture_placeholder_url() -> url::Url {
    url::Url::parse("http://localhost:8080/database").expect("static URL")
}

/// Build a `StoreConfig` from the config file, profile, and CLI
/// overrides. CLI flags take priority over profile values.
pub fn resolve_store_config(global: &GlobalOpts) -> Result<StoreConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    // Start from the profile if one exists, else from bare defaults.
    let mut store = match cfg.profiles.get(&profile_name) {
        Some(profile) => alerta_config::profile_to_store_config(profile, &profile_name, &cfg.defaults)?,
        None => {
            // A profile was named explicitly but doesn't exist: that's an
            // error. The implicit default profile may simply be absent.
            if global.profile.is_some() {
                let mut available: Vec<&str> =
                    cfg.profiles.keys().map(String::as_str).collect();
                available.sort_unstable();
                return Err(CliError::ProfileNotFound {
                    name: profile_name,
                    available: if available.is_empty() {
                        "(none)".into()
                    } else {
                        available.join(", ")
                    },
                });
            }
            StoreConfig {
                url: fixture_placeholder_url(),
                contract: BackendContract::Nested,
                tls: TlsVerification::SystemDefaults,
                timeout: Duration::from_secs(cfg.defaults.timeout),
                fixtures: cfg.defaults.fixtures,
                token: alerta_config::load_token(&profile_name),
            }
        }
    };

    // Flag overrides
    if let Some(ref backend) = global.backend {
        store.url = backend.parse().map_err(|_| CliError::Validation {
            field: "backend".into(),
            reason: format!("invalid URL: {backend}"),
        })?;
    }
    if global.insecure {
        store.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(timeout) = global.timeout {
        store.timeout = Duration::from_secs(timeout);
    }
    if global.fixtures {
        store.fixtures = true;
    }

    // A network store needs a real backend URL from somewhere.
    if !store.fixtures
        && global.backend.is_none()
        && cfg.profiles.get(&profile_name).is_none()
    {
        return Err(CliError::NoBackend {
            path: config_path().display().to_string(),
        });
    }

    Ok(store)
}
