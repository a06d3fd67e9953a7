//! Shared configuration for the alerta CLI.
//!
//! TOML profiles, environment overrides, session-token persistence
//! (keyring), and translation to `alerta_core::StoreConfig`. The CLI adds
//! flag-aware wrappers on top.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use alerta_core::{BackendContract, StoreConfig, TlsVerification};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no session token stored for profile '{profile}'")]
    NoSession { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Run against the seeded fixture backend instead of the network.
    #[serde(default)]
    pub fixtures: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
            fixtures: false,
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named backend profile.
#[derive(Debug, Deserialize, Serialize)]
pub struct Profile {
    /// Backend root URL including the `/database` segment
    /// (e.g. "https://alerta.example.app/database").
    pub backend: String,

    /// Wire contract the backend speaks: "nested" (current) or "legacy".
    #[serde(default = "default_contract")]
    pub contract: String,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout.
    pub timeout: Option<u64>,

    /// Override fixture mode.
    pub fixtures: Option<bool>,
}

fn default_contract() -> String {
    "nested".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("br", "alerta-conecta", "alerta").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("alerta");
    p
}

// ── Config loading / saving ─────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("ALERTA_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Session token persistence ───────────────────────────────────────
//
// The bearer token from a successful login is kept in the system
// keyring, scoped per profile, so the user stays signed in between
// invocations.

fn token_entry(profile_name: &str) -> Result<keyring::Entry, ConfigError> {
    Ok(keyring::Entry::new(
        "alerta",
        &format!("{profile_name}/session-token"),
    )?)
}

/// Persist the session token for a profile.
pub fn store_token(profile_name: &str, token: &str) -> Result<(), ConfigError> {
    token_entry(profile_name)?.set_password(token)?;
    Ok(())
}

/// Load the stored session token, if any.
pub fn load_token(profile_name: &str) -> Option<String> {
    token_entry(profile_name).ok()?.get_password().ok()
}

/// Drop the stored session token (logout).
pub fn clear_token(profile_name: &str) -> Result<(), ConfigError> {
    match token_entry(profile_name)?.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

// ── Profile resolution ──────────────────────────────────────────────

/// Build a `StoreConfig` from a profile — no CLI flag overrides.
pub fn profile_to_store_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<StoreConfig, ConfigError> {
    let url: url::Url = profile.backend.parse().map_err(|_| ConfigError::Validation {
        field: "backend".into(),
        reason: format!("invalid URL: {}", profile.backend),
    })?;

    let contract =
        BackendContract::from_config(&profile.contract).ok_or_else(|| ConfigError::Validation {
            field: "contract".into(),
            reason: format!("expected 'nested' or 'legacy', got '{}'", profile.contract),
        })?;

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else {
        TlsVerification::SystemDefaults
    };

    Ok(StoreConfig {
        url,
        contract,
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        fixtures: profile.fixtures.unwrap_or(defaults.fixtures),
        token: load_token(profile_name),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_a_default_profile_name() {
        let cfg = Config::default();
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert_eq!(cfg.defaults.timeout, 30);
        assert!(!cfg.defaults.fixtures);
    }

    #[test]
    fn profile_toml_round_trip() {
        let toml_str = r#"
            default_profile = "staging"

            [defaults]
            timeout = 10

            [profiles.staging]
            backend = "https://staging.example.app/database"
            contract = "legacy"
            fixtures = true
        "#;
        let cfg: Config = toml::from_str(toml_str).unwrap();
        let profile = &cfg.profiles["staging"];
        assert_eq!(profile.contract, "legacy");

        let store = profile_to_store_config(profile, "staging", &cfg.defaults).unwrap();
        assert_eq!(store.contract, BackendContract::LegacyFlat);
        assert_eq!(store.timeout, Duration::from_secs(10));
        assert!(store.fixtures);
    }

    #[test]
    fn invalid_backend_url_is_a_validation_error() {
        let profile = Profile {
            backend: "not a url".into(),
            contract: "nested".into(),
            insecure: None,
            timeout: None,
            fixtures: None,
        };
        let err = profile_to_store_config(&profile, "p", &Defaults::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { field, .. } if field == "backend"));
    }

    #[test]
    fn unknown_contract_is_a_validation_error() {
        let profile = Profile {
            backend: "https://example.app/database".into(),
            contract: "graphql".into(),
            insecure: None,
            timeout: None,
            fixtures: None,
        };
        let err = profile_to_store_config(&profile, "p", &Defaults::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { field, .. } if field == "contract"));
    }
}
