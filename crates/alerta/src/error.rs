//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable
//! help text, and carries the backend's raw failure body when one was
//! captured.

use miette::Diagnostic;
use thiserror::Error;

use alerta_core::{ApiError, CoreError};

/// Exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const VALIDATION: i32 = 5;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the incident backend")]
    #[diagnostic(
        code(alerta::connection_failed),
        help(
            "Check your network connection and the backend URL in your profile.\n\
             For offline work, re-run with --fixtures."
        )
    )]
    ConnectionFailed {
        #[source]
        source: alerta_core::CoreError,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(alerta::auth_failed),
        help("Check your CPF and password, then run: alerta login <cpf>")
    )]
    AuthFailed { message: String },

    #[error("No active session")]
    #[diagnostic(
        code(alerta::session_required),
        help("Sign in first: alerta login <cpf>")
    )]
    SessionRequired,

    // ── Resources ────────────────────────────────────────────────────
    #[error("Incident {id} not found")]
    #[diagnostic(code(alerta::not_found), help("Run: alerta list"))]
    NotFound { id: i64 },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(alerta::validation))]
    Validation { field: String, reason: String },

    // ── Backend ──────────────────────────────────────────────────────
    /// Non-2xx from the backend. The body is shown verbatim because the
    /// backend mixes JSON and plain-text failures.
    #[error("Backend rejected the request (HTTP {status}): {body}")]
    #[diagnostic(
        code(alerta::backend),
        help("The request was not retried. Fix the reported problem and try again.")
    )]
    Backend { status: u16, body: String },

    #[error("Backend sent an undecodable response: {message}")]
    #[diagnostic(code(alerta::bad_response))]
    BadResponse { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(alerta::profile_not_found),
        help("Available profiles: {available}")
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No backend configured")]
    #[diagnostic(
        code(alerta::no_backend),
        help(
            "Set one with --backend <url>, the ALERTA_BACKEND variable,\n\
             or a profile in {path} -- or run offline with --fixtures."
        )
    )]
    NoBackend { path: String },

    #[error(transparent)]
    #[diagnostic(code(alerta::config))]
    Config(#[from] alerta_config::ConfigError),

    // ── IO ───────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    #[diagnostic(code(alerta::io))]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Translate a core-layer error into the matching user-facing variant.
    pub fn from_core(err: CoreError) -> Self {
        match err {
            CoreError::Validation(v) => Self::Validation {
                field: v.field.to_owned(),
                reason: v.reason,
            },
            CoreError::NotFound { id } => Self::NotFound { id },
            CoreError::Api(api) => match api {
                ApiError::Authentication { message } => Self::AuthFailed { message },
                ApiError::SessionExpired => Self::SessionRequired,
                ApiError::Api { status, body } => Self::Backend { status, body },
                ApiError::Deserialization { message, .. } => Self::BadResponse { message },
                transport @ (ApiError::Transport(_)
                | ApiError::InvalidUrl(_)
                | ApiError::Tls(_)) => Self::ConnectionFailed {
                    source: CoreError::Api(transport),
                },
            },
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::AuthFailed { .. } | Self::SessionRequired => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::VALIDATION,
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            _ => exit_code::GENERAL,
        }
    }
}
