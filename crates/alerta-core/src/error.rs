use thiserror::Error;

/// A required field is missing or malformed.
///
/// Raised by the form layer before any network call is attempted, and
/// surfaced to the user as a field-level message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }

    pub fn required(field: &'static str) -> Self {
        Self::new(field, "required")
    }
}

/// Top-level error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Local validation failure — no network call was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An update referenced an incident the store doesn't hold.
    #[error("incident {id} not found")]
    NotFound { id: i64 },

    /// Submission or fetch failure from the backend, surfaced as-is —
    /// never retried automatically. Carries the raw response body where
    /// one was captured.
    #[error(transparent)]
    Api(#[from] alerta_api::Error),
}

impl CoreError {
    /// Returns `true` if logging in again might resolve this error.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_auth())
    }
}
