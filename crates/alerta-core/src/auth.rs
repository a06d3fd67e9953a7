// ── Authentication facade ──
//
// Thin wrapper over the backend's login route. Session state itself
// (token persistence, current-user display) belongs to the caller; this
// just performs the exchange and normalizes the user record.

use secrecy::SecretString;

use alerta_api::IncidentClient;

use crate::config::StoreConfig;
use crate::error::CoreError;

/// Authenticated responder account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub email: Option<String>,
    pub role: Option<String>,
    pub cpf: Option<String>,
    /// Session token to persist for subsequent calls.
    pub token: Option<String>,
}

/// Log in with CPF + password against the configured backend.
pub async fn login(
    config: &StoreConfig,
    cpf: &str,
    password: &SecretString,
) -> Result<User, CoreError> {
    let client = IncidentClient::new(config.url.clone(), config.contract, &config.transport())?;
    let record = client.login(cpf, password).await?;
    Ok(User {
        name: record.name,
        email: record.email,
        role: record.role,
        cpf: record.cpf,
        token: record.token,
    })
}
