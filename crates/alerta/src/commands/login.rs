//! Session commands: login and logout.

use secrecy::SecretString;

use crate::cli::{GlobalOpts, LoginArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

/// Sign in against the backend and persist the session token.
pub async fn handle(args: LoginArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let store_config = config::resolve_store_config(global)?;

    if store_config.fixtures {
        output::print_output("Fixture mode is offline; no login required.", global.quiet);
        return Ok(());
    }

    let password = read_password()?;
    let user = alerta_core::auth::login(&store_config, &args.cpf, &password)
        .await
        .map_err(CliError::from_core)?;

    let profile_name = config::active_profile_name(global, &config::load_config_or_default());
    match user.token {
        Some(ref token) => alerta_config::store_token(&profile_name, token)?,
        None => tracing::warn!("backend sent no session token; next call may need a re-login"),
    }

    let role = user.role.as_deref().unwrap_or("responder");
    output::print_output(&format!("Signed in as {} ({role})", user.name), global.quiet);
    Ok(())
}

/// Drop the persisted session token.
pub fn logout(global: &GlobalOpts) -> Result<(), CliError> {
    let profile_name = config::active_profile_name(global, &config::load_config_or_default());
    alerta_config::clear_token(&profile_name)?;
    output::print_output("Signed out.", global.quiet);
    Ok(())
}

/// Read the password from `ALERTA_PASSWORD` (scripts) or an interactive
/// prompt.
fn read_password() -> Result<SecretString, CliError> {
    if let Ok(password) = std::env::var("ALERTA_PASSWORD") {
        return Ok(SecretString::from(password));
    }
    let password = rpassword::prompt_password("Password: ")?;
    Ok(SecretString::from(password))
}
