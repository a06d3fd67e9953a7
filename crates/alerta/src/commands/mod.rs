//! Command dispatch: bridges CLI args -> core logic -> output formatting.

pub mod incidents;
pub mod login;

use alerta_core::IncidentStore;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a store-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    store: &dyn IncidentStore,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::List(args) => incidents::list(store, args, global).await,
        Command::Show { id } => incidents::show(store, id, global).await,
        Command::Report(args) => incidents::report(store, args, global).await,
        Command::Update(args) => incidents::update(store, args, global).await,
        // Login, Logout, and Types are handled before dispatch
        Command::Login(_) | Command::Logout | Command::Types => unreachable!(),
    }
}
