mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Auth commands manage the session themselves
        Command::Login(args) => commands::login::handle(args, &cli.global).await,
        Command::Logout => commands::login::logout(&cli.global),

        // Catalog listing needs no backend at all
        Command::Types => commands::incidents::types(&cli.global),

        // Everything else goes through the injected store, chosen once here
        cmd => {
            let store_config = config::resolve_store_config(&cli.global)?;
            let store = alerta_core::build_store(&store_config).map_err(CliError::from_core)?;

            tracing::debug!(backend = store.backend_tag(), "data-access layer ready");
            commands::dispatch(cmd, store.as_ref(), &cli.global).await
        }
    }
}
