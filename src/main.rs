//! retext CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use retext::cli::{
    app::{config_store, run_listener, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("retext=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let presenter = Presenter::new();

    match cli.command {
        Some(Commands::Config { action }) => {
            let store = config_store(cli.config);
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e);
                return ExitCode::from(EXIT_USAGE_ERROR);
            }
            ExitCode::SUCCESS
        }
        None => run_listener(cli.config).await,
    }
}
