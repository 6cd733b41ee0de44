//! Command dispatch for the `stockledger` binary.

use clap::Parser;
use tracing::debug;

use super::command::{Cli, Commands, ConfigCommand};
use super::output::{self, OutputConfig};
use super::{add, config, delete, diagnostic, edit, list, preview, session, show, summary};
use crate::error::Result;
use crate::infrastructure::config::logging::LoggingConfig;
use crate::infrastructure::config::settings::Config;

/// Parse the command line, run the command and return the exit code.
pub async fn main() -> i32 {
    let _ = dotenvy::dotenv();
    execute(Cli::parse()).await
}

/// Run a parsed command line and return the exit code.
pub async fn execute(cli: Cli) -> i32 {
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose), &cli.color);
    let config_path = cli.config_path();

    let result = dispatch(&cli).await;
    match result {
        Ok(()) => 0,
        Err(err) => {
            debug!(error = %err, "Command failed");
            if output::is_json() {
                output::error(&err.to_string());
            } else {
                eprintln!("{:?}", diagnostic::report(err, &config_path));
            }
            1
        }
    }
}

async fn dispatch(cli: &Cli) -> Result<()> {
    if let Commands::Config(ConfigCommand::Init(args)) = &cli.command {
        init_logging(&LoggingConfig::default(), cli.verbose);
        let path = args.path.clone().unwrap_or_else(|| cli.config_path());
        return config::execute_init(&path, args.force);
    }

    let config_path = cli.config_path();
    let loaded = session::load_config(&config_path);
    let logging = loaded
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    init_logging(&logging, cli.verbose);

    match &cli.command {
        Commands::Config(ConfigCommand::Validate) => config::execute_validate(&config_path),
        Commands::Config(ConfigCommand::Show) => config::execute_show(&config_path),
        Commands::Preview(args) => preview::execute(args),
        command => {
            let config = loaded?;
            run_ledger_command(&config, command).await
        }
    }
}

async fn run_ledger_command(config: &Config, command: &Commands) -> Result<()> {
    debug!(store = %config.store.url, "Running ledger command");
    match command {
        Commands::List(args) => list::execute(config, args).await,
        Commands::Summary(args) => summary::execute(config, args).await,
        Commands::Show(args) => show::execute(config, args).await,
        Commands::Add(args) => add::execute(config, args).await,
        Commands::Edit(args) => edit::execute(config, args).await,
        Commands::Delete(args) => delete::execute(config, args).await,
        Commands::Preview(_) | Commands::Config(_) => Ok(()),
    }
}

fn init_logging(logging: &LoggingConfig, verbose: u8) {
    logging.init_with_level(&logging.effective_level(verbose));
}
