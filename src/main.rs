use anyhow::Result;

use bias_scorer::cli::{Cli, Command};
use bias_scorer::config::AppConfig;
use bias_scorer::{handle_import, handle_score, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let cli = interpret();
    let mut config = AppConfig::new();
    cli.apply_overrides(&mut config);
    execute_command(&cli, config)
}

fn execute_command(cli: &Cli, config: AppConfig) -> Result<()> {
    match &cli.command {
        Command::Import { path } => handle_import(config, path),
        Command::Score { user, items, top } => handle_score(&config, *user, items, *top),
    }
}
