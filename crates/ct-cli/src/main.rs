use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use ct_cli::commands;
use ct_cli::prompt::Prompter;
use ct_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so they never interleave with prompts.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match &cli.command {
        Some(Commands::Track(args)) => {
            let config = load_config(&cli)?;
            let stdin = io::stdin().lock();
            let stdout = io::stdout().lock();
            let mut prompter = Prompter::new(stdin, stdout);
            commands::track::run(&mut prompter, &config, args)?;
        }
        Some(Commands::Config) => {
            let config = load_config(&cli)?;
            commands::config::run(&mut io::stdout().lock(), &config)?;
        }
        None => {
            Cli::command().print_help()?;
            io::stdout().flush()?;
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}
