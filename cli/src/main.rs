mod commands;

use anyhow::Result;
use clap::{CommandFactory, FromArgMatches};
use commands::{handle_dump, handle_get, Cli, Commands};
use keypath::{default_candidates, ConfigBuilder};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cmd = Cli::command();
    let matches = cmd.clone().get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    let builder = match &cli.config {
        Some(path) => ConfigBuilder::new().with_file(path),
        None => ConfigBuilder::new().with_candidates(default_candidates()),
    };
    let builder = match &cli.env_prefix {
        Some(prefix) => builder.with_env_prefix(prefix),
        None => builder.with_env(),
    };
    // our own flags overlay the tree too, like any registered flag
    let config = builder.with_flags(&cmd, &matches).build()?;

    match cli.command {
        Commands::Get { key, default, output } => {
            handle_get(&config, &key, output, default.as_deref())?;
        }
        Commands::Dump => {
            handle_dump(&config)?;
        }
    }

    Ok(())
}
