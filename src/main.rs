mod cli;
mod commands;
mod error;
mod filename;
mod pdf;
mod sections;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if cli.list {
        return commands::outline::run(&cli.input);
    }

    let options = commands::split::SplitOptions {
        max_depth: cli.max_depth,
        dry_run: cli.dry_run,
        json: cli.json,
    };
    commands::split::run(&cli.input, cli.output_dir(), &options)?;

    Ok(())
}
