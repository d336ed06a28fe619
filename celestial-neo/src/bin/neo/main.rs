//! neo: inspect near-Earth objects and query their close approaches.
//!
//! Loads the NEO CSV and close-approach JSON files, links them, and runs a
//! single `inspect` or `query` command against the result.

mod cli;
mod inspect;
mod query;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    match &cli.command {
        Commands::Inspect(args) => inspect::run(args, &cli),
        Commands::Query(args) => query::run(args, &cli),
    }
}
