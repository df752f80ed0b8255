//! guidegen CLI — documentation corpus aggregation tool.
//!
//! Walks a hierarchical guide corpus and generates cross-referenced index
//! reports plus a flat, fulltext-searchable record set.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
