use std::process::ExitCode;

use clap::Parser;
use rag_console::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    cli::run(cli).await
}
