mod cli;
mod commands;
mod error;
mod logging;
mod metadata;
mod output;

use clap::Parser;

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("error: {error}");
        std::process::exit(i32::from(error.exit_code()));
    }
}

async fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    commands::run(&cli).await
}
