mod application;
mod cli;
mod domain;
mod infrastructure;

use clap::Parser;
use std::process::ExitCode;

use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let outcome = cli::execute(cli).await;
    if let Err(e) = &outcome {
        eprintln!("Image processing failed: {:#}", e);
    }
    ExitCode::from(cli::exit_code(&outcome))
}
