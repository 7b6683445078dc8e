use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use bump_calculator_lib::cli::Cli;
use bump_calculator_lib::commands::CommandStatus;

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match bump_calculator_lib::run(cli)? {
        CommandStatus::Done => Ok(ExitCode::SUCCESS),
        CommandStatus::Rejected => Ok(ExitCode::FAILURE),
    }
}
