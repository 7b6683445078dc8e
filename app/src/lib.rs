//! Song bump calculator: a single-operator leaderboard of viewer contributions.

pub mod cli;
pub mod commands;
pub mod config;
mod render;

use cli::Cli;
use commands::CommandStatus;
use config::AppConfig;

/// Resolve configuration, then run the requested command against stdout.
pub fn run(cli: Cli) -> anyhow::Result<CommandStatus> {
    config::load_dotenv();

    let mut config = AppConfig::load();
    if let Some(path) = &cli.data_file {
        config.set_data_path(path);
    }
    if let Some(goal) = cli.sub_goal {
        config.sub_goal = goal;
    }
    if let Some(policy) = cli.overdraw {
        config.overdraw_policy = policy;
    }
    tracing::debug!(
        path = %config.data_path().display(),
        policy = %config.overdraw_policy,
        "Configuration resolved"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::execute(cli.command, &config, &mut out)
}
