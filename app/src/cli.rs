//! Command-line interface definition.

use std::path::PathBuf;

use bump_engine::{Contribution, OverdrawPolicy, SubTier};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "bump-calculator", version, about = "Twitch song bump calculator")]
pub struct Cli {
    /// Record file to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Stream subscriber goal
    #[arg(
        long,
        global = true,
        value_name = "N",
        value_parser = clap::value_parser!(u32).range(1..=100_000)
    )]
    pub sub_goal: Option<u32>,

    /// What to do when subtracting more than is recorded (reject, clamp, allow)
    #[arg(long, global = true, value_name = "POLICY")]
    pub overdraw: Option<OverdrawPolicy>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the leaderboard and grand totals
    List {
        /// Print machine-readable JSON instead of text
        #[arg(long)]
        json: bool,
        /// Include the detailed revenue breakdown
        #[arg(long)]
        detailed: bool,
    },
    /// Add a new user, optionally with an initial contribution
    AddUser {
        username: String,
        #[command(subcommand)]
        initial: Option<ContributionArg>,
    },
    /// Add a contribution to an existing user
    Add {
        username: String,
        #[command(subcommand)]
        contribution: ContributionArg,
    },
    /// Subtract a contribution from an existing user (resub removes the active tier)
    Subtract {
        username: String,
        #[command(subcommand)]
        contribution: ContributionArg,
    },
    /// Set the song played status, or toggle it when --played is omitted
    Song {
        username: String,
        #[arg(long)]
        played: Option<bool>,
    },
    /// Delete a user
    Delete { username: String },
    /// Delete every user
    Clear {
        /// Confirm permanent deletion of all users
        #[arg(long)]
        yes: bool,
    },
    /// Show the grand totals only
    Totals {
        #[arg(long)]
        detailed: bool,
    },
    /// Show the song bump rules
    Rules,
    /// Show the resolved configuration
    Config,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ContributionArg {
    /// Resub at a tier (replaces any active resub)
    Resub {
        #[arg(long, default_value = "1")]
        tier: SubTier,
    },
    /// Gifted subs
    Gifted {
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        count: u32,
        #[arg(long, default_value = "1")]
        tier: SubTier,
    },
    /// Bits
    Bits {
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        amount: u32,
    },
    /// Donation in dollars
    Dono { amount: f64 },
}

impl From<ContributionArg> for Contribution {
    fn from(arg: ContributionArg) -> Self {
        match arg {
            ContributionArg::Resub { tier } => Contribution::Resub { tier },
            ContributionArg::Gifted { count, tier } => Contribution::Gifted { count, tier },
            ContributionArg::Bits { amount } => Contribution::Bits { amount },
            ContributionArg::Dono { amount } => Contribution::Dono { amount },
        }
    }
}
