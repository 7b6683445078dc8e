//! One command = one load, mutate, recompute-all, save, redisplay cycle.

use std::io::Write;

use anyhow::Context;
use bump_engine::{Action, Operation, apply_action, fold_grand_totals, goal_progress, recompute_all};
use leaderboard_db::{RecordStore, Records};

use crate::cli::Command;
use crate::config::AppConfig;
use crate::config::defaults::setting_defs;
use crate::render;

/// How a command finished, for the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Done,
    /// The action was refused; nothing was saved.
    Rejected,
}

pub fn execute<W: Write>(
    command: Command,
    config: &AppConfig,
    out: &mut W,
) -> anyhow::Result<CommandStatus> {
    let store = RecordStore::open(config.data_path());

    let action = match command {
        Command::List { json, detailed } => {
            let records = load(&store)?;
            if json {
                write_json(&records, config, out)?;
            } else {
                write_board(&records, config, detailed, out)?;
            }
            return Ok(CommandStatus::Done);
        }
        Command::Totals { detailed } => {
            let records = load(&store)?;
            let totals = fold_grand_totals(&records);
            let progress = goal_progress(&totals, config.sub_goal);
            write!(out, "{}", render::grand_totals(&totals, &progress, detailed))?;
            return Ok(CommandStatus::Done);
        }
        Command::Rules => {
            write!(out, "{}", render::rules())?;
            return Ok(CommandStatus::Done);
        }
        Command::Config => {
            write_config(config, out)?;
            return Ok(CommandStatus::Done);
        }
        Command::AddUser { username, initial } => Action::AddUser {
            username,
            initial: initial.map(Into::into),
        },
        Command::Add {
            username,
            contribution,
        } => Action::Contribute {
            username,
            contribution: contribution.into(),
            operation: Operation::Add,
        },
        Command::Subtract {
            username,
            contribution,
        } => Action::Contribute {
            username,
            contribution: contribution.into(),
            operation: Operation::Subtract,
        },
        Command::Song { username, played } => Action::SetSongPlayed { username, played },
        Command::Delete { username } => Action::DeleteUser { username },
        Command::Clear { yes } => Action::ClearAll { confirmed: yes },
    };

    run_action(&store, action, config, out)
}

fn run_action<W: Write>(
    store: &RecordStore,
    action: Action,
    config: &AppConfig,
    out: &mut W,
) -> anyhow::Result<CommandStatus> {
    let mut records = load(store)?;
    let hint_add = matches!(action, Action::AddUser { initial: None, .. });

    let outcome = match apply_action(&mut records, action, config.overdraw_policy) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!(error = %e, "Action rejected");
            writeln!(out, "{e}")?;
            return Ok(CommandStatus::Rejected);
        }
    };

    if outcome.is_applied() {
        recompute_all(&mut records);
        store
            .save(&records)
            .with_context(|| format!("failed to save {}", store.path().display()))?;
    }

    writeln!(out, "{outcome}")?;
    if hint_add && outcome.is_applied() {
        writeln!(out, "Now enter their contributions with `add <USERNAME> <resub|gifted|bits|dono>`.")?;
    }
    writeln!(out)?;
    write_board(&records, config, false, out)?;
    Ok(CommandStatus::Done)
}

/// Load and run the recompute-all pass every read goes through.
fn load(store: &RecordStore) -> anyhow::Result<Records> {
    let mut records = store
        .load()
        .with_context(|| format!("failed to load {}", store.path().display()))?;
    recompute_all(&mut records);
    Ok(records)
}

fn write_board<W: Write>(
    records: &Records,
    config: &AppConfig,
    detailed: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    write!(out, "{}", render::leaderboard(records, config.name_display_max))?;
    if !records.is_empty() {
        let totals = fold_grand_totals(records);
        let progress = goal_progress(&totals, config.sub_goal);
        writeln!(out)?;
        write!(out, "{}", render::grand_totals(&totals, &progress, detailed))?;
    }
    Ok(())
}

fn write_json<W: Write>(records: &Records, config: &AppConfig, out: &mut W) -> anyhow::Result<()> {
    let totals = fold_grand_totals(records);
    let progress = goal_progress(&totals, config.sub_goal);
    serde_json::to_writer_pretty(&mut *out, &render::snapshot(records, &totals, &progress))?;
    writeln!(out)?;
    Ok(())
}

fn write_config<W: Write>(config: &AppConfig, out: &mut W) -> anyhow::Result<()> {
    writeln!(out, "Record file: {}", config.data_path().display())?;
    writeln!(out, "Sub goal: {}", config.sub_goal)?;
    writeln!(out, "Overdraw policy: {}", config.overdraw_policy)?;
    writeln!(out, "Name display max: {}", config.name_display_max)?;
    writeln!(out, "\nEnvironment settings:")?;
    for def in setting_defs() {
        writeln!(out, "  {} (default {:?}): {}", def.key, def.default, def.description)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
