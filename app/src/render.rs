//! Terminal rendering of the leaderboard and totals.

use std::fmt::Write as _;

use bump_engine::rules::BUMP_RULES;
use bump_engine::summary::group_thousands;
use bump_engine::{GoalProgress, GrandTotals, format_contribution_summary, format_grand_summary, rank};
use leaderboard_db::{ContributionRecord, Records};
use serde::Serialize;

pub const EMPTY_LEADERBOARD: &str = "No contributions yet. Beeg Sadge :(";

/// Shorten long usernames: anything over `max` chars keeps `max - 3` plus "...".
pub fn display_name(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        return name.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut short: String = name.chars().take(keep).collect();
    short.push_str("...");
    short
}

pub fn leaderboard(records: &Records, name_max: usize) -> String {
    if records.is_empty() {
        return format!("{EMPTY_LEADERBOARD}\n");
    }

    let mut out = String::from("Leaderboard\n");
    for (i, (name, record)) in rank(records).into_iter().enumerate() {
        let status = if record.bumpable {
            "Bumpable 🟢"
        } else {
            "Not Bumpable 🔴"
        };
        let _ = writeln!(
            out,
            "{:>2}. {} | Total: ${:.2} | {status}",
            i + 1,
            display_name(name, name_max),
            record.monetary_total
        );
        if record.bumpable {
            let played = if record.song_played { "✅" } else { "❌" };
            let _ = writeln!(out, "    Song Played Status: {played}");
        }
        let _ = writeln!(out, "    {}", format_contribution_summary(record));
    }
    out
}

pub fn grand_totals(totals: &GrandTotals, progress: &GoalProgress, detailed: bool) -> String {
    let goal_line = if progress.reached {
        "Stream Sub Goal Reached! 🎉".to_string()
    } else {
        format!("Need {} more!", progress.remaining)
    };

    let mut out = String::from("Grand Totals\n");
    let _ = writeln!(
        out,
        "Total value: ${:.2} | Subs: {}/{} - {goal_line}",
        totals.total_monetary, progress.current, progress.goal
    );
    let _ = writeln!(out, "{}", format_grand_summary(totals));

    if detailed {
        out.push_str("\nDetailed Revenue Breakdown\n");
        let _ = writeln!(out, "  * Total Resubs (Value): ${:.2}", totals.total_resubs_value);
        let _ = writeln!(out, "  * Total Gifted Subs (Value): ${:.2}", totals.total_gifted_subs_value);
        let _ = writeln!(out, "  * Total Donations: ${:.2}", totals.total_donos);
        let _ = writeln!(out, "  * Total Bits (Amount): {}", group_thousands(totals.total_bits_amount));
        out.push_str("  ---\n");
        let _ = writeln!(out, "  * Tier 1 Subs Gifted: {}", totals.total_tier1);
        let _ = writeln!(out, "  * Tier 2 Subs Gifted: {}", totals.total_tier2);
        let _ = writeln!(out, "  * Tier 3 Subs Gifted: {}", totals.total_tier3);
    }
    out
}

pub fn rules() -> String {
    let mut out = String::from(
        "A user is considered Bumpable (🟢) if they meet ANY of the following contribution thresholds:\n",
    );
    for rule in BUMP_RULES {
        let _ = writeln!(out, "  * {rule}");
    }
    out
}

#[derive(Debug, Serialize)]
pub struct LeaderboardEntry<'a> {
    pub rank: usize,
    pub username: &'a str,
    #[serde(flatten)]
    pub record: &'a ContributionRecord,
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub leaderboard: Vec<LeaderboardEntry<'a>>,
    pub grand_totals: &'a GrandTotals,
    pub goal: &'a GoalProgress,
    pub grand_summary: String,
}

pub fn snapshot<'a>(
    records: &'a Records,
    totals: &'a GrandTotals,
    progress: &'a GoalProgress,
) -> Snapshot<'a> {
    let leaderboard = rank(records)
        .into_iter()
        .enumerate()
        .map(|(i, (username, record))| LeaderboardEntry {
            rank: i + 1,
            username,
            record,
            summary: format_contribution_summary(record),
        })
        .collect();
    Snapshot {
        leaderboard,
        grand_totals: totals,
        goal: progress,
        grand_summary: format_grand_summary(totals),
    }
}
