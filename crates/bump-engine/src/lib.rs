//! Totals engine for the song bump leaderboard.
//!
//! Pure functions over [`leaderboard_db::Records`]: derived-field
//! recomputation, signed contribution deltas, stream-wide aggregation,
//! summaries, and the operator action layer.

pub mod actions;
pub mod grand_totals;
pub mod leaderboard;
pub mod pricing;
pub mod rules;
pub mod summary;
pub mod totals;

pub use actions::{Action, ActionError, ActionOutcome, Change, NoEffect, OverdrawPolicy, apply_action};
pub use grand_totals::{DEFAULT_SUB_GOAL, GoalProgress, GrandTotals, fold_grand_totals, goal_progress};
pub use leaderboard::rank;
pub use pricing::SubTier;
pub use summary::{format_contribution_summary, format_grand_summary};
pub use totals::{
    Contribution, ContributionEffect, Operation, apply_contribution, recompute, recompute_all,
};
