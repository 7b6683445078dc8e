//! Stream-wide aggregate over every record.

use leaderboard_db::Records;
use serde::Serialize;

use crate::pricing::round_cents;
use crate::totals::monetary_total_of;

pub const DEFAULT_SUB_GOAL: u32 = 20;

/// Stream-wide totals. Never persisted; rebuilt by [`fold_grand_totals`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GrandTotals {
    pub total_monetary: f64,
    pub total_resubs_value: f64,
    pub total_gifted_subs_value: f64,
    pub total_donos: f64,
    pub total_bits_value: f64,
    pub total_bits_amount: i64,
    /// Active resubs plus every gifted sub.
    pub total_subs_count: i64,
    pub total_gifted_subs_count: i64,
    /// Users with an active resub, not weighted by tier.
    pub total_resubs_count: i64,
    pub total_tier1: i64,
    pub total_tier2: i64,
    pub total_tier3: i64,
}

/// Progress of the effective sub count toward the stream goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GoalProgress {
    pub current: i64,
    pub goal: u32,
    pub reached: bool,
    /// Subs still needed; 0 once reached.
    pub remaining: i64,
}

/// Fold all records into fresh totals.
///
/// Per-user totals come from the raw money fields, so a stale stored
/// `monetary_total` cannot leak into the aggregate.
pub fn fold_grand_totals(records: &Records) -> GrandTotals {
    let mut totals = GrandTotals::default();

    for record in records.values() {
        let active_resub = i64::from(record.has_active_resub());

        totals.total_monetary += monetary_total_of(record);
        totals.total_resubs_value += record.resub_total;
        totals.total_gifted_subs_value += record.gifted_subs_total;
        totals.total_donos += record.donos;
        totals.total_bits_value += record.bits_total;
        totals.total_bits_amount += record.num_bits;
        totals.total_subs_count += active_resub + record.gifted_subs_count;
        totals.total_gifted_subs_count += record.gifted_subs_count;
        totals.total_resubs_count += active_resub;
        totals.total_tier1 += record.tier1;
        totals.total_tier2 += record.tier2;
        totals.total_tier3 += record.tier3;
    }

    totals.total_monetary = round_cents(totals.total_monetary);
    totals.total_resubs_value = round_cents(totals.total_resubs_value);
    totals.total_gifted_subs_value = round_cents(totals.total_gifted_subs_value);
    totals.total_donos = round_cents(totals.total_donos);
    totals.total_bits_value = round_cents(totals.total_bits_value);
    totals
}

pub fn goal_progress(totals: &GrandTotals, goal: u32) -> GoalProgress {
    let current = totals.total_subs_count;
    let reached = current >= i64::from(goal);
    GoalProgress {
        current,
        goal,
        reached,
        remaining: if reached { 0 } else { i64::from(goal) - current },
    }
}
