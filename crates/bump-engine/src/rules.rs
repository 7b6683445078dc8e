//! Bump eligibility thresholds.
//!
//! A viewer is bumpable when ANY single threshold is met.

use leaderboard_db::ContributionRecord;

use crate::pricing::TIER1_PRICE;

pub const MIN_BITS: i64 = 500;
pub const MIN_RESUB_TIER: u8 = 2;
pub const MIN_GIFTED_COUNT: i64 = 2;
pub const MIN_DONOS: f64 = 5.0;
pub const MIN_TIER2_GIFTED: i64 = 1;
pub const MIN_TIER3_GIFTED: i64 = 1;
/// Total must be strictly above this, i.e. more than one tier-1 sub.
pub const TOTAL_ABOVE: f64 = TIER1_PRICE;

/// Operator-facing description of each rule, in display order.
pub const BUMP_RULES: &[&str] = &[
    "Tier 2 Resub or Tier 3 Resub is active.",
    "Total Contributions exceed $5.99 (more than a Tier 1 Sub).",
    "Bits total 500 or more.",
    "Donations total $5.00 or more.",
    "Gifted Subs Count is 2 or more (at any tier).",
    "Gifted Tier 2 subs total 1 or more.",
    "Gifted Tier 3 subs total 1 or more.",
];

/// Evaluate the bump rule against a record, using `monetary_total` as given.
pub fn is_bumpable(record: &ContributionRecord, monetary_total: f64) -> bool {
    record.num_bits >= MIN_BITS
        || record.resub_tier >= MIN_RESUB_TIER
        || record.gifted_subs_count >= MIN_GIFTED_COUNT
        || record.donos >= MIN_DONOS
        || record.tier2 >= MIN_TIER2_GIFTED
        || record.tier3 >= MIN_TIER3_GIFTED
        || monetary_total > TOTAL_ABOVE
}
