//! Per-record totals: derived-field recomputation and contribution deltas.

use std::fmt;

use leaderboard_db::{ContributionRecord, Records};

use crate::pricing::{BIT_VALUE, SubTier, round_cents, tier_price};
use crate::rules::is_bumpable;

/// One contribution event as entered by the operator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contribution {
    Resub { tier: SubTier },
    Gifted { count: u32, tier: SubTier },
    Bits { amount: u32 },
    /// Donation in dollars.
    Dono { amount: f64 },
}

impl fmt::Display for Contribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Contribution::Resub { tier } => write!(f, "{tier} resub"),
            Contribution::Gifted { count, tier } => write!(f, "{count} {tier} gifted subs"),
            Contribution::Bits { amount } => write!(f, "{amount} bits"),
            Contribution::Dono { amount } => write!(f, "${amount:.2} donation"),
        }
    }
}

/// Whether a contribution is being added or taken back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
}

impl Operation {
    pub fn sign(self) -> i64 {
        match self {
            Operation::Add => 1,
            Operation::Subtract => -1,
        }
    }
}

/// Result of applying a contribution to a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContributionEffect {
    Applied,
    /// Resub subtract on a record with no active resub; record untouched.
    NoActiveResub,
}

/// Sum of the four money fields, rounded to cents.
pub fn monetary_total_of(record: &ContributionRecord) -> f64 {
    round_cents(record.resub_total + record.gifted_subs_total + record.bits_total + record.donos)
}

/// Refresh `monetary_total` and `bumpable` from the raw counters.
pub fn recompute(record: &mut ContributionRecord) {
    let total = monetary_total_of(record);
    record.monetary_total = total;
    record.bumpable = is_bumpable(record, total);
}

/// Recompute every record. Run before any display or save.
pub fn recompute_all(records: &mut Records) {
    for record in records.values_mut() {
        recompute(record);
    }
}

/// Apply a signed contribution delta in place and recompute the record.
///
/// Gifted, bits and dono deltas are not floored: subtracting more than the
/// record holds drives the counters negative.
pub fn apply_contribution(
    record: &mut ContributionRecord,
    contribution: Contribution,
    operation: Operation,
) -> ContributionEffect {
    let sign = operation.sign();

    let effect = match contribution {
        Contribution::Resub { tier } => match operation {
            Operation::Add => {
                let net = tier.price() - tier_price(record.resub_tier);
                record.resub_total = round_cents(record.resub_total + net);
                record.resub_tier = tier.number();
                ContributionEffect::Applied
            }
            Operation::Subtract => {
                if record.has_active_resub() {
                    record.resub_total =
                        round_cents(record.resub_total - tier_price(record.resub_tier));
                    record.resub_tier = 0;
                    ContributionEffect::Applied
                } else {
                    ContributionEffect::NoActiveResub
                }
            }
        },
        Contribution::Gifted { count, tier } => {
            let delta = sign * i64::from(count);
            if let Some(counter) = record.gifted_at_tier_mut(tier.number()) {
                *counter += delta;
            }
            record.gifted_subs_count += delta;
            record.gifted_subs_total =
                round_cents(record.gifted_subs_total + delta as f64 * tier.price());
            ContributionEffect::Applied
        }
        Contribution::Bits { amount } => {
            let delta = sign * i64::from(amount);
            record.num_bits += delta;
            record.bits_total = round_cents(record.bits_total + round_cents(delta as f64 * BIT_VALUE));
            ContributionEffect::Applied
        }
        Contribution::Dono { amount } => {
            record.donos = round_cents(record.donos + round_cents(sign as f64 * amount));
            ContributionEffect::Applied
        }
    };

    recompute(record);
    effect
}

#[cfg(test)]
#[path = "totals_tests.rs"]
mod tests;
