//! Per-user contribution record as persisted in the record file.

use serde::{Deserialize, Serialize};

/// Running contribution totals for one viewer.
///
/// `monetary_total` and `bumpable` are derived fields. They are stored so
/// the file is readable on its own, but they are never trusted on load and
/// must be recomputed before display or save.
///
/// Every field defaults when absent so files written by older versions
/// (which lacked `song_played`) still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContributionRecord {
    pub monetary_total: f64,
    /// Active resub tier, 0 when none.
    pub resub_tier: u8,
    pub resub_total: f64,
    pub tier1: i64,
    pub tier2: i64,
    pub tier3: i64,
    pub gifted_subs_count: i64,
    pub gifted_subs_total: f64,
    pub num_bits: i64,
    pub bits_total: f64,
    pub donos: f64,
    pub bumpable: bool,
    pub song_played: bool,
}

impl Default for ContributionRecord {
    fn default() -> Self {
        Self {
            monetary_total: 0.0,
            resub_tier: 0,
            resub_total: 0.0,
            tier1: 0,
            tier2: 0,
            tier3: 0,
            gifted_subs_count: 0,
            gifted_subs_total: 0.0,
            num_bits: 0,
            bits_total: 0.0,
            donos: 0.0,
            bumpable: false,
            song_played: false,
        }
    }
}

impl ContributionRecord {
    /// A freshly added user: every counter zero, song not played.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_active_resub(&self) -> bool {
        self.resub_tier > 0
    }

    /// Whether the aggregate gifted count still matches the per-tier counters.
    pub fn gifted_count_consistent(&self) -> bool {
        self.per_tier_gifted_total() == Some(self.gifted_subs_count)
    }

    /// Sum of the per-tier gifted counters, `None` on overflow.
    pub fn per_tier_gifted_total(&self) -> Option<i64> {
        self.tier1.checked_add(self.tier2)?.checked_add(self.tier3)
    }

    /// Gifted count held at the given tier (1-3); 0 for anything else.
    pub fn gifted_at_tier(&self, tier: u8) -> i64 {
        match tier {
            1 => self.tier1,
            2 => self.tier2,
            3 => self.tier3,
            _ => 0,
        }
    }

    /// Mutable per-tier gifted counter, `None` for an unknown tier.
    pub fn gifted_at_tier_mut(&mut self, tier: u8) -> Option<&mut i64> {
        match tier {
            1 => Some(&mut self.tier1),
            2 => Some(&mut self.tier2),
            3 => Some(&mut self.tier3),
            _ => None,
        }
    }
}
