//! Subscription tiers, their prices, and cent rounding.

use std::fmt;
use std::str::FromStr;


pub const TIER1_PRICE: f64 = 5.99;
pub const TIER2_PRICE: f64 = 9.99;
pub const TIER3_PRICE: f64 = 24.99;
/// Dollar value of a single bit.
pub const BIT_VALUE: f64 = 0.01;

/// A Twitch subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SubTier {
    Tier1,
    Tier2,
    Tier3,
}

impl SubTier {
    pub fn number(self) -> u8 {
        match self {
            SubTier::Tier1 => 1,
            SubTier::Tier2 => 2,
            SubTier::Tier3 => 3,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(SubTier::Tier1),
            2 => Some(SubTier::Tier2),
            3 => Some(SubTier::Tier3),
            _ => None,
        }
    }

    pub fn price(self) -> f64 {
        match self {
            SubTier::Tier1 => TIER1_PRICE,
            SubTier::Tier2 => TIER2_PRICE,
            SubTier::Tier3 => TIER3_PRICE,
        }
    }
}

impl fmt::Display for SubTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tier {}", self.number())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid tier '{0}' (expected 1, 2 or 3)")]
pub struct ParseTierError(String);

impl FromStr for SubTier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("tier")
            .or_else(|| trimmed.strip_prefix("Tier"))
            .unwrap_or(trimmed)
            .trim();
        digits
            .parse::<u8>()
            .ok()
            .and_then(SubTier::from_number)
            .ok_or_else(|| ParseTierError(s.to_string()))
    }
}

/// Price of a stored resub tier; 0 for inactive (0) or unknown tiers.
pub fn tier_price(tier: u8) -> f64 {
    SubTier::from_number(tier).map_or(0.0, SubTier::price)
}

/// Round a dollar amount to whole cents.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
