//! Operator actions over the whole record set, with typed outcomes.
//!
//! Each action either applies a [`Change`], reports [`NoEffect`], or is
//! rejected with an [`ActionError`]. Rejections never modify the records.

use std::fmt;
use std::str::FromStr;

use leaderboard_db::{ContributionRecord, Records};

use crate::pricing::{SubTier, round_cents};
use crate::totals::{Contribution, ContributionEffect, Operation, apply_contribution};

/// An operator request against the leaderboard.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddUser {
        username: String,
        initial: Option<Contribution>,
    },
    Contribute {
        username: String,
        contribution: Contribution,
        operation: Operation,
    },
    /// `played: None` toggles the current status.
    SetSongPlayed {
        username: String,
        played: Option<bool>,
    },
    DeleteUser {
        username: String,
    },
    ClearAll {
        confirmed: bool,
    },
}

/// What to do when a subtract asks for more gifted subs, bits or donation
/// than the record holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverdrawPolicy {
    /// Refuse the subtract.
    #[default]
    Reject,
    /// Subtract only what is recorded.
    Clamp,
    /// Subtract anyway; counters may go negative.
    Allow,
}

impl OverdrawPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            OverdrawPolicy::Reject => "reject",
            OverdrawPolicy::Clamp => "clamp",
            OverdrawPolicy::Allow => "allow",
        }
    }
}

impl fmt::Display for OverdrawPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverdrawPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(OverdrawPolicy::Reject),
            "clamp" => Ok(OverdrawPolicy::Clamp),
            "allow" => Ok(OverdrawPolicy::Allow),
            _ => Err("must be 'reject', 'clamp', or 'allow'".into()),
        }
    }
}

/// A successfully applied state change.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    UserAdded {
        username: String,
        initial: Option<Contribution>,
    },
    ResubUpdated {
        username: String,
        from: u8,
        to: SubTier,
    },
    ResubRemoved {
        username: String,
        tier: u8,
    },
    Contributed {
        username: String,
        contribution: Contribution,
        operation: Operation,
        /// The subtract was reduced to what the record held.
        clamped: bool,
    },
    SongPlayedSet {
        username: String,
        played: bool,
    },
    UserDeleted {
        username: String,
    },
    Cleared {
        count: usize,
    },
}

/// An accepted action that left the records untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum NoEffect {
    NoActiveResub { username: String },
    SongStatusUnchanged { username: String, played: bool },
    NothingToClear,
    /// Clamped subtract on a counter already at zero.
    ClampedToZero { username: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Applied(Change),
    NoEffect(NoEffect),
}

impl ActionOutcome {
    /// Whether the records changed and need saving.
    pub fn is_applied(&self) -> bool {
        matches!(self, ActionOutcome::Applied(_))
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ActionError {
    #[error("{0} already exists.")]
    DuplicateUser(String),

    #[error("No user named {0}.")]
    UnknownUser(String),

    #[error("Username must not be empty.")]
    EmptyUsername,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Cannot subtract {requested} from {username}: only {available} recorded.")]
    Overdraw {
        username: String,
        requested: String,
        available: String,
    },

    #[error("Please confirm before clearing all users.")]
    ClearNotConfirmed,
}

/// Apply one action to the records.
///
/// Touched records are recomputed before returning; the caller still runs
/// a full recompute before display or save.
pub fn apply_action(
    records: &mut Records,
    action: Action,
    policy: OverdrawPolicy,
) -> Result<ActionOutcome, ActionError> {
    match action {
        Action::AddUser { username, initial } => add_user(records, &username, initial),
        Action::Contribute {
            username,
            contribution,
            operation,
        } => contribute(records, &username, contribution, operation, policy),
        Action::SetSongPlayed { username, played } => set_song_played(records, &username, played),
        Action::DeleteUser { username } => {
            let username = resolve_username(records, &username)?;
            records.remove(&username);
            tracing::info!(username = %username, "User deleted");
            Ok(ActionOutcome::Applied(Change::UserDeleted { username }))
        }
        Action::ClearAll { confirmed } => {
            if !confirmed {
                return Err(ActionError::ClearNotConfirmed);
            }
            if records.is_empty() {
                return Ok(ActionOutcome::NoEffect(NoEffect::NothingToClear));
            }
            let count = records.len();
            records.clear();
            tracing::info!(count, "All users cleared");
            Ok(ActionOutcome::Applied(Change::Cleared { count }))
        }
    }
}

fn add_user(
    records: &mut Records,
    username: &str,
    initial: Option<Contribution>,
) -> Result<ActionOutcome, ActionError> {
    let username = normalize_username(username)?;
    if let Some(existing) = find_key(records, &username) {
        return Err(ActionError::DuplicateUser(existing.to_string()));
    }
    if let Some(contribution) = initial {
        validate_contribution(contribution)?;
    }

    let mut record = ContributionRecord::new();
    if let Some(contribution) = initial {
        apply_contribution(&mut record, contribution, Operation::Add);
    }
    records.insert(username.clone(), record);

    tracing::info!(username = %username, initial = ?initial, "User added");
    Ok(ActionOutcome::Applied(Change::UserAdded { username, initial }))
}

fn contribute(
    records: &mut Records,
    username: &str,
    contribution: Contribution,
    operation: Operation,
    policy: OverdrawPolicy,
) -> Result<ActionOutcome, ActionError> {
    validate_contribution(contribution)?;
    let username = resolve_username(records, username)?;
    let Some(record) = records.get_mut(&username) else {
        return Err(ActionError::UnknownUser(username));
    };

    if let Contribution::Resub { tier } = contribution {
        let from = record.resub_tier;
        return match apply_contribution(record, contribution, operation) {
            ContributionEffect::NoActiveResub => {
                Ok(ActionOutcome::NoEffect(NoEffect::NoActiveResub { username }))
            }
            ContributionEffect::Applied => {
                tracing::info!(username = %username, from, ?operation, "Resub changed");
                let change = match operation {
                    Operation::Add => Change::ResubUpdated { username, from, to: tier },
                    Operation::Subtract => Change::ResubRemoved { username, tier: from },
                };
                Ok(ActionOutcome::Applied(change))
            }
        };
    }

    let (contribution, clamped) = match operation {
        Operation::Add => (contribution, false),
        Operation::Subtract => match limit_subtract(record, &username, contribution, policy)? {
            Some(limited) => (limited, limited != contribution),
            None => {
                return Ok(ActionOutcome::NoEffect(NoEffect::ClampedToZero { username }));
            }
        },
    };

    apply_contribution(record, contribution, operation);
    tracing::info!(username = %username, %contribution, ?operation, clamped, "Contribution applied");
    Ok(ActionOutcome::Applied(Change::Contributed {
        username,
        contribution,
        operation,
        clamped,
    }))
}

/// Enforce the overdraw policy on a subtract. `Ok(None)` means nothing is
/// left to subtract under [`OverdrawPolicy::Clamp`].
fn limit_subtract(
    record: &ContributionRecord,
    username: &str,
    contribution: Contribution,
    policy: OverdrawPolicy,
) -> Result<Option<Contribution>, ActionError> {
    if policy == OverdrawPolicy::Allow {
        return Ok(Some(contribution));
    }

    let overdraw = |requested: String, available: String| ActionError::Overdraw {
        username: username.to_string(),
        requested,
        available,
    };

    let limited = match contribution {
        Contribution::Resub { .. } => contribution,
        Contribution::Gifted { count, tier } => {
            let available = record.gifted_at_tier(tier.number()).max(0);
            if i64::from(count) <= available {
                contribution
            } else if policy == OverdrawPolicy::Reject {
                return Err(overdraw(
                    format!("{count} {tier} gifted subs"),
                    format!("{available}"),
                ));
            } else {
                // available < count, so it fits in u32.
                let count = available as u32;
                if count == 0 {
                    return Ok(None);
                }
                Contribution::Gifted { count, tier }
            }
        }
        Contribution::Bits { amount } => {
            let available = record.num_bits.max(0);
            if i64::from(amount) <= available {
                contribution
            } else if policy == OverdrawPolicy::Reject {
                return Err(overdraw(format!("{amount} bits"), format!("{available} bits")));
            } else {
                let amount = available as u32;
                if amount == 0 {
                    return Ok(None);
                }
                Contribution::Bits { amount }
            }
        }
        Contribution::Dono { amount } => {
            let requested = to_cents(amount);
            let available = to_cents(record.donos).max(0);
            if requested <= available {
                contribution
            } else if policy == OverdrawPolicy::Reject {
                return Err(overdraw(
                    format!("${amount:.2}"),
                    format!("${:.2}", record.donos.max(0.0)),
                ));
            } else {
                if available == 0 {
                    return Ok(None);
                }
                Contribution::Dono {
                    amount: available as f64 / 100.0,
                }
            }
        }
    };
    Ok(Some(limited))
}

fn set_song_played(
    records: &mut Records,
    username: &str,
    played: Option<bool>,
) -> Result<ActionOutcome, ActionError> {
    let username = resolve_username(records, username)?;
    let Some(record) = records.get_mut(&username) else {
        return Err(ActionError::UnknownUser(username));
    };

    let played = played.unwrap_or(!record.song_played);
    if played == record.song_played {
        return Ok(ActionOutcome::NoEffect(NoEffect::SongStatusUnchanged { username, played }));
    }

    record.song_played = played;
    tracing::info!(username = %username, played, "Song played status set");
    Ok(ActionOutcome::Applied(Change::SongPlayedSet { username, played }))
}

fn validate_contribution(contribution: Contribution) -> Result<(), ActionError> {
    match contribution {
        Contribution::Resub { .. } => Ok(()),
        Contribution::Gifted { count: 0, .. } => {
            Err(ActionError::InvalidAmount("gifted sub count must be at least 1".into()))
        }
        Contribution::Bits { amount: 0 } => {
            Err(ActionError::InvalidAmount("bits must be at least 1".into()))
        }
        Contribution::Dono { amount } if !amount.is_finite() || round_cents(amount) < 0.01 => Err(
            ActionError::InvalidAmount("donation must be at least $0.01".into()),
        ),
        _ => Ok(()),
    }
}

fn normalize_username(username: &str) -> Result<String, ActionError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(ActionError::EmptyUsername);
    }
    Ok(trimmed.to_string())
}

/// Stored key for `username`: exact match first, then the trimmed name,
/// then a stored key that only differs by surrounding whitespace.
fn find_key<'a>(records: &'a Records, username: &str) -> Option<&'a str> {
    if let Some((key, _)) = records.get_key_value(username) {
        return Some(key);
    }
    let trimmed = username.trim();
    if let Some((key, _)) = records.get_key_value(trimmed) {
        return Some(key);
    }
    records.keys().map(String::as_str).find(|key| key.trim() == trimmed)
}

fn resolve_username(records: &Records, username: &str) -> Result<String, ActionError> {
    let trimmed = normalize_username(username)?;
    find_key(records, username)
        .map(str::to_string)
        .ok_or(ActionError::UnknownUser(trimmed))
}

fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::UserAdded {
                username,
                initial: None,
            } => write!(f, "{username} added!"),
            Change::UserAdded {
                username,
                initial: Some(contribution),
            } => write!(f, "{username} added with {contribution}!"),
            Change::ResubUpdated { username, from: 0, to } => {
                write!(f, "Resub {to} added to {username}")
            }
            Change::ResubUpdated { username, from, to } => {
                write!(f, "Resub Tier updated from Tier {from} to {to} for {username}")
            }
            Change::ResubRemoved { username, tier } => {
                write!(f, "Resub Tier {tier} status removed from {username}")
            }
            Change::Contributed {
                username,
                contribution,
                operation,
                clamped,
            } => {
                match operation {
                    Operation::Add => write!(f, "Added {contribution} to {username}")?,
                    Operation::Subtract => write!(f, "Subtracted {contribution} from {username}")?,
                }
                if *clamped {
                    f.write_str(" (limited to the recorded amount)")?;
                }
                Ok(())
            }
            Change::SongPlayedSet { username, played } => write!(
                f,
                "Song Played status updated to {} for {username}.",
                if *played { "Yes" } else { "No" }
            ),
            Change::UserDeleted { username } => write!(f, "{username} has been deleted."),
            Change::Cleared { .. } => f.write_str("All users have been cleared."),
        }
    }
}

impl fmt::Display for NoEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoEffect::NoActiveResub { username } => {
                write!(f, "{username} currently has no active Resub status to remove.")
            }
            NoEffect::SongStatusUnchanged { .. } => f.write_str("Song status was not changed."),
            NoEffect::NothingToClear => f.write_str("There are no users to clear."),
            NoEffect::ClampedToZero { username } => {
                write!(f, "{username} has nothing recorded to subtract.")
            }
        }
    }
}

impl fmt::Display for ActionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionOutcome::Applied(change) => change.fmt(f),
            ActionOutcome::NoEffect(reason) => reason.fmt(f),
        }
    }
}

#[cfg(test)]
#[path = "actions_tests.rs"]
mod tests;
