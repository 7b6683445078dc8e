//! Leaderboard ordering.

use std::cmp::Ordering;

use leaderboard_db::{ContributionRecord, Records};

/// Records ordered by `monetary_total` descending, ties by username.
///
/// Reads the stored derived field, so call [`crate::recompute_all`] first.
pub fn rank(records: &Records) -> Vec<(&str, &ContributionRecord)> {
    let mut ranked: Vec<_> = records.iter().map(|(name, r)| (name.as_str(), r)).collect();
    ranked.sort_by(|(a_name, a), (b_name, b)| {
        match b.monetary_total.total_cmp(&a.monetary_total) {
            Ordering::Equal => a_name.cmp(b_name),
            other => other,
        }
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_total(total: f64) -> ContributionRecord {
        ContributionRecord {
            donos: total,
            monetary_total: total,
            ..ContributionRecord::new()
        }
    }

    #[test]
    fn highest_total_first() {
        let mut records = Records::new();
        records.insert("low".into(), with_total(1.0));
        records.insert("high".into(), with_total(30.0));
        records.insert("mid".into(), with_total(9.99));

        let names: Vec<_> = rank(&records).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["high", "mid", "low"]);
    }

    #[test]
    fn ties_break_by_username() {
        let mut records = Records::new();
        records.insert("zed".into(), with_total(5.0));
        records.insert("amy".into(), with_total(5.0));

        let names: Vec<_> = rank(&records).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["amy", "zed"]);
    }

    #[test]
    fn empty_store_ranks_nothing() {
        assert!(rank(&Records::new()).is_empty());
    }
}
