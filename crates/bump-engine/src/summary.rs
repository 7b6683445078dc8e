//! Human-readable contribution summaries.

use leaderboard_db::ContributionRecord;

use crate::grand_totals::GrandTotals;

pub const NO_CONTRIBUTIONS: &str = "No contributions yet.";
pub const NO_CONTRIBUTIONS_RECORDED: &str = "No contributions recorded.";

/// Describe one viewer's non-zero contributions, e.g. "Tier 2 resub, 3 tier 1 gifted subs".
///
/// Order is fixed: resub, gifted tier 1/2/3, bits, dono.
pub fn format_contribution_summary(record: &ContributionRecord) -> String {
    let mut parts = Vec::new();

    match record.resub_tier {
        3 => parts.push("Tier 3 resub".to_string()),
        2 => parts.push("Tier 2 resub".to_string()),
        1 => parts.push("Resub".to_string()),
        _ => {}
    }

    for (tier, count) in [(1, record.tier1), (2, record.tier2), (3, record.tier3)] {
        if count > 1 {
            parts.push(format!("{count} Tier {tier} gifted subs"));
        } else if count == 1 {
            parts.push(format!("Tier {tier} gifted sub"));
        }
    }

    if record.num_bits > 1 {
        parts.push(format!("{} bits", record.num_bits));
    } else if record.num_bits == 1 {
        parts.push("1 bit".to_string());
    }

    if record.donos > 0.0 {
        parts.push(format!("{} dono", format_dono(record.donos)));
    }

    if parts.is_empty() {
        return NO_CONTRIBUTIONS.to_string();
    }
    capitalize(&parts.join(", "))
}

/// Stream-wide counts, e.g. "5 gifted subs, 1 resub, 1,500 bits, $12.00 in donos".
pub fn format_grand_summary(totals: &GrandTotals) -> String {
    let mut parts = Vec::new();

    if totals.total_gifted_subs_count > 0 {
        let n = totals.total_gifted_subs_count;
        parts.push(format!("{n} {}", plural(n, "gifted sub", "gifted subs")));
    }
    if totals.total_resubs_count > 0 {
        let n = totals.total_resubs_count;
        parts.push(format!("{n} {}", plural(n, "resub", "resubs")));
    }
    if totals.total_bits_amount > 0 {
        let n = totals.total_bits_amount;
        parts.push(format!("{} {}", group_thousands(n), plural(n, "bit", "bits")));
    }
    if totals.total_donos > 0.0 {
        parts.push(format!("${:.2} in donos", totals.total_donos));
    }

    if parts.is_empty() {
        return NO_CONTRIBUTIONS_RECORDED.to_string();
    }
    capitalize(&parts.join(", "))
}

/// "$5" for whole dollars, "$5.50" otherwise.
pub fn format_dono(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("${amount:.0}")
    } else {
        format!("${amount:.2}")
    }
}

/// Insert comma separators: 1500 -> "1,500".
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Uppercase the first character and lowercase the rest.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn plural<'a>(n: i64, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}
