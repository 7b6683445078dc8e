use super::*;

fn fresh() -> ContributionRecord {
    ContributionRecord::new()
}

#[test]
fn recompute_sums_money_fields() {
    let mut r = ContributionRecord {
        resub_total: 5.99,
        gifted_subs_total: 11.98,
        bits_total: 1.23,
        donos: 2.5,
        ..fresh()
    };
    recompute(&mut r);
    assert_eq!(r.monetary_total, round_cents(5.99 + 11.98 + 1.23 + 2.5));
    assert_eq!(r.monetary_total, 21.7);
    assert!(r.bumpable);
}

#[test]
fn recompute_is_idempotent() {
    let mut r = ContributionRecord {
        resub_tier: 1,
        resub_total: 5.99,
        num_bits: 37,
        bits_total: 0.37,
        ..fresh()
    };
    recompute(&mut r);
    let once = (r.monetary_total, r.bumpable);
    recompute(&mut r);
    assert_eq!((r.monetary_total, r.bumpable), once);
}

#[test]
fn recompute_ignores_stale_derived_fields() {
    let mut r = ContributionRecord {
        monetary_total: 999.0,
        bumpable: true,
        ..fresh()
    };
    recompute(&mut r);
    assert_eq!(r.monetary_total, 0.0);
    assert!(!r.bumpable);
}

#[test]
fn tier2_resub_is_bumpable() {
    let mut r = fresh();
    let effect = apply_contribution(&mut r, Contribution::Resub { tier: SubTier::Tier2 }, Operation::Add);
    assert_eq!(effect, ContributionEffect::Applied);
    assert_eq!(r.resub_tier, 2);
    assert_eq!(r.monetary_total, 9.99);
    assert!(r.bumpable);
}

#[test]
fn tier1_resub_alone_is_not_bumpable() {
    let mut r = fresh();
    apply_contribution(&mut r, Contribution::Resub { tier: SubTier::Tier1 }, Operation::Add);
    assert_eq!(r.monetary_total, 5.99);
    assert!(!r.bumpable);
}

#[test]
fn resub_replaces_tier_instead_of_stacking() {
    let mut r = fresh();
    apply_contribution(&mut r, Contribution::Resub { tier: SubTier::Tier1 }, Operation::Add);
    apply_contribution(&mut r, Contribution::Resub { tier: SubTier::Tier3 }, Operation::Add);
    assert_eq!(r.resub_tier, 3);
    assert_eq!(r.resub_total, 24.99);

    apply_contribution(&mut r, Contribution::Resub { tier: SubTier::Tier2 }, Operation::Add);
    assert_eq!(r.resub_tier, 2);
    assert_eq!(r.resub_total, 9.99);
}

#[test]
fn add_then_remove_tier3_resub_nets_zero() {
    let mut r = fresh();
    apply_contribution(&mut r, Contribution::Resub { tier: SubTier::Tier3 }, Operation::Add);
    // The tier given on subtract is irrelevant; the active tier is removed.
    let effect = apply_contribution(&mut r, Contribution::Resub { tier: SubTier::Tier1 }, Operation::Subtract);
    assert_eq!(effect, ContributionEffect::Applied);
    assert_eq!(r.resub_total, 0.0);
    assert_eq!(r.resub_tier, 0);
    assert_eq!(r.monetary_total, 0.0);
}

#[test]
fn remove_resub_when_none_active_is_no_effect() {
    let mut r = ContributionRecord {
        donos: 3.0,
        ..fresh()
    };
    let before = r.clone();
    let effect = apply_contribution(&mut r, Contribution::Resub { tier: SubTier::Tier1 }, Operation::Subtract);
    assert_eq!(effect, ContributionEffect::NoActiveResub);
    assert_eq!(r.resub_total, before.resub_total);
    assert_eq!(r.resub_tier, 0);
}

#[test]
fn gifted_add_then_subtract() {
    let mut r = fresh();
    apply_contribution(&mut r, Contribution::Gifted { count: 2, tier: SubTier::Tier1 }, Operation::Add);
    assert!(r.bumpable);
    apply_contribution(&mut r, Contribution::Gifted { count: 1, tier: SubTier::Tier1 }, Operation::Subtract);
    assert_eq!(r.tier1, 1);
    assert_eq!(r.gifted_subs_count, 1);
    assert_eq!(r.gifted_subs_total, 5.99);
    assert!(!r.bumpable);
}

#[test]
fn gifted_tiers_are_tracked_separately() {
    let mut r = fresh();
    apply_contribution(&mut r, Contribution::Gifted { count: 1, tier: SubTier::Tier2 }, Operation::Add);
    apply_contribution(&mut r, Contribution::Gifted { count: 3, tier: SubTier::Tier3 }, Operation::Add);
    assert_eq!((r.tier1, r.tier2, r.tier3), (0, 1, 3));
    assert_eq!(r.gifted_subs_count, 4);
    assert_eq!(r.gifted_subs_total, round_cents(9.99 + 3.0 * 24.99));
    assert!(r.gifted_count_consistent());
}

#[test]
fn gifted_over_subtract_goes_negative() {
    let mut r = fresh();
    apply_contribution(&mut r, Contribution::Gifted { count: 2, tier: SubTier::Tier2 }, Operation::Subtract);
    assert_eq!(r.tier2, -2);
    assert_eq!(r.gifted_subs_count, -2);
    assert_eq!(r.gifted_subs_total, -19.98);
}

#[test]
fn five_hundred_bits_is_bumpable() {
    let mut r = fresh();
    apply_contribution(&mut r, Contribution::Bits { amount: 500 }, Operation::Add);
    assert_eq!(r.num_bits, 500);
    assert_eq!(r.bits_total, 5.0);
    assert_eq!(r.monetary_total, 5.0);
    assert!(r.bumpable);
}

#[test]
fn bits_subtract() {
    let mut r = fresh();
    apply_contribution(&mut r, Contribution::Bits { amount: 650 }, Operation::Add);
    apply_contribution(&mut r, Contribution::Bits { amount: 200 }, Operation::Subtract);
    assert_eq!(r.num_bits, 450);
    assert_eq!(r.bits_total, 4.5);
    assert!(!r.bumpable);
}

#[test]
fn dono_rounds_to_cents() {
    let mut r = fresh();
    apply_contribution(&mut r, Contribution::Dono { amount: 4.996 }, Operation::Add);
    assert_eq!(r.donos, 5.0);
    assert!(r.bumpable);

    apply_contribution(&mut r, Contribution::Dono { amount: 1.5 }, Operation::Subtract);
    assert_eq!(r.donos, 3.5);
    assert!(!r.bumpable);
}

#[test]
fn total_just_above_tier1_price_is_bumpable() {
    let mut r = fresh();
    apply_contribution(&mut r, Contribution::Resub { tier: SubTier::Tier1 }, Operation::Add);
    apply_contribution(&mut r, Contribution::Bits { amount: 1 }, Operation::Add);
    assert_eq!(r.monetary_total, 6.0);
    assert!(r.bumpable);
}

#[test]
fn recompute_all_touches_every_record() {
    let mut records = Records::new();
    records.insert("a".into(), ContributionRecord { donos: 7.0, ..fresh() });
    records.insert("b".into(), ContributionRecord { bits_total: 0.5, num_bits: 50, ..fresh() });
    recompute_all(&mut records);
    assert_eq!(records["a"].monetary_total, 7.0);
    assert!(records["a"].bumpable);
    assert_eq!(records["b"].monetary_total, 0.5);
    assert!(!records["b"].bumpable);
}

#[test]
fn contribution_display() {
    assert_eq!(Contribution::Resub { tier: SubTier::Tier2 }.to_string(), "Tier 2 resub");
    assert_eq!(
        Contribution::Gifted { count: 5, tier: SubTier::Tier1 }.to_string(),
        "5 Tier 1 gifted subs"
    );
    assert_eq!(Contribution::Dono { amount: 3.5 }.to_string(), "$3.50 donation");
}
