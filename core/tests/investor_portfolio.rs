//! Investor portfolio derivation tests.

use chrono::Utc;
use investdash_core::{
    analytics::investor_portfolio,
    demo_data::{demo_dataset, get_investor_portfolio},
    model::{InvestorInvestment, SubscriptionStatus},
};

fn sub(id: &str, user: &str, investment: &str, amount: f64, current: f64) -> InvestorInvestment {
    InvestorInvestment {
        id:            id.into(),
        user_id:       user.into(),
        investment_id: investment.into(),
        amount,
        current_value: current,
        profit_loss:   current - amount,
        status:        SubscriptionStatus::Active,
        subscribed_at: Utc::now(),
    }
}

#[test]
fn investor_without_subscriptions_gets_zeroes() {
    let data = demo_dataset();

    for user_id in ["u-007", "u-001", "nobody"] {
        let p = data.get_investor_portfolio(user_id);
        assert_eq!(p.total_invested, 0.0);
        assert_eq!(p.total_current_value, 0.0);
        assert_eq!(p.total_profit_loss, 0.0);
        assert_eq!(p.total_roi, 0.0);
        assert_eq!(p.investment_count, 0);
        assert!(p.investments.is_empty());
    }
}

#[test]
fn demo_investor_totals() {
    let p = get_investor_portfolio("u-005");

    assert_eq!(p.investment_count, 4);
    assert_eq!(p.total_invested, 120_000.0);
    assert_eq!(p.total_current_value, 139_120.0);
    assert_eq!(p.total_profit_loss, 19_120.0);
    assert!((p.total_roi - 19_120.0 / 120_000.0 * 100.0).abs() < 1e-9);
}

/// Each entry carries its investment record for display.
#[test]
fn entries_carry_matching_investment() {
    let p = get_investor_portfolio("u-006");

    for entry in &p.investments {
        let inv = entry.investment.as_ref().expect("investment attached");
        assert_eq!(inv.id, entry.subscription.investment_id);
        assert_eq!(entry.subscription.user_id, "u-006");
    }
}

#[test]
fn dangling_investment_reference_still_counts() {
    let subs = vec![
        sub("s1", "u1", "missing", 1_000.0, 1_100.0),
        sub("s2", "u2", "missing", 5_000.0, 5_000.0),
    ];

    let p = investor_portfolio("u1", &subs, &[]);

    assert_eq!(p.investment_count, 1);
    assert!(p.investments[0].investment.is_none());
    assert_eq!(p.investments[0].investment_name(), "Unknown investment");
    assert_eq!(p.total_profit_loss, 100.0);
    assert!((p.total_roi - 10.0).abs() < 1e-9);
}

#[test]
fn subscription_recompute_restores_invariant() {
    let mut s = sub("s1", "u1", "i1", 2_000.0, 2_500.0);
    s.profit_loss = 0.0;
    assert!(!s.is_consistent());

    s.recompute();

    assert!(s.is_consistent());
    assert_eq!(s.profit_loss, 500.0);
    assert!((s.roi() - 25.0).abs() < 1e-9);
}

#[test]
fn demo_dataset_is_consistent() {
    let issues = demo_dataset().verify();
    assert!(issues.is_empty(), "demo dataset issues: {issues:?}");
}

#[test]
fn verify_reports_broken_references() {
    let mut data = demo_dataset();
    data.subscriptions.push(sub("s-bad", "u-404", "i-404", 10.0, 12.0));
    data.subscriptions[0].profit_loss += 1.0;

    let issues = data.verify();

    assert_eq!(issues.len(), 3, "issues: {issues:?}");
    let text: Vec<String> = issues.iter().map(|i| i.to_string()).collect();
    assert!(text.iter().any(|t| t.contains("user u-404")));
    assert!(text.iter().any(|t| t.contains("investment i-404")));
    assert!(text.iter().any(|t| t.contains("s-001")));
}
