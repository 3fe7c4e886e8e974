//! Dashboard metric aggregation tests.

use chrono::NaiveDate;
use investdash_core::{
    analytics::{company_performance, dashboard_metrics, status_breakdown, top_performers},
    demo_data::get_dashboard_metrics,
    model::{Investment, InvestmentStatus, RiskLevel},
};

fn inv(id: &str, status: InvestmentStatus, initial: f64, current: f64) -> Investment {
    Investment {
        id:                 id.into(),
        name:               format!("Investment {id}"),
        investment_type:    "Stocks".into(),
        category:           "Stocks".into(),
        initial_amount:     initial,
        current_value:      current,
        expected_roi:       10.0,
        actual_roi:         0.0,
        risk_level:         RiskLevel::Medium,
        status,
        company_id:         "c-1".into(),
        investor_count:     0,
        subscription_count: 0,
        start_date:         NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    }
}

/// Active 100 + Completed 200: one active, 300 total.
#[test]
fn active_count_and_total_value() {
    let investments = vec![
        inv("a", InvestmentStatus::Active, 100.0, 100.0),
        inv("b", InvestmentStatus::Completed, 200.0, 200.0),
    ];

    let m = dashboard_metrics(&[], &[], &investments);

    assert_eq!(m.active_investments, 1);
    assert_eq!(m.total_value, 300.0);
    assert_eq!(m.total_investments, 2);
}

/// ROI is always finite and matches the formula, or 0 with no capital.
#[test]
fn total_roi_matches_formula_or_zero() {
    let collections: Vec<Vec<Investment>> = vec![
        vec![],
        vec![inv("z", InvestmentStatus::Active, 0.0, 0.0)],
        vec![inv("z", InvestmentStatus::Active, 0.0, 500.0)],
        vec![inv("a", InvestmentStatus::Active, 1_000.0, 1_250.0)],
        vec![
            inv("a", InvestmentStatus::Active, 1_000.0, 800.0),
            inv("b", InvestmentStatus::Paused, 3_000.0, 3_100.0),
            inv("c", InvestmentStatus::Cancelled, 500.0, 0.0),
        ],
    ];

    for investments in &collections {
        let m = dashboard_metrics(&[], &[], investments);
        assert!(m.total_roi.is_finite(), "ROI not finite for {investments:?}");

        let expected = if m.total_initial_value == 0.0 {
            0.0
        } else {
            (m.total_value - m.total_initial_value) / m.total_initial_value * 100.0
        };
        assert!(
            (m.total_roi - expected).abs() < 1e-9,
            "ROI {} != expected {}",
            m.total_roi,
            expected
        );
        assert_eq!(m.total_profit_loss, m.total_value - m.total_initial_value);
    }
}

#[test]
fn empty_inputs_yield_zeroed_metrics() {
    let m = dashboard_metrics(&[], &[], &[]);
    assert_eq!(m.total_investments, 0);
    assert_eq!(m.total_value, 0.0);
    assert_eq!(m.total_roi, 0.0);
    assert_eq!(m.total_users, 0);
}

#[test]
fn demo_metrics_count_every_collection() {
    let m = get_dashboard_metrics();

    assert_eq!(m.total_investments, 7);
    assert_eq!(m.active_investments, 4);
    assert_eq!(m.total_investors, 4);
    assert_eq!(m.total_companies, 4);
    assert_eq!(m.total_users, 9);
    assert_eq!(m.total_initial_value, 1_390_000.0);
    assert_eq!(m.total_value, 1_505_500.0);
    assert!((m.total_roi - 115_500.0 / 1_390_000.0 * 100.0).abs() < 1e-9);
}

#[test]
fn company_rollup_splits_profit_and_loss() {
    let investments = vec![
        inv("a", InvestmentStatus::Active, 1_000.0, 1_300.0),
        inv("b", InvestmentStatus::Active, 1_000.0, 900.0),
    ];

    let perf = company_performance("c-1", &investments);

    assert_eq!(perf.profit, 300.0);
    assert_eq!(perf.loss, 100.0);
    assert!((perf.roi - 10.0).abs() < 1e-9);
    assert_eq!(company_performance("c-unknown", &investments).roi, 0.0);
}

#[test]
fn top_performers_sorted_by_roi() {
    let investments = vec![
        inv("low", InvestmentStatus::Active, 100.0, 101.0),
        inv("high", InvestmentStatus::Active, 100.0, 150.0),
        inv("loss", InvestmentStatus::Active, 100.0, 90.0),
        inv("mid", InvestmentStatus::Active, 100.0, 120.0),
    ];

    let top: Vec<String> = top_performers(&investments, 3).into_iter().map(|i| i.id).collect();

    assert_eq!(top, vec!["high", "mid", "low"]);
}

#[test]
fn status_breakdown_includes_zero_counts() {
    let investments = vec![
        inv("a", InvestmentStatus::Active, 1.0, 1.0),
        inv("b", InvestmentStatus::Active, 1.0, 1.0),
        inv("c", InvestmentStatus::Cancelled, 1.0, 1.0),
    ];

    let counts: Vec<usize> = status_breakdown(&investments).iter().map(|s| s.count).collect();

    assert_eq!(counts, vec![2, 0, 0, 1]);
}
