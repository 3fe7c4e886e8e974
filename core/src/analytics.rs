//! Derived metrics over investment collections.
//!
//! This module is REACTIVE. It never mutates its inputs and never fails:
//! empty or missing collections produce zeroed aggregates so every view
//! can render a "no data" state instead of an error.
//!
//! RULE: every percentage divides through roi_percent(), which maps a
//! zero base (and any non-finite result) to 0.

use crate::{
    model::{
        Company, CompanyPerformance, Investment, InvestmentStatus, InvestorInvestment, Role,
        User,
    },
    types::{EntityId, Money, Percent},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// `profit_loss / base * 100`, or 0 when the base is not positive.
pub fn roi_percent(profit_loss: Money, base: Money) -> Percent {
    if base > 0.0 {
        let roi = profit_loss / base * 100.0;
        if roi.is_finite() { roi } else { 0.0 }
    } else {
        0.0
    }
}

/// Round half away from zero to cents.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

// ── Dashboard metrics ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_investments:   usize,
    pub total_value:         Money,
    pub total_initial_value: Money,
    pub total_profit_loss:   Money,
    pub total_roi:           Percent,
    pub active_investments:  usize,
    pub total_investors:     usize,
    pub total_companies:     usize,
    pub total_users:         usize,
}

pub fn dashboard_metrics(
    users: &[User],
    companies: &[Company],
    investments: &[Investment],
) -> DashboardMetrics {
    let total_value: Money = investments.iter().map(|i| i.current_value).sum();
    let total_initial_value: Money = investments.iter().map(|i| i.initial_amount).sum();
    let total_profit_loss = total_value - total_initial_value;

    let metrics = DashboardMetrics {
        total_investments: investments.len(),
        total_value,
        total_initial_value,
        total_profit_loss,
        total_roi: roi_percent(total_profit_loss, total_initial_value),
        active_investments: investments
            .iter()
            .filter(|i| i.status == InvestmentStatus::Active)
            .count(),
        total_investors: users.iter().filter(|u| u.role == Role::Investor).count(),
        total_companies: companies.len(),
        total_users: users.len(),
    };

    log::debug!(
        "dashboard metrics: investments={} value={:.2} roi={:.2}%",
        metrics.total_investments,
        metrics.total_value,
        metrics.total_roi
    );
    metrics
}

// ── Investor portfolio ─────────────────────────────────────────────

/// A subscription with the investment it points at, for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioEntry {
    pub subscription: InvestorInvestment,
    /// None when the subscription references an unknown investment.
    pub investment:   Option<Investment>,
}

impl PortfolioEntry {
    pub fn investment_name(&self) -> &str {
        self.investment
            .as_ref()
            .map(|i| i.name.as_str())
            .unwrap_or("Unknown investment")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvestorPortfolio {
    pub user_id:             EntityId,
    pub total_invested:      Money,
    pub total_current_value: Money,
    pub total_profit_loss:   Money,
    pub total_roi:           Percent,
    pub investment_count:    usize,
    pub investments:         Vec<PortfolioEntry>,
}

pub fn investor_portfolio(
    user_id: &str,
    subscriptions: &[InvestorInvestment],
    investments: &[Investment],
) -> InvestorPortfolio {
    let by_id: HashMap<&str, &Investment> =
        investments.iter().map(|i| (i.id.as_str(), i)).collect();

    let entries: Vec<PortfolioEntry> = subscriptions
        .iter()
        .filter(|s| s.user_id == user_id)
        .map(|s| {
            let investment = by_id.get(s.investment_id.as_str()).map(|i| (*i).clone());
            if investment.is_none() {
                log::warn!(
                    "subscription {} references unknown investment {}",
                    s.id,
                    s.investment_id
                );
            }
            PortfolioEntry { subscription: s.clone(), investment }
        })
        .collect();

    let total_invested: Money = entries.iter().map(|e| e.subscription.amount).sum();
    let total_current_value: Money =
        entries.iter().map(|e| e.subscription.current_value).sum();
    let total_profit_loss = total_current_value - total_invested;

    InvestorPortfolio {
        user_id: user_id.to_string(),
        total_invested,
        total_current_value,
        total_profit_loss,
        total_roi: roi_percent(total_profit_loss, total_invested),
        investment_count: entries.len(),
        investments: entries,
    }
}

// ── Distribution breakdown ─────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DistributionSlice {
    pub name:  String,
    pub value: Money,
    pub color: String,
}

/// Group `items` by `key`, summing `value`. Groups keep first-seen order and
/// take palette colors round-robin in that order.
pub fn distribution_by<T, K, V>(
    items: &[T],
    key: K,
    value: V,
    palette: &[String],
) -> Vec<DistributionSlice>
where
    K: Fn(&T) -> String,
    V: Fn(&T) -> Money,
{
    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, Money> = HashMap::new();

    for item in items {
        let k = key(item);
        match totals.get_mut(&k) {
            Some(total) => *total += value(item),
            None => {
                totals.insert(k.clone(), value(item));
                order.push(k);
            }
        }
    }

    order
        .into_iter()
        .enumerate()
        .map(|(idx, name)| DistributionSlice {
            value: totals.get(&name).copied().unwrap_or(0.0),
            color: palette_color(palette, idx),
            name,
        })
        .collect()
}

fn palette_color(palette: &[String], idx: usize) -> String {
    if palette.is_empty() {
        String::new()
    } else {
        palette[idx % palette.len()].clone()
    }
}

/// Current value by asset type.
pub fn asset_distribution(investments: &[Investment], palette: &[String]) -> Vec<DistributionSlice> {
    distribution_by(
        investments,
        |i| i.investment_type.clone(),
        |i| i.current_value,
        palette,
    )
}

/// Current value by owning company name. Unknown companies group under their id.
pub fn company_distribution(
    investments: &[Investment],
    companies: &[Company],
    palette: &[String],
) -> Vec<DistributionSlice> {
    let names: HashMap<&str, &str> = companies
        .iter()
        .map(|c| (c.id.as_str(), c.name.as_str()))
        .collect();
    distribution_by(
        investments,
        |i| {
            names
                .get(i.company_id.as_str())
                .map(|n| n.to_string())
                .unwrap_or_else(|| i.company_id.clone())
        },
        |i| i.current_value,
        palette,
    )
}

/// An investor's current value by asset type.
pub fn portfolio_distribution(
    portfolio: &InvestorPortfolio,
    palette: &[String],
) -> Vec<DistributionSlice> {
    distribution_by(
        &portfolio.investments,
        |e| {
            e.investment
                .as_ref()
                .map(|i| i.investment_type.clone())
                .unwrap_or_else(|| "Other".to_string())
        },
        |e| e.subscription.current_value,
        palette,
    )
}

// ── Rollups ────────────────────────────────────────────────────────

/// Profit, loss and ROI across one company's investments.
/// Profit sums the gains of winners; loss sums the (positive) shortfall of losers.
pub fn company_performance(company_id: &str, investments: &[Investment]) -> CompanyPerformance {
    let mut profit = 0.0;
    let mut loss = 0.0;
    let mut initial = 0.0;
    let mut current = 0.0;

    for inv in investments.iter().filter(|i| i.company_id == company_id) {
        let pl = inv.profit_loss();
        if pl >= 0.0 {
            profit += pl;
        } else {
            loss += -pl;
        }
        initial += inv.initial_amount;
        current += inv.current_value;
    }

    CompanyPerformance {
        profit,
        loss,
        roi: roi_percent(current - initial, initial),
    }
}

/// The `n` best investments by ROI, best first. Ties keep input order.
pub fn top_performers(investments: &[Investment], n: usize) -> Vec<Investment> {
    let mut sorted: Vec<Investment> = investments.to_vec();
    sorted.sort_by(|a, b| b.roi().total_cmp(&a.roi()));
    sorted.truncate(n);
    sorted
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusCount {
    pub status: InvestmentStatus,
    pub count:  usize,
}

/// Investment count per status, in lifecycle order, including zero counts.
pub fn status_breakdown(investments: &[Investment]) -> Vec<StatusCount> {
    [
        InvestmentStatus::Active,
        InvestmentStatus::Completed,
        InvestmentStatus::Paused,
        InvestmentStatus::Cancelled,
    ]
    .into_iter()
    .map(|status| StatusCount {
        status,
        count: investments.iter().filter(|i| i.status == status).count(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roi_guard() {
        assert_eq!(roi_percent(50.0, 0.0), 0.0);
        assert_eq!(roi_percent(50.0, -10.0), 0.0);
        assert_eq!(roi_percent(25.0, 100.0), 25.0);
    }

    #[test]
    fn round2_cents() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(-1.236), -1.24);
    }

    #[test]
    fn empty_palette_gives_blank_color() {
        let slices = distribution_by(&[1.0_f64, 2.0], |_| "all".into(), |v| *v, &[]);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].color, "");
        assert_eq!(slices[0].value, 3.0);
    }
}
