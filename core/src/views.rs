//! Per-role dashboard pages, expressed as pure derivations over the
//! fetched collections. A page renders whatever its view struct holds;
//! none of these functions can fail.

use crate::{
    analytics::{
        asset_distribution, company_distribution, company_performance, dashboard_metrics,
        investor_portfolio, portfolio_distribution, roi_percent, status_breakdown,
        top_performers, DashboardMetrics, DistributionSlice, InvestorPortfolio, StatusCount,
    },
    demo_data::DemoDataset,
    model::{
        Company, CompanyPerformance, Investment, InvestorInvestment, PerformanceDataPoint, Role,
        SubscriptionStatus, User, UserStatus,
    },
    performance::{combine_series, PerformanceGenerator},
    state::data::DataStore,
    types::{EntityId, Money, Percent},
};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;

pub const TOP_PERFORMERS: usize = 5;

/// Borrowed view of every collection a page reads.
#[derive(Debug, Clone, Copy)]
pub struct ViewData<'a> {
    pub users:         &'a [User],
    pub companies:     &'a [Company],
    pub investments:   &'a [Investment],
    pub subscriptions: &'a [InvestorInvestment],
}

impl DataStore {
    pub fn view_data(&self) -> ViewData<'_> {
        ViewData {
            users:         self.users(),
            companies:     self.companies(),
            investments:   self.investments(),
            subscriptions: self.subscriptions(),
        }
    }
}

impl DemoDataset {
    pub fn view_data(&self) -> ViewData<'_> {
        ViewData {
            users:         &self.users,
            companies:     &self.companies,
            investments:   &self.investments,
            subscriptions: &self.subscriptions,
        }
    }
}

// ── Superadmin ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuperadminOverview {
    pub metrics:              DashboardMetrics,
    pub company_distribution: Vec<DistributionSlice>,
    pub asset_distribution:   Vec<DistributionSlice>,
    pub status_breakdown:     Vec<StatusCount>,
    pub pending_investors:    Vec<User>,
    pub top_performers:       Vec<Investment>,
}

pub fn superadmin_overview(data: ViewData<'_>, palette: &[String]) -> SuperadminOverview {
    SuperadminOverview {
        metrics:              dashboard_metrics(data.users, data.companies, data.investments),
        company_distribution: company_distribution(data.investments, data.companies, palette),
        asset_distribution:   asset_distribution(data.investments, palette),
        status_breakdown:     status_breakdown(data.investments),
        pending_investors:    data
            .users
            .iter()
            .filter(|u| u.role == Role::Investor && u.status == UserStatus::Pending)
            .cloned()
            .collect(),
        top_performers:       top_performers(data.investments, TOP_PERFORMERS),
    }
}

// ── Admin ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverview {
    pub admin_id:           EntityId,
    /// None when no company is assigned to this admin yet.
    pub company:            Option<Company>,
    pub investments:        Vec<Investment>,
    pub metrics:            DashboardMetrics,
    pub performance:        CompanyPerformance,
    pub asset_distribution: Vec<DistributionSlice>,
}

/// Everything scoped to the company assigned to `admin_id`.
pub fn admin_overview(data: ViewData<'_>, admin_id: &str, palette: &[String]) -> AdminOverview {
    let company = data
        .companies
        .iter()
        .find(|c| c.admin_id.as_deref() == Some(admin_id))
        .cloned();

    let investments: Vec<Investment> = match &company {
        Some(c) => data
            .investments
            .iter()
            .filter(|i| i.company_id == c.id)
            .cloned()
            .collect(),
        None => Vec::new(),
    };

    let ids: HashSet<&str> = investments.iter().map(|i| i.id.as_str()).collect();
    let investors: HashSet<&str> = data
        .subscriptions
        .iter()
        .filter(|s| ids.contains(s.investment_id.as_str()))
        .map(|s| s.user_id.as_str())
        .collect();

    let companies: Vec<Company> = company.iter().cloned().collect();
    let mut metrics = dashboard_metrics(&[], &companies, &investments);
    metrics.total_investors = investors.len();

    let performance = company
        .as_ref()
        .map(|c| company_performance(&c.id, &investments))
        .unwrap_or_default();

    AdminOverview {
        admin_id: admin_id.to_string(),
        asset_distribution: asset_distribution(&investments, palette),
        company,
        investments,
        metrics,
        performance,
    }
}

// ── Investor ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorOverview {
    pub portfolio:    InvestorPortfolio,
    pub distribution: Vec<DistributionSlice>,
    pub performance:  Vec<PerformanceDataPoint>,
    /// Open investments the investor may subscribe to. Empty until approved.
    pub investable:   Vec<Investment>,
    pub can_invest:   bool,
}

pub fn investor_overview(
    data: ViewData<'_>,
    user_id: &str,
    generator: &PerformanceGenerator,
    as_of: NaiveDate,
    palette: &[String],
) -> InvestorOverview {
    let portfolio = investor_portfolio(user_id, data.subscriptions, data.investments);

    // Sold stakes no longer move; only held and pending ones are charted.
    let held: Vec<&InvestorInvestment> = portfolio
        .investments
        .iter()
        .map(|e| &e.subscription)
        .filter(|s| s.status != SubscriptionStatus::Sold)
        .collect();
    let series: Vec<Vec<PerformanceDataPoint>> = held
        .iter()
        .map(|s| generator.generate(&s.id, s.amount, s.current_value, as_of))
        .collect();
    let baseline: Money = held.iter().map(|s| s.amount).sum();

    let can_invest = data
        .users
        .iter()
        .find(|u| u.id == user_id)
        .is_some_and(|u| u.role == Role::Investor && u.status.can_transact());

    let investable = if can_invest {
        data.investments
            .iter()
            .filter(|i| i.status.accepts_subscriptions())
            .cloned()
            .collect()
    } else {
        Vec::new()
    };

    InvestorOverview {
        distribution: portfolio_distribution(&portfolio, palette),
        performance: combine_series(&series, baseline),
        portfolio,
        investable,
        can_invest,
    }
}

// ── Salesman ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorSummary {
    pub user:                User,
    pub total_invested:      Money,
    pub total_current_value: Money,
    pub total_roi:           Percent,
    pub investment_count:    usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesmanOverview {
    /// Largest books first.
    pub investors:               Vec<InvestorSummary>,
    pub total_under_management:  Money,
    pub pending_approvals:       usize,
}

pub fn salesman_overview(data: ViewData<'_>) -> SalesmanOverview {
    let mut investors: Vec<InvestorSummary> = data
        .users
        .iter()
        .filter(|u| u.role == Role::Investor)
        .map(|u| {
            let p = investor_portfolio(&u.id, data.subscriptions, data.investments);
            InvestorSummary {
                user:                u.clone(),
                total_invested:      p.total_invested,
                total_current_value: p.total_current_value,
                total_roi:           roi_percent(p.total_profit_loss, p.total_invested),
                investment_count:    p.investment_count,
            }
        })
        .collect();
    investors.sort_by(|a, b| b.total_invested.total_cmp(&a.total_invested));

    SalesmanOverview {
        total_under_management: investors.iter().map(|s| s.total_current_value).sum(),
        pending_approvals: investors
            .iter()
            .filter(|s| s.user.status == UserStatus::Pending)
            .count(),
        investors,
    }
}

// ── Dispatch ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum RoleView {
    Superadmin(SuperadminOverview),
    Admin(AdminOverview),
    Investor(InvestorOverview),
    Salesman(SalesmanOverview),
}

/// The landing page for `user`'s role.
pub fn view_for(
    user: &User,
    data: ViewData<'_>,
    generator: &PerformanceGenerator,
    as_of: NaiveDate,
    palette: &[String],
) -> RoleView {
    match user.role {
        Role::Superadmin => RoleView::Superadmin(superadmin_overview(data, palette)),
        Role::Admin => RoleView::Admin(admin_overview(data, &user.id, palette)),
        Role::Investor => RoleView::Investor(investor_overview(
            data, &user.id, generator, as_of, palette,
        )),
        Role::Salesman => RoleView::Salesman(salesman_overview(data)),
    }
}
