//! Demo dataset: static users, companies, investments and subscriptions
//! used when no backend is configured, plus the derived-metrics helpers
//! the dashboard pages call in demo mode.

use crate::{
    analytics::{dashboard_metrics, investor_portfolio, DashboardMetrics, InvestorPortfolio},
    model::{
        Company, CompanyPerformance, CompanyStatus, Investment, InvestmentStatus,
        InvestorInvestment, RiskLevel, Role, SubscriptionStatus, User, UserStatus,
    },
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DemoDataset {
    pub users:         Vec<User>,
    pub companies:     Vec<Company>,
    pub investments:   Vec<Investment>,
    pub subscriptions: Vec<InvestorInvestment>,
}

impl DemoDataset {
    /// Load `users.json`, `companies.json`, `investments.json` and
    /// `subscriptions.json` from `dir`. Each file holds a JSON array.
    pub fn load(dir: &str) -> anyhow::Result<Self> {
        Ok(Self {
            users:         read_array(dir, "users.json")?,
            companies:     read_array(dir, "companies.json")?,
            investments:   read_array(dir, "investments.json")?,
            subscriptions: read_array(dir, "subscriptions.json")?,
        })
    }

    pub fn get_dashboard_metrics(&self) -> DashboardMetrics {
        dashboard_metrics(&self.users, &self.companies, &self.investments)
    }

    pub fn get_investor_portfolio(&self, user_id: &str) -> InvestorPortfolio {
        investor_portfolio(user_id, &self.subscriptions, &self.investments)
    }

    /// Referential and arithmetic problems in the dataset. Empty means healthy.
    pub fn verify(&self) -> Vec<DatasetIssue> {
        let mut issues = Vec::new();

        check_unique(&mut issues, "user", self.users.iter().map(|u| u.id.as_str()));
        check_unique(&mut issues, "company", self.companies.iter().map(|c| c.id.as_str()));
        check_unique(&mut issues, "investment", self.investments.iter().map(|i| i.id.as_str()));
        check_unique(
            &mut issues,
            "subscription",
            self.subscriptions.iter().map(|s| s.id.as_str()),
        );

        let user_ids: HashSet<&str> = self.users.iter().map(|u| u.id.as_str()).collect();
        let company_ids: HashSet<&str> = self.companies.iter().map(|c| c.id.as_str()).collect();
        let investment_ids: HashSet<&str> =
            self.investments.iter().map(|i| i.id.as_str()).collect();

        for c in &self.companies {
            if let Some(admin) = &c.admin_id {
                if !user_ids.contains(admin.as_str()) {
                    issues.push(DatasetIssue::DanglingReference {
                        from: format!("company {}", c.id),
                        to:   format!("user {admin}"),
                    });
                }
            }
        }
        for i in &self.investments {
            if !company_ids.contains(i.company_id.as_str()) {
                issues.push(DatasetIssue::DanglingReference {
                    from: format!("investment {}", i.id),
                    to:   format!("company {}", i.company_id),
                });
            }
        }
        for s in &self.subscriptions {
            if !user_ids.contains(s.user_id.as_str()) {
                issues.push(DatasetIssue::DanglingReference {
                    from: format!("subscription {}", s.id),
                    to:   format!("user {}", s.user_id),
                });
            }
            if !investment_ids.contains(s.investment_id.as_str()) {
                issues.push(DatasetIssue::DanglingReference {
                    from: format!("subscription {}", s.id),
                    to:   format!("investment {}", s.investment_id),
                });
            }
            if !s.is_consistent() {
                issues.push(DatasetIssue::ProfitLossMismatch {
                    subscription_id: s.id.clone(),
                    expected:        s.current_value - s.amount,
                    actual:          s.profit_loss,
                });
            }
        }
        issues
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DatasetIssue {
    DuplicateId { kind: &'static str, id: String },
    DanglingReference { from: String, to: String },
    ProfitLossMismatch { subscription_id: String, expected: f64, actual: f64 },
}

impl fmt::Display for DatasetIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId { kind, id } => write!(f, "duplicate {kind} id '{id}'"),
            Self::DanglingReference { from, to } => write!(f, "{from} references missing {to}"),
            Self::ProfitLossMismatch { subscription_id, expected, actual } => write!(
                f,
                "subscription {subscription_id}: profit/loss {actual:.2}, expected {expected:.2}"
            ),
        }
    }
}

fn check_unique<'a>(
    issues: &mut Vec<DatasetIssue>,
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            issues.push(DatasetIssue::DuplicateId { kind, id: id.to_string() });
        }
    }
}

fn read_array<T: DeserializeOwned>(dir: &str, file: &str) -> anyhow::Result<Vec<T>> {
    let path = format!("{dir}/{file}");
    let content = std::fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
    serde_json::from_str(&content).map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))
}

// ── Built-in demo data ─────────────────────────────────────────────

/// Dashboard metrics over the built-in demo data.
pub fn get_dashboard_metrics() -> DashboardMetrics {
    demo_dataset().get_dashboard_metrics()
}

/// Portfolio for `user_id` over the built-in demo data.
pub fn get_investor_portfolio(user_id: &str) -> InvestorPortfolio {
    demo_dataset().get_investor_portfolio(user_id)
}

pub fn demo_dataset() -> DemoDataset {
    DemoDataset {
        users:         demo_users(),
        companies:     demo_companies(),
        investments:   demo_investments(),
        subscriptions: demo_subscriptions(),
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn ts(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    date(y, m, d).and_hms_opt(9, 0, 0).unwrap_or_default().and_utc()
}

fn user(id: &str, name: &str, email: &str, role: Role, status: UserStatus, joined: DateTime<Utc>) -> User {
    User {
        id:         id.into(),
        name:       name.into(),
        email:      email.into(),
        role,
        status,
        created_at: joined,
        updated_at: joined,
    }
}

pub fn demo_users() -> Vec<User> {
    use Role::*;
    use UserStatus::*;
    vec![
        user("u-001", "Sarah Mitchell", "superadmin@investdash.io", Superadmin, Active,   ts(2023, 1, 4)),
        user("u-002", "David Chen",     "david.chen@techcorp.io",   Admin,      Active,   ts(2023, 2, 11)),
        user("u-003", "Amara Okafor",   "amara@greenenergy.io",     Admin,      Active,   ts(2023, 2, 19)),
        user("u-004", "Lucas Romero",   "lucas@healthplus.io",      Admin,      Active,   ts(2023, 3, 2)),
        user("u-005", "Emily Carter",   "emily.carter@mail.com",    Investor,   Approved, ts(2023, 4, 15)),
        user("u-006", "Rahul Verma",    "rahul.verma@mail.com",     Investor,   Approved, ts(2023, 5, 21)),
        user("u-007", "Sofia Lindqvist","sofia.l@mail.com",         Investor,   Pending,  ts(2024, 1, 8)),
        user("u-008", "Marcus Webb",    "marcus.webb@mail.com",     Investor,   Rejected, ts(2024, 2, 14)),
        user("u-009", "Hannah Brooks",  "hannah@investdash.io",     Salesman,   Active,   ts(2023, 6, 1)),
    ]
}

#[allow(clippy::too_many_arguments)]
fn company(
    id: &str,
    name: &str,
    industry: &str,
    category: &str,
    email: &str,
    website: &str,
    admin_id: Option<&str>,
    status: CompanyStatus,
    performance: CompanyPerformance,
    created_at: DateTime<Utc>,
) -> Company {
    Company {
        id:            id.into(),
        name:          name.into(),
        industry:      industry.into(),
        category:      category.into(),
        description:   format!("{name} operates in the {} sector.", industry.to_lowercase()),
        contact_email: email.into(),
        contact_phone: "+1 555 010 2000".into(),
        website:       website.into(),
        address:       String::new(),
        status,
        admin_id:      admin_id.map(str::to_string),
        performance,
        created_at,
    }
}

pub fn demo_companies() -> Vec<Company> {
    vec![
        company(
            "c-001", "TechCorp Solutions", "Technology", "Software",
            "contact@techcorp.io", "https://techcorp.io", Some("u-002"),
            CompanyStatus::Active,
            CompanyPerformance { profit: 68_000.0, loss: 0.0, roi: 19.43 },
            ts(2023, 2, 10),
        ),
        company(
            "c-002", "GreenEnergy Ltd", "Renewable Energy", "Solar",
            "hello@greenenergy.io", "greenenergy.io", Some("u-003"),
            CompanyStatus::Active,
            CompanyPerformance { profit: 31_000.0, loss: 12_000.0, roi: 6.33 },
            ts(2023, 2, 18),
        ),
        company(
            "c-003", "HealthPlus Medical", "Healthcare", "Biotech",
            "info@healthplus.io", "https://healthplus.io", Some("u-004"),
            CompanyStatus::Active,
            CompanyPerformance { profit: 22_500.0, loss: 0.0, roi: 11.25 },
            ts(2023, 3, 1),
        ),
        company(
            "c-004", "Urban Realty Group", "Real Estate", "Commercial",
            "deals@urbanrealty.io", "", None,
            CompanyStatus::Pending,
            CompanyPerformance::default(),
            ts(2024, 1, 20),
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn investment(
    id: &str,
    name: &str,
    investment_type: &str,
    company_id: &str,
    initial_amount: f64,
    current_value: f64,
    expected_roi: f64,
    risk_level: RiskLevel,
    status: InvestmentStatus,
    investor_count: u32,
    start_date: NaiveDate,
) -> Investment {
    let mut inv = Investment {
        id:                 id.into(),
        name:               name.into(),
        investment_type:    investment_type.into(),
        category:           investment_type.into(),
        initial_amount,
        current_value,
        expected_roi,
        actual_roi:         0.0,
        risk_level,
        status,
        company_id:         company_id.into(),
        investor_count,
        subscription_count: investor_count,
        start_date,
    };
    inv.actual_roi = crate::analytics::round2(inv.roi());
    inv
}

pub fn demo_investments() -> Vec<Investment> {
    use InvestmentStatus::*;
    use RiskLevel::*;
    vec![
        investment("i-001", "Cloud Infrastructure Fund", "Stocks",          "c-001", 200_000.0, 248_000.0, 18.0, Medium, Active,    2, date(2023, 3, 1)),
        investment("i-002", "AI Research Venture",       "Private Equity",  "c-001", 150_000.0, 170_000.0, 25.0, High,   Active,    1, date(2023, 6, 15)),
        investment("i-003", "Solar Farm Bonds",          "Bonds",           "c-002", 300_000.0, 331_000.0,  8.0, Low,    Active,    2, date(2023, 4, 1)),
        investment("i-004", "Wind Turbine Project",      "Private Equity",  "c-002", 190_000.0, 178_000.0, 15.0, High,   Paused,    1, date(2023, 9, 1)),
        investment("i-005", "Biotech Growth Portfolio",  "Stocks",          "c-003", 200_000.0, 222_500.0, 12.0, Medium, Active,    1, date(2023, 5, 10)),
        investment("i-006", "Clinic Expansion Notes",    "Bonds",           "c-003", 100_000.0, 106_000.0,  6.0, Low,    Completed, 1, date(2022, 11, 1)),
        investment("i-007", "Downtown Office REIT",      "Real Estate",     "c-004", 250_000.0, 250_000.0, 10.0, Medium, Cancelled, 0, date(2024, 2, 1)),
    ]
}

fn subscription(
    id: &str,
    user_id: &str,
    investment_id: &str,
    amount: f64,
    current_value: f64,
    status: SubscriptionStatus,
    subscribed_at: DateTime<Utc>,
) -> InvestorInvestment {
    InvestorInvestment {
        id:            id.into(),
        user_id:       user_id.into(),
        investment_id: investment_id.into(),
        amount,
        current_value,
        profit_loss:   current_value - amount,
        status,
        subscribed_at,
    }
}

pub fn demo_subscriptions() -> Vec<InvestorInvestment> {
    use SubscriptionStatus::*;
    vec![
        subscription("s-001", "u-005", "i-001", 50_000.0, 62_000.0, Active,  ts(2023, 4, 20)),
        subscription("s-002", "u-005", "i-003", 25_000.0, 27_580.0, Active,  ts(2023, 5, 2)),
        subscription("s-003", "u-005", "i-006", 10_000.0, 10_600.0, Sold,    ts(2023, 1, 9)),
        subscription("s-004", "u-006", "i-001", 30_000.0, 37_200.0, Active,  ts(2023, 6, 3)),
        subscription("s-005", "u-006", "i-002", 40_000.0, 45_330.0, Active,  ts(2023, 7, 1)),
        subscription("s-006", "u-006", "i-004", 20_000.0, 18_740.0, Active,  ts(2023, 9, 12)),
        subscription("s-007", "u-006", "i-003", 15_000.0, 16_550.0, Pending, ts(2024, 3, 5)),
        subscription("s-008", "u-005", "i-005", 35_000.0, 38_940.0, Active,  ts(2023, 6, 18)),
    ]
}
