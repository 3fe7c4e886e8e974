//! Domain records exchanged with the API and rendered by the dashboard.
//!
//! Field names serialize in camelCase so records round-trip with the
//! front-end JSON unchanged.

use crate::{
    analytics::roi_percent,
    types::{EntityId, Money, Percent},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ── Users ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Superadmin,
    Admin,
    Investor,
    Salesman,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Superadmin => "superadmin",
            Self::Admin      => "admin",
            Self::Investor   => "investor",
            Self::Salesman   => "salesman",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Pending,
    Approved,
    Rejected,
    Active,
    Inactive,
}

impl UserStatus {
    /// Approved and active users may transact; everyone else waits on an admin.
    pub fn can_transact(&self) -> bool {
        matches!(self, Self::Approved | Self::Active)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id:         EntityId,
    pub name:       String,
    pub email:      String,
    pub role:       Role,
    pub status:     UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating an investor account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewInvestor {
    pub name:  String,
    pub email: String,
}

// ── Companies ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CompanyStatus {
    Active,
    Inactive,
    Pending,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct CompanyPerformance {
    pub profit: Money,
    pub loss:   Money,
    pub roi:    Percent,
}

/// A sub-company hosted on the platform. One admin is assigned per company.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id:            EntityId,
    pub name:          String,
    pub industry:      String,
    #[serde(default)]
    pub category:      String,
    #[serde(default)]
    pub description:   String,
    pub contact_email: String,
    #[serde(default)]
    pub contact_phone: String,
    #[serde(default)]
    pub website:       String,
    #[serde(default)]
    pub address:       String,
    pub status:        CompanyStatus,
    #[serde(default)]
    pub admin_id:      Option<EntityId>,
    #[serde(default)]
    pub performance:   CompanyPerformance,
    pub created_at:    DateTime<Utc>,
}

// ── Investments ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum InvestmentStatus {
    Active,
    Completed,
    Paused,
    Cancelled,
}

impl InvestmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active    => "Active",
            Self::Completed => "Completed",
            Self::Paused    => "Paused",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Only active investments accept new subscriptions.
    pub fn accepts_subscriptions(&self) -> bool {
        matches!(self, Self::Active)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id:                 EntityId,
    pub name:               String,
    /// Asset type, e.g. "Stocks", "Real Estate", "Bonds".
    pub investment_type:    String,
    #[serde(default)]
    pub category:           String,
    pub initial_amount:     Money,
    pub current_value:      Money,
    pub expected_roi:       Percent,
    #[serde(default)]
    pub actual_roi:         Percent,
    pub risk_level:         RiskLevel,
    pub status:             InvestmentStatus,
    pub company_id:         EntityId,
    #[serde(default)]
    pub investor_count:     u32,
    #[serde(default)]
    pub subscription_count: u32,
    pub start_date:         NaiveDate,
}

impl Investment {
    pub fn profit_loss(&self) -> Money {
        self.current_value - self.initial_amount
    }

    pub fn roi(&self) -> Percent {
        roi_percent(self.profit_loss(), self.initial_amount)
    }
}

// ── Subscriptions ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Sold,
    Pending,
}

/// An investor's stake in an investment. The join entity aggregation runs over.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvestorInvestment {
    pub id:            EntityId,
    pub user_id:       EntityId,
    pub investment_id: EntityId,
    pub amount:        Money,
    pub current_value: Money,
    pub profit_loss:   Money,
    pub status:        SubscriptionStatus,
    pub subscribed_at: DateTime<Utc>,
}

impl InvestorInvestment {
    pub fn roi(&self) -> Percent {
        roi_percent(self.current_value - self.amount, self.amount)
    }

    /// Re-derive `profit_loss` from the invested amount and current value.
    pub fn recompute(&mut self) {
        self.profit_loss = self.current_value - self.amount;
    }

    /// True when the stored profit/loss agrees with its derivation to the cent.
    pub fn is_consistent(&self) -> bool {
        (self.current_value - self.amount - self.profit_loss).abs() < 0.005
    }
}

// ── Derived series ─────────────────────────────────────────────────

/// One point of a synthesized performance chart. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceDataPoint {
    pub date:                 NaiveDate,
    pub value:                Money,
    pub daily_change:         Money,
    pub daily_change_percent: Percent,
}
