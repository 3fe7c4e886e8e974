//! The generic data container: every collection a dashboard page needs,
//! fetched as one batch and committed together.

use super::{FetchState, FetchTicket, Resource};
use crate::{
    analytics::{dashboard_metrics, DashboardMetrics},
    api::DashboardApi,
    error::{DashError, DashResult},
    model::{Company, Investment, InvestorInvestment, NewInvestor, Role, User, UserStatus},
};
use std::rc::Rc;

pub struct DataStore {
    api:           Rc<dyn DashboardApi>,
    users:         Resource<User>,
    companies:     Resource<Company>,
    investments:   Resource<Investment>,
    subscriptions: Resource<InvestorInvestment>,
}

/// Tickets for one batched fetch, one per collection.
#[derive(Debug, Clone, Copy)]
pub struct BatchTicket {
    users:         FetchTicket,
    companies:     FetchTicket,
    investments:   FetchTicket,
    subscriptions: FetchTicket,
}

/// Raw results of a batched fetch, before commit.
pub struct BatchResult {
    pub users:         DashResult<Vec<User>>,
    pub companies:     DashResult<Vec<Company>>,
    pub investments:   DashResult<Vec<Investment>>,
    pub subscriptions: DashResult<Vec<InvestorInvestment>>,
}

impl DataStore {
    pub fn new(api: Rc<dyn DashboardApi>) -> Self {
        Self {
            api,
            users:         Resource::new("users"),
            companies:     Resource::new("companies"),
            investments:   Resource::new("investments"),
            subscriptions: Resource::new("investor_investments"),
        }
    }

    pub fn users(&self) -> &[User]                        { self.users.items() }
    pub fn companies(&self) -> &[Company]                 { self.companies.items() }
    pub fn investments(&self) -> &[Investment]            { self.investments.items() }
    pub fn subscriptions(&self) -> &[InvestorInvestment] { self.subscriptions.items() }
    pub fn state(&self) -> FetchState                     { self.users.state() }
    pub fn loading(&self) -> bool                         { self.users.is_loading() }
    pub fn last_error(&self) -> Option<&str>              { self.users.last_error() }

    pub fn begin_fetch_all(&mut self) -> BatchTicket {
        BatchTicket {
            users:         self.users.begin_fetch(),
            companies:     self.companies.begin_fetch(),
            investments:   self.investments.begin_fetch(),
            subscriptions: self.subscriptions.begin_fetch(),
        }
    }

    pub fn request_all(&self) -> BatchResult {
        BatchResult {
            users:         self.api.get_users(),
            companies:     self.api.get_sub_companies(),
            investments:   self.api.get_investments(),
            subscriptions: self.api.get_investor_investments(),
        }
    }

    /// Commit a batch. If any request failed, every collection is reset:
    /// a page never renders a mix of fresh and missing data.
    pub fn complete_fetch_all(&mut self, ticket: BatchTicket, result: BatchResult) -> bool {
        let first_error = [
            result.users.as_ref().err(),
            result.companies.as_ref().err(),
            result.investments.as_ref().err(),
            result.subscriptions.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        .next()
        .map(|e| e.user_message());

        match first_error {
            None => {
                let committed = self.users.complete_fetch(ticket.users, result.users);
                self.companies.complete_fetch(ticket.companies, result.companies);
                self.investments.complete_fetch(ticket.investments, result.investments);
                self.subscriptions
                    .complete_fetch(ticket.subscriptions, result.subscriptions);
                committed
            }
            Some(message) => {
                let committed = self
                    .users
                    .complete_fetch(ticket.users, Err(batch_failure(&message)));
                self.companies
                    .complete_fetch(ticket.companies, Err(batch_failure(&message)));
                self.investments
                    .complete_fetch(ticket.investments, Err(batch_failure(&message)));
                self.subscriptions
                    .complete_fetch(ticket.subscriptions, Err(batch_failure(&message)));
                committed
            }
        }
    }

    pub fn fetch_all(&mut self) -> bool {
        let ticket = self.begin_fetch_all();
        let result = self.request_all();
        self.complete_fetch_all(ticket, result)
    }

    pub fn detach(&mut self) {
        self.users.detach();
        self.companies.detach();
        self.investments.detach();
        self.subscriptions.detach();
    }

    pub fn get_user(&self, id: &str) -> Option<&User>             { self.users.get(id) }
    pub fn get_company(&self, id: &str) -> Option<&Company>       { self.companies.get(id) }
    pub fn get_investment(&self, id: &str) -> Option<&Investment> { self.investments.get(id) }

    pub fn metrics(&self) -> DashboardMetrics {
        dashboard_metrics(self.users(), self.companies(), self.investments())
    }

    pub fn users_with_role(&self, role: Role) -> Vec<&User> {
        self.users().iter().filter(|u| u.role == role).collect()
    }

    /// Investors waiting on an admin decision.
    pub fn pending_investors(&self) -> Vec<&User> {
        self.users()
            .iter()
            .filter(|u| u.role == Role::Investor && u.status == UserStatus::Pending)
            .collect()
    }

    pub fn create_investor(&mut self, investor: NewInvestor) -> DashResult<User> {
        let user = self.api.create_investor(investor)?;
        self.users.upsert(user.clone());
        Ok(user)
    }

    pub fn set_user_status(&mut self, user_id: &str, status: UserStatus) -> DashResult<User> {
        let user = self.api.update_user_status(user_id, status)?;
        self.users.upsert(user.clone());
        Ok(user)
    }

    pub fn approve_user(&mut self, user_id: &str) -> DashResult<User> {
        self.set_user_status(user_id, UserStatus::Approved)
    }

    pub fn reject_user(&mut self, user_id: &str) -> DashResult<User> {
        self.set_user_status(user_id, UserStatus::Rejected)
    }
}

/// The whole batch fails with the first request's message.
fn batch_failure(message: &str) -> DashError {
    DashError::api(0, message)
}
