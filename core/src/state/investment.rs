use super::{FetchState, Resource};
use crate::{
    api::DashboardApi,
    error::DashResult,
    model::{Investment, InvestorInvestment},
};
use std::rc::Rc;

/// Cached investments and investor subscriptions.
pub struct InvestmentStore {
    api:           Rc<dyn DashboardApi>,
    investments:   Resource<Investment>,
    subscriptions: Resource<InvestorInvestment>,
}

impl InvestmentStore {
    pub fn new(api: Rc<dyn DashboardApi>) -> Self {
        Self {
            api,
            investments:   Resource::new("investments"),
            subscriptions: Resource::new("investor_investments"),
        }
    }

    pub fn investments(&self) -> &[Investment]            { self.investments.items() }
    pub fn subscriptions(&self) -> &[InvestorInvestment] { self.subscriptions.items() }
    pub fn state(&self) -> FetchState                     { self.investments.state() }
    pub fn loading(&self) -> bool {
        self.investments.is_loading() || self.subscriptions.is_loading()
    }

    pub fn fetch_investments(&mut self) {
        let api = Rc::clone(&self.api);
        self.investments.fetch_with(|| api.get_investments());
    }

    pub fn fetch_subscriptions(&mut self) {
        let api = Rc::clone(&self.api);
        self.subscriptions.fetch_with(|| api.get_investor_investments());
    }

    pub fn get_investment(&self, id: &str) -> Option<&Investment> {
        self.investments.get(id)
    }

    pub fn investments_for_company(&self, company_id: &str) -> Vec<&Investment> {
        self.investments
            .items()
            .iter()
            .filter(|i| i.company_id == company_id)
            .collect()
    }

    pub fn subscriptions_for_user(&self, user_id: &str) -> Vec<&InvestorInvestment> {
        self.subscriptions
            .items()
            .iter()
            .filter(|s| s.user_id == user_id)
            .collect()
    }

    /// Subscribe through the API, then reflect the new stake locally.
    /// Investment counters are re-read from the server; the local
    /// subscription cache may be partial and cannot tell a new investor.
    pub fn subscribe(
        &mut self,
        user_id: &str,
        investment_id: &str,
        amount: f64,
    ) -> DashResult<InvestorInvestment> {
        let subscription = self.api.subscribe(user_id, investment_id, amount)?;
        self.subscriptions.upsert(subscription.clone());

        if self.investments.get(investment_id).is_some() {
            match self.api.get_investment(investment_id) {
                Ok(investment) => self.investments.upsert(investment),
                Err(e) => log::warn!("investment {investment_id}: counters not refreshed: {e}"),
            }
        }
        Ok(subscription)
    }

    pub fn detach(&mut self) {
        self.investments.detach();
        self.subscriptions.detach();
    }
}
