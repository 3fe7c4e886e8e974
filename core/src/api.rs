//! Backend API seam.
//!
//! RULE: state containers only talk to the backend through DashboardApi.
//! The real HTTP client lives outside this crate; DemoApi serves the
//! in-memory demo dataset behind the same contract.

use crate::{
    demo_data::{demo_dataset, DemoDataset},
    error::{DashError, DashResult},
    model::{
        Company, CompanyPerformance, CompanyStatus, Investment, InvestorInvestment, NewInvestor,
        Role, SubscriptionStatus, User, UserStatus,
    },
    validation::{is_valid_email, validate_company_form, CompanyFormData, ValidationResult},
};
use chrono::Utc;
use std::cell::{Cell, RefCell};

/// The backend contract. Every call either returns typed records or an
/// error carrying the server's message.
pub trait DashboardApi {
    fn get_users(&self) -> DashResult<Vec<User>>;
    fn get_sub_companies(&self) -> DashResult<Vec<Company>>;
    fn get_investments(&self) -> DashResult<Vec<Investment>>;
    fn get_investor_investments(&self) -> DashResult<Vec<InvestorInvestment>>;
    fn get_investment(&self, investment_id: &str) -> DashResult<Investment>;

    fn create_investor(&self, investor: NewInvestor) -> DashResult<User>;
    fn update_user_status(&self, user_id: &str, status: UserStatus) -> DashResult<User>;

    fn create_sub_company(&self, form: &CompanyFormData) -> DashResult<Company>;
    fn update_sub_company(&self, company_id: &str, form: &CompanyFormData) -> DashResult<Company>;
    fn delete_sub_company(&self, company_id: &str) -> DashResult<()>;

    fn subscribe(
        &self,
        user_id: &str,
        investment_id: &str,
        amount: f64,
    ) -> DashResult<InvestorInvestment>;
}

/// In-memory backend over a DemoDataset.
pub struct DemoApi {
    data:    RefCell<DemoDataset>,
    offline: Cell<bool>,
}

impl DemoApi {
    pub fn new(data: DemoDataset) -> Self {
        Self {
            data:    RefCell::new(data),
            offline: Cell::new(false),
        }
    }

    pub fn builtin() -> Self {
        Self::new(demo_dataset())
    }

    /// While offline every call fails like a dropped connection.
    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    pub fn snapshot(&self) -> DemoDataset {
        self.data.borrow().clone()
    }

    fn online(&self) -> DashResult<()> {
        if self.offline.get() {
            Err(DashError::api(503, "Network error: backend unreachable"))
        } else {
            Ok(())
        }
    }
}

fn reject_invalid(result: &ValidationResult) -> DashResult<()> {
    match result.errors.first() {
        None => Ok(()),
        Some(first) => Err(DashError::api(422, first.message.clone())),
    }
}

fn new_id(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4().simple())
}

impl DashboardApi for DemoApi {
    fn get_users(&self) -> DashResult<Vec<User>> {
        self.online()?;
        Ok(self.data.borrow().users.clone())
    }

    fn get_sub_companies(&self) -> DashResult<Vec<Company>> {
        self.online()?;
        Ok(self.data.borrow().companies.clone())
    }

    fn get_investments(&self) -> DashResult<Vec<Investment>> {
        self.online()?;
        Ok(self.data.borrow().investments.clone())
    }

    fn get_investor_investments(&self) -> DashResult<Vec<InvestorInvestment>> {
        self.online()?;
        Ok(self.data.borrow().subscriptions.clone())
    }

    fn get_investment(&self, investment_id: &str) -> DashResult<Investment> {
        self.online()?;
        self.data
            .borrow()
            .investments
            .iter()
            .find(|i| i.id == investment_id)
            .cloned()
            .ok_or_else(|| DashError::api(404, format!("Investment {investment_id} not found")))
    }

    fn create_investor(&self, investor: NewInvestor) -> DashResult<User> {
        self.online()?;
        let email = investor.email.trim().to_lowercase();
        if investor.name.trim().is_empty() {
            return Err(DashError::api(422, "Investor name is required"));
        }
        if !is_valid_email(&email) {
            return Err(DashError::api(422, "Please enter a valid email address"));
        }
        let mut data = self.data.borrow_mut();
        if data.users.iter().any(|u| u.email.eq_ignore_ascii_case(&email)) {
            return Err(DashError::api(409, format!("A user with email {email} already exists")));
        }
        let now = Utc::now();
        let user = User {
            id:         new_id("u"),
            name:       investor.name.trim().to_string(),
            email,
            role:       Role::Investor,
            status:     UserStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        data.users.push(user.clone());
        log::info!("created investor {} ({})", user.id, user.email);
        Ok(user)
    }

    fn update_user_status(&self, user_id: &str, status: UserStatus) -> DashResult<User> {
        self.online()?;
        let mut data = self.data.borrow_mut();
        let user = data
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| DashError::api(404, format!("User {user_id} not found")))?;
        user.status = status;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    fn create_sub_company(&self, form: &CompanyFormData) -> DashResult<Company> {
        self.online()?;
        reject_invalid(&validate_company_form(form))?;
        let company = Company {
            id:            new_id("c"),
            name:          form.name.trim().to_string(),
            industry:      form.industry.trim().to_string(),
            category:      form.category.trim().to_string(),
            description:   form.description.trim().to_string(),
            contact_email: form.contact_email.trim().to_string(),
            contact_phone: form.contact_phone.trim().to_string(),
            website:       form.website.trim().to_string(),
            address:       form.address.trim().to_string(),
            status:        CompanyStatus::Pending,
            admin_id:      None,
            performance:   CompanyPerformance::default(),
            created_at:    Utc::now(),
        };
        self.data.borrow_mut().companies.push(company.clone());
        Ok(company)
    }

    fn update_sub_company(&self, company_id: &str, form: &CompanyFormData) -> DashResult<Company> {
        self.online()?;
        reject_invalid(&validate_company_form(form))?;
        let mut data = self.data.borrow_mut();
        let company = data
            .companies
            .iter_mut()
            .find(|c| c.id == company_id)
            .ok_or_else(|| DashError::api(404, format!("Company {company_id} not found")))?;
        company.name = form.name.trim().to_string();
        company.industry = form.industry.trim().to_string();
        company.category = form.category.trim().to_string();
        company.description = form.description.trim().to_string();
        company.contact_email = form.contact_email.trim().to_string();
        company.contact_phone = form.contact_phone.trim().to_string();
        company.website = form.website.trim().to_string();
        company.address = form.address.trim().to_string();
        Ok(company.clone())
    }

    fn delete_sub_company(&self, company_id: &str) -> DashResult<()> {
        self.online()?;
        let mut data = self.data.borrow_mut();
        if data.investments.iter().any(|i| i.company_id == company_id) {
            return Err(DashError::api(
                409,
                "Cannot delete a company that still has investments",
            ));
        }
        let before = data.companies.len();
        data.companies.retain(|c| c.id != company_id);
        if data.companies.len() == before {
            return Err(DashError::api(404, format!("Company {company_id} not found")));
        }
        Ok(())
    }

    fn subscribe(
        &self,
        user_id: &str,
        investment_id: &str,
        amount: f64,
    ) -> DashResult<InvestorInvestment> {
        self.online()?;
        if !(amount.is_finite() && amount > 0.0) {
            return Err(DashError::api(422, "Investment amount must be greater than zero"));
        }
        let mut data = self.data.borrow_mut();

        let user = data
            .users
            .iter()
            .find(|u| u.id == user_id)
            .ok_or_else(|| DashError::api(404, format!("User {user_id} not found")))?;
        if user.role != Role::Investor {
            return Err(DashError::api(403, "Only investors can subscribe"));
        }
        if !user.status.can_transact() {
            return Err(DashError::api(403, "Your account is pending admin approval"));
        }

        let investment = data
            .investments
            .iter_mut()
            .find(|i| i.id == investment_id)
            .ok_or_else(|| DashError::api(404, format!("Investment {investment_id} not found")))?;
        if !investment.status.accepts_subscriptions() {
            return Err(DashError::api(
                409,
                format!("Investment is {} and not open", investment.status.as_str()),
            ));
        }
        investment.subscription_count += 1;

        let subscription = InvestorInvestment {
            id:            new_id("s"),
            user_id:       user_id.to_string(),
            investment_id: investment_id.to_string(),
            amount,
            current_value: amount,
            profit_loss:   0.0,
            status:        SubscriptionStatus::Pending,
            subscribed_at: Utc::now(),
        };
        if !data
            .subscriptions
            .iter()
            .any(|s| s.user_id == user_id && s.investment_id == investment_id)
        {
            if let Some(inv) = data.investments.iter_mut().find(|i| i.id == investment_id) {
                inv.investor_count += 1;
            }
        }
        data.subscriptions.push(subscription.clone());
        Ok(subscription)
    }
}
