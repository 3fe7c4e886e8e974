use super::{FetchState, Resource};
use crate::{
    api::DashboardApi,
    error::DashResult,
    model::Company,
    validation::CompanyFormData,
};
use std::rc::Rc;

/// Cached sub-companies plus the CRUD calls the company pages make.
pub struct CompanyStore {
    api:       Rc<dyn DashboardApi>,
    companies: Resource<Company>,
}

impl CompanyStore {
    pub fn new(api: Rc<dyn DashboardApi>) -> Self {
        Self {
            api,
            companies: Resource::new("companies"),
        }
    }

    pub fn companies(&self) -> &[Company]    { self.companies.items() }
    pub fn state(&self) -> FetchState        { self.companies.state() }
    pub fn loading(&self) -> bool            { self.companies.is_loading() }
    pub fn last_error(&self) -> Option<&str> { self.companies.last_error() }

    pub fn fetch_companies(&mut self) {
        let api = Rc::clone(&self.api);
        self.companies.fetch_with(|| api.get_sub_companies());
    }

    pub fn get_company(&self, id: &str) -> Option<&Company> {
        self.companies.get(id)
    }

    /// Companies assigned to `admin_id`.
    pub fn companies_for_admin(&self, admin_id: &str) -> Vec<&Company> {
        self.companies
            .items()
            .iter()
            .filter(|c| c.admin_id.as_deref() == Some(admin_id))
            .collect()
    }

    pub fn create_company(&mut self, form: &CompanyFormData) -> DashResult<Company> {
        let company = self.api.create_sub_company(form)?;
        self.companies.upsert(company.clone());
        Ok(company)
    }

    pub fn update_company(&mut self, id: &str, form: &CompanyFormData) -> DashResult<Company> {
        let company = self.api.update_sub_company(id, form)?;
        self.companies.upsert(company.clone());
        Ok(company)
    }

    pub fn delete_company(&mut self, id: &str) -> DashResult<()> {
        self.api.delete_sub_company(id)?;
        self.companies.remove(id);
        Ok(())
    }

    pub fn detach(&mut self) {
        self.companies.detach();
    }

    /// Direct access for callers that drive fetches themselves.
    pub fn resource_mut(&mut self) -> &mut Resource<Company> {
        &mut self.companies
    }
}
