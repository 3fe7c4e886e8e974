use crate::{
    error::{DashError, DashResult},
    model::{Company, Investment},
    types::EntityId,
};

/// Which company a multi-company view is focused on. None means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanySelection {
    selected: Option<EntityId>,
}

impl CompanySelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, company_id: &str, companies: &[Company]) -> DashResult<()> {
        if !companies.iter().any(|c| c.id == company_id) {
            return Err(DashError::not_found("company", company_id));
        }
        self.selected = Some(company_id.to_string());
        Ok(())
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_company<'a>(&self, companies: &'a [Company]) -> Option<&'a Company> {
        let id = self.selected.as_deref()?;
        companies.iter().find(|c| c.id == id)
    }

    /// Investments of the selected company, or all of them with no selection.
    pub fn scope<'a>(&self, investments: &'a [Investment]) -> Vec<&'a Investment> {
        match self.selected.as_deref() {
            Some(id) => investments.iter().filter(|i| i.company_id == id).collect(),
            None => investments.iter().collect(),
        }
    }
}
