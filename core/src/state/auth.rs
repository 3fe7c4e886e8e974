use crate::{
    api::DashboardApi,
    error::{DashError, DashResult},
    model::{Role, User, UserStatus},
};

/// The signed-in user. Demo login matches on email only.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    current: Option<User>,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login(&mut self, api: &dyn DashboardApi, email: &str) -> DashResult<&User> {
        let email = email.trim();
        let user = api
            .get_users()?
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .ok_or(DashError::NotAuthenticated)?;

        if matches!(user.status, UserStatus::Rejected | UserStatus::Inactive) {
            return Err(DashError::NotAllowed {
                reason: format!("account {} is {:?}", user.email, user.status),
            });
        }

        log::info!("{} signed in as {}", user.email, user.role.as_str());
        Ok(&*self.current.insert(user))
    }

    /// Re-read the signed-in user so status changes made elsewhere (an
    /// admin approval, say) take effect without a new login. A user who
    /// is gone or no longer allowed in is signed out.
    pub fn refresh(&mut self, api: &dyn DashboardApi) -> DashResult<Option<&User>> {
        let Some(id) = self.current.as_ref().map(|u| u.id.clone()) else {
            return Ok(None);
        };
        let fresh = api.get_users()?.into_iter().find(|u| u.id == id);

        match fresh {
            Some(user) if !matches!(user.status, UserStatus::Rejected | UserStatus::Inactive) => {
                Ok(Some(&*self.current.insert(user)))
            }
            _ => {
                self.logout();
                Ok(None)
            }
        }
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.current.take() {
            log::info!("{} signed out", user.email);
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.current.as_ref().is_some_and(|u| u.role == role)
    }

    /// The current user, if they hold one of `roles`.
    pub fn require_role(&self, roles: &[Role]) -> DashResult<&User> {
        let user = self.current.as_ref().ok_or(DashError::NotAuthenticated)?;
        if roles.contains(&user.role) {
            Ok(user)
        } else {
            Err(DashError::NotAllowed {
                reason: format!("role {} cannot access this page", user.role.as_str()),
            })
        }
    }

    /// Investors stay read-only until an admin approves them.
    pub fn can_invest(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|u| u.role == Role::Investor && u.status.can_transact())
    }
}
