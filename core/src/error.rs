use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error("Operation not allowed: {reason}")]
    NotAllowed { reason: String },

    #[error("Not authenticated")]
    NotAuthenticated,
}

impl DashError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api { status, message: message.into() }
    }

    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound { kind, id: id.into() }
    }

    /// The user-facing message, the way the front-end reads
    /// `error.response.data.message` off a failed request.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type DashResult<T> = Result<T, DashError>;
