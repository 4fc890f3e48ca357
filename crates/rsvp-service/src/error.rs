use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    DatabaseError(#[from] rsvp_db::error::DbError),

    #[error(transparent)]
    CoreError(#[from] rsvp_core::error::CoreError),

    #[error(transparent)]
    NotifyError(#[from] NotifyError),

    #[error("Rate limited: {recent} submissions within {window_hours} hours")]
    RateLimited { recent: i64, window_hours: i64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl ServiceError {
    /// The validation failure behind this error, if it is one.
    #[must_use]
    pub fn as_validation(&self) -> Option<&rsvp_core::validation::ValidationError> {
        match self {
            Self::CoreError(rsvp_core::error::CoreError::ValidationError(e)) => Some(e),
            _ => None,
        }
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Confirmation email errors. Never surfaced to the guest.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Invalid address {address:?}: {source}")]
    InvalidAddress {
        address: String,
        source: lettre::address::AddressError,
    },

    #[error("Failed to render confirmation: {0}")]
    TemplateError(#[from] askama::Error),

    #[error("Failed to build message: {0}")]
    MessageError(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    SmtpError(#[from] lettre::transport::smtp::Error),

    #[error("Notifier not configured: {0}")]
    NotConfigured(&'static str),

    #[error("Dispatch failed: {0}")]
    DispatchFailed(String),
}

pub type NotifyResult<T> = std::result::Result<T, NotifyError>;
