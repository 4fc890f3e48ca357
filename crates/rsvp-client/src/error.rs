use thiserror::Error;

/// Submission client errors
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("RSVP endpoint is not configured")]
    NotConfigured,

    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    #[error("Transport error: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Unexpected response ({status}): {source}")]
    DecodeError {
        status: u16,
        source: serde_json::Error,
    },

    #[error("Submission rejected: {0}")]
    Rejected(String),
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
