use serde::{Deserialize, Serialize};

use crate::constants::{GENERIC_FAILURE_MESSAGE, SUCCESS_MESSAGE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Error,
}

/// ## Summary
/// Response body of the ingress endpoint.
///
/// Callers branch on `status`; the message is meant for display only and is
/// never a structured per-field error list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub status: EnvelopeStatus,
    pub message: String,
}

impl Envelope {
    #[must_use]
    pub fn success() -> Self {
        Self {
            status: EnvelopeStatus::Success,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Error,
            message: message.into(),
        }
    }

    /// Error envelope that deliberately hides the underlying cause.
    #[must_use]
    pub fn generic_failure() -> Self {
        Self::error(GENERIC_FAILURE_MESSAGE)
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == EnvelopeStatus::Success
    }
}
