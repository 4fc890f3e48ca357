//! Sends collected submissions to the ingress endpoint.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::{Client, Url};
use rsvp_core::model::{Envelope, RsvpSubmission};

use crate::error::{ClientError, ClientResult};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Anything that can deliver a submission and report the server's verdict.
pub trait Transmit: Send + Sync {
    /// False until an endpoint has been set up.
    fn is_configured(&self) -> bool;

    /// ## Errors
    /// `ClientError::Rejected` carries the message of an error envelope; all
    /// other variants are transport or decoding failures.
    fn transmit<'a>(&'a self, submission: &'a RsvpSubmission) -> BoxFuture<'a, ClientResult<()>>;
}

/// HTTP client for `POST /api/rsvp`.
#[derive(Debug, Clone)]
pub struct SubmissionClient {
    client: Client,
    endpoint: Option<Url>,
}

impl SubmissionClient {
    /// ## Summary
    /// Builds a client for `endpoint`. A missing or blank endpoint yields an
    /// unconfigured client that refuses to submit.
    ///
    /// ## Errors
    /// Returns `ClientError::InvalidEndpoint` if the endpoint is not a URL, or
    /// a transport error if the HTTP client cannot be built.
    pub fn new(endpoint: Option<&str>) -> ClientResult<Self> {
        let endpoint = endpoint
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(|raw| {
                Url::parse(raw).map_err(|e| ClientError::InvalidEndpoint(format!("{raw}: {e}")))
            })
            .transpose()?;
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, endpoint })
    }

    /// ## Summary
    /// Posts one submission and returns the success envelope.
    ///
    /// The HTTP status is informational only; the outcome is taken from the
    /// envelope's `status`.
    ///
    /// ## Errors
    /// `NotConfigured` without an endpoint, `Rejected` for an error envelope,
    /// and `TransportError` or `DecodeError` when no envelope came back.
    pub async fn submit(&self, submission: &RsvpSubmission) -> ClientResult<Envelope> {
        let endpoint = self.endpoint.clone().ok_or(ClientError::NotConfigured)?;

        let response = self.client.post(endpoint).json(submission).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        tracing::debug!(status = status.as_u16(), "Submission answered");
        read_envelope(status.as_u16(), &body)
    }
}

impl Transmit for SubmissionClient {
    fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }

    fn transmit<'a>(&'a self, submission: &'a RsvpSubmission) -> BoxFuture<'a, ClientResult<()>> {
        Box::pin(async move { self.submit(submission).await.map(|_| ()) })
    }
}

/// ## Errors
/// `DecodeError` if the body is not an envelope, `Rejected` if it is an
/// error envelope.
pub fn read_envelope(status: u16, body: &[u8]) -> ClientResult<Envelope> {
    let envelope: Envelope = serde_json::from_slice(body)
        .map_err(|source| ClientError::DecodeError { status, source })?;
    if envelope.is_success() {
        Ok(envelope)
    } else {
        Err(ClientError::Rejected(envelope.message))
    }
}
